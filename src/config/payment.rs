//! Payment configuration

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on the webhook signature tolerance (one day).
const MAX_WEBHOOK_TOLERANCE_SECS: i64 = 86_400;

/// Payment configuration (Stripe)
#[derive(Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    #[serde(default)]
    pub stripe_secret: String,

    /// Stripe webhook signing secret
    #[serde(default)]
    pub stripe_endpoint_secret: String,

    /// Where Stripe redirects after a completed checkout
    #[serde(default)]
    pub success_url: String,

    /// Where Stripe redirects after an abandoned checkout
    #[serde(default)]
    pub cancel_url: String,

    /// Stripe API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for outbound Stripe calls in seconds
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,

    /// Maximum accepted age of a webhook signature in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: i64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret.starts_with("sk_test_")
    }

    /// Get the Stripe API timeout as a Duration
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    /// Validate payment configuration
    ///
    /// When `require_https` is set, both redirect URLs must be HTTPS.
    pub fn validate(&self, require_https: bool) -> Result<(), ValidationError> {
        if self.stripe_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET"));
        }
        if self.stripe_endpoint_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_ENDPOINT_SECRET"));
        }
        if self.success_url.is_empty() {
            return Err(ValidationError::MissingRequired("SUCCESS_URL"));
        }
        if self.cancel_url.is_empty() {
            return Err(ValidationError::MissingRequired("CANCEL_URL"));
        }

        // Verify key prefixes for safety
        if !self.stripe_secret.starts_with("sk_") && !self.stripe_secret.starts_with("rk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_endpoint_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        validate_redirect_url(&self.success_url, "SUCCESS_URL", require_https)?;
        validate_redirect_url(&self.cancel_url, "CANCEL_URL", require_https)?;

        if self.api_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(1..=MAX_WEBHOOK_TOLERANCE_SECS).contains(&self.webhook_tolerance_secs) {
            return Err(ValidationError::InvalidWebhookTolerance(
                self.webhook_tolerance_secs,
            ));
        }

        Ok(())
    }
}

fn validate_redirect_url(
    url: &str,
    name: &'static str,
    require_https: bool,
) -> Result<(), ValidationError> {
    let is_https = url.starts_with("https://");
    if !is_https && !url.starts_with("http://") {
        return Err(ValidationError::InvalidRedirectUrl(name));
    }
    if require_https && !is_https {
        return Err(ValidationError::RedirectUrlMustBeHttps(name));
    }
    Ok(())
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("stripe_secret", &"[REDACTED]")
            .field("stripe_endpoint_secret", &"[REDACTED]")
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .field("api_base_url", &self.api_base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("webhook_tolerance_secs", &self.webhook_tolerance_secs)
            .finish()
    }
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_api_timeout() -> u64 {
    10
}

fn default_webhook_tolerance() -> i64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PaymentConfig {
        PaymentConfig {
            stripe_secret: "sk_test_abcd1234".to_string(),
            stripe_endpoint_secret: "whsec_xyz789".to_string(),
            success_url: "http://localhost:3003/payments/success".to_string(),
            cancel_url: "http://localhost:3003/payments/cancelled".to_string(),
            api_base_url: default_api_base_url(),
            api_timeout_secs: default_api_timeout(),
            webhook_tolerance_secs: default_webhook_tolerance(),
        }
    }

    #[test]
    fn test_is_test_mode() {
        let config = valid_config();
        assert!(config.is_test_mode());

        let config = PaymentConfig {
            stripe_secret: "sk_live_xxx".to_string(),
            ..valid_config()
        };
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = PaymentConfig::default();
        assert_eq!(
            config.validate(false),
            Err(ValidationError::MissingRequired("STRIPE_SECRET"))
        );
    }

    #[test]
    fn test_validation_missing_webhook_secret() {
        let config = PaymentConfig {
            stripe_endpoint_secret: String::new(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(false),
            Err(ValidationError::MissingRequired("STRIPE_ENDPOINT_SECRET"))
        );
    }

    #[test]
    fn test_validation_missing_redirect_urls() {
        let config = PaymentConfig {
            success_url: String::new(),
            ..valid_config()
        };
        assert!(config.validate(false).is_err());

        let config = PaymentConfig {
            cancel_url: String::new(),
            ..valid_config()
        };
        assert!(config.validate(false).is_err());
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        let config = PaymentConfig {
            stripe_secret: "pk_test_xxx".to_string(), // Publishable key
            ..valid_config()
        };
        assert_eq!(config.validate(false), Err(ValidationError::InvalidStripeKey));
    }

    #[test]
    fn test_validation_invalid_webhook_secret_prefix() {
        let config = PaymentConfig {
            stripe_endpoint_secret: "secret_xxx".to_string(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(false),
            Err(ValidationError::InvalidStripeWebhookSecret)
        );
    }

    #[test]
    fn test_validation_invalid_redirect_scheme() {
        let config = PaymentConfig {
            success_url: "ftp://example.com/ok".to_string(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(false),
            Err(ValidationError::InvalidRedirectUrl("SUCCESS_URL"))
        );
    }

    #[test]
    fn test_validation_requires_https_when_asked() {
        let config = valid_config();
        assert_eq!(
            config.validate(true),
            Err(ValidationError::RedirectUrlMustBeHttps("SUCCESS_URL"))
        );

        let config = PaymentConfig {
            success_url: "https://shop.example.com/ok".to_string(),
            cancel_url: "https://shop.example.com/cancel".to_string(),
            ..valid_config()
        };
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn test_validation_invalid_webhook_tolerance() {
        for tolerance in [0, -1, MAX_WEBHOOK_TOLERANCE_SECS + 1, i64::MAX] {
            let config = PaymentConfig {
                webhook_tolerance_secs: tolerance,
                ..valid_config()
            };
            assert_eq!(
                config.validate(false),
                Err(ValidationError::InvalidWebhookTolerance(tolerance))
            );
        }

        let config = PaymentConfig {
            webhook_tolerance_secs: MAX_WEBHOOK_TOLERANCE_SECS,
            ..valid_config()
        };
        assert!(config.validate(false).is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate(false).is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("sk_test_abcd1234"));
        assert!(!rendered.contains("whsec_xyz789"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
