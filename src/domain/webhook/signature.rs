//! Stripe webhook signature verification.
//!
//! Verifies the `stripe-signature` header with HMAC-SHA256 over the exact
//! bytes received, then validates the timestamp to limit replays.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::stripe_event::StripeEvent;

/// Default maximum age for a signature (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Maximum allowed clock skew for future timestamps (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Every `v1` signature present. Stripe sends several while a secret is
    /// being rolled.
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,v1=<signature>...][,v0=<legacy>]`
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::ParseError` if the header format is invalid.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    let signature = hex::decode(value.trim()).map_err(|_| {
                        WebhookError::ParseError("invalid v1 signature hex".to_string())
                    })?;
                    v1_signatures.push(signature);
                }
                // v0 and unknown schemes are never trusted
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::ParseError("missing v1 signature".to_string()));
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifier for Stripe webhook signatures.
pub struct WebhookVerifier {
    /// The endpoint signing secret (`whsec_...`).
    secret: SecretString,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    /// Creates a verifier with the default five minute tolerance.
    pub fn new(secret: SecretString) -> Self {
        Self::with_tolerance(secret, DEFAULT_TOLERANCE_SECS)
    }

    pub fn with_tolerance(secret: SecretString, tolerance_secs: i64) -> Self {
        Self {
            secret,
            tolerance_secs,
        }
    }

    /// Verifies the webhook signature and parses the event.
    ///
    /// # Verification Steps
    ///
    /// 1. Parse the signature header
    /// 2. Validate timestamp is within acceptable range
    /// 3. Compute expected signature over `"{t}."` followed by the raw body
    /// 4. Compare against every `v1` candidate in constant time
    /// 5. Parse the JSON payload into a StripeEvent
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` - No candidate matched
    /// - `TimestampOutOfRange` - Signature is older than the tolerance
    /// - `InvalidTimestamp` - Signature timestamp is in the future
    /// - `ParseError` - Failed to parse header or JSON payload
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.validate_timestamp(header.timestamp, chrono::Utc::now().timestamp())?;

        let expected = compute_signature(
            self.secret.expose_secret().as_bytes(),
            header.timestamp,
            payload,
        )?;

        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    fn validate_timestamp(&self, timestamp: i64, now: i64) -> Result<(), WebhookError> {
        let age = now
            .checked_sub(timestamp)
            .ok_or(WebhookError::InvalidTimestamp)?;

        if age > self.tolerance_secs {
            return Err(WebhookError::TimestampOutOfRange);
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::InvalidTimestamp);
        }

        Ok(())
    }
}

/// Builds a `stripe-signature` header value for `payload`.
///
/// Used by tests and local tooling that replays events against the service.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, WebhookError> {
    let signature = compute_signature(secret.as_bytes(), timestamp, payload)?;
    Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
}

fn compute_signature(secret: &[u8], timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).map_err(|_| WebhookError::InvalidSignature)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";

    fn verifier(secret: &str) -> WebhookVerifier {
        WebhookVerifier::new(SecretString::new(secret.to_string()))
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    // ══════════════════════════════════════════════════════════════
    // SignatureHeader Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_v1_only() {
        let header_str = format!("t=1234567890,v1={}", "a".repeat(64));

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signatures.len(), 1);
        assert_eq!(header.v1_signatures[0].len(), 32);
    }

    #[test]
    fn parse_header_collects_every_v1() {
        let header_str = format!(
            "t=1234567890,v1={},v1={},v0={}",
            "a".repeat(64),
            "b".repeat(64),
            "c".repeat(64)
        );

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.v1_signatures.len(), 2);
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let header_str = format!("t=1234567890,v1={},v2=future,scheme=hmac", "a".repeat(64));

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, 1234567890);
    }

    #[test]
    fn parse_header_missing_timestamp_fails() {
        let result = SignatureHeader::parse(&format!("v1={}", "a".repeat(64)));
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_header_missing_v1_fails() {
        let result = SignatureHeader::parse(&format!("t=1234567890,v0={}", "a".repeat(64)));
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_header_invalid_hex_fails() {
        let result = SignatureHeader::parse("t=1234567890,v1=not_valid_hex");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_header_non_ascii_fails() {
        let result = SignatureHeader::parse("t=1234567890,v1=ééé");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_header_no_equals_fails() {
        let result = SignatureHeader::parse("t1234567890");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let payload = br#"{"id":"evt_test123","type":"charge.succeeded","data":{"object":{}}}"#;
        let header = sign_payload(TEST_SECRET, now(), payload).unwrap();

        let event = verifier(TEST_SECRET)
            .verify_and_parse(payload, &header)
            .unwrap();

        assert_eq!(event.id, "evt_test123");
        assert_eq!(event.event_type, "charge.succeeded");
    }

    #[test]
    fn verify_accepts_any_matching_v1() {
        let payload = br#"{"id":"evt_roll","type":"charge.succeeded","data":{"object":{}}}"#;
        let timestamp = now();
        let good = sign_payload(TEST_SECRET, timestamp, payload).unwrap();
        let good_sig = good.split_once(",v1=").unwrap().1;
        let header = format!("t={},v1={},v1={}", timestamp, "0".repeat(64), good_sig);

        let result = verifier(TEST_SECRET).verify_and_parse(payload, &header);

        assert!(result.is_ok());
    }

    #[test]
    fn verify_invalid_signature_fails() {
        let header = format!("t={},v1={}", now(), "a".repeat(64));

        let result = verifier(TEST_SECRET).verify_and_parse(br#"{"id":"evt_test"}"#, &header);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_wrong_secret_fails() {
        let payload = br#"{"id":"evt_test"}"#;
        let header = sign_payload(TEST_SECRET, now(), payload).unwrap();

        let result = verifier("whsec_other").verify_and_parse(payload, &header);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_reserialized_payload_fails() {
        let original = br#"{"id": "evt_test", "type": "charge.succeeded", "data": {"object": {}}}"#;
        let header = sign_payload(TEST_SECRET, now(), original).unwrap();
        let value: serde_json::Value = serde_json::from_slice(original).unwrap();
        let reserialized = serde_json::to_vec(&value).unwrap();
        assert_ne!(reserialized.as_slice(), original.as_slice());

        let result = verifier(TEST_SECRET).verify_and_parse(&reserialized, &header);

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn verify_non_utf8_payload_is_signed_bytewise() {
        let payload = b"\xff\xfe not json";
        let header = sign_payload(TEST_SECRET, now(), payload).unwrap();

        let result = verifier(TEST_SECRET).verify_and_parse(payload, &header);

        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Timestamp Validation Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_timestamp_within_range_succeeds() {
        assert!(verifier(TEST_SECRET).validate_timestamp(now() - 120, now()).is_ok());
    }

    #[test]
    fn verify_timestamp_too_old_fails() {
        let result = verifier(TEST_SECRET).validate_timestamp(now() - 600, now());
        assert!(matches!(result, Err(WebhookError::TimestampOutOfRange)));
    }

    #[test]
    fn verify_timestamp_respects_custom_tolerance() {
        let verifier =
            WebhookVerifier::with_tolerance(SecretString::new(TEST_SECRET.to_string()), 900);
        assert!(verifier.validate_timestamp(now() - 600, now()).is_ok());
    }

    #[test]
    fn verify_timestamp_from_future_with_skew_succeeds() {
        assert!(verifier(TEST_SECRET).validate_timestamp(now() + 30, now()).is_ok());
    }

    #[test]
    fn verify_timestamp_from_future_beyond_skew_fails() {
        let result = verifier(TEST_SECRET).validate_timestamp(now() + 120, now());
        assert!(matches!(result, Err(WebhookError::InvalidTimestamp)));
    }

    #[test]
    fn verify_timestamp_at_boundary_succeeds() {
        let now = 1_700_000_000;
        let result = verifier(TEST_SECRET).validate_timestamp(now - DEFAULT_TOLERANCE_SECS, now);
        assert!(result.is_ok());
    }

    #[test]
    fn verify_timestamp_just_past_boundary_fails() {
        let now = 1_700_000_000;
        let result =
            verifier(TEST_SECRET).validate_timestamp(now - DEFAULT_TOLERANCE_SECS - 1, now);
        assert!(matches!(result, Err(WebhookError::TimestampOutOfRange)));
    }

    #[test]
    fn verify_timestamp_at_skew_limit_succeeds() {
        let now = 1_700_000_000;
        let result = verifier(TEST_SECRET).validate_timestamp(now + MAX_CLOCK_SKEW_SECS, now);
        assert!(result.is_ok());
    }

    #[test]
    fn extreme_timestamps_are_rejected_without_overflow() {
        let verifier = verifier(TEST_SECRET);

        for timestamp in [i64::MIN, i64::MAX] {
            let header = format!("t={},v1={}", timestamp, "a".repeat(64));
            let result = verifier.verify_and_parse(b"{}", &header);
            assert!(
                matches!(
                    result,
                    Err(WebhookError::InvalidTimestamp | WebhookError::TimestampOutOfRange)
                ),
                "t={} gave {:?}",
                timestamp,
                result
            );
        }
    }

    #[test]
    fn stale_signature_rejected_before_comparison() {
        let payload = br#"{"id":"evt_old"}"#;
        let header = sign_payload(TEST_SECRET, now() - 3600, payload).unwrap();

        let result = verifier(TEST_SECRET).verify_and_parse(payload, &header);

        assert!(matches!(result, Err(WebhookError::TimestampOutOfRange)));
    }

    // ══════════════════════════════════════════════════════════════
    // Helpers
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
    }
}
