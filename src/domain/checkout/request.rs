//! Checkout request value objects.

use rust_decimal::Decimal;

use super::errors::ValidationError;
use super::money::{to_minor_units, Currency};

/// One purchasable line of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    name: String,
    unit_price: Decimal,
    unit_amount: i64,
    quantity: u32,
}

impl LineItem {
    /// Creates a validated line item.
    ///
    /// `index` is only used to name the offending field in errors.
    pub fn new(
        index: usize,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: i64,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field(format!("items[{}].name", index)));
        }
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(ValidationError::below_minimum(
                format!("items[{}].price", index),
                0,
                unit_price,
            ));
        }
        if quantity < 1 {
            return Err(ValidationError::below_minimum(
                format!("items[{}].quantity", index),
                1,
                quantity,
            ));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| ValidationError::too_large(format!("items[{}].quantity", index)))?;
        let unit_amount = to_minor_units(unit_price)
            .ok_or_else(|| ValidationError::too_large(format!("items[{}].price", index)))?;

        Ok(Self {
            name,
            unit_price,
            unit_amount,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price as supplied by the caller.
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Price in minor units, rounded half away from zero.
    pub fn unit_amount(&self) -> i64 {
        self.unit_amount
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Validated request to open a hosted checkout for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    items: Vec<LineItem>,
    currency: Currency,
    order_id: String,
}

impl CheckoutRequest {
    /// Creates a checkout request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if there are no items or the order id is blank.
    pub fn new(
        items: Vec<LineItem>,
        currency: Currency,
        order_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::empty_field("items"));
        }
        let order_id = order_id.into().trim().to_string();
        if order_id.is_empty() {
            return Err(ValidationError::empty_field("orderId"));
        }

        Ok(Self {
            items,
            currency,
            order_id,
        })
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Identifier of the order in the external order system.
    pub fn order_id(&self) -> &str {
        &self.order_id
    }
}

/// Redirect URLs returned by the vendor for a created session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResult {
    pub success_url: String,
    pub cancel_url: String,
    pub redirect_url: String,
}
