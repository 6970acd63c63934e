use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::{storage::CartStorage, CartStore};
use crate::config::CheckoutConfig;
use crate::domain::booking::{BookingRequest, PaymentMethod, TimeSlot};
use crate::domain::cart::CartItem;
use crate::errors::{ApplicationError, DomainError};

pub const DEFAULT_TAX_RATE_PCT: Decimal = Decimal::from_parts(18, 0, 0, false, 0);
pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(49, 0, 0, false, 0);
pub const DEFAULT_CURRENCY: &str = "INR";

const ORDER_PREFIX: &str = "HH";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPolicy {
    pub currency: String,
    pub tax_rate_pct: Decimal,
    pub delivery_fee: Decimal,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_owned(),
            tax_rate_pct: DEFAULT_TAX_RATE_PCT,
            delivery_fee: DEFAULT_DELIVERY_FEE,
        }
    }
}

impl From<&CheckoutConfig> for CheckoutPolicy {
    fn from(config: &CheckoutConfig) -> Self {
        Self {
            currency: config.currency.clone(),
            tax_rate_pct: config.tax_rate_pct,
            delivery_fee: config.delivery_fee,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub taxes: Decimal,
    pub delivery_charge: Decimal,
    pub total: Decimal,
}

impl CheckoutSummary {
    pub fn from_items(items: &[CartItem], policy: &CheckoutPolicy) -> Self {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let taxes = (subtotal * policy.tax_rate_pct / Decimal::ONE_HUNDRED).round_dp(2);
        let delivery_charge = policy.delivery_fee;

        Self { subtotal, taxes, delivery_charge, total: subtotal + taxes + delivery_charge }
    }

    pub fn from_cart<S: CartStorage>(cart: &CartStore<S>, policy: &CheckoutPolicy) -> Self {
        Self::from_items(cart.items(), policy)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// `HH` followed by six digits.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(format!("{ORDER_PREFIX}{}", rng.gen_range(100_000..1_000_000)))
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub summary: CheckoutSummary,
    pub currency: String,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartItem>,
}

/// Validates the booking, confirms the order and empties the cart.
pub fn submit_order<S: CartStorage>(
    cart: &mut CartStore<S>,
    request: &BookingRequest,
    policy: &CheckoutPolicy,
    today: NaiveDate,
) -> Result<OrderConfirmation, ApplicationError> {
    if cart.is_empty() {
        return Err(DomainError::EmptyCart.into());
    }
    let (date, time_slot) = request.validate(today)?;

    let confirmation = OrderConfirmation {
        order_id: OrderId::generate(),
        summary: CheckoutSummary::from_cart(cart, policy),
        currency: policy.currency.clone(),
        date,
        time_slot,
        payment_method: request.payment_method,
        items: cart.items().to_vec(),
    };
    cart.clear()?;

    info!(
        event_name = "checkout.order_submitted",
        order_id = %confirmation.order_id,
        lines = confirmation.items.len(),
        total = %confirmation.summary.total,
        currency = %confirmation.currency,
        date = %date,
        time_slot = %time_slot,
        "order confirmed"
    );

    Ok(confirmation)
}
