//! Pricing rules
//!
//! Platform price derivation from the upstream per-message cost, price
//! display formatting, and GST quotes for credit purchases.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::AppError;
use crate::AppResult;

/// Decimal places used when displaying per-message prices
pub const PRICE_DISPLAY_DP: u32 = 4;

/// Decimal places used for currency amounts on invoices
pub const AMOUNT_DP: u32 = 2;

/// Derive the price charged to a tenant from the provider cost and the markup
///
/// `platform_price = interakt_price * (1 + margin_percentage / 100)`
///
/// No rounding happens here. Zero and negative margins are accepted and
/// yield a price at or below cost. Inputs whose product does not fit a
/// `Decimal` are rejected as invalid.
pub fn derive_platform_price(
    interakt_price: Decimal,
    margin_percentage: Decimal,
) -> AppResult<Decimal> {
    (margin_percentage / Decimal::ONE_HUNDRED)
        .checked_add(Decimal::ONE)
        .and_then(|factor| interakt_price.checked_mul(factor))
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Price out of range: {} with {}% margin",
                interakt_price, margin_percentage
            ))
        })
}

/// Format a per-message price for display (4 decimal places)
pub fn format_price(price: Decimal) -> String {
    format!(
        "{:.*}",
        PRICE_DISPLAY_DP as usize,
        price.round_dp_with_strategy(PRICE_DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Price breakdown for a wallet credit purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditQuote {
    /// Credits purchased (amount before tax)
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    /// GST rate applied, in percent
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_percent: Decimal,

    /// GST amount, rounded to 2 decimal places
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_amount: Decimal,

    /// Amount payable
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl CreditQuote {
    /// Build a quote for purchasing `amount` credits
    ///
    /// The amount must be positive; the GST percentage must not be negative.
    pub fn new(amount: Decimal, gst_percent: Decimal) -> AppResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "Credit amount must be greater than zero".to_string(),
            ));
        }
        if gst_percent < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "GST percentage cannot be negative".to_string(),
            ));
        }

        let out_of_range =
            || AppError::InvalidInput(format!("Credit amount out of range: {}", amount));

        let subtotal = amount.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::MidpointAwayFromZero);
        let gst_amount = subtotal
            .checked_mul(gst_percent)
            .ok_or_else(out_of_range)?
            / Decimal::ONE_HUNDRED;
        let gst_amount =
            gst_amount.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::MidpointAwayFromZero);
        let total = subtotal.checked_add(gst_amount).ok_or_else(out_of_range)?;

        Ok(Self {
            subtotal,
            gst_percent,
            gst_amount,
            total,
        })
    }
}
