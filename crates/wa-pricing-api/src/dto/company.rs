//! Company DTOs
//!
//! Request and response types for company and wallet endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wa_pricing_core::models::Company;
use wa_pricing_core::pricing::CreditQuote;

/// Company list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompaniesResponse {
    /// All companies
    pub companies: Vec<Company>,
}

/// Wallet patch request
///
/// Balance and currency are stored as given; no conversion happens.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WalletPatchRequest {
    /// Company whose wallet is updated
    #[validate(length(min = 1, message = "Company ID is required"))]
    pub company_id: String,

    /// New wallet balance
    #[serde(with = "rust_decimal::serde::float")]
    pub wallet_balance: Decimal,

    /// Currency code (ISO 4217)
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: String,
}

/// Query parameters for a credit purchase quote
#[derive(Debug, Clone, Deserialize)]
pub struct CreditQuoteParams {
    /// Credits to purchase
    pub amount: Decimal,
}

/// Credit purchase quote response
#[derive(Debug, Clone, Serialize)]
pub struct CreditQuoteResponse {
    /// Price breakdown
    pub quote: CreditQuote,
}
