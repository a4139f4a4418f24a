//! Template Rate DTOs
//!
//! Request and response types for the template rate endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wa_pricing_core::models::{Country, TemplateCategory, TemplateRate};
use wa_pricing_core::RateFilter;

/// Query parameters for listing a company's rates
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RateListParams {
    /// Company whose rates are listed
    pub company_id: Option<String>,

    /// Optional narrowing of the returned list
    #[serde(flatten)]
    pub filter: RateFilter,
}

/// Rate list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesResponse {
    /// Rates in stored order
    pub rates: Vec<TemplateRate>,
}

/// Full replacement of a company's rate list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveRatesRequest {
    /// Company whose list is replaced
    #[validate(length(min = 1, message = "Company ID is required"))]
    pub company_id: String,

    /// New rate list; may be empty
    #[serde(default)]
    pub rates: Vec<TemplateRate>,
}

/// Query parameters for a message cost quote
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuoteParams {
    /// Company whose rates apply
    #[validate(length(min = 1, message = "Company ID is required"))]
    pub company_id: String,

    /// Destination country
    #[validate(length(min = 2, max = 3, message = "Country code is required"))]
    pub country_code: String,

    /// Template category
    pub category: TemplateCategory,

    /// Number of messages
    #[serde(default = "default_count")]
    #[validate(range(min = 1, message = "Count must be at least 1"))]
    pub count: u64,
}

fn default_count() -> u64 {
    1
}

/// Message cost quote response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuoteResponse {
    /// Destination country
    pub country_code: String,

    /// Template category
    pub category: TemplateCategory,

    /// Number of messages
    pub count: u64,

    /// Currency of the rate
    pub currency: String,

    /// Per-message price
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Total cost
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Query parameters for the country dropdown
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CountryParams {
    /// Company whose existing rates are excluded
    pub company_id: Option<String>,

    /// Country of the rate being edited, kept selectable
    pub editing: Option<String>,
}

/// Country dropdown response
#[derive(Debug, Clone, Serialize)]
pub struct CountriesResponse {
    /// Selectable countries
    pub countries: Vec<Country>,
}
