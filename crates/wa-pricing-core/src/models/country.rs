//! Supported country catalog
//!
//! Template rates can only be configured for the countries listed here.

use serde::Serialize;

use super::template_rate::TemplateRate;

/// A country template rates can be configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
}

const fn country(code: &'static str, name: &'static str, currency: &'static str) -> Country {
    Country {
        code,
        name,
        currency,
    }
}

/// Supported countries, in display order
pub static COUNTRIES: [Country; 23] = [
    country("IN", "India", "INR"),
    country("US", "United States", "USD"),
    country("GB", "United Kingdom", "GBP"),
    country("AE", "United Arab Emirates", "AED"),
    country("SA", "Saudi Arabia", "SAR"),
    country("SG", "Singapore", "SGD"),
    country("MY", "Malaysia", "MYR"),
    country("ID", "Indonesia", "IDR"),
    country("BR", "Brazil", "BRL"),
    country("MX", "Mexico", "MXN"),
    country("DE", "Germany", "EUR"),
    country("FR", "France", "EUR"),
    country("IT", "Italy", "EUR"),
    country("ES", "Spain", "EUR"),
    country("NL", "Netherlands", "EUR"),
    country("AU", "Australia", "AUD"),
    country("CA", "Canada", "CAD"),
    country("ZA", "South Africa", "ZAR"),
    country("NG", "Nigeria", "NGN"),
    country("EG", "Egypt", "EGP"),
    country("PK", "Pakistan", "PKR"),
    country("BD", "Bangladesh", "BDT"),
    country("KE", "Kenya", "KES"),
];

/// All supported countries
pub fn all() -> &'static [Country] {
    &COUNTRIES
}

/// Find a country by ISO code (case-insensitive)
pub fn lookup(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Countries still selectable for a rate
///
/// Countries that already have a rate are excluded, except `editing`, the
/// country of the rate currently being edited, so it can be saved again.
pub fn available_for(rates: &[TemplateRate], editing: Option<&str>) -> Vec<&'static Country> {
    COUNTRIES
        .iter()
        .filter(|c| {
            editing.is_some_and(|code| c.code.eq_ignore_ascii_case(code))
                || !rates
                    .iter()
                    .any(|r| r.country_code.eq_ignore_ascii_case(c.code))
        })
        .collect()
}
