//! Template rate model
//!
//! Per-country pricing for WhatsApp message templates. Each country carries
//! one rate per template category; the platform price of a category is always
//! derived from its provider cost and margin.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::TemplateCategory;
use super::country::Country;
use crate::error::AppError;
use crate::pricing::derive_platform_price;
use crate::AppResult;

/// Pricing for a single template category
///
/// Fields are private so that `platform_price` can only change through the
/// setters, which recompute it from the inputs. Incoming JSON is trusted for
/// the inputs only; any `platformPrice` on the wire is recomputed, and inputs
/// whose price does not fit a `Decimal` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CategoryRateWire", into = "CategoryRateWire")]
pub struct CategoryRate {
    interakt_price: Decimal,
    margin_percentage: Decimal,
    platform_price: Decimal,
}

impl CategoryRate {
    /// Create a rate, deriving its platform price
    pub fn new(interakt_price: Decimal, margin_percentage: Decimal) -> AppResult<Self> {
        Ok(Self {
            interakt_price,
            margin_percentage,
            platform_price: derive_platform_price(interakt_price, margin_percentage)?,
        })
    }

    /// Zero-cost rate; its platform price is zero whatever the margin
    pub fn free(margin_percentage: Decimal) -> Self {
        Self {
            interakt_price: Decimal::ZERO,
            margin_percentage,
            platform_price: Decimal::ZERO,
        }
    }

    /// Upstream provider cost per message
    #[inline]
    pub fn interakt_price(&self) -> Decimal {
        self.interakt_price
    }

    /// Markup applied by the platform, in percent
    #[inline]
    pub fn margin_percentage(&self) -> Decimal {
        self.margin_percentage
    }

    /// Price charged to the tenant per message
    #[inline]
    pub fn platform_price(&self) -> Decimal {
        self.platform_price
    }

    /// Change the provider cost; the rate is left untouched on error
    pub fn set_interakt_price(&mut self, interakt_price: Decimal) -> AppResult<()> {
        *self = Self::new(interakt_price, self.margin_percentage)?;
        Ok(())
    }

    /// Change the margin; the rate is left untouched on error
    pub fn set_margin_percentage(&mut self, margin_percentage: Decimal) -> AppResult<()> {
        *self = Self::new(self.interakt_price, margin_percentage)?;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRateWire {
    #[serde(default, with = "rust_decimal::serde::float")]
    interakt_price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    margin_percentage: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    platform_price: Decimal,
}

impl TryFrom<CategoryRateWire> for CategoryRate {
    type Error = AppError;

    fn try_from(wire: CategoryRateWire) -> Result<Self, Self::Error> {
        CategoryRate::new(wire.interakt_price, wire.margin_percentage)
    }
}

impl From<CategoryRate> for CategoryRateWire {
    fn from(rate: CategoryRate) -> Self {
        Self {
            interakt_price: rate.interakt_price,
            margin_percentage: rate.margin_percentage,
            platform_price: rate.platform_price,
        }
    }
}

/// Category rates for one country, keyed by template category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryRates {
    #[serde(default)]
    pub marketing: CategoryRate,
    #[serde(default)]
    pub authentication: CategoryRate,
    #[serde(default)]
    pub utility: CategoryRate,
}

impl CategoryRates {
    /// Apply the same margin to every category, starting from zero cost
    pub fn with_margin(margin_percentage: Decimal) -> Self {
        let rate = CategoryRate::free(margin_percentage);
        Self {
            marketing: rate.clone(),
            authentication: rate.clone(),
            utility: rate,
        }
    }

    pub fn get(&self, category: TemplateCategory) -> &CategoryRate {
        match category {
            TemplateCategory::Marketing => &self.marketing,
            TemplateCategory::Authentication => &self.authentication,
            TemplateCategory::Utility => &self.utility,
        }
    }

    pub fn get_mut(&mut self, category: TemplateCategory) -> &mut CategoryRate {
        match category {
            TemplateCategory::Marketing => &mut self.marketing,
            TemplateCategory::Authentication => &mut self.authentication,
            TemplateCategory::Utility => &mut self.utility,
        }
    }

    /// Iterate `(category, rate)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (TemplateCategory, &CategoryRate)> {
        TemplateCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Template rate entity
///
/// Pricing of all template categories for one destination country.
/// `country_code` is unique within a company's rate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRate {
    /// ISO country code
    pub country_code: String,

    /// Human-readable country name
    pub country_name: String,

    /// Currency code (ISO 4217) the prices are expressed in
    pub currency: String,

    /// Pricing per template category
    #[serde(default)]
    pub rates: CategoryRates,

    /// Inactive rates are kept for history but excluded from pricing
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Set on every mutation
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl TemplateRate {
    /// Fresh active rate for a catalog country, every category at zero cost
    pub fn for_country(country: &Country, margin_percentage: Decimal) -> Self {
        Self {
            country_code: country.code.to_string(),
            country_name: country.name.to_string(),
            currency: country.currency.to_string(),
            rates: CategoryRates::with_margin(margin_percentage),
            is_active: true,
            last_updated: Utc::now(),
        }
    }

    /// Per-message price for a category, if this rate takes part in pricing
    pub fn price_for(&self, category: TemplateCategory) -> Option<Decimal> {
        self.is_active
            .then(|| self.rates.get(category).platform_price())
    }

    /// Mark the rate as modified now
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Case-insensitive substring match against country name and code
    pub fn matches_text(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.country_name.to_lowercase().contains(&query)
            || self.country_code.to_lowercase().contains(&query)
    }
}

impl Default for TemplateRate {
    fn default() -> Self {
        Self {
            country_code: String::new(),
            country_name: String::new(),
            currency: String::new(),
            rates: CategoryRates::default(),
            is_active: true,
            last_updated: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_setters_recompute_platform_price() {
        let mut rate = CategoryRate::new(dec!(0.5), dec!(20)).unwrap();
        assert_eq!(rate.platform_price(), dec!(0.6));

        rate.set_margin_percentage(dec!(50)).unwrap();
        assert_eq!(rate.platform_price(), dec!(0.75));

        rate.set_interakt_price(dec!(1)).unwrap();
        assert_eq!(rate.platform_price(), dec!(1.5));
    }

    #[test]
    fn test_out_of_range_setter_keeps_rate() {
        let mut rate = CategoryRate::new(dec!(0.5), dec!(20)).unwrap();
        let err = rate.set_interakt_price(Decimal::MAX).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        assert_eq!(rate.interakt_price(), dec!(0.5));
        assert_eq!(rate.platform_price(), dec!(0.6));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_price() {
        let result = serde_json::from_str::<CategoryRate>(
            r#"{"interaktPrice":1e20,"marginPercentage":1e20}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_ignores_stored_platform_price() {
        let rate: CategoryRate = serde_json::from_value(json!({
            "interaktPrice": 0.5,
            "marginPercentage": 20,
            "platformPrice": 99.0
        }))
        .unwrap();

        assert_eq!(rate.platform_price(), dec!(0.6));
    }

    #[test]
    fn test_serialize_emits_numbers() {
        let rate = CategoryRate::new(dec!(0.5), dec!(20)).unwrap();
        let value = serde_json::to_value(&rate).unwrap();
        assert_eq!(value["interaktPrice"], json!(0.5));
        assert_eq!(value["marginPercentage"], json!(20.0));
        assert_eq!(value["platformPrice"], json!(0.6));
    }

    #[test]
    fn test_template_rate_wire_format() {
        let rate: TemplateRate = serde_json::from_value(json!({
            "countryCode": "IN",
            "countryName": "India",
            "currency": "INR",
            "rates": {
                "marketing": { "interaktPrice": 0.5, "marginPercentage": 20 },
                "authentication": { "interaktPrice": 0.25, "marginPercentage": 10 },
                "utility": { "interaktPrice": 0.25, "marginPercentage": 0 }
            },
            "isActive": false,
            "lastUpdated": "2026-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(rate.country_code, "IN");
        assert!(!rate.is_active);
        assert_eq!(rate.rates.marketing.platform_price(), dec!(0.6));
        assert_eq!(rate.rates.authentication.platform_price(), dec!(0.275));
        assert_eq!(rate.rates.utility.platform_price(), dec!(0.25));
    }

    #[test]
    fn test_price_for_excludes_inactive() {
        let mut rate = TemplateRate {
            country_code: "IN".to_string(),
            rates: CategoryRates {
                marketing: CategoryRate::new(dec!(0.5), dec!(20)).unwrap(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(rate.price_for(TemplateCategory::Marketing), Some(dec!(0.6)));

        rate.is_active = false;
        assert_eq!(rate.price_for(TemplateCategory::Marketing), None);
    }

    #[test]
    fn test_matches_text() {
        let rate = TemplateRate {
            country_code: "AE".to_string(),
            country_name: "United Arab Emirates".to_string(),
            ..Default::default()
        };

        assert!(rate.matches_text("arab"));
        assert!(rate.matches_text("ae"));
        assert!(rate.matches_text(""));
        assert!(!rate.matches_text("india"));
    }

    #[test]
    fn test_category_rates_iter_order() {
        let rates = CategoryRates::with_margin(dec!(10));
        let categories: Vec<_> = rates.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, TemplateCategory::ALL.to_vec());
    }
}
