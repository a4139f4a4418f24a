//! Rate collection operations
//!
//! `RateBook` is the ordered working copy of one company's template rates,
//! keyed by country code. It supports upsert/remove/lookup and the combinable
//! filters used by the admin rate table.

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::AppError;
use crate::models::{TemplateCategory, TemplateRate};
use crate::AppResult;

/// Active/inactive filter dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    fn matches(&self, is_active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => is_active,
            StatusFilter::Inactive => !is_active,
        }
    }
}

impl StatusFilter {
    /// Parse a filter value; blank means no constraint
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Some(StatusFilter::All),
            "active" => Some(StatusFilter::Active),
            "inactive" => Some(StatusFilter::Inactive),
            _ => None,
        }
    }
}

/// Absent, null and blank status values all mean `All`
fn status_or_all<'de, D>(deserializer: D) -> Result<StatusFilter, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let raw = raw.as_deref().unwrap_or("");
    StatusFilter::parse(raw).ok_or_else(|| {
        de::Error::custom(format!(
            "unknown status `{}`, expected all, active or inactive",
            raw
        ))
    })
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Active => write!(f, "active"),
            StatusFilter::Inactive => write!(f, "inactive"),
        }
    }
}

/// Filter over a rate list
///
/// Every dimension is ANDed; an absent or blank value matches everything.
/// Country and currency codes are compared ignoring ASCII case, the same way
/// country codes are keyed in the rate list, so `inr` selects `INR` rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateFilter {
    /// Case-insensitive substring of country name or code
    pub search: Option<String>,

    /// Exact currency code, ASCII case-insensitive
    pub currency: Option<String>,

    /// Exact country code, ASCII case-insensitive
    pub country_code: Option<String>,

    #[serde(default, deserialize_with = "status_or_all")]
    pub status: StatusFilter,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RateFilter {
    /// Whether the filter constrains nothing
    pub fn is_empty(&self) -> bool {
        present(&self.search).is_none()
            && present(&self.currency).is_none()
            && present(&self.country_code).is_none()
            && self.status == StatusFilter::All
    }

    pub fn matches(&self, rate: &TemplateRate) -> bool {
        present(&self.search).map_or(true, |q| rate.matches_text(q))
            && present(&self.currency).map_or(true, |c| rate.currency.eq_ignore_ascii_case(c))
            && present(&self.country_code)
                .map_or(true, |c| rate.country_code.eq_ignore_ascii_case(c))
            && self.status.matches(rate.is_active)
    }
}

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// Ordered working copy of a company's template rates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateBook {
    rates: Vec<TemplateRate>,
}

impl RateBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a rate list as loaded from the backend
    pub fn from_rates(rates: Vec<TemplateRate>) -> Self {
        Self { rates }
    }

    pub fn as_slice(&self) -> &[TemplateRate] {
        &self.rates
    }

    pub fn into_rates(self) -> Vec<TemplateRate> {
        self.rates
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateRate> {
        self.rates.iter()
    }

    fn position(&self, country_code: &str) -> Option<usize> {
        self.rates
            .iter()
            .position(|r| r.country_code.eq_ignore_ascii_case(country_code))
    }

    /// Insert or replace the rate for `rate.country_code`
    ///
    /// A replaced rate keeps its position; a new one is appended.
    /// `last_updated` is always set to now.
    pub fn upsert(&mut self, mut rate: TemplateRate) -> Upsert {
        rate.touch();
        match self.position(&rate.country_code) {
            Some(idx) => {
                self.rates[idx] = rate;
                Upsert::Replaced
            }
            None => {
                self.rates.push(rate);
                Upsert::Inserted
            }
        }
    }

    /// Remove the rate for a country; absent codes are a no-op
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, country_code: &str) -> bool {
        let before = self.rates.len();
        self.rates
            .retain(|r| !r.country_code.eq_ignore_ascii_case(country_code));
        self.rates.len() != before
    }

    pub fn find_by_country(&self, country_code: &str) -> Option<&TemplateRate> {
        self.position(country_code).map(|idx| &self.rates[idx])
    }

    /// Flip a rate's lifecycle flag; returns false when the country is absent
    pub fn set_active(&mut self, country_code: &str, is_active: bool) -> bool {
        match self.position(country_code) {
            Some(idx) => {
                let rate = &mut self.rates[idx];
                rate.is_active = is_active;
                rate.touch();
                true
            }
            None => false,
        }
    }

    /// Rates matching the filter, in collection order
    pub fn filter(&self, filter: &RateFilter) -> Vec<&TemplateRate> {
        self.rates.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Cost of sending `count` messages of a category to a country
    ///
    /// Inactive and unknown countries have no price (`Ok(None)`). A total
    /// too large for a `Decimal` is an invalid input.
    pub fn quote(
        &self,
        country_code: &str,
        category: TemplateCategory,
        count: u64,
    ) -> AppResult<Option<Decimal>> {
        let Some(price) = self
            .find_by_country(country_code)
            .and_then(|r| r.price_for(category))
        else {
            return Ok(None);
        };

        price.checked_mul(Decimal::from(count)).map(Some).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Quote out of range: {} messages at {}",
                count, price
            ))
        })
    }
}

/// First country code appearing more than once in a rate list
pub fn first_duplicate(rates: &[TemplateRate]) -> Option<&str> {
    rates.iter().enumerate().find_map(|(i, rate)| {
        rates[..i]
            .iter()
            .any(|prev| prev.country_code.eq_ignore_ascii_case(&rate.country_code))
            .then_some(rate.country_code.as_str())
    })
}
