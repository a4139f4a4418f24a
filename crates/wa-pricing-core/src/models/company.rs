//! Company model
//!
//! A tenant of the platform. Companies are created and destroyed by the
//! backend; pricing code only reads them, replaces their rate list and
//! patches their wallet.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::template_rate::TemplateRate;

/// Company entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique identifier
    #[serde(alias = "_id")]
    pub id: String,

    /// Company name
    pub name: String,

    /// Prepaid wallet balance used for template sends
    #[serde(default, with = "rust_decimal::serde::float")]
    pub wallet_balance: Decimal,

    /// Currency code (ISO 4217) of the wallet
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Template pricing overrides for this company
    #[serde(default)]
    pub template_rates: Vec<TemplateRate>,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Company {
    /// Create an empty company with a zero wallet
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Default for Company {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            wallet_balance: Decimal::ZERO,
            currency: default_currency(),
            template_rates: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_company_from_backend_json() {
        let company: Company = serde_json::from_value(json!({
            "_id": "64f0c1",
            "name": "Acme",
            "walletBalance": 1500.5,
            "currency": "INR"
        }))
        .unwrap();

        assert_eq!(company.id, "64f0c1");
        assert_eq!(company.wallet_balance, dec!(1500.5));
        assert!(company.template_rates.is_empty());
    }

    #[test]
    fn test_company_defaults() {
        let company = Company::new("c1", "Acme");
        assert_eq!(company.wallet_balance, Decimal::ZERO);
        assert_eq!(company.currency, "INR");
    }
}
