//! Wallet balance adjustment
//!
//! A staged edit of a company's wallet. Nothing reaches the backend until
//! [`WalletUpdate::commit`]. Changing the currency does not convert the
//! balance, so such a change has to be acknowledged explicitly first.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::AppError;
use crate::models::Company;
use crate::traits::CompanyStore;
use crate::AppResult;

/// Staged wallet edit for one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletUpdate {
    pub company_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub new_balance: Decimal,
    pub currency: String,
    #[serde(skip)]
    original_currency: String,
    #[serde(skip)]
    currency_acknowledged: bool,
}

impl WalletUpdate {
    /// Stage an edit; the proposed balance starts at the current one
    pub fn stage(company: &Company) -> Self {
        Self {
            company_id: company.id.clone(),
            current_balance: company.wallet_balance,
            new_balance: company.wallet_balance,
            currency: company.currency.clone(),
            original_currency: company.currency.clone(),
            currency_acknowledged: false,
        }
    }

    /// Propose a new balance; legality is decided by the backend
    pub fn set_balance(&mut self, balance: Decimal) {
        self.new_balance = balance;
    }

    /// Propose a new currency; resets any previous acknowledgment
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into().trim().to_uppercase();
        self.currency_acknowledged = false;
    }

    pub fn currency_changed(&self) -> bool {
        !self.currency.eq_ignore_ascii_case(&self.original_currency)
    }

    pub fn original_currency(&self) -> &str {
        &self.original_currency
    }

    /// Confirm that the balance is meant in the new currency as entered
    pub fn acknowledge_currency_change(&mut self) {
        self.currency_acknowledged = true;
    }

    /// Difference between the proposed and the current balance
    pub fn delta(&self) -> Decimal {
        self.new_balance - self.current_balance
    }

    /// Check the update can be sent
    pub fn validate(&self) -> AppResult<()> {
        if self.company_id.trim().is_empty() {
            return Err(AppError::MissingField("companyId".to_string()));
        }
        if self.currency.trim().is_empty() {
            return Err(AppError::MissingField("currency".to_string()));
        }
        if self.currency_changed() && !self.currency_acknowledged {
            return Err(AppError::CurrencyChangeUnconfirmed {
                from: self.original_currency.clone(),
                to: self.currency.clone(),
            });
        }
        Ok(())
    }

    /// Send the update to the backend (single attempt)
    #[instrument(skip(self, store), fields(company_id = %self.company_id))]
    pub async fn commit<S: CompanyStore + ?Sized>(&self, store: &S) -> AppResult<()> {
        if let Err(e) = self.validate() {
            warn!("Wallet update rejected before sending: {}", e);
            return Err(e);
        }

        store
            .update_wallet(&self.company_id, self.new_balance, &self.currency)
            .await?;

        info!(
            balance = %self.new_balance,
            currency = %self.currency,
            delta = %self.delta(),
            "Wallet updated"
        );
        Ok(())
    }
}
