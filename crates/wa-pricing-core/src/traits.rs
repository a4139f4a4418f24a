//! Persistence boundary
//!
//! The admin backend owns companies and their rate lists. These traits are
//! the only contract the pricing code relies on; the HTTP client and the
//! in-memory store both implement them.

use crate::error::AppError;
use crate::models::{Company, TemplateRate};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Storage of per-company template rate lists
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Load the full rate list of a company
    async fn load_rates(&self, company_id: &str) -> Result<Vec<TemplateRate>, AppError>;

    /// Replace the full rate list of a company
    ///
    /// No merge happens: the stored list becomes exactly `rates`.
    async fn save_rates(&self, company_id: &str, rates: &[TemplateRate]) -> Result<(), AppError>;
}

/// Storage of companies and their wallets
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// List all companies
    async fn list_companies(&self) -> Result<Vec<Company>, AppError>;

    /// Set the wallet balance and currency of a company
    async fn update_wallet(
        &self,
        company_id: &str,
        balance: Decimal,
        currency: &str,
    ) -> Result<(), AppError>;
}
