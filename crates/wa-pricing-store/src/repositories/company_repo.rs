//! Company repository implementation
//!
//! Keeps companies in memory behind a read-write lock. Rate lists are
//! replaced wholesale on save; concurrent editors are not reconciled and the
//! last save wins.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use wa_pricing_core::{
    models::{country, Company, TemplateRate},
    rate_book::first_duplicate,
    traits::{CompanyStore, RateStore},
    AppError, AppResult,
};

/// In-memory implementation of `CompanyStore` and `RateStore`
#[derive(Debug, Default)]
pub struct MemoryCompanyRepository {
    companies: RwLock<Vec<Company>>,
}

impl MemoryCompanyRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given companies
    pub fn with_companies(companies: Vec<Company>) -> Self {
        Self {
            companies: RwLock::new(companies),
        }
    }

    /// Load companies from a JSON file containing an array of companies
    #[instrument]
    pub async fn from_seed_file(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            warn!("Failed to read seed file {}: {}", path.display(), e);
            AppError::Config(format!("Cannot read seed file {}: {}", path.display(), e))
        })?;

        let companies: Vec<Company> = serde_json::from_str(&raw)?;
        for company in &companies {
            if let Some(code) = first_duplicate(&company.template_rates) {
                return Err(AppError::DuplicateCountry(format!(
                    "{} (company {})",
                    code, company.id
                )));
            }
        }

        info!(count = companies.len(), "Loaded companies from seed file");
        Ok(Self::with_companies(companies))
    }

    /// Add a company, replacing one with the same id
    pub fn insert(&self, company: Company) {
        let mut companies = self.companies.write();
        match companies.iter_mut().find(|c| c.id == company.id) {
            Some(existing) => *existing = company,
            None => companies.push(company),
        }
    }

    /// Get a company by id
    pub fn get(&self, company_id: &str) -> AppResult<Company> {
        self.companies
            .read()
            .iter()
            .find(|c| c.id == company_id)
            .cloned()
            .ok_or_else(|| AppError::CompanyNotFound(company_id.to_string()))
    }

    /// Number of companies held
    pub fn len(&self) -> usize {
        self.companies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.read().is_empty()
    }

    fn validate_rates(rates: &[TemplateRate]) -> AppResult<()> {
        if let Some(code) = first_duplicate(rates) {
            return Err(AppError::DuplicateCountry(code.to_string()));
        }
        if let Some(unknown) = rates.iter().find(|r| country::lookup(&r.country_code).is_none()) {
            return Err(AppError::UnknownCountry(unknown.country_code.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl RateStore for MemoryCompanyRepository {
    #[instrument(skip(self))]
    async fn load_rates(&self, company_id: &str) -> AppResult<Vec<TemplateRate>> {
        let company = self.get(company_id)?;
        debug!(count = company.template_rates.len(), "Loaded template rates");
        Ok(company.template_rates)
    }

    #[instrument(skip(self, rates), fields(count = rates.len()))]
    async fn save_rates(&self, company_id: &str, rates: &[TemplateRate]) -> AppResult<()> {
        Self::validate_rates(rates).map_err(|e| {
            warn!("Rejected template rate list: {}", e);
            e
        })?;

        let mut companies = self.companies.write();
        let company = companies
            .iter_mut()
            .find(|c| c.id == company_id)
            .ok_or_else(|| AppError::CompanyNotFound(company_id.to_string()))?;

        company.template_rates = rates.to_vec();
        company.updated_at = Utc::now();

        info!("Template rates replaced");
        Ok(())
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyRepository {
    async fn list_companies(&self) -> AppResult<Vec<Company>> {
        Ok(self.companies.read().clone())
    }

    #[instrument(skip(self))]
    async fn update_wallet(
        &self,
        company_id: &str,
        balance: Decimal,
        currency: &str,
    ) -> AppResult<()> {
        let currency = currency.trim();
        if currency.is_empty() {
            return Err(AppError::MissingField("currency".to_string()));
        }

        let mut companies = self.companies.write();
        let company = companies
            .iter_mut()
            .find(|c| c.id == company_id)
            .ok_or_else(|| AppError::CompanyNotFound(company_id.to_string()))?;

        debug!(old_balance = %company.wallet_balance, old_currency = %company.currency, "Updating wallet");
        company.wallet_balance = balance;
        company.currency = currency.to_uppercase();
        company.updated_at = Utc::now();

        info!("Wallet updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(code: &str) -> TemplateRate {
        TemplateRate::for_country(country::lookup(code).unwrap(), dec!(20))
    }

    fn repo() -> MemoryCompanyRepository {
        MemoryCompanyRepository::with_companies(vec![
            Company::new("c1", "Acme"),
            Company::new("c2", "Globex"),
        ])
    }

    #[tokio::test]
    async fn test_save_replaces_whole_list() {
        let repo = repo();
        repo.save_rates("c1", &[rate("IN"), rate("US")]).await.unwrap();
        repo.save_rates("c1", &[rate("GB")]).await.unwrap();

        let rates = repo.load_rates("c1").await.unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].country_code, "GB");

        // Other companies untouched
        assert!(repo.load_rates("c2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_empty_list() {
        let repo = repo();
        repo.save_rates("c1", &[rate("IN")]).await.unwrap();
        repo.save_rates("c1", &[]).await.unwrap();
        assert!(repo.load_rates("c1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_duplicates_and_unknown_countries() {
        let repo = repo();

        let err = repo
            .save_rates("c1", &[rate("IN"), rate("IN")])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateCountry(_)));

        let mut bogus = rate("IN");
        bogus.country_code = "XX".to_string();
        let err = repo.save_rates("c1", &[bogus]).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownCountry(_)));

        assert!(repo.load_rates("c1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_company() {
        let repo = repo();
        assert!(matches!(
            repo.load_rates("nope").await,
            Err(AppError::CompanyNotFound(_))
        ));
        assert!(matches!(
            repo.update_wallet("nope", dec!(1), "INR").await,
            Err(AppError::CompanyNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_wallet() {
        let repo = repo();
        repo.update_wallet("c2", dec!(-5.50), "usd").await.unwrap();

        let company = repo.get("c2").unwrap();
        assert_eq!(company.wallet_balance, dec!(-5.50));
        assert_eq!(company.currency, "USD");
    }

    #[tokio::test]
    async fn test_seed_file() {
        let path = std::env::temp_dir().join(format!("wa-pricing-seed-{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"[{"id":"c9","name":"Initech","walletBalance":42,"currency":"INR","templateRates":[]}]"#,
        )
        .await
        .unwrap();

        let repo = MemoryCompanyRepository::from_seed_file(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get("c9").unwrap().wallet_balance, dec!(42));
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let repo = repo();
        repo.insert(Company {
            name: "Acme Corp".to_string(),
            ..Company::new("c1", "")
        });
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get("c1").unwrap().name, "Acme Corp");
    }
}
