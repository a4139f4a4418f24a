//! HTTP client for the admin backend
//!
//! One request per operation. Nothing is retried; a failed call is reported
//! and the caller decides what to do with its working copy.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};
use wa_pricing_core::config::ClientConfig;
use wa_pricing_core::models::{Company, TemplateRate};
use wa_pricing_core::traits::{CompanyStore, RateStore};
use wa_pricing_core::AppError;

const RATES_PATH: &str = "/api/admin/template-rates";
const COMPANIES_PATH: &str = "/api/admin/companies";
const HEALTH_PATH: &str = "/api/health";

/// Errors raised while talking to the admin backend
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout: request took longer than {0}s")]
    Timeout(u64),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Connection(msg) => AppError::Network(msg),
            ClientError::Timeout(secs) => AppError::Network(format!("timed out after {}s", secs)),
            ClientError::Http { status, message } => AppError::Backend { status, message },
            // Unreadable replies carry no usable message
            ClientError::Parse(_) => AppError::Backend {
                status: 502,
                message: String::new(),
            },
            ClientError::Config(msg) => AppError::Config(msg),
        }
    }
}

/// Error body returned by the backend
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Acknowledgment returned by mutating endpoints
#[derive(Debug, Deserialize)]
struct Ack {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

impl Ack {
    /// A 2xx reply that reports failure is treated as a bad gateway
    fn into_result(self) -> Result<(), ClientError> {
        if self.success {
            return Ok(());
        }
        Err(ClientError::Http {
            status: 502,
            message: self.error.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RatesReply {
    #[serde(default)]
    rates: Vec<TemplateRate>,
}

#[derive(Debug, Deserialize)]
struct CompaniesReply {
    #[serde(default)]
    companies: Vec<Company>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRatesBody<'a> {
    company_id: &'a str,
    rates: &'a [TemplateRate],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WalletBody<'a> {
    company_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    wallet_balance: Decimal,
    currency: &'a str,
}

/// Extract the human readable message from an error reply
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_default()
}

/// Client for the admin REST API
#[derive(Debug, Clone)]
pub struct AdminClient {
    http_client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl AdminClient {
    /// Create a client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend root (e.g. "http://127.0.0.1:8080")
    /// * `timeout_secs` - Per-request timeout in seconds
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Config("base URL is empty".to_string()));
        }

        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.to_string(),
            timeout_secs,
        })
    }

    /// Create a client from the `client` configuration section
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the JSON reply
    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R, ClientError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.timeout_secs)
            } else {
                ClientError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = error_message(&body);
            error!(status = status.as_u16(), %message, "Admin backend returned an error");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        debug!(bytes = body.len(), "Admin backend response");
        serde_json::from_str(&body)
            .map_err(|e| ClientError::Parse(format!("Failed to parse JSON: {}", e)))
    }

    /// Send a mutating request and check its acknowledgment
    async fn send_ack(&self, request: RequestBuilder) -> Result<(), ClientError> {
        let ack: Ack = self.send(request).await?;
        ack.into_result()
    }

    /// Fetch a company's template rates
    #[instrument(skip(self))]
    pub async fn fetch_rates(&self, company_id: &str) -> Result<Vec<TemplateRate>, ClientError> {
        let request = self
            .http_client
            .get(self.url(RATES_PATH))
            .query(&[("companyId", company_id)]);
        let reply: RatesReply = self.send(request).await?;
        Ok(reply.rates)
    }

    /// Replace a company's template rates
    #[instrument(skip(self, rates), fields(count = rates.len()))]
    pub async fn put_rates(&self, company_id: &str, rates: &[TemplateRate]) -> Result<(), ClientError> {
        let request = self
            .http_client
            .put(self.url(RATES_PATH))
            .json(&SaveRatesBody { company_id, rates });
        self.send_ack(request).await
    }

    /// Fetch all companies
    #[instrument(skip(self))]
    pub async fn fetch_companies(&self) -> Result<Vec<Company>, ClientError> {
        let request = self.http_client.get(self.url(COMPANIES_PATH));
        let reply: CompaniesReply = self.send(request).await?;
        Ok(reply.companies)
    }

    /// Set a company's wallet balance and currency
    #[instrument(skip(self))]
    pub async fn patch_wallet(
        &self,
        company_id: &str,
        wallet_balance: Decimal,
        currency: &str,
    ) -> Result<(), ClientError> {
        let request = self.http_client.patch(self.url(COMPANIES_PATH)).json(&WalletBody {
            company_id,
            wallet_balance,
            currency,
        });
        self.send_ack(request).await
    }

    /// Check that the backend answers
    pub async fn health_check(&self) -> Result<bool, ClientError> {
        #[derive(Deserialize)]
        struct Health {
            status: String,
        }

        let health: Health = self.send(self.http_client.get(self.url(HEALTH_PATH))).await?;
        Ok(health.status == "healthy")
    }
}

#[async_trait]
impl RateStore for AdminClient {
    async fn load_rates(&self, company_id: &str) -> Result<Vec<TemplateRate>, AppError> {
        Ok(self.fetch_rates(company_id).await?)
    }

    async fn save_rates(&self, company_id: &str, rates: &[TemplateRate]) -> Result<(), AppError> {
        Ok(self.put_rates(company_id, rates).await?)
    }
}

#[async_trait]
impl CompanyStore for AdminClient {
    async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        Ok(self.fetch_companies().await?)
    }

    async fn update_wallet(
        &self,
        company_id: &str,
        balance: Decimal,
        currency: &str,
    ) -> Result<(), AppError> {
        Ok(self.patch_wallet(company_id, balance, currency).await?)
    }
}
