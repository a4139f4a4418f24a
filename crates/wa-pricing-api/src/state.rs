//! Shared application state

use std::sync::Arc;
use wa_pricing_core::config::PricingConfig;
use wa_pricing_store::MemoryCompanyRepository;

/// State shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Company, wallet and rate storage
    pub store: Arc<MemoryCompanyRepository>,
    /// Pricing settings (GST, default margin)
    pub pricing: PricingConfig,
}

impl AppState {
    /// Create state around a repository
    pub fn new(store: Arc<MemoryCompanyRepository>, pricing: PricingConfig) -> Self {
        Self { store, pricing }
    }
}
