//! WA Pricing Core Library
//!
//! This crate provides the foundational types, pricing rules, and error
//! handling for the WhatsApp template pricing admin. It includes:
//!
//! - Domain models (TemplateRate, CategoryRate, Company, country catalog)
//! - Platform price derivation and credit purchase quotes
//! - Rate collection operations and filters (`RateBook`)
//! - The rate edit session and wallet staging
//! - Persistence traits implemented by the store and the HTTP client
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod pricing;
pub mod rate_book;
pub mod traits;
pub mod wallet;

pub use config::AppConfig;
pub use editor::{EditState, RateDraft, RateEditor};
pub use error::AppError;
pub use rate_book::{RateBook, RateFilter, StatusFilter, Upsert};
pub use wallet::WalletUpdate;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
