//! WA Pricing Storage Layer
//!
//! The admin backend keeps companies, their wallets and their template rate
//! lists in memory. It includes:
//!
//! - A thread-safe company repository implementing the persistence traits
//! - Loading an initial set of companies from a JSON seed file
//! - Full-replace semantics for rate lists (last writer wins)

pub mod repositories;

pub use repositories::*;

// Re-export commonly used types
pub use wa_pricing_core::{AppError, AppResult};
