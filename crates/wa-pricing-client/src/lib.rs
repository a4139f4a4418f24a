//! Admin backend client for WA Pricing
//!
//! REST client used by admin tooling to load and replace template rate
//! lists and to patch company wallets. It implements the same storage
//! traits as the in-memory store, so [`wa_pricing_core::RateEditor`] and
//! [`wa_pricing_core::WalletUpdate`] work against either.

pub mod client;

pub use client::{AdminClient, ClientError};
