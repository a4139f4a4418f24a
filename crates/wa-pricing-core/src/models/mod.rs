//! Domain models for WA Pricing
//!
//! This module contains all the core domain models used throughout the application.

pub mod category;
pub mod company;
pub mod country;
pub mod template_rate;

pub use category::TemplateCategory;
pub use company::Company;
pub use country::Country;
pub use template_rate::{CategoryRate, CategoryRates, TemplateRate};
