//! HTTP request handlers

pub mod company;
pub mod template_rate;

pub use company::configure as configure_companies;
pub use template_rate::configure as configure_template_rates;
