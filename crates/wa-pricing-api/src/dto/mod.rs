//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod company;
pub mod template_rate;

pub use common::*;
pub use company::*;
pub use template_rate::*;
