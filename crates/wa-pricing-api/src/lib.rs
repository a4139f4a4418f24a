//! API layer for WA Pricing
//!
//! HTTP API handlers for template rate administration, company wallets and
//! credit purchase quotes.

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod dto;
pub mod handlers;
pub mod state;

use actix_web::{error, web, HttpResponse};
use serde_json::json;

pub use handlers::{configure_companies, configure_template_rates};
pub use state::AppState;

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "wa-pricing",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure all API routes under `/api`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .configure(configure_template_rates)
            .configure(configure_companies),
    );
}

fn bad_request(code: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "error": message,
        "code": code,
    }))
}

/// Query extractor config answering malformed queries with a JSON error body
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        error::InternalError::from_response(err, bad_request("invalid_query", message)).into()
    })
}

/// JSON extractor config answering malformed bodies with a JSON error body
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(2 * 1024 * 1024)
        .error_handler(|err, _req| {
            let message = err.to_string();
            error::InternalError::from_response(err, bad_request("invalid_body", message)).into()
        })
}
