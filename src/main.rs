//! WA Pricing admin backend server
//!
//! Serves per-company WhatsApp template rates, wallet updates and credit
//! quotes over a JSON API.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use anyhow::Context;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wa_pricing_api::{configure_routes, json_config, query_config, AppState};
use wa_pricing_core::AppConfig;
use wa_pricing_store::MemoryCompanyRepository;

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "wa_pricing={},wa_pricing_api={},wa_pricing_store={},wa_pricing_core={},actix_web=info",
            log_level, log_level, log_level, log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(fmt::layer().json()).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }
}

async fn open_store(seed_path: Option<&str>) -> anyhow::Result<MemoryCompanyRepository> {
    match seed_path {
        Some(path) => MemoryCompanyRepository::from_seed_file(Path::new(path))
            .await
            .with_context(|| format!("loading companies from {}", path)),
        None => {
            warn!("No seed file configured, starting with an empty company store");
            Ok(MemoryCompanyRepository::new())
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting WA Pricing backend v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("loading configuration")?;

    let store = Arc::new(open_store(config.store.seed_path.as_deref()).await?);
    info!(companies = store.len(), "Company store ready");

    let state = AppState::new(store, config.pricing.clone());
    let cors_origins = config.server.cors_origins.clone();
    let bind_addr = config.server_addr();

    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, config.server.workers
    );

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin.to_str().is_ok_and(|origin_str| {
                    cors_origins_inner
                        .split(',')
                        .any(|o| o.trim() == origin_str)
                })
            })
            .allowed_methods(vec!["GET", "PUT", "PATCH", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .app_data(query_config())
            // Middleware
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
    })
    .workers(config.server.workers)
    .bind(&bind_addr)
    .with_context(|| format!("binding {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}
