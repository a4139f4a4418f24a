//! Company handlers
//!
//! HTTP handlers for company listing, wallet updates and credit quotes.

use crate::dto::{
    CompaniesResponse, CreditQuoteParams, CreditQuoteResponse, SuccessResponse,
    WalletPatchRequest,
};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use tracing::{debug, info, instrument, warn};
use validator::Validate;
use wa_pricing_core::pricing::CreditQuote;
use wa_pricing_core::traits::CompanyStore;
use wa_pricing_core::AppError;

/// List companies with their wallets and rates
///
/// GET /api/admin/companies
#[instrument(skip(state))]
pub async fn list_companies(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let companies = state.store.list_companies().await?;
    debug!(count = companies.len(), "Listing companies");
    Ok(HttpResponse::Ok().json(CompaniesResponse { companies }))
}

/// Update a company's wallet balance and currency
///
/// PATCH /api/admin/companies
#[instrument(skip(state, req), fields(company_id = %req.company_id))]
pub async fn update_wallet(
    state: web::Data<AppState>,
    req: web::Json<WalletPatchRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Wallet update validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    state
        .store
        .update_wallet(&req.company_id, req.wallet_balance, &req.currency)
        .await?;

    info!(
        balance = %req.wallet_balance,
        currency = %req.currency,
        "Wallet updated successfully"
    );
    Ok(HttpResponse::Ok().json(SuccessResponse::with_message(
        "Wallet updated successfully",
    )))
}

/// Price breakdown for buying wallet credits
///
/// GET /api/credits/quote?amount=
#[instrument(skip(state))]
pub async fn quote_credits(
    state: web::Data<AppState>,
    query: web::Query<CreditQuoteParams>,
) -> Result<HttpResponse, AppError> {
    let quote = CreditQuote::new(query.amount, state.pricing.gst_percent)?;
    Ok(HttpResponse::Ok().json(CreditQuoteResponse { quote }))
}

/// Configure company routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/admin/companies")
            .route(web::get().to(list_companies))
            .route(web::patch().to(update_wallet)),
    )
    .route("/credits/quote", web::get().to(quote_credits));
}
