//! Template Rate handlers
//!
//! HTTP handlers for per-company template rate administration.

use crate::dto::{
    non_blank, CountriesResponse, CountryParams, MessageQuoteParams, MessageQuoteResponse,
    RateListParams, RatesResponse, SaveRatesRequest, SuccessResponse,
};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use tracing::{debug, info, instrument, warn};
use validator::Validate;
use wa_pricing_core::models::{country, TemplateRate};
use wa_pricing_core::traits::RateStore;
use wa_pricing_core::{AppError, RateBook};

/// List a company's template rates
///
/// GET /api/admin/template-rates?companyId=
#[instrument(skip(state))]
pub async fn list_template_rates(
    state: web::Data<AppState>,
    query: web::Query<RateListParams>,
) -> Result<HttpResponse, AppError> {
    let company_id = non_blank(query.company_id.as_deref())
        .ok_or_else(|| AppError::MissingField("companyId".to_string()))?;

    let book = RateBook::from_rates(state.store.load_rates(company_id).await?);

    let rates: Vec<TemplateRate> = if query.filter.is_empty() {
        book.into_rates()
    } else {
        book.filter(&query.filter).into_iter().cloned().collect()
    };

    debug!(company_id, count = rates.len(), "Listing template rates");
    Ok(HttpResponse::Ok().json(RatesResponse { rates }))
}

/// Replace a company's template rates
///
/// PUT /api/admin/template-rates
#[instrument(skip(state, req), fields(company_id = %req.company_id, count = req.rates.len()))]
pub async fn save_template_rates(
    state: web::Data<AppState>,
    req: web::Json<SaveRatesRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Template rate save validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    state.store.save_rates(&req.company_id, &req.rates).await?;

    info!("Template rates updated successfully");
    Ok(HttpResponse::Ok().json(SuccessResponse::with_message(
        "Template rates updated successfully",
    )))
}

/// Quote the cost of sending messages with a company's rates
///
/// GET /api/admin/template-rates/quote
#[instrument(skip(state))]
pub async fn quote_messages(
    state: web::Data<AppState>,
    query: web::Query<MessageQuoteParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Message quote validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let book = RateBook::from_rates(state.store.load_rates(&query.company_id).await?);
    let total = book.quote(&query.country_code, query.category, query.count)?;

    let (Some(rate), Some(total)) = (book.find_by_country(&query.country_code), total) else {
        return Err(AppError::NotFound(format!(
            "No active rate for {} in {}",
            query.category, query.country_code
        )));
    };

    Ok(HttpResponse::Ok().json(MessageQuoteResponse {
        country_code: rate.country_code.clone(),
        category: query.category,
        count: query.count,
        currency: rate.currency.clone(),
        unit_price: rate.rates.get(query.category).platform_price(),
        total,
    }))
}

/// Countries selectable for a rate
///
/// GET /api/admin/countries?companyId=&editing=
#[instrument(skip(state))]
pub async fn list_countries(
    state: web::Data<AppState>,
    query: web::Query<CountryParams>,
) -> Result<HttpResponse, AppError> {
    let existing = match non_blank(query.company_id.as_deref()) {
        Some(company_id) => state.store.load_rates(company_id).await?,
        None => Vec::new(),
    };

    let countries = country::available_for(&existing, non_blank(query.editing.as_deref()))
        .into_iter()
        .copied()
        .collect();

    Ok(HttpResponse::Ok().json(CountriesResponse { countries }))
}

/// Configure template rate routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/template-rates")
            .route("", web::get().to(list_template_rates))
            .route("", web::put().to(save_template_rates))
            .route("/quote", web::get().to(quote_messages)),
    )
    .route("/admin/countries", web::get().to(list_countries));
}
