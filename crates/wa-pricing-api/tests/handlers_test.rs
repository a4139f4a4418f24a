//! Integration tests for the admin API handlers
//!
//! Each test builds the full route tree over an in-memory store.

use actix_web::{http::StatusCode, test, web, App};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;
use wa_pricing_api::dto::{CompaniesResponse, RatesResponse};
use wa_pricing_api::{configure_routes, json_config, query_config, AppState};
use wa_pricing_core::config::PricingConfig;
use wa_pricing_core::models::Company;
use wa_pricing_store::MemoryCompanyRepository;

fn state() -> AppState {
    let store = MemoryCompanyRepository::with_companies(vec![
        Company {
            wallet_balance: dec!(500),
            ..Company::new("c1", "Acme")
        },
        Company::new("c2", "Globex"),
    ]);
    AppState::new(Arc::new(store), PricingConfig::default())
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(json_config())
                .app_data(query_config())
                .configure(configure_routes),
        )
        .await
    };
}

fn rates_body() -> Value {
    json!({
        "companyId": "c1",
        "rates": [
            {
                "countryCode": "IN",
                "countryName": "India",
                "currency": "INR",
                "rates": {
                    "marketing": { "interaktPrice": 0.5, "marginPercentage": 20, "platformPrice": 7 },
                    "authentication": { "interaktPrice": 0.1, "marginPercentage": 20 },
                    "utility": { "interaktPrice": 0.1, "marginPercentage": 20 }
                },
                "isActive": true
            },
            {
                "countryCode": "US",
                "countryName": "United States",
                "currency": "USD",
                "rates": {
                    "marketing": { "interaktPrice": 0.025, "marginPercentage": 10 },
                    "authentication": { "interaktPrice": 0.0135, "marginPercentage": 10 },
                    "utility": { "interaktPrice": 0.004, "marginPercentage": 10 }
                },
                "isActive": false
            }
        ]
    })
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = app!(state());
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn test_save_then_list_rates() {
    let app = app!(state());

    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .set_json(rates_body())
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["success"], json!(true));

    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates?companyId=c1")
        .to_request();
    let resp: RatesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.rates.len(), 2);
    assert_eq!(resp.rates[0].country_code, "IN");
    // Stored platform price is always derived
    assert_eq!(resp.rates[0].rates.marketing.platform_price(), dec!(0.6));
}

#[actix_web::test]
async fn test_list_rates_with_status_filter() {
    let app = app!(state());

    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .set_json(rates_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates?companyId=c1&status=active")
        .to_request();
    let resp: RatesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.rates.len(), 1);
    assert_eq!(resp.rates[0].country_code, "IN");
}

#[actix_web::test]
async fn test_list_rates_requires_company() {
    let app = app!(state());
    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("missing_field"));
    assert!(body["error"].as_str().unwrap().contains("companyId"));
}

#[actix_web::test]
async fn test_unknown_company_is_404() {
    let app = app!(state());
    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates?companyId=nope")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_save_rejects_duplicate_countries() {
    let app = app!(state());
    let mut body = rates_body();
    body["rates"][1]["countryCode"] = json!("IN");

    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!("duplicate_country"));
}

#[actix_web::test]
async fn test_save_empty_list_reloads_empty() {
    let app = app!(state());

    for body in [rates_body(), json!({ "companyId": "c1", "rates": [] })] {
        let req = test::TestRequest::put()
            .uri("/api/admin/template-rates")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates?companyId=c1")
        .to_request();
    let resp: RatesResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.rates.is_empty());
}

#[actix_web::test]
async fn test_malformed_body_returns_json_error() {
    let app = app!(state());
    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("invalid_body"));
}

#[actix_web::test]
async fn test_message_quote() {
    let app = app!(state());
    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .set_json(rates_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates/quote?companyId=c1&countryCode=IN&category=marketing&count=100")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["unitPrice"], json!(0.6));
    assert_eq!(body["total"], json!(60.0));
    assert_eq!(body["currency"], json!("INR"));

    // Inactive rates are not priced
    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates/quote?companyId=c1&countryCode=US&category=utility")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_countries_exclude_existing_except_edited() {
    let app = app!(state());
    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .set_json(rates_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/countries?companyId=c1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let codes: Vec<&str> = body["countries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert!(!codes.contains(&"IN"));
    assert!(!codes.contains(&"US"));

    let req = test::TestRequest::get()
        .uri("/api/admin/countries?companyId=c1&editing=IN")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let codes: Vec<&str> = body["countries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"IN"));
    assert!(!codes.contains(&"US"));
}

#[actix_web::test]
async fn test_list_companies_and_patch_wallet() {
    let app = app!(state());

    let req = test::TestRequest::patch()
        .uri("/api/admin/companies")
        .set_json(json!({ "companyId": "c2", "walletBalance": 1200.5, "currency": "USD" }))
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["success"], json!(true));

    let req = test::TestRequest::get()
        .uri("/api/admin/companies")
        .to_request();
    let resp: CompaniesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.companies.len(), 2);
    let globex = resp.companies.iter().find(|c| c.id == "c2").unwrap();
    assert_eq!(globex.wallet_balance, dec!(1200.5));
    assert_eq!(globex.currency, "USD");
}

#[actix_web::test]
async fn test_patch_wallet_unknown_company() {
    let app = app!(state());
    let req = test::TestRequest::patch()
        .uri("/api/admin/companies")
        .set_json(json!({ "companyId": "zzz", "walletBalance": 1, "currency": "INR" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_credit_quote() {
    let app = app!(state());
    let req = test::TestRequest::get()
        .uri("/api/credits/quote?amount=1000")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["quote"]["gstAmount"], json!(180.0));
    assert_eq!(body["quote"]["total"], json!(1180.0));

    let req = test::TestRequest::get()
        .uri("/api/credits/quote?amount=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_save_rejects_out_of_range_prices() {
    let app = app!(state());
    let mut body = rates_body();
    body["rates"][0]["rates"]["marketing"] =
        json!({ "interaktPrice": 1e20, "marginPercentage": 1e20 });

    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("invalid_body"));

    // Nothing was stored
    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates?companyId=c1")
        .to_request();
    let resp: RatesResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.rates.is_empty());
}

#[actix_web::test]
async fn test_quotes_reject_out_of_range_totals() {
    let app = app!(state());

    let req = test::TestRequest::get()
        .uri("/api/credits/quote?amount=79228162514264337593543950335")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("invalid_input"));

    let mut rates = rates_body();
    rates["rates"][0]["rates"]["marketing"] =
        json!({ "interaktPrice": 100000000000.0, "marginPercentage": 0 });
    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .set_json(rates)
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/admin/template-rates/quote?companyId=c1&countryCode=IN&category=marketing&count={}",
            u64::MAX
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], json!("invalid_input"));
}

#[actix_web::test]
async fn test_blank_status_filter_lists_everything() {
    let app = app!(state());
    let req = test::TestRequest::put()
        .uri("/api/admin/template-rates")
        .set_json(rates_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates?companyId=c1&status=&currency=")
        .to_request();
    let resp: RatesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.rates.len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/admin/template-rates?companyId=c1&status=paused")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
