use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::services::stock_store::StockStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatus {
    status: &'static str,
    stocks_loaded: usize,
}

pub async fn health_check(store: web::Data<StockStore>) -> Result<HttpResponse> {
    let response = ApiResponse::success(HealthStatus {
        status: "Service is healthy",
        stocks_loaded: store.len(),
    });
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
