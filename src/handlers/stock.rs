//! 股票接口处理器
//!
//! - GET  /stocks                  - 全部股票（数据集原顺序）
//! - POST /stocks/filter           - 按条件筛选
//! - GET  /stocks/top/gainers      - 涨幅榜前 10
//! - GET  /stocks/top/active       - 成交活跃榜前 10
//! - GET  /stocks/{symbol}         - 单只股票
//! - GET  /stocks/{symbol}/metrics - 派生指标与风险等级

use actix_web::{web, HttpResponse, Result};

use crate::error::AppError;
use crate::models::{ApiResponse, FilterCriteria};
use crate::services::stock_store::{StockStore, TOP_LIST_LIMIT};

pub async fn list_stocks(store: web::Data<StockStore>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.all())))
}

pub async fn get_stock(
    store: web::Data<StockStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let symbol = path.into_inner();
    let stock = store
        .find(&symbol)
        .ok_or_else(|| AppError::NotFound("Stock not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(stock)))
}

pub async fn get_stock_metrics(
    store: web::Data<StockStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let symbol = path.into_inner();
    let analysis = store
        .analyze(&symbol)
        .ok_or_else(|| AppError::NotFound("Stock not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(analysis)))
}

/// 筛选股票
///
/// POST /api/stocks/filter
///
/// 请求体为 FilterCriteria，字段类型不符或存在未知字段时返回 400
pub async fn filter_stocks(
    store: web::Data<StockStore>,
    criteria: web::Json<FilterCriteria>,
) -> Result<HttpResponse> {
    let criteria = criteria.into_inner();
    let matched = store.filter(&criteria);
    log::debug!("筛选完成: {} / {} 只股票符合条件", matched.len(), store.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(matched)))
}

pub async fn top_gainers(store: web::Data<StockStore>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.top_gainers(TOP_LIST_LIMIT))))
}

pub async fn most_active(store: web::Data<StockStore>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(store.most_active(TOP_LIST_LIMIT))))
}

fn filter_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("筛选条件无效: {}", err);
        AppError::Validation(format!("Invalid filter criteria: {}", err)).into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    // 固定路径需在 /{symbol} 之前注册
    cfg.service(
        web::scope("/stocks")
            .route("", web::get().to(list_stocks))
            .service(
                web::resource("/filter")
                    .app_data(filter_json_config())
                    .route(web::post().to(filter_stocks)),
            )
            .route("/top/gainers", web::get().to(top_gainers))
            .route("/top/active", web::get().to(most_active))
            .route("/{symbol}", web::get().to(get_stock))
            .route("/{symbol}/metrics", web::get().to(get_stock_metrics))
    );
}
