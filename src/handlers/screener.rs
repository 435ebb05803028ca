//! CAPM 与风险预设接口
//!
//! - POST /capm/calculate  - 计算 CAPM 预期收益率
//! - GET  /capm/defaults   - 默认 CAPM 参数
//! - GET  /presets/{level} - 风险预设对应的筛选条件

use actix_web::{web, HttpResponse, Result};

use crate::error::AppError;
use crate::models::{ApiResponse, CapmInput};
use crate::services::screener::{evaluate_capm, resolve_preset};

pub async fn calculate_capm(input: web::Json<CapmInput>) -> Result<HttpResponse> {
    let result = evaluate_capm(&input);
    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

pub async fn capm_defaults() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(CapmInput::default())))
}

pub async fn get_preset(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let preset = resolve_preset(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(preset)))
}

fn capm_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("CAPM 参数无效: {}", err);
        AppError::Validation(format!("Invalid CAPM input: {}", err)).into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/capm/calculate")
            .app_data(capm_json_config())
            .route(web::post().to(calculate_capm)),
    )
    .route("/capm/defaults", web::get().to(capm_defaults))
    .route("/presets/{level}", web::get().to(get_preset));
}
