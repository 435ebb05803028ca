//! 课程文档接口
//!
//! - GET /api/docs/{slug}     - 代理 DOCX 原文件（允许跨域，供外部查看器加载）
//! - GET /courses/doc/{id}    - 代理 DOCX 原文件
//! - GET /courses/html/{id}   - 服务端转换为 HTML

use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::error::AppError;
use crate::services::courses::{CourseDocService, DocumentSet};

const CACHE_CONTROL_VALUE: &str = "public, max-age=3600";

pub async fn get_api_document(
    service: web::Data<CourseDocService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let document = service.fetch(DocumentSet::Api, &path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(document.content_type)
        .insert_header((header::CACHE_CONTROL, CACHE_CONTROL_VALUE))
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .body(document.bytes))
}

pub async fn get_course_document(
    service: web::Data<CourseDocService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let document = service.fetch(DocumentSet::Course, &path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(document.content_type)
        .insert_header((header::CACHE_CONTROL, CACHE_CONTROL_VALUE))
        .body(document.bytes))
}

pub async fn get_course_html(
    req: HttpRequest,
    service: web::Data<CourseDocService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!(
        "收到课程 HTML 请求 /courses/html/{} 来自 {}",
        id,
        req.peer_addr().map(|a| a.to_string()).unwrap_or_else(|| "unknown".to_string())
    );

    let html = service.render_html(&id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, CACHE_CONTROL_VALUE))
        .body(html))
}

/// 挂载在 /api 下
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/docs/{slug}", web::get().to(get_api_document));
}

/// 挂载在 /courses 下
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/doc/{id}", web::get().to(get_course_document))
        .route("/html/{id}", web::get().to(get_course_html));
}
