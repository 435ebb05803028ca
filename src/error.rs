//! 错误类型
//!
//! 统一映射为 HTTP 状态码和 ApiResponse 错误响应

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// 请求参数非法（筛选条件、CAPM 输入、预设名称）
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// 上游文档源返回非成功状态
    #[error("{0}")]
    Upstream(String),
    /// DOCX 转 HTML 失败
    #[error("{0}")]
    Conversion(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Conversion(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(self.to_string()))
    }
}
