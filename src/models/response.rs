//! 接口响应外壳
//!
//! 除课程文档透传外，所有 JSON 接口都包在 `ApiResponse` 里返回

use chrono::{DateTime, Utc};
use chrono_tz::{Asia::Karachi, Tz};
use serde::{Deserialize, Serialize};

// PSX 交易时区（UTC+5）
fn market_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&Karachi)
}

/// 响应外壳
///
/// 成功时 `data` 携带股票、筛选结果或 CAPM 结果；
/// 失败时 `data` 为 null，`message` 为面向用户的错误描述，
/// 如 "Stock not found"。`timestamp` 为 RFC 3339 格式的交易所本地时间。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "Success".to_string(),
            timestamp: market_now().to_rfc3339(),
        }
    }

    /// 错误响应，由 `AppError` 的 `ResponseError` 实现统一生成
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message,
            timestamp: market_now().to_rfc3339(),
        }
    }
}
