//! API响应模块
//! 定义统一的响应结构以及错误到HTTP状态码的映射

use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::Error;

/// 通用API响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 操作是否成功
    pub success: bool,
    /// 响应数据
    pub data: Option<T>,
    /// 错误信息
    pub error: Option<String>,
    /// 响应代码
    pub code: Option<i32>,
    /// 响应消息
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: Some(200),
            message: None,
        }
    }

    /// 创建错误响应
    pub fn error(msg: impl Into<String>, code: i32) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
            code: Some(code),
            message: None,
        }
    }
}

impl<T> std::fmt::Display for ApiResponse<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.success {
            write!(f, "Success")
        } else {
            write!(f, "Error: {}", self.error.as_deref().unwrap_or("Unknown error"))
        }
    }
}

/// 错误对应的HTTP状态码
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 将服务错误转换为HTTP响应
pub fn error_response(err: &Error) -> HttpResponse {
    let status = status_for(err);
    HttpResponse::build(status).json(ApiResponse::<()>::error(err.to_string(), i32::from(status.as_u16())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&Error::validation("x")), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(&Error::model_unavailable("x")), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&Error::inference("x")), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(&Error::artifact("x")), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(&Error::internal("x")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_response() {
        let response = error_response(&Error::internal("reload task failed: canceled"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_envelope() {
        let response = ApiResponse::<()>::error("Model not loaded", 503);
        assert!(!response.success);
        assert_eq!(response.code, Some(503));
        assert_eq!(response.to_string(), "Error: Model not loaded");
    }
}
