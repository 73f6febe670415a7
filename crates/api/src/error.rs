//! # API 统一错误处理
//!
//! 将鉴权与存储层的错误统一映射到 HTTP 状态码与 JSON 响应体。
//! 任何变体都在请求边界被捕获，不允许错误击穿进程。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::types::MessageResponse;
use kabu_core::store::error::StoreError;

/// API 层统一错误枚举
#[derive(Error, Debug)]
pub enum ApiError {
    /// 注册时用户名已存在 (400)
    #[error("账户已存在: {0}")]
    DuplicateAccount(String),

    /// 登录时账户不存在 (400)
    #[error("账户不存在: {0}")]
    AccountNotFound(String),

    /// 密码校验失败 (400)
    #[error("凭据无效: {0}")]
    InvalidCredential(String),

    /// 请求参数错误 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 缺失或无法解析的 Token (401)
    #[error("未认证: {0}")]
    Unauthenticated(String),

    /// Token 存在但签名无效或已过期 (403)
    #[error("禁止访问: {0}")]
    Forbidden(String),

    /// 下层存储或运行时错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::DuplicateAccount(msg)
            | ApiError::AccountNotFound(msg)
            | ApiError::InvalidCredential(msg)
            | ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(MessageResponse::from_msg(message));
        (status, body).into_response()
    }
}

/// 从 `StoreError` 转换
///
/// 唯一约束冲突是并发注册竞态的兜底路径，归为重复账户；
/// 其余存储错误一律折叠为内部错误。
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Conflict(_) => ApiError::DuplicateAccount("User already exists".into()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_conflict_maps_to_duplicate_account() {
        let err: ApiError = StoreError::Conflict("UNIQUE constraint failed".into()).into();
        assert!(matches!(err, ApiError::DuplicateAccount(_)));
    }

    #[test]
    fn test_store_database_error_maps_to_internal() {
        let err: ApiError = StoreError::Database("disk I/O error".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
