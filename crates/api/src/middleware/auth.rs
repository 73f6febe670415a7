//! # 鉴权中间件
//!
//! 提供基于 JWT 的无状态身份验证。
//! Token 校验是 `(secret, token) -> Claims` 的纯函数：只做对称签名与过期检查，
//! 不访问存储层，天然线程安全。

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::Claims;

/// Token 固定有效期：7 天
pub const JWT_EXPIRES_IN: i64 = 86400 * 7;

/// 从请求头中提取 `Authorization: Bearer <token>`。
///
/// 返回 `None` 表示完全没有 Authorization 头；
/// `Some(None)` 表示有头但取不出 Bearer Token（格式残缺）。
pub fn extract_bearer(headers: &HeaderMap) -> Option<Option<&str>> {
    let header_val = headers.get(AUTHORIZATION)?;
    let Ok(s) = header_val.to_str() else {
        return Some(None);
    };
    match s.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Some(Some(token)),
        _ => Some(None),
    }
}

/// 签发绑定到指定账户的 JWT。
///
/// Claims 携带 `sub` / `iat` / `exp`，有效期固定 7 天。
pub fn issue_token(secret: &str, subject: &str) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now + JWT_EXPIRES_IN,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|_| ApiError::Internal("Failed to generate token".into()))
}

/// 验证 JWT 返回强类型 Claims
pub fn verify_jwt(secret: &str, token: &str) -> Result<Claims, ApiError> {
    let mut validation = Validation::default();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|_| ApiError::Forbidden("Invalid or expired token".into()))?;

    Ok(token_data.claims)
}

/// 已通过鉴权的请求身份，由中间件注入 request extensions。
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// 账户唯一标识（来自 Token 的 `sub`）
    pub id: String,
}

/// 提取并验证 Authorization: Bearer <token>
///
/// 失败关闭：无头 401，Token 无效或过期 403，处理器不会被执行。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match extract_bearer(req.headers()) {
        None => {
            tracing::warn!("Missing Authorization header");
            return Err(ApiError::Unauthenticated("No token provided".into()));
        }
        Some(None) => {
            tracing::warn!("Authorization header present but token missing");
            return Err(ApiError::Unauthenticated("Token missing".into()));
        }
        Some(Some(token)) => token.to_string(),
    };

    let claims = match verify_jwt(&state.config.server.jwt_secret, &token) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("JWT verification failed");
            return Err(e);
        }
    };

    // 将身份信息注入 request extensions
    // 以便 downstream handlers 用 `CurrentUser` 提取
    req.extensions_mut().insert(AuthUser {
        id: claims.sub.clone(),
    });
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

// 在提取器中获取当前用户的快捷方式
pub struct CurrentUser(pub AuthUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated("Missing user context".into()))?;
        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let token = issue_token(SECRET, "user-42").expect("issue token");
        let claims = verify_jwt(SECRET, &token).expect("verify token");
        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.exp - claims.iat, JWT_EXPIRES_IN);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue_token(SECRET, "user-42").expect("issue token");
        let result = verify_jwt("another-secret", &token);
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // 默认 Validation 有 60 秒 leeway，过期时间要落在 leeway 之外
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user-42".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_ref()),
        )
        .expect("encode expired token");

        let result = verify_jwt(SECRET, &token);
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_extract_bearer_variants() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert_eq!(extract_bearer(&headers), Some(None));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer(&headers), Some(None));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer(&headers), Some(Some("abc.def.ghi")));
    }
}
