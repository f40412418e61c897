//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token 并将用户信息注入请求扩展。
//!
//! 读接口对外公开，写接口才需要认证，因此中间件对未携带 Token 的请求
//! 直接放行；需要认证的处理器通过 `AuthUser` 提取器把关，缺少 Claims
//! 时返回 401。携带了 Token 但验证失败的请求一律 401。

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// 认证中间件
///
/// 从 Authorization header 中提取 Bearer Token，验证后将 Claims 注入请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    match auth_header {
        Some(header) if header.starts_with("Bearer ") => {
            let token = &header[7..];
            match state.jwt_manager.verify_token(token) {
                Ok(claims) => {
                    // 将 Claims 注入请求扩展，供 AuthUser 提取器使用
                    request.extensions_mut().insert(claims);
                    next.run(request).await
                }
                Err(e) => e.into_response(),
            }
        }
        // 未携带 Token 直接放行，公开路由无需认证
        _ => next.run(request).await,
    }
}

/// 已认证用户提取器
///
/// 从请求扩展中取出认证中间件注入的 Claims；
/// 缺失（未登录访问需认证的接口）时返回 401
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::Unauthorized("缺少认证 Token".to_string()))
    }
}
