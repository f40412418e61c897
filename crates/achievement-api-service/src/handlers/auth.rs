//! 认证相关的 HTTP 处理器
//!
//! 提供注册和登录 API

use axum::{extract::State, Json};
use tracing::{info, instrument};
use validator::Validate;

use achievement_service::service::dto::NewUser;

use crate::auth::{hash_password, verify_password};
use crate::dto::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// 用户注册
///
/// POST /api/auth/register
///
/// 邮箱重复返回 409；注册成功直接签发 Token
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>> {
    req.validate()?;

    // 预检查给出确定的 Conflict；并发注册由唯一约束兜底
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::EmailTaken(req.email));
    }

    let password_hash = hash_password(&req.password)?;

    let user = state
        .users
        .create(NewUser {
            firstname: req.firstname,
            lastname: req.lastname,
            surname: req.surname,
            email: req.email,
            password_hash,
            role: req.role,
            college: Some(req.college),
        })
        .await?;

    let (token, expires_at) = state.jwt_manager.generate_token(&user)?;

    info!(user_id = user.id, "用户注册成功");

    Ok(Json(ApiResponse::success(AuthResponse {
        user,
        token,
        expires_at,
    })))
}

/// 用户登录
///
/// POST /api/auth/login
///
/// 邮箱不存在与密码错误返回同一错误，不泄露哪一半失败
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>> {
    req.validate()?;

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let (token, expires_at) = state.jwt_manager.generate_token(&user)?;

    info!(user_id = user.id, "用户登录成功");

    Ok(Json(ApiResponse::success(AuthResponse {
        user,
        token,
        expires_at,
    })))
}
