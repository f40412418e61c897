//! 用户管理 API 处理器
//!
//! 用户的查询、更新、删除，角色分布统计，以及代学生授予成就的入口

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use achievement_service::models::{StudentAchievement, User};
use achievement_service::policy;
use achievement_service::service::dto::{AwardInput, NewUser, UserOverview, UserUpdate};

use crate::auth::hash_password;
use crate::dto::{ApiResponse, CreateAwardRequest, CreateUserRequest, UpdateUserRequest, UserQuery};
use crate::error::{ApiError, Result};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// 用户列表，支持按角色过滤
///
/// GET /api/users?role=student
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<Vec<User>>>> {
    let users = match query.role {
        Some(role) => state.users.list_by_role(role).await?,
        None => state.users.list().await?,
    };

    Ok(Json(ApiResponse::success(users)))
}

/// 用户角色分布统计
///
/// GET /api/users/stats
pub async fn get_users_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserOverview>>> {
    let overview = state.users.overview().await?;
    Ok(Json(ApiResponse::success(overview)))
}

/// 按数值 ID 查询用户
///
/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>> {
    let user = state.users.get(id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// 按不透明外部标识查询用户
///
/// GET /api/users/uuid/{uuid}
pub async fn get_user_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>> {
    let user = state.users.get_by_uuid(uuid).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// 管理端创建用户（仅管理员）
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>> {
    req.validate()?;

    let actor = claims.actor()?;
    if !policy::can_create_user(&actor) {
        return Err(ApiError::Forbidden(
            "只有管理员可以通过 API 创建用户".to_string(),
        ));
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

    Ok(Json(ApiResponse::success(user)))
}

/// 更新用户资料（本人或管理员）
///
/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>> {
    req.validate()?;

    let actor = claims.actor()?;
    let user = state
        .users
        .update(
            &actor,
            id,
            UserUpdate {
                firstname: req.firstname,
                lastname: req.lastname,
                surname: req.surname,
                email: req.email,
                role: req.role,
                college: req.college,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(user)))
}

/// 删除用户（本人或管理员）
///
/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    let actor = claims.actor()?;
    state.users.remove(&actor, id).await?;

    Ok(Json(ApiResponse::success_empty()))
}

/// 代学生授予成就（辅导员/管理员，权限由核心层闸门判定）
///
/// POST /api/users/{id}/achievements
pub async fn grant_achievement(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateAwardRequest>,
) -> Result<Json<ApiResponse<StudentAchievement>>> {
    req.validate()?;

    let actor = claims.actor()?;
    let record = state
        .awards
        .grant(
            &actor,
            id,
            req.achievement_id,
            AwardInput {
                notes: req.notes,
                evidence_url: req.evidence_url,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(record)))
}
