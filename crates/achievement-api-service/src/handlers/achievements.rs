//! 成就目录 API 处理器
//!
//! 实现成就的 CRUD、分类查询与检索。读接口公开，写接口需要认证。

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use achievement_service::models::Achievement;
use achievement_service::service::dto::{AchievementUpdate, NewAchievement};

use crate::dto::{
    AchievementQuery, ApiResponse, CreateAchievementRequest, UpdateAchievementRequest,
};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// 成就列表
///
/// GET /api/achievements?category=...&search=...
///
/// category 优先于 search，均未提供时返回全部 active 条目（最新在前）
pub async fn list_achievements(
    State(state): State<AppState>,
    Query(query): Query<AchievementQuery>,
) -> Result<Json<ApiResponse<Vec<Achievement>>>> {
    let achievements = if let Some(category) = query.category {
        state.catalog.find_by_category(category).await?
    } else if let Some(search) = query.search {
        state.catalog.search(&search).await?
    } else {
        state.catalog.list_active().await?
    };

    Ok(Json(ApiResponse::success(achievements)))
}

/// 创建成就
///
/// POST /api/achievements
pub async fn create_achievement(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateAchievementRequest>,
) -> Result<Json<ApiResponse<Achievement>>> {
    req.validate()?;

    let actor = claims.actor()?;
    let achievement = state
        .catalog
        .create(
            &actor,
            NewAchievement {
                title: req.title,
                description: req.description,
                star_points: req.star_points,
                category: req.category,
                icon_url: req.icon_url,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(achievement)))
}

/// 按数值 ID 查询成就
///
/// GET /api/achievements/{id}
pub async fn get_achievement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Achievement>>> {
    let achievement = state.catalog.get(id).await?;
    Ok(Json(ApiResponse::success(achievement)))
}

/// 按不透明外部标识查询成就
///
/// GET /api/achievements/uuid/{uuid}
pub async fn get_achievement_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ApiResponse<Achievement>>> {
    let achievement = state.catalog.get_by_uuid(uuid).await?;
    Ok(Json(ApiResponse::success(achievement)))
}

/// 更新成就（创建者或管理员）
///
/// PATCH /api/achievements/{id}
pub async fn update_achievement(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAchievementRequest>,
) -> Result<Json<ApiResponse<Achievement>>> {
    req.validate()?;

    let actor = claims.actor()?;
    let achievement = state
        .catalog
        .update(
            &actor,
            id,
            AchievementUpdate {
                title: req.title,
                description: req.description,
                star_points: req.star_points,
                category: req.category,
                icon_url: req.icon_url,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(achievement)))
}

/// 删除成就（创建者或管理员）
///
/// DELETE /api/achievements/{id}
pub async fn delete_achievement(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    let actor = claims.actor()?;
    state.catalog.remove(&actor, id).await?;

    Ok(Json(ApiResponse::success_empty()))
}
