//! 成就记录 API 处理器
//!
//! 自助申领、审核流转、删除与统计查询

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use achievement_service::models::StudentAchievement;
use achievement_service::service::dto::{
    AchievementStats, AwardInput, AwardReview, StudentStats,
};

use crate::dto::{ApiResponse, AwardQuery, CreateAwardRequest, UpdateAwardRequest};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// 学生自助申领成就
///
/// POST /api/student-achievements
pub async fn create(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateAwardRequest>,
) -> Result<Json<ApiResponse<StudentAchievement>>> {
    req.validate()?;

    let actor = claims.actor()?;
    let record = state
        .awards
        .claim(
            &actor,
            req.achievement_id,
            AwardInput {
                notes: req.notes,
                evidence_url: req.evidence_url,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(record)))
}

/// 成就记录列表
///
/// GET /api/student-achievements?studentId=...&achievementId=...&status=...
///
/// 过滤条件互斥，按 studentId > achievementId > status 的优先级取第一个
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AwardQuery>,
) -> Result<Json<ApiResponse<Vec<StudentAchievement>>>> {
    let records = if let Some(student_id) = query.student_id {
        state.awards.list_by_student(student_id).await?
    } else if let Some(achievement_id) = query.achievement_id {
        state.awards.list_by_achievement(achievement_id).await?
    } else if let Some(status) = query.status {
        state.awards.list_by_status(status).await?
    } else {
        state.awards.list().await?
    };

    Ok(Json(ApiResponse::success(records)))
}

/// 学生维度统计
///
/// GET /api/student-achievements/stats/student/{studentId}
pub async fn get_student_stats(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<ApiResponse<StudentStats>>> {
    let stats = state.stats.student_stats(student_id).await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// 成就维度统计
///
/// GET /api/student-achievements/stats/achievement/{achievementId}
pub async fn get_achievement_stats(
    State(state): State<AppState>,
    Path(achievement_id): Path<i64>,
) -> Result<Json<ApiResponse<AchievementStats>>> {
    let stats = state.stats.achievement_stats(achievement_id).await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// 按数值 ID 查询成就记录
///
/// GET /api/student-achievements/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<StudentAchievement>>> {
    let record = state.awards.get(id).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// 按不透明外部标识查询成就记录
///
/// GET /api/student-achievements/uuid/{uuid}
pub async fn get_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<ApiResponse<StudentAchievement>>> {
    let record = state.awards.get_by_uuid(uuid).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// 审核/更新成就记录
///
/// PATCH /api/student-achievements/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateAwardRequest>,
) -> Result<Json<ApiResponse<StudentAchievement>>> {
    req.validate()?;

    let actor = claims.actor()?;
    let record = state
        .awards
        .review(
            &actor,
            id,
            AwardReview {
                status: req.status,
                notes: req.notes,
                evidence_url: req.evidence_url,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(record)))
}

/// 删除成就记录
///
/// DELETE /api/student-achievements/{id}
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    let actor = claims.actor()?;
    state.awards.remove(&actor, id).await?;

    Ok(Json(ApiResponse::success_empty()))
}
