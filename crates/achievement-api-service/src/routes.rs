//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射。
//! 注意 /student-achievements 下 stats/uuid 等具名路径必须在 {id} 之前注册。

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::{handlers, state::AppState};

/// 构建认证相关的路由（公开路由，无需认证）
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
}

/// 构建用户管理相关的路由
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::users::list_users))
        .route("/users", post(handlers::users::create_user))
        .route("/users/stats", get(handlers::users::get_users_stats))
        .route("/users/uuid/{uuid}", get(handlers::users::get_user_by_uuid))
        .route("/users/{id}", get(handlers::users::get_user))
        .route("/users/{id}", patch(handlers::users::update_user))
        .route("/users/{id}", delete(handlers::users::delete_user))
        .route(
            "/users/{id}/achievements",
            post(handlers::users::grant_achievement),
        )
}

/// 构建成就目录相关的路由
pub fn achievement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/achievements",
            get(handlers::achievements::list_achievements),
        )
        .route(
            "/achievements",
            post(handlers::achievements::create_achievement),
        )
        .route(
            "/achievements/uuid/{uuid}",
            get(handlers::achievements::get_achievement_by_uuid),
        )
        .route(
            "/achievements/{id}",
            get(handlers::achievements::get_achievement),
        )
        .route(
            "/achievements/{id}",
            patch(handlers::achievements::update_achievement),
        )
        .route(
            "/achievements/{id}",
            delete(handlers::achievements::delete_achievement),
        )
}

/// 构建成就记录相关的路由
pub fn student_achievement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/student-achievements",
            post(handlers::student_achievements::create),
        )
        .route(
            "/student-achievements",
            get(handlers::student_achievements::list),
        )
        .route(
            "/student-achievements/stats/student/{studentId}",
            get(handlers::student_achievements::get_student_stats),
        )
        .route(
            "/student-achievements/stats/achievement/{achievementId}",
            get(handlers::student_achievements::get_achievement_stats),
        )
        .route(
            "/student-achievements/uuid/{uuid}",
            get(handlers::student_achievements::get_by_uuid),
        )
        .route(
            "/student-achievements/{id}",
            get(handlers::student_achievements::get),
        )
        .route(
            "/student-achievements/{id}",
            patch(handlers::student_achievements::update),
        )
        .route(
            "/student-achievements/{id}",
            delete(handlers::student_achievements::remove),
        )
}

/// 聚合所有 API 路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(achievement_routes())
        .merge(student_achievement_routes())
}
