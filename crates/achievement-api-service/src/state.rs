//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use achievement_service::repository::{
    AchievementRepository, StudentAchievementRepository, UserRepository,
};
use achievement_service::service::{AwardService, CatalogService, StatsService, UserService};

use crate::auth::{JwtConfig, JwtManager};

/// 具体仓储类型上的服务别名
pub type Users = UserService<UserRepository>;
pub type Catalog = CatalogService<AchievementRepository>;
pub type Awards =
    AwardService<AchievementRepository, UserRepository, StudentAchievementRepository>;
pub type Stats = StatsService<AchievementRepository, StudentAchievementRepository>;

/// Axum 应用共享状态
///
/// 服务通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<Users>,
    pub catalog: Arc<Catalog>,
    pub awards: Arc<Awards>,
    pub stats: Arc<Stats>,
    pub jwt_manager: JwtManager,
}

impl AppState {
    /// 基于连接池组装仓储与服务
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let achievement_repo = Arc::new(AchievementRepository::new(pool.clone()));
        let record_repo = Arc::new(StudentAchievementRepository::new(pool));

        Self {
            users: Arc::new(UserService::new(user_repo.clone())),
            catalog: Arc::new(CatalogService::new(achievement_repo.clone())),
            awards: Arc::new(AwardService::new(
                achievement_repo.clone(),
                user_repo,
                record_repo.clone(),
            )),
            stats: Arc::new(StatsService::new(achievement_repo, record_repo)),
            jwt_manager: JwtManager::new(jwt_config),
        }
    }
}
