//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Achievement, AchievementCategory, AwardStatus, StudentAchievement, User, UserRole,
};

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<User>>;
    async fn get_by_uuid(&self, uuid: Uuid) -> Result<Option<User>>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>>;
    /// 插入用户，返回新记录 ID；邮箱唯一冲突翻译为 `EmailTaken`
    async fn insert(&self, user: &User) -> Result<i64>;
    /// 按白名单字段更新用户；邮箱唯一冲突翻译为 `EmailTaken`
    async fn update(&self, user: &User) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
    async fn count_by_role(&self) -> Result<Vec<(UserRole, i64)>>;
}

/// 成就目录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementRepositoryTrait: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<Achievement>>;
    async fn get_by_uuid(&self, uuid: Uuid) -> Result<Option<Achievement>>;
    async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<Achievement>>;
    async fn list_active(&self) -> Result<Vec<Achievement>>;
    async fn list_by_category(&self, category: AchievementCategory) -> Result<Vec<Achievement>>;
    /// 标题/描述大小写不敏感子串检索，仅返回 active 条目
    async fn search(&self, term: &str) -> Result<Vec<Achievement>>;
    async fn insert(&self, achievement: &Achievement) -> Result<i64>;
    async fn update(&self, achievement: &Achievement) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}

/// 学生成就记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentAchievementRepositoryTrait: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<StudentAchievement>>;
    async fn get_by_uuid(&self, uuid: Uuid) -> Result<Option<StudentAchievement>>;
    async fn get_by_pair(
        &self,
        student_id: i64,
        achievement_id: i64,
    ) -> Result<Option<StudentAchievement>>;
    async fn list(&self) -> Result<Vec<StudentAchievement>>;
    async fn list_by_student(&self, student_id: i64) -> Result<Vec<StudentAchievement>>;
    async fn list_by_achievement(&self, achievement_id: i64) -> Result<Vec<StudentAchievement>>;
    async fn list_by_status(&self, status: AwardStatus) -> Result<Vec<StudentAchievement>>;
    /// 插入记录，返回新记录 ID
    ///
    /// (student_id, achievement_id) 唯一冲突翻译为 `AlreadyAwarded`，
    /// 这是并发申领竞争下的原子性保证
    async fn insert(&self, record: &StudentAchievement) -> Result<i64>;
    /// 按白名单字段（status/notes/evidence_url/approved_by）更新记录
    async fn update_review(&self, record: &StudentAchievement) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
}
