//! 数据库仓储层
//!
//! 提供所有实体的数据访问接口，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 使用 SQLx 进行类型安全的数据库操作
//! - 所有按键查询返回 `Option`，缺失由服务层在调用点翻译为 NotFound
//! - 唯一约束冲突在仓储层翻译为业务 Conflict 错误
//! - 定义 trait 接口以支持 mock 测试

mod achievement_repo;
mod student_achievement_repo;
mod traits;
mod user_repo;

pub use achievement_repo::AchievementRepository;
pub use student_achievement_repo::StudentAchievementRepository;
pub use traits::*;
pub use user_repo::UserRepository;

/// 判断数据库错误是否为指定唯一约束的冲突
///
/// PostgreSQL 在唯一冲突时会带上约束名，据此区分是哪条不变量被触发
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.constraint() == Some(constraint),
        _ => false,
    }
}
