//! 成就服务错误类型
//!
//! 定义服务层的业务错误和系统错误

use thiserror::Error;

/// 成就服务错误类型
#[derive(Debug, Error)]
pub enum CoreError {
    // === 资源不存在 ===
    #[error("成就不存在: {0}")]
    AchievementNotFound(String),

    #[error("用户不存在: {0}")]
    UserNotFound(String),

    #[error("成就记录不存在: {0}")]
    AwardNotFound(String),

    // === 冲突 ===
    #[error("学生已获得该成就: student_id={student_id}, achievement_id={achievement_id}")]
    AlreadyAwarded {
        student_id: i64,
        achievement_id: i64,
    },

    #[error("邮箱已被注册: {0}")]
    EmailTaken(String),

    // === 权限 ===
    #[error("权限不足: {0}")]
    Forbidden(String),

    // === 参数 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 成就服务 Result 类型别名
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AchievementNotFound(_) => "ACHIEVEMENT_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::AwardNotFound(_) => "AWARD_NOT_FOUND",
            Self::AlreadyAwarded { .. } => "ALREADY_AWARDED",
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
