//! API 错误类型定义
//!
//! 将核心层错误映射为 HTTP 状态码与统一响应体。
//! 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use achievement_service::CoreError;

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("禁止访问: {0}")]
    Forbidden(String),
    #[error("邮箱或密码错误")]
    InvalidCredentials,

    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 资源不存在
    #[error("用户不存在: {0}")]
    UserNotFound(String),
    #[error("成就不存在: {0}")]
    AchievementNotFound(String),
    #[error("成就记录不存在: {0}")]
    AwardNotFound(String),

    // 业务冲突
    #[error("学生已获得该成就")]
    AlreadyAwarded,
    #[error("邮箱已被注册: {0}")]
    EmailTaken(String),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,

            Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::UserNotFound(_) | Self::AchievementNotFound(_) | Self::AwardNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            Self::AlreadyAwarded | Self::EmailTaken(_) => StatusCode::CONFLICT,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::AchievementNotFound(_) => "ACHIEVEMENT_NOT_FOUND",
            Self::AwardNotFound(_) => "AWARD_NOT_FOUND",
            Self::AlreadyAwarded => "ALREADY_AWARDED",
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从核心服务错误转换
///
/// 映射决定了客户端能否正确区分「资源不存在」「权限不足」和「系统故障」
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UserNotFound(id) => Self::UserNotFound(id),
            CoreError::AchievementNotFound(id) => Self::AchievementNotFound(id),
            CoreError::AwardNotFound(id) => Self::AwardNotFound(id),
            CoreError::AlreadyAwarded { .. } => Self::AlreadyAwarded,
            CoreError::EmailTaken(email) => Self::EmailTaken(email),
            CoreError::Forbidden(msg) => Self::Forbidden(msg),
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Database(e) => Self::Database(e),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
