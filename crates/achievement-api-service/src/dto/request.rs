//! 请求 DTO 定义
//!
//! 所有 REST API 的请求参数和请求体结构。
//! 格式校验（长度/邮箱/URL）在这里声明；业务不变量由核心层复查。

use serde::Deserialize;
use validator::Validate;

use achievement_service::models::{AchievementCategory, AwardStatus, UserRole};

/// 注册请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 6, message = "密码长度不能少于6个字符"))]
    pub password: String,
    #[validate(length(min = 2, max = 255, message = "名字长度必须在2-255个字符之间"))]
    pub firstname: String,
    #[validate(length(min = 2, max = 255, message = "姓氏长度必须在2-255个字符之间"))]
    pub lastname: String,
    #[validate(length(min = 2, max = 255, message = "父称长度必须在2-255个字符之间"))]
    pub surname: String,
    #[validate(length(min = 2, max = 255, message = "学院名称长度必须在2-255个字符之间"))]
    pub college: String,
    pub role: Option<UserRole>,
}

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 1, message = "密码不能为空"))]
    pub password: String,
}

/// 管理端创建用户请求（字段与注册一致，入口权限不同）
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 6, message = "密码长度不能少于6个字符"))]
    pub password: String,
    #[validate(length(min = 2, max = 255, message = "名字长度必须在2-255个字符之间"))]
    pub firstname: String,
    #[validate(length(min = 2, max = 255, message = "姓氏长度必须在2-255个字符之间"))]
    pub lastname: String,
    #[validate(length(min = 2, max = 255, message = "父称长度必须在2-255个字符之间"))]
    pub surname: String,
    #[validate(length(min = 2, max = 255, message = "学院名称长度必须在2-255个字符之间"))]
    pub college: String,
    pub role: Option<UserRole>,
}

/// 更新用户资料请求（None 表示保持不变）
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 255, message = "名字长度必须在2-255个字符之间"))]
    pub firstname: Option<String>,
    #[validate(length(min = 2, max = 255, message = "姓氏长度必须在2-255个字符之间"))]
    pub lastname: Option<String>,
    #[validate(length(min = 2, max = 255, message = "父称长度必须在2-255个字符之间"))]
    pub surname: Option<String>,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: Option<String>,
    #[validate(length(min = 2, max = 255, message = "学院名称长度必须在2-255个字符之间"))]
    pub college: Option<String>,
    pub role: Option<UserRole>,
}

/// 用户列表查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub role: Option<UserRole>,
}

/// 创建成就请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAchievementRequest {
    #[validate(length(min = 1, max = 255, message = "标题长度必须在1-255个字符之间"))]
    pub title: String,
    #[validate(length(min = 1, message = "描述不能为空"))]
    pub description: String,
    #[validate(range(min = 0, message = "积分不能为负数"))]
    pub star_points: i32,
    pub category: Option<AchievementCategory>,
    #[validate(url(message = "图标必须是合法的 URL"))]
    pub icon_url: Option<String>,
    pub is_active: Option<bool>,
}

/// 更新成就请求（None 表示保持不变）
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAchievementRequest {
    #[validate(length(min = 1, max = 255, message = "标题长度必须在1-255个字符之间"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "描述不能为空"))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "积分不能为负数"))]
    pub star_points: Option<i32>,
    pub category: Option<AchievementCategory>,
    #[validate(url(message = "图标必须是合法的 URL"))]
    pub icon_url: Option<String>,
    pub is_active: Option<bool>,
}

/// 成就列表查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementQuery {
    pub category: Option<AchievementCategory>,
    pub search: Option<String>,
}

/// 申领/授予成就请求
///
/// 自助申领与代授予共用同一请求体，受益学生在授予路径中由 URL 指定
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAwardRequest {
    pub achievement_id: i64,
    pub notes: Option<String>,
    #[validate(url(message = "佐证必须是合法的 URL"))]
    pub evidence_url: Option<String>,
}

/// 审核/更新成就记录请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAwardRequest {
    pub status: Option<AwardStatus>,
    pub notes: Option<String>,
    #[validate(url(message = "佐证必须是合法的 URL"))]
    pub evidence_url: Option<String>,
}

/// 成就记录列表查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardQuery {
    pub student_id: Option<i64>,
    pub achievement_id: Option<i64>,
    pub status: Option<AwardStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "ivan@example.com".into(),
            password: "secret123".into(),
            firstname: "Иван".into(),
            lastname: "Иванов".into(),
            surname: "Иванович".into(),
            college: "CS".into(),
            role: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".into(),
            ..valid_clone(&valid)
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "123".into(),
            ..valid_clone(&valid)
        };
        assert!(short_password.validate().is_err());
    }

    fn valid_clone(req: &RegisterRequest) -> RegisterRequest {
        RegisterRequest {
            email: req.email.clone(),
            password: req.password.clone(),
            firstname: req.firstname.clone(),
            lastname: req.lastname.clone(),
            surname: req.surname.clone(),
            college: req.college.clone(),
            role: req.role,
        }
    }

    #[test]
    fn test_create_achievement_rejects_negative_points() {
        let req = CreateAchievementRequest {
            title: "优秀学生".into(),
            description: "描述".into(),
            star_points: -5,
            category: None,
            icon_url: None,
            is_active: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_award_request_rejects_invalid_evidence_url() {
        let req = CreateAwardRequest {
            achievement_id: 7,
            notes: None,
            evidence_url: Some("not a url".into()),
        };
        assert!(req.validate().is_err());

        let req = CreateAwardRequest {
            achievement_id: 7,
            notes: None,
            evidence_url: Some("https://example.com/evidence.pdf".into()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_award_query_deserializes_camel_case() {
        let query: AwardQuery =
            serde_json::from_str(r#"{"studentId": 1, "status": "pending"}"#).unwrap();
        assert_eq!(query.student_id, Some(1));
        assert_eq!(query.status, Some(AwardStatus::Pending));
        assert!(query.achievement_id.is_none());
    }
}
