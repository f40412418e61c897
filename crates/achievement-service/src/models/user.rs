//! 用户实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::UserRole;

/// 用户
///
/// 学生、辅导员、管理员共用一张表，通过 role 区分权限边界。
/// password_hash 永远不参与 JSON 序列化。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    /// 对外暴露的不透明标识
    pub uuid: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: UserRole,
    #[sqlx(default)]
    pub college: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 构造一个尚未持久化的用户（id 由数据库生成）
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        firstname: String,
        lastname: String,
        surname: String,
        email: String,
        password_hash: String,
        role: UserRole,
        college: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            uuid: Uuid::new_v4(),
            firstname,
            lastname,
            surname,
            email,
            password_hash,
            role,
            college,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "Иван".into(),
            "Иванов".into(),
            "Иванович".into(),
            "ivan@example.com".into(),
            "$2b$12$hash".into(),
            UserRole::Student,
            Some("CS".into()),
        );
        assert_eq!(user.id, 0);
        assert!(!user.uuid.is_nil());
        assert_eq!(user.role, UserRole::Student);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new(
            "A".into(),
            "B".into(),
            "C".into(),
            "a@b.c".into(),
            "secret-hash".into(),
            UserRole::Admin,
            None,
        );
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("passwordHash"));
        assert!(json.contains("a@b.c"));
    }
}
