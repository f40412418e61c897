//! 成就目录实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AchievementCategory;

/// 成就定义（目录条目）
///
/// 可授予学生的成就，携带积分值与分类。
/// 不持有任何审核流程状态，流程状态在 StudentAchievement 上。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: i64,
    /// 对外暴露的不透明标识
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    /// 积分值，不变量：>= 0
    pub star_points: i32,
    pub category: AchievementCategory,
    #[sqlx(default)]
    pub icon_url: Option<String>,
    /// 软下线开关：false 的条目不出现在列表/检索结果中
    pub is_active: bool,
    /// 创建者用户 ID（创建者或管理员可编辑/删除）
    #[sqlx(default)]
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Achievement {
    /// 构造一个尚未持久化的成就（id 由数据库生成）
    pub fn new(
        title: String,
        description: String,
        star_points: i32,
        category: AchievementCategory,
        icon_url: Option<String>,
        is_active: bool,
        created_by: Option<i64>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            uuid: Uuid::new_v4(),
            title,
            description,
            star_points,
            category,
            icon_url,
            is_active,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}
