//! 服务层数据传输对象
//!
//! 定义服务层与传输层交互使用的 DTO。更新类 DTO 是显式字段白名单：
//! 未出现在白名单中的字段（如 status/approved_by/password_hash）
//! 不可能通过通用合并被意外写入。

use serde::{Deserialize, Serialize};

use crate::models::{AchievementCategory, AwardStatus, UserRole};

/// 新建用户参数
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub surname: String,
    pub email: String,
    /// 已哈希的密码，哈希由传输层完成
    pub password_hash: String,
    pub role: Option<UserRole>,
    pub college: Option<String>,
}

/// 用户资料更新参数（白名单字段，None 表示保持不变）
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub college: Option<String>,
}

/// 新建成就参数
#[derive(Debug, Clone)]
pub struct NewAchievement {
    pub title: String,
    pub description: String,
    pub star_points: i32,
    pub category: Option<AchievementCategory>,
    pub icon_url: Option<String>,
    pub is_active: Option<bool>,
}

/// 成就更新参数（白名单字段，None 表示保持不变）
#[derive(Debug, Clone, Default)]
pub struct AchievementUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub star_points: Option<i32>,
    pub category: Option<AchievementCategory>,
    pub icon_url: Option<String>,
    pub is_active: Option<bool>,
}

/// 申领/授予时的附加信息
#[derive(Debug, Clone, Default)]
pub struct AwardInput {
    pub notes: Option<String>,
    pub evidence_url: Option<String>,
}

/// 成就记录审核参数
///
/// status 为 None 时只更新备注/佐证；写入非 pending 状态会盖上审批人
#[derive(Debug, Clone, Default)]
pub struct AwardReview {
    pub status: Option<AwardStatus>,
    pub notes: Option<String>,
    pub evidence_url: Option<String>,
}

/// 学生维度统计
///
/// total_points 只累加 approved 记录对应成就的积分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub total_achievements: i64,
    pub approved_achievements: i64,
    pub pending_achievements: i64,
    pub rejected_achievements: i64,
    pub total_points: i64,
}

/// 成就维度统计（不聚合积分，积分是学生维度的概念）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStats {
    pub total_students: i64,
    pub approved_students: i64,
    pub pending_students: i64,
    pub rejected_students: i64,
}

/// 用户角色分布统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOverview {
    pub total_users: i64,
    pub students: i64,
    pub curators: i64,
    pub admins: i64,
}
