//! 枚举类型定义
//!
//! 所有枚举都支持数据库（sqlx）和 JSON（serde）序列化。
//! 角色与状态均为封闭枚举并在各处穷尽匹配，杜绝字符串比较的笔误类缺陷。

use serde::{Deserialize, Serialize};

/// 用户角色
///
/// 决定用户在授权策略中的权限边界
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum UserRole {
    /// 学生 - 可自助申领成就、管理自己的记录
    #[default]
    Student,
    /// 辅导员 - 可代学生授予成就、审核成就记录
    Curator,
    /// 管理员 - 拥有全部权限
    Admin,
}

impl UserRole {
    /// 是否为工作人员角色（辅导员或管理员）
    ///
    /// 工作人员可以代他人授予成就并审核任意记录
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Curator | Self::Admin)
    }
}

/// 成就分类
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum AchievementCategory {
    /// 学业
    #[default]
    Academic,
    /// 体育
    Sports,
    /// 文艺
    Creative,
    /// 社会活动
    Social,
    /// 领导力
    Leadership,
}

/// 成就记录审核状态
///
/// 记录创建时为 pending；任何状态值都可被授权操作者重复写入
/// （幂等覆盖语义，而非单向状态机）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum AwardStatus {
    /// 待审核 - 初始状态
    #[default]
    Pending,
    /// 已批准 - 计入学生总积分
    Approved,
    /// 已拒绝 - 不计入积分
    Rejected,
}

impl AwardStatus {
    /// 该状态是否计入学生总积分
    pub fn counts_toward_points(&self) -> bool {
        matches!(self, Self::Approved)
    }
}
