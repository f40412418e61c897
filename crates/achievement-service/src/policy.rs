//! 授权策略
//!
//! 无状态的纯判定函数：给定操作者与资源归属，返回允许/拒绝。
//! 无任何副作用，每条规则可独立测试。
//!
//! 注意：can_review 允许记录归属学生流转自己申领记录的状态（自审），
//! 这是对线上观察行为的忠实复刻，是否收紧由产品方决定（见 DESIGN.md）。

use crate::models::{Actor, UserRole};

/// 是否可编辑成就目录条目：创建者本人或管理员
pub fn can_edit_achievement(actor: &Actor, created_by: Option<i64>) -> bool {
    created_by == Some(actor.id) || actor.role == UserRole::Admin
}

/// 是否可删除成就目录条目：与编辑同规则
pub fn can_delete_achievement(actor: &Actor, created_by: Option<i64>) -> bool {
    can_edit_achievement(actor, created_by)
}

/// 是否可代他人授予成就：辅导员或管理员
pub fn can_grant_to_other(actor: &Actor) -> bool {
    actor.role.is_staff()
}

/// 是否可审核成就记录：记录归属学生本人、辅导员或管理员
pub fn can_review(actor: &Actor, record_owner: i64) -> bool {
    actor.id == record_owner || actor.role.is_staff()
}

/// 是否可删除成就记录：记录归属学生本人或管理员
pub fn can_delete_award(actor: &Actor, record_owner: i64) -> bool {
    actor.id == record_owner || actor.role == UserRole::Admin
}

/// 是否可更新用户资料：本人或管理员
pub fn can_update_user(actor: &Actor, target: i64) -> bool {
    actor.id == target || actor.role == UserRole::Admin
}

/// 是否可删除用户：本人或管理员
pub fn can_delete_user(actor: &Actor, target: i64) -> bool {
    can_update_user(actor, target)
}

/// 是否可通过 API 创建用户：仅管理员
pub fn can_create_user(actor: &Actor) -> bool {
    actor.role == UserRole::Admin
}
