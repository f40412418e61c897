//! 操作者类型定义

use super::enums::UserRole;

/// 操作者
///
/// 认证边界传入的已认证身份（ID + 角色），本服务从不持久化。
/// 所有服务层操作都以 Actor 为权限判定依据。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self { id, role }
    }
}
