//! 领域模型定义
//!
//! 包含用户、成就目录、学生成就记录三类实体，以及认证边界传入的操作者类型。

mod achievement;
mod actor;
mod enums;
mod student_achievement;
mod user;

pub use achievement::Achievement;
pub use actor::Actor;
pub use enums::{AchievementCategory, AwardStatus, UserRole};
pub use student_achievement::StudentAchievement;
pub use user::User;
