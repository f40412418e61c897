//! HTTP 请求处理器

pub mod achievements;
pub mod auth;
pub mod student_achievements;
pub mod users;
