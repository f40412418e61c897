//! 中间件模块

mod auth;

pub use auth::{auth_middleware, AuthUser};
