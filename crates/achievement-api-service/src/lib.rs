//! 学生成就 REST API 服务
//!
//! 面向移动端/前端的 HTTP 传输层，核心业务逻辑在 achievement-service。
//!
//! ## 核心功能
//!
//! - **认证**：注册/登录，JWT Token 签发与校验，bcrypt 密码哈希
//! - **成就目录**：成就的 CRUD、分类查询与检索
//! - **成就记录**：自助申领、代授予、审核流转、删除
//! - **统计**：学生/成就维度统计，用户角色分布
//!
//! ## 模块结构
//!
//! - `auth`: JWT 与密码处理
//! - `middleware`: 认证中间件与提取器
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use dto::{ApiResponse, AuthResponse};
pub use error::{ApiError, Result};
pub use state::AppState;
