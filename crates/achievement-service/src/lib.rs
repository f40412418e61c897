//! 学生成就服务（核心）
//!
//! 管理成就目录、成就授予与审核流程，以及按学生/成就维度的统计聚合。
//!
//! ## 核心功能
//!
//! - **成就目录**：成就定义的 CRUD，按分类查询与全文检索
//! - **成就授予**：学生自助申领、辅导员/管理员代授予，(学生, 成就) 唯一性保证
//! - **审核流程**：pending -> approved/rejected 状态流转，记录审批人
//! - **权限策略**：基于角色（student/curator/admin）与资源归属的纯函数授权
//! - **统计聚合**：学生维度（含已批准成就的总积分）与成就维度的状态计数
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `policy`: 授权策略（纯函数）
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层
//!
//! 本 crate 不包含任何 HTTP 类型，传输层由 achievement-api-service 提供。

pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod service;

pub use error::{CoreError, Result};
pub use models::*;
pub use repository::{
    AchievementRepository, StudentAchievementRepository, UserRepository,
};
pub use service::{AwardService, CatalogService, StatsService, UserService, dto};
