//! DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{
    AchievementQuery, AwardQuery, CreateAchievementRequest, CreateAwardRequest,
    CreateUserRequest, LoginRequest, RegisterRequest, UpdateAchievementRequest,
    UpdateAwardRequest, UpdateUserRequest, UserQuery,
};
pub use response::{ApiResponse, AuthResponse};
