//! 数据传输对象
//!
//! REST API 的请求和响应结构定义

mod request;
mod response;

pub use request::{CreateAchievementRequest, UpdateAchievementRequest};
pub use response::{AchievementDto, ApiResponse, UserMeDto};
