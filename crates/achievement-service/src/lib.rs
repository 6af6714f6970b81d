//! 成就资源服务
//!
//! 提供校园应用中成就（achievement）记录的 REST API，
//! 带组织（body）维度的角色权限控制和审核流转。
//!
//! ## 核心功能
//!
//! - **成就管理**：成就的创建、查询、更新、删除
//! - **可见性规则**：默认列表只返回调用者自己的成就；
//!   组织维度列表需要该组织的审核权限
//! - **审核流转**：`verified`/`dismissed` 标记只能由持有
//!   `VerA` 权限的审核人设置，创建时一律强制为 false
//! - **归属约束**：成就创建后不可迁移到其他组织
//!
//! ## 模块结构
//!
//! - `auth`: JWT Claims 与校验
//! - `middleware`: 认证中间件
//! - `permission`: 组织角色权限检查
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
pub mod permission;
pub mod routes;
pub mod state;

// 重新导出核心类型
pub use dto::{
    AchievementDto, ApiResponse, CreateAchievementRequest, UpdateAchievementRequest, UserMeDto,
};
pub use error::{Result, ServiceError};
pub use permission::BodyPermission;
