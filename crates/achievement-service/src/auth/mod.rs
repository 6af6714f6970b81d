//! 认证模块
//!
//! 包含 JWT Token 校验相关功能。
//! 登录和发 Token 由平台统一的账号服务负责，本服务只做校验。

mod jwt;

pub use jwt::{Claims, JwtConfig, JwtManager};
