//! HTTP 请求处理器
//!
//! 每个子模块对应一类资源的处理器集合

pub mod achievement;
pub mod user_me;
