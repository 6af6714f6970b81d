//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{JwtConfig, JwtManager};

/// Axum 应用共享状态
///
/// 包含数据库连接池和 JWT 管理器，在 handler 和中间件间共享
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池
    pub pool: PgPool,
    /// JWT 管理器
    pub jwt_manager: Arc<JwtManager>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            pool,
            jwt_manager: Arc::new(JwtManager::new(jwt_config)),
        }
    }
}
