//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// 构建成就资源相关的路由
///
/// 包含成就的 CRUD 操作和组织维度的审核人列表
pub fn achievement_routes() -> Router<AppState> {
    Router::new()
        .route("/achievements", post(handlers::achievement::create_achievement))
        .route("/achievements", get(handlers::achievement::list_achievements))
        .route(
            "/achievements/{id}",
            get(handlers::achievement::get_achievement),
        )
        .route(
            "/achievements/{id}",
            put(handlers::achievement::update_achievement),
        )
        .route(
            "/achievements/{id}",
            delete(handlers::achievement::delete_achievement),
        )
        .route(
            "/achievements-body/{body_id}",
            get(handlers::achievement::list_body_achievements),
        )
}

/// 构建当前用户视图路由
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user-me", get(handlers::user_me::get_user_me))
}

/// 构建完整的 API 路由
///
/// 返回所有 API 路由（不含前缀，由调用方在 main.rs 中挂载）
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(achievement_routes()).merge(user_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_construction() {
        let _achievement = achievement_routes();
        let _user = user_routes();
        let _api = api_routes();
    }
}
