//! 成就服务错误类型定义
//!
//! 包含所有 achievement service 特有的错误类型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::dto::ApiResponse;

/// 成就服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("禁止访问: {0}")]
    Forbidden(String),

    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 业务错误
    #[error("创建成就必须指定所属组织")]
    BodyRequired,
    #[error("成就不可迁移到其他组织: 原组织 {original}, 请求组织 {requested}")]
    BodyImmutable { original: Uuid, requested: Uuid },

    // 资源不存在
    #[error("成就不存在: {0}")]
    AchievementNotFound(Uuid),
    #[error("组织不存在: {0}")]
    BodyNotFound(Uuid),
    #[error("用户档案不存在: {0}")]
    ProfileNotFound(String),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ServiceError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            // 缺失组织引用与权限不足一样按 403 处理（上游系统的既有契约）
            Self::Forbidden(_) | Self::BodyRequired => StatusCode::FORBIDDEN,

            Self::Validation(_) | Self::BodyImmutable { .. } => StatusCode::BAD_REQUEST,

            Self::AchievementNotFound(_) | Self::BodyNotFound(_) | Self::ProfileNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BodyRequired => "BODY_REQUIRED",
            Self::BodyImmutable { .. } => "BODY_IMMUTABLE",
            Self::AchievementNotFound(_) => "ACHIEVEMENT_NOT_FOUND",
            Self::BodyNotFound(_) => "BODY_NOT_FOUND",
            Self::ProfileNotFound(_) => "PROFILE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = ApiResponse::<()>::error(self.error_code(), message);
        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ServiceError>;
