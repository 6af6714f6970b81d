//! 统一错误处理模块
//!
//! 定义基础设施层共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum SharedError {
    // ==================== 数据库错误 ====================
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    // ==================== 配置错误 ====================
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, SharedError>;

impl SharedError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SharedError::from(sqlx::Error::RowNotFound).code(),
            "DATABASE_ERROR"
        );
        assert_eq!(
            SharedError::from(config::ConfigError::NotFound("server.port".to_string())).code(),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_display_contains_source() {
        let err = SharedError::from(config::ConfigError::NotFound("server.port".to_string()));
        let msg = err.to_string();
        assert!(msg.contains("配置错误"));
        assert!(msg.contains("server.port"));
    }
}
