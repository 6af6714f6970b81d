//! JWT Token 处理
//!
//! 提供 JWT Token 的生成和验证功能。
//! `sub` 声明携带调用者的用户档案 ID，组织角色不进 Token，
//! 每次权限检查都以数据库中的角色为准（角色变更即时生效）。

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceError;

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 签名密钥
    pub secret: String,
    /// Token 过期时间（秒）
    pub expires_in_secs: i64,
    /// Token 签发者
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "achievement-secret-key-change-in-production".to_string(),
            expires_in_secs: 86400, // 24 小时
            issuer: "achievement-service".to_string(),
        }
    }
}

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 用户档案 ID
    pub sub: String,
    /// 用户名
    pub username: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

impl Claims {
    /// 解析 `sub` 声明中的用户档案 ID
    pub fn profile_id(&self) -> Result<Uuid, ServiceError> {
        self.sub
            .parse()
            .map_err(|_| ServiceError::Unauthorized("Token 中的用户档案 ID 无效".to_string()))
    }
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// 创建 JWT 管理器
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 生成 JWT Token
    ///
    /// 平台账号服务用相同的密钥签发 Token；本方法同时用于集成测试。
    /// 返回 (token, 过期时间戳)。
    pub fn generate_token(
        &self,
        profile_id: Uuid,
        username: &str,
    ) -> Result<(String, i64), ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.expires_in_secs);

        let claims = Claims {
            sub: profile_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(format!("JWT 生成失败: {}", e)))?;

        Ok((token, exp.timestamp()))
    }

    /// 验证并解析 JWT Token
    ///
    /// 返回解析后的 Claims，如果 Token 无效或过期则返回错误
    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        ServiceError::Unauthorized("Token 已过期".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        ServiceError::Unauthorized("无效的 Token".to_string())
                    }
                    _ => ServiceError::Unauthorized(format!("Token 验证失败: {}", e)),
                }
            })?;

        Ok(token_data.claims)
    }
}
