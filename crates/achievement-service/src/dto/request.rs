//! 请求 DTO 定义
//!
//! 所有 REST API 的请求体结构

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// 创建成就请求
///
/// `verified`/`dismissed` 可以出现在请求体中（客户端无法伪造审核状态，
/// 服务端在创建时一律强制为 false），`body` 缺失时按 403 拒绝。
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAchievementRequest {
    #[validate(length(max = 200, message = "标题长度不能超过200个字符"))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "描述长度不能超过2000个字符"))]
    pub description: Option<String>,
    #[validate(url(message = "图片地址必须是有效的URL"))]
    pub image_url: Option<String>,
    /// 所属组织
    pub body: Option<Uuid>,
    pub verified: Option<bool>,
    pub dismissed: Option<bool>,
}

/// 更新成就请求
///
/// 只有持有该成就所属组织 `VerA` 权限的审核人可以调用；
/// `body` 若与记录的原组织不一致则按 400 拒绝。
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAchievementRequest {
    #[validate(length(max = 200, message = "标题长度不能超过200个字符"))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "描述长度不能超过2000个字符"))]
    pub description: Option<String>,
    #[validate(url(message = "图片地址必须是有效的URL"))]
    pub image_url: Option<String>,
    /// 所属组织（必须与创建时一致）
    pub body: Option<Uuid>,
    pub verified: Option<bool>,
    pub dismissed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateAchievementRequest {
            title: Some("编程比赛一等奖".to_string()),
            description: None,
            image_url: Some("https://example.com/image.png".to_string()),
            body: Some(Uuid::from_u128(1)),
            verified: None,
            dismissed: None,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateAchievementRequest {
            title: None,
            description: None,
            image_url: Some("not-a-url".to_string()),
            body: Some(Uuid::from_u128(1)),
            verified: None,
            dismissed: None,
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_create_request_title_too_long() {
        let req = CreateAchievementRequest {
            title: Some("长".repeat(201)),
            description: None,
            image_url: None,
            body: None,
            verified: None,
            dismissed: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_camel_case_deserialization() {
        // 客户端按 camelCase 提交，字段名映射错误会让 imageUrl 静默丢失
        let json = r#"{
            "title": "My Big Achievement",
            "imageUrl": "http://example.com/image2.png",
            "verified": true,
            "dismissed": true
        }"#;
        let req: CreateAchievementRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            req.image_url.as_deref(),
            Some("http://example.com/image2.png")
        );
        assert_eq!(req.verified, Some(true));
        assert_eq!(req.dismissed, Some(true));
        assert!(req.body.is_none());
    }
}
