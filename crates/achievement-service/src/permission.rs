//! 组织角色权限检查
//!
//! 权限以组织（body）为作用域，挂在组织角色上，通过
//! `profile_roles` 关联到用户档案。Token 不携带角色，
//! 每次检查都查库，角色的授予和回收即时生效。

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, ServiceError};

/// 组织角色权限码
///
/// 与 `body_roles.permissions` 列中存储的权限码一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPermission {
    /// 成就审核权限（VerA）：审核、修改、删除该组织下的成就
    VerifyAchievement,
}

impl BodyPermission {
    /// 数据库中存储的权限码
    pub fn code(&self) -> &'static str {
        match self {
            Self::VerifyAchievement => "VerA",
        }
    }
}

/// 检查用户是否在指定组织持有带该权限的角色
pub async fn has_body_permission(
    pool: &PgPool,
    profile_id: Uuid,
    body_id: Uuid,
    permission: BodyPermission,
) -> Result<bool> {
    let row: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM body_roles r
            JOIN profile_roles pr ON pr.role_id = r.id
            WHERE pr.profile_id = $1
              AND r.body_id = $2
              AND $3 = ANY(r.permissions)
        )
        "#,
    )
    .bind(profile_id)
    .bind(body_id)
    .bind(permission.code())
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// 要求用户在指定组织持有该权限，否则返回 Forbidden
pub async fn require_body_permission(
    pool: &PgPool,
    profile_id: Uuid,
    body_id: Uuid,
    permission: BodyPermission,
) -> Result<()> {
    if has_body_permission(pool, profile_id, body_id, permission).await? {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "缺少权限: {}",
            permission.code()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_code() {
        // 权限码是数据库契约的一部分，变更会使既有角色失效，必须锁定
        assert_eq!(BodyPermission::VerifyAchievement.code(), "VerA");
    }
}
