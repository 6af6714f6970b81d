//! 成就 API 处理器
//!
//! 实现成就的 CRUD 操作及审核相关的权限控制：
//! - 创建时强制 `verified=false, dismissed=false`
//! - 更新/删除需要成就所属组织的 `VerA` 权限（仅有所有权不够）
//! - 更新不允许把成就迁移到其他组织

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use chrono::{DateTime, Utc};
use tracing::info;
use validator::Validate;

use crate::{
    auth::Claims,
    dto::{AchievementDto, ApiResponse, CreateAchievementRequest, UpdateAchievementRequest},
    error::ServiceError,
    permission::{BodyPermission, require_body_permission},
    state::AppState,
};

/// 成就数据库查询结果（带关联组织名称）
#[derive(sqlx::FromRow)]
pub(crate) struct AchievementRow {
    id: Uuid,
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    body_id: Uuid,
    body_name: String,
    user_id: Uuid,
    verified: bool,
    dismissed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AchievementRow> for AchievementDto {
    fn from(row: AchievementRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            body_id: row.body_id,
            body_name: row.body_name,
            user_id: row.user_id,
            verified: row.verified,
            dismissed: row.dismissed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// 成就完整信息的查询 SQL（复用于详情/列表/更新后回查）
pub(crate) const ACHIEVEMENT_FULL_SQL: &str = r#"
    SELECT
        a.id,
        a.title,
        a.description,
        a.image_url,
        a.body_id,
        b.name as body_name,
        a.user_id,
        a.verified,
        a.dismissed,
        a.created_at,
        a.updated_at
    FROM achievements a
    JOIN bodies b ON b.id = a.body_id
"#;

/// 通过 ID 查询成就完整信息
pub(crate) async fn fetch_achievement_by_id(
    pool: &sqlx::PgPool,
    id: Uuid,
) -> Result<AchievementDto, ServiceError> {
    let sql = format!("{} WHERE a.id = $1", ACHIEVEMENT_FULL_SQL);

    let row = sqlx::query_as::<_, AchievementRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ServiceError::AchievementNotFound(id))?;

    Ok(row.into())
}

/// 新建成就的落库值
///
/// 审核标记在这里统一归零，无论请求体里要求什么：
/// 创建者不能给自己的成就预置 `verified`/`dismissed` 状态。
struct NewAchievement<'a> {
    title: Option<&'a str>,
    description: Option<&'a str>,
    image_url: Option<&'a str>,
    body_id: Uuid,
    user_id: Uuid,
    verified: bool,
    dismissed: bool,
}

impl<'a> NewAchievement<'a> {
    fn from_request(user_id: Uuid, body_id: Uuid, req: &'a CreateAchievementRequest) -> Self {
        Self {
            title: req.title.as_deref(),
            description: req.description.as_deref(),
            image_url: req.image_url.as_deref(),
            body_id,
            user_id,
            verified: false,
            dismissed: false,
        }
    }
}

/// 校验更新请求没有把成就迁移到其他组织
///
/// `requested` 为 None 表示请求不改动归属，放行。
fn ensure_body_unchanged(original: Uuid, requested: Option<Uuid>) -> Result<(), ServiceError> {
    match requested {
        Some(requested) if requested != original => Err(ServiceError::BodyImmutable {
            original,
            requested,
        }),
        _ => Ok(()),
    }
}

/// 创建成就
///
/// POST /api/achievements
///
/// 未指定所属组织按 403 拒绝（上游系统的既有契约）
pub async fn create_achievement(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateAchievementRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AchievementDto>>), ServiceError> {
    req.validate()?;

    let profile_id = claims.profile_id()?;
    let body_id = req.body.ok_or(ServiceError::BodyRequired)?;

    // 验证组织存在
    let body_exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM bodies WHERE id = $1)")
        .bind(body_id)
        .fetch_one(&state.pool)
        .await?;

    if !body_exists.0 {
        return Err(ServiceError::BodyNotFound(body_id));
    }

    let new = NewAchievement::from_request(profile_id, body_id, &req);

    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO achievements (title, description, image_url, body_id, user_id, verified, dismissed)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(new.title)
    .bind(new.description)
    .bind(new.image_url)
    .bind(new.body_id)
    .bind(new.user_id)
    .bind(new.verified)
    .bind(new.dismissed)
    .fetch_one(&state.pool)
    .await?;

    info!(achievement_id = %row.0, body_id = %body_id, user_id = %profile_id, "Achievement created");

    let dto = fetch_achievement_by_id(&state.pool, row.0).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

/// 获取成就详情
///
/// GET /api/achievements/{id}
///
/// 任意已认证调用者可见，不做归属过滤
pub async fn get_achievement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AchievementDto>>, ServiceError> {
    let dto = fetch_achievement_by_id(&state.pool, id).await?;
    Ok(Json(ApiResponse::success(dto)))
}

/// 获取成就列表
///
/// GET /api/achievements
///
/// 默认可见性规则：只返回调用者自己创建的成就（跨组织），
/// 不过滤 verified/dismissed 状态
pub async fn list_achievements(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<AchievementDto>>>, ServiceError> {
    let profile_id = claims.profile_id()?;

    let sql = format!(
        "{} WHERE a.user_id = $1 ORDER BY a.created_at DESC",
        ACHIEVEMENT_FULL_SQL
    );

    let rows = sqlx::query_as::<_, AchievementRow>(&sql)
        .bind(profile_id)
        .fetch_all(&state.pool)
        .await?;

    let items: Vec<AchievementDto> = rows.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// 获取组织维度的成就列表
///
/// GET /api/achievements-body/{body_id}
///
/// 审核人视图：需要该组织的 `VerA` 权限，返回该组织全部成就
/// （含未审核和已隐藏的记录）
pub async fn list_body_achievements(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(body_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<AchievementDto>>>, ServiceError> {
    let profile_id = claims.profile_id()?;

    require_body_permission(
        &state.pool,
        profile_id,
        body_id,
        BodyPermission::VerifyAchievement,
    )
    .await?;

    let sql = format!(
        "{} WHERE a.body_id = $1 ORDER BY a.created_at DESC",
        ACHIEVEMENT_FULL_SQL
    );

    let rows = sqlx::query_as::<_, AchievementRow>(&sql)
        .bind(body_id)
        .fetch_all(&state.pool)
        .await?;

    let items: Vec<AchievementDto> = rows.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// 更新成就
///
/// PUT /api/achievements/{id}
///
/// 需要成就所属组织的 `VerA` 权限；审核人可以在这里设置
/// `verified`/`dismissed`。`body` 与原组织不一致时按 400 拒绝。
///
/// 语义为部分更新：请求体中未出现的字段保持原值，
/// 已有的字段值无法通过 PUT 清空为 NULL。
pub async fn update_achievement(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAchievementRequest>,
) -> Result<Json<ApiResponse<AchievementDto>>, ServiceError> {
    req.validate()?;

    let profile_id = claims.profile_id()?;
    let current = fetch_achievement_by_id(&state.pool, id).await?;

    // 权限检查以记录的原组织为准，防止通过改 body 绕过作用域
    require_body_permission(
        &state.pool,
        profile_id,
        current.body_id,
        BodyPermission::VerifyAchievement,
    )
    .await?;

    ensure_body_unchanged(current.body_id, req.body)?;

    // 使用 COALESCE 实现部分更新，NULL 参数表示不更新该字段
    sqlx::query(
        r#"
        UPDATE achievements
        SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            image_url = COALESCE($4, image_url),
            verified = COALESCE($5, verified),
            dismissed = COALESCE($6, dismissed),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.image_url)
    .bind(req.verified)
    .bind(req.dismissed)
    .execute(&state.pool)
    .await?;

    info!(achievement_id = %id, operator_id = %profile_id, "Achievement updated");

    let dto = fetch_achievement_by_id(&state.pool, id).await?;
    Ok(Json(ApiResponse::success(dto)))
}

/// 删除成就
///
/// DELETE /api/achievements/{id}
///
/// 需要成就所属组织的 `VerA` 权限；成功时返回 204 无响应体
pub async fn delete_achievement(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let profile_id = claims.profile_id()?;
    let current = fetch_achievement_by_id(&state.pool, id).await?;

    require_body_permission(
        &state.pool,
        profile_id,
        current.body_id,
        BodyPermission::VerifyAchievement,
    )
    .await?;

    sqlx::query("DELETE FROM achievements WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    info!(achievement_id = %id, operator_id = %profile_id, "Achievement deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(verified: Option<bool>, dismissed: Option<bool>) -> CreateAchievementRequest {
        CreateAchievementRequest {
            title: Some("My Big Achievement".to_string()),
            description: None,
            image_url: Some("http://example.com/image2.png".to_string()),
            body: Some(Uuid::from_u128(1)),
            verified,
            dismissed,
        }
    }

    /// 创建者无法给自己的成就预置审核状态：
    /// 即使请求体里带 verified=true/dismissed=true，落库值也必须是 false
    #[test]
    fn test_new_achievement_forces_moderation_flags_false() {
        let req = create_request(Some(true), Some(true));
        let new = NewAchievement::from_request(Uuid::from_u128(9), Uuid::from_u128(1), &req);

        assert!(!new.verified);
        assert!(!new.dismissed);
        assert_eq!(new.user_id, Uuid::from_u128(9));
        assert_eq!(new.body_id, Uuid::from_u128(1));
        assert_eq!(new.title, Some("My Big Achievement"));
    }

    #[test]
    fn test_new_achievement_flags_false_when_absent() {
        let req = create_request(None, None);
        let new = NewAchievement::from_request(Uuid::from_u128(9), Uuid::from_u128(1), &req);

        assert!(!new.verified);
        assert!(!new.dismissed);
    }

    #[test]
    fn test_ensure_body_unchanged_accepts_same_body() {
        let body = Uuid::from_u128(1);
        assert!(ensure_body_unchanged(body, Some(body)).is_ok());
    }

    #[test]
    fn test_ensure_body_unchanged_accepts_absent_body() {
        assert!(ensure_body_unchanged(Uuid::from_u128(1), None).is_ok());
    }

    /// 跨组织迁移必须按 400 拒绝，且错误里带上两个组织 ID 便于排查
    #[test]
    fn test_ensure_body_unchanged_rejects_cross_body_move() {
        let original = Uuid::from_u128(1);
        let requested = Uuid::from_u128(2);

        let err = ensure_body_unchanged(original, Some(requested)).unwrap_err();
        match err {
            ServiceError::BodyImmutable {
                original: o,
                requested: r,
            } => {
                assert_eq!(o, original);
                assert_eq!(r, requested);
            }
            other => panic!("期望 BodyImmutable，实际: {:?}", other),
        }
        assert_eq!(
            ensure_body_unchanged(original, Some(requested))
                .unwrap_err()
                .status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
