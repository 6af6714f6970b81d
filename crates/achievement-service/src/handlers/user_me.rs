//! 当前用户视图处理器
//!
//! 返回调用者的用户档案和内嵌的成就列表。
//! 这里是对外展示口径：只含 `verified=true` 的记录。

use axum::{Extension, Json, extract::State};
use uuid::Uuid;

use crate::{
    auth::Claims,
    dto::{AchievementDto, ApiResponse, UserMeDto},
    error::ServiceError,
    handlers::achievement::{ACHIEVEMENT_FULL_SQL, AchievementRow},
    state::AppState,
};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
}

/// 获取当前用户信息
///
/// GET /api/user-me
///
/// 内嵌的成就列表只含已审核通过的记录，未审核的成就
/// 对个人主页不可见；审核人通过组织维度列表查看全量
pub async fn get_user_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<UserMeDto>>, ServiceError> {
    let profile_id = claims.profile_id()?;

    let profile: ProfileRow = sqlx::query_as("SELECT id, name FROM profiles WHERE id = $1")
        .bind(profile_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| ServiceError::ProfileNotFound(claims.sub.clone()))?;

    let sql = format!(
        "{} WHERE a.user_id = $1 AND a.verified = TRUE ORDER BY a.created_at DESC",
        ACHIEVEMENT_FULL_SQL
    );

    let rows = sqlx::query_as::<_, AchievementRow>(&sql)
        .bind(profile_id)
        .fetch_all(&state.pool)
        .await?;

    let achievements: Vec<AchievementDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(UserMeDto {
        id: profile.id,
        name: profile.name,
        achievements,
    })))
}
