use uuid::Uuid;

use crate::dto::users::{UpdateProfileRequest, UpdateUserStatusRequest, UserList};
use crate::services::auth_service::{UserRow, hash_password, verify_password};
use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn update_profile(
    state: &AppState,
    auth: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    let (username, email, full_name) = match (
        payload.username.as_deref().filter(|v| !v.is_empty()),
        payload.email.as_deref().filter(|v| !v.is_empty()),
        payload.full_name.as_deref().filter(|v| !v.is_empty()),
    ) {
        (Some(u), Some(e), Some(f)) => (u, e, f),
        _ => return Err(AppError::Validation("All fields are required".into())),
    };

    let current: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(auth.user_id)
        .fetch_optional(&state.pool)
        .await?;

    let current = match current {
        Some(row) => row,
        None => return Err(AppError::NotFound("User not found".into())),
    };

    let new_hash = match payload.new_password.as_deref().filter(|v| !v.is_empty()) {
        Some(new_password) => {
            let current_password = payload
                .current_password
                .as_deref()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    AppError::Validation("Current password is required to change password".into())
                })?;
            if !verify_password(current_password, &current.password_hash)? {
                return Err(AppError::Validation("Current password is incorrect".into()));
            }
            Some(hash_password(new_password)?)
        }
        None => None,
    };

    let taken: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE (username = $1 OR email = $2) AND id != $3")
            .bind(username)
            .bind(email)
            .bind(auth.user_id)
            .fetch_optional(&state.pool)
            .await?;

    if taken.is_some() {
        return Err(AppError::Conflict("Username or email already exists".into()));
    }

    let user: User = match new_hash {
        Some(hash) => {
            sqlx::query_as(
                r#"
                UPDATE users
                SET username = $1, email = $2, full_name = $3, phone = $4, address = $5,
                    password_hash = $6, updated_at = now()
                WHERE id = $7
                RETURNING *
                "#,
            )
            .bind(username)
            .bind(email)
            .bind(full_name)
            .bind(payload.phone.as_deref())
            .bind(payload.address.as_deref())
            .bind(hash)
            .bind(auth.user_id)
            .fetch_one(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as(
                r#"
                UPDATE users
                SET username = $1, email = $2, full_name = $3, phone = $4, address = $5,
                    updated_at = now()
                WHERE id = $6
                RETURNING *
                "#,
            )
            .bind(username)
            .bind(email)
            .bind(full_name)
            .bind(payload.phone.as_deref())
            .bind(payload.address.as_deref())
            .bind(auth.user_id)
            .fetch_one(&state.pool)
            .await?
        }
    };

    if let Err(err) = log_audit(
        &state.pool,
        Some(auth.user_id),
        "profile_update",
        Some("users"),
        Some(serde_json::json!({ "user_id": auth.user_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Profile updated successfully",
        user,
        Some(Meta::empty()),
    ))
}

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&state.pool)
        .await?;

    let items: Vec<User> =
        sqlx::query_as("SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&state.pool)
            .await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if id == user.user_id {
        return Err(AppError::Validation("Cannot delete your own account".into()));
    }

    let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role != 'admin'")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "User not found or cannot delete admin".into(),
        ));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "user_delete",
        Some("users"),
        Some(serde_json::json!({ "deleted_user_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("User deleted successfully"))
}

pub async fn update_user_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateUserStatusRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if id == user.user_id {
        return Err(AppError::Validation("Cannot change your own status".into()));
    }

    let status = match payload.status.as_deref() {
        Some(status @ ("active" | "suspended")) => status,
        _ => {
            return Err(AppError::Validation(
                "Invalid status. Must be active or suspended".into(),
            ));
        }
    };

    let result = sqlx::query(
        "UPDATE users SET status = $1, updated_at = now() WHERE id = $2 AND role != 'admin'",
    )
    .bind(status)
    .bind(id)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(
            "User not found or cannot suspend admin".into(),
        ));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "user_status_update",
        Some("users"),
        Some(serde_json::json!({ "target_user_id": id, "status": status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only(format!(
        "User {status} successfully"
    )))
}
