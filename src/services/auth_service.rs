use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Full account row including the password hash. Never serialized; convert
/// with [`UserRow::into_public`] before anything leaves the service layer.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub status: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_public(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            phone: self.phone,
            address: self.address,
            role: self.role,
            status: self.status,
            avatar: self.avatar,
            created_at: self.created_at,
        }
    }
}

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub(crate) fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let (username, email, password, full_name) = match (
        required(&payload.username),
        required(&payload.email),
        required(&payload.password),
        required(&payload.full_name),
    ) {
        (Some(u), Some(e), Some(p), Some(f)) => (u, e, p, f),
        _ => return Err(AppError::Validation("All fields are required".into())),
    };

    let exist: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1 OR email = $2")
            .bind(username)
            .bind(email)
            .fetch_optional(&state.pool)
            .await?;

    if exist.is_some() {
        return Err(AppError::Conflict("Username or email already exists".into()));
    }

    let password_hash = hash_password(password)?;
    let id = Uuid::new_v4();

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, full_name, phone, address)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(payload.phone.as_deref())
    .bind(payload.address.as_deref())
    .fetch_one(&state.pool)
    .await?;

    let token = state.jwt.issue(user.id, &user.username, &user.role)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "User created successfully",
        AuthResponse { token, user },
        None,
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let (username, password) = match (required(&payload.username), required(&payload.password)) {
        (Some(u), Some(p)) => (u, p),
        _ => {
            return Err(AppError::Validation(
                "Username and password are required".into(),
            ));
        }
    };

    let user: Option<UserRow> =
        sqlx::query_as("SELECT * FROM users WHERE username = $1 OR email = $1")
            .bind(username)
            .fetch_optional(&state.pool)
            .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    if user.status == "suspended" {
        return Err(AppError::Forbidden(
            "Account suspended. Please contact administrator.".into(),
        ));
    }

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = state.jwt.issue(user.id, &user.username, &user.role)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let user = user.into_public();
    Ok(ApiResponse::success(
        "Login successful",
        AuthResponse { token, user },
        Some(Meta::empty()),
    ))
}

pub async fn current_user(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<User>> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(auth.user_id)
        .fetch_optional(&state.pool)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::NotFound("User not found".into())),
    };

    Ok(ApiResponse::success("Ok", user, Some(Meta::empty())))
}
