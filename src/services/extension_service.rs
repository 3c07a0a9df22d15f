use chrono::{Duration, NaiveDate, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::dto::extensions::{ExtensionList, ExtensionPayload};
use crate::entity::extensions::{
    ActiveModel as ExtensionActive, Column as ExtCol, Entity as Extensions, Model as ExtensionModel,
};
use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Extension, QuotaType},
    response::{ApiResponse, Meta},
    routes::params::{DaysWindowQuery, Pagination},
    state::AppState,
};

struct ValidatedExtension {
    phone_number: String,
    expiry_date: NaiveDate,
    user_name: String,
    amount: i64,
    quota_type: QuotaType,
}

fn validate_payload(payload: &ExtensionPayload) -> AppResult<ValidatedExtension> {
    let (phone_number, expiry_date, user_name, amount, quota_type) = match (
        payload.phone_number.as_deref().filter(|v| !v.is_empty()),
        payload.expiry_date,
        payload.user_name.as_deref().filter(|v| !v.is_empty()),
        payload.amount,
        payload.quota_type.as_deref().filter(|v| !v.is_empty()),
    ) {
        (Some(phone), Some(date), Some(name), Some(amount), Some(quota)) => {
            (phone, date, name, amount, quota)
        }
        _ => return Err(AppError::Validation("Missing required fields".into())),
    };

    let quota_type =
        QuotaType::parse(quota_type).ok_or_else(|| AppError::Validation("Invalid quota type".into()))?;

    Ok(ValidatedExtension {
        phone_number: phone_number.to_string(),
        expiry_date,
        user_name: user_name.to_string(),
        amount,
        quota_type,
    })
}

/// All extension records, soonest expiry first.
pub async fn list_extensions(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ExtensionList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Extensions::find().order_by_asc(ExtCol::ExpiryDate);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(extension_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Extensions",
        ExtensionList { items },
        Some(meta),
    ))
}

pub async fn create_extension(
    state: &AppState,
    user: &AuthUser,
    payload: ExtensionPayload,
) -> AppResult<ApiResponse<Extension>> {
    ensure_admin(user)?;
    let validated = validate_payload(&payload)?;

    let extension = ExtensionActive {
        id: Set(Uuid::new_v4()),
        phone_number: Set(validated.phone_number),
        expiry_date: Set(validated.expiry_date),
        user_name: Set(validated.user_name),
        amount: Set(validated.amount),
        quota_type: Set(validated.quota_type),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "extension_create",
        Some("extensions"),
        Some(serde_json::json!({ "extension_id": extension.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Extension created successfully",
        extension_from_entity(extension),
        Some(Meta::empty()),
    ))
}

pub async fn update_extension(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ExtensionPayload,
) -> AppResult<ApiResponse<Extension>> {
    ensure_admin(user)?;
    let validated = validate_payload(&payload)?;

    let existing = Extensions::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(e) => e,
        None => return Err(AppError::NotFound("Extension not found".into())),
    };

    let mut active: ExtensionActive = existing.into();
    active.phone_number = Set(validated.phone_number);
    active.expiry_date = Set(validated.expiry_date);
    active.user_name = Set(validated.user_name);
    active.amount = Set(validated.amount);
    active.quota_type = Set(validated.quota_type);
    active.updated_at = Set(Utc::now().into());
    let extension = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "extension_update",
        Some("extensions"),
        Some(serde_json::json!({ "extension_id": extension.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Extension updated successfully",
        extension_from_entity(extension),
        Some(Meta::empty()),
    ))
}

pub async fn delete_extension(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let result = Extensions::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Extension not found".into()));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "extension_delete",
        Some("extensions"),
        Some(serde_json::json!({ "extension_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Extension deleted successfully"))
}

/// Extensions running out within the window, default seven days.
pub async fn list_expiring_soon(
    state: &AppState,
    user: &AuthUser,
    query: DaysWindowQuery,
) -> AppResult<ApiResponse<ExtensionList>> {
    ensure_admin(user)?;
    let days = query.days.unwrap_or(7).max(0);
    let today = Utc::now().date_naive();
    let until = today + Duration::days(days);

    let items = Extensions::find()
        .filter(
            Condition::all()
                .add(ExtCol::ExpiryDate.gte(today))
                .add(ExtCol::ExpiryDate.lte(until)),
        )
        .order_by_asc(ExtCol::ExpiryDate)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(extension_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Expiring soon",
        ExtensionList { items },
        Some(Meta::empty()),
    ))
}

pub async fn list_expired(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ExtensionList>> {
    ensure_admin(user)?;
    let today = Utc::now().date_naive();

    let items = Extensions::find()
        .filter(ExtCol::ExpiryDate.lt(today))
        .order_by_desc(ExtCol::ExpiryDate)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(extension_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Expired",
        ExtensionList { items },
        Some(Meta::empty()),
    ))
}

fn extension_from_entity(model: ExtensionModel) -> Extension {
    Extension {
        id: model.id,
        phone_number: model.phone_number,
        expiry_date: model.expiry_date,
        user_name: model.user_name,
        amount: model.amount,
        quota_type: model.quota_type,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
