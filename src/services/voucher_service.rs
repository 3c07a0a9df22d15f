use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::dto::vouchers::{
    CreateVoucherRequest, CreatedVoucher, PublicVoucher, PublicVoucherList, UpdateVoucherRequest,
    ValidateVoucherRequest, ValidateVoucherResponse, VoucherList, VoucherSummary,
};
use crate::entity::vouchers::{
    ActiveModel as VoucherActive, Column as VoucherCol, Entity as Vouchers, Model as VoucherModel,
};
use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{DiscountType, Voucher, format_rupiah},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Discount for `amount`, clamped so it never exceeds the amount itself.
/// Percentage discounts round down to whole rupiah.
pub fn compute_discount(discount_type: DiscountType, discount_value: i64, amount: i64) -> i64 {
    match discount_type {
        DiscountType::Percentage => (amount * discount_value / 100).min(amount),
        DiscountType::Fixed => discount_value.min(amount),
    }
}

/// Check usage and minimum purchase, then price the discount. Pure; the
/// caller is responsible for only passing active, unexpired vouchers.
pub fn apply_voucher(voucher: &Voucher, amount: i64) -> AppResult<ValidateVoucherResponse> {
    if let Some(max_usage) = voucher.max_usage {
        if voucher.current_usage >= max_usage {
            return Err(AppError::Validation("Voucher usage limit reached".into()));
        }
    }

    if amount < voucher.min_purchase {
        return Err(AppError::Validation(format!(
            "Minimum purchase amount is Rp {}",
            format_rupiah(voucher.min_purchase)
        )));
    }

    let discount_amount = compute_discount(voucher.discount_type, voucher.discount_value, amount);
    let final_amount = (amount - discount_amount).max(0);

    Ok(ValidateVoucherResponse {
        valid: true,
        voucher: VoucherSummary {
            code: voucher.code.clone(),
            discount_type: voucher.discount_type,
            discount_value: voucher.discount_value,
        },
        original_amount: amount,
        discount_amount,
        final_amount,
    })
}

/// Condition matching vouchers a customer may currently use.
fn usable_condition() -> Condition {
    Condition::all().add(VoucherCol::IsActive.eq(true)).add(
        Condition::any()
            .add(VoucherCol::ExpiresAt.is_null())
            .add(VoucherCol::ExpiresAt.gt(Utc::now())),
    )
}

pub async fn list_public_vouchers(state: &AppState) -> AppResult<ApiResponse<PublicVoucherList>> {
    let items = Vouchers::find()
        .filter(usable_condition())
        .order_by_desc(VoucherCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|model| PublicVoucher {
            id: model.id,
            code: model.code,
            discount_type: model.discount_type,
            discount_value: model.discount_value,
            min_purchase: model.min_purchase,
            max_usage: model.max_usage,
            current_usage: model.current_usage,
            expires_at: model.expires_at.map(|dt| dt.with_timezone(&Utc)),
        })
        .collect();

    Ok(ApiResponse::success(
        "Vouchers",
        PublicVoucherList { items },
        Some(Meta::empty()),
    ))
}

/// Quote a voucher against a purchase amount. Read-only; usage is recorded
/// when the transaction is created.
pub async fn validate_voucher(
    state: &AppState,
    payload: ValidateVoucherRequest,
) -> AppResult<ApiResponse<ValidateVoucherResponse>> {
    let code = payload.code.as_deref().filter(|c| !c.is_empty());
    let (code, amount) = match (code, payload.amount) {
        (Some(code), Some(amount)) if amount > 0 => (code, amount),
        _ => {
            return Err(AppError::Validation(
                "Voucher code and amount required".into(),
            ));
        }
    };

    let voucher = Vouchers::find()
        .filter(usable_condition().add(VoucherCol::Code.eq(code)))
        .one(&state.orm)
        .await?;

    let voucher = match voucher {
        Some(v) => voucher_from_entity(v),
        None => return Err(AppError::NotFound("Invalid or expired voucher".into())),
    };

    let quote = apply_voucher(&voucher, amount)?;
    Ok(ApiResponse::success("Voucher valid", quote, Some(Meta::empty())))
}

/// Consume one usage of a voucher. The cap check and the increment are a
/// single conditional UPDATE, so concurrent checkouts cannot push
/// `current_usage` past `max_usage`.
pub async fn record_usage<C: ConnectionTrait>(conn: &C, code: &str) -> AppResult<()> {
    let result = Vouchers::update_many()
        .col_expr(
            VoucherCol::CurrentUsage,
            Expr::col(VoucherCol::CurrentUsage).add(1),
        )
        .filter(VoucherCol::Code.eq(code))
        .filter(
            Condition::any()
                .add(VoucherCol::MaxUsage.is_null())
                .add(Expr::col(VoucherCol::CurrentUsage).lt(Expr::col(VoucherCol::MaxUsage))),
        )
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::Validation("Voucher usage limit reached".into()));
    }

    Ok(())
}

pub async fn list_vouchers_admin(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<VoucherList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Vouchers::find().order_by_desc(VoucherCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(voucher_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Vouchers",
        VoucherList { items },
        Some(meta),
    ))
}

pub async fn create_voucher(
    state: &AppState,
    user: &AuthUser,
    payload: CreateVoucherRequest,
) -> AppResult<ApiResponse<CreatedVoucher>> {
    ensure_admin(user)?;

    let (code, discount_type, discount_value) = match (
        payload.code.as_deref().filter(|c| !c.is_empty()),
        payload.discount_type.as_deref().filter(|t| !t.is_empty()),
        payload.discount_value,
    ) {
        (Some(code), Some(ty), Some(value)) => (code, ty, value),
        _ => return Err(AppError::Validation("Missing required fields".into())),
    };

    let discount_type = DiscountType::parse(discount_type)
        .ok_or_else(|| AppError::Validation("Invalid discount type".into()))?;

    let exists = Vouchers::find()
        .filter(VoucherCol::Code.eq(code))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::Conflict("Voucher code already exists".into()));
    }

    let voucher = VoucherActive {
        id: Set(Uuid::new_v4()),
        code: Set(code.to_string()),
        discount_type: Set(discount_type),
        discount_value: Set(discount_value),
        min_purchase: Set(payload.min_purchase.unwrap_or(0)),
        max_usage: Set(payload.max_usage),
        current_usage: Set(0),
        expires_at: Set(payload.expires_at.map(Into::into)),
        is_active: Set(true),
        created_by: Set(Some(user.user_id)),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "voucher_create",
        Some("vouchers"),
        Some(serde_json::json!({ "voucher_id": voucher.id, "code": voucher.code })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Voucher created successfully",
        CreatedVoucher {
            voucher_id: voucher.id,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_voucher(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateVoucherRequest,
) -> AppResult<ApiResponse<Voucher>> {
    ensure_admin(user)?;

    // A body carrying nothing but is_active toggles the voucher in place.
    let toggle_only = payload.is_active.is_some()
        && payload.code.is_none()
        && payload.discount_type.is_none()
        && payload.discount_value.is_none()
        && payload.min_purchase.is_none()
        && payload.max_usage.is_none()
        && payload.expires_at.is_none();

    let existing = Vouchers::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(v) => v,
        None => return Err(AppError::NotFound("Voucher not found".into())),
    };

    if toggle_only {
        let mut active: VoucherActive = existing.into();
        active.is_active = Set(payload.is_active.unwrap_or(true));
        let voucher = active.update(&state.orm).await?;

        return Ok(ApiResponse::success(
            "Voucher status updated successfully",
            voucher_from_entity(voucher),
            Some(Meta::empty()),
        ));
    }

    let (discount_type, discount_value) = match (
        payload.discount_type.as_deref().filter(|t| !t.is_empty()),
        payload.discount_value,
    ) {
        (Some(ty), Some(value)) => (ty, value),
        _ => return Err(AppError::Validation("Missing required fields".into())),
    };

    let discount_type = DiscountType::parse(discount_type)
        .ok_or_else(|| AppError::Validation("Invalid discount type".into()))?;

    let code = payload
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(existing.code.as_str())
        .to_string();

    if code != existing.code {
        let taken = Vouchers::find()
            .filter(VoucherCol::Code.eq(code.as_str()))
            .one(&state.orm)
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict("Voucher code already exists".into()));
        }
    }

    let mut active: VoucherActive = existing.into();
    active.code = Set(code);
    active.discount_type = Set(discount_type);
    active.discount_value = Set(discount_value);
    active.min_purchase = Set(payload.min_purchase.unwrap_or(0));
    active.max_usage = Set(payload.max_usage);
    active.expires_at = Set(payload.expires_at.map(Into::into));
    active.is_active = Set(payload.is_active.unwrap_or(true));
    let voucher = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "voucher_update",
        Some("vouchers"),
        Some(serde_json::json!({ "voucher_id": voucher.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Voucher updated successfully",
        voucher_from_entity(voucher),
        Some(Meta::empty()),
    ))
}

pub async fn delete_voucher(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let result = Vouchers::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Voucher not found".into()));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "voucher_delete",
        Some("vouchers"),
        Some(serde_json::json!({ "voucher_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Voucher deleted successfully"))
}

fn voucher_from_entity(model: VoucherModel) -> Voucher {
    Voucher {
        id: model.id,
        code: model.code,
        discount_type: model.discount_type,
        discount_value: model.discount_value,
        min_purchase: model.min_purchase,
        max_usage: model.max_usage,
        current_usage: model.current_usage,
        expires_at: model.expires_at.map(|dt| dt.with_timezone(&Utc)),
        is_active: model.is_active,
        created_by: model.created_by,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
