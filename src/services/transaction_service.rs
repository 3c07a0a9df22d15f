use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use crate::dto::transactions::{
    AdminTransaction, AdminTransactionList, CreateTransactionRequest, CreatedTransaction,
    ManualTransactionRequest, StatusUpdated, TransactionList, UpdateTransactionStatusRequest,
};
use crate::entity::transactions::{
    ActiveModel as TransactionActive, Column as TxCol, Entity as Transactions,
    Model as TransactionModel,
};
use crate::services::voucher_service;
use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Transaction, TransactionStatus},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Record a checkout. The insert and the voucher usage increment share one
/// transaction, so a voucher that hits its cap rolls the whole purchase
/// back.
pub async fn create_transaction(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTransactionRequest,
) -> AppResult<ApiResponse<CreatedTransaction>> {
    let (product_id, product_title, original_price, final_price, phone_number) = match (
        payload.product_id,
        payload.product_title.as_deref().filter(|v| !v.is_empty()),
        payload.original_price,
        payload.final_price,
        payload.phone_number.as_deref().filter(|v| !v.is_empty()),
    ) {
        (Some(id), Some(title), Some(original), Some(fin), Some(phone)) => {
            (id, title, original, fin, phone)
        }
        _ => return Err(AppError::Validation("Missing required fields".into())),
    };

    let voucher_code = payload
        .voucher_code
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let txn = state.orm.begin().await?;

    let transaction = TransactionActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(Some(user.user_id)),
        product_id: Set(Some(product_id)),
        product_title: Set(product_title.to_string()),
        product_data_size: Set(payload.product_data_size.clone().unwrap_or_default()),
        original_price: Set(original_price),
        voucher_code: Set(voucher_code.clone()),
        discount_amount: Set(payload.discount_amount.unwrap_or(0)),
        final_price: Set(final_price),
        phone_number: Set(phone_number.to_string()),
        payment_proof: Set(None),
        status: Set(TransactionStatus::Pending),
        qris_data: Set(payload.qris_data.clone()),
        admin_notes: Set(None),
        customer_name: Set(None),
        payment_confirmed: Set(false),
        whatsapp_confirmed: Set(false),
        payment_method: Set(payload
            .payment_method
            .clone()
            .unwrap_or_else(|| "qris".to_string())),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    if let Some(code) = voucher_code.as_deref() {
        voucher_service::record_usage(&txn, code).await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "checkout",
        Some("transactions"),
        Some(serde_json::json!({ "transaction_id": transaction.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Transaction created successfully",
        CreatedTransaction {
            transaction_id: transaction.id,
        },
        Some(Meta::empty()),
    ))
}

/// Purchases the owner has confirmed payment for. Unconfirmed checkouts
/// stay invisible until the customer presses "already paid".
pub async fn list_user_transactions(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<TransactionList>> {
    let items = Transactions::find()
        .filter(
            Condition::all()
                .add(TxCol::UserId.eq(user.user_id))
                .add(TxCol::PaymentConfirmed.eq(true)),
        )
        .order_by_desc(TxCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(transaction_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Transactions",
        TransactionList { items },
        Some(Meta::empty()),
    ))
}

/// Flip `payment_confirmed` for a transaction the caller owns. The flag only
/// ever goes from false to true.
pub async fn confirm_payment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Transactions::update_many()
        .col_expr(TxCol::PaymentConfirmed, Expr::value(true))
        .col_expr(TxCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(TxCol::Id.eq(id))
        .filter(TxCol::UserId.eq(user.user_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Transaction not found".into()));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "payment_confirm",
        Some("transactions"),
        Some(serde_json::json!({ "transaction_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only(
        "Payment confirmation updated successfully",
    ))
}

pub async fn confirm_whatsapp(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Transactions::update_many()
        .col_expr(TxCol::WhatsappConfirmed, Expr::value(true))
        .col_expr(TxCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(TxCol::Id.eq(id))
        .filter(TxCol::UserId.eq(user.user_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Transaction not found".into()));
    }

    Ok(ApiResponse::message_only(
        "WhatsApp confirmation updated successfully",
    ))
}

#[derive(Debug, sqlx::FromRow)]
struct AdminTxRow {
    id: Uuid,
    user_id: Option<Uuid>,
    product_name: String,
    amount: i64,
    voucher_code: Option<String>,
    payment_method: String,
    status: String,
    payment_proof: Option<String>,
    created_at: DateTime<Utc>,
    username: Option<String>,
    email: Option<String>,
}

/// Everything an admin should see: customer purchases once payment is
/// confirmed, plus all manual entries (`user_id IS NULL`).
pub async fn list_transactions_admin(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<AdminTransactionList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM transactions WHERE payment_confirmed = TRUE OR user_id IS NULL",
    )
    .fetch_one(&state.pool)
    .await?;

    let rows: Vec<AdminTxRow> = sqlx::query_as(
        r#"
        SELECT t.id, t.user_id, t.product_title AS product_name, t.final_price AS amount,
               t.voucher_code, t.payment_method, t.status, t.payment_proof, t.created_at,
               COALESCE(t.customer_name, u.username) AS username, u.email
        FROM transactions t
        LEFT JOIN users u ON t.user_id = u.id
        WHERE t.payment_confirmed = TRUE OR t.user_id IS NULL
        ORDER BY t.created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let items = rows
        .into_iter()
        .map(|row| {
            let status = TransactionStatus::parse_storage(&row.status).ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "unknown transaction status {:?}",
                    row.status
                ))
            })?;
            Ok(AdminTransaction {
                id: row.id,
                user_id: row.user_id,
                product_name: row.product_name,
                amount: row.amount,
                voucher_code: row.voucher_code,
                payment_method: row.payment_method,
                status: status.admin_label().to_string(),
                payment_proof: row.payment_proof,
                created_at: row.created_at,
                username: row.username,
                email: row.email,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Transactions",
        AdminTransactionList { items },
        Some(meta),
    ))
}

pub async fn update_transaction_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateTransactionStatusRequest,
) -> AppResult<ApiResponse<StatusUpdated>> {
    ensure_admin(user)?;

    let status = payload
        .status
        .as_deref()
        .and_then(TransactionStatus::parse_admin)
        .ok_or_else(|| AppError::Validation("Invalid status".into()))?;

    let existing = Transactions::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(t) => t,
        None => return Err(AppError::NotFound("Transaction not found".into())),
    };

    let mut active: TransactionActive = existing.into();
    active.status = Set(status);
    active.admin_notes = Set(payload.admin_notes);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "transaction_status_update",
        Some("transactions"),
        Some(serde_json::json!({
            "transaction_id": updated.id,
            "status": updated.status.as_str(),
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Transaction updated successfully",
        StatusUpdated {
            status: updated.status.as_str().to_string(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn delete_transaction(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let result = Transactions::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Transaction not found".into()));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "transaction_delete",
        Some("transactions"),
        Some(serde_json::json!({ "transaction_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Transaction deleted successfully"))
}

/// Record an off-platform sale. Manual entries carry no account or catalog
/// reference and are born confirmed so they show up in the admin list.
pub async fn create_manual_transaction(
    state: &AppState,
    user: &AuthUser,
    payload: ManualTransactionRequest,
) -> AppResult<ApiResponse<CreatedTransaction>> {
    ensure_admin(user)?;

    let (customer_name, product_name, amount) = match (
        payload.customer_name.as_deref().filter(|v| !v.is_empty()),
        payload.product_name.as_deref().filter(|v| !v.is_empty()),
        payload.amount,
    ) {
        (Some(customer), Some(product), Some(amount)) => (customer, product, amount),
        _ => return Err(AppError::Validation("Missing required fields".into())),
    };

    let status = match payload.status.as_deref() {
        None => TransactionStatus::Pending,
        Some(value) => TransactionStatus::parse_admin(value)
            .ok_or_else(|| AppError::Validation("Invalid status".into()))?,
    };

    let transaction = TransactionActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(None),
        product_id: Set(None),
        product_title: Set(product_name.to_string()),
        product_data_size: Set("Manual Entry".to_string()),
        original_price: Set(amount),
        voucher_code: Set(payload
            .voucher_code
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(str::to_string)),
        discount_amount: Set(0),
        final_price: Set(amount),
        phone_number: Set("Manual Entry".to_string()),
        payment_proof: Set(None),
        status: Set(status),
        qris_data: Set(None),
        admin_notes: Set(None),
        customer_name: Set(Some(customer_name.to_string())),
        payment_confirmed: Set(true),
        whatsapp_confirmed: Set(true),
        payment_method: NotSet,
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "manual_transaction_create",
        Some("transactions"),
        Some(serde_json::json!({ "transaction_id": transaction.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Manual transaction created successfully",
        CreatedTransaction {
            transaction_id: transaction.id,
        },
        Some(Meta::empty()),
    ))
}

fn transaction_from_entity(model: TransactionModel) -> Transaction {
    Transaction {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        product_title: model.product_title,
        product_data_size: model.product_data_size,
        original_price: model.original_price,
        voucher_code: model.voucher_code,
        discount_amount: model.discount_amount,
        final_price: model.final_price,
        phone_number: model.phone_number,
        payment_proof: model.payment_proof,
        status: model.status,
        qris_data: model.qris_data,
        admin_notes: model.admin_notes,
        customer_name: model.customer_name,
        payment_confirmed: model.payment_confirmed,
        whatsapp_confirmed: model.whatsapp_confirmed,
        payment_method: model.payment_method,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
