use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::transactions::{CreateTransactionRequest, CreatedTransaction, TransactionList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::transaction_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_transaction))
        .route("/", get(list_transactions))
        .route("/{id}/confirm-payment", put(confirm_payment))
        .route("/{id}/confirm-whatsapp", put(confirm_whatsapp))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Checkout recorded", body = ApiResponse<CreatedTransaction>),
        (status = 400, description = "Missing fields or voucher usage limit reached"),
        (status = 401, description = "Access token required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedTransaction>>)> {
    let resp = transaction_service::create_transaction(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    responses(
        (status = 200, description = "Caller's confirmed transactions, newest first", body = ApiResponse<TransactionList>),
        (status = 401, description = "Access token required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<TransactionList>>> {
    let resp = transaction_service::list_user_transactions(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{id}/confirm-payment",
    params(
        ("id" = Uuid, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Payment flag set"),
        (status = 404, description = "Transaction not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn confirm_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = transaction_service::confirm_payment(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{id}/confirm-whatsapp",
    params(
        ("id" = Uuid, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "WhatsApp flag set"),
        (status = 404, description = "Transaction not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn confirm_whatsapp(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = transaction_service::confirm_whatsapp(&state, &user, id).await?;
    Ok(Json(resp))
}
