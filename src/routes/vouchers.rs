use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::vouchers::{PublicVoucherList, ValidateVoucherRequest, ValidateVoucherResponse},
    error::AppResult,
    response::ApiResponse,
    services::voucher_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vouchers))
        .route("/validate", post(validate_voucher))
}

#[utoipa::path(
    get,
    path = "/api/vouchers",
    responses(
        (status = 200, description = "Active, unexpired vouchers", body = ApiResponse<PublicVoucherList>)
    ),
    tag = "Vouchers"
)]
pub async fn list_vouchers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PublicVoucherList>>> {
    let resp = voucher_service::list_public_vouchers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/vouchers/validate",
    request_body = ValidateVoucherRequest,
    responses(
        (status = 200, description = "Voucher valid, discount priced", body = ApiResponse<ValidateVoucherResponse>),
        (status = 400, description = "Missing code/amount, usage limit, or minimum purchase"),
        (status = 404, description = "Invalid or expired voucher"),
    ),
    tag = "Vouchers"
)]
pub async fn validate_voucher(
    State(state): State<AppState>,
    Json(payload): Json<ValidateVoucherRequest>,
) -> AppResult<Json<ApiResponse<ValidateVoucherResponse>>> {
    let resp = voucher_service::validate_voucher(&state, payload).await?;
    Ok(Json(resp))
}
