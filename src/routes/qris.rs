use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    qris::QrisPayload,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateQrisRequest {
    pub amount: Option<i64>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}

#[utoipa::path(
    post,
    path = "/api/qris/generate",
    request_body = GenerateQrisRequest,
    responses(
        (status = 200, description = "Dynamic QR for the given amount", body = ApiResponse<QrisPayload>),
        (status = 400, description = "Amount required"),
        (status = 502, description = "Generator unavailable or rejected the request"),
    ),
    tag = "Qris"
)]
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQrisRequest>,
) -> AppResult<Json<ApiResponse<QrisPayload>>> {
    let amount = match payload.amount {
        Some(amount) if amount > 0 => amount,
        _ => return Err(AppError::Validation("Amount required".into())),
    };

    let qris = state.qris.generate(amount).await?;
    Ok(Json(ApiResponse::success(
        "QRIS generated",
        qris,
        Some(Meta::empty()),
    )))
}
