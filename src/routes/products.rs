use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::products::ProductList,
    error::AppResult,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_products))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Active products, newest first", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state).await?;
    Ok(Json(resp))
}
