use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::extensions::{ExtensionList, ExtensionPayload},
    dto::products::{ProductList, UpdateProductRequest},
    dto::transactions::{
        AdminTransactionList, CreatedTransaction, ManualTransactionRequest, StatusUpdated,
        UpdateTransactionStatusRequest,
    },
    dto::users::{UpdateUserStatusRequest, UserList},
    dto::vouchers::{CreateVoucherRequest, CreatedVoucher, UpdateVoucherRequest, VoucherList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Extension, Product, Voucher},
    response::ApiResponse,
    routes::params::{DaysWindowQuery, Pagination},
    services::{
        extension_service, product_service, transaction_service, user_service, voucher_service,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/status", put(update_user_status))
        .route("/products", get(list_products))
        .route("/products/{id}", put(update_product))
        .route("/transactions", get(list_transactions))
        .route("/transactions/manual", post(create_manual_transaction))
        .route("/transactions/{id}", put(update_transaction_status))
        .route("/transactions/{id}", delete(delete_transaction))
        .route("/vouchers", get(list_vouchers))
        .route("/vouchers", post(create_voucher))
        .route("/vouchers/{id}", put(update_voucher))
        .route("/vouchers/{id}", delete(delete_voucher))
        .route("/extensions", get(list_extensions))
        .route("/extensions", post(create_extension))
        .route("/extensions/expiring-soon", get(list_expiring_extensions))
        .route("/extensions/expired", get(list_expired_extensions))
        .route("/extensions/{id}", put(update_extension))
        .route("/extensions/{id}", delete(delete_extension))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "All users, newest first", body = ApiResponse<UserList>),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = user_service::list_users(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Cannot delete your own account"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "User not found or cannot delete admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::delete_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/status",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "User activated or suspended"),
        (status = 400, description = "Invalid status or own account"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "User not found or cannot suspend admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::update_user_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "All products including inactive", body = ApiResponse<ProductList>),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products_admin(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "Missing required fields"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/transactions",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "Confirmed and manual transactions with buyer info", body = ApiResponse<AdminTransactionList>),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AdminTransactionList>>> {
    let resp = transaction_service::list_transactions_admin(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/transactions/manual",
    request_body = ManualTransactionRequest,
    responses(
        (status = 201, description = "Manual transaction recorded", body = ApiResponse<CreatedTransaction>),
        (status = 400, description = "Missing required fields or invalid status"),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_manual_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ManualTransactionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedTransaction>>)> {
    let resp = transaction_service::create_manual_transaction(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/transactions/{id}",
    params(
        ("id" = Uuid, Path, description = "Transaction ID")
    ),
    request_body = UpdateTransactionStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<StatusUpdated>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Transaction not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_transaction_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionStatusRequest>,
) -> AppResult<Json<ApiResponse<StatusUpdated>>> {
    let resp = transaction_service::update_transaction_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/transactions/{id}",
    params(
        ("id" = Uuid, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Transaction not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = transaction_service::delete_transaction(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/vouchers",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "All vouchers, newest first", body = ApiResponse<VoucherList>),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_vouchers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<VoucherList>>> {
    let resp = voucher_service::list_vouchers_admin(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/vouchers",
    request_body = CreateVoucherRequest,
    responses(
        (status = 201, description = "Voucher created", body = ApiResponse<CreatedVoucher>),
        (status = 400, description = "Missing fields, bad discount type, or duplicate code"),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_voucher(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateVoucherRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedVoucher>>)> {
    let resp = voucher_service::create_voucher(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/vouchers/{id}",
    params(
        ("id" = Uuid, Path, description = "Voucher ID")
    ),
    request_body = UpdateVoucherRequest,
    responses(
        (status = 200, description = "Updated voucher", body = ApiResponse<Voucher>),
        (status = 400, description = "Missing fields or duplicate code"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Voucher not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_voucher(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVoucherRequest>,
) -> AppResult<Json<ApiResponse<Voucher>>> {
    let resp = voucher_service::update_voucher(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/vouchers/{id}",
    params(
        ("id" = Uuid, Path, description = "Voucher ID")
    ),
    responses(
        (status = 200, description = "Voucher deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Voucher not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_voucher(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = voucher_service::delete_voucher(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/extensions",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "Extension records, soonest expiry first", body = ApiResponse<ExtensionList>),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_extensions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ExtensionList>>> {
    let resp = extension_service::list_extensions(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/extensions",
    request_body = ExtensionPayload,
    responses(
        (status = 201, description = "Extension recorded", body = ApiResponse<Extension>),
        (status = 400, description = "Missing required fields or invalid quota type"),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_extension(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ExtensionPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Extension>>)> {
    let resp = extension_service::create_extension(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/extensions/expiring-soon",
    params(
        ("days" = Option<i64>, Query, description = "Look-ahead window in days, default 7")
    ),
    responses(
        (status = 200, description = "Extensions running out within the window", body = ApiResponse<ExtensionList>),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_expiring_extensions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DaysWindowQuery>,
) -> AppResult<Json<ApiResponse<ExtensionList>>> {
    let resp = extension_service::list_expiring_soon(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/extensions/expired",
    responses(
        (status = 200, description = "Extensions past their expiry date", body = ApiResponse<ExtensionList>),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_expired_extensions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ExtensionList>>> {
    let resp = extension_service::list_expired(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/extensions/{id}",
    params(
        ("id" = Uuid, Path, description = "Extension ID")
    ),
    request_body = ExtensionPayload,
    responses(
        (status = 200, description = "Updated extension", body = ApiResponse<Extension>),
        (status = 400, description = "Missing required fields or invalid quota type"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Extension not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_extension(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExtensionPayload>,
) -> AppResult<Json<ApiResponse<Extension>>> {
    let resp = extension_service::update_extension(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/extensions/{id}",
    params(
        ("id" = Uuid, Path, description = "Extension ID")
    ),
    responses(
        (status = 200, description = "Extension deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Extension not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_extension(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = extension_service::delete_extension(&state, &user, id).await?;
    Ok(Json(resp))
}
