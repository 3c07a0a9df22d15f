use uuid::Uuid;

use crate::dto::products::{ProductList, UpdateProductRequest};
use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Storefront catalog, active products only.
pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> =
        sqlx::query_as("SELECT * FROM products WHERE is_active = TRUE ORDER BY created_at DESC")
            .fetch_all(&state.pool)
            .await?;

    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(Meta::empty()),
    ))
}

/// Admin catalog, inactive products included.
pub async fn list_products_admin(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&state.pool)
        .await?;

    let items: Vec<Product> =
        sqlx::query_as("SELECT * FROM products ORDER BY created_at DESC LIMIT $1 OFFSET $2")
            .bind(limit)
            .bind(offset)
            .fetch_all(&state.pool)
            .await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;

    let (title, data_size, price) = match (
        payload.title.as_deref().filter(|v| !v.is_empty()),
        payload.data_size.as_deref().filter(|v| !v.is_empty()),
        payload.price,
    ) {
        (Some(t), Some(d), Some(p)) => (t, d, p),
        _ => return Err(AppError::Validation("Missing required fields".into())),
    };

    // is_active keeps its current value when the field is omitted.
    let product: Option<Product> = sqlx::query_as(
        r#"
        UPDATE products
        SET title = $1, data_size = $2, price = $3,
            is_active = COALESCE($4, is_active), updated_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(title)
    .bind(data_size)
    .bind(price)
    .bind(payload.is_active)
    .bind(id)
    .fetch_optional(&state.pool)
    .await?;

    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound("Product not found".into())),
    };

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product updated successfully",
        product,
        Some(Meta::empty()),
    ))
}
