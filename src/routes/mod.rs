use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod qris;
pub mod transactions;
pub mod users;
pub mod vouchers;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/vouchers", vouchers::router())
        .nest("/transactions", transactions::router())
        .nest("/qris", qris::router())
        .nest("/admin", admin::router())
}
