pub mod auth_service;
pub mod extension_service;
pub mod product_service;
pub mod transaction_service;
pub mod user_service;
pub mod voucher_service;
