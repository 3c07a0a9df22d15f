pub mod auth;
pub mod extensions;
pub mod products;
pub mod transactions;
pub mod users;
pub mod vouchers;
