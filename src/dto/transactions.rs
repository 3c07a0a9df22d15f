use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Transaction;

/// Checkout payload. Prices arrive from the client and are stored as sent;
/// the storefront prices in whole rupiah and revalidates vouchers
/// server-side, but it does not re-derive `final_price` from the catalog.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub product_id: Option<Uuid>,
    pub product_title: Option<String>,
    pub product_data_size: Option<String>,
    pub original_price: Option<i64>,
    pub voucher_code: Option<String>,
    pub discount_amount: Option<i64>,
    pub final_price: Option<i64>,
    pub phone_number: Option<String>,
    pub qris_data: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedTransaction {
    pub transaction_id: Uuid,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionList {
    #[schema(value_type = Vec<Transaction>)]
    pub items: Vec<Transaction>,
}

/// Row in the admin transaction table. `status` is spelled in the admin
/// vocabulary and `username` falls back to the manual-entry customer name.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminTransaction {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub product_name: String,
    pub amount: i64,
    pub voucher_code: Option<String>,
    pub payment_method: String,
    pub status: String,
    pub payment_proof: Option<String>,
    pub created_at: DateTime<Utc>,
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct AdminTransactionList {
    #[schema(value_type = Vec<AdminTransaction>)]
    pub items: Vec<AdminTransaction>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTransactionStatusRequest {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusUpdated {
    pub status: String,
}

/// Off-platform sale recorded by an admin. It has no account or catalog
/// row behind it, so it is visible in the admin list from the start.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ManualTransactionRequest {
    pub customer_name: Option<String>,
    pub product_name: Option<String>,
    pub amount: Option<i64>,
    pub voucher_code: Option<String>,
    pub status: Option<String>,
}
