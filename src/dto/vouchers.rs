use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{DiscountType, Voucher};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateVoucherRequest {
    pub code: Option<String>,
    pub amount: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoucherSummary {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
}

/// Quote returned by voucher validation. Nothing is consumed at this point;
/// usage is only recorded when a transaction is created.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateVoucherResponse {
    pub valid: bool,
    pub voucher: VoucherSummary,
    pub original_amount: i64,
    pub discount_amount: i64,
    pub final_amount: i64,
}

/// What anonymous visitors see of an active voucher.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicVoucher {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_purchase: i64,
    pub max_usage: Option<i32>,
    pub current_usage: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct PublicVoucherList {
    #[schema(value_type = Vec<PublicVoucher>)]
    pub items: Vec<PublicVoucher>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVoucherRequest {
    pub code: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: Option<i64>,
    pub min_purchase: Option<i64>,
    pub max_usage: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Full update unless only `is_active` is present, which toggles the
/// voucher without touching the other fields.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVoucherRequest {
    pub code: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: Option<i64>,
    pub min_purchase: Option<i64>,
    pub max_usage: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedVoucher {
    pub voucher_id: Uuid,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct VoucherList {
    #[schema(value_type = Vec<Voucher>)]
    pub items: Vec<Voucher>,
}
