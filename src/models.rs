use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a transaction as stored. The admin panel speaks a different
/// vocabulary for two of the states; [`TransactionStatus::parse_admin`] and
/// [`TransactionStatus::admin_label`] translate between the two so an
/// unmapped state cannot slip through either direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "verified")]
    Verified,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl TransactionStatus {
    /// Storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Verified => "verified",
            TransactionStatus::Rejected => "rejected",
            TransactionStatus::Completed => "completed",
        }
    }

    /// Spelling shown to admins: `verified` reads as `confirmed` and
    /// `rejected` as `cancelled`.
    pub fn admin_label(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Verified => "confirmed",
            TransactionStatus::Rejected => "cancelled",
            TransactionStatus::Completed => "completed",
        }
    }

    /// Parse the admin vocabulary. Storage spellings are accepted too, so
    /// older clients that send `verified` or `rejected` keep working.
    pub fn parse_admin(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TransactionStatus::Pending),
            "confirmed" | "verified" => Some(TransactionStatus::Verified),
            "cancelled" | "rejected" => Some(TransactionStatus::Rejected),
            "completed" => Some(TransactionStatus::Completed),
            _ => None,
        }
    }

    /// Parse the storage spelling only.
    pub fn parse_storage(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TransactionStatus::Pending),
            "verified" => Some(TransactionStatus::Verified),
            "rejected" => Some(TransactionStatus::Rejected),
            "completed" => Some(TransactionStatus::Completed),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[sea_orm(string_value = "percentage")]
    Percentage,
    #[sea_orm(string_value = "fixed")]
    Fixed,
}

impl DiscountType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "percentage" => Some(DiscountType::Percentage),
            "fixed" => Some(DiscountType::Fixed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }
}

/// Quota class of an extension record, mirroring the carrier's packages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
pub enum QuotaType {
    #[sea_orm(string_value = "L")]
    L,
    #[sea_orm(string_value = "XL")]
    Xl,
    #[sea_orm(string_value = "XXL")]
    Xxl,
}

impl QuotaType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "L" => Some(QuotaType::L),
            "XL" => Some(QuotaType::Xl),
            "XXL" => Some(QuotaType::Xxl),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuotaType::L => "L",
            QuotaType::Xl => "XL",
            QuotaType::Xxl => "XXL",
        }
    }
}

/// Format a rupiah amount with thousand separators, `30000` -> `30.000`.
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Public projection of a user account. The password hash never leaves the
/// service layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub status: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub data_size: String,
    pub price: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Voucher {
    pub id: Uuid,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_purchase: i64,
    pub max_usage: Option<i32>,
    pub current_usage: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A purchase as the owning customer sees it. Prices are denormalized at
/// checkout so later product edits never rewrite history.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub product_title: String,
    pub product_data_size: String,
    pub original_price: i64,
    pub voucher_code: Option<String>,
    pub discount_amount: i64,
    pub final_price: i64,
    pub phone_number: String,
    pub payment_proof: Option<String>,
    pub status: TransactionStatus,
    pub qris_data: Option<String>,
    pub admin_notes: Option<String>,
    pub customer_name: Option<String>,
    pub payment_confirmed: bool,
    pub whatsapp_confirmed: bool,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Extension {
    pub id: Uuid,
    pub phone_number: String,
    pub expiry_date: NaiveDate,
    pub user_name: String,
    pub amount: i64,
    pub quota_type: QuotaType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
