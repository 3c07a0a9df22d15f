use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Extension;

/// Create and update share one payload; every field is required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtensionPayload {
    pub phone_number: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub expiry_date: Option<NaiveDate>,
    pub user_name: Option<String>,
    pub amount: Option<i64>,
    pub quota_type: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ExtensionList {
    #[schema(value_type = Vec<Extension>)]
    pub items: Vec<Extension>,
}
