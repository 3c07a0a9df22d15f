use sea_orm::entity::prelude::*;

use crate::models::QuotaType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "extensions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub phone_number: String,
    pub expiry_date: Date,
    pub user_name: String,
    pub amount: i64,
    pub quota_type: QuotaType,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
