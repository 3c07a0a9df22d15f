use sea_orm::entity::prelude::*;

use crate::models::TransactionStatus;

/// Product fields are denormalized copies taken at checkout time, so a
/// transaction stays intact when the catalog row is edited or removed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
