use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::OrderStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub quantity_adult: i32,
    pub quantity_infant: i32,
    /// Fare per adult across all legs.
    pub price: i64,
    pub total_amount: i64,
    pub with_return: bool,
    pub payment_id: i32,
    pub name_order: String,
    pub email_order: String,
    pub phone_number_order: String,
    #[sea_orm(unique)]
    pub ticket_order_code: String,
    pub status: OrderStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::traveler_detail::Entity")]
    Travelers,
    #[sea_orm(has_many = "super::ticket_traveler_detail::Entity")]
    TicketTravelerDetails,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::traveler_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Travelers.def()
    }
}

impl Related<super::ticket_traveler_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketTravelerDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
