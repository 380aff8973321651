use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A person travelling on an order. Bound to a ticket order or a hotel order, never both.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "traveler_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub ticket_order_id: Option<i32>,
    pub hotel_order_id: Option<i32>,
    pub title: String,
    pub full_name: String,
    pub id_card_number: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ticket_order::Entity",
        from = "Column::TicketOrderId",
        to = "super::ticket_order::Column::Id"
    )]
    TicketOrder,
    #[sea_orm(
        belongs_to = "super::hotel_order::Entity",
        from = "Column::HotelOrderId",
        to = "super::hotel_order::Column::Id"
    )]
    HotelOrder,
}

impl Related<super::ticket_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketOrder.def()
    }
}

impl Related<super::hotel_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
