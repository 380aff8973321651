use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::OrderStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotel_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub hotel_id: i32,
    pub hotel_room_id: i32,
    pub quantity_adult: i32,
    pub quantity_infant: i32,
    pub number_of_nights: i32,
    pub date_start: Date,
    pub date_end: Date,
    /// Room price per night at booking time.
    pub price: i64,
    pub total_amount: i64,
    pub payment_id: i32,
    pub name_order: String,
    pub email_order: String,
    pub phone_number_order: String,
    pub special_request: String,
    #[sea_orm(unique)]
    pub hotel_order_code: String,
    pub is_check_in: bool,
    pub is_check_out: bool,
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
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    #[sea_orm(
        belongs_to = "super::hotel_room::Entity",
        from = "Column::HotelRoomId",
        to = "super::hotel_room::Column::Id"
    )]
    HotelRoom,
    #[sea_orm(has_many = "super::traveler_detail::Entity")]
    Travelers,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::hotel_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelRoom.def()
    }
}

impl Related<super::traveler_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Travelers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
