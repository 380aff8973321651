use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotel_room")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hotel_id: i32,
    pub name: String,
    pub size_of_room: f64,
    pub quantity_of_room: i32,
    pub description: String,
    pub normal_price: i64,
    /// Percentage, 0..=100.
    pub discount: i32,
    /// Derived from `normal_price` and `discount`, never set directly.
    pub discount_price: i64,
    pub number_of_guest: i32,
    pub mattress_size: String,
    pub number_of_mattress: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    #[sea_orm(has_many = "super::hotel_room_image::Entity")]
    HotelRoomImages,
    #[sea_orm(has_many = "super::hotel_room_facility::Entity")]
    HotelRoomFacilities,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotel.def()
    }
}

impl Related<super::hotel_room_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelRoomImages.def()
    }
}

impl Related<super::hotel_room_facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelRoomFacilities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
