use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Star class.
    pub class: i32,
    pub description: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hotel_room::Entity")]
    HotelRooms,
    #[sea_orm(has_many = "super::hotel_image::Entity")]
    HotelImages,
    #[sea_orm(has_many = "super::hotel_facility::Entity")]
    HotelFacilities,
    #[sea_orm(has_many = "super::hotel_order::Entity")]
    HotelOrders,
}

impl Related<super::hotel_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelRooms.def()
    }
}

impl Related<super::hotel_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelImages.def()
    }
}

impl Related<super::hotel_facility::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelFacilities.def()
    }
}

impl Related<super::hotel_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
