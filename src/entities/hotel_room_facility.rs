use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotel_room_facility")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hotel_room_id: i32,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hotel_room::Entity",
        from = "Column::HotelRoomId",
        to = "super::hotel_room::Column::Id"
    )]
    HotelRoom,
}

impl Related<super::hotel_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HotelRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
