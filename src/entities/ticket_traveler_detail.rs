use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::train_carriage::TrainClass;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_leg")]
#[serde(rename_all = "lowercase")]
pub enum TicketLeg {
    #[sea_orm(string_value = "departure")]
    Departure,
    #[sea_orm(string_value = "return")]
    Return,
}

/// A traveller's seat on one leg of a ticket order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_traveler_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ticket_order_id: i32,
    pub traveler_detail_id: i32,
    pub train_id: i32,
    pub train_carriage_id: i32,
    pub train_seat_id: i32,
    pub station_origin_id: i32,
    pub station_destination_id: i32,
    pub leg: TicketLeg,
    pub departure_time: Time,
    pub arrival_time: Time,
    pub date_of_departure: Date,
    #[sea_orm(unique)]
    pub boarding_ticket_code: String,
    /// Set once the owning order is canceled or refunded; the seat is free again.
    pub released: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

/// Partial unique index over `(train, carriage, seat, date)` for unreleased rows.
pub const LIVE_SEAT_INDEX: &str = "uq_ticket_traveler_detail_live_seat";

/// The physical seat a row occupies on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeatKey {
    pub train_id: i32,
    pub train_carriage_id: i32,
    pub train_seat_id: i32,
    pub date_of_departure: Date,
}

impl Model {
    /// Whether this row still occupies its seat.
    pub fn holds_seat(&self) -> bool {
        !self.released && self.deleted_at.is_none()
    }

    pub fn seat_key(&self) -> SeatKey {
        SeatKey {
            train_id: self.train_id,
            train_carriage_id: self.train_carriage_id,
            train_seat_id: self.train_seat_id,
            date_of_departure: self.date_of_departure,
        }
    }
}

/// Seats are named per class; a carriage only carries seats of its own class.
pub fn seat_fits_carriage(seat_class: TrainClass, carriage_class: TrainClass) -> bool {
    seat_class == carriage_class
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
        belongs_to = "super::traveler_detail::Entity",
        from = "Column::TravelerDetailId",
        to = "super::traveler_detail::Column::Id"
    )]
    TravelerDetail,
    #[sea_orm(
        belongs_to = "super::train::Entity",
        from = "Column::TrainId",
        to = "super::train::Column::Id"
    )]
    Train,
}

impl Related<super::ticket_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketOrder.def()
    }
}

impl Related<super::train::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Train.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
