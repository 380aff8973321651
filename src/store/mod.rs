//! Persistence boundary.
//!
//! Services talk to storage only through the traits in this module. The
//! production implementation is [`sea::SeaOrmStore`]; tests run against
//! [`memory::InMemoryStore`].
//!
//! Order writes go through an [`OrderTransaction`]: nothing it writes is
//! visible to other callers until [`OrderTransaction::commit`] succeeds, and
//! dropping it without committing discards every write.

pub mod memory;
pub mod sea;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::filter::{DateRange, OrderBy};
use crate::domain::{Actor, OrderStatus};
use crate::entities::ticket_traveler_detail::{SeatKey, TicketLeg};
use crate::entities::user::UserRole;
use crate::entities::{
    hotel, hotel_facility, hotel_image, hotel_order, hotel_policy, hotel_room,
    hotel_room_facility, hotel_room_image, notification, payment, station, template_message,
    ticket_order, ticket_traveler_detail, train, train_carriage, train_seat, train_station,
    traveler_detail, user,
};
use crate::error::AppResult;

pub use memory::InMemoryStore;
pub use sea::SeaOrmStore;

/// Whether soft-deleted rows take part in a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only rows without `deleted_at`; used when booking.
    Live,
    /// Every row; used when hydrating orders placed against older catalog rows.
    WithDeleted,
}

impl Visibility {
    pub fn admits(self, deleted_at: Option<&sea_orm::prelude::DateTimeWithTimeZone>) -> bool {
        match self {
            Visibility::Live => deleted_at.is_none(),
            Visibility::WithDeleted => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub phone_number: String,
    pub citizen: String,
}

#[derive(Debug, Clone)]
pub struct NewHotelRoom {
    pub hotel_id: i32,
    pub name: String,
    pub size_of_room: f64,
    pub quantity_of_room: i32,
    pub description: String,
    pub normal_price: i64,
    pub discount: i32,
    pub discount_price: i64,
    pub number_of_guest: i32,
    pub mattress_size: String,
    pub number_of_mattress: i32,
}

#[derive(Debug, Clone)]
pub struct NewHotelOrder {
    pub user_id: i32,
    pub hotel_id: i32,
    pub hotel_room_id: i32,
    pub quantity_adult: i32,
    pub quantity_infant: i32,
    pub number_of_nights: i32,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub price: i64,
    pub total_amount: i64,
    pub payment_id: i32,
    pub name_order: String,
    pub email_order: String,
    pub phone_number_order: String,
    pub special_request: String,
    pub hotel_order_code: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct NewTicketOrder {
    pub user_id: i32,
    pub quantity_adult: i32,
    pub quantity_infant: i32,
    pub price: i64,
    pub total_amount: i64,
    pub with_return: bool,
    pub payment_id: i32,
    pub name_order: String,
    pub email_order: String,
    pub phone_number_order: String,
    pub ticket_order_code: String,
    pub status: OrderStatus,
}

/// The order a traveller is attached to. Exactly one kind, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelerOwner {
    TicketOrder(i32),
    HotelOrder(i32),
}

impl TravelerOwner {
    pub fn ticket_order_id(self) -> Option<i32> {
        match self {
            TravelerOwner::TicketOrder(id) => Some(id),
            TravelerOwner::HotelOrder(_) => None,
        }
    }

    pub fn hotel_order_id(self) -> Option<i32> {
        match self {
            TravelerOwner::HotelOrder(id) => Some(id),
            TravelerOwner::TicketOrder(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTraveler {
    pub user_id: i32,
    pub owner: TravelerOwner,
    pub title: String,
    pub full_name: String,
    pub id_card_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTicketTravelerDetail {
    pub ticket_order_id: i32,
    pub traveler_detail_id: i32,
    pub train_id: i32,
    pub train_carriage_id: i32,
    pub train_seat_id: i32,
    pub station_origin_id: i32,
    pub station_destination_id: i32,
    pub leg: TicketLeg,
    pub departure_time: chrono::NaiveTime,
    pub arrival_time: chrono::NaiveTime,
    pub date_of_departure: NaiveDate,
    pub boarding_ticket_code: String,
}

impl NewTicketTravelerDetail {
    pub fn seat_key(&self) -> SeatKey {
        SeatKey {
            train_id: self.train_id,
            train_carriage_id: self.train_carriage_id,
            train_seat_id: self.train_seat_id,
            date_of_departure: self.date_of_departure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: i32,
    pub template_message_id: i32,
    pub hotel_order_id: Option<i32>,
    pub ticket_order_id: Option<i32>,
}

/// Filters evaluated by storage when listing hotel orders.
#[derive(Debug, Clone)]
pub struct HotelOrderQuery {
    pub page: u64,
    pub limit: u64,
    pub status: Option<OrderStatus>,
    pub date_range: Option<DateRange>,
    pub min_rating_class: Option<i32>,
    pub order_by: OrderBy,
}

#[derive(Debug, Clone)]
pub struct TicketOrderQuery {
    pub page: u64,
    pub limit: u64,
    pub status: Option<OrderStatus>,
    pub order_by: OrderBy,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> AppResult<user::Model>;
    async fn get_user(&self, id: i32) -> AppResult<Option<user::Model>>;
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<user::Model>>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_train(&self, id: i32, visibility: Visibility) -> AppResult<Option<train::Model>>;
    async fn get_station(&self, id: i32, visibility: Visibility)
        -> AppResult<Option<station::Model>>;
    /// Prefers the live row but falls back to a soft-deleted one.
    async fn get_train_station(
        &self,
        train_id: i32,
        station_id: i32,
    ) -> AppResult<Option<train_station::Model>>;
    /// Live stops of a train ordered by scheduled arrival.
    async fn list_train_stations(&self, train_id: i32) -> AppResult<Vec<train_station::Model>>;
    async fn get_train_carriage(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<train_carriage::Model>>;
    async fn get_train_seat(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<train_seat::Model>>;

    async fn get_hotel(&self, id: i32, visibility: Visibility) -> AppResult<Option<hotel::Model>>;
    async fn get_hotel_room(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<hotel_room::Model>>;
    /// Live room with the lowest `discount_price`.
    async fn get_minimum_price_room_for_hotel(
        &self,
        hotel_id: i32,
    ) -> AppResult<Option<hotel_room::Model>>;
    async fn list_rooms_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room::Model>>;
    async fn list_images_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_image::Model>>;
    async fn list_facilities_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_facility::Model>>;
    async fn get_policy_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<hotel_policy::Model>>;
    async fn list_images_for_room(
        &self,
        hotel_room_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room_image::Model>>;
    async fn list_facilities_for_room(
        &self,
        hotel_room_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room_facility::Model>>;

    async fn get_payment(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<payment::Model>>;
    async fn get_template_message(&self, id: i32) -> AppResult<Option<template_message::Model>>;

    async fn create_hotel_room(&self, room: NewHotelRoom) -> AppResult<hotel_room::Model>;
    async fn update_hotel_room(&self, room: hotel_room::Model) -> AppResult<hotel_room::Model>;
    /// Returns `false` when there was no live room to delete.
    async fn soft_delete_hotel_room(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn begin(&self) -> AppResult<Box<dyn OrderTransaction>>;

    /// `None` when the order does not exist or `actor` may not see it.
    async fn get_ticket_order(
        &self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<ticket_order::Model>>;
    async fn get_hotel_order(&self, id: i32, actor: &Actor)
        -> AppResult<Option<hotel_order::Model>>;

    /// One page of orders visible to `actor`, plus the number of matching orders.
    async fn list_hotel_orders(
        &self,
        actor: &Actor,
        query: &HotelOrderQuery,
    ) -> AppResult<(Vec<hotel_order::Model>, u64)>;
    async fn list_ticket_orders(
        &self,
        actor: &Actor,
        query: &TicketOrderQuery,
    ) -> AppResult<(Vec<ticket_order::Model>, u64)>;

    async fn list_travelers_for_hotel_order(
        &self,
        hotel_order_id: i32,
    ) -> AppResult<Vec<traveler_detail::Model>>;
    async fn list_travelers_for_ticket_order(
        &self,
        ticket_order_id: i32,
    ) -> AppResult<Vec<traveler_detail::Model>>;
    async fn list_ticket_traveler_details(
        &self,
        ticket_order_id: i32,
    ) -> AppResult<Vec<ticket_traveler_detail::Model>>;

    /// Newest first.
    async fn list_notifications(&self, user_id: i32) -> AppResult<Vec<notification::Model>>;
}

#[async_trait]
pub trait OrderTransaction: Send {
    async fn create_hotel_order(&mut self, order: NewHotelOrder) -> AppResult<hotel_order::Model>;
    async fn create_ticket_order(&mut self, order: NewTicketOrder)
        -> AppResult<ticket_order::Model>;
    async fn create_traveler(&mut self, traveler: NewTraveler)
        -> AppResult<traveler_detail::Model>;
    async fn create_ticket_traveler_detail(
        &mut self,
        detail: NewTicketTravelerDetail,
    ) -> AppResult<ticket_traveler_detail::Model>;
    async fn create_notification(
        &mut self,
        notification: NewNotification,
    ) -> AppResult<notification::Model>;

    /// Whether an unreleased ticket row already occupies this seat.
    async fn seat_taken(&mut self, seat: SeatKey) -> AppResult<bool>;

    /// Frees every seat held by a ticket order. Returns the number of rows released.
    async fn release_seats(&mut self, ticket_order_id: i32) -> AppResult<u64>;

    /// Loads an order for modification, ownership-scoped like the plain getters.
    async fn lock_hotel_order(
        &mut self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<hotel_order::Model>>;
    async fn lock_ticket_order(
        &mut self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<ticket_order::Model>>;

    /// Overwrites the mutable fields of an existing order.
    async fn update_hotel_order(&mut self, order: hotel_order::Model)
        -> AppResult<hotel_order::Model>;
    async fn update_ticket_order(
        &mut self,
        order: ticket_order::Model,
    ) -> AppResult<ticket_order::Model>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}

/// Everything the services need from storage.
pub trait Store: UserStore + CatalogStore + OrderRepository {}

impl<T: UserStore + CatalogStore + OrderRepository> Store for T {}
