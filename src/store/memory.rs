//! Process-local store.
//!
//! Backs the test-suite. A transaction holds the state lock until it commits
//! or is dropped, and writes go to a staged copy, so readers never observe a
//! half-written order.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError};

use async_trait::async_trait;
use chrono::NaiveTime;
use sea_orm::prelude::DateTimeWithTimeZone;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{
    CatalogStore, HotelOrderQuery, NewHotelOrder, NewHotelRoom, NewNotification, NewTicketOrder,
    NewTicketTravelerDetail, NewTraveler, NewUser, OrderRepository, OrderTransaction,
    TicketOrderQuery, UserStore, Visibility,
};
use crate::domain::filter::OrderBy;
use crate::domain::{pricing, Actor};
use crate::entities::ticket_traveler_detail::SeatKey;
use crate::entities::train_carriage::TrainClass;
use crate::entities::user::UserRole;
use crate::entities::{
    hotel, hotel_facility, hotel_image, hotel_order, hotel_policy, hotel_room,
    hotel_room_facility, hotel_room_image, notification, payment, station, template_message,
    ticket_order, ticket_traveler_detail, train, train_carriage, train_seat, train_station,
    traveler_detail, user,
};
use crate::error::{AppError, AppResult};
use crate::utils::clock;

/// Every table, as plain rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub users: Vec<user::Model>,
    pub stations: Vec<station::Model>,
    pub trains: Vec<train::Model>,
    pub train_stations: Vec<train_station::Model>,
    pub train_carriages: Vec<train_carriage::Model>,
    pub train_seats: Vec<train_seat::Model>,
    pub hotels: Vec<hotel::Model>,
    pub hotel_rooms: Vec<hotel_room::Model>,
    pub hotel_images: Vec<hotel_image::Model>,
    pub hotel_facilities: Vec<hotel_facility::Model>,
    pub hotel_policies: Vec<hotel_policy::Model>,
    pub hotel_room_images: Vec<hotel_room_image::Model>,
    pub hotel_room_facilities: Vec<hotel_room_facility::Model>,
    pub payments: Vec<payment::Model>,
    pub template_messages: Vec<template_message::Model>,
    pub hotel_orders: Vec<hotel_order::Model>,
    pub ticket_orders: Vec<ticket_order::Model>,
    pub travelers: Vec<traveler_detail::Model>,
    pub ticket_traveler_details: Vec<ticket_traveler_detail::Model>,
    pub notifications: Vec<notification::Model>,
    /// Shared with every staged copy, so ids taken by a rolled-back
    /// transaction are not handed out again.
    pub sequences: Arc<Sequences>,
}

/// Last id issued per table.
#[derive(Debug, Default)]
pub struct Sequences(std::sync::Mutex<HashMap<&'static str, i32>>);

impl Sequences {
    /// Never below the largest id already in `rows`, which may have been
    /// written with an explicit id.
    fn next<T>(&self, table: &'static str, rows: &[T], id: impl Fn(&T) -> i32) -> i32 {
        let floor = rows.iter().map(id).max().unwrap_or(0);
        let mut issued = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let last = issued.entry(table).or_insert(0);
        *last = (*last).max(floor) + 1;
        *last
    }
}

const TEMPLATES: [(&str, &str); 6] = [
    ("Selamat Datang", "Halo [Nama Pengguna], selamat bergabung!"),
    (
        "Kata Sandi Diubah",
        "Halo [Nama Pengguna], kata sandi akun Anda telah diubah.",
    ),
    (
        "Profil Diperbarui",
        "Halo [Nama Pengguna], profil Anda telah diperbarui.",
    ),
    (
        "Menunggu Pembayaran",
        "Halo [Nama Pengguna], pesanan [Order Code] menunggu pembayaran.",
    ),
    (
        "Pembayaran Berhasil",
        "Halo [Nama Pengguna], pembayaran pesanan [Order Code] telah dikonfirmasi.",
    ),
    (
        "Pesanan Dibatalkan",
        "Halo [Nama Pengguna], pesanan [Order Code] telah dibatalkan.",
    ),
];

fn live<T>(deleted_at: &Option<DateTimeWithTimeZone>, row: T) -> Option<T> {
    deleted_at.is_none().then_some(row)
}

fn sort_rows<T>(
    rows: &mut [T],
    order_by: OrderBy,
    key: impl Fn(&T) -> (DateTimeWithTimeZone, i64, i32),
) {
    rows.sort_by(|a, b| {
        let (a_created, a_price, a_id) = key(a);
        let (b_created, b_price, b_id) = key(b);
        match order_by {
            OrderBy::Latest => b_created.cmp(&a_created).then(b_id.cmp(&a_id)),
            OrderBy::Oldest => a_created.cmp(&b_created).then(a_id.cmp(&b_id)),
            OrderBy::HighestPrice => b_price.cmp(&a_price).then(b_id.cmp(&a_id)),
            OrderBy::LowestPrice => a_price.cmp(&b_price).then(a_id.cmp(&b_id)),
        }
    });
}

fn paginate<T>(rows: Vec<T>, page: u64, limit: u64) -> (Vec<T>, u64) {
    let total = rows.len() as u64;
    let skip = page.saturating_sub(1).saturating_mul(limit);
    let items = rows
        .into_iter()
        .skip(usize::try_from(skip).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect();
    (items, total)
}

impl MemoryState {
    /// Empty tables except for the seeded template messages.
    pub fn new() -> Self {
        let now = clock::now();
        let template_messages = TEMPLATES
            .iter()
            .zip(1..)
            .map(|((title, content), id)| template_message::Model {
                id,
                title: title.to_string(),
                content: content.to_string(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            })
            .collect();

        Self {
            template_messages,
            ..Default::default()
        }
    }

    pub fn add_user(&mut self, full_name: &str, email: &str, role: UserRole) -> user::Model {
        let now = clock::now();
        let row = user::Model {
            id: self.sequences.next("users", &self.users, |r| r.id),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            role,
            phone_number: String::new(),
            profile_picture_url: String::new(),
            citizen: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.users.push(row.clone());
        row
    }

    pub fn add_station(&mut self, name: &str, origin: &str) -> station::Model {
        let now = clock::now();
        let initial: String = name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .collect();
        let row = station::Model {
            id: self.sequences.next("stations", &self.stations, |r| r.id),
            origin: origin.to_string(),
            name: name.to_string(),
            initial: initial.to_uppercase(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.stations.push(row.clone());
        row
    }

    pub fn add_train(&mut self, code_train: &str, name: &str) -> train::Model {
        let now = clock::now();
        let row = train::Model {
            id: self.sequences.next("trains", &self.trains, |r| r.id),
            code_train: code_train.to_string(),
            name: name.to_string(),
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.trains.push(row.clone());
        row
    }

    pub fn add_train_station(
        &mut self,
        train_id: i32,
        station_id: i32,
        arrive_time: NaiveTime,
    ) -> train_station::Model {
        let now = clock::now();
        let row = train_station::Model {
            id: self.sequences.next("train_stations", &self.train_stations, |r| r.id),
            train_id,
            station_id,
            arrive_time,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.train_stations.push(row.clone());
        row
    }

    pub fn add_carriage(
        &mut self,
        train_id: i32,
        class: TrainClass,
        name: &str,
        price: i64,
    ) -> train_carriage::Model {
        let now = clock::now();
        let row = train_carriage::Model {
            id: self.sequences.next("train_carriages", &self.train_carriages, |r| r.id),
            train_id,
            class,
            name: name.to_string(),
            price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.train_carriages.push(row.clone());
        row
    }

    pub fn add_seat(&mut self, class: TrainClass, name: &str) -> train_seat::Model {
        let now = clock::now();
        let row = train_seat::Model {
            id: self.sequences.next("train_seats", &self.train_seats, |r| r.id),
            class,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.train_seats.push(row.clone());
        row
    }

    pub fn add_hotel(&mut self, name: &str, class: i32) -> hotel::Model {
        let now = clock::now();
        let row = hotel::Model {
            id: self.sequences.next("hotels", &self.hotels, |r| r.id),
            name: name.to_string(),
            class,
            description: String::new(),
            phone_number: String::new(),
            email: String::new(),
            address: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.hotels.push(row.clone());
        row
    }

    /// Adds a room, deriving `discount_price` the way the admin API does.
    pub fn add_hotel_room(
        &mut self,
        hotel_id: i32,
        name: &str,
        normal_price: i64,
        discount: i32,
    ) -> hotel_room::Model {
        let now = clock::now();
        let row = hotel_room::Model {
            id: self.sequences.next("hotel_rooms", &self.hotel_rooms, |r| r.id),
            hotel_id,
            name: name.to_string(),
            size_of_room: 24.0,
            quantity_of_room: 10,
            description: String::new(),
            normal_price,
            discount,
            discount_price: pricing::discount_price(normal_price, discount)
                .unwrap_or(normal_price),
            number_of_guest: 2,
            mattress_size: "queen".to_string(),
            number_of_mattress: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.hotel_rooms.push(row.clone());
        row
    }

    pub fn add_hotel_image(&mut self, hotel_id: i32, image_url: &str) -> hotel_image::Model {
        let now = clock::now();
        let row = hotel_image::Model {
            id: self.sequences.next("hotel_images", &self.hotel_images, |r| r.id),
            hotel_id,
            image_url: image_url.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.hotel_images.push(row.clone());
        row
    }

    pub fn add_hotel_facility(&mut self, hotel_id: i32, name: &str) -> hotel_facility::Model {
        let now = clock::now();
        let row = hotel_facility::Model {
            id: self.sequences.next("hotel_facilities", &self.hotel_facilities, |r| r.id),
            hotel_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.hotel_facilities.push(row.clone());
        row
    }

    pub fn add_hotel_policy(&mut self, hotel_id: i32) -> hotel_policy::Model {
        let now = clock::now();
        let row = hotel_policy::Model {
            id: self.sequences.next("hotel_policies", &self.hotel_policies, |r| r.id),
            hotel_id,
            is_check_in_check_out: true,
            time_check_in: "14:00".to_string(),
            time_check_out: "12:00".to_string(),
            is_policy_minimum_age: false,
            policy_minimum_age: 0,
            is_pets_allowed: false,
            is_smoking_allowed: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.hotel_policies.push(row.clone());
        row
    }

    pub fn add_room_image(&mut self, hotel_room_id: i32, image_url: &str) -> hotel_room_image::Model {
        let now = clock::now();
        let row = hotel_room_image::Model {
            id: self.sequences.next(
                "hotel_room_images",
                &self.hotel_room_images,
                |r| r.id,
            ),
            hotel_room_id,
            image_url: image_url.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.hotel_room_images.push(row.clone());
        row
    }

    pub fn add_room_facility(&mut self, hotel_room_id: i32, name: &str) -> hotel_room_facility::Model {
        let now = clock::now();
        let row = hotel_room_facility::Model {
            id: self.sequences.next(
                "hotel_room_facilities",
                &self.hotel_room_facilities,
                |r| r.id,
            ),
            hotel_room_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.hotel_room_facilities.push(row.clone());
        row
    }

    pub fn add_payment(&mut self, name: &str) -> payment::Model {
        let now = clock::now();
        let row = payment::Model {
            id: self.sequences.next("payments", &self.payments, |r| r.id),
            payment_type: "bank_transfer".to_string(),
            image_url: String::new(),
            name: name.to_string(),
            account_name: "PT Travel".to_string(),
            account_number: "1234567890".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.payments.push(row.clone());
        row
    }

    fn seat_taken(&self, seat: SeatKey) -> bool {
        self.ticket_traveler_details
            .iter()
            .any(|d| d.holds_seat() && d.seat_key() == seat)
    }
}

#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::new())),
        }
    }

    /// Runs `f` against the live tables, outside any transaction.
    pub async fn seed<R>(&self, f: impl FnOnce(&mut MemoryState) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state)
    }

    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, new: NewUser) -> AppResult<user::Model> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == new.email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let mut row = state.add_user(&new.full_name, &new.email, new.role);
        row.password_hash = new.password_hash;
        row.phone_number = new.phone_number;
        row.citizen = new.citizen;
        if let Some(stored) = state.users.iter_mut().find(|u| u.id == row.id) {
            *stored = row.clone();
        }
        Ok(row)
    }

    async fn get_user(&self, id: i32) -> AppResult<Option<user::Model>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn get_train(&self, id: i32, visibility: Visibility) -> AppResult<Option<train::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .trains
            .iter()
            .find(|r| r.id == id && visibility.admits(r.deleted_at.as_ref()))
            .cloned())
    }

    async fn get_station(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<station::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .stations
            .iter()
            .find(|r| r.id == id && visibility.admits(r.deleted_at.as_ref()))
            .cloned())
    }

    async fn get_train_station(
        &self,
        train_id: i32,
        station_id: i32,
    ) -> AppResult<Option<train_station::Model>> {
        let state = self.state.lock().await;
        let mut rows: Vec<&train_station::Model> = state
            .train_stations
            .iter()
            .filter(|r| r.train_id == train_id && r.station_id == station_id)
            .collect();
        rows.sort_by_key(|r| (r.deleted_at.is_some(), r.id));
        Ok(rows.first().map(|r| (*r).clone()))
    }

    async fn list_train_stations(&self, train_id: i32) -> AppResult<Vec<train_station::Model>> {
        let state = self.state.lock().await;
        let mut rows: Vec<train_station::Model> = state
            .train_stations
            .iter()
            .filter_map(|r| live(&r.deleted_at, r))
            .filter(|r| r.train_id == train_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.arrive_time, r.id));
        Ok(rows)
    }

    async fn get_train_carriage(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<train_carriage::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .train_carriages
            .iter()
            .find(|r| r.id == id && visibility.admits(r.deleted_at.as_ref()))
            .cloned())
    }

    async fn get_train_seat(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<train_seat::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .train_seats
            .iter()
            .find(|r| r.id == id && visibility.admits(r.deleted_at.as_ref()))
            .cloned())
    }

    async fn get_hotel(&self, id: i32, visibility: Visibility) -> AppResult<Option<hotel::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotels
            .iter()
            .find(|r| r.id == id && visibility.admits(r.deleted_at.as_ref()))
            .cloned())
    }

    async fn get_hotel_room(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<hotel_room::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_rooms
            .iter()
            .find(|r| r.id == id && visibility.admits(r.deleted_at.as_ref()))
            .cloned())
    }

    async fn get_minimum_price_room_for_hotel(
        &self,
        hotel_id: i32,
    ) -> AppResult<Option<hotel_room::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_rooms
            .iter()
            .filter_map(|r| live(&r.deleted_at, r))
            .filter(|r| r.hotel_id == hotel_id)
            .min_by_key(|r| (r.discount_price, r.id))
            .cloned())
    }

    async fn list_rooms_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_rooms
            .iter()
            .filter(|r| r.hotel_id == hotel_id && visibility.admits(r.deleted_at.as_ref()))
            .cloned()
            .collect())
    }

    async fn list_images_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_image::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_images
            .iter()
            .filter(|r| r.hotel_id == hotel_id && visibility.admits(r.deleted_at.as_ref()))
            .cloned()
            .collect())
    }

    async fn list_facilities_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_facility::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_facilities
            .iter()
            .filter(|r| r.hotel_id == hotel_id && visibility.admits(r.deleted_at.as_ref()))
            .cloned()
            .collect())
    }

    async fn get_policy_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<hotel_policy::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_policies
            .iter()
            .find(|r| r.hotel_id == hotel_id && visibility.admits(r.deleted_at.as_ref()))
            .cloned())
    }

    async fn list_images_for_room(
        &self,
        hotel_room_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room_image::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_room_images
            .iter()
            .filter(|r| {
                r.hotel_room_id == hotel_room_id && visibility.admits(r.deleted_at.as_ref())
            })
            .cloned()
            .collect())
    }

    async fn list_facilities_for_room(
        &self,
        hotel_room_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room_facility::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_room_facilities
            .iter()
            .filter(|r| {
                r.hotel_room_id == hotel_room_id && visibility.admits(r.deleted_at.as_ref())
            })
            .cloned()
            .collect())
    }

    async fn get_payment(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<payment::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .payments
            .iter()
            .find(|r| r.id == id && visibility.admits(r.deleted_at.as_ref()))
            .cloned())
    }

    async fn get_template_message(&self, id: i32) -> AppResult<Option<template_message::Model>> {
        let state = self.state.lock().await;
        Ok(state.template_messages.iter().find(|r| r.id == id).cloned())
    }

    async fn create_hotel_room(&self, new: NewHotelRoom) -> AppResult<hotel_room::Model> {
        let mut state = self.state.lock().await;
        let now = clock::now();
        let row = hotel_room::Model {
            id: state.sequences.next("hotel_rooms", &state.hotel_rooms, |r| r.id),
            hotel_id: new.hotel_id,
            name: new.name,
            size_of_room: new.size_of_room,
            quantity_of_room: new.quantity_of_room,
            description: new.description,
            normal_price: new.normal_price,
            discount: new.discount,
            discount_price: new.discount_price,
            number_of_guest: new.number_of_guest,
            mattress_size: new.mattress_size,
            number_of_mattress: new.number_of_mattress,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.hotel_rooms.push(row.clone());
        Ok(row)
    }

    async fn update_hotel_room(&self, room: hotel_room::Model) -> AppResult<hotel_room::Model> {
        let mut state = self.state.lock().await;
        let stored = state
            .hotel_rooms
            .iter_mut()
            .find(|r| r.id == room.id && r.deleted_at.is_none())
            .ok_or_else(|| AppError::NotFound("Hotel room not found".to_string()))?;
        *stored = hotel_room::Model {
            updated_at: clock::now(),
            ..room
        };
        Ok(stored.clone())
    }

    async fn soft_delete_hotel_room(&self, id: i32) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state
            .hotel_rooms
            .iter_mut()
            .find(|r| r.id == id && r.deleted_at.is_none())
        {
            Some(room) => {
                room.deleted_at = Some(clock::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn OrderTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, staged }))
    }

    async fn get_ticket_order(
        &self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<ticket_order::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .ticket_orders
            .iter()
            .find(|o| o.id == id && o.deleted_at.is_none() && actor.can_access(o.user_id))
            .cloned())
    }

    async fn get_hotel_order(
        &self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<hotel_order::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .hotel_orders
            .iter()
            .find(|o| o.id == id && o.deleted_at.is_none() && actor.can_access(o.user_id))
            .cloned())
    }

    async fn list_hotel_orders(
        &self,
        actor: &Actor,
        query: &HotelOrderQuery,
    ) -> AppResult<(Vec<hotel_order::Model>, u64)> {
        let state = self.state.lock().await;
        let mut rows: Vec<hotel_order::Model> = state
            .hotel_orders
            .iter()
            .filter(|o| o.deleted_at.is_none() && actor.can_access(o.user_id))
            .filter(|o| query.status.is_none_or(|status| o.status == status))
            .filter(|o| {
                query
                    .date_range
                    .is_none_or(|range| range.contains(o.date_start))
            })
            .filter(|o| match query.min_rating_class {
                Some(min) => state
                    .hotels
                    .iter()
                    .any(|h| h.id == o.hotel_id && h.class >= min),
                None => true,
            })
            .cloned()
            .collect();

        sort_rows(&mut rows, query.order_by, |o| {
            (o.created_at, o.price, o.id)
        });
        Ok(paginate(rows, query.page, query.limit))
    }

    async fn list_ticket_orders(
        &self,
        actor: &Actor,
        query: &TicketOrderQuery,
    ) -> AppResult<(Vec<ticket_order::Model>, u64)> {
        let state = self.state.lock().await;
        let mut rows: Vec<ticket_order::Model> = state
            .ticket_orders
            .iter()
            .filter(|o| o.deleted_at.is_none() && actor.can_access(o.user_id))
            .filter(|o| query.status.is_none_or(|status| o.status == status))
            .cloned()
            .collect();

        sort_rows(&mut rows, query.order_by, |o| {
            (o.created_at, o.price, o.id)
        });
        Ok(paginate(rows, query.page, query.limit))
    }

    async fn list_travelers_for_hotel_order(
        &self,
        hotel_order_id: i32,
    ) -> AppResult<Vec<traveler_detail::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .travelers
            .iter()
            .filter(|t| t.hotel_order_id == Some(hotel_order_id) && t.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn list_travelers_for_ticket_order(
        &self,
        ticket_order_id: i32,
    ) -> AppResult<Vec<traveler_detail::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .travelers
            .iter()
            .filter(|t| t.ticket_order_id == Some(ticket_order_id) && t.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn list_ticket_traveler_details(
        &self,
        ticket_order_id: i32,
    ) -> AppResult<Vec<ticket_traveler_detail::Model>> {
        let state = self.state.lock().await;
        Ok(state
            .ticket_traveler_details
            .iter()
            .filter(|d| d.ticket_order_id == ticket_order_id && d.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn list_notifications(&self, user_id: i32) -> AppResult<Vec<notification::Model>> {
        let state = self.state.lock().await;
        let mut rows: Vec<notification::Model> = state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && n.deleted_at.is_none())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl OrderTransaction for MemoryTransaction {
    async fn create_hotel_order(&mut self, new: NewHotelOrder) -> AppResult<hotel_order::Model> {
        if self
            .staged
            .hotel_orders
            .iter()
            .any(|o| o.hotel_order_code == new.hotel_order_code)
        {
            return Err(AppError::Conflict("Duplicate hotel order code".to_string()));
        }

        let now = clock::now();
        let row = hotel_order::Model {
            id: self.staged.sequences.next("hotel_orders", &self.staged.hotel_orders, |r| r.id),
            user_id: new.user_id,
            hotel_id: new.hotel_id,
            hotel_room_id: new.hotel_room_id,
            quantity_adult: new.quantity_adult,
            quantity_infant: new.quantity_infant,
            number_of_nights: new.number_of_nights,
            date_start: new.date_start,
            date_end: new.date_end,
            price: new.price,
            total_amount: new.total_amount,
            payment_id: new.payment_id,
            name_order: new.name_order,
            email_order: new.email_order,
            phone_number_order: new.phone_number_order,
            special_request: new.special_request,
            hotel_order_code: new.hotel_order_code,
            is_check_in: false,
            is_check_out: false,
            status: new.status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.staged.hotel_orders.push(row.clone());
        Ok(row)
    }

    async fn create_ticket_order(
        &mut self,
        new: NewTicketOrder,
    ) -> AppResult<ticket_order::Model> {
        if self
            .staged
            .ticket_orders
            .iter()
            .any(|o| o.ticket_order_code == new.ticket_order_code)
        {
            return Err(AppError::Conflict("Duplicate ticket order code".to_string()));
        }

        let now = clock::now();
        let row = ticket_order::Model {
            id: self.staged.sequences.next("ticket_orders", &self.staged.ticket_orders, |r| r.id),
            user_id: new.user_id,
            quantity_adult: new.quantity_adult,
            quantity_infant: new.quantity_infant,
            price: new.price,
            total_amount: new.total_amount,
            with_return: new.with_return,
            payment_id: new.payment_id,
            name_order: new.name_order,
            email_order: new.email_order,
            phone_number_order: new.phone_number_order,
            ticket_order_code: new.ticket_order_code,
            status: new.status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.staged.ticket_orders.push(row.clone());
        Ok(row)
    }

    async fn create_traveler(&mut self, new: NewTraveler) -> AppResult<traveler_detail::Model> {
        let now = clock::now();
        let row = traveler_detail::Model {
            id: self.staged.sequences.next("travelers", &self.staged.travelers, |r| r.id),
            user_id: new.user_id,
            ticket_order_id: new.owner.ticket_order_id(),
            hotel_order_id: new.owner.hotel_order_id(),
            title: new.title,
            full_name: new.full_name,
            id_card_number: new.id_card_number,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.staged.travelers.push(row.clone());
        Ok(row)
    }

    async fn create_ticket_traveler_detail(
        &mut self,
        new: NewTicketTravelerDetail,
    ) -> AppResult<ticket_traveler_detail::Model> {
        if self
            .staged
            .ticket_traveler_details
            .iter()
            .any(|d| d.boarding_ticket_code == new.boarding_ticket_code)
        {
            return Err(AppError::Conflict("Duplicate boarding ticket code".to_string()));
        }

        let seat = SeatKey {
            train_id: new.train_id,
            train_carriage_id: new.train_carriage_id,
            train_seat_id: new.train_seat_id,
            date_of_departure: new.date_of_departure,
        };
        if self.staged.seat_taken(seat) {
            return Err(AppError::Validation("Seat is already booked".to_string()));
        }

        let now = clock::now();
        let row = ticket_traveler_detail::Model {
            id: self.staged.sequences.next(
                "ticket_traveler_details",
                &self.staged.ticket_traveler_details,
                |r| r.id,
            ),
            ticket_order_id: new.ticket_order_id,
            traveler_detail_id: new.traveler_detail_id,
            train_id: new.train_id,
            train_carriage_id: new.train_carriage_id,
            train_seat_id: new.train_seat_id,
            station_origin_id: new.station_origin_id,
            station_destination_id: new.station_destination_id,
            leg: new.leg,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            date_of_departure: new.date_of_departure,
            boarding_ticket_code: new.boarding_ticket_code,
            released: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.staged.ticket_traveler_details.push(row.clone());
        Ok(row)
    }

    async fn create_notification(
        &mut self,
        new: NewNotification,
    ) -> AppResult<notification::Model> {
        let now = clock::now();
        let row = notification::Model {
            id: self.staged.sequences.next(
                "notifications",
                &self.staged.notifications,
                |r| r.id,
            ),
            user_id: new.user_id,
            template_message_id: new.template_message_id,
            hotel_order_id: new.hotel_order_id,
            ticket_order_id: new.ticket_order_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.staged.notifications.push(row.clone());
        Ok(row)
    }

    async fn seat_taken(&mut self, seat: SeatKey) -> AppResult<bool> {
        Ok(self.staged.seat_taken(seat))
    }

    async fn release_seats(&mut self, ticket_order_id: i32) -> AppResult<u64> {
        let now = clock::now();
        let mut released = 0;
        for detail in self
            .staged
            .ticket_traveler_details
            .iter_mut()
            .filter(|d| d.ticket_order_id == ticket_order_id && !d.released)
        {
            detail.released = true;
            detail.updated_at = now;
            released += 1;
        }
        Ok(released)
    }

    async fn lock_hotel_order(
        &mut self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<hotel_order::Model>> {
        Ok(self
            .staged
            .hotel_orders
            .iter()
            .find(|o| o.id == id && o.deleted_at.is_none() && actor.can_access(o.user_id))
            .cloned())
    }

    async fn lock_ticket_order(
        &mut self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<ticket_order::Model>> {
        Ok(self
            .staged
            .ticket_orders
            .iter()
            .find(|o| o.id == id && o.deleted_at.is_none() && actor.can_access(o.user_id))
            .cloned())
    }

    async fn update_hotel_order(
        &mut self,
        order: hotel_order::Model,
    ) -> AppResult<hotel_order::Model> {
        let stored = self
            .staged
            .hotel_orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| AppError::NotFound("Hotel order not found".to_string()))?;
        *stored = hotel_order::Model {
            updated_at: clock::now(),
            ..order
        };
        Ok(stored.clone())
    }

    async fn update_ticket_order(
        &mut self,
        order: ticket_order::Model,
    ) -> AppResult<ticket_order::Model> {
        let stored = self
            .staged
            .ticket_orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| AppError::NotFound("Ticket order not found".to_string()))?;
        *stored = ticket_order::Model {
            updated_at: clock::now(),
            ..order
        };
        Ok(stored.clone())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}
