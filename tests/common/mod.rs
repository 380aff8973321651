#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};

use travel_booking_backend::domain::{Actor, OrderStatus};
use travel_booking_backend::entities::train_carriage::TrainClass;
use travel_booking_backend::entities::user::UserRole;
use travel_booking_backend::entities::{hotel_order, traveler_detail};
use travel_booking_backend::services::booking::{
    CreateHotelOrderRequest, CreateTicketOrderRequest, TicketDetailRequest, TravelerRequest,
};
use travel_booking_backend::store::InMemoryStore;
use travel_booking_backend::store::memory::MemoryState;
use travel_booking_backend::utils::clock;

pub const ADMIN_ID: i32 = 1;

pub fn admin() -> Actor {
    Actor::admin(ADMIN_ID)
}

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Adds a user and gives it a fixed id.
pub fn user_with_id(state: &mut MemoryState, id: i32, name: &str, role: UserRole) {
    state.add_user(name, &format!("{}@example.com", name.to_lowercase()), role);
    state.users.last_mut().unwrap().id = id;
}

/// A store with the administrator (id 1) and end users 5, 6 and 42.
pub async fn store_with_users() -> InMemoryStore {
    let store = InMemoryStore::new();
    store
        .seed(|s| {
            user_with_id(s, ADMIN_ID, "Admin", UserRole::Admin);
            user_with_id(s, 5, "Lima", UserRole::User);
            user_with_id(s, 6, "Enam", UserRole::User);
            user_with_id(s, 42, "Budi", UserRole::User);
        })
        .await;
    store
}

#[derive(Debug, Clone, Copy)]
pub struct HotelCatalog {
    pub hotel_id: i32,
    pub room_id: i32,
    pub payment_id: i32,
}

/// Hotel "Grand Sari" with room 7 (500_000, 20% off) and payment 3.
pub async fn seed_hotel_catalog(store: &InMemoryStore) -> HotelCatalog {
    store
        .seed(|s| {
            let hotel = s.add_hotel("Grand Sari", 4);
            s.add_hotel_image(hotel.id, "https://img.example/hotel.jpg");
            s.add_hotel_facility(hotel.id, "Kolam Renang");
            s.add_hotel_policy(hotel.id);

            s.add_hotel_room(hotel.id, "Standard", 300_000, 0);
            s.hotel_rooms.last_mut().unwrap().id = 6;
            s.add_hotel_room(hotel.id, "Deluxe", 500_000, 20);
            s.hotel_rooms.last_mut().unwrap().id = 7;
            s.add_room_image(7, "https://img.example/deluxe.jpg");
            s.add_room_facility(7, "AC");

            s.add_payment("BCA");
            s.add_payment("Mandiri");
            s.add_payment("BNI");

            HotelCatalog {
                hotel_id: hotel.id,
                room_id: 7,
                payment_id: 3,
            }
        })
        .await
}

pub fn traveler(full_name: &str) -> TravelerRequest {
    TravelerRequest {
        title: "Tuan".to_string(),
        full_name: full_name.to_string(),
        id_card_number: Some("X".to_string()),
    }
}

pub fn hotel_request(catalog: HotelCatalog, date_start: &str, date_end: &str) -> CreateHotelOrderRequest {
    CreateHotelOrderRequest {
        hotel_room_id: catalog.room_id,
        quantity_adult: 1,
        quantity_infant: 0,
        date_start: date_start.to_string(),
        date_end: date_end.to_string(),
        payment_id: catalog.payment_id,
        name_order: "A".to_string(),
        email_order: "a@example.com".to_string(),
        phone_number_order: "08123456789".to_string(),
        special_request: String::new(),
        traveler_detail: vec![traveler("A")],
    }
}

/// Two trains over stations 1, 2, 3.
///
/// Train 1 runs 1 -> 2 -> 3 with an Ekonomi carriage (1) and an Eksekutif
/// carriage (2); train 2 runs 3 -> 2 -> 1 with an Ekonomi carriage (3).
/// Seats 1 and 2 are Ekonomi, seat 3 is Eksekutif.
#[derive(Debug, Clone, Copy)]
pub struct TrainCatalog {
    pub outbound_train: i32,
    pub return_train: i32,
    pub economy_carriage: i32,
    pub executive_carriage: i32,
    pub return_carriage: i32,
    pub economy_seats: [i32; 2],
    pub executive_seat: i32,
    pub stations: [i32; 3],
    pub payment_id: i32,
}

pub async fn seed_train_catalog(store: &InMemoryStore) -> TrainCatalog {
    store
        .seed(|s| {
            let gambir = s.add_station("Gambir", "Jakarta");
            let cirebon = s.add_station("Cirebon", "Cirebon");
            let tugu = s.add_station("Tugu", "Yogyakarta");

            let outbound = s.add_train("KA-1", "Taksaka");
            s.add_train_station(outbound.id, gambir.id, time(8, 0));
            s.add_train_station(outbound.id, cirebon.id, time(10, 30));
            s.add_train_station(outbound.id, tugu.id, time(14, 0));

            let back = s.add_train("KA-2", "Taksaka Balik");
            s.add_train_station(back.id, tugu.id, time(9, 0));
            s.add_train_station(back.id, cirebon.id, time(12, 30));
            s.add_train_station(back.id, gambir.id, time(15, 0));

            let economy = s.add_carriage(outbound.id, TrainClass::Ekonomi, "EKO-1", 150_000);
            let executive = s.add_carriage(outbound.id, TrainClass::Eksekutif, "EKS-1", 400_000);
            let return_carriage = s.add_carriage(back.id, TrainClass::Ekonomi, "EKO-2", 120_000);

            let a1 = s.add_seat(TrainClass::Ekonomi, "A1");
            let a2 = s.add_seat(TrainClass::Ekonomi, "A2");
            let e1 = s.add_seat(TrainClass::Eksekutif, "E1");

            let payment = s.add_payment("BCA");

            TrainCatalog {
                outbound_train: outbound.id,
                return_train: back.id,
                economy_carriage: economy.id,
                executive_carriage: executive.id,
                return_carriage: return_carriage.id,
                economy_seats: [a1.id, a2.id],
                executive_seat: e1.id,
                stations: [gambir.id, cirebon.id, tugu.id],
                payment_id: payment.id,
            }
        })
        .await
}

pub fn outbound_seat(catalog: TrainCatalog, seat_id: i32, day: &str) -> TicketDetailRequest {
    TicketDetailRequest {
        train_id: catalog.outbound_train,
        train_carriage_id: catalog.economy_carriage,
        train_seat_id: seat_id,
        station_origin_id: catalog.stations[0],
        station_destination_id: catalog.stations[2],
        date: day.to_string(),
    }
}

pub fn return_seat(catalog: TrainCatalog, seat_id: i32, day: &str) -> TicketDetailRequest {
    TicketDetailRequest {
        train_id: catalog.return_train,
        train_carriage_id: catalog.return_carriage,
        train_seat_id: seat_id,
        station_origin_id: catalog.stations[2],
        station_destination_id: catalog.stations[0],
        date: day.to_string(),
    }
}

pub fn one_way_request(catalog: TrainCatalog, seat_id: i32) -> CreateTicketOrderRequest {
    CreateTicketOrderRequest {
        quantity_adult: 1,
        quantity_infant: 0,
        with_return: false,
        payment_id: catalog.payment_id,
        name_order: "Budi".to_string(),
        email_order: "budi@example.com".to_string(),
        phone_number_order: "08123456789".to_string(),
        traveler_detail: vec![traveler("Budi")],
        ticket_traveler_detail_departure: vec![outbound_seat(catalog, seat_id, "2024-03-01")],
        ticket_traveler_detail_return: vec![],
    }
}

/// Writes a hotel order straight into the tables, bypassing the booking flow.
#[allow(clippy::too_many_arguments)]
pub fn insert_hotel_order(
    state: &mut MemoryState,
    id: i32,
    user_id: i32,
    hotel_id: i32,
    hotel_room_id: i32,
    payment_id: i32,
    date_start: NaiveDate,
    price: i64,
    status: OrderStatus,
) -> hotel_order::Model {
    let now = clock::now();
    let order = hotel_order::Model {
        id,
        user_id,
        hotel_id,
        hotel_room_id,
        quantity_adult: 1,
        quantity_infant: 0,
        number_of_nights: 1,
        date_start,
        date_end: date_start,
        price,
        total_amount: price,
        payment_id,
        name_order: "Seed".to_string(),
        email_order: "seed@example.com".to_string(),
        phone_number_order: "0800".to_string(),
        special_request: String::new(),
        hotel_order_code: format!("hotel-order-seed-{}", id),
        is_check_in: false,
        is_check_out: false,
        status,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    state.hotel_orders.push(order.clone());
    order
}

pub fn insert_hotel_traveler(state: &mut MemoryState, order: &hotel_order::Model, full_name: &str) {
    let now = clock::now();
    let id = state.travelers.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    state.travelers.push(traveler_detail::Model {
        id,
        user_id: order.user_id,
        ticket_order_id: None,
        hotel_order_id: Some(order.id),
        title: "Nyonya".to_string(),
        full_name: full_name.to_string(),
        id_card_number: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    });
}
