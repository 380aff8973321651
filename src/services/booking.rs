//! Hotel and ticket booking, and order status changes.
//!
//! Every booking is validated against the catalog first, then written in a
//! single [`OrderTransaction`]: the order, its travellers, its seat
//! assignments and the "unpaid" notification commit together or not at all.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use super::found;
use super::notification::{self, OrderRef};
use super::view::{self, HotelOrderView, TicketOrderView};
use crate::domain::codes::{self, CodeKind};
use crate::domain::status::transition;
use crate::domain::{pricing, Actor, OrderStatus};
use crate::entities::ticket_traveler_detail::{seat_fits_carriage, SeatKey, TicketLeg};
use crate::entities::train_carriage::TrainClass;
use crate::entities::traveler_detail;
use crate::error::{AppError, AppResult};
use crate::store::{
    NewHotelOrder, NewTicketOrder, NewTicketTravelerDetail, NewTraveler, OrderTransaction, Store,
    TravelerOwner, Visibility,
};

#[derive(Debug, Clone, Deserialize)]
pub struct TravelerRequest {
    pub title: String,
    pub full_name: String,
    #[serde(default)]
    pub id_card_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateHotelOrderRequest {
    pub hotel_room_id: i32,
    pub quantity_adult: i32,
    #[serde(default)]
    pub quantity_infant: i32,
    pub date_start: String,
    pub date_end: String,
    pub payment_id: i32,
    pub name_order: String,
    pub email_order: String,
    pub phone_number_order: String,
    #[serde(default)]
    pub special_request: String,
    #[serde(default)]
    pub traveler_detail: Vec<TravelerRequest>,
}

/// One traveller's seat on one leg.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketDetailRequest {
    pub train_id: i32,
    pub train_carriage_id: i32,
    pub train_seat_id: i32,
    pub station_origin_id: i32,
    pub station_destination_id: i32,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketOrderRequest {
    pub quantity_adult: i32,
    #[serde(default)]
    pub quantity_infant: i32,
    #[serde(default)]
    pub with_return: bool,
    pub payment_id: i32,
    pub name_order: String,
    pub email_order: String,
    pub phone_number_order: String,
    #[serde(default)]
    pub traveler_detail: Vec<TravelerRequest>,
    #[serde(default)]
    pub ticket_traveler_detail_departure: Vec<TicketDetailRequest>,
    #[serde(default)]
    pub ticket_traveler_detail_return: Vec<TicketDetailRequest>,
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::Validation(message.into())
}

fn require_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_contact(name: &str, email: &str, phone: &str) -> AppResult<()> {
    require_text(name, "name_order")?;
    require_text(email, "email_order")?;
    if !email.contains('@') {
        return Err(invalid("email_order is not a valid email"));
    }
    require_text(phone, "phone_number_order")
}

fn validate_travelers(travelers: &[TravelerRequest]) -> AppResult<()> {
    if travelers.is_empty() {
        return Err(invalid("traveler_detail must not be empty"));
    }
    for traveler in travelers {
        require_text(&traveler.title, "traveler_detail.title")?;
        require_text(&traveler.full_name, "traveler_detail.full_name")?;
    }
    Ok(())
}

impl CreateHotelOrderRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.hotel_room_id <= 0 {
            return Err(invalid("hotel_room_id is required"));
        }
        if self.quantity_adult < 1 {
            return Err(invalid("quantity_adult must be at least 1"));
        }
        if self.quantity_infant < 0 {
            return Err(invalid("quantity_infant must not be negative"));
        }
        if self.payment_id <= 0 {
            return Err(invalid("payment_id is required"));
        }
        validate_contact(&self.name_order, &self.email_order, &self.phone_number_order)?;
        validate_travelers(&self.traveler_detail)
    }
}

impl CreateTicketOrderRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.quantity_adult < 1 {
            return Err(invalid("quantity_adult must be at least 1"));
        }
        if self.quantity_infant < 0 {
            return Err(invalid("quantity_infant must not be negative"));
        }
        if self.payment_id <= 0 {
            return Err(invalid("payment_id is required"));
        }
        validate_contact(&self.name_order, &self.email_order, &self.phone_number_order)?;
        validate_travelers(&self.traveler_detail)?;

        let adults = self.quantity_adult as usize;
        if self.traveler_detail.len() < adults {
            return Err(invalid("traveler_detail must list every adult"));
        }
        if self.ticket_traveler_detail_departure.len() != adults {
            return Err(invalid(
                "ticket_traveler_detail_departure needs one seat per adult",
            ));
        }
        match (
            self.with_return,
            self.ticket_traveler_detail_return.len(),
        ) {
            (true, n) if n != adults => Err(invalid(
                "ticket_traveler_detail_return needs one seat per adult",
            )),
            (false, n) if n > 0 => Err(invalid(
                "ticket_traveler_detail_return given without with_return",
            )),
            _ => Ok(()),
        }
    }
}

pub async fn create_hotel_order(
    store: &dyn Store,
    actor: &Actor,
    req: CreateHotelOrderRequest,
) -> AppResult<HotelOrderView> {
    req.validate()?;

    let room = found(
        store.get_hotel_room(req.hotel_room_id, Visibility::Live).await?,
        "Hotel room",
        req.hotel_room_id,
    )?;
    let hotel = found(
        store.get_hotel(room.hotel_id, Visibility::Live).await?,
        "Hotel",
        room.hotel_id,
    )?;
    let payment = found(
        store.get_payment(req.payment_id, Visibility::Live).await?,
        "Payment",
        req.payment_id,
    )?;

    let date_start = pricing::parse_date(&req.date_start)?;
    let date_end = pricing::parse_date(&req.date_end)?;
    let number_of_nights = pricing::number_of_nights(date_start, date_end)?;
    let price = room.discount_price;
    let total_amount = pricing::hotel_total(price, number_of_nights);

    let mut tx = store.begin().await?;
    let order = tx
        .create_hotel_order(NewHotelOrder {
            user_id: actor.user_id,
            hotel_id: hotel.id,
            hotel_room_id: room.id,
            quantity_adult: req.quantity_adult,
            quantity_infant: req.quantity_infant,
            number_of_nights,
            date_start,
            date_end,
            price,
            total_amount,
            payment_id: payment.id,
            name_order: req.name_order,
            email_order: req.email_order,
            phone_number_order: req.phone_number_order,
            special_request: req.special_request,
            hotel_order_code: codes::generate(CodeKind::HotelOrder),
            status: OrderStatus::Unpaid,
        })
        .await?;

    create_travelers(
        tx.as_mut(),
        actor,
        TravelerOwner::HotelOrder(order.id),
        req.traveler_detail,
    )
    .await?;
    notification::record(tx.as_mut(), actor, OrderRef::Hotel(order.id), order.status).await?;
    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        user_id = actor.user_id,
        hotel_room_id = room.id,
        nights = number_of_nights,
        total_amount,
        "Hotel order created"
    );

    view::hotel_order_view(store, order).await
}

async fn create_travelers(
    tx: &mut dyn OrderTransaction,
    actor: &Actor,
    owner: TravelerOwner,
    travelers: Vec<TravelerRequest>,
) -> AppResult<Vec<traveler_detail::Model>> {
    let mut created = Vec::with_capacity(travelers.len());
    for traveler in travelers {
        created.push(
            tx.create_traveler(NewTraveler {
                user_id: actor.user_id,
                owner,
                title: traveler.title,
                full_name: traveler.full_name,
                id_card_number: traveler.id_card_number.filter(|s| !s.trim().is_empty()),
            })
            .await?,
        );
    }
    Ok(created)
}

/// A seat request checked against the catalog.
#[derive(Debug, Clone)]
struct ResolvedSeat {
    train_id: i32,
    train_carriage_id: i32,
    train_seat_id: i32,
    station_origin_id: i32,
    station_destination_id: i32,
    date: NaiveDate,
    departure_time: NaiveTime,
    arrival_time: NaiveTime,
    class: TrainClass,
    fare: i64,
}

impl ResolvedSeat {
    fn seat_key(&self) -> SeatKey {
        SeatKey {
            train_id: self.train_id,
            train_carriage_id: self.train_carriage_id,
            train_seat_id: self.train_seat_id,
            date_of_departure: self.date,
        }
    }

    fn same_journey(&self, other: &ResolvedSeat) -> bool {
        self.train_id == other.train_id
            && self.station_origin_id == other.station_origin_id
            && self.station_destination_id == other.station_destination_id
            && self.date == other.date
            && self.class == other.class
    }
}

struct ResolvedLeg {
    leg: TicketLeg,
    seats: Vec<ResolvedSeat>,
}

impl ResolvedLeg {
    /// Fare per adult for this leg.
    fn fare(&self) -> i64 {
        self.seats.first().map(|s| s.fare).unwrap_or_default()
    }
}

async fn resolve_seat(store: &dyn Store, req: &TicketDetailRequest) -> AppResult<ResolvedSeat> {
    let date = pricing::parse_date(&req.date)?;

    let train = found(
        store.get_train(req.train_id, Visibility::Live).await?,
        "Train",
        req.train_id,
    )?;
    let carriage = found(
        store
            .get_train_carriage(req.train_carriage_id, Visibility::Live)
            .await?,
        "Train carriage",
        req.train_carriage_id,
    )?;
    if carriage.train_id != train.id {
        return Err(invalid(format!(
            "Carriage {} does not belong to train {}",
            carriage.id, train.id
        )));
    }
    let seat = found(
        store.get_train_seat(req.train_seat_id, Visibility::Live).await?,
        "Train seat",
        req.train_seat_id,
    )?;
    if !seat_fits_carriage(seat.class, carriage.class) {
        return Err(invalid(format!(
            "Seat {} is {:?} class but carriage {} is {:?}",
            seat.name, seat.class, carriage.name, carriage.class
        )));
    }

    if req.station_origin_id == req.station_destination_id {
        return Err(invalid("Origin and destination must be different stations"));
    }
    for station_id in [req.station_origin_id, req.station_destination_id] {
        found(
            store.get_station(station_id, Visibility::Live).await?,
            "Station",
            station_id,
        )?;
    }

    let origin = store
        .get_train_station(train.id, req.station_origin_id)
        .await?
        .filter(|stop| stop.deleted_at.is_none())
        .ok_or_else(|| {
            invalid(format!(
                "Station {} is not a stop of train {}",
                req.station_origin_id, train.id
            ))
        })?;
    let destination = store
        .get_train_station(train.id, req.station_destination_id)
        .await?
        .filter(|stop| stop.deleted_at.is_none())
        .ok_or_else(|| {
            invalid(format!(
                "Station {} is not a stop of train {}",
                req.station_destination_id, train.id
            ))
        })?;
    if origin.arrive_time >= destination.arrive_time {
        return Err(invalid(format!(
            "Train {} reaches station {} before station {}",
            train.id, req.station_destination_id, req.station_origin_id
        )));
    }

    Ok(ResolvedSeat {
        train_id: train.id,
        train_carriage_id: carriage.id,
        train_seat_id: seat.id,
        station_origin_id: req.station_origin_id,
        station_destination_id: req.station_destination_id,
        date,
        departure_time: origin.arrive_time,
        arrival_time: destination.arrive_time,
        class: carriage.class,
        fare: carriage.price,
    })
}

async fn resolve_leg(
    store: &dyn Store,
    leg: TicketLeg,
    requests: &[TicketDetailRequest],
) -> AppResult<ResolvedLeg> {
    let mut seats = Vec::with_capacity(requests.len());
    for req in requests {
        seats.push(resolve_seat(store, req).await?);
    }

    if let Some(first) = seats.first() {
        if seats.iter().any(|s| !first.same_journey(s)) {
            return Err(invalid(format!(
                "All {:?} seats must share train, stations, date and class",
                leg
            )));
        }
    }

    Ok(ResolvedLeg { leg, seats })
}

pub async fn create_ticket_order(
    store: &dyn Store,
    actor: &Actor,
    req: CreateTicketOrderRequest,
) -> AppResult<TicketOrderView> {
    req.validate()?;

    let payment = found(
        store.get_payment(req.payment_id, Visibility::Live).await?,
        "Payment",
        req.payment_id,
    )?;

    let mut legs = vec![
        resolve_leg(
            store,
            TicketLeg::Departure,
            &req.ticket_traveler_detail_departure,
        )
        .await?,
    ];
    if req.with_return {
        legs.push(
            resolve_leg(store, TicketLeg::Return, &req.ticket_traveler_detail_return).await?,
        );
    }

    let mut requested = HashSet::new();
    for seat in legs.iter().flat_map(|leg| leg.seats.iter()) {
        if !requested.insert(seat.seat_key()) {
            return Err(invalid(format!(
                "Seat {} on carriage {} is requested twice for {}",
                seat.train_seat_id, seat.train_carriage_id, seat.date
            )));
        }
    }

    let price: i64 = legs.iter().map(ResolvedLeg::fare).sum();
    let total_amount = price * i64::from(req.quantity_adult);

    let mut tx = store.begin().await?;
    let order = tx
        .create_ticket_order(NewTicketOrder {
            user_id: actor.user_id,
            quantity_adult: req.quantity_adult,
            quantity_infant: req.quantity_infant,
            price,
            total_amount,
            with_return: req.with_return,
            payment_id: payment.id,
            name_order: req.name_order,
            email_order: req.email_order,
            phone_number_order: req.phone_number_order,
            ticket_order_code: codes::generate(CodeKind::TicketOrder),
            status: OrderStatus::Unpaid,
        })
        .await?;

    let travelers = create_travelers(
        tx.as_mut(),
        actor,
        TravelerOwner::TicketOrder(order.id),
        req.traveler_detail,
    )
    .await?;

    for leg in &legs {
        // Seat i of every leg belongs to traveller i.
        for (seat, traveler) in leg.seats.iter().zip(&travelers) {
            if tx.seat_taken(seat.seat_key()).await? {
                return Err(invalid(format!(
                    "Seat {} on carriage {} is already booked for {}",
                    seat.train_seat_id, seat.train_carriage_id, seat.date
                )));
            }

            tx.create_ticket_traveler_detail(NewTicketTravelerDetail {
                ticket_order_id: order.id,
                traveler_detail_id: traveler.id,
                train_id: seat.train_id,
                train_carriage_id: seat.train_carriage_id,
                train_seat_id: seat.train_seat_id,
                station_origin_id: seat.station_origin_id,
                station_destination_id: seat.station_destination_id,
                leg: leg.leg,
                departure_time: seat.departure_time,
                arrival_time: seat.arrival_time,
                date_of_departure: seat.date,
                boarding_ticket_code: codes::generate(CodeKind::BoardingTicket),
            })
            .await?;
        }
    }

    notification::record(tx.as_mut(), actor, OrderRef::Ticket(order.id), order.status).await?;
    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        user_id = actor.user_id,
        legs = legs.len(),
        total_amount,
        "Ticket order created"
    );

    view::ticket_order_view(store, order).await
}

pub async fn update_hotel_order_status(
    store: &dyn Store,
    actor: &Actor,
    hotel_order_id: i32,
    status: OrderStatus,
) -> AppResult<HotelOrderView> {
    let mut tx = store.begin().await?;
    let mut order = found(
        tx.lock_hotel_order(hotel_order_id, actor).await?,
        "Hotel order",
        hotel_order_id,
    )?;

    if order.status == status {
        drop(tx);
        return view::hotel_order_view(store, order).await;
    }

    let from = order.status;
    transition(from, status)?;
    order.status = status;
    let order = tx.update_hotel_order(order).await?;
    notification::record(tx.as_mut(), actor, OrderRef::Hotel(order.id), status).await?;
    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        user_id = actor.user_id,
        %from,
        to = %status,
        "Hotel order status changed"
    );

    view::hotel_order_view(store, order).await
}

pub async fn update_ticket_order_status(
    store: &dyn Store,
    actor: &Actor,
    ticket_order_id: i32,
    status: OrderStatus,
) -> AppResult<TicketOrderView> {
    let mut tx = store.begin().await?;
    let mut order = found(
        tx.lock_ticket_order(ticket_order_id, actor).await?,
        "Ticket order",
        ticket_order_id,
    )?;

    if order.status == status {
        drop(tx);
        return view::ticket_order_view(store, order).await;
    }

    let from = order.status;
    transition(from, status)?;
    order.status = status;
    let order = tx.update_ticket_order(order).await?;
    if !status.holds_inventory() {
        let released = tx.release_seats(order.id).await?;
        tracing::debug!(order_id = order.id, released, "Ticket seats released");
    }
    notification::record(tx.as_mut(), actor, OrderRef::Ticket(order.id), status).await?;
    tx.commit().await?;

    tracing::info!(
        order_id = order.id,
        user_id = actor.user_id,
        %from,
        to = %status,
        "Ticket order status changed"
    );

    view::ticket_order_view(store, order).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traveler(name: &str) -> TravelerRequest {
        TravelerRequest {
            title: "Tuan".to_string(),
            full_name: name.to_string(),
            id_card_number: None,
        }
    }

    fn seat_request() -> TicketDetailRequest {
        TicketDetailRequest {
            train_id: 1,
            train_carriage_id: 1,
            train_seat_id: 1,
            station_origin_id: 1,
            station_destination_id: 2,
            date: "2024-03-01".to_string(),
        }
    }

    fn ticket_request() -> CreateTicketOrderRequest {
        CreateTicketOrderRequest {
            quantity_adult: 1,
            quantity_infant: 0,
            with_return: false,
            payment_id: 1,
            name_order: "Budi".to_string(),
            email_order: "budi@example.com".to_string(),
            phone_number_order: "0812".to_string(),
            traveler_detail: vec![traveler("Budi")],
            ticket_traveler_detail_departure: vec![seat_request()],
            ticket_traveler_detail_return: vec![],
        }
    }

    #[test]
    fn test_ticket_request_valid() {
        assert!(ticket_request().validate().is_ok());
    }

    #[test]
    fn test_return_seats_without_return_flag_rejected() {
        let mut req = ticket_request();
        req.ticket_traveler_detail_return = vec![seat_request()];
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_return_flag_needs_one_seat_per_adult() {
        let mut req = ticket_request();
        req.with_return = true;
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        req.ticket_traveler_detail_return = vec![seat_request()];
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_departure_seats_match_adults() {
        let mut req = ticket_request();
        req.quantity_adult = 2;
        req.traveler_detail.push(traveler("Sari"));
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_hotel_request_requires_travelers() {
        let req = CreateHotelOrderRequest {
            hotel_room_id: 7,
            quantity_adult: 1,
            quantity_infant: 0,
            date_start: "2024-01-10".to_string(),
            date_end: "2024-01-11".to_string(),
            payment_id: 3,
            name_order: "A".to_string(),
            email_order: "a@example.com".to_string(),
            phone_number_order: "0812".to_string(),
            special_request: String::new(),
            traveler_detail: vec![],
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }
}
