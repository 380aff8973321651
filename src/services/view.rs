//! Hydrated order views and the listing pipeline.
//!
//! Catalog facets are read [`Visibility::WithDeleted`] so an order placed
//! against a room or seat that has since been retired still renders.

use chrono::NaiveDate;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use super::found;
use crate::domain::filter::{self, FilterableOrder, OrderFilter};
use crate::domain::{Actor, OrderStatus};
use crate::entities::{
    hotel, hotel_facility, hotel_image, hotel_order, hotel_policy, hotel_room,
    hotel_room_facility, hotel_room_image, payment, station, ticket_order, ticket_traveler_detail,
    train, train_carriage, train_seat, traveler_detail,
};
use crate::error::{AppError, AppResult};
use crate::store::{HotelOrderQuery, Store, TicketOrderQuery, Visibility};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_ORDER_LIMIT: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u64,
    pub limit: u64,
}

impl Paging {
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_ORDER_LIMIT),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    /// Orders matching the storage-side filters.
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelFacet {
    #[serde(flatten)]
    pub hotel: hotel::Model,
    pub images: Vec<hotel_image::Model>,
    pub facilities: Vec<hotel_facility::Model>,
    pub policy: Option<hotel_policy::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomFacet {
    #[serde(flatten)]
    pub room: hotel_room::Model,
    pub images: Vec<hotel_room_image::Model>,
    pub facilities: Vec<hotel_room_facility::Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelOrderView {
    #[serde(flatten)]
    pub order: hotel_order::Model,
    pub hotel: HotelFacet,
    pub hotel_room: RoomFacet,
    pub payment: payment::Model,
    pub traveler_detail: Vec<traveler_detail::Model>,
}

/// One traveller's seat on one leg, with every catalog row it points at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketLegView {
    #[serde(flatten)]
    pub detail: ticket_traveler_detail::Model,
    pub train: train::Model,
    pub train_carriage: train_carriage::Model,
    pub train_seat: train_seat::Model,
    pub station_origin: station::Model,
    pub station_destination: station::Model,
    pub traveler: traveler_detail::Model,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketOrderView {
    #[serde(flatten)]
    pub order: ticket_order::Model,
    pub payment: payment::Model,
    pub traveler_detail: Vec<traveler_detail::Model>,
    pub ticket_traveler_detail: Vec<TicketLegView>,
}

impl FilterableOrder for HotelOrderView {
    fn status(&self) -> OrderStatus {
        self.order.status
    }

    fn created_at(&self) -> DateTimeWithTimeZone {
        self.order.created_at
    }

    fn price(&self) -> i64 {
        self.order.price
    }

    fn date_start(&self) -> Option<NaiveDate> {
        Some(self.order.date_start)
    }

    fn rating_class(&self) -> Option<i32> {
        Some(self.hotel.hotel.class)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.hotel.hotel.name.as_str(),
            self.hotel.hotel.address.as_str(),
        ];
        fields.extend(self.traveler_detail.iter().map(|t| t.full_name.as_str()));
        fields
    }
}

impl FilterableOrder for TicketOrderView {
    fn status(&self) -> OrderStatus {
        self.order.status
    }

    fn created_at(&self) -> DateTimeWithTimeZone {
        self.order.created_at
    }

    fn price(&self) -> i64 {
        self.order.price
    }

    fn date_start(&self) -> Option<NaiveDate> {
        None
    }

    fn rating_class(&self) -> Option<i32> {
        None
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.order.ticket_order_code.as_str()];
        fields.extend(self.traveler_detail.iter().map(|t| t.full_name.as_str()));
        fields.extend(
            self.ticket_traveler_detail
                .iter()
                .map(|leg| leg.train.name.as_str()),
        );
        fields
    }
}

fn missing(what: &str, id: i32) -> AppError {
    AppError::Internal(format!("Order references missing {} {}", what, id))
}

pub async fn hotel_order_view(
    store: &dyn Store,
    order: hotel_order::Model,
) -> AppResult<HotelOrderView> {
    let hotel = store
        .get_hotel(order.hotel_id, Visibility::WithDeleted)
        .await?
        .ok_or_else(|| missing("hotel", order.hotel_id))?;
    let room = store
        .get_hotel_room(order.hotel_room_id, Visibility::WithDeleted)
        .await?
        .ok_or_else(|| missing("hotel room", order.hotel_room_id))?;
    let payment = store
        .get_payment(order.payment_id, Visibility::WithDeleted)
        .await?
        .ok_or_else(|| missing("payment", order.payment_id))?;

    let hotel = HotelFacet {
        images: store
            .list_images_for_hotel(hotel.id, Visibility::WithDeleted)
            .await?,
        facilities: store
            .list_facilities_for_hotel(hotel.id, Visibility::WithDeleted)
            .await?,
        policy: store
            .get_policy_for_hotel(hotel.id, Visibility::WithDeleted)
            .await?,
        hotel,
    };
    let hotel_room = RoomFacet {
        images: store
            .list_images_for_room(room.id, Visibility::WithDeleted)
            .await?,
        facilities: store
            .list_facilities_for_room(room.id, Visibility::WithDeleted)
            .await?,
        room,
    };
    let mut traveler_detail = store.list_travelers_for_hotel_order(order.id).await?;
    traveler_detail.sort_by_key(|t| t.id);

    Ok(HotelOrderView {
        order,
        hotel,
        hotel_room,
        payment,
        traveler_detail,
    })
}

pub async fn ticket_order_view(
    store: &dyn Store,
    order: ticket_order::Model,
) -> AppResult<TicketOrderView> {
    let payment = store
        .get_payment(order.payment_id, Visibility::WithDeleted)
        .await?
        .ok_or_else(|| missing("payment", order.payment_id))?;
    let mut traveler_detail = store.list_travelers_for_ticket_order(order.id).await?;
    traveler_detail.sort_by_key(|t| t.id);

    let mut details = store.list_ticket_traveler_details(order.id).await?;
    details.sort_by_key(|d| d.id);

    let mut legs = Vec::with_capacity(details.len());
    for detail in details {
        let train = store
            .get_train(detail.train_id, Visibility::WithDeleted)
            .await?
            .ok_or_else(|| missing("train", detail.train_id))?;
        let train_carriage = store
            .get_train_carriage(detail.train_carriage_id, Visibility::WithDeleted)
            .await?
            .ok_or_else(|| missing("train carriage", detail.train_carriage_id))?;
        let train_seat = store
            .get_train_seat(detail.train_seat_id, Visibility::WithDeleted)
            .await?
            .ok_or_else(|| missing("train seat", detail.train_seat_id))?;
        let station_origin = store
            .get_station(detail.station_origin_id, Visibility::WithDeleted)
            .await?
            .ok_or_else(|| missing("station", detail.station_origin_id))?;
        let station_destination = store
            .get_station(detail.station_destination_id, Visibility::WithDeleted)
            .await?
            .ok_or_else(|| missing("station", detail.station_destination_id))?;
        let traveler = traveler_detail
            .iter()
            .find(|t| t.id == detail.traveler_detail_id)
            .cloned()
            .ok_or_else(|| missing("traveler", detail.traveler_detail_id))?;

        legs.push(TicketLegView {
            detail,
            train,
            train_carriage,
            train_seat,
            station_origin,
            station_destination,
            traveler,
        });
    }

    Ok(TicketOrderView {
        order,
        payment,
        traveler_detail,
        ticket_traveler_detail: legs,
    })
}

pub async fn get_hotel_order(
    store: &dyn Store,
    actor: &Actor,
    hotel_order_id: i32,
) -> AppResult<HotelOrderView> {
    let order = found(
        store.get_hotel_order(hotel_order_id, actor).await?,
        "Hotel order",
        hotel_order_id,
    )?;
    hotel_order_view(store, order).await
}

/// A ticket order, optionally narrowed to the legs travelling on `train_id`.
pub async fn get_ticket_order(
    store: &dyn Store,
    actor: &Actor,
    ticket_order_id: i32,
    train_id: Option<i32>,
) -> AppResult<TicketOrderView> {
    let order = found(
        store.get_ticket_order(ticket_order_id, actor).await?,
        "Ticket order",
        ticket_order_id,
    )?;
    let mut view = ticket_order_view(store, order).await?;

    if let Some(train_id) = train_id {
        view.ticket_traveler_detail
            .retain(|leg| leg.detail.train_id == train_id);
        if view.ticket_traveler_detail.is_empty() {
            return Err(AppError::NotFound(format!(
                "Ticket order {} has no seats on train {}",
                ticket_order_id, train_id
            )));
        }
    }

    Ok(view)
}

/// Lists hotel orders visible to `actor`.
///
/// Status, date window, star class and sort order are evaluated by storage;
/// the text search runs over the hydrated page.
pub async fn list_hotel_orders(
    store: &dyn Store,
    actor: &Actor,
    order_filter: &OrderFilter,
    paging: Paging,
) -> AppResult<Page<HotelOrderView>> {
    let query = HotelOrderQuery {
        page: paging.page,
        limit: paging.limit,
        status: order_filter.status,
        date_range: order_filter.date_range,
        min_rating_class: order_filter.min_rating_class,
        order_by: order_filter.order_by,
    };
    let (orders, total) = store.list_hotel_orders(actor, &query).await?;

    let mut views = Vec::with_capacity(orders.len());
    for order in orders {
        views.push(hotel_order_view(store, order).await?);
    }

    Ok(Page {
        items: filter::apply(views, order_filter),
        page: paging.page,
        limit: paging.limit,
        total,
    })
}

pub async fn list_ticket_orders(
    store: &dyn Store,
    actor: &Actor,
    order_filter: &OrderFilter,
    paging: Paging,
) -> AppResult<Page<TicketOrderView>> {
    let query = TicketOrderQuery {
        page: paging.page,
        limit: paging.limit,
        status: order_filter.status,
        order_by: order_filter.order_by,
    };
    let (orders, total) = store.list_ticket_orders(actor, &query).await?;

    let mut views = Vec::with_capacity(orders.len());
    for order in orders {
        views.push(ticket_order_view(store, order).await?);
    }

    let ticket_filter = OrderFilter {
        date_range: None,
        min_rating_class: None,
        ..order_filter.clone()
    };

    Ok(Page {
        items: filter::apply(views, &ticket_filter),
        page: paging.page,
        limit: paging.limit,
        total,
    })
}
