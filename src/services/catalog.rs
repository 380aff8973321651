use serde::{Deserialize, Serialize};

use super::found;
use super::view::{HotelFacet, RoomFacet};
use crate::domain::pricing;
use crate::entities::{hotel_room, station, train, train_station};
use crate::error::{AppError, AppResult};
use crate::store::{NewHotelRoom, Store, Visibility};

#[derive(Debug, Clone, Serialize)]
pub struct HotelDetail {
    #[serde(flatten)]
    pub hotel: HotelFacet,
    pub rooms: Vec<RoomFacet>,
    pub minimum_price_room: Option<hotel_room::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainStop {
    #[serde(flatten)]
    pub stop: train_station::Model,
    pub station: station::Model,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainSchedule {
    #[serde(flatten)]
    pub train: train::Model,
    pub stops: Vec<TrainStop>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelRoomRequest {
    pub hotel_id: i32,
    pub name: String,
    pub size_of_room: f64,
    pub quantity_of_room: i32,
    #[serde(default)]
    pub description: String,
    pub normal_price: i64,
    #[serde(default)]
    pub discount: i32,
    pub number_of_guest: i32,
    #[serde(default)]
    pub mattress_size: String,
    #[serde(default)]
    pub number_of_mattress: i32,
}

impl HotelRoomRequest {
    /// Validates the request and derives the discounted price.
    fn priced(&self) -> AppResult<i64> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if self.quantity_of_room < 0 || self.number_of_guest < 1 || self.number_of_mattress < 0 {
            return Err(AppError::Validation(
                "Room quantities must not be negative and a room sleeps at least one guest"
                    .to_string(),
            ));
        }
        if self.size_of_room.is_nan() || self.size_of_room <= 0.0 {
            return Err(AppError::Validation("size_of_room must be positive".to_string()));
        }
        Ok(pricing::discount_price(self.normal_price, self.discount)?)
    }
}

pub async fn get_hotel_detail(store: &dyn Store, hotel_id: i32) -> AppResult<HotelDetail> {
    let hotel = found(
        store.get_hotel(hotel_id, Visibility::Live).await?,
        "Hotel",
        hotel_id,
    )?;

    let facet = HotelFacet {
        images: store
            .list_images_for_hotel(hotel.id, Visibility::Live)
            .await?,
        facilities: store
            .list_facilities_for_hotel(hotel.id, Visibility::Live)
            .await?,
        policy: store.get_policy_for_hotel(hotel.id, Visibility::Live).await?,
        hotel,
    };

    let mut rooms = Vec::new();
    for room in store
        .list_rooms_for_hotel(hotel_id, Visibility::Live)
        .await?
    {
        rooms.push(RoomFacet {
            images: store
                .list_images_for_room(room.id, Visibility::Live)
                .await?,
            facilities: store
                .list_facilities_for_room(room.id, Visibility::Live)
                .await?,
            room,
        });
    }

    Ok(HotelDetail {
        hotel: facet,
        rooms,
        minimum_price_room: store.get_minimum_price_room_for_hotel(hotel_id).await?,
    })
}

pub async fn get_train_schedule(store: &dyn Store, train_id: i32) -> AppResult<TrainSchedule> {
    let train = found(
        store.get_train(train_id, Visibility::Live).await?,
        "Train",
        train_id,
    )?;

    let mut stops = Vec::new();
    for stop in store.list_train_stations(train.id).await? {
        let station = store
            .get_station(stop.station_id, Visibility::WithDeleted)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Train stop references missing station {}", stop.station_id))
            })?;
        stops.push(TrainStop { stop, station });
    }

    Ok(TrainSchedule { train, stops })
}

pub async fn create_hotel_room(
    store: &dyn Store,
    req: HotelRoomRequest,
) -> AppResult<hotel_room::Model> {
    let discount_price = req.priced()?;
    found(
        store.get_hotel(req.hotel_id, Visibility::Live).await?,
        "Hotel",
        req.hotel_id,
    )?;

    let room = store
        .create_hotel_room(NewHotelRoom {
            hotel_id: req.hotel_id,
            name: req.name,
            size_of_room: req.size_of_room,
            quantity_of_room: req.quantity_of_room,
            description: req.description,
            normal_price: req.normal_price,
            discount: req.discount,
            discount_price,
            number_of_guest: req.number_of_guest,
            mattress_size: req.mattress_size,
            number_of_mattress: req.number_of_mattress,
        })
        .await?;

    tracing::info!(hotel_room_id = room.id, hotel_id = room.hotel_id, "Hotel room created");
    Ok(room)
}

pub async fn update_hotel_room(
    store: &dyn Store,
    hotel_room_id: i32,
    req: HotelRoomRequest,
) -> AppResult<hotel_room::Model> {
    let discount_price = req.priced()?;
    let existing = found(
        store
            .get_hotel_room(hotel_room_id, Visibility::Live)
            .await?,
        "Hotel room",
        hotel_room_id,
    )?;
    found(
        store.get_hotel(req.hotel_id, Visibility::Live).await?,
        "Hotel",
        req.hotel_id,
    )?;

    let room = store
        .update_hotel_room(hotel_room::Model {
            hotel_id: req.hotel_id,
            name: req.name,
            size_of_room: req.size_of_room,
            quantity_of_room: req.quantity_of_room,
            description: req.description,
            normal_price: req.normal_price,
            discount: req.discount,
            discount_price,
            number_of_guest: req.number_of_guest,
            mattress_size: req.mattress_size,
            number_of_mattress: req.number_of_mattress,
            ..existing
        })
        .await?;

    tracing::info!(hotel_room_id = room.id, "Hotel room updated");
    Ok(room)
}

pub async fn delete_hotel_room(store: &dyn Store, hotel_room_id: i32) -> AppResult<()> {
    if !store.soft_delete_hotel_room(hotel_room_id).await? {
        return Err(AppError::NotFound(format!(
            "Hotel room {} not found",
            hotel_room_id
        )));
    }

    tracing::info!(hotel_room_id, "Hotel room deleted");
    Ok(())
}
