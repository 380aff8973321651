use axum::extract::{Path, State};

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::services::catalog::{self, HotelDetail, TrainSchedule};
use crate::AppState;

pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<HotelDetail>> {
    let hotel = catalog::get_hotel_detail(state.store.as_ref(), id).await?;
    Ok(ApiResponse::ok("Hotel", hotel))
}

pub async fn list_train_stations(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<TrainSchedule>> {
    let schedule = catalog::get_train_schedule(state.store.as_ref(), id).await?;
    Ok(ApiResponse::ok("Train stations", schedule))
}
