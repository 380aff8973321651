//! Administrator console. Mounted behind `require_admin`, so the actor
//! derived from the token sees every user's orders.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::order::{HotelOrderParams, TicketOrderParams};
use super::{page_response, required_id, OrderListQuery};
use crate::entities::hotel_room;
use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::services::catalog::{self, HotelRoomRequest};
use crate::services::view::{self, HotelOrderView, TicketOrderView};
use crate::utils::jwt::Claims;
use crate::AppState;

pub async fn list_hotel_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<ApiResponse<Vec<HotelOrderView>>> {
    let order_filter = query.filter()?;
    tracing::debug!(filter = ?order_filter, "Admin hotel order listing");

    let page = view::list_hotel_orders(
        state.store.as_ref(),
        &claims.actor(),
        &order_filter,
        query.paging(),
    )
    .await?;
    Ok(page_response("Hotel orders", page))
}

pub async fn get_hotel_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<HotelOrderParams>,
) -> AppResult<ApiResponse<HotelOrderView>> {
    let id = required_id(params.hotel_order_id, "hotel_order_id")?;
    let order = view::get_hotel_order(state.store.as_ref(), &claims.actor(), id).await?;
    Ok(ApiResponse::ok("Hotel order", order))
}

pub async fn list_ticket_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<ApiResponse<Vec<TicketOrderView>>> {
    let page = view::list_ticket_orders(
        state.store.as_ref(),
        &claims.actor(),
        &query.filter()?,
        query.paging(),
    )
    .await?;
    Ok(page_response("Ticket orders", page))
}

pub async fn get_ticket_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<TicketOrderParams>,
) -> AppResult<ApiResponse<TicketOrderView>> {
    let id = required_id(params.ticket_order_id, "ticket_order_id")?;
    let train_id = params.train_id.filter(|id| *id > 0);

    let order =
        view::get_ticket_order(state.store.as_ref(), &claims.actor(), id, train_id).await?;
    Ok(ApiResponse::ok("Ticket order", order))
}

pub async fn create_hotel_room(
    State(state): State<AppState>,
    Json(payload): Json<HotelRoomRequest>,
) -> AppResult<ApiResponse<hotel_room::Model>> {
    let room = catalog::create_hotel_room(state.store.as_ref(), payload).await?;
    Ok(ApiResponse::created("Hotel room created", room))
}

pub async fn update_hotel_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<HotelRoomRequest>,
) -> AppResult<ApiResponse<hotel_room::Model>> {
    let room = catalog::update_hotel_room(state.store.as_ref(), id, payload).await?;
    Ok(ApiResponse::ok("Hotel room updated", room))
}

pub async fn delete_hotel_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<ApiResponse<()>> {
    catalog::delete_hotel_room(state.store.as_ref(), id).await?;
    Ok(ApiResponse::ok("Hotel room deleted", ()))
}
