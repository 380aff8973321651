//! End-user order endpoints. Every call is scoped to the token's user.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{page_response, parse_status, required_id, OrderListQuery};
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::services::booking::{self, CreateHotelOrderRequest, CreateTicketOrderRequest};
use crate::services::view::{self, HotelOrderView, TicketOrderView};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HotelOrderParams {
    pub hotel_order_id: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TicketOrderParams {
    pub ticket_order_id: Option<i32>,
    pub train_id: Option<i32>,
    pub status: Option<String>,
}

fn required_status(raw: Option<&str>) -> AppResult<crate::domain::OrderStatus> {
    parse_status(raw)?.ok_or_else(|| AppError::Validation("status is required".to_string()))
}

pub async fn create_hotel_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateHotelOrderRequest>,
) -> AppResult<ApiResponse<HotelOrderView>> {
    let order =
        booking::create_hotel_order(state.store.as_ref(), &claims.actor(), payload).await?;
    Ok(ApiResponse::created("Hotel order created", order))
}

pub async fn update_hotel_order_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<HotelOrderParams>,
) -> AppResult<ApiResponse<HotelOrderView>> {
    let id = required_id(params.hotel_order_id, "hotel_order_id")?;
    let status = required_status(params.status.as_deref())?;

    let order =
        booking::update_hotel_order_status(state.store.as_ref(), &claims.actor(), id, status)
            .await?;
    Ok(ApiResponse::ok("Hotel order updated", order))
}

pub async fn list_hotel_orders(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<ApiResponse<Vec<HotelOrderView>>> {
    let page = view::list_hotel_orders(
        state.store.as_ref(),
        &claims.actor(),
        &query.filter()?,
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

pub async fn create_ticket_order(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateTicketOrderRequest>,
) -> AppResult<ApiResponse<TicketOrderView>> {
    let order =
        booking::create_ticket_order(state.store.as_ref(), &claims.actor(), payload).await?;
    Ok(ApiResponse::created("Ticket order created", order))
}

pub async fn update_ticket_order_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<TicketOrderParams>,
) -> AppResult<ApiResponse<TicketOrderView>> {
    let id = required_id(params.ticket_order_id, "ticket_order_id")?;
    let status = required_status(params.status.as_deref())?;

    let order =
        booking::update_ticket_order_status(state.store.as_ref(), &claims.actor(), id, status)
            .await?;
    Ok(ApiResponse::ok("Ticket order updated", order))
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
