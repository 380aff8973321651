use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::handlers::{admin, auth, catalog, notification, order};
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::middleware::request_log::log_request;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let catalog_routes = Router::new()
        .route("/hotel/{id}", get(catalog::get_hotel))
        .route("/train/{id}/stations", get(catalog::list_train_stations));

    // End-user routes (requires auth, scoped to the caller)
    let user_routes = Router::new()
        .route(
            "/train/order",
            post(order::create_ticket_order).patch(order::update_ticket_order_status),
        )
        .route("/order/ticket", get(order::get_ticket_order))
        .route("/order/ticket/list", get(order::list_ticket_orders))
        .route(
            "/hotel/order",
            post(order::create_hotel_order).patch(order::update_hotel_order_status),
        )
        .route("/order/hotel", get(order::list_hotel_orders))
        .route("/order/hotel/detail", get(order::get_hotel_order))
        .route("/notification", get(notification::list_notifications))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin routes (requires auth + admin role)
    let admin_routes = Router::new()
        .route("/order/hotel", get(admin::list_hotel_orders))
        .route("/order/hotel/detail", get(admin::get_hotel_order))
        .route("/order/ticket", get(admin::list_ticket_orders))
        .route("/order/ticket/detail", get(admin::get_ticket_order))
        .route("/hotel/room", post(admin::create_hotel_room))
        .route(
            "/hotel/room/{id}",
            put(admin::update_hotel_room).delete(admin::delete_hotel_room),
        )
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/auth", auth_routes)
        .merge(catalog_routes)
        .nest("/user", user_routes)
        .nest("/admin", admin_routes)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
