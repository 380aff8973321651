mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use travel_booking_backend::domain::OrderStatus;
use travel_booking_backend::entities::user::UserRole;
use travel_booking_backend::routes::create_router;
use travel_booking_backend::store::InMemoryStore;
use travel_booking_backend::utils::jwt::create_token;
use travel_booking_backend::{AppState, Config};

const SECRET: &str = "test-secret";

fn config() -> Config {
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/travel_test".to_string()),
        "JWT_SECRET" => Some(SECRET.to_string()),
        _ => None,
    })
    .unwrap()
}

fn app(store: &InMemoryStore) -> Router {
    create_router(AppState {
        store: Arc::new(store.clone()),
        config: config(),
    })
}

fn token(user_id: i32, role: UserRole) -> String {
    create_token(user_id, "someone@example.com", role, SECRET, 1).unwrap()
}

fn request(method: Method, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", bearer));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn store_with_order_11() -> InMemoryStore {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    store
        .seed(|s| {
            let order = insert_hotel_order(
                s,
                11,
                5,
                catalog.hotel_id,
                catalog.room_id,
                catalog.payment_id,
                date("2024-01-10"),
                400_000,
                OrderStatus::Unpaid,
            );
            insert_hotel_traveler(s, &order, "Lima");
        })
        .await;
    store
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let store = store_with_users().await;
    let (status, body) = send(
        app(&store),
        request(Method::GET, "/user/order/hotel", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["errors"], "unauthorized");
}

#[tokio::test]
async fn test_forged_token_is_unauthorized() {
    let store = store_with_users().await;
    let forged = create_token(1, "admin@example.com", UserRole::Admin, "other-secret", 1).unwrap();
    let (status, _) = send(
        app(&store),
        request(Method::GET, "/admin/order/hotel", Some(&forged), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_end_users() {
    let store = store_with_users().await;
    let (status, body) = send(
        app(&store),
        request(
            Method::GET,
            "/admin/order/hotel",
            Some(&token(5, UserRole::User)),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status_code"], 403);
}

#[tokio::test]
async fn test_order_detail_is_scoped_to_owner() {
    let store = store_with_order_11().await;
    let uri = "/user/order/hotel/detail?hotel_order_id=11";

    let (status, body) = send(
        app(&store),
        request(Method::GET, uri, Some(&token(6, UserRole::User)), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status_code"], 404);

    let (status, body) = send(
        app(&store),
        request(Method::GET, uri, Some(&token(5, UserRole::User)), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 11);
    assert_eq!(body["data"]["traveler_detail"][0]["full_name"], "Lima");

    let (status, body) = send(
        app(&store),
        request(
            Method::GET,
            "/admin/order/hotel/detail?hotel_order_id=11",
            Some(&token(ADMIN_ID, UserRole::Admin)),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 11);
    assert_eq!(body["data"]["hotel"]["name"], "Grand Sari");
}

#[tokio::test]
async fn test_create_hotel_order_over_http() {
    let store = store_with_users().await;
    seed_hotel_catalog(&store).await;

    let (status, body) = send(
        app(&store),
        request(
            Method::POST,
            "/user/hotel/order",
            Some(&token(42, UserRole::User)),
            Some(json!({
                "hotel_room_id": 7,
                "quantity_adult": 1,
                "date_start": "2024-01-10",
                "date_end": "2024-01-13",
                "payment_id": 3,
                "name_order": "A",
                "email_order": "a@example.com",
                "phone_number_order": "08123456789",
                "traveler_detail": [{ "title": "Tuan", "full_name": "A" }]
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["status"], "unpaid");
    assert_eq!(body["data"]["number_of_nights"], 3);
    assert_eq!(body["data"]["total_amount"], 1_200_000);
    assert_eq!(body["data"]["user_id"], 42);
}

#[tokio::test]
async fn test_validation_failure_envelope() {
    let store = store_with_users().await;
    seed_hotel_catalog(&store).await;

    let (status, body) = send(
        app(&store),
        request(
            Method::POST,
            "/user/hotel/order",
            Some(&token(42, UserRole::User)),
            Some(json!({
                "hotel_room_id": 7,
                "quantity_adult": 1,
                "date_start": "2024-01-10",
                "date_end": "2024-01-11",
                "payment_id": 3,
                "name_order": "A",
                "email_order": "a@example.com",
                "phone_number_order": "08123456789",
                "traveler_detail": []
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 400);
    assert_eq!(body["errors"], "validation");
    assert!(body["message"].as_str().unwrap().contains("traveler_detail"));
}

#[tokio::test]
async fn test_status_update_over_http() {
    let store = store_with_order_11().await;
    let owner = token(5, UserRole::User);

    let (status, body) = send(
        app(&store),
        request(
            Method::PATCH,
            "/user/hotel/order?hotel_order_id=11&status=paid",
            Some(&owner),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "paid");

    let (status, _) = send(
        app(&store),
        request(
            Method::PATCH,
            "/user/hotel/order?hotel_order_id=11&status=shipped",
            Some(&owner),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        app(&store),
        request(
            Method::PATCH,
            "/user/hotel/order?hotel_order_id=11&status=canceled",
            Some(&owner),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_listing_carries_meta() {
    let store = store_with_order_11().await;

    let (status, body) = send(
        app(&store),
        request(
            Method::GET,
            "/admin/order/hotel?status=pending&order_by=lowest_price",
            Some(&token(ADMIN_ID, UserRole::Admin)),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 1000);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_then_login() {
    let store = store_with_users().await;

    let (status, body) = send(
        app(&store),
        request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({
                "full_name": "Rina",
                "email": "Rina@Example.com",
                "password": "rahasia123"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["email"], "rina@example.com");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, _) = send(
        app(&store),
        request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({
                "full_name": "Rina",
                "email": "rina@example.com",
                "password": "rahasia123"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        app(&store),
        request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "rina@example.com", "password": "rahasia123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        app(&store),
        request(Method::GET, "/user/notification", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = send(
        app(&store),
        request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "rina@example.com", "password": "salah" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_catalog_routes() {
    let store = store_with_users().await;
    let hotel = seed_hotel_catalog(&store).await;
    let train = seed_train_catalog(&store).await;

    let (status, body) = send(
        app(&store),
        request(Method::GET, &format!("/hotel/{}", hotel.hotel_id), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["minimum_price_room"]["id"], 6);

    let (status, body) = send(
        app(&store),
        request(
            Method::GET,
            &format!("/train/{}/stations", train.outbound_train),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stops"].as_array().unwrap().len(), 3);

    let (status, _) = send(app(&store), request(Method::GET, "/hotel/999", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_room_lifecycle() {
    let store = store_with_users().await;
    let hotel = seed_hotel_catalog(&store).await;
    let admin_token = token(ADMIN_ID, UserRole::Admin);
    let room = json!({
        "hotel_id": hotel.hotel_id,
        "name": "Suite",
        "size_of_room": 40.0,
        "quantity_of_room": 2,
        "normal_price": 1_000_000,
        "discount": 10,
        "number_of_guest": 2
    });

    let (status, body) = send(
        app(&store),
        request(Method::POST, "/admin/hotel/room", Some(&admin_token), Some(room)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["discount_price"], 900_000);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        app(&store),
        request(
            Method::DELETE,
            &format!("/admin/hotel/room/{}", id),
            Some(&admin_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app(&store),
        request(
            Method::DELETE,
            &format!("/admin/hotel/room/{}", id),
            Some(&admin_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
