mod common;

use std::collections::HashSet;

use common::*;
use travel_booking_backend::domain::filter::{DateRange, OrderBy, OrderFilter};
use travel_booking_backend::domain::{Actor, OrderStatus};
use travel_booking_backend::entities::ticket_traveler_detail::TicketLeg;
use travel_booking_backend::handlers::OrderListQuery;
use travel_booking_backend::services::booking::{self, CreateTicketOrderRequest};
use travel_booking_backend::services::catalog::{self, HotelRoomRequest};
use travel_booking_backend::services::notification;
use travel_booking_backend::services::view::{self, Paging};
use travel_booking_backend::store::{CatalogStore, InMemoryStore, Visibility};
use travel_booking_backend::AppError;

fn round_trip_request(catalog: TrainCatalog) -> CreateTicketOrderRequest {
    let [a1, a2] = catalog.economy_seats;
    CreateTicketOrderRequest {
        quantity_adult: 2,
        with_return: true,
        traveler_detail: vec![traveler("Budi"), traveler("Sari")],
        ticket_traveler_detail_departure: vec![
            outbound_seat(catalog, a1, "2024-03-01"),
            outbound_seat(catalog, a2, "2024-03-01"),
        ],
        ticket_traveler_detail_return: vec![
            return_seat(catalog, a1, "2024-03-03"),
            return_seat(catalog, a2, "2024-03-03"),
        ],
        ..one_way_request(catalog, a1)
    }
}

#[tokio::test]
async fn test_hotel_order_single_night() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let actor = Actor::user(42);

    let view = booking::create_hotel_order(
        &store,
        &actor,
        hotel_request(catalog, "2024-01-10", "2024-01-11"),
    )
    .await
    .unwrap();

    assert_eq!(view.order.user_id, 42);
    assert_eq!(view.order.number_of_nights, 1);
    assert_eq!(view.order.price, 400_000);
    assert_eq!(view.order.total_amount, 400_000);
    assert_eq!(view.order.status, OrderStatus::Unpaid);
    assert!(view.order.hotel_order_code.starts_with("hotel-order-"));
    assert_eq!(view.hotel.hotel.id, catalog.hotel_id);
    assert_eq!(view.hotel_room.room.id, 7);
    assert_eq!(view.hotel_room.images.len(), 1);
    assert_eq!(view.payment.id, 3);

    assert_eq!(view.traveler_detail.len(), 1);
    let traveler = &view.traveler_detail[0];
    assert_eq!(traveler.hotel_order_id, Some(view.order.id));
    assert_eq!(traveler.ticket_order_id, None);

    let state = store.snapshot().await;
    assert_eq!(state.notifications.len(), 1);
    let note = &state.notifications[0];
    assert_eq!(note.user_id, 42);
    assert_eq!(note.template_message_id, 4);
    assert_eq!(note.hotel_order_id, Some(view.order.id));
    assert_eq!(note.ticket_order_id, None);
}

#[tokio::test]
async fn test_hotel_order_three_nights() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;

    let view = booking::create_hotel_order(
        &store,
        &Actor::user(42),
        hotel_request(catalog, "2024-01-10", "2024-01-13"),
    )
    .await
    .unwrap();

    assert_eq!(view.order.number_of_nights, 3);
    assert_eq!(view.order.total_amount, 1_200_000);
}

#[tokio::test]
async fn test_same_day_stay_counts_one_night() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;

    let view = booking::create_hotel_order(
        &store,
        &Actor::user(42),
        hotel_request(catalog, "2024-01-10", "2024-01-10"),
    )
    .await
    .unwrap();

    assert_eq!(view.order.number_of_nights, 1);
    assert_eq!(view.order.total_amount, view.order.price);
}

#[tokio::test]
async fn test_checkout_before_checkin_rejected() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;

    let err = booking::create_hotel_order(
        &store,
        &Actor::user(42),
        hotel_request(catalog, "2024-01-10", "2024-01-09"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.snapshot().await.hotel_orders.is_empty());
}

#[tokio::test]
async fn test_empty_travelers_persist_nothing() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let mut req = hotel_request(catalog, "2024-01-10", "2024-01-11");
    req.traveler_detail.clear();

    let err = booking::create_hotel_order(&store, &Actor::user(42), req)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    let state = store.snapshot().await;
    assert!(state.hotel_orders.is_empty());
    assert!(state.travelers.is_empty());
    assert!(state.notifications.is_empty());
}

#[tokio::test]
async fn test_unknown_room_is_not_found() {
    let store = store_with_users().await;
    let mut catalog = seed_hotel_catalog(&store).await;
    catalog.room_id = 999;

    let err = booking::create_hotel_order(
        &store,
        &Actor::user(42),
        hotel_request(catalog, "2024-01-10", "2024-01-11"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_retired_room_cannot_be_booked_but_old_orders_still_render() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let actor = Actor::user(42);

    let before = booking::create_hotel_order(
        &store,
        &actor,
        hotel_request(catalog, "2024-01-10", "2024-01-11"),
    )
    .await
    .unwrap();

    catalog::delete_hotel_room(&store, catalog.room_id).await.unwrap();

    let err = booking::create_hotel_order(
        &store,
        &actor,
        hotel_request(catalog, "2024-02-10", "2024-02-11"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let after = view::get_hotel_order(&store, &actor, before.order.id)
        .await
        .unwrap();
    assert_eq!(after.hotel_room.room.id, catalog.room_id);
    assert!(after.hotel_room.room.deleted_at.is_some());
    assert_eq!(after.order, before.order);
}

#[tokio::test]
async fn test_rehydration_is_stable() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let actor = Actor::user(42);

    let created = booking::create_hotel_order(
        &store,
        &actor,
        hotel_request(catalog, "2024-01-10", "2024-01-12"),
    )
    .await
    .unwrap();

    let first = view::get_hotel_order(&store, &actor, created.order.id)
        .await
        .unwrap();
    let second = view::get_hotel_order(&store, &actor, created.order.id)
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first, created);
}

#[tokio::test]
async fn test_round_trip_ticket_order() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;

    let view = booking::create_ticket_order(&store, &Actor::user(42), round_trip_request(catalog))
        .await
        .unwrap();

    assert!(view.order.with_return);
    assert_eq!(view.order.price, 150_000 + 120_000);
    assert_eq!(view.order.total_amount, 2 * (150_000 + 120_000));
    assert!(view.order.ticket_order_code.starts_with("ticket-order-"));
    assert_eq!(view.traveler_detail.len(), 2);
    assert_eq!(view.ticket_traveler_detail.len(), 4);

    let codes: HashSet<&str> = view
        .ticket_traveler_detail
        .iter()
        .map(|leg| leg.detail.boarding_ticket_code.as_str())
        .collect();
    assert_eq!(codes.len(), 4);
    assert!(codes.iter().all(|c| c.starts_with("boarding-ticket-")));

    let departures: Vec<_> = view
        .ticket_traveler_detail
        .iter()
        .filter(|leg| leg.detail.leg == TicketLeg::Departure)
        .collect();
    assert_eq!(departures.len(), 2);
    assert!(departures
        .iter()
        .all(|leg| leg.detail.train_id == catalog.outbound_train));
    assert_eq!(departures[0].station_origin.name, "Gambir");
    assert_eq!(departures[0].station_destination.name, "Tugu");
    assert_eq!(departures[0].detail.departure_time, time(8, 0));
    assert_eq!(departures[0].detail.arrival_time, time(14, 0));

    // Every traveller holds exactly one seat per leg.
    for traveler in &view.traveler_detail {
        let legs: Vec<TicketLeg> = view
            .ticket_traveler_detail
            .iter()
            .filter(|leg| leg.traveler.id == traveler.id)
            .map(|leg| leg.detail.leg)
            .collect();
        assert_eq!(legs.len(), 2);
        assert!(legs.contains(&TicketLeg::Departure));
        assert!(legs.contains(&TicketLeg::Return));
    }

    let state = store.snapshot().await;
    assert_eq!(state.ticket_orders.len(), 1);
    assert_eq!(state.notifications.len(), 1);
    assert_eq!(state.notifications[0].ticket_order_id, Some(view.order.id));
    assert_eq!(state.notifications[0].template_message_id, 4);
}

#[tokio::test]
async fn test_return_seats_need_return_flag() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let mut req = round_trip_request(catalog);
    req.with_return = false;

    let err = booking::create_ticket_order(&store, &Actor::user(42), req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.snapshot().await.ticket_orders.is_empty());
}

#[tokio::test]
async fn test_seat_class_must_match_carriage() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;

    let err = booking::create_ticket_order(
        &store,
        &Actor::user(42),
        one_way_request(catalog, catalog.executive_seat),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut req = one_way_request(catalog, catalog.executive_seat);
    req.ticket_traveler_detail_departure[0].train_carriage_id = catalog.executive_carriage;
    let view = booking::create_ticket_order(&store, &Actor::user(42), req)
        .await
        .unwrap();
    assert_eq!(view.order.price, 400_000);
}

#[tokio::test]
async fn test_carriage_must_belong_to_train() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let mut req = one_way_request(catalog, catalog.economy_seats[0]);
    req.ticket_traveler_detail_departure[0].train_carriage_id = catalog.return_carriage;

    let err = booking::create_ticket_order(&store, &Actor::user(42), req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_stations_must_follow_train_direction() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let mut req = one_way_request(catalog, catalog.economy_seats[0]);
    req.ticket_traveler_detail_departure[0].station_origin_id = catalog.stations[2];
    req.ticket_traveler_detail_departure[0].station_destination_id = catalog.stations[0];

    let err = booking::create_ticket_order(&store, &Actor::user(42), req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_origin_and_destination_differ() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let mut req = one_way_request(catalog, catalog.economy_seats[0]);
    req.ticket_traveler_detail_departure[0].station_destination_id = catalog.stations[0];

    let err = booking::create_ticket_order(&store, &Actor::user(42), req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_station_off_the_route_rejected() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let bandung = store.seed(|s| s.add_station("Bandung", "Bandung").id).await;
    let mut req = one_way_request(catalog, catalog.economy_seats[0]);
    req.ticket_traveler_detail_departure[0].station_destination_id = bandung;

    let err = booking::create_ticket_order(&store, &Actor::user(42), req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_seat_cannot_be_sold_twice_until_released() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let seat = catalog.economy_seats[0];

    let first = booking::create_ticket_order(&store, &Actor::user(5), one_way_request(catalog, seat))
        .await
        .unwrap();

    let err = booking::create_ticket_order(&store, &Actor::user(6), one_way_request(catalog, seat))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // The failed booking left nothing behind.
    let state = store.snapshot().await;
    assert_eq!(state.ticket_orders.len(), 1);
    assert_eq!(state.travelers.len(), 1);
    assert_eq!(state.ticket_traveler_details.len(), 1);
    assert_eq!(state.notifications.len(), 1);

    booking::update_ticket_order_status(&store, &Actor::user(5), first.order.id, OrderStatus::Canceled)
        .await
        .unwrap();

    let state = store.snapshot().await;
    assert!(state
        .ticket_traveler_details
        .iter()
        .filter(|d| d.ticket_order_id == first.order.id)
        .all(|d| d.released));

    let second = booking::create_ticket_order(&store, &Actor::user(6), one_way_request(catalog, seat))
        .await
        .unwrap();
    assert_eq!(second.ticket_traveler_detail[0].detail.train_seat_id, seat);
}

#[tokio::test]
async fn test_same_seat_on_another_day_is_free() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let seat = catalog.economy_seats[0];

    booking::create_ticket_order(&store, &Actor::user(5), one_way_request(catalog, seat))
        .await
        .unwrap();

    let mut req = one_way_request(catalog, seat);
    req.ticket_traveler_detail_departure[0].date = "2024-03-02".to_string();
    assert!(booking::create_ticket_order(&store, &Actor::user(6), req)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_duplicate_seat_within_request_rejected() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let mut req = round_trip_request(catalog);
    req.with_return = false;
    req.ticket_traveler_detail_return.clear();
    req.ticket_traveler_detail_departure[1].train_seat_id = catalog.economy_seats[0];

    let err = booking::create_ticket_order(&store, &Actor::user(42), req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_ticket_detail_narrowed_by_train() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let actor = Actor::user(42);
    let created = booking::create_ticket_order(&store, &actor, round_trip_request(catalog))
        .await
        .unwrap();

    let outbound = view::get_ticket_order(&store, &actor, created.order.id, Some(catalog.outbound_train))
        .await
        .unwrap();
    assert_eq!(outbound.ticket_traveler_detail.len(), 2);
    assert!(outbound
        .ticket_traveler_detail
        .iter()
        .all(|leg| leg.detail.leg == TicketLeg::Departure));

    let err = view::get_ticket_order(&store, &actor, created.order.id, Some(999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_other_users_orders_are_invisible() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    store
        .seed(|s| {
            insert_hotel_order(
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
        })
        .await;

    let err = view::get_hotel_order(&store, &Actor::user(6), 11)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let owner = view::get_hotel_order(&store, &Actor::user(5), 11).await.unwrap();
    assert_eq!(owner.order.id, 11);
    let as_admin = view::get_hotel_order(&store, &admin(), 11).await.unwrap();
    assert_eq!(as_admin, owner);

    let err = booking::update_hotel_order_status(&store, &Actor::user(6), 11, OrderStatus::Paid)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(
        store.snapshot().await.hotel_orders[0].status,
        OrderStatus::Unpaid
    );

    let listed = view::list_hotel_orders(
        &store,
        &Actor::user(6),
        &OrderFilter::default(),
        Paging::new(None, None),
    )
    .await
    .unwrap();
    assert!(listed.items.is_empty());
    assert_eq!(listed.total, 0);
}

#[tokio::test]
async fn test_payment_confirmation_notifies_in_order() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let actor = Actor::user(42);

    let created = booking::create_hotel_order(
        &store,
        &actor,
        hotel_request(catalog, "2024-01-10", "2024-01-11"),
    )
    .await
    .unwrap();

    let paid = booking::update_hotel_order_status(&store, &actor, created.order.id, OrderStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.order.status, OrderStatus::Paid);

    let mut notes = store.snapshot().await.notifications;
    notes.sort_by_key(|n| n.id);
    let templates: Vec<i32> = notes.iter().map(|n| n.template_message_id).collect();
    assert_eq!(templates, vec![4, 5]);
    assert!(notes.iter().all(|n| n.hotel_order_id == Some(created.order.id)));
}

#[tokio::test]
async fn test_repeating_current_status_is_a_no_op() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let actor = Actor::user(42);
    let created = booking::create_hotel_order(
        &store,
        &actor,
        hotel_request(catalog, "2024-01-10", "2024-01-11"),
    )
    .await
    .unwrap();

    booking::update_hotel_order_status(&store, &actor, created.order.id, OrderStatus::Paid)
        .await
        .unwrap();
    let again = booking::update_hotel_order_status(&store, &actor, created.order.id, OrderStatus::Paid)
        .await
        .unwrap();

    assert_eq!(again.order.status, OrderStatus::Paid);
    assert_eq!(store.snapshot().await.notifications.len(), 2);
}

#[tokio::test]
async fn test_closed_orders_never_change() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let actor = Actor::user(42);
    let created = booking::create_ticket_order(
        &store,
        &actor,
        one_way_request(catalog, catalog.economy_seats[0]),
    )
    .await
    .unwrap();
    let id = created.order.id;

    booking::update_ticket_order_status(&store, &actor, id, OrderStatus::Canceled)
        .await
        .unwrap();
    for status in [OrderStatus::Unpaid, OrderStatus::Paid, OrderStatus::Done] {
        let err = booking::update_ticket_order_status(&store, &actor, id, status)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "canceled -> {status}");
    }

    let state = store.snapshot().await;
    assert_eq!(state.ticket_orders[0].status, OrderStatus::Canceled);
    // unpaid on create, canceled on cancel
    let templates: Vec<i32> = state
        .notifications
        .iter()
        .map(|n| n.template_message_id)
        .collect();
    assert_eq!(templates, vec![4, 6]);
}

#[tokio::test]
async fn test_unpaid_order_cannot_skip_to_done() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let actor = Actor::user(42);
    let created = booking::create_hotel_order(
        &store,
        &actor,
        hotel_request(catalog, "2024-01-10", "2024-01-11"),
    )
    .await
    .unwrap();

    let err = booking::update_hotel_order_status(&store, &actor, created.order.id, OrderStatus::Done)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_admin_status_change_notifies_admin() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let created = booking::create_hotel_order(
        &store,
        &Actor::user(42),
        hotel_request(catalog, "2024-01-10", "2024-01-11"),
    )
    .await
    .unwrap();

    booking::update_hotel_order_status(&store, &admin(), created.order.id, OrderStatus::Paid)
        .await
        .unwrap();

    let state = store.snapshot().await;
    let paid = state
        .notifications
        .iter()
        .find(|n| n.template_message_id == 5)
        .unwrap();
    assert_eq!(paid.user_id, ADMIN_ID);
}

#[tokio::test]
async fn test_notifications_render_newest_first() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;
    let actor = Actor::user(42);
    let created = booking::create_hotel_order(
        &store,
        &actor,
        hotel_request(catalog, "2024-01-10", "2024-01-11"),
    )
    .await
    .unwrap();
    booking::update_hotel_order_status(&store, &actor, created.order.id, OrderStatus::Paid)
        .await
        .unwrap();

    let views = notification::list_notifications(&store, &actor).await.unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].template_message_id, 5);
    assert_eq!(views[0].title, "Pembayaran Berhasil");
    assert!(views[0].message.contains("Budi"));
    assert!(views[0].message.contains(&created.order.hotel_order_code));
    assert_eq!(views[1].template_message_id, 4);

    assert!(notification::list_notifications(&store, &Actor::user(6))
        .await
        .unwrap()
        .is_empty());
}

async fn seed_listing(store: &InMemoryStore) {
    store
        .seed(|s| {
            let payment = s.add_payment("BCA");
            for (id, (name, class, day, price)) in [
                ("Alpha", 3, "2024-02-01", 100),
                ("Beta", 5, "2024-02-05", 300),
                ("Gamma", 4, "2024-02-20", 200),
            ]
            .into_iter()
            .enumerate()
            {
                let hotel = s.add_hotel(name, class);
                let room = s.add_hotel_room(hotel.id, "Standard", price, 0);
                let order = insert_hotel_order(
                    s,
                    id as i32 + 1,
                    5,
                    hotel.id,
                    room.id,
                    payment.id,
                    date(day),
                    price,
                    OrderStatus::Unpaid,
                );
                insert_hotel_traveler(s, &order, "Andi");
            }
        })
        .await;
}

#[tokio::test]
async fn test_admin_listing_filters_and_sorts() {
    let store = store_with_users().await;
    seed_listing(&store).await;

    let order_filter = OrderFilter {
        search: Some("be".to_string()),
        min_rating_class: Some(4),
        date_range: Some(DateRange {
            start: Some(date("2024-02-04")),
            end: Some(date("2024-02-10")),
        }),
        order_by: OrderBy::HighestPrice,
        ..Default::default()
    };
    let page = view::list_hotel_orders(&store, &admin(), &order_filter, Paging::new(None, None))
        .await
        .unwrap();

    let names: Vec<&str> = page
        .items
        .iter()
        .map(|o| o.hotel.hotel.name.as_str())
        .collect();
    assert_eq!(names, vec!["Beta"]);
}

#[tokio::test]
async fn test_listing_date_query_keeps_day_before_start() {
    let store = store_with_users().await;
    seed_listing(&store).await;

    let query = OrderListQuery {
        date_start: Some("2024-02-02".to_string()),
        date_end: Some("2024-02-10".to_string()),
        order_by: Some("lowest_price".to_string()),
        ..Default::default()
    };
    let order_filter = query.filter().unwrap();
    let page = view::list_hotel_orders(&store, &admin(), &order_filter, query.paging())
        .await
        .unwrap();

    let names: Vec<&str> = page
        .items
        .iter()
        .map(|o| o.hotel.hotel.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_admin_listing_sort_and_paging() {
    let store = store_with_users().await;
    seed_listing(&store).await;

    let by_price = OrderFilter {
        order_by: OrderBy::LowestPrice,
        ..Default::default()
    };
    let page = view::list_hotel_orders(&store, &admin(), &by_price, Paging::new(None, None))
        .await
        .unwrap();
    let prices: Vec<i64> = page.items.iter().map(|o| o.order.price).collect();
    assert_eq!(prices, vec![100, 200, 300]);
    assert_eq!(page.total, 3);
    assert_eq!(page.limit, 1000);

    let second = view::list_hotel_orders(&store, &admin(), &by_price, Paging::new(Some(2), Some(2)))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].order.price, 300);
    assert_eq!(second.total, 3);
}

#[tokio::test]
async fn test_listing_searches_traveler_names() {
    let store = store_with_users().await;
    seed_listing(&store).await;
    store
        .seed(|s| {
            let order = s.hotel_orders[2].clone();
            insert_hotel_traveler(s, &order, "Siti Rahma");
        })
        .await;

    let page = view::list_hotel_orders(
        &store,
        &Actor::user(5),
        &OrderFilter {
            search: Some("RAHMA".to_string()),
            ..Default::default()
        },
        Paging::new(None, None),
    )
    .await
    .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].hotel.hotel.name, "Gamma");
}

#[tokio::test]
async fn test_ticket_listing_filters_by_status() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;
    let actor = Actor::user(42);
    let [a1, a2] = catalog.economy_seats;

    let first = booking::create_ticket_order(&store, &actor, one_way_request(catalog, a1))
        .await
        .unwrap();
    booking::create_ticket_order(&store, &actor, one_way_request(catalog, a2))
        .await
        .unwrap();
    booking::update_ticket_order_status(&store, &actor, first.order.id, OrderStatus::Paid)
        .await
        .unwrap();

    let paid = view::list_ticket_orders(
        &store,
        &actor,
        &OrderFilter {
            status: Some(OrderStatus::Paid),
            ..Default::default()
        },
        Paging::new(None, None),
    )
    .await
    .unwrap();
    assert_eq!(paid.items.len(), 1);
    assert_eq!(paid.items[0].order.id, first.order.id);

    let by_train = view::list_ticket_orders(
        &store,
        &actor,
        &OrderFilter {
            search: Some("taksaka".to_string()),
            ..Default::default()
        },
        Paging::new(None, None),
    )
    .await
    .unwrap();
    assert_eq!(by_train.items.len(), 2);
}

fn room_request(hotel_id: i32) -> HotelRoomRequest {
    HotelRoomRequest {
        hotel_id,
        name: "Suite".to_string(),
        size_of_room: 40.0,
        quantity_of_room: 2,
        description: String::new(),
        normal_price: 1_000_000,
        discount: 15,
        number_of_guest: 3,
        mattress_size: "king".to_string(),
        number_of_mattress: 1,
    }
}

#[tokio::test]
async fn test_hotel_room_management() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;

    let room = catalog::create_hotel_room(&store, room_request(catalog.hotel_id))
        .await
        .unwrap();
    assert_eq!(room.discount_price, 850_000);

    let mut update = room_request(catalog.hotel_id);
    update.discount = 50;
    let updated = catalog::update_hotel_room(&store, room.id, update).await.unwrap();
    assert_eq!(updated.id, room.id);
    assert_eq!(updated.discount_price, 500_000);

    let mut bad = room_request(catalog.hotel_id);
    bad.discount = 120;
    assert!(matches!(
        catalog::create_hotel_room(&store, bad).await,
        Err(AppError::Validation(_))
    ));

    catalog::delete_hotel_room(&store, room.id).await.unwrap();
    assert!(store
        .get_hotel_room(room.id, Visibility::Live)
        .await
        .unwrap()
        .is_none());
    assert!(matches!(
        catalog::delete_hotel_room(&store, room.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_hotel_detail_lists_cheapest_room() {
    let store = store_with_users().await;
    let catalog = seed_hotel_catalog(&store).await;

    let detail = catalog::get_hotel_detail(&store, catalog.hotel_id).await.unwrap();
    assert_eq!(detail.hotel.hotel.name, "Grand Sari");
    assert_eq!(detail.rooms.len(), 2);
    assert!(detail.hotel.policy.is_some());
    let cheapest = detail.minimum_price_room.unwrap();
    assert_eq!(cheapest.id, 6);
    assert_eq!(cheapest.discount_price, 300_000);
}

#[tokio::test]
async fn test_train_schedule_in_stop_order() {
    let store = store_with_users().await;
    let catalog = seed_train_catalog(&store).await;

    let schedule = catalog::get_train_schedule(&store, catalog.return_train)
        .await
        .unwrap();
    let names: Vec<&str> = schedule
        .stops
        .iter()
        .map(|stop| stop.station.name.as_str())
        .collect();
    assert_eq!(names, vec!["Tugu", "Cirebon", "Gambir"]);
}
