use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    Set, SqlErr, TransactionTrait,
};

use super::{
    CatalogStore, HotelOrderQuery, NewHotelOrder, NewHotelRoom, NewNotification, NewTicketOrder,
    NewTicketTravelerDetail, NewTraveler, NewUser, OrderRepository, OrderTransaction,
    TicketOrderQuery, UserStore, Visibility,
};
use crate::domain::filter::OrderBy;
use crate::domain::Actor;
use crate::entities::ticket_traveler_detail::{SeatKey, LIVE_SEAT_INDEX};
use crate::entities::{
    hotel, hotel_facility, hotel_image, hotel_order, hotel_policy, hotel_room,
    hotel_room_facility, hotel_room_image, notification, payment, station, template_message,
    ticket_order, ticket_traveler_detail, train, train_carriage, train_seat, train_station,
    traveler_detail, user,
};
use crate::error::{AppError, AppResult};
use crate::utils::clock;

/// Soft-delete scope for a lookup.
fn scoped<C: ColumnTrait>(deleted_at: C, visibility: Visibility) -> Condition {
    match visibility {
        Visibility::Live => Condition::all().add(deleted_at.is_null()),
        Visibility::WithDeleted => Condition::all(),
    }
}

/// Restricts non-admin callers to their own rows.
fn owned_by<C: ColumnTrait>(user_id: C, actor: &Actor) -> Condition {
    if actor.is_admin() {
        Condition::all()
    } else {
        Condition::all().add(user_id.eq(actor.user_id))
    }
}

/// A second live holder of a seat trips the partial unique index.
fn seat_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains(LIVE_SEAT_INDEX) => {
            AppError::Validation("Seat is already booked".to_string())
        }
        _ => err.into(),
    }
}

fn ordered<E, C>(select: Select<E>, order_by: OrderBy, created_at: C, price: C, id: C) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    match order_by {
        OrderBy::Latest => select.order_by_desc(created_at).order_by_desc(id),
        OrderBy::Oldest => select.order_by_asc(created_at).order_by_asc(id),
        OrderBy::HighestPrice => select.order_by_desc(price).order_by_desc(id),
        OrderBy::LowestPrice => select.order_by_asc(price).order_by_asc(id),
    }
}

pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for SeaOrmStore {
    async fn create_user(&self, new: NewUser) -> AppResult<user::Model> {
        let now = clock::now();
        let user = user::ActiveModel {
            full_name: Set(new.full_name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            role: Set(new.role),
            phone_number: Set(new.phone_number),
            profile_picture_url: Set(String::new()),
            citizen: Set(new.citizen),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(user.insert(&self.db).await?)
    }

    async fn get_user(&self, id: i32) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?)
    }
}

#[async_trait]
impl CatalogStore for SeaOrmStore {
    async fn get_train(&self, id: i32, visibility: Visibility) -> AppResult<Option<train::Model>> {
        Ok(train::Entity::find_by_id(id)
            .filter(scoped(train::Column::DeletedAt, visibility))
            .one(&self.db)
            .await?)
    }

    async fn get_station(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<station::Model>> {
        Ok(station::Entity::find_by_id(id)
            .filter(scoped(station::Column::DeletedAt, visibility))
            .one(&self.db)
            .await?)
    }

    async fn get_train_station(
        &self,
        train_id: i32,
        station_id: i32,
    ) -> AppResult<Option<train_station::Model>> {
        let rows = train_station::Entity::find()
            .filter(train_station::Column::TrainId.eq(train_id))
            .filter(train_station::Column::StationId.eq(station_id))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .min_by_key(|r| (r.deleted_at.is_some(), r.id)))
    }

    async fn list_train_stations(&self, train_id: i32) -> AppResult<Vec<train_station::Model>> {
        Ok(train_station::Entity::find()
            .filter(train_station::Column::TrainId.eq(train_id))
            .filter(train_station::Column::DeletedAt.is_null())
            .order_by_asc(train_station::Column::ArriveTime)
            .order_by_asc(train_station::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_train_carriage(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<train_carriage::Model>> {
        Ok(train_carriage::Entity::find_by_id(id)
            .filter(scoped(train_carriage::Column::DeletedAt, visibility))
            .one(&self.db)
            .await?)
    }

    async fn get_train_seat(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<train_seat::Model>> {
        Ok(train_seat::Entity::find_by_id(id)
            .filter(scoped(train_seat::Column::DeletedAt, visibility))
            .one(&self.db)
            .await?)
    }

    async fn get_hotel(&self, id: i32, visibility: Visibility) -> AppResult<Option<hotel::Model>> {
        Ok(hotel::Entity::find_by_id(id)
            .filter(scoped(hotel::Column::DeletedAt, visibility))
            .one(&self.db)
            .await?)
    }

    async fn get_hotel_room(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<hotel_room::Model>> {
        Ok(hotel_room::Entity::find_by_id(id)
            .filter(scoped(hotel_room::Column::DeletedAt, visibility))
            .one(&self.db)
            .await?)
    }

    async fn get_minimum_price_room_for_hotel(
        &self,
        hotel_id: i32,
    ) -> AppResult<Option<hotel_room::Model>> {
        Ok(hotel_room::Entity::find()
            .filter(hotel_room::Column::HotelId.eq(hotel_id))
            .filter(hotel_room::Column::DeletedAt.is_null())
            .order_by_asc(hotel_room::Column::DiscountPrice)
            .order_by_asc(hotel_room::Column::Id)
            .one(&self.db)
            .await?)
    }

    async fn list_rooms_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room::Model>> {
        Ok(hotel_room::Entity::find()
            .filter(hotel_room::Column::HotelId.eq(hotel_id))
            .filter(scoped(hotel_room::Column::DeletedAt, visibility))
            .order_by_asc(hotel_room::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_images_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_image::Model>> {
        Ok(hotel_image::Entity::find()
            .filter(hotel_image::Column::HotelId.eq(hotel_id))
            .filter(scoped(hotel_image::Column::DeletedAt, visibility))
            .order_by_asc(hotel_image::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_facilities_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_facility::Model>> {
        Ok(hotel_facility::Entity::find()
            .filter(hotel_facility::Column::HotelId.eq(hotel_id))
            .filter(scoped(hotel_facility::Column::DeletedAt, visibility))
            .order_by_asc(hotel_facility::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_policy_for_hotel(
        &self,
        hotel_id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<hotel_policy::Model>> {
        Ok(hotel_policy::Entity::find()
            .filter(hotel_policy::Column::HotelId.eq(hotel_id))
            .filter(scoped(hotel_policy::Column::DeletedAt, visibility))
            .order_by_asc(hotel_policy::Column::Id)
            .one(&self.db)
            .await?)
    }

    async fn list_images_for_room(
        &self,
        hotel_room_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room_image::Model>> {
        Ok(hotel_room_image::Entity::find()
            .filter(hotel_room_image::Column::HotelRoomId.eq(hotel_room_id))
            .filter(scoped(hotel_room_image::Column::DeletedAt, visibility))
            .order_by_asc(hotel_room_image::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_facilities_for_room(
        &self,
        hotel_room_id: i32,
        visibility: Visibility,
    ) -> AppResult<Vec<hotel_room_facility::Model>> {
        Ok(hotel_room_facility::Entity::find()
            .filter(hotel_room_facility::Column::HotelRoomId.eq(hotel_room_id))
            .filter(scoped(hotel_room_facility::Column::DeletedAt, visibility))
            .order_by_asc(hotel_room_facility::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn get_payment(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> AppResult<Option<payment::Model>> {
        Ok(payment::Entity::find_by_id(id)
            .filter(scoped(payment::Column::DeletedAt, visibility))
            .one(&self.db)
            .await?)
    }

    async fn get_template_message(&self, id: i32) -> AppResult<Option<template_message::Model>> {
        Ok(template_message::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create_hotel_room(&self, new: NewHotelRoom) -> AppResult<hotel_room::Model> {
        let now = clock::now();
        let room = hotel_room::ActiveModel {
            hotel_id: Set(new.hotel_id),
            name: Set(new.name),
            size_of_room: Set(new.size_of_room),
            quantity_of_room: Set(new.quantity_of_room),
            description: Set(new.description),
            normal_price: Set(new.normal_price),
            discount: Set(new.discount),
            discount_price: Set(new.discount_price),
            number_of_guest: Set(new.number_of_guest),
            mattress_size: Set(new.mattress_size),
            number_of_mattress: Set(new.number_of_mattress),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(room.insert(&self.db).await?)
    }

    async fn update_hotel_room(&self, room: hotel_room::Model) -> AppResult<hotel_room::Model> {
        let existing = hotel_room::Entity::find_by_id(room.id)
            .filter(hotel_room::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        if existing.is_none() {
            return Err(AppError::NotFound("Hotel room not found".to_string()));
        }

        let mut active = room.into_active_model().reset_all();
        active.updated_at = Set(clock::now());
        Ok(active.update(&self.db).await?)
    }

    async fn soft_delete_hotel_room(&self, id: i32) -> AppResult<bool> {
        let result = hotel_room::Entity::update_many()
            .col_expr(hotel_room::Column::DeletedAt, Expr::value(clock::now()))
            .filter(hotel_room::Column::Id.eq(id))
            .filter(hotel_room::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl OrderRepository for SeaOrmStore {
    async fn begin(&self) -> AppResult<Box<dyn OrderTransaction>> {
        let txn = self.db.begin().await?;
        Ok(Box::new(SeaOrmTransaction { txn }))
    }

    async fn get_ticket_order(
        &self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<ticket_order::Model>> {
        Ok(ticket_order::Entity::find_by_id(id)
            .filter(ticket_order::Column::DeletedAt.is_null())
            .filter(owned_by(ticket_order::Column::UserId, actor))
            .one(&self.db)
            .await?)
    }

    async fn get_hotel_order(
        &self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<hotel_order::Model>> {
        Ok(hotel_order::Entity::find_by_id(id)
            .filter(hotel_order::Column::DeletedAt.is_null())
            .filter(owned_by(hotel_order::Column::UserId, actor))
            .one(&self.db)
            .await?)
    }

    async fn list_hotel_orders(
        &self,
        actor: &Actor,
        query: &HotelOrderQuery,
    ) -> AppResult<(Vec<hotel_order::Model>, u64)> {
        let mut select = hotel_order::Entity::find()
            .filter(hotel_order::Column::DeletedAt.is_null())
            .filter(owned_by(hotel_order::Column::UserId, actor));

        if let Some(status) = query.status {
            select = select.filter(hotel_order::Column::Status.eq(status));
        }
        if let Some(range) = query.date_range {
            if let Some(start) = range.start {
                select = select.filter(hotel_order::Column::DateStart.gte(start));
            }
            if let Some(end) = range.end {
                select = select.filter(hotel_order::Column::DateStart.lte(end));
            }
        }
        if let Some(min) = query.min_rating_class {
            select = select
                .inner_join(hotel::Entity)
                .filter(hotel::Column::Class.gte(min));
        }

        let select = ordered(
            select,
            query.order_by,
            hotel_order::Column::CreatedAt,
            hotel_order::Column::Price,
            hotel_order::Column::Id,
        );

        let paginator = select.paginate(&self.db, query.limit.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(query.page.saturating_sub(1)).await?;

        Ok((orders, total))
    }

    async fn list_ticket_orders(
        &self,
        actor: &Actor,
        query: &TicketOrderQuery,
    ) -> AppResult<(Vec<ticket_order::Model>, u64)> {
        let mut select = ticket_order::Entity::find()
            .filter(ticket_order::Column::DeletedAt.is_null())
            .filter(owned_by(ticket_order::Column::UserId, actor));

        if let Some(status) = query.status {
            select = select.filter(ticket_order::Column::Status.eq(status));
        }

        let select = ordered(
            select,
            query.order_by,
            ticket_order::Column::CreatedAt,
            ticket_order::Column::Price,
            ticket_order::Column::Id,
        );

        let paginator = select.paginate(&self.db, query.limit.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(query.page.saturating_sub(1)).await?;

        Ok((orders, total))
    }

    async fn list_travelers_for_hotel_order(
        &self,
        hotel_order_id: i32,
    ) -> AppResult<Vec<traveler_detail::Model>> {
        Ok(traveler_detail::Entity::find()
            .filter(traveler_detail::Column::HotelOrderId.eq(hotel_order_id))
            .filter(traveler_detail::Column::DeletedAt.is_null())
            .order_by_asc(traveler_detail::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_travelers_for_ticket_order(
        &self,
        ticket_order_id: i32,
    ) -> AppResult<Vec<traveler_detail::Model>> {
        Ok(traveler_detail::Entity::find()
            .filter(traveler_detail::Column::TicketOrderId.eq(ticket_order_id))
            .filter(traveler_detail::Column::DeletedAt.is_null())
            .order_by_asc(traveler_detail::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_ticket_traveler_details(
        &self,
        ticket_order_id: i32,
    ) -> AppResult<Vec<ticket_traveler_detail::Model>> {
        Ok(ticket_traveler_detail::Entity::find()
            .filter(ticket_traveler_detail::Column::TicketOrderId.eq(ticket_order_id))
            .filter(ticket_traveler_detail::Column::DeletedAt.is_null())
            .order_by_asc(ticket_traveler_detail::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn list_notifications(&self, user_id: i32) -> AppResult<Vec<notification::Model>> {
        Ok(notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::DeletedAt.is_null())
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .all(&self.db)
            .await?)
    }
}

/// One database transaction. Rolled back by sea-orm when dropped uncommitted.
pub struct SeaOrmTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl OrderTransaction for SeaOrmTransaction {
    async fn create_hotel_order(&mut self, new: NewHotelOrder) -> AppResult<hotel_order::Model> {
        let now = clock::now();
        let order = hotel_order::ActiveModel {
            user_id: Set(new.user_id),
            hotel_id: Set(new.hotel_id),
            hotel_room_id: Set(new.hotel_room_id),
            quantity_adult: Set(new.quantity_adult),
            quantity_infant: Set(new.quantity_infant),
            number_of_nights: Set(new.number_of_nights),
            date_start: Set(new.date_start),
            date_end: Set(new.date_end),
            price: Set(new.price),
            total_amount: Set(new.total_amount),
            payment_id: Set(new.payment_id),
            name_order: Set(new.name_order),
            email_order: Set(new.email_order),
            phone_number_order: Set(new.phone_number_order),
            special_request: Set(new.special_request),
            hotel_order_code: Set(new.hotel_order_code),
            is_check_in: Set(false),
            is_check_out: Set(false),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(order.insert(&self.txn).await?)
    }

    async fn create_ticket_order(
        &mut self,
        new: NewTicketOrder,
    ) -> AppResult<ticket_order::Model> {
        let now = clock::now();
        let order = ticket_order::ActiveModel {
            user_id: Set(new.user_id),
            quantity_adult: Set(new.quantity_adult),
            quantity_infant: Set(new.quantity_infant),
            price: Set(new.price),
            total_amount: Set(new.total_amount),
            with_return: Set(new.with_return),
            payment_id: Set(new.payment_id),
            name_order: Set(new.name_order),
            email_order: Set(new.email_order),
            phone_number_order: Set(new.phone_number_order),
            ticket_order_code: Set(new.ticket_order_code),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(order.insert(&self.txn).await?)
    }

    async fn create_traveler(&mut self, new: NewTraveler) -> AppResult<traveler_detail::Model> {
        let now = clock::now();
        let traveler = traveler_detail::ActiveModel {
            user_id: Set(new.user_id),
            ticket_order_id: Set(new.owner.ticket_order_id()),
            hotel_order_id: Set(new.owner.hotel_order_id()),
            title: Set(new.title),
            full_name: Set(new.full_name),
            id_card_number: Set(new.id_card_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(traveler.insert(&self.txn).await?)
    }

    async fn create_ticket_traveler_detail(
        &mut self,
        new: NewTicketTravelerDetail,
    ) -> AppResult<ticket_traveler_detail::Model> {
        let now = clock::now();
        let detail = ticket_traveler_detail::ActiveModel {
            ticket_order_id: Set(new.ticket_order_id),
            traveler_detail_id: Set(new.traveler_detail_id),
            train_id: Set(new.train_id),
            train_carriage_id: Set(new.train_carriage_id),
            train_seat_id: Set(new.train_seat_id),
            station_origin_id: Set(new.station_origin_id),
            station_destination_id: Set(new.station_destination_id),
            leg: Set(new.leg),
            departure_time: Set(new.departure_time),
            arrival_time: Set(new.arrival_time),
            date_of_departure: Set(new.date_of_departure),
            boarding_ticket_code: Set(new.boarding_ticket_code),
            released: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        detail.insert(&self.txn).await.map_err(seat_conflict)
    }

    async fn create_notification(
        &mut self,
        new: NewNotification,
    ) -> AppResult<notification::Model> {
        let now = clock::now();
        let notification = notification::ActiveModel {
            user_id: Set(new.user_id),
            template_message_id: Set(new.template_message_id),
            hotel_order_id: Set(new.hotel_order_id),
            ticket_order_id: Set(new.ticket_order_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(notification.insert(&self.txn).await?)
    }

    async fn seat_taken(&mut self, seat: SeatKey) -> AppResult<bool> {
        let taken = ticket_traveler_detail::Entity::find()
            .filter(ticket_traveler_detail::Column::TrainId.eq(seat.train_id))
            .filter(ticket_traveler_detail::Column::TrainCarriageId.eq(seat.train_carriage_id))
            .filter(ticket_traveler_detail::Column::TrainSeatId.eq(seat.train_seat_id))
            .filter(ticket_traveler_detail::Column::DateOfDeparture.eq(seat.date_of_departure))
            .filter(ticket_traveler_detail::Column::DeletedAt.is_null())
            .filter(ticket_traveler_detail::Column::Released.eq(false))
            .one(&self.txn)
            .await?;

        Ok(taken.is_some())
    }

    async fn release_seats(&mut self, ticket_order_id: i32) -> AppResult<u64> {
        let result = ticket_traveler_detail::Entity::update_many()
            .col_expr(ticket_traveler_detail::Column::Released, Expr::value(true))
            .col_expr(ticket_traveler_detail::Column::UpdatedAt, Expr::value(clock::now()))
            .filter(ticket_traveler_detail::Column::TicketOrderId.eq(ticket_order_id))
            .filter(ticket_traveler_detail::Column::Released.eq(false))
            .exec(&self.txn)
            .await?;

        Ok(result.rows_affected)
    }

    async fn lock_hotel_order(
        &mut self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<hotel_order::Model>> {
        Ok(hotel_order::Entity::find_by_id(id)
            .filter(hotel_order::Column::DeletedAt.is_null())
            .filter(owned_by(hotel_order::Column::UserId, actor))
            .lock_exclusive()
            .one(&self.txn)
            .await?)
    }

    async fn lock_ticket_order(
        &mut self,
        id: i32,
        actor: &Actor,
    ) -> AppResult<Option<ticket_order::Model>> {
        Ok(ticket_order::Entity::find_by_id(id)
            .filter(ticket_order::Column::DeletedAt.is_null())
            .filter(owned_by(ticket_order::Column::UserId, actor))
            .lock_exclusive()
            .one(&self.txn)
            .await?)
    }

    async fn update_hotel_order(
        &mut self,
        order: hotel_order::Model,
    ) -> AppResult<hotel_order::Model> {
        let mut active = order.into_active_model().reset_all();
        active.updated_at = Set(clock::now());
        Ok(active.update(&self.txn).await?)
    }

    async fn update_ticket_order(
        &mut self,
        order: ticket_order::Model,
    ) -> AppResult<ticket_order::Model> {
        let mut active = order.into_active_model().reset_all();
        active.updated_at = Set(clock::now());
        Ok(active.update(&self.txn).await?)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.txn.commit().await?;
        Ok(())
    }
}
