use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20240101_000001_create_users::User;
use super::m20240101_000002_create_train_catalog::{Station, Train, TrainCarriage, TrainSeat};
use super::m20240101_000003_create_hotel_catalog::{Hotel, HotelRoom};
use super::m20240101_000004_create_payments_and_templates::{Payment, TemplateMessage};
use crate::{with_timestamps, Timestamps};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(OrderStatus::Enum)
                    .values([
                        OrderStatus::Unpaid,
                        OrderStatus::Paid,
                        OrderStatus::Done,
                        OrderStatus::Canceled,
                        OrderStatus::Refund,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(TicketLeg::Enum)
                    .values([TicketLeg::Departure, TicketLeg::Return])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(TicketOrder::Table)
                        .if_not_exists()
                        .col(pk_auto(TicketOrder::Id))
                        .col(integer(TicketOrder::UserId).not_null())
                        .col(integer(TicketOrder::QuantityAdult).not_null())
                        .col(integer(TicketOrder::QuantityInfant).not_null().default(0))
                        .col(big_integer(TicketOrder::Price).not_null())
                        .col(big_integer(TicketOrder::TotalAmount).not_null())
                        .col(boolean(TicketOrder::WithReturn).not_null().default(false))
                        .col(integer(TicketOrder::PaymentId).not_null())
                        .col(string_len(TicketOrder::NameOrder, 100).not_null())
                        .col(string_len(TicketOrder::EmailOrder, 255).not_null())
                        .col(string_len(TicketOrder::PhoneNumberOrder, 20).not_null())
                        .col(string_len(TicketOrder::TicketOrderCode, 64).not_null().unique_key())
                        .col(ColumnDef::new(TicketOrder::Status).custom(OrderStatus::Enum).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_order_user")
                                .from(TicketOrder::Table, TicketOrder::UserId)
                                .to(User::Table, User::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_order_payment")
                                .from(TicketOrder::Table, TicketOrder::PaymentId)
                                .to(Payment::Table, Payment::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(HotelOrder::Table)
                        .if_not_exists()
                        .col(pk_auto(HotelOrder::Id))
                        .col(integer(HotelOrder::UserId).not_null())
                        .col(integer(HotelOrder::HotelId).not_null())
                        .col(integer(HotelOrder::HotelRoomId).not_null())
                        .col(integer(HotelOrder::QuantityAdult).not_null())
                        .col(integer(HotelOrder::QuantityInfant).not_null().default(0))
                        .col(integer(HotelOrder::NumberOfNights).not_null())
                        .col(date(HotelOrder::DateStart).not_null())
                        .col(date(HotelOrder::DateEnd).not_null())
                        .col(big_integer(HotelOrder::Price).not_null())
                        .col(big_integer(HotelOrder::TotalAmount).not_null())
                        .col(integer(HotelOrder::PaymentId).not_null())
                        .col(string_len(HotelOrder::NameOrder, 100).not_null())
                        .col(string_len(HotelOrder::EmailOrder, 255).not_null())
                        .col(string_len(HotelOrder::PhoneNumberOrder, 20).not_null())
                        .col(text(HotelOrder::SpecialRequest).not_null().default(""))
                        .col(string_len(HotelOrder::HotelOrderCode, 64).not_null().unique_key())
                        .col(boolean(HotelOrder::IsCheckIn).not_null().default(false))
                        .col(boolean(HotelOrder::IsCheckOut).not_null().default(false))
                        .col(ColumnDef::new(HotelOrder::Status).custom(OrderStatus::Enum).not_null())
                        .check(
                            Expr::col(HotelOrder::DateStart).lte(Expr::col(HotelOrder::DateEnd)),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_order_user")
                                .from(HotelOrder::Table, HotelOrder::UserId)
                                .to(User::Table, User::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_order_hotel")
                                .from(HotelOrder::Table, HotelOrder::HotelId)
                                .to(Hotel::Table, Hotel::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_order_room")
                                .from(HotelOrder::Table, HotelOrder::HotelRoomId)
                                .to(HotelRoom::Table, HotelRoom::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_order_payment")
                                .from(HotelOrder::Table, HotelOrder::PaymentId)
                                .to(Payment::Table, Payment::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // A traveller belongs to at most one kind of order.
        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(TravelerDetail::Table)
                        .if_not_exists()
                        .col(pk_auto(TravelerDetail::Id))
                        .col(integer(TravelerDetail::UserId).not_null())
                        .col(integer_null(TravelerDetail::TicketOrderId))
                        .col(integer_null(TravelerDetail::HotelOrderId))
                        .col(string_len(TravelerDetail::Title, 20).not_null())
                        .col(string_len(TravelerDetail::FullName, 100).not_null())
                        .col(string_len_null(TravelerDetail::IdCardNumber, 50))
                        .check(
                            Expr::col(TravelerDetail::TicketOrderId)
                                .is_null()
                                .or(Expr::col(TravelerDetail::HotelOrderId).is_null()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_traveler_detail_user")
                                .from(TravelerDetail::Table, TravelerDetail::UserId)
                                .to(User::Table, User::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_traveler_detail_ticket_order")
                                .from(TravelerDetail::Table, TravelerDetail::TicketOrderId)
                                .to(TicketOrder::Table, TicketOrder::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_traveler_detail_hotel_order")
                                .from(TravelerDetail::Table, TravelerDetail::HotelOrderId)
                                .to(HotelOrder::Table, HotelOrder::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(TicketTravelerDetail::Table)
                        .if_not_exists()
                        .col(pk_auto(TicketTravelerDetail::Id))
                        .col(integer(TicketTravelerDetail::TicketOrderId).not_null())
                        .col(integer(TicketTravelerDetail::TravelerDetailId).not_null())
                        .col(integer(TicketTravelerDetail::TrainId).not_null())
                        .col(integer(TicketTravelerDetail::TrainCarriageId).not_null())
                        .col(integer(TicketTravelerDetail::TrainSeatId).not_null())
                        .col(integer(TicketTravelerDetail::StationOriginId).not_null())
                        .col(integer(TicketTravelerDetail::StationDestinationId).not_null())
                        .col(ColumnDef::new(TicketTravelerDetail::Leg).custom(TicketLeg::Enum).not_null())
                        .col(time(TicketTravelerDetail::DepartureTime).not_null())
                        .col(time(TicketTravelerDetail::ArrivalTime).not_null())
                        .col(date(TicketTravelerDetail::DateOfDeparture).not_null())
                        .col(
                            string_len(TicketTravelerDetail::BoardingTicketCode, 64)
                                .not_null()
                                .unique_key(),
                        )
                        .col(boolean(TicketTravelerDetail::Released).not_null().default(false))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_traveler_detail_order")
                                .from(TicketTravelerDetail::Table, TicketTravelerDetail::TicketOrderId)
                                .to(TicketOrder::Table, TicketOrder::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_traveler_detail_traveler")
                                .from(TicketTravelerDetail::Table, TicketTravelerDetail::TravelerDetailId)
                                .to(TravelerDetail::Table, TravelerDetail::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_traveler_detail_train")
                                .from(TicketTravelerDetail::Table, TicketTravelerDetail::TrainId)
                                .to(Train::Table, Train::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_traveler_detail_carriage")
                                .from(TicketTravelerDetail::Table, TicketTravelerDetail::TrainCarriageId)
                                .to(TrainCarriage::Table, TrainCarriage::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_traveler_detail_seat")
                                .from(TicketTravelerDetail::Table, TicketTravelerDetail::TrainSeatId)
                                .to(TrainSeat::Table, TrainSeat::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_traveler_detail_origin")
                                .from(TicketTravelerDetail::Table, TicketTravelerDetail::StationOriginId)
                                .to(Station::Table, Station::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_ticket_traveler_detail_destination")
                                .from(
                                    TicketTravelerDetail::Table,
                                    TicketTravelerDetail::StationDestinationId,
                                )
                                .to(Station::Table, Station::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // One live holder per seat and day; canceled and refunded orders
        // release their rows.
        manager
            .create_index(
                Index::create()
                    .name("uq_ticket_traveler_detail_live_seat")
                    .table(TicketTravelerDetail::Table)
                    .col(TicketTravelerDetail::TrainId)
                    .col(TicketTravelerDetail::TrainCarriageId)
                    .col(TicketTravelerDetail::TrainSeatId)
                    .col(TicketTravelerDetail::DateOfDeparture)
                    .unique()
                    .and_where(Expr::col(TicketTravelerDetail::Released).eq(false))
                    .and_where(Expr::col(Timestamps::DeletedAt).is_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(Notification::Table)
                        .if_not_exists()
                        .col(pk_auto(Notification::Id))
                        .col(integer(Notification::UserId).not_null())
                        .col(integer(Notification::TemplateMessageId).not_null())
                        .col(integer_null(Notification::HotelOrderId))
                        .col(integer_null(Notification::TicketOrderId))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_notification_user")
                                .from(Notification::Table, Notification::UserId)
                                .to(User::Table, User::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_notification_template")
                                .from(Notification::Table, Notification::TemplateMessageId)
                                .to(TemplateMessage::Table, TemplateMessage::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TicketTravelerDetail::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TravelerDetail::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HotelOrder::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TicketOrder::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(TicketLeg::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(OrderStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TicketOrder {
    Table,
    Id,
    UserId,
    QuantityAdult,
    QuantityInfant,
    Price,
    TotalAmount,
    WithReturn,
    PaymentId,
    NameOrder,
    EmailOrder,
    PhoneNumberOrder,
    TicketOrderCode,
    Status,
}

#[derive(DeriveIden)]
enum HotelOrder {
    Table,
    Id,
    UserId,
    HotelId,
    HotelRoomId,
    QuantityAdult,
    QuantityInfant,
    NumberOfNights,
    DateStart,
    DateEnd,
    Price,
    TotalAmount,
    PaymentId,
    NameOrder,
    EmailOrder,
    PhoneNumberOrder,
    SpecialRequest,
    HotelOrderCode,
    IsCheckIn,
    IsCheckOut,
    Status,
}

#[derive(DeriveIden)]
enum TravelerDetail {
    Table,
    Id,
    UserId,
    TicketOrderId,
    HotelOrderId,
    Title,
    FullName,
    IdCardNumber,
}

#[derive(DeriveIden)]
enum TicketTravelerDetail {
    Table,
    Id,
    TicketOrderId,
    TravelerDetailId,
    TrainId,
    TrainCarriageId,
    TrainSeatId,
    StationOriginId,
    StationDestinationId,
    Leg,
    DepartureTime,
    ArrivalTime,
    DateOfDeparture,
    BoardingTicketCode,
    Released,
}

#[derive(DeriveIden)]
enum Notification {
    Table,
    Id,
    UserId,
    TemplateMessageId,
    HotelOrderId,
    TicketOrderId,
}

#[derive(DeriveIden)]
enum OrderStatus {
    #[sea_orm(iden = "order_status")]
    Enum,
    #[sea_orm(iden = "unpaid")]
    Unpaid,
    #[sea_orm(iden = "paid")]
    Paid,
    #[sea_orm(iden = "done")]
    Done,
    #[sea_orm(iden = "canceled")]
    Canceled,
    #[sea_orm(iden = "refund")]
    Refund,
}

#[derive(DeriveIden)]
enum TicketLeg {
    #[sea_orm(iden = "ticket_leg")]
    Enum,
    #[sea_orm(iden = "departure")]
    Departure,
    #[sea_orm(iden = "return")]
    Return,
}
