use sea_orm_migration::{prelude::*, schema::*};

use crate::with_timestamps;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(Hotel::Table)
                        .if_not_exists()
                        .col(pk_auto(Hotel::Id))
                        .col(string_len(Hotel::Name, 150).not_null())
                        .col(integer(Hotel::Class).not_null())
                        .col(text(Hotel::Description).not_null())
                        .col(string_len(Hotel::PhoneNumber, 20).not_null())
                        .col(string_len(Hotel::Email, 255).not_null())
                        .col(text(Hotel::Address).not_null()),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(HotelRoom::Table)
                        .if_not_exists()
                        .col(pk_auto(HotelRoom::Id))
                        .col(integer(HotelRoom::HotelId).not_null())
                        .col(string_len(HotelRoom::Name, 100).not_null())
                        .col(double(HotelRoom::SizeOfRoom).not_null())
                        .col(integer(HotelRoom::QuantityOfRoom).not_null())
                        .col(text(HotelRoom::Description).not_null())
                        .col(big_integer(HotelRoom::NormalPrice).not_null())
                        .col(integer(HotelRoom::Discount).not_null().default(0))
                        .col(big_integer(HotelRoom::DiscountPrice).not_null())
                        .col(integer(HotelRoom::NumberOfGuest).not_null())
                        .col(string_len(HotelRoom::MattressSize, 50).not_null())
                        .col(integer(HotelRoom::NumberOfMattress).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_room_hotel")
                                .from(HotelRoom::Table, HotelRoom::HotelId)
                                .to(Hotel::Table, Hotel::Id)
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
                        .table(HotelImage::Table)
                        .if_not_exists()
                        .col(pk_auto(HotelImage::Id))
                        .col(integer(HotelImage::HotelId).not_null())
                        .col(string_len(HotelImage::ImageUrl, 255).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_image_hotel")
                                .from(HotelImage::Table, HotelImage::HotelId)
                                .to(Hotel::Table, Hotel::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        ),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(HotelFacility::Table)
                        .if_not_exists()
                        .col(pk_auto(HotelFacility::Id))
                        .col(integer(HotelFacility::HotelId).not_null())
                        .col(string_len(HotelFacility::Name, 100).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_facility_hotel")
                                .from(HotelFacility::Table, HotelFacility::HotelId)
                                .to(Hotel::Table, Hotel::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        ),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(HotelPolicy::Table)
                        .if_not_exists()
                        .col(pk_auto(HotelPolicy::Id))
                        .col(integer(HotelPolicy::HotelId).not_null())
                        .col(boolean(HotelPolicy::IsCheckInCheckOut).not_null().default(false))
                        .col(string_len(HotelPolicy::TimeCheckIn, 10).not_null().default(""))
                        .col(string_len(HotelPolicy::TimeCheckOut, 10).not_null().default(""))
                        .col(boolean(HotelPolicy::IsPolicyMinimumAge).not_null().default(false))
                        .col(integer(HotelPolicy::PolicyMinimumAge).not_null().default(0))
                        .col(boolean(HotelPolicy::IsPetsAllowed).not_null().default(false))
                        .col(boolean(HotelPolicy::IsSmokingAllowed).not_null().default(false))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_policy_hotel")
                                .from(HotelPolicy::Table, HotelPolicy::HotelId)
                                .to(Hotel::Table, Hotel::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        ),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(HotelRoomImage::Table)
                        .if_not_exists()
                        .col(pk_auto(HotelRoomImage::Id))
                        .col(integer(HotelRoomImage::HotelRoomId).not_null())
                        .col(string_len(HotelRoomImage::ImageUrl, 255).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_room_image_room")
                                .from(HotelRoomImage::Table, HotelRoomImage::HotelRoomId)
                                .to(HotelRoom::Table, HotelRoom::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        ),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(HotelRoomFacility::Table)
                        .if_not_exists()
                        .col(pk_auto(HotelRoomFacility::Id))
                        .col(integer(HotelRoomFacility::HotelRoomId).not_null())
                        .col(string_len(HotelRoomFacility::Name, 100).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_hotel_room_facility_room")
                                .from(HotelRoomFacility::Table, HotelRoomFacility::HotelRoomId)
                                .to(HotelRoom::Table, HotelRoom::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        ),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HotelRoomFacility::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HotelRoomImage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HotelPolicy::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HotelFacility::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HotelImage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HotelRoom::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hotel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Hotel {
    Table,
    Id,
    Name,
    Class,
    Description,
    PhoneNumber,
    Email,
    Address,
}

#[derive(DeriveIden)]
pub enum HotelRoom {
    Table,
    Id,
    HotelId,
    Name,
    SizeOfRoom,
    QuantityOfRoom,
    Description,
    NormalPrice,
    Discount,
    DiscountPrice,
    NumberOfGuest,
    MattressSize,
    NumberOfMattress,
}

#[derive(DeriveIden)]
enum HotelImage {
    Table,
    Id,
    HotelId,
    ImageUrl,
}

#[derive(DeriveIden)]
enum HotelFacility {
    Table,
    Id,
    HotelId,
    Name,
}

#[derive(DeriveIden)]
enum HotelPolicy {
    Table,
    Id,
    HotelId,
    IsCheckInCheckOut,
    TimeCheckIn,
    TimeCheckOut,
    IsPolicyMinimumAge,
    PolicyMinimumAge,
    IsPetsAllowed,
    IsSmokingAllowed,
}

#[derive(DeriveIden)]
enum HotelRoomImage {
    Table,
    Id,
    HotelRoomId,
    ImageUrl,
}

#[derive(DeriveIden)]
enum HotelRoomFacility {
    Table,
    Id,
    HotelRoomId,
    Name,
}
