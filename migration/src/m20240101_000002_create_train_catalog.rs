use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use crate::with_timestamps;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TrainClass::Enum)
                    .values([TrainClass::Ekonomi, TrainClass::Bisnis, TrainClass::Eksekutif])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(Station::Table)
                        .if_not_exists()
                        .col(pk_auto(Station::Id))
                        .col(string_len(Station::Origin, 100).not_null())
                        .col(string_len(Station::Name, 100).not_null())
                        .col(string_len(Station::Initial, 10).not_null()),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(Train::Table)
                        .if_not_exists()
                        .col(pk_auto(Train::Id))
                        .col(string_len(Train::CodeTrain, 20).not_null())
                        .col(string_len(Train::Name, 100).not_null())
                        .col(string_len(Train::Status, 20).not_null().default("available")),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(TrainStation::Table)
                        .if_not_exists()
                        .col(pk_auto(TrainStation::Id))
                        .col(integer(TrainStation::TrainId).not_null())
                        .col(integer(TrainStation::StationId).not_null())
                        .col(time(TrainStation::ArriveTime).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_train_station_train")
                                .from(TrainStation::Table, TrainStation::TrainId)
                                .to(Train::Table, Train::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_train_station_station")
                                .from(TrainStation::Table, TrainStation::StationId)
                                .to(Station::Table, Station::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_train_station_train_station")
                    .table(TrainStation::Table)
                    .col(TrainStation::TrainId)
                    .col(TrainStation::StationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(TrainCarriage::Table)
                        .if_not_exists()
                        .col(pk_auto(TrainCarriage::Id))
                        .col(integer(TrainCarriage::TrainId).not_null())
                        .col(ColumnDef::new(TrainCarriage::Class).custom(TrainClass::Enum).not_null())
                        .col(string_len(TrainCarriage::Name, 50).not_null())
                        .col(big_integer(TrainCarriage::Price).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_train_carriage_train")
                                .from(TrainCarriage::Table, TrainCarriage::TrainId)
                                .to(Train::Table, Train::Id)
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
                        .table(TrainSeat::Table)
                        .if_not_exists()
                        .col(pk_auto(TrainSeat::Id))
                        .col(ColumnDef::new(TrainSeat::Class).custom(TrainClass::Enum).not_null())
                        .col(string_len(TrainSeat::Name, 10).not_null()),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrainSeat::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrainCarriage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrainStation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Train::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Station::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TrainClass::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Station {
    Table,
    Id,
    Origin,
    Name,
    Initial,
}

#[derive(DeriveIden)]
pub enum Train {
    Table,
    Id,
    CodeTrain,
    Name,
    Status,
}

#[derive(DeriveIden)]
pub enum TrainStation {
    Table,
    Id,
    TrainId,
    StationId,
    ArriveTime,
}

#[derive(DeriveIden)]
pub enum TrainCarriage {
    Table,
    Id,
    TrainId,
    Class,
    Name,
    Price,
}

#[derive(DeriveIden)]
pub enum TrainSeat {
    Table,
    Id,
    Class,
    Name,
}

#[derive(DeriveIden)]
pub enum TrainClass {
    #[sea_orm(iden = "train_class")]
    Enum,
    #[sea_orm(iden = "Ekonomi")]
    Ekonomi,
    #[sea_orm(iden = "Bisnis")]
    Bisnis,
    #[sea_orm(iden = "Eksekutif")]
    Eksekutif,
}
