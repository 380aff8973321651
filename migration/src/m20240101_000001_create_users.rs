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
                    .as_enum(UserRole::Enum)
                    .values([UserRole::Admin, UserRole::User])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(User::Table)
                        .if_not_exists()
                        .col(pk_auto(User::Id))
                        .col(string_len(User::FullName, 100).not_null())
                        .col(string_len(User::Email, 255).not_null().unique_key())
                        .col(string_len(User::PasswordHash, 255).not_null())
                        .col(ColumnDef::new(User::Role).custom(UserRole::Enum).not_null())
                        .col(string_len(User::PhoneNumber, 20).not_null().default(""))
                        .col(string_len(User::ProfilePictureUrl, 255).not_null().default(""))
                        .col(string_len(User::Citizen, 50).not_null().default("")),
                )
                .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserRole::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    FullName,
    Email,
    PasswordHash,
    Role,
    PhoneNumber,
    ProfilePictureUrl,
    Citizen,
}

#[derive(DeriveIden)]
pub enum UserRole {
    #[sea_orm(iden = "user_role")]
    Enum,
    #[sea_orm(iden = "admin")]
    Admin,
    #[sea_orm(iden = "user")]
    User,
}
