pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_train_catalog;
mod m20240101_000003_create_hotel_catalog;
mod m20240101_000004_create_payments_and_templates;
mod m20240101_000005_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_train_catalog::Migration),
            Box::new(m20240101_000003_create_hotel_catalog::Migration),
            Box::new(m20240101_000004_create_payments_and_templates::Migration),
            Box::new(m20240101_000005_create_orders::Migration),
        ]
    }
}

/// Bookkeeping columns shared by every table. `deleted_at` is the soft-delete marker.
#[derive(DeriveIden)]
pub(crate) enum Timestamps {
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

pub(crate) fn with_timestamps(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(Timestamps::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Timestamps::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Timestamps::DeletedAt)
                .timestamp_with_time_zone()
                .null(),
        )
}
