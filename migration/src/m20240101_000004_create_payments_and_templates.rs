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
                        .table(Payment::Table)
                        .if_not_exists()
                        .col(pk_auto(Payment::Id))
                        .col(string_len(Payment::Type, 50).not_null())
                        .col(string_len(Payment::ImageUrl, 255).not_null().default(""))
                        .col(string_len(Payment::Name, 100).not_null())
                        .col(string_len(Payment::AccountName, 100).not_null())
                        .col(string_len(Payment::AccountNumber, 50).not_null()),
                )
                .to_owned(),
            )
            .await?;

        manager
            .create_table(
                with_timestamps(
                    Table::create()
                        .table(TemplateMessage::Table)
                        .if_not_exists()
                        .col(pk_auto(TemplateMessage::Id))
                        .col(string_len(TemplateMessage::Title, 150).not_null())
                        .col(text(TemplateMessage::Content).not_null()),
                )
                .to_owned(),
            )
            .await?;

        // Seeded in id order; ids 4, 5 and 6 are the order lifecycle templates.
        let insert = Query::insert()
            .into_table(TemplateMessage::Table)
            .columns([TemplateMessage::Title, TemplateMessage::Content])
            .values_panic([
                "Selamat Datang".into(),
                "Halo [Nama Pengguna], selamat bergabung!".into(),
            ])
            .values_panic([
                "Kata Sandi Diubah".into(),
                "Halo [Nama Pengguna], kata sandi akun Anda telah diubah.".into(),
            ])
            .values_panic([
                "Profil Diperbarui".into(),
                "Halo [Nama Pengguna], profil Anda telah diperbarui.".into(),
            ])
            .values_panic([
                "Menunggu Pembayaran".into(),
                "Halo [Nama Pengguna], pesanan [Order Code] menunggu pembayaran.".into(),
            ])
            .values_panic([
                "Pembayaran Berhasil".into(),
                "Halo [Nama Pengguna], pembayaran pesanan [Order Code] telah dikonfirmasi.".into(),
            ])
            .values_panic([
                "Pesanan Dibatalkan".into(),
                "Halo [Nama Pengguna], pesanan [Order Code] telah dibatalkan.".into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TemplateMessage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    Type,
    ImageUrl,
    Name,
    AccountName,
    AccountNumber,
}

#[derive(DeriveIden)]
pub enum TemplateMessage {
    Table,
    Id,
    Title,
    Content,
}
