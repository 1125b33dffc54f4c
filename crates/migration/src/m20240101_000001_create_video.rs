//! Create `video` table.
//!
//! The primary key is supplied by clients, so it is a plain 64-bit integer column.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Video::Table)
                    .if_not_exists()
                    .col(big_integer(Video::Id).primary_key())
                    .col(string_len(Video::Name, 100).not_null())
                    .col(big_integer(Video::Views).not_null())
                    .col(big_integer(Video::Likes).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Video::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Video { Table, Id, Name, Views, Likes }
