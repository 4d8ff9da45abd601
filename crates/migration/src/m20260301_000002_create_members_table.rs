use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(uuid(Members::Id).primary_key())
                    .col(uuid(Members::UserId))
                    .col(string(Members::FirstName))
                    .col(string(Members::LastName))
                    .col(string_null(Members::MiddleName))
                    .col(string_null(Members::Email))
                    .col(string_null(Members::Phone))
                    .col(string_null(Members::Position))
                    .col(string_null(Members::Department))
                    .col(string(Members::EmployeeId).unique_key())
                    .col(string_len(Members::Status, 16))
                    .col(timestamp_with_time_zone(Members::CreatedAt))
                    .col(timestamp_with_time_zone(Members::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_user_id")
                            .from(Members::Table, Members::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_members_user_id")
                    .table(Members::Table)
                    .col(Members::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Members {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    MiddleName,
    Email,
    Phone,
    Position,
    Department,
    EmployeeId,
    Status,
    CreatedAt,
    UpdatedAt,
}
