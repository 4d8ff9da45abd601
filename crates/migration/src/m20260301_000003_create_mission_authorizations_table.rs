use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000001_create_users_table::Users,
    m20260301_000002_create_members_table::Members,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MissionAuthorizations::Table)
                    .if_not_exists()
                    .col(uuid(MissionAuthorizations::Id).primary_key())
                    .col(uuid(MissionAuthorizations::UserId))
                    .col(uuid(MissionAuthorizations::MemberId))
                    .col(string(MissionAuthorizations::AuthorizationNumber).unique_key())
                    .col(string(MissionAuthorizations::Purpose))
                    .col(string(MissionAuthorizations::Destination))
                    .col(date(MissionAuthorizations::DepartureDate))
                    .col(date(MissionAuthorizations::ReturnDate))
                    .col(integer(MissionAuthorizations::DurationDays))
                    .col(string_len(MissionAuthorizations::Status, 16))
                    .col(string_null(MissionAuthorizations::AuthorizedBy))
                    .col(string_null(MissionAuthorizations::AuthorizedByPosition))
                    .col(date_null(MissionAuthorizations::AuthorizationDate))
                    .col(timestamp_with_time_zone(MissionAuthorizations::CreatedAt))
                    .col(timestamp_with_time_zone(MissionAuthorizations::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mission_authorizations_user_id")
                            .from(MissionAuthorizations::Table, MissionAuthorizations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mission_authorizations_member_id")
                            .from(
                                MissionAuthorizations::Table,
                                MissionAuthorizations::MemberId,
                            )
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mission_authorizations_user_id")
                    .table(MissionAuthorizations::Table)
                    .col(MissionAuthorizations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mission_authorizations_status")
                    .table(MissionAuthorizations::Table)
                    .col(MissionAuthorizations::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(MissionAuthorizations::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum MissionAuthorizations {
    Table,
    Id,
    UserId,
    MemberId,
    AuthorizationNumber,
    Purpose,
    Destination,
    DepartureDate,
    ReturnDate,
    DurationDays,
    Status,
    AuthorizedBy,
    AuthorizedByPosition,
    AuthorizationDate,
    CreatedAt,
    UpdatedAt,
}
