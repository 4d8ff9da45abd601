use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000001_create_users_table::Users,
    m20260301_000002_create_members_table::Members,
    m20260301_000003_create_mission_authorizations_table::MissionAuthorizations,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(uuid(Reports::Id).primary_key())
                    .col(uuid(Reports::UserId))
                    .col(uuid(Reports::MemberId))
                    .col(uuid(Reports::AuthorizationId))
                    .col(string(Reports::ReportNumber).unique_key())
                    .col(string(Reports::Title))
                    .col(text(Reports::Content))
                    .col(string_len(Reports::ReportType, 16))
                    .col(string_len(Reports::Status, 16))
                    .col(uuid_null(Reports::ReviewedBy))
                    .col(string_null(Reports::ReviewNotes))
                    .col(timestamp_with_time_zone_null(Reports::SubmittedAt))
                    .col(timestamp_with_time_zone_null(Reports::ReviewedAt))
                    .col(timestamp_with_time_zone(Reports::CreatedAt))
                    .col(timestamp_with_time_zone(Reports::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_user_id")
                            .from(Reports::Table, Reports::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_member_id")
                            .from(Reports::Table, Reports::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_authorization_id")
                            .from(Reports::Table, Reports::AuthorizationId)
                            .to(MissionAuthorizations::Table, MissionAuthorizations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reports_user_id")
                    .table(Reports::Table)
                    .col(Reports::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reports_status")
                    .table(Reports::Table)
                    .col(Reports::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reports {
    Table,
    Id,
    UserId,
    MemberId,
    AuthorizationId,
    ReportNumber,
    Title,
    Content,
    ReportType,
    Status,
    ReviewedBy,
    ReviewNotes,
    SubmittedAt,
    ReviewedAt,
    CreatedAt,
    UpdatedAt,
}
