use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260301_000001_create_users_table::Users,
    m20260301_000004_create_reports_table::Reports,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReportAttachments::Table)
                    .if_not_exists()
                    .col(uuid(ReportAttachments::Id).primary_key())
                    .col(uuid(ReportAttachments::ReportId))
                    .col(string(ReportAttachments::OriginalFilename))
                    .col(string(ReportAttachments::StoredFilename))
                    .col(string(ReportAttachments::FilePath))
                    .col(big_integer(ReportAttachments::FileSize))
                    .col(string(ReportAttachments::FileType))
                    .col(string(ReportAttachments::MimeType))
                    .col(string_len(ReportAttachments::AttachmentType, 16))
                    .col(string_null(ReportAttachments::Description))
                    .col(string(ReportAttachments::FileHash))
                    .col(uuid(ReportAttachments::UploadedBy))
                    .col(timestamp_with_time_zone(ReportAttachments::UploadedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_attachments_report_id")
                            .from(ReportAttachments::Table, ReportAttachments::ReportId)
                            .to(Reports::Table, Reports::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_report_attachments_uploaded_by")
                            .from(ReportAttachments::Table, ReportAttachments::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_report_attachments_report_id")
                    .table(ReportAttachments::Table)
                    .col(ReportAttachments::ReportId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReportAttachments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReportAttachments {
    Table,
    Id,
    ReportId,
    OriginalFilename,
    StoredFilename,
    FilePath,
    FileSize,
    FileType,
    MimeType,
    AttachmentType,
    Description,
    FileHash,
    UploadedBy,
    UploadedAt,
}
