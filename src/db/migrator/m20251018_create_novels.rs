use sea_orm_migration::prelude::*;

use super::m20251018_create_users::Users;
use super::named_check;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Novels::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Novels::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Novels::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Novels::Title)
                            .string_len(200)
                            .not_null()
                            .extra(named_check(
                                "check_novel_title_length",
                                "length(title) <= 200",
                            )),
                    )
                    .col(ColumnDef::new(Novels::Description).text())
                    .col(
                        ColumnDef::new(Novels::CoverUrl)
                            .string_len(500)
                            .extra(named_check(
                                "check_novel_cover_url_length",
                                "length(cover_url) <= 500",
                            )),
                    )
                    .col(
                        ColumnDef::new(Novels::Status)
                            .string_len(20)
                            .not_null()
                            .default("draft")
                            .extra(named_check(
                                "check_novel_status",
                                "status IN ('draft', 'published', 'completed')",
                            )),
                    )
                    .col(
                        ColumnDef::new(Novels::WordCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Novels::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Novels::DeletedAt).timestamp().null())
                    .col(
                        ColumnDef::new(Novels::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Novels::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_novels_user_id")
                            .from(Novels::Table, Novels::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Novels::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Novels {
    Table,
    Id,
    UserId,
    Title,
    Description,
    CoverUrl,
    Status,
    WordCount,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
