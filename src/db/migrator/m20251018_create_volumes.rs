use sea_orm_migration::prelude::*;

use super::m20251018_create_novels::Novels;
use super::named_check;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Volumes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Volumes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Volumes::NovelId).uuid().not_null())
                    .col(
                        ColumnDef::new(Volumes::Title)
                            .string_len(200)
                            .not_null()
                            .extra(named_check(
                                "check_volume_title_length",
                                "length(title) <= 200",
                            )),
                    )
                    .col(ColumnDef::new(Volumes::Description).text())
                    .col(ColumnDef::new(Volumes::SortOrder).integer().not_null())
                    .col(
                        ColumnDef::new(Volumes::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Volumes::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_volumes_novel_id")
                            .from(Volumes::Table, Volumes::NovelId)
                            .to(Novels::Table, Novels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Volumes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Volumes {
    Table,
    Id,
    NovelId,
    Title,
    Description,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}
