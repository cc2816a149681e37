use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerifyCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerifyCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VerifyCodes::UserId).uuid().not_null())
                    .col(ColumnDef::new(VerifyCodes::Code).string().not_null())
                    .col(
                        ColumnDef::new(VerifyCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerifyCodes::IsConfirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(VerifyCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VerifyCodes::Table, VerifyCodes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Active-code lookups filter on (user_id, is_confirmed, expires_at).
        manager
            .create_index(
                Index::create()
                    .table(VerifyCodes::Table)
                    .col(VerifyCodes::UserId)
                    .col(VerifyCodes::IsConfirmed)
                    .name("idx_verify_codes_user_id_is_confirmed")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerifyCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VerifyCodes {
    Table,
    Id,
    UserId,
    Code,
    ExpiresAt,
    IsConfirmed,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
