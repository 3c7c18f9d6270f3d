use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppPasswords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppPasswords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AppPasswords::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(AppPasswords::SecretHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppPasswords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppPasswords::LastUsed).timestamp_with_time_zone())
                    .col(ColumnDef::new(AppPasswords::RevokedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AppPasswords::Table, AppPasswords::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AppPasswords::Table)
                    .col(AppPasswords::OwnerId)
                    .col(AppPasswords::CreatedAt)
                    .name("idx_app_passwords_owner_created")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppPasswords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AppPasswords {
    Table,
    Id,
    OwnerId,
    SecretHash,
    CreatedAt,
    LastUsed,
    RevokedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
