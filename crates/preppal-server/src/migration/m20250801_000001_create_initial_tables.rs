use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Username).string())
                    .col(ColumnDef::new(Users::AvailableTokens).big_integer().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccessTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessTokens::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccessTokens::UserId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(AccessTokens::AccessToken).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_access_tokens_user_id")
                            .from(AccessTokens::Table, AccessTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Uploads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Uploads::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Uploads::UserId).uuid().not_null())
                    .col(ColumnDef::new(Uploads::Kind).string().not_null())
                    .col(ColumnDef::new(Uploads::Source).string().not_null())
                    .col(ColumnDef::new(Uploads::UploadedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_uploads_user_id")
                            .from(Uploads::Table, Uploads::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Artifacts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Artifacts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Artifacts::UserId).uuid().not_null())
                    .col(ColumnDef::new(Artifacts::UploadId).uuid().not_null())
                    .col(ColumnDef::new(Artifacts::Kind).string().not_null())
                    .col(ColumnDef::new(Artifacts::TokensCharged).big_integer().not_null())
                    .col(ColumnDef::new(Artifacts::StorageKey).string())
                    .col(ColumnDef::new(Artifacts::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artifacts_user_id")
                            .from(Artifacts::Table, Artifacts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artifacts_upload_id")
                            .from(Artifacts::Table, Artifacts::UploadId)
                            .to(Uploads::Table, Uploads::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TokenUsage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TokenUsage::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TokenUsage::UserId).uuid().not_null())
                    .col(ColumnDef::new(TokenUsage::Amount).big_integer().not_null())
                    .col(ColumnDef::new(TokenUsage::UsageDay).date().not_null())
                    .col(ColumnDef::new(TokenUsage::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_token_usage_user_id")
                            .from(TokenUsage::Table, TokenUsage::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TokenUsage::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Artifacts::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Uploads::Table).to_owned()).await?;
        manager
            .drop_table(Table::drop().table(AccessTokens::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    Username,
    AvailableTokens,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AccessTokens {
    Table,
    Id,
    UserId,
    AccessToken,
}

#[derive(DeriveIden)]
enum Uploads {
    Table,
    Id,
    UserId,
    Kind,
    Source,
    UploadedAt,
}

#[derive(DeriveIden)]
enum Artifacts {
    Table,
    Id,
    UserId,
    UploadId,
    Kind,
    TokensCharged,
    StorageKey,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TokenUsage {
    Table,
    Id,
    UserId,
    Amount,
    UsageDay,
    CreatedAt,
}
