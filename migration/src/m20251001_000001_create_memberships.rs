use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Memberships {
    Table,
    Id,
    ClientId,
    ClientName,
    ServiceName,
    Provider,
    Duration,
    PurchaseDate,
    ExpirationDate,
    PurchasePrice,
    SalePrice,
    Profit,
    AccessEmail,
    AccessPassword,
    SecurityPin,
    ProfileName,
    WhatsappNumber,
    NotificationSent,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Memberships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Memberships::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Memberships::ClientId).string_len(50).not_null())
                    .col(ColumnDef::new(Memberships::ClientName).string_len(100).not_null())
                    .col(ColumnDef::new(Memberships::ServiceName).string_len(100).not_null())
                    .col(ColumnDef::new(Memberships::Provider).string_len(100).not_null())
                    .col(ColumnDef::new(Memberships::Duration).string_len(50).not_null())
                    .col(ColumnDef::new(Memberships::PurchaseDate).date().not_null())
                    .col(ColumnDef::new(Memberships::ExpirationDate).date().not_null())
                    .col(ColumnDef::new(Memberships::PurchasePrice).double().not_null())
                    .col(ColumnDef::new(Memberships::SalePrice).double().not_null())
                    // kept in sync by postgres, never written by the service
                    .col(
                        ColumnDef::new(Memberships::Profit)
                            .double()
                            .not_null()
                            .extra("GENERATED ALWAYS AS (sale_price - purchase_price) STORED"),
                    )
                    .col(ColumnDef::new(Memberships::AccessEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Memberships::AccessPassword).string_len(255).not_null())
                    .col(ColumnDef::new(Memberships::SecurityPin).string_len(50).null())
                    .col(ColumnDef::new(Memberships::ProfileName).string_len(100).null())
                    .col(ColumnDef::new(Memberships::WhatsappNumber).string_len(30).not_null())
                    .col(
                        ColumnDef::new(Memberships::NotificationSent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Memberships::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Memberships::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Memberships::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_memberships_client_id")
                    .table(Memberships::Table)
                    .col(Memberships::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_memberships_status")
                    .table(Memberships::Table)
                    .col(Memberships::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_memberships_expiration_date")
                    .table(Memberships::Table)
                    .col(Memberships::ExpirationDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Memberships::Table).to_owned())
            .await?;
        Ok(())
    }
}
