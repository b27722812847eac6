use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Recharges {
    Table,
    Id,
    ClientId,
    Amount,
    RechargeDate,
    Note,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recharges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recharges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recharges::ClientId).string_len(50).not_null())
                    .col(ColumnDef::new(Recharges::Amount).double().not_null())
                    .col(ColumnDef::new(Recharges::RechargeDate).date().not_null())
                    .col(ColumnDef::new(Recharges::Note).text().null())
                    .col(
                        ColumnDef::new(Recharges::CreatedAt)
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
                    .name("idx_recharges_client_id")
                    .table(Recharges::Table)
                    .col(Recharges::ClientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recharges::Table).to_owned())
            .await?;
        Ok(())
    }
}
