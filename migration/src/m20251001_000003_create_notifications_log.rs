use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum NotificationsLog {
    Table,
    Id,
    MembershipId,
    ClientName,
    ServiceName,
    WhatsappNumber,
    Message,
    Status,
    SentDate,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // no foreign key on membership_id: log rows outlive their membership
        manager
            .create_table(
                Table::create()
                    .table(NotificationsLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationsLog::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NotificationsLog::MembershipId).big_integer().null())
                    .col(ColumnDef::new(NotificationsLog::ClientName).string_len(100).not_null())
                    .col(ColumnDef::new(NotificationsLog::ServiceName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(NotificationsLog::WhatsappNumber)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(ColumnDef::new(NotificationsLog::Message).text().not_null())
                    .col(
                        ColumnDef::new(NotificationsLog::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(NotificationsLog::SentDate)
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
                    .name("idx_notifications_log_sent_date")
                    .table(NotificationsLog::Table)
                    .col(NotificationsLog::SentDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationsLog::Table).to_owned())
            .await?;
        Ok(())
    }
}
