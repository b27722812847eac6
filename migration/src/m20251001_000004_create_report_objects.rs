use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CREATE_FINANCIAL_SUMMARY: &str = r#"
CREATE OR REPLACE VIEW financial_summary AS
SELECT
    to_char(purchase_date, 'YYYY-MM') AS month,
    COUNT(*)::BIGINT AS total_memberships,
    COALESCE(SUM(purchase_price), 0)::DOUBLE PRECISION AS total_costs,
    COALESCE(SUM(sale_price), 0)::DOUBLE PRECISION AS total_revenue,
    COALESCE(SUM(profit), 0)::DOUBLE PRECISION AS net_profit,
    COALESCE(AVG(profit), 0)::DOUBLE PRECISION AS avg_profit
FROM memberships
GROUP BY to_char(purchase_date, 'YYYY-MM')
"#;

// Candidates: not yet notified, expiring within three days of `as_of` or
// already expired. Callers pass their own calendar day.
const CREATE_EXPIRING_FUNCTION: &str = r#"
CREATE OR REPLACE FUNCTION sp_check_expiring_memberships(as_of DATE DEFAULT CURRENT_DATE)
RETURNS TABLE (
    id BIGINT,
    client_id VARCHAR,
    client_name VARCHAR,
    service_name VARCHAR,
    whatsapp_number VARCHAR,
    expiration_date DATE,
    days_until_expiry INTEGER,
    status VARCHAR
)
LANGUAGE sql STABLE
AS $$
    SELECT
        m.id,
        m.client_id,
        m.client_name,
        m.service_name,
        m.whatsapp_number,
        m.expiration_date,
        (m.expiration_date - as_of)::INTEGER,
        m.status
    FROM memberships m
    WHERE m.notification_sent = FALSE
      AND m.expiration_date <= as_of + 3
    ORDER BY m.expiration_date ASC
$$
"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CREATE_FINANCIAL_SUMMARY).await?;
        db.execute_unprepared(CREATE_EXPIRING_FUNCTION).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP FUNCTION IF EXISTS sp_check_expiring_memberships(DATE)")
            .await?;
        db.execute_unprepared("DROP VIEW IF EXISTS financial_summary")
            .await?;
        Ok(())
    }
}
