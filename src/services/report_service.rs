use crate::database::DbPool;
use crate::entities::membership_entity as memberships;
use crate::error::AppResult;
use crate::models::*;
use crate::utils::{export_filename, render_csv, require_date};
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Statement,
};

/// Count and money totals over `memberships`, optionally restricted to an
/// inclusive `purchase_date` range. Empty sets sum to zero.
pub(crate) async fn financial_totals(
    db: &DatabaseConnection,
    range: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<TotalsRow> {
    let mut query = memberships::Entity::find()
        .select_only()
        .column_as(Expr::cust("COUNT(*)"), "total_memberships")
        .column_as(Expr::cust("COALESCE(SUM(purchase_price), 0)"), "total_costs")
        .column_as(Expr::cust("COALESCE(SUM(sale_price), 0)"), "total_revenue")
        .column_as(Expr::cust("COALESCE(SUM(profit), 0)"), "net_profit")
        .column_as(Expr::cust("COALESCE(AVG(profit), 0)"), "avg_profit");
    if let Some((start, end)) = range {
        query = query.filter(memberships::Column::PurchaseDate.between(start, end));
    }

    Ok(query
        .into_model::<TotalsRow>()
        .one(db)
        .await?
        .unwrap_or_default())
}

/// Count and summed profit per status present in the table.
pub(crate) async fn status_breakdown(db: &DatabaseConnection) -> AppResult<Vec<StatusBreakdown>> {
    let rows = memberships::Entity::find()
        .select_only()
        .column(memberships::Column::Status)
        .column_as(Expr::cust("COUNT(*)"), "count")
        .column_as(Expr::cust("COALESCE(SUM(profit), 0)"), "profit")
        .group_by(memberships::Column::Status)
        .order_by_asc(memberships::Column::Status)
        .into_model::<StatusBreakdown>()
        .all(db)
        .await?;
    Ok(rows)
}

/// Validate the `startDate`/`endDate` pair of a range report.
pub fn resolve_period(query: &DateRangeQuery) -> AppResult<ReportPeriod> {
    Ok(ReportPeriod {
        start_date: require_date("startDate", query.start_date.as_deref())?,
        end_date: require_date("endDate", query.end_date.as_deref())?,
    })
}

/// A rendered CSV report with its download name.
#[derive(Debug, Clone)]
pub struct CsvReport {
    pub filename: String,
    pub body: String,
}

#[derive(Clone)]
pub struct ReportService {
    pool: DbPool,
}

impl ReportService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.pool
    }

    pub async fn summary(&self) -> AppResult<ReportOverview> {
        let overall = financial_totals(self.db(), None).await?;
        let by_status = status_breakdown(self.db()).await?;
        Ok(ReportOverview {
            overall: overall.into(),
            by_status,
        })
    }

    async fn rows_in_period(&self, period: ReportPeriod) -> AppResult<Vec<ReportDetailRow>> {
        let rows = memberships::Entity::find()
            .filter(
                memberships::Column::PurchaseDate.between(period.start_date, period.end_date),
            )
            .order_by_asc(memberships::Column::PurchaseDate)
            .order_by_asc(memberships::Column::Id)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(ReportDetailRow::from).collect())
    }

    pub async fn detailed(&self, query: &DateRangeQuery) -> AppResult<DetailedReport> {
        let period = resolve_period(query)?;
        let details = self.rows_in_period(period).await?;
        let totals =
            financial_totals(self.db(), Some((period.start_date, period.end_date))).await?;

        log::debug!(
            "Detailed report {}..{}: {} row(s)",
            period.start_date,
            period.end_date,
            details.len()
        );
        Ok(DetailedReport {
            period,
            summary: totals.into(),
            details,
        })
    }

    /// Latest twelve months of the `financial_summary` view.
    pub async fn monthly(&self) -> AppResult<Vec<MonthlySummaryRow>> {
        let stmt = Statement::from_string(
            self.pool.get_database_backend(),
            "SELECT month, total_memberships, total_costs, total_revenue, net_profit, avg_profit \
             FROM financial_summary ORDER BY month DESC LIMIT 12",
        );
        Ok(MonthlySummaryRow::find_by_statement(stmt)
            .all(self.db())
            .await?)
    }

    pub async fn export_csv(&self, query: &DateRangeQuery) -> AppResult<CsvReport> {
        let period = resolve_period(query)?;
        let rows = self.rows_in_period(period).await?;
        log::info!(
            "Exporting {} row(s) for {}..{}",
            rows.len(),
            period.start_date,
            period.end_date
        );
        Ok(CsvReport {
            filename: export_filename(period.start_date, period.end_date),
            body: render_csv(&rows),
        })
    }
}
