use crate::entities::membership_entity;
use crate::utils::profit_margin;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Raw aggregate row; SQL coalesces empty sums to zero.
#[derive(Debug, Clone, Default, PartialEq, sea_orm::FromQueryResult)]
pub struct TotalsRow {
    pub total_memberships: i64,
    pub total_costs: f64,
    pub total_revenue: f64,
    pub net_profit: f64,
    pub avg_profit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_memberships: i64,
    pub total_costs: f64,
    pub total_revenue: f64,
    pub net_profit: f64,
    pub avg_profit: f64,
    /// `net_profit / total_costs * 100`, zero when there is no cost.
    pub profit_margin: f64,
}

impl From<TotalsRow> for FinancialSummary {
    fn from(row: TotalsRow) -> Self {
        Self {
            profit_margin: profit_margin(row.net_profit, row.total_costs),
            total_memberships: row.total_memberships,
            total_costs: row.total_costs,
            total_revenue: row.total_revenue,
            net_profit: row.net_profit,
            avg_profit: row.avg_profit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sea_orm::FromQueryResult)]
pub struct StatusBreakdown {
    pub status: String,
    pub count: i64,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportOverview {
    pub overall: FinancialSummary,
    pub by_status: Vec<StatusBreakdown>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// Inclusive lower bound on purchase_date (YYYY-MM-DD).
    pub start_date: Option<String>,
    /// Inclusive upper bound on purchase_date (YYYY-MM-DD).
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One itemized membership inside a date-range report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportDetailRow {
    pub id: i64,
    pub client_id: String,
    pub client_name: String,
    pub service_name: String,
    pub provider: String,
    pub purchase_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub profit: f64,
    pub margin_percentage: f64,
    pub status: String,
}

impl From<membership_entity::Model> for ReportDetailRow {
    fn from(m: membership_entity::Model) -> Self {
        Self {
            margin_percentage: profit_margin(m.profit, m.purchase_price),
            id: m.id,
            client_id: m.client_id,
            client_name: m.client_name,
            service_name: m.service_name,
            provider: m.provider,
            purchase_date: m.purchase_date,
            expiration_date: m.expiration_date,
            purchase_price: m.purchase_price,
            sale_price: m.sale_price,
            profit: m.profit,
            status: m.status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetailedReport {
    pub period: ReportPeriod,
    pub summary: FinancialSummary,
    pub details: Vec<ReportDetailRow>,
}

/// Row of the `financial_summary` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sea_orm::FromQueryResult)]
pub struct MonthlySummaryRow {
    pub month: String,
    pub total_memberships: i64,
    pub total_costs: f64,
    pub total_revenue: f64,
    pub net_profit: f64,
    pub avg_profit: f64,
}
