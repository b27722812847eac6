use crate::entities::recharge_entity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A recharge row. `client_name` is looked up from `memberships` on list
/// endpoints and absent when the client has no membership.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sea_orm::FromQueryResult)]
pub struct RechargeResponse {
    pub id: i64,
    pub client_id: String,
    pub amount: f64,
    pub recharge_date: NaiveDate,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub client_name: Option<String>,
}

impl From<recharge_entity::Model> for RechargeResponse {
    fn from(m: recharge_entity::Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            amount: m.amount,
            recharge_date: m.recharge_date,
            note: m.note,
            created_at: m.created_at,
            client_name: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateRechargeRequest {
    pub client_id: Option<String>,
    pub amount: Option<f64>,
    pub recharge_date: Option<NaiveDate>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecharges {
    pub client_id: String,
    pub count: usize,
    pub total_amount: f64,
    pub data: Vec<RechargeResponse>,
}
