use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Row produced by `sp_check_expiring_memberships()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sea_orm::FromQueryResult)]
pub struct ExpiringMembership {
    pub id: i64,
    pub client_id: String,
    pub client_name: String,
    pub service_name: String,
    pub whatsapp_number: String,
    pub expiration_date: NaiveDate,
    pub days_until_expiry: i32,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub membership_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResponse {
    pub whatsapp_url: String,
    pub message_preview: String,
    pub client_name: String,
    pub service_name: String,
}

/// Log entry joined with the client_id of its membership, if it still exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sea_orm::FromQueryResult)]
pub struct NotificationHistoryEntry {
    pub id: i64,
    pub membership_id: Option<i64>,
    pub client_name: String,
    pub service_name: String,
    pub whatsapp_number: String,
    pub message: String,
    pub status: String,
    pub sent_date: Option<DateTime<Utc>>,
    pub client_id: Option<String>,
}
