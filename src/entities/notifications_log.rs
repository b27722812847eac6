use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// Prepared by the scheduled scan, not yet delivered.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Handed to an operator through the manual send endpoint.
    #[sea_orm(string_value = "sent")]
    Sent,
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationStatus::Pending => write!(f, "pending"),
            NotificationStatus::Sent => write!(f, "sent"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub membership_id: Option<i64>,
    pub client_name: String,
    pub service_name: String,
    pub whatsapp_number: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: NotificationStatus,
    pub sent_date: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
