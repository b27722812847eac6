use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle state of a membership. Maintained outside this service; the API
/// only stores what it is given.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "expiring")]
    Expiring,
    #[sea_orm(string_value = "expired")]
    Expired,
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipStatus::Active => write!(f, "active"),
            MembershipStatus::Expiring => write!(f, "expiring"),
            MembershipStatus::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "memberships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub client_id: String,
    pub client_name: String,
    pub service_name: String,
    pub provider: String,
    pub duration: String,
    pub purchase_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub purchase_price: f64,
    pub sale_price: f64,
    /// Generated column (`sale_price - purchase_price`); never written.
    pub profit: f64,
    pub access_email: String,
    pub access_password: String,
    pub security_pin: Option<String>,
    pub profile_name: Option<String>,
    pub whatsapp_number: String,
    pub notification_sent: bool,
    pub status: MembershipStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
