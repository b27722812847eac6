use crate::entities::{MembershipStatus, membership_entity};
use crate::utils::days_until;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A membership row plus its freshly derived `days_until_expiry`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MembershipResponse {
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
    pub profit: f64,
    pub access_email: String,
    pub access_password: String,
    pub security_pin: Option<String>,
    pub profile_name: Option<String>,
    pub whatsapp_number: String,
    pub notification_sent: bool,
    pub status: MembershipStatus,
    pub days_until_expiry: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MembershipResponse {
    pub fn from_model(m: membership_entity::Model, today: NaiveDate) -> Self {
        Self {
            days_until_expiry: days_until(m.expiration_date, today),
            id: m.id,
            client_id: m.client_id,
            client_name: m.client_name,
            service_name: m.service_name,
            provider: m.provider,
            duration: m.duration,
            purchase_date: m.purchase_date,
            expiration_date: m.expiration_date,
            purchase_price: m.purchase_price,
            sale_price: m.sale_price,
            profit: m.profit,
            access_email: m.access_email,
            access_password: m.access_password,
            security_pin: m.security_pin,
            profile_name: m.profile_name,
            whatsapp_number: m.whatsapp_number,
            notification_sent: m.notification_sent,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateMembershipRequest {
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub service_name: Option<String>,
    pub provider: Option<String>,
    pub duration: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub purchase_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub access_email: Option<String>,
    pub access_password: Option<String>,
    pub security_pin: Option<String>,
    pub profile_name: Option<String>,
    pub whatsapp_number: Option<String>,
    /// Defaults to `active`.
    pub status: Option<MembershipStatus>,
}

impl CreateMembershipRequest {
    /// Names of required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        fn blank(v: &Option<String>) -> bool {
            v.as_deref().is_none_or(|s| s.trim().is_empty())
        }

        let mut missing = Vec::new();
        for (name, value) in [
            ("client_id", &self.client_id),
            ("client_name", &self.client_name),
            ("service_name", &self.service_name),
            ("provider", &self.provider),
            ("duration", &self.duration),
            ("access_email", &self.access_email),
            ("access_password", &self.access_password),
            ("whatsapp_number", &self.whatsapp_number),
        ] {
            if blank(value) {
                missing.push(name);
            }
        }
        if self.purchase_date.is_none() {
            missing.push("purchase_date");
        }
        if self.expiration_date.is_none() {
            missing.push("expiration_date");
        }
        if self.purchase_price.is_none() {
            missing.push("purchase_price");
        }
        if self.sale_price.is_none() {
            missing.push("sale_price");
        }
        missing
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MembershipSearchQuery {
    /// Exact status match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Substring match on client_id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipFinancials {
    pub total_costs: f64,
    pub total_revenue: f64,
    pub net_profit: f64,
    pub avg_profit: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MembershipStats {
    pub active: i64,
    pub expiring: i64,
    pub expired: i64,
    pub total: i64,
    pub financials: MembershipFinancials,
}
