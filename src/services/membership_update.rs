//! Partial updates of a membership row.
//!
//! The request body is an arbitrary JSON object. Only whitelisted keys are
//! considered; a key that is present (even as `null`) becomes one column
//! assignment, a key that is absent leaves the column untouched.

use crate::entities::membership_entity::Column;
use crate::error::{AppError, AppResult};
use crate::utils::parse_date;
use sea_orm::Value;
use serde_json::{Map, Value as Json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Date,
    Money,
    Flag,
}

/// Fields a client may change, in the order assignments are emitted.
const UPDATABLE_FIELDS: [(&str, Column, FieldKind); 15] = [
    ("client_id", Column::ClientId, FieldKind::Text),
    ("client_name", Column::ClientName, FieldKind::Text),
    ("service_name", Column::ServiceName, FieldKind::Text),
    ("provider", Column::Provider, FieldKind::Text),
    ("duration", Column::Duration, FieldKind::Text),
    ("purchase_date", Column::PurchaseDate, FieldKind::Date),
    ("expiration_date", Column::ExpirationDate, FieldKind::Date),
    ("purchase_price", Column::PurchasePrice, FieldKind::Money),
    ("sale_price", Column::SalePrice, FieldKind::Money),
    ("access_email", Column::AccessEmail, FieldKind::Text),
    ("access_password", Column::AccessPassword, FieldKind::Text),
    ("security_pin", Column::SecurityPin, FieldKind::Text),
    ("profile_name", Column::ProfileName, FieldKind::Text),
    ("whatsapp_number", Column::WhatsappNumber, FieldKind::Text),
    ("notification_sent", Column::NotificationSent, FieldKind::Flag),
];

/// Names of the fields accepted by a partial update.
#[cfg(test)]
fn updatable_field_names() -> impl Iterator<Item = &'static str> {
    UPDATABLE_FIELDS.iter().map(|(name, _, _)| *name)
}

/// Ordered column assignments for a single `UPDATE` statement.
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    assignments: Vec<(&'static str, Column, Value)>,
}

impl UpdatePlan {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(name, _, _)| *name).collect()
    }

    #[cfg(test)]
    fn values(&self) -> Vec<Value> {
        self.assignments.iter().map(|(_, _, v)| v.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn into_assignments(self) -> impl Iterator<Item = (Column, Value)> {
        self.assignments.into_iter().map(|(_, column, value)| (column, value))
    }
}

/// Build the assignment list for `input`. Fails when no whitelisted key is
/// present or a value has the wrong type for its column.
pub fn build_update_plan(input: &Map<String, Json>) -> AppResult<UpdatePlan> {
    let mut plan = UpdatePlan {
        assignments: Vec::new(),
    };
    for (name, column, kind) in UPDATABLE_FIELDS {
        if let Some(raw) = input.get(name) {
            plan.assignments
                .push((name, column, to_db_value(name, kind, raw)?));
        }
    }

    if plan.is_empty() {
        return Err(AppError::ValidationError(
            "No fields provided to update".to_string(),
        ));
    }
    Ok(plan)
}

fn to_db_value(name: &str, kind: FieldKind, raw: &Json) -> AppResult<Value> {
    let invalid = |expected: &str| {
        AppError::ValidationError(format!("Field {name} must be {expected}"))
    };

    let value = match (kind, raw) {
        (FieldKind::Text, Json::Null) => Value::String(None),
        (FieldKind::Text, Json::String(s)) => Value::from(s.clone()),
        (FieldKind::Text, Json::Number(n)) => Value::from(n.to_string()),
        (FieldKind::Text, _) => return Err(invalid("a string")),

        (FieldKind::Date, Json::Null) => Value::ChronoDate(None),
        (FieldKind::Date, Json::String(s)) => {
            Value::from(parse_date(s).ok_or_else(|| invalid("a date (YYYY-MM-DD)"))?)
        }
        (FieldKind::Date, _) => return Err(invalid("a date (YYYY-MM-DD)")),

        (FieldKind::Money, Json::Null) => Value::Double(None),
        (FieldKind::Money, Json::Number(n)) => {
            Value::from(n.as_f64().ok_or_else(|| invalid("a number"))?)
        }
        (FieldKind::Money, Json::String(s)) => {
            Value::from(s.trim().parse::<f64>().map_err(|_| invalid("a number"))?)
        }
        (FieldKind::Money, _) => return Err(invalid("a number")),

        (FieldKind::Flag, Json::Null) => Value::Bool(None),
        (FieldKind::Flag, Json::Bool(b)) => Value::from(*b),
        (FieldKind::Flag, Json::Number(n)) => match n.as_i64() {
            Some(0) => Value::from(false),
            Some(1) => Value::from(true),
            _ => return Err(invalid("a boolean")),
        },
        (FieldKind::Flag, _) => return Err(invalid("a boolean")),
    };
    Ok(value)
}
