//! Helpers shared by the store-backed service tests.

use crate::database::DbPool;
use crate::entities::{MembershipStatus, membership_entity as memberships};
use chrono::{Duration, NaiveDate};
use sea_orm::{MockDatabase, MockExecResult, Transaction};
use std::sync::Arc;

pub(crate) fn mock_pool(db: MockDatabase) -> DbPool {
    Arc::new(db.into_connection())
}

/// Statements issued so far. Every service holding `pool` must be dropped first.
pub(crate) fn transaction_log(pool: DbPool) -> Vec<Transaction> {
    match Arc::try_unwrap(pool) {
        Ok(conn) => conn.into_transaction_log(),
        Err(_) => panic!("pool is still held by a service"),
    }
}

pub(crate) fn one_row_affected() -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: 1,
    }
}

pub(crate) fn sample_membership(id: i64, expiration_date: NaiveDate) -> memberships::Model {
    memberships::Model {
        id,
        client_id: "CLI001".to_string(),
        client_name: "Ana Torres".to_string(),
        service_name: "Netflix".to_string(),
        provider: "Proveedor A".to_string(),
        duration: "1 mes".to_string(),
        purchase_date: expiration_date - Duration::days(30),
        expiration_date,
        purchase_price: 10.0,
        sale_price: 15.0,
        profit: 5.0,
        access_email: "ana@example.com".to_string(),
        access_password: "secret".to_string(),
        security_pin: None,
        profile_name: Some("Perfil 1".to_string()),
        whatsapp_number: "+51 987 654 321".to_string(),
        notification_sent: false,
        status: MembershipStatus::Active,
        created_at: None,
        updated_at: None,
    }
}
