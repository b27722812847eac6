use crate::database::DbPool;
use crate::entities::{MembershipStatus, membership_entity as memberships};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::membership_update::build_update_plan;
use crate::services::report_service::{financial_totals, status_breakdown};
use crate::utils::today;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::{Map, Value as Json};

#[derive(Clone)]
pub struct MembershipService {
    pool: DbPool,
}

impl MembershipService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.pool
    }

    async fn find_model(&self, id: i64) -> AppResult<memberships::Model> {
        memberships::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))
    }

    /// All memberships, newest first.
    pub async fn list_memberships(&self) -> AppResult<Vec<MembershipResponse>> {
        let today = today();
        let rows = memberships::Entity::find()
            .order_by_desc(memberships::Column::CreatedAt)
            .all(self.db())
            .await?;
        Ok(rows
            .into_iter()
            .map(|m| MembershipResponse::from_model(m, today))
            .collect())
    }

    pub async fn get_membership(&self, id: i64) -> AppResult<MembershipResponse> {
        let model = self.find_model(id).await?;
        Ok(MembershipResponse::from_model(model, today()))
    }

    /// Status matches exactly; client id, service and provider match as
    /// substrings. Empty filters are ignored.
    pub async fn search_memberships(
        &self,
        filters: &MembershipSearchQuery,
    ) -> AppResult<Vec<MembershipResponse>> {
        fn given(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        let mut query = memberships::Entity::find();
        if let Some(status) = given(&filters.status) {
            query = query.filter(memberships::Column::Status.eq(status));
        }
        if let Some(client_id) = given(&filters.client_id) {
            query = query.filter(memberships::Column::ClientId.contains(client_id));
        }
        if let Some(service_name) = given(&filters.service_name) {
            query = query.filter(memberships::Column::ServiceName.contains(service_name));
        }
        if let Some(provider) = given(&filters.provider) {
            query = query.filter(memberships::Column::Provider.contains(provider));
        }

        let today = today();
        let rows = query
            .order_by_desc(memberships::Column::CreatedAt)
            .all(self.db())
            .await?;
        Ok(rows
            .into_iter()
            .map(|m| MembershipResponse::from_model(m, today))
            .collect())
    }

    pub async fn create_membership(
        &self,
        request: CreateMembershipRequest,
    ) -> AppResult<MembershipResponse> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }

        let CreateMembershipRequest {
            client_id: Some(client_id),
            client_name: Some(client_name),
            service_name: Some(service_name),
            provider: Some(provider),
            duration: Some(duration),
            purchase_date: Some(purchase_date),
            expiration_date: Some(expiration_date),
            purchase_price: Some(purchase_price),
            sale_price: Some(sale_price),
            access_email: Some(access_email),
            access_password: Some(access_password),
            security_pin,
            profile_name,
            whatsapp_number: Some(whatsapp_number),
            status,
        } = request
        else {
            return Err(missing_fields_error(&missing));
        };

        // profit is generated by the database
        let created = memberships::ActiveModel {
            client_id: Set(client_id),
            client_name: Set(client_name),
            service_name: Set(service_name),
            provider: Set(provider),
            duration: Set(duration),
            purchase_date: Set(purchase_date),
            expiration_date: Set(expiration_date),
            purchase_price: Set(purchase_price),
            sale_price: Set(sale_price),
            access_email: Set(access_email),
            access_password: Set(access_password),
            security_pin: Set(security_pin),
            profile_name: Set(profile_name),
            whatsapp_number: Set(whatsapp_number),
            notification_sent: Set(false),
            status: Set(status.unwrap_or(MembershipStatus::Active)),
            ..Default::default()
        }
        .insert(self.db())
        .await?;

        log::info!(
            "Membership {} created for client {} ({})",
            created.id,
            created.client_id,
            created.service_name
        );
        Ok(MembershipResponse::from_model(created, today()))
    }

    /// Apply a sparse update. The existence check and the `UPDATE` are separate
    /// auto-committed statements, so a concurrent delete can land in between.
    pub async fn update_membership(
        &self,
        id: i64,
        changes: &Map<String, Json>,
    ) -> AppResult<MembershipResponse> {
        let plan = build_update_plan(changes)?;
        self.find_model(id).await?;

        let columns = plan.column_names().join(", ");
        let mut update = memberships::Entity::update_many()
            .filter(memberships::Column::Id.eq(id))
            .col_expr(
                memberships::Column::UpdatedAt,
                Expr::cust("CURRENT_TIMESTAMP"),
            );
        for (column, value) in plan.into_assignments() {
            update = update.col_expr(column, SimpleExpr::Value(value));
        }
        update.exec(self.db()).await?;

        log::info!("Membership {id} updated: {columns}");
        self.get_membership(id).await
    }

    pub async fn delete_membership(&self, id: i64) -> AppResult<()> {
        self.find_model(id).await?;
        memberships::Entity::delete_by_id(id)
            .exec(self.db())
            .await?;
        log::info!("Membership {id} deleted");
        Ok(())
    }

    pub async fn get_stats(&self) -> AppResult<MembershipStats> {
        let breakdown = status_breakdown(self.db()).await?;
        let totals = financial_totals(self.db(), None).await?;

        let count_of = |status: MembershipStatus| {
            let status = status.to_string();
            breakdown
                .iter()
                .find(|b| b.status == status)
                .map(|b| b.count)
                .unwrap_or(0)
        };

        Ok(MembershipStats {
            active: count_of(MembershipStatus::Active),
            expiring: count_of(MembershipStatus::Expiring),
            expired: count_of(MembershipStatus::Expired),
            total: totals.total_memberships,
            financials: MembershipFinancials {
                total_costs: totals.total_costs,
                total_revenue: totals.total_revenue,
                net_profit: totals.net_profit,
                avg_profit: totals.avg_profit,
            },
        })
    }
}

fn missing_fields_error(missing: &[&str]) -> AppError {
    AppError::ValidationError(format!(
        "All required fields must be provided (missing: {})",
        missing.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{
        mock_pool, one_row_affected, sample_membership, transaction_log,
    };
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn object(value: Json) -> Map<String, Json> {
        match value {
            Json::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[tokio::test]
    async fn list_derives_days_until_expiry() {
        let today = today();
        let pool = mock_pool(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([
            vec![
                sample_membership(2, today + Duration::days(5)),
                sample_membership(1, today - Duration::days(3)),
            ],
        ]));
        let service = MembershipService::new(pool);

        let list = service.list_memberships().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].days_until_expiry, 5);
        assert_eq!(list[1].days_until_expiry, -3);
    }

    #[tokio::test]
    async fn get_missing_membership_is_not_found() {
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<memberships::Model>::new()]),
        );
        let service = MembershipService::new(pool);

        let err = service.get_membership(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_combines_exact_status_and_substring_filters() {
        let today = today();
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![sample_membership(4, today + Duration::days(2))]]),
        );
        let service = MembershipService::new(pool.clone());

        let filters = MembershipSearchQuery {
            status: Some("active".into()),
            client_id: Some("CLI".into()),
            service_name: Some("Net".into()),
            provider: Some(String::new()),
        };
        let found = service.search_memberships(&filters).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].days_until_expiry, 2);

        drop(service);
        let log = transaction_log(pool);
        assert_eq!(log.len(), 1);
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains(r#"\"status\" = $1"#));
        assert!(sql.contains(r#"\"client_id\" LIKE $2"#));
        assert!(sql.contains(r#"\"service_name\" LIKE $3"#));
        assert!(!sql.contains(r#"\"provider\" LIKE"#));
        assert!(sql.contains(r#""%CLI%""#));
        assert!(sql.contains(r#""%Net%""#));
    }

    #[tokio::test]
    async fn search_without_filters_lists_everything() {
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<memberships::Model>::new()]),
        );
        let service = MembershipService::new(pool.clone());

        let found = service
            .search_memberships(&MembershipSearchQuery::default())
            .await
            .unwrap();
        assert!(found.is_empty());

        drop(service);
        let sql = format!("{:?}", transaction_log(pool)[0]);
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("ORDER BY"));
    }

    #[tokio::test]
    async fn update_without_known_fields_never_touches_store() {
        let pool = mock_pool(MockDatabase::new(DatabaseBackend::Postgres));
        let service = MembershipService::new(pool.clone());

        let err = service
            .update_membership(1, &object(json!({ "profit": 100, "foo": "bar" })))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        drop(service);
        assert!(transaction_log(pool).is_empty());
    }

    #[tokio::test]
    async fn update_of_unknown_id_skips_write() {
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<memberships::Model>::new()]),
        );
        let service = MembershipService::new(pool.clone());

        let err = service
            .update_membership(99, &object(json!({ "client_name": "Luis" })))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        drop(service);
        let log = transaction_log(pool);
        assert_eq!(log.len(), 1);
        assert!(!format!("{:?}", log[0]).contains("UPDATE"));
    }

    #[tokio::test]
    async fn update_writes_only_given_columns_and_rereads() {
        let today = today();
        let before = sample_membership(7, today + Duration::days(10));
        let mut after = before.clone();
        after.client_name = "Ana María Torres".to_string();

        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![before], vec![after]])
                .append_exec_results([one_row_affected()]),
        );
        let service = MembershipService::new(pool.clone());

        let updated = service
            .update_membership(7, &object(json!({ "client_name": "Ana María Torres" })))
            .await
            .unwrap();
        assert_eq!(updated.client_name, "Ana María Torres");
        assert_eq!(updated.days_until_expiry, 10);

        drop(service);
        let log = transaction_log(pool);
        assert_eq!(log.len(), 3);
        let update_sql = format!("{:?}", log[1]);
        assert!(update_sql.contains("UPDATE"));
        assert!(update_sql.contains("client_name"));
        assert!(!update_sql.contains("sale_price"));
        assert!(!update_sql.contains("security_pin"));
    }

    #[tokio::test]
    async fn create_rejects_incomplete_request_without_store_calls() {
        let pool = mock_pool(MockDatabase::new(DatabaseBackend::Postgres));
        let service = MembershipService::new(pool.clone());

        let request = CreateMembershipRequest {
            client_id: Some("CLI009".into()),
            ..Default::default()
        };
        let err = service.create_membership(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        drop(service);
        assert!(transaction_log(pool).is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found() {
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<memberships::Model>::new()]),
        );
        let service = MembershipService::new(pool.clone());

        let err = service.delete_membership(5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        drop(service);
        assert_eq!(transaction_log(pool).len(), 1);
    }

    #[tokio::test]
    async fn stats_fill_absent_statuses_with_zero() {
        let breakdown = vec![
            BTreeMap::from([
                ("status", Value::from("active")),
                ("count", Value::from(3_i64)),
                ("profit", Value::from(15.0_f64)),
            ]),
            BTreeMap::from([
                ("status", Value::from("expired")),
                ("count", Value::from(1_i64)),
                ("profit", Value::from(2.0_f64)),
            ]),
        ];
        let totals = vec![BTreeMap::from([
            ("total_memberships", Value::from(4_i64)),
            ("total_costs", Value::from(40.0_f64)),
            ("total_revenue", Value::from(57.0_f64)),
            ("net_profit", Value::from(17.0_f64)),
            ("avg_profit", Value::from(4.25_f64)),
        ])];
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([breakdown, totals]),
        );
        let service = MembershipService::new(pool);

        let stats = service.get_stats().await.unwrap();
        assert_eq!((stats.active, stats.expiring, stats.expired), (3, 0, 1));
        assert_eq!(stats.total, 4);
        assert_eq!(stats.financials.net_profit, 17.0);
        assert_eq!(stats.financials.avg_profit, 4.25);
    }
}
