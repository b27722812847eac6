use crate::database::DbPool;
use crate::entities::recharge_entity as recharges;
use crate::error::{AppError, AppResult};
use crate::models::{ClientRecharges, CreateRechargeRequest, RechargeResponse};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QuerySelect, Set, Statement,
};

// client_name comes from the client's most recent membership, one row per recharge
const RECHARGE_COLUMNS: &str = r#"
    SELECT r.id, r.client_id, r.amount, r.recharge_date, r.note, r.created_at,
           (SELECT m.client_name
              FROM memberships m
             WHERE m.client_id = r.client_id
             ORDER BY m.created_at DESC
             LIMIT 1) AS client_name
      FROM recharges r
"#;

#[derive(Debug, FromQueryResult)]
struct AmountTotal {
    total: f64,
}

#[derive(Clone)]
pub struct RechargeService {
    pool: DbPool,
}

impl RechargeService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.pool
    }

    pub async fn list_recharges(&self) -> AppResult<Vec<RechargeResponse>> {
        let sql = format!("{RECHARGE_COLUMNS} ORDER BY r.recharge_date DESC, r.created_at DESC");
        let rows = RechargeResponse::find_by_statement(Statement::from_string(
            self.pool.get_database_backend(),
            sql,
        ))
        .all(self.db())
        .await?;
        Ok(rows)
    }

    pub async fn recharges_by_client(&self, client_id: &str) -> AppResult<ClientRecharges> {
        let sql = format!(
            "{RECHARGE_COLUMNS} WHERE r.client_id = $1 ORDER BY r.recharge_date DESC, r.created_at DESC"
        );
        let data = RechargeResponse::find_by_statement(Statement::from_sql_and_values(
            self.pool.get_database_backend(),
            sql,
            [client_id.into()],
        ))
        .all(self.db())
        .await?;

        let total_amount = recharges::Entity::find()
            .select_only()
            .column_as(Expr::cust("COALESCE(SUM(amount), 0)"), "total")
            .filter(recharges::Column::ClientId.eq(client_id))
            .into_model::<AmountTotal>()
            .one(self.db())
            .await?
            .map(|t| t.total)
            .unwrap_or(0.0);

        Ok(ClientRecharges {
            client_id: client_id.to_string(),
            count: data.len(),
            total_amount,
            data,
        })
    }

    pub async fn create_recharge(
        &self,
        request: CreateRechargeRequest,
    ) -> AppResult<RechargeResponse> {
        let required = || {
            AppError::ValidationError(
                "client_id, amount and recharge_date are required".to_string(),
            )
        };
        let client_id = request
            .client_id
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(required)?;
        let amount = request.amount.filter(|a| *a != 0.0).ok_or_else(required)?;
        let recharge_date = request.recharge_date.ok_or_else(required)?;

        let created = recharges::ActiveModel {
            client_id: Set(client_id),
            amount: Set(amount),
            recharge_date: Set(recharge_date),
            note: Set(request.note.filter(|n| !n.is_empty())),
            ..Default::default()
        }
        .insert(self.db())
        .await?;

        log::info!(
            "Recharge {} of {:.2} recorded for client {}",
            created.id,
            created.amount,
            created.client_id
        );
        Ok(RechargeResponse::from(created))
    }

    pub async fn delete_recharge(&self, id: i64) -> AppResult<()> {
        recharges::Entity::find_by_id(id)
            .one(self.db())
            .await?
            .ok_or_else(|| AppError::NotFound("Recharge not found".to_string()))?;
        recharges::Entity::delete_by_id(id).exec(self.db()).await?;
        log::info!("Recharge {id} deleted");
        Ok(())
    }
}
