use crate::database::DbPool;
use crate::entities::{
    NotificationStatus, membership_entity as memberships, notification_log_entity as notifications,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{build_message, days_until, today, whatsapp_url};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, Set, Statement,
};
use std::sync::Arc;

/// Decides which scan candidates get a log entry.
pub trait ScanPolicy: Send + Sync {
    fn select(&self, candidates: Vec<ExpiringMembership>) -> Vec<ExpiringMembership>;
}

/// Logs every candidate on every run, including ones already logged by an
/// earlier run.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendEveryRun;

impl ScanPolicy for AppendEveryRun {
    fn select(&self, candidates: Vec<ExpiringMembership>) -> Vec<ExpiringMembership> {
        candidates
    }
}

#[derive(Clone)]
pub struct NotificationService {
    pool: DbPool,
    policy: Arc<dyn ScanPolicy>,
}

impl NotificationService {
    pub fn new(pool: DbPool) -> Self {
        Self::with_policy(pool, Arc::new(AppendEveryRun))
    }

    pub fn with_policy(pool: DbPool, policy: Arc<dyn ScanPolicy>) -> Self {
        Self { pool, policy }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.pool
    }

    /// Candidates chosen by `sp_check_expiring_memberships`, evaluated
    /// against the service's own calendar day.
    pub async fn pending(&self) -> AppResult<Vec<ExpiringMembership>> {
        let stmt = Statement::from_sql_and_values(
            self.pool.get_database_backend(),
            "SELECT id, client_id, client_name, service_name, whatsapp_number, \
                    expiration_date, days_until_expiry, status \
             FROM sp_check_expiring_memberships($1)",
            [today().into()],
        );
        Ok(ExpiringMembership::find_by_statement(stmt)
            .all(self.db())
            .await?)
    }

    async fn append_log(
        &self,
        membership_id: i64,
        client_name: &str,
        service_name: &str,
        whatsapp_number: &str,
        message: &str,
        status: NotificationStatus,
    ) -> AppResult<()> {
        notifications::Entity::insert(notifications::ActiveModel {
            membership_id: Set(Some(membership_id)),
            client_name: Set(client_name.to_string()),
            service_name: Set(service_name.to_string()),
            whatsapp_number: Set(whatsapp_number.to_string()),
            message: Set(message.to_string()),
            status: Set(status),
            ..Default::default()
        })
        .exec_without_returning(self.db())
        .await?;
        Ok(())
    }

    /// Build the reminder for one membership and log it as `sent`. The
    /// membership's `notification_sent` flag is left as is.
    pub async fn send(&self, request: SendNotificationRequest) -> AppResult<SendNotificationResponse> {
        let membership_id = request
            .membership_id
            .filter(|id| *id != 0)
            .ok_or_else(|| AppError::ValidationError("membershipId is required".to_string()))?;

        let membership = memberships::Entity::find_by_id(membership_id)
            .one(self.db())
            .await?
            .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))?;

        let days = days_until(membership.expiration_date, today());
        let message = build_message(
            &membership.client_name,
            &membership.service_name,
            membership.expiration_date,
            days,
        );
        let url = whatsapp_url(&membership.whatsapp_number, &message);

        self.append_log(
            membership.id,
            &membership.client_name,
            &membership.service_name,
            &membership.whatsapp_number,
            &message,
            NotificationStatus::Sent,
        )
        .await?;
        log::info!(
            "Notification prepared for membership {} ({})",
            membership.id,
            membership.client_name
        );

        Ok(SendNotificationResponse {
            whatsapp_url: url,
            message_preview: message,
            client_name: membership.client_name,
            service_name: membership.service_name,
        })
    }

    /// Run one expiry scan and return how many log entries were written.
    pub async fn check_and_notify(&self) -> AppResult<usize> {
        log::info!("Checking for expiring memberships");
        let candidates = self.pending().await?;
        let found = candidates.len();
        let selected = self.policy.select(candidates);
        log::info!(
            "{found} membership(s) expiring, {} selected for notification",
            selected.len()
        );

        for candidate in &selected {
            let message = build_message(
                &candidate.client_name,
                &candidate.service_name,
                candidate.expiration_date,
                i64::from(candidate.days_until_expiry),
            );
            self.append_log(
                candidate.id,
                &candidate.client_name,
                &candidate.service_name,
                &candidate.whatsapp_number,
                &message,
                NotificationStatus::Pending,
            )
            .await?;
            log::info!(
                "Notification queued for {} ({}, {} day(s))",
                candidate.client_name,
                candidate.service_name,
                candidate.days_until_expiry
            );
        }
        Ok(selected.len())
    }

    /// The 100 most recent log entries.
    pub async fn history(&self) -> AppResult<Vec<NotificationHistoryEntry>> {
        let stmt = Statement::from_string(
            self.pool.get_database_backend(),
            "SELECT n.id, n.membership_id, n.client_name, n.service_name, n.whatsapp_number, \
                    n.message, n.status, n.sent_date, m.client_id \
             FROM notifications_log n \
             LEFT JOIN memberships m ON n.membership_id = m.id \
             ORDER BY n.sent_date DESC, n.id DESC \
             LIMIT 100",
        );
        Ok(NotificationHistoryEntry::find_by_statement(stmt)
            .all(self.db())
            .await?)
    }
}
