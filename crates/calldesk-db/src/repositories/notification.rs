//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use calldesk_core::entities::Notification;
use calldesk_core::error::DomainError;
use calldesk_core::traits::{NotificationRepository, NotificationScope, RepoResult};

use crate::models::NotificationModel;

use super::error::{map_db_error, map_fk_violation};

const NOTIFICATION_COLUMNS: &str =
    "id, principal_id, kind, title, body, payload, read, created_at";

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, principal_id, kind, title, body, payload, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(notification.id)
        .bind(notification.principal_id)
        .bind(&notification.kind)
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(&notification.payload)
        .bind(notification.read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, || {
                DomainError::PrincipalNotFound(notification.principal_id.unwrap_or_default())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        scope: NotificationScope,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let target = match scope {
            NotificationScope::Broadcast => None,
            NotificationScope::Tenant(id) => Some(id),
        };

        // Broadcast rows have a NULL target; IS NOT DISTINCT FROM matches
        // both shapes with one statement.
        let models = sqlx::query_as::<_, NotificationModel>(&format!(
            r"
            SELECT {NOTIFICATION_COLUMNS} FROM notifications
            WHERE principal_id IS NOT DISTINCT FROM $1
              AND (NOT $2 OR read = FALSE)
            ORDER BY created_at DESC
            LIMIT $3
            "
        ))
        .bind(target)
        .bind(unread_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Notification::from).collect())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, scope: NotificationScope) -> RepoResult<i64> {
        let target = match scope {
            NotificationScope::Broadcast => None,
            NotificationScope::Tenant(id) => Some(id),
        };

        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM notifications
            WHERE principal_id IS NOT DISTINCT FROM $1 AND read = FALSE
            ",
        )
        .bind(target)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Uuid) -> RepoResult<()> {
        // Re-marking a read row still matches, so the operation is idempotent.
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgNotificationRepository>();
    }
}
