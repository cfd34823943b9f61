//! PostgreSQL implementation of ServiceFlagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use calldesk_core::entities::ServiceFlag;
use calldesk_core::traits::{RepoResult, ServiceFlagRepository};

use crate::models::ServiceFlagModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ServiceFlagRepository
#[derive(Clone)]
pub struct PgServiceFlagRepository {
    pool: PgPool,
}

impl PgServiceFlagRepository {
    /// Create a new PgServiceFlagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceFlagRepository for PgServiceFlagRepository {
    #[instrument(skip(self))]
    async fn all(&self) -> RepoResult<Vec<ServiceFlag>> {
        let models = sqlx::query_as::<_, ServiceFlagModel>(
            "SELECT name, enabled, updated_by, updated_at FROM service_flags ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(ServiceFlag::from).collect())
    }

    #[instrument(skip(self))]
    async fn toggle(&self, name: &str, actor: Uuid) -> RepoResult<ServiceFlag> {
        // First toggle of an unseeded flag lands it in the enabled state;
        // afterward each call flips. One statement, no read-then-write race.
        let model = sqlx::query_as::<_, ServiceFlagModel>(
            r"
            INSERT INTO service_flags (name, enabled, updated_by, updated_at)
            VALUES ($1, TRUE, $2, NOW())
            ON CONFLICT (name) DO UPDATE
            SET enabled = NOT service_flags.enabled,
                updated_by = EXCLUDED.updated_by,
                updated_at = NOW()
            RETURNING name, enabled, updated_by, updated_at
            ",
        )
        .bind(name)
        .bind(actor)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ServiceFlag::from(model))
    }
}
