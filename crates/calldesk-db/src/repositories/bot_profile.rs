//! PostgreSQL implementation of BotProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use calldesk_core::entities::BotProfile;
use calldesk_core::error::DomainError;
use calldesk_core::traits::{BotProfileRepository, RepoResult};

use crate::models::BotProfileModel;

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of BotProfileRepository
#[derive(Clone)]
pub struct PgBotProfileRepository {
    pool: PgPool,
}

impl PgBotProfileRepository {
    /// Create a new PgBotProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BotProfileRepository for PgBotProfileRepository {
    #[instrument(skip(self))]
    async fn find(&self, principal_id: Uuid) -> RepoResult<Option<BotProfile>> {
        let result = sqlx::query_as::<_, BotProfileModel>(
            r"
            SELECT principal_id, opening_message, model, temperature,
                   response_length, category, active, updated_at
            FROM bot_profiles
            WHERE principal_id = $1
            ",
        )
        .bind(principal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(BotProfile::try_from).transpose()
    }

    #[instrument(skip(self, profile))]
    async fn upsert(&self, profile: &BotProfile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO bot_profiles (
                principal_id, opening_message, model, temperature,
                response_length, category, active, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (principal_id) DO UPDATE
            SET opening_message = EXCLUDED.opening_message,
                model = EXCLUDED.model,
                temperature = EXCLUDED.temperature,
                response_length = EXCLUDED.response_length,
                category = EXCLUDED.category,
                active = EXCLUDED.active,
                updated_at = NOW()
            ",
        )
        .bind(profile.principal_id)
        .bind(&profile.opening_message)
        .bind(&profile.model)
        .bind(profile.temperature)
        .bind(&profile.response_length)
        .bind(profile.category.as_str())
        .bind(profile.active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::PrincipalNotFound(profile.principal_id)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgBotProfileRepository>();
    }
}
