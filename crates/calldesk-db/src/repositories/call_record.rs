//! PostgreSQL implementation of CallRecordRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use calldesk_core::entities::CallRecord;
use calldesk_core::error::DomainError;
use calldesk_core::traits::{
    CallLogPage, CallLogQuery, CallRecordRepository, CallStats, DayActivity, RepoResult,
};

use crate::mappers::{day_activity_from_model, stats_from_model};
use crate::models::{CallRecordModel, CallStatsModel, DayActivityModel};

use super::error::{map_db_error, map_fk_violation};

const CALL_COLUMNS: &str = "id, principal_id, external_ref, contact_name, contact_phone, \
     outcome, duration_minutes, transcript, cost, revenue, created_at";

/// PostgreSQL implementation of CallRecordRepository
#[derive(Clone)]
pub struct PgCallRecordRepository {
    pool: PgPool,
}

impl PgCallRecordRepository {
    /// Create a new PgCallRecordRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CallRecordRepository for PgCallRecordRepository {
    #[instrument(skip(self, record))]
    async fn create(&self, record: &CallRecord) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO call_records (
                id, principal_id, external_ref, contact_name, contact_phone,
                outcome, duration_minutes, transcript, cost, revenue, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(record.id)
        .bind(record.principal_id)
        .bind(&record.external_ref)
        .bind(&record.contact_name)
        .bind(&record.contact_phone)
        .bind(record.outcome.as_str())
        .bind(record.duration_minutes)
        .bind(&record.transcript)
        .bind(record.cost)
        .bind(record.revenue)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, || DomainError::PrincipalNotFound(record.principal_id))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<CallRecord>> {
        let result = sqlx::query_as::<_, CallRecordModel>(&format!(
            "SELECT {CALL_COLUMNS} FROM call_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(CallRecord::try_from).transpose()
    }

    #[instrument(skip(self, query))]
    async fn query(&self, query: &CallLogQuery) -> RepoResult<CallLogPage> {
        let outcome = query.outcome.map(|o| o.as_str().to_string());

        // Every filter is optional; NULL binds collapse the predicate.
        let models = sqlx::query_as::<_, CallRecordModel>(&format!(
            r"
            SELECT {CALL_COLUMNS} FROM call_records
            WHERE ($1::uuid IS NULL OR principal_id = $1)
              AND ($2::text IS NULL OR outcome = $2)
              AND ($3::text IS NULL OR contact_name ILIKE '%' || $3 || '%')
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at <= $5)
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "
        ))
        .bind(query.owner_id)
        .bind(&outcome)
        .bind(&query.contact)
        .bind(query.date_from)
        .bind(query.date_to)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM call_records
            WHERE ($1::uuid IS NULL OR principal_id = $1)
              AND ($2::text IS NULL OR outcome = $2)
              AND ($3::text IS NULL OR contact_name ILIKE '%' || $3 || '%')
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at <= $5)
            ",
        )
        .bind(query.owner_id)
        .bind(&outcome)
        .bind(&query.contact)
        .bind(query.date_from)
        .bind(query.date_to)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let records = models
            .into_iter()
            .map(CallRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CallLogPage { records, total })
    }

    #[instrument(skip(self))]
    async fn stats(&self, owner_id: Option<Uuid>) -> RepoResult<CallStats> {
        let model = sqlx::query_as::<_, CallStatsModel>(
            r"
            SELECT COUNT(*) AS total_calls,
                   COUNT(*) FILTER (WHERE outcome = 'answered') AS answered_calls,
                   COALESCE(SUM(duration_minutes), 0)::float8 AS total_minutes,
                   COALESCE(SUM(cost), 0)::float8 AS total_cost,
                   COALESCE(SUM(revenue), 0)::float8 AS total_revenue
            FROM call_records
            WHERE ($1::uuid IS NULL OR principal_id = $1)
            ",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(stats_from_model(model))
    }

    #[instrument(skip(self))]
    async fn recent_activity(&self, days: i64) -> RepoResult<Vec<DayActivity>> {
        let models = sqlx::query_as::<_, DayActivityModel>(
            r"
            SELECT (created_at AT TIME ZONE 'UTC')::date AS day,
                   COUNT(*) AS calls,
                   COALESCE(SUM(duration_minutes), 0)::float8 AS minutes,
                   COALESCE(SUM(revenue), 0)::float8 AS revenue
            FROM call_records
            WHERE created_at >= NOW() - make_interval(days => $1::int)
            GROUP BY day
            ORDER BY day
            ",
        )
        .bind(days)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(day_activity_from_model).collect())
    }
}
