//! PostgreSQL implementation of PrincipalRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use calldesk_core::entities::Principal;
use calldesk_core::error::DomainError;
use calldesk_core::traits::{
    PrincipalPage, PrincipalRepository, PrincipalSearch, RepoResult, TopTenant, UsageDelta,
};
use calldesk_core::value_objects::{AccountingMode, LifecycleStatus, Role};

use crate::mappers::top_tenant_from_model;
use crate::models::{PrincipalModel, TopTenantModel};

use super::error::{map_db_error, map_unique_violation, principal_not_found};

const PRINCIPAL_COLUMNS: &str = "id, email, display_name, password_hash, role, category, status, \
     pause_reason, status_changed_by, minutes_allocated, minutes_used, credits_remaining, \
     monthly_plan_cost, revenue_generated, reset_code, reset_code_expires_at, \
     created_at, updated_at, deleted_at";

/// PostgreSQL implementation of PrincipalRepository
#[derive(Clone)]
pub struct PgPrincipalRepository {
    pool: PgPool,
}

impl PgPrincipalRepository {
    /// Create a new PgPrincipalRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: Uuid) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM principals WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl PrincipalRepository for PgPrincipalRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Principal>> {
        let result = sqlx::query_as::<_, PrincipalModel>(&format!(
            "SELECT {PRINCIPAL_COLUMNS} FROM principals WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Principal::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Principal>> {
        let result = sqlx::query_as::<_, PrincipalModel>(&format!(
            "SELECT {PRINCIPAL_COLUMNS} FROM principals WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Principal::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM principals WHERE email = $1 AND deleted_at IS NULL)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, principal, password_hash))]
    async fn create(&self, principal: &Principal, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO principals (
                id, email, display_name, password_hash, role, category, status,
                minutes_allocated, minutes_used, credits_remaining,
                monthly_plan_cost, revenue_generated, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(principal.id)
        .bind(&principal.email)
        .bind(&principal.display_name)
        .bind(password_hash)
        .bind(principal.role.as_str())
        .bind(principal.category.as_str())
        .bind(principal.status.as_str())
        .bind(principal.minutes_allocated)
        .bind(principal.minutes_used)
        .bind(principal.credits_remaining)
        .bind(principal.monthly_plan_cost)
        .bind(principal.revenue_generated)
        .bind(principal.created_at)
        .bind(principal.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self, principal))]
    async fn update(&self, principal: &Principal) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE principals
            SET display_name = $2, role = $3, category = $4, status = $5,
                pause_reason = $6, status_changed_by = $7,
                minutes_allocated = $8, monthly_plan_cost = $9,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(principal.id)
        .bind(&principal.display_name)
        .bind(principal.role.as_str())
        .bind(principal.category.as_str())
        .bind(principal.status.as_str())
        .bind(&principal.pause_reason)
        .bind(principal.status_changed_by)
        .bind(principal.minutes_allocated)
        .bind(principal.monthly_plan_cost)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(principal_not_found(principal.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE principals SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(principal_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, query))]
    async fn search(&self, query: &PrincipalSearch) -> RepoResult<PrincipalPage> {
        let role = query.role.map(|r| r.as_str().to_string());

        let models = sqlx::query_as::<_, PrincipalModel>(&format!(
            r"
            SELECT {PRINCIPAL_COLUMNS} FROM principals
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR display_name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR role = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "
        ))
        .bind(&query.search)
        .bind(&role)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM principals
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR display_name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR role = $2)
            ",
        )
        .bind(&query.search)
        .bind(&role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let principals = models
            .into_iter()
            .map(Principal::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PrincipalPage { principals, total })
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM principals WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE principals
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(principal_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, code))]
    async fn set_reset_code(
        &self,
        id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE principals
            SET reset_code = $2, reset_code_expires_at = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .bind(code)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(principal_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_reset_code(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE principals
            SET reset_code = NULL, reset_code_expires_at = NULL, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_usage(
        &self,
        id: Uuid,
        delta: UsageDelta,
        mode: AccountingMode,
    ) -> RepoResult<()> {
        // Both statements are single atomic update expressions. A
        // read-modify-write here would lose increments under concurrent call
        // completions for the same tenant.
        let result = match mode {
            AccountingMode::Minutes => {
                sqlx::query(
                    r"
                    UPDATE principals
                    SET minutes_used = minutes_used + $2,
                        revenue_generated = revenue_generated + $3,
                        updated_at = NOW()
                    WHERE id = $1 AND deleted_at IS NULL
                      AND minutes_used < minutes_allocated
                    ",
                )
                .bind(id)
                .bind(delta.minutes)
                .bind(delta.revenue)
                .execute(&self.pool)
                .await
            }
            AccountingMode::Credits => {
                sqlx::query(
                    r"
                    UPDATE principals
                    SET credits_remaining = credits_remaining - $2,
                        minutes_used = minutes_used + $3,
                        revenue_generated = revenue_generated + $4,
                        updated_at = NOW()
                    WHERE id = $1 AND deleted_at IS NULL
                      AND credits_remaining >= $2
                    ",
                )
                .bind(id)
                .bind(delta.cost)
                .bind(delta.minutes)
                .bind(delta.revenue)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            if self.exists(id).await? {
                return Err(match mode {
                    AccountingMode::Minutes => DomainError::AllocationExhausted,
                    AccountingMode::Credits => DomainError::InsufficientCredits,
                });
            }
            return Err(principal_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, reason))]
    async fn transition_status(
        &self,
        id: Uuid,
        from: LifecycleStatus,
        to: LifecycleStatus,
        reason: Option<&str>,
        actor: Uuid,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE principals
            SET status = $3, pause_reason = $4, status_changed_by = $5, updated_at = NOW()
            WHERE id = $1 AND status = $2 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(reason)
        .bind(actor)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, reason))]
    async fn transition_all(
        &self,
        from: LifecycleStatus,
        to: LifecycleStatus,
        reason: Option<&str>,
        actor: Uuid,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE principals
            SET status = $2, pause_reason = $3, status_changed_by = $4, updated_at = NOW()
            WHERE status = $1 AND role = $5 AND deleted_at IS NULL
            ",
        )
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(reason)
        .bind(actor)
        .bind(Role::Tenant.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_active_tenants(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM principals
            WHERE role = $1 AND status = $2 AND deleted_at IS NULL
            ",
        )
        .bind(Role::Tenant.as_str())
        .bind(LifecycleStatus::Active.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_tenants(&self) -> RepoResult<Vec<Principal>> {
        let models = sqlx::query_as::<_, PrincipalModel>(&format!(
            r"
            SELECT {PRINCIPAL_COLUMNS} FROM principals
            WHERE role = $1 AND deleted_at IS NULL
            ORDER BY created_at
            "
        ))
        .bind(Role::Tenant.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Principal::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn top_by_revenue(&self, n: i64) -> RepoResult<Vec<TopTenant>> {
        let models = sqlx::query_as::<_, TopTenantModel>(
            r"
            SELECT id, display_name, email, category, revenue_generated, minutes_used
            FROM principals
            WHERE role = $1 AND deleted_at IS NULL
            ORDER BY revenue_generated DESC, id ASC
            LIMIT $2
            ",
        )
        .bind(Role::Tenant.as_str())
        .bind(n)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(top_tenant_from_model).collect())
    }

    #[instrument(skip(self))]
    async fn top_by_minutes(&self, n: i64) -> RepoResult<Vec<TopTenant>> {
        let models = sqlx::query_as::<_, TopTenantModel>(
            r"
            SELECT id, display_name, email, category, revenue_generated, minutes_used
            FROM principals
            WHERE role = $1 AND deleted_at IS NULL
            ORDER BY minutes_used DESC, id ASC
            LIMIT $2
            ",
        )
        .bind(Role::Tenant.as_str())
        .bind(n)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(top_tenant_from_model).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPrincipalRepository>();
    }
}
