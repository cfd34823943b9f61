//! Usage ledger service
//!
//! Records billable consumption and produces the role-shaped dashboard
//! summaries.

use calldesk_core::traits::{CallStats, UsageDelta};
use calldesk_core::{CallRecord, DomainError, Role};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AdminStatsResponse, DayActivityResponse, StatsResponse, TenantStatsResponse,
    TopTenantResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Trailing window for the admin activity chart
const ACTIVITY_WINDOW_DAYS: i64 = 30;
/// How many tenants the rankings return
const TOP_TENANTS: i64 = 5;

/// Usage ledger service
pub struct UsageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UsageService<'a> {
    /// Create a new UsageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a completed call and, for billable outcomes, apply the atomic
    /// usage increment in the configured accounting mode.
    #[instrument(skip(self, record), fields(principal_id = %record.principal_id))]
    pub async fn record_call(&self, record: &CallRecord) -> ServiceResult<()> {
        // Owner existence is checked by the append itself (FK)
        self.ctx.call_repo().create(record).await?;

        if record.is_billable() {
            let delta = UsageDelta {
                minutes: record.duration_minutes,
                cost: record.cost.unwrap_or(0.0),
                revenue: record.revenue.unwrap_or(0.0),
            };
            self.ctx
                .principal_repo()
                .record_usage(record.principal_id, delta, self.ctx.accounting_mode())
                .await?;

            info!(minutes = record.duration_minutes, "Usage recorded");
        }

        Ok(())
    }

    /// Role-shaped dashboard stats: admins get the global summary
    #[instrument(skip(self))]
    pub async fn stats_for(&self, principal_id: Uuid, role: Role) -> ServiceResult<StatsResponse> {
        if role.is_admin() {
            Ok(StatsResponse::Admin(self.global_summary().await?))
        } else {
            Ok(StatsResponse::Tenant(
                self.tenant_summary(principal_id).await?,
            ))
        }
    }

    /// Per-tenant usage summary
    #[instrument(skip(self))]
    pub async fn tenant_summary(&self, principal_id: Uuid) -> ServiceResult<TenantStatsResponse> {
        let principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        let stats = self.stats_with_retry(Some(principal_id)).await?;
        let bot_active = self
            .ctx
            .bot_profile_repo()
            .find(principal_id)
            .await?
            .is_some_and(|p| p.active);

        let avg_cost_per_minute = if stats.total_minutes > 0.0 {
            stats.total_cost / stats.total_minutes
        } else {
            0.0
        };

        Ok(TenantStatsResponse {
            calls_made: stats.total_calls,
            pickup_rate: pickup_rate(stats.answered_calls, stats.total_calls),
            minutes_used: principal.minutes_used,
            minutes_allocated: principal.minutes_allocated,
            total_minutes: stats.total_minutes,
            total_cost: stats.total_cost,
            avg_cost_per_minute,
            bot_active,
        })
    }

    /// Admin-wide usage summary
    #[instrument(skip(self))]
    pub async fn global_summary(&self) -> ServiceResult<AdminStatsResponse> {
        let stats = self.stats_with_retry(None).await?;
        let active_clients = self.ctx.principal_repo().count_active_tenants().await?;
        let flags = self.ctx.service_flag_repo().all().await?;
        let activity = self
            .ctx
            .call_repo()
            .recent_activity(ACTIVITY_WINDOW_DAYS)
            .await?;
        let top_by_revenue = self.ctx.principal_repo().top_by_revenue(TOP_TENANTS).await?;
        let top_by_minutes = self.ctx.principal_repo().top_by_minutes(TOP_TENANTS).await?;

        Ok(AdminStatsResponse {
            total_calls: stats.total_calls,
            total_revenue: stats.total_revenue,
            active_clients,
            pickup_rate: pickup_rate(stats.answered_calls, stats.total_calls),
            service_status: flags.into_iter().map(|f| (f.name, f.enabled)).collect(),
            recent_activity: activity
                .into_iter()
                .map(|a| DayActivityResponse {
                    date: a.day,
                    calls: a.calls,
                    minutes: a.minutes,
                    revenue: a.revenue,
                })
                .collect(),
            top_by_revenue: top_by_revenue.into_iter().map(TopTenantResponse::from).collect(),
            top_by_minutes: top_by_minutes.into_iter().map(TopTenantResponse::from).collect(),
        })
    }

    /// Aggregation reads get one bounded retry on a store error. They are
    /// idempotent; `record_usage` never is and never retries.
    async fn stats_with_retry(&self, owner_id: Option<Uuid>) -> ServiceResult<CallStats> {
        match self.ctx.call_repo().stats(owner_id).await {
            Ok(stats) => Ok(stats),
            Err(DomainError::DatabaseError(e)) => {
                warn!(error = %e, "Stats read failed, retrying once");
                Ok(self.ctx.call_repo().stats(owner_id).await?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Pickup rate as a whole percentage: `round(100 * answered / total)`,
/// 0 when there are no calls.
pub(crate) fn pickup_rate(answered: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = 100.0 * answered as f64 / total as f64;
    rate.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_rate_zero_calls() {
        assert_eq!(pickup_rate(0, 0), 0);
    }

    #[test]
    fn test_pickup_rate_rounds_to_nearest() {
        // 3/7 = 42.86% -> 43
        assert_eq!(pickup_rate(3, 7), 43);
        // 1/3 = 33.33% -> 33
        assert_eq!(pickup_rate(1, 3), 33);
        // 1/2 = 50%
        assert_eq!(pickup_rate(1, 2), 50);
    }

    #[test]
    fn test_pickup_rate_all_answered() {
        assert_eq!(pickup_rate(5, 5), 100);
    }
}
