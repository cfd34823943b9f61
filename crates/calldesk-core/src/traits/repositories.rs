//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::entities::{BotProfile, CallRecord, Notification, Principal, ServiceFlag};
use crate::error::DomainError;
use crate::value_objects::{AccountingMode, CallOutcome, LifecycleStatus, Role};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Principal Repository
// ============================================================================

/// Usage increment applied by the ledger for one billable call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageDelta {
    pub minutes: f64,
    pub cost: f64,
    pub revenue: f64,
}

/// Admin user-list query
#[derive(Debug, Clone, Default)]
pub struct PrincipalSearch {
    /// Case-insensitive match against display name or email
    pub search: Option<String>,
    pub role: Option<Role>,
    pub limit: i64,
    pub offset: i64,
}

/// One page of principals plus the unpaged total
#[derive(Debug, Clone)]
pub struct PrincipalPage {
    pub principals: Vec<Principal>,
    pub total: i64,
}

/// Tenant ranked by revenue or minutes
#[derive(Debug, Clone, PartialEq)]
pub struct TopTenant {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub category: String,
    pub revenue: f64,
    pub minutes_used: f64,
}

#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Find principal by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Principal>>;

    /// Find principal by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Principal>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new principal
    async fn create(&self, principal: &Principal, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields (name, category, role, allocation, plan cost, status correction)
    async fn update(&self, principal: &Principal) -> RepoResult<()>;

    /// Soft delete a principal
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Search principals with pagination (admin listing)
    async fn search(&self, query: &PrincipalSearch) -> RepoResult<PrincipalPage>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()>;

    /// Store a password reset code with its expiry
    async fn set_reset_code(
        &self,
        id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Clear any stored reset code
    async fn clear_reset_code(&self, id: Uuid) -> RepoResult<()>;

    /// Atomically record usage for one billable call.
    ///
    /// MUST be a single update expression; concurrent calls for the same
    /// principal must not lose increments. Fails with `AllocationExhausted`
    /// (minutes mode) or `InsufficientCredits` (credits mode) once the
    /// budget is spent.
    async fn record_usage(&self, id: Uuid, delta: UsageDelta, mode: AccountingMode)
        -> RepoResult<()>;

    /// Conditionally transition lifecycle status.
    ///
    /// Applies only when the row is currently in `from`; returns whether a
    /// row was updated. Last-writer-wins under concurrent admin actions.
    async fn transition_status(
        &self,
        id: Uuid,
        from: LifecycleStatus,
        to: LifecycleStatus,
        reason: Option<&str>,
        actor: Uuid,
    ) -> RepoResult<bool>;

    /// Bulk-transition every tenant currently in `from`; returns affected count
    async fn transition_all(
        &self,
        from: LifecycleStatus,
        to: LifecycleStatus,
        reason: Option<&str>,
        actor: Uuid,
    ) -> RepoResult<u64>;

    /// Count non-deleted tenants in active status
    async fn count_active_tenants(&self) -> RepoResult<i64>;

    /// All non-deleted tenants (broadcast targeting)
    async fn list_tenants(&self) -> RepoResult<Vec<Principal>>;

    /// Top tenants by attributed revenue, ties broken by id ascending
    async fn top_by_revenue(&self, n: i64) -> RepoResult<Vec<TopTenant>>;

    /// Top tenants by minutes used, ties broken by id ascending
    async fn top_by_minutes(&self, n: i64) -> RepoResult<Vec<TopTenant>>;
}

// ============================================================================
// Call Record Repository
// ============================================================================

/// Filtered, paginated call-log query.
///
/// `owner_id` is set server-side: non-admin callers are always constrained
/// to their own records before this struct is built.
#[derive(Debug, Clone, Default)]
pub struct CallLogQuery {
    pub owner_id: Option<Uuid>,
    pub outcome: Option<CallOutcome>,
    /// Case-insensitive substring match on contact name
    pub contact: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

/// One page of call records plus the unpaged total
#[derive(Debug, Clone)]
pub struct CallLogPage {
    pub records: Vec<CallRecord>,
    pub total: i64,
}

/// Aggregated call counters for one owner or for all tenants
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CallStats {
    pub total_calls: i64,
    pub answered_calls: i64,
    pub total_minutes: f64,
    pub total_cost: f64,
    pub total_revenue: f64,
}

/// Per-day call activity bucket
#[derive(Debug, Clone, PartialEq)]
pub struct DayActivity {
    pub day: NaiveDate,
    pub calls: i64,
    pub minutes: f64,
    pub revenue: f64,
}

#[async_trait]
pub trait CallRecordRepository: Send + Sync {
    /// Append a call record (immutable afterward)
    async fn create(&self, record: &CallRecord) -> RepoResult<()>;

    /// Find a single record by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<CallRecord>>;

    /// Filtered, paginated listing with unpaged total, newest first
    async fn query(&self, query: &CallLogQuery) -> RepoResult<CallLogPage>;

    /// Aggregate counters, optionally scoped to one owner
    async fn stats(&self, owner_id: Option<Uuid>) -> RepoResult<CallStats>;

    /// Per-day activity over a trailing window
    async fn recent_activity(&self, days: i64) -> RepoResult<Vec<DayActivity>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// Which notifications a principal may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationScope {
    /// Broadcast rows (`principal_id IS NULL`) - admin view
    Broadcast,
    /// Rows addressed to one tenant
    Tenant(Uuid),
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Write a notification row
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// List notifications in scope, newest first, capped at `limit`
    async fn list(
        &self,
        scope: NotificationScope,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>>;

    /// Count unread notifications in scope
    async fn unread_count(&self, scope: NotificationScope) -> RepoResult<i64>;

    /// Mark a notification read; idempotent
    async fn mark_read(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Bot Profile Repository
// ============================================================================

#[async_trait]
pub trait BotProfileRepository: Send + Sync {
    /// Find the profile for a tenant
    async fn find(&self, principal_id: Uuid) -> RepoResult<Option<BotProfile>>;

    /// Insert or update a tenant's profile
    async fn upsert(&self, profile: &BotProfile) -> RepoResult<()>;
}

// ============================================================================
// Service Flag Repository
// ============================================================================

#[async_trait]
pub trait ServiceFlagRepository: Send + Sync {
    /// All flag rows
    async fn all(&self) -> RepoResult<Vec<ServiceFlag>>;

    /// Atomically flip one flag, creating it on first toggle; returns the new state
    async fn toggle(&self, name: &str, actor: Uuid) -> RepoResult<ServiceFlag>;
}
