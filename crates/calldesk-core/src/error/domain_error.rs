//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::LifecycleStatus;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Principal not found: {0}")]
    PrincipalNotFound(Uuid),

    #[error("Call record not found: {0}")]
    CallRecordNotFound(Uuid),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Uuid),

    #[error("Bot profile not found")]
    BotProfileNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid call duration: {0}")]
    InvalidDuration(f64),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Pause requires a non-empty reason")]
    PauseReasonRequired,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Admin access required")]
    AdminRequired,

    #[error("Not the owner of this resource")]
    NotOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Cannot delete own account")]
    CannotDeleteSelf,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        from: LifecycleStatus,
        to: LifecycleStatus,
    },

    #[error("Minutes allocation exhausted")]
    AllocationExhausted,

    #[error("Insufficient credits")]
    InsufficientCredits,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PrincipalNotFound(_) => "UNKNOWN_PRINCIPAL",
            Self::CallRecordNotFound(_) => "UNKNOWN_CALL_RECORD",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::BotProfileNotFound => "UNKNOWN_BOT_PROFILE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidDuration(_) => "INVALID_DURATION",
            Self::UnknownService(_) => "UNKNOWN_SERVICE",
            Self::PauseReasonRequired => "PAUSE_REASON_REQUIRED",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotOwner => "NOT_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::CannotDeleteSelf => "CANNOT_DELETE_SELF",

            // Business Rules
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::AllocationExhausted => "ALLOCATION_EXHAUSTED",
            Self::InsufficientCredits => "INSUFFICIENT_CREDITS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PrincipalNotFound(_)
                | Self::CallRecordNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::BotProfileNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::InvalidDuration(_)
                | Self::UnknownService(_)
                | Self::PauseReasonRequired
                | Self::InvalidTransition { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AdminRequired | Self::NotOwner | Self::AllocationExhausted | Self::InsufficientCredits
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::CannotDeleteSelf)
    }
}
