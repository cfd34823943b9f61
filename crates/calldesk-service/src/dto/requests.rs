//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies that carry user input
//! also implement `Validate`.

use calldesk_core::{CallOutcome, LifecycleStatus, Role, UserCategory};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Email + password login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Change password request (requires the current secret)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

/// Forgot password request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Reset code verification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyResetCodeRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,
}

/// Password reset request (consumes the code)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

/// Elevated-action PIN verification request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PinVerificationRequest {
    #[validate(length(min = 1, message = "PIN is required"))]
    pub pin: String,
}

// ============================================================================
// Call Log Requests
// ============================================================================

/// Filtered, paginated call-log listing.
///
/// The owner scope is NOT part of this request: it is derived from the
/// caller's role server-side and cannot be widened from the client.
#[derive(Debug, Clone, Default)]
pub struct CallLogListRequest {
    /// Admin-supplied owner filter; ignored for non-admin callers
    pub owner_id: Option<Uuid>,
    pub outcome: Option<CallOutcome>,
    pub contact: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: i64,
    pub page_size: i64,
}

// ============================================================================
// User Administration Requests
// ============================================================================

/// Admin user-list request
#[derive(Debug, Clone, Default)]
pub struct UserListRequest {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub page: i64,
    pub page_size: i64,
}

/// Create tenant request (admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: Option<Role>,

    #[serde(default)]
    pub category: Option<UserCategory>,

    #[validate(range(min = 0, message = "Minutes allocation cannot be negative"))]
    #[serde(default)]
    pub minutes_allocated: Option<i32>,

    #[serde(default)]
    pub monthly_plan_cost: Option<f64>,
}

/// Partial tenant update request (admin).
///
/// Setting `status` here is the data-correction path; it is how a blocked
/// account is lifted.
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub display_name: Option<String>,

    pub role: Option<Role>,

    pub category: Option<UserCategory>,

    #[validate(range(min = 0, message = "Minutes allocation cannot be negative"))]
    pub minutes_allocated: Option<i32>,

    pub monthly_plan_cost: Option<f64>,

    pub status: Option<LifecycleStatus>,

    pub pause_reason: Option<String>,
}

/// Pause request: reason plus elevated-action PIN in the same body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PauseRequest {
    #[validate(length(min = 1, message = "Pause reason is required"))]
    pub reason: String,

    #[validate(length(min = 1, message = "PIN is required"))]
    pub pin: String,
}

/// Bulk pause request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PauseAllRequest {
    #[validate(length(min = 1, message = "Pause reason is required"))]
    pub reason: String,

    #[validate(length(min = 1, message = "PIN is required"))]
    pub pin: String,
}

/// Toggle request: pausing direction needs the same fields as a pause
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ToggleUserRequest {
    pub reason: Option<String>,
    pub pin: Option<String>,
}

/// Broadcast recipients selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadcastRecipients {
    All,
    Category,
    Individual,
}

/// Admin broadcast ("send update") request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BroadcastRequest {
    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    pub recipients: BroadcastRecipients,

    #[serde(default)]
    pub category: Option<UserCategory>,

    #[serde(default)]
    pub recipient_ids: Option<Vec<Uuid>>,
}

// ============================================================================
// System Requests
// ============================================================================

/// Service toggle request (admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleServiceRequest {
    #[validate(length(min = 1, message = "Service name is required"))]
    pub service_name: String,
}

/// Bot settings upsert request (tenant)
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct BotSettingsRequest {
    #[validate(length(max = 2000, message = "Opening message must be at most 2000 characters"))]
    pub opening_message: Option<String>,

    pub model: Option<String>,

    #[validate(range(min = 0.0, max = 2.0, message = "Temperature must be between 0 and 2"))]
    pub temperature: Option<f64>,

    pub response_length: Option<String>,

    pub category: Option<UserCategory>,

    pub active: Option<bool>,
}

// ============================================================================
// Public Requests
// ============================================================================

/// Contact form submission (public)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactFormRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}
