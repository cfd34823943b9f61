//! # calldesk-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    AdminStatsResponse, AdminUserResponse, AffectedCountResponse, AuthResponse,
    BotSettingsRequest, BotSettingsResponse, BroadcastRecipients, BroadcastRequest,
    BroadcastResponse,
    CallLogListRequest, CallLogListResponse, CallLogResponse, ChangePasswordRequest,
    ContactFormRequest, CreateUserRequest, DayActivityResponse, ForgotPasswordRequest,
    LoginRequest, MessageResponse, NotificationResponse, PaginationMeta, PauseAllRequest,
    PauseRequest, PinVerificationRequest, PrincipalResponse, RefreshTokenRequest,
    ResetPasswordRequest, ServiceFlagStatus, StatsResponse, TenantStatsResponse,
    ToggleServiceRequest, ToggleUserRequest, TopTenantResponse, UnreadCountResponse,
    UpdateUserRequest, UserListRequest, UserListResponse, VerifyResetCodeRequest,
};
pub use services::{
    AuthService, CallLogService, LifecycleService, NotificationService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SystemService, UsageService,
    UserAdminService,
};
