//! Data transfer objects
//!
//! Requests implement `Deserialize` + `Validate` so input is checked at the
//! boundary; responses are explicit projections - internal fields (hashes,
//! reset codes, admin-only financials) never serialize by accident.

mod mappers;
mod requests;
mod responses;

pub use requests::{
    BotSettingsRequest, BroadcastRecipients, BroadcastRequest, CallLogListRequest,
    ChangePasswordRequest,
    ContactFormRequest, CreateUserRequest, ForgotPasswordRequest, LoginRequest, PauseAllRequest,
    PauseRequest, PinVerificationRequest, RefreshTokenRequest, ResetPasswordRequest,
    ToggleServiceRequest, ToggleUserRequest, UpdateUserRequest, UserListRequest,
    VerifyResetCodeRequest,
};
pub use responses::{
    AdminStatsResponse, AdminUserResponse, AffectedCountResponse, AuthResponse,
    BotSettingsResponse, BroadcastResponse, CallLogListResponse, CallLogResponse,
    DayActivityResponse, MessageResponse, NotificationResponse, PaginationMeta,
    PrincipalResponse, ServiceFlagStatus, StatsResponse, TenantStatsResponse,
    TopTenantResponse, UnreadCountResponse, UserListResponse,
};
