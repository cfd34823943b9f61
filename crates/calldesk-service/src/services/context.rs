//! Service context - dependency container for services
//!
//! Holds repositories and shared services behind trait objects; no component
//! reaches for a global store handle, which keeps every service testable
//! against doubles.

use std::sync::Arc;

use calldesk_common::auth::{ElevatedPin, JwtService};
use calldesk_core::traits::{
    BotProfileRepository, CallRecordRepository, NotificationRepository, PrincipalRepository,
    ServiceFlagRepository,
};
use calldesk_core::AccountingMode;
use uuid::Uuid;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    principal_repo: Arc<dyn PrincipalRepository>,
    call_repo: Arc<dyn CallRecordRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    bot_profile_repo: Arc<dyn BotProfileRepository>,
    service_flag_repo: Arc<dyn ServiceFlagRepository>,
    jwt_service: Arc<JwtService>,
    elevated_pin: Arc<ElevatedPin>,
    accounting_mode: AccountingMode,
}

impl ServiceContext {
    /// Get the principal repository
    pub fn principal_repo(&self) -> &dyn PrincipalRepository {
        self.principal_repo.as_ref()
    }

    /// Get the call record repository
    pub fn call_repo(&self) -> &dyn CallRecordRepository {
        self.call_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the bot profile repository
    pub fn bot_profile_repo(&self) -> &dyn BotProfileRepository {
        self.bot_profile_repo.as_ref()
    }

    /// Get the service flag repository
    pub fn service_flag_repo(&self) -> &dyn ServiceFlagRepository {
        self.service_flag_repo.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the elevated-action PIN verifier
    pub fn elevated_pin(&self) -> &ElevatedPin {
        self.elevated_pin.as_ref()
    }

    /// This deployment's usage accounting strategy
    pub fn accounting_mode(&self) -> AccountingMode {
        self.accounting_mode
    }

    /// Generate a new entity ID
    pub fn generate_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("accounting_mode", &self.accounting_mode)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    principal_repo: Option<Arc<dyn PrincipalRepository>>,
    call_repo: Option<Arc<dyn CallRecordRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    bot_profile_repo: Option<Arc<dyn BotProfileRepository>>,
    service_flag_repo: Option<Arc<dyn ServiceFlagRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    elevated_pin: Option<Arc<ElevatedPin>>,
    accounting_mode: AccountingMode,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal_repo(mut self, repo: Arc<dyn PrincipalRepository>) -> Self {
        self.principal_repo = Some(repo);
        self
    }

    pub fn call_repo(mut self, repo: Arc<dyn CallRecordRepository>) -> Self {
        self.call_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn bot_profile_repo(mut self, repo: Arc<dyn BotProfileRepository>) -> Self {
        self.bot_profile_repo = Some(repo);
        self
    }

    pub fn service_flag_repo(mut self, repo: Arc<dyn ServiceFlagRepository>) -> Self {
        self.service_flag_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn elevated_pin(mut self, pin: Arc<ElevatedPin>) -> Self {
        self.elevated_pin = Some(pin);
        self
    }

    pub fn accounting_mode(mut self, mode: AccountingMode) -> Self {
        self.accounting_mode = mode;
        self
    }

    /// Build the context
    ///
    /// # Errors
    /// Returns the name of the first missing dependency
    pub fn build(self) -> Result<ServiceContext, String> {
        Ok(ServiceContext {
            principal_repo: self.principal_repo.ok_or("principal_repo is required")?,
            call_repo: self.call_repo.ok_or("call_repo is required")?,
            notification_repo: self
                .notification_repo
                .ok_or("notification_repo is required")?,
            bot_profile_repo: self
                .bot_profile_repo
                .ok_or("bot_profile_repo is required")?,
            service_flag_repo: self
                .service_flag_repo
                .ok_or("service_flag_repo is required")?,
            jwt_service: self.jwt_service.ok_or("jwt_service is required")?,
            elevated_pin: self.elevated_pin.ok_or("elevated_pin is required")?,
            accounting_mode: self.accounting_mode,
        })
    }
}
