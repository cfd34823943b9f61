//! User administration service (admin-only tenant CRUD)

use calldesk_common::auth::hash_password;
use calldesk_core::traits::PrincipalSearch;
use calldesk_core::{BotProfile, DomainError, LifecycleStatus, Principal, Role, UserCategory};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    AdminUserResponse, CreateUserRequest, MessageResponse, PaginationMeta, UpdateUserRequest,
    UserListRequest, UserListResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Default page size for the admin listing
const DEFAULT_PAGE_SIZE: i64 = 10;
/// Maximum page size
const MAX_PAGE_SIZE: i64 = 100;

/// User administration service
pub struct UserAdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserAdminService<'a> {
    /// Create a new UserAdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Search and page through principals
    #[instrument(skip(self, request))]
    pub async fn list(&self, request: UserListRequest) -> ServiceResult<UserListResponse> {
        let page = request.page.max(1);
        let page_size = if request.page_size > 0 {
            request.page_size.min(MAX_PAGE_SIZE)
        } else {
            DEFAULT_PAGE_SIZE
        };

        let result = self
            .ctx
            .principal_repo()
            .search(&PrincipalSearch {
                search: request.search,
                role: request.role,
                limit: page_size,
                offset: (page - 1) * page_size,
            })
            .await?;

        Ok(UserListResponse {
            users: result.principals.iter().map(AdminUserResponse::from).collect(),
            pagination: PaginationMeta::new(page, page_size, result.total),
        })
    }

    /// Create a tenant; duplicate email is a conflict
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CreateUserRequest) -> ServiceResult<AdminUserResponse> {
        if self
            .ctx
            .principal_repo()
            .email_exists(&request.email)
            .await?
        {
            return Err(ServiceError::Domain(DomainError::EmailAlreadyExists));
        }

        let password_hash = hash_password(&request.password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let category = request.category.unwrap_or(UserCategory::Sales);
        let mut principal = Principal::new(
            self.ctx.generate_id(),
            request.email,
            request.name,
            request.role.unwrap_or(Role::Tenant),
            category,
            request.minutes_allocated.unwrap_or(0),
        );
        principal.monthly_plan_cost = request.monthly_plan_cost.unwrap_or(0.0);

        self.ctx
            .principal_repo()
            .create(&principal, &password_hash)
            .await?;

        // Seed the default bot profile so the first dashboard visit has
        // something to render
        let profile = BotProfile::defaults_for(principal.id, category);
        self.ctx.bot_profile_repo().upsert(&profile).await?;

        info!(principal_id = %principal.id, "Tenant created");
        Ok(AdminUserResponse::from(&principal))
    }

    /// Partial update of profile fields.
    ///
    /// This is also the data-correction path for lifecycle status: setting
    /// `status` here bypasses the transition preconditions (and is the only
    /// way a blocked account returns to service).
    #[instrument(skip(self, request), fields(actor = %actor))]
    pub async fn update(
        &self,
        actor: Uuid,
        principal_id: Uuid,
        request: UpdateUserRequest,
    ) -> ServiceResult<AdminUserResponse> {
        let mut principal = self
            .ctx
            .principal_repo()
            .find_by_id(principal_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Principal", principal_id.to_string()))?;

        if let Some(display_name) = request.display_name {
            principal.display_name = display_name;
        }
        if let Some(role) = request.role {
            principal.role = role;
        }
        if let Some(category) = request.category {
            principal.category = category;
        }
        if let Some(minutes_allocated) = request.minutes_allocated {
            principal.minutes_allocated = minutes_allocated;
        }
        if let Some(monthly_plan_cost) = request.monthly_plan_cost {
            principal.monthly_plan_cost = monthly_plan_cost;
        }
        if let Some(status) = request.status {
            match status {
                LifecycleStatus::Paused => {
                    let reason = request
                        .pause_reason
                        .as_deref()
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                        .ok_or(DomainError::PauseReasonRequired)?;
                    principal.pause_reason = Some(reason.to_string());
                }
                LifecycleStatus::Active | LifecycleStatus::Blocked => {
                    principal.pause_reason = None;
                }
            }
            principal.status = status;
            principal.status_changed_by = Some(actor);
        }

        self.ctx.principal_repo().update(&principal).await?;

        info!(%principal_id, "Tenant updated");
        Ok(AdminUserResponse::from(&principal))
    }

    /// Soft-delete a principal; self-deletion is refused, and referenced
    /// call/notification rows survive the delete.
    #[instrument(skip(self), fields(actor = %actor))]
    pub async fn delete(&self, actor: Uuid, principal_id: Uuid) -> ServiceResult<MessageResponse> {
        if actor == principal_id {
            return Err(ServiceError::Domain(DomainError::CannotDeleteSelf));
        }

        self.ctx.principal_repo().delete(principal_id).await?;

        info!(%principal_id, "Tenant deleted");
        Ok(MessageResponse::new("User deleted successfully"))
    }
}
