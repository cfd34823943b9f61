//! Notification fan-out service
//!
//! Writes addressed or broadcast notifications and serves the per-role views.

use calldesk_core::traits::NotificationScope;
use calldesk_core::{Notification, Role, UserCategory};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    BroadcastRecipients, BroadcastRequest, BroadcastResponse, ContactFormRequest,
    MessageResponse, NotificationResponse, UnreadCountResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Listing cap; bounds the payload regardless of history size
const LIST_LIMIT: i64 = 50;

/// Notification fan-out service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Write one notification; `target = None` broadcasts to admins
    #[instrument(skip(self, title, body, payload))]
    pub async fn notify(
        &self,
        target: Option<Uuid>,
        kind: &str,
        title: String,
        body: String,
        payload: Option<serde_json::Value>,
    ) -> ServiceResult<Uuid> {
        let mut notification = Notification::new(
            self.ctx.generate_id(),
            target,
            kind.to_string(),
            title,
            body,
        );
        notification.payload = payload;

        self.ctx.notification_repo().create(&notification).await?;
        Ok(notification.id)
    }

    /// Public contact-form submission: lands as an admin broadcast with the
    /// structured form fields in the payload.
    #[instrument(skip(self, request), fields(from = %request.email))]
    pub async fn contact_form(&self, request: ContactFormRequest) -> ServiceResult<MessageResponse> {
        let payload = json!({
            "contact_name": request.name,
            "contact_email": request.email,
            "contact_phone": request.phone,
            "contact_company": request.company,
        });

        self.notify(
            None,
            "contact_form",
            format!("New contact form from {}", request.name),
            request.message,
            Some(payload),
        )
        .await?;

        info!("Contact form submission stored");
        Ok(MessageResponse::new(
            "Thank you for contacting us! We'll get back to you soon.",
        ))
    }

    /// Admin "send update": one addressed notification per selected tenant
    #[instrument(skip(self, request))]
    pub async fn broadcast(&self, request: BroadcastRequest) -> ServiceResult<BroadcastResponse> {
        let recipients = self.resolve_recipients(&request).await?;

        for id in &recipients {
            self.notify(
                Some(*id),
                "admin_update",
                request.subject.clone(),
                request.message.clone(),
                None,
            )
            .await?;
        }

        info!(count = recipients.len(), "Broadcast sent");
        Ok(BroadcastResponse {
            message: format!("Update sent to {} user(s)", recipients.len()),
            users_count: recipients.len(),
        })
    }

    /// Role-scoped listing, newest first, capped
    #[instrument(skip(self))]
    pub async fn list_for(
        &self,
        principal_id: Uuid,
        role: Role,
        unread_only: bool,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let scope = Self::scope_for(principal_id, role);
        let notifications = self
            .ctx
            .notification_repo()
            .list(scope, unread_only, LIST_LIMIT)
            .await?;

        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    /// Unread counter for the caller's scope
    #[instrument(skip(self))]
    pub async fn unread_count(
        &self,
        principal_id: Uuid,
        role: Role,
    ) -> ServiceResult<UnreadCountResponse> {
        let scope = Self::scope_for(principal_id, role);
        let count = self.ctx.notification_repo().unread_count(scope).await?;
        Ok(UnreadCountResponse { count })
    }

    /// Mark one notification read; repeating is a no-op
    #[instrument(skip(self))]
    pub async fn mark_read(&self, notification_id: Uuid) -> ServiceResult<MessageResponse> {
        self.ctx.notification_repo().mark_read(notification_id).await?;
        Ok(MessageResponse::new("Notification marked as read"))
    }

    fn scope_for(principal_id: Uuid, role: Role) -> NotificationScope {
        if role.is_admin() {
            NotificationScope::Broadcast
        } else {
            NotificationScope::Tenant(principal_id)
        }
    }

    async fn resolve_recipients(&self, request: &BroadcastRequest) -> ServiceResult<Vec<Uuid>> {
        match request.recipients {
            BroadcastRecipients::All => Ok(self
                .ctx
                .principal_repo()
                .list_tenants()
                .await?
                .into_iter()
                .map(|p| p.id)
                .collect()),
            BroadcastRecipients::Category => {
                let category: UserCategory = request
                    .category
                    .ok_or_else(|| ServiceError::validation("Category is required"))?;
                Ok(self
                    .ctx
                    .principal_repo()
                    .list_tenants()
                    .await?
                    .into_iter()
                    .filter(|p| p.category == category)
                    .map(|p| p.id)
                    .collect())
            }
            BroadcastRecipients::Individual => {
                let ids = request
                    .recipient_ids
                    .as_ref()
                    .filter(|ids| !ids.is_empty())
                    .ok_or_else(|| ServiceError::validation("Recipient ids are required"))?;

                // Unknown ids are skipped rather than failing the whole send
                let mut resolved = Vec::with_capacity(ids.len());
                for id in ids {
                    if self.ctx.principal_repo().find_by_id(*id).await?.is_some() {
                        resolved.push(*id);
                    }
                }
                Ok(resolved)
            }
        }
    }
}
