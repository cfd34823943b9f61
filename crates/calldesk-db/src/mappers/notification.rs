//! Notification model <-> entity mapper

use calldesk_core::Notification;

use crate::models::NotificationModel;

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: model.id,
            principal_id: model.principal_id,
            kind: model.kind,
            title: model.title,
            body: model.body,
            payload: model.payload,
            read: model.read,
            created_at: model.created_at,
        }
    }
}
