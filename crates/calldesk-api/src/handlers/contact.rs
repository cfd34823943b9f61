//! Public contact-form handler

use axum::{extract::State, Json};
use calldesk_service::{ContactFormRequest, MessageResponse, NotificationService};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Submit the public contact form; lands as an admin broadcast notification
///
/// POST /contact
pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ContactFormRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.contact_form(request).await?;
    Ok(Created(Json(response)))
}
