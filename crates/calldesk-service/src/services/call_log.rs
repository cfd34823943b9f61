//! Call activity log service
//!
//! Read side of the append-only call log. Owner scoping is enforced here:
//! client-supplied owner filters are honored for admins only.

use calldesk_core::traits::CallLogQuery;
use calldesk_core::Role;
use tracing::instrument;
use uuid::Uuid;

use crate::dto::{CallLogListRequest, CallLogListResponse, CallLogResponse, PaginationMeta};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Default page size
const DEFAULT_PAGE_SIZE: i64 = 10;
/// Maximum page size
const MAX_PAGE_SIZE: i64 = 100;

/// Call activity log service
pub struct CallLogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CallLogService<'a> {
    /// Create a new CallLogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Filtered, paginated listing.
    ///
    /// Non-admin callers are always constrained to their own records; any
    /// `owner_id` they supply is discarded, never trusted.
    #[instrument(skip(self, request), fields(caller = %caller_id))]
    pub async fn list(
        &self,
        caller_id: Uuid,
        caller_role: Role,
        request: CallLogListRequest,
    ) -> ServiceResult<CallLogListResponse> {
        let owner_id = if caller_role.is_admin() {
            request.owner_id
        } else {
            Some(caller_id)
        };

        let page = request.page.max(1);
        let page_size = if request.page_size > 0 {
            request.page_size.min(MAX_PAGE_SIZE)
        } else {
            DEFAULT_PAGE_SIZE
        };

        let result = self
            .ctx
            .call_repo()
            .query(&CallLogQuery {
                owner_id,
                outcome: request.outcome,
                contact: request.contact,
                date_from: request.date_from,
                date_to: request.date_to,
                limit: page_size,
                offset: (page - 1) * page_size,
            })
            .await?;

        let include_financials = caller_role.is_admin();
        Ok(CallLogListResponse {
            call_logs: result
                .records
                .iter()
                .map(|r| CallLogResponse::project(r, include_financials))
                .collect(),
            pagination: PaginationMeta::new(page, page_size, result.total),
        })
    }

    /// Single record, ownership-checked: a foreign record is indistinguishable
    /// from a missing one for non-admin callers.
    #[instrument(skip(self), fields(caller = %caller_id))]
    pub async fn get(
        &self,
        caller_id: Uuid,
        caller_role: Role,
        record_id: Uuid,
    ) -> ServiceResult<CallLogResponse> {
        let record = self
            .ctx
            .call_repo()
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Call record", record_id.to_string()))?;

        if !caller_role.is_admin() && record.principal_id != caller_id {
            return Err(ServiceError::not_found("Call record", record_id.to_string()));
        }

        Ok(CallLogResponse::project(&record, caller_role.is_admin()))
    }
}
