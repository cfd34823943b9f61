//! Service flag model <-> entity mapper

use calldesk_core::ServiceFlag;

use crate::models::ServiceFlagModel;

impl From<ServiceFlagModel> for ServiceFlag {
    fn from(model: ServiceFlagModel) -> Self {
        ServiceFlag {
            name: model.name,
            enabled: model.enabled,
            updated_by: model.updated_by,
            updated_at: model.updated_at,
        }
    }
}
