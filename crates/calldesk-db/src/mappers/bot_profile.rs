//! Bot profile model <-> entity mapper

use calldesk_core::{BotProfile, DomainError};

use crate::models::BotProfileModel;

use super::parse_column;

impl TryFrom<BotProfileModel> for BotProfile {
    type Error = DomainError;

    fn try_from(model: BotProfileModel) -> Result<Self, Self::Error> {
        Ok(BotProfile {
            principal_id: model.principal_id,
            opening_message: model.opening_message,
            model: model.model,
            temperature: model.temperature,
            response_length: model.response_length,
            category: parse_column(&model.category, "category")?,
            active: model.active,
            updated_at: model.updated_at,
        })
    }
}
