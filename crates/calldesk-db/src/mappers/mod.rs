//! Model to entity mappers
//!
//! Conversions between database models and domain entities. Enumerated
//! columns are stored as TEXT, so the conversions are fallible: an
//! unparseable value means the row was written outside this codebase and
//! surfaces as an internal error rather than a panic.

mod bot_profile;
mod call_record;
mod notification;
mod principal;
mod service_flag;

pub use call_record::{day_activity_from_model, stats_from_model};
pub use principal::top_tenant_from_model;

use calldesk_core::DomainError;

/// Parse a TEXT enum column into its value object
fn parse_column<T>(value: &str, column: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| DomainError::InternalError(format!("unexpected {column} column value: {e}")))
}
