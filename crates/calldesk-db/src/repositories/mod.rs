//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in calldesk-core.

mod bot_profile;
mod call_record;
mod error;
mod notification;
mod principal;
mod service_flag;

pub use bot_profile::PgBotProfileRepository;
pub use call_record::PgCallRecordRepository;
pub use notification::PgNotificationRepository;
pub use principal::PgPrincipalRepository;
pub use service_flag::PgServiceFlagRepository;
