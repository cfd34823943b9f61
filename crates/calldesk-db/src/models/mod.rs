//! Database models - SQLx-compatible structs for PostgreSQL tables

mod bot_profile;
mod call_record;
mod notification;
mod principal;
mod service_flag;

pub use bot_profile::BotProfileModel;
pub use call_record::{CallRecordModel, CallStatsModel, DayActivityModel};
pub use notification::NotificationModel;
pub use principal::{PrincipalModel, TopTenantModel};
pub use service_flag::ServiceFlagModel;
