//! Domain entities - core business objects

mod bot_profile;
mod call_record;
mod notification;
mod principal;
mod service_flag;

pub use bot_profile::BotProfile;
pub use call_record::CallRecord;
pub use notification::Notification;
pub use principal::Principal;
pub use service_flag::{ServiceFlag, KNOWN_SERVICES};
