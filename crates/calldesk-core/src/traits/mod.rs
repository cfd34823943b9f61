//! Repository traits (ports) for data access

mod repositories;

pub use repositories::{
    BotProfileRepository, CallLogPage, CallLogQuery, CallRecordRepository, CallStats, DayActivity,
    NotificationRepository, NotificationScope, PrincipalPage, PrincipalRepository,
    PrincipalSearch, RepoResult, ServiceFlagRepository, TopTenant, UsageDelta,
};
