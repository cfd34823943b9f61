//! HTTP request handlers, grouped by route family

pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod system;
pub mod users;
