//! Unified error handling for the entire application

mod app_error;

pub use app_error::{AppError, AppResult, ErrorResponse};
