//! Maps fetch errors to nimbus_core::AppError for consistent user-facing messages.

mod weather;

pub use weather::{app_error, retry_message};
