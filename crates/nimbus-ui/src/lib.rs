pub mod bridge;
pub mod error_mapping;
pub mod models;
pub mod services;

pub use models::weather_model::{ActiveView, ViewState, WeatherModel};
pub use services::weather_service::WeatherServiceMessage;
