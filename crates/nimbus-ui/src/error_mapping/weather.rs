use nimbus_core::{AppError, ReqwestErrorExt, WeatherError};
use nimbus_weather::FetchError;

/// Classify a fetch failure in the application error hierarchy.
pub fn app_error(e: &FetchError) -> AppError {
    match e {
        FetchError::InvalidEndpoint(cause) => {
            AppError::Weather(WeatherError::InvalidEndpoint(cause.to_string()))
        }
        FetchError::TransportFailure(cause) => AppError::Network(cause.to_network_error()),
        FetchError::DecodeFailure(cause) => {
            AppError::Weather(WeatherError::DecodeFailed(cause.to_string()))
        }
    }
}

/// Detail text for the error screen shown above the retry action.
pub fn retry_message(e: &FetchError) -> String {
    match e {
        FetchError::InvalidEndpoint(_) => "Invalid URL. Please check the endpoint.".to_string(),
        FetchError::TransportFailure(cause) => format!("Network request failed: {}", cause),
        FetchError::DecodeFailure(cause) => format!("Failed to parse weather data: {}", cause),
    }
}
