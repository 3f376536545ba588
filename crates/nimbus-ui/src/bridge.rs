//! Process-wide runtime and service construction.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use nimbus_core::WeatherConfig;
use nimbus_weather::{FetchError, ForecastClient, ForecastEndpoint};

// Static tokio runtime that lives for the duration of the application
static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Get the shared tokio runtime, creating it on first use
pub fn get_or_init_runtime() -> Result<tokio::runtime::Handle> {
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime.handle().clone());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("nimbus-tokio")
        .build()
        .context("Failed to create tokio runtime")?;

    // Another thread may have won the race; its runtime is kept and ours dropped.
    let _ = RUNTIME.set(runtime);

    RUNTIME
        .get()
        .map(|r| r.handle().clone())
        .context("Tokio runtime not initialized")
}

/// Forecast endpoint described by the weather config
pub fn forecast_endpoint(config: &WeatherConfig) -> ForecastEndpoint {
    ForecastEndpoint {
        base_url: config.base_url.clone(),
        latitude: config.latitude,
        longitude: config.longitude,
        timezone: config.timezone.clone(),
    }
}

/// Build the forecast client for the weather config
pub fn forecast_client(config: &WeatherConfig) -> Result<ForecastClient, FetchError> {
    let client = ForecastClient::new(forecast_endpoint(config), config.request_timeout())?;
    tracing::info!(
        "Weather services initialized for {} ({}, {})",
        config.location_name,
        config.latitude,
        config.longitude
    );
    Ok(client)
}
