//! Weather backend: async forecast fetching.
//! Network work runs on the tokio runtime; results come back over a channel
//! and are applied by the model on its own context.

use std::future::Future;

use nimbus_weather::{FetchError, ForecastResponse};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

/// Messages sent from async operations back to the model
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of the fetch started for `token`
    FetchDone {
        token: u64,
        result: Result<ForecastResponse, FetchError>,
    },
}

/// Run `request` on `runtime` and send `FetchDone` when it completes.
pub fn request_fetch<F>(
    tx: &UnboundedSender<WeatherServiceMessage>,
    runtime: &Handle,
    token: u64,
    request: F,
) where
    F: Future<Output = Result<ForecastResponse, FetchError>> + Send + 'static,
{
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = request.await;
        if let Err(e) = &result {
            tracing::warn!("Forecast request {} failed: {}", token, e);
        }

        if tx
            .send(WeatherServiceMessage::FetchDone { token, result })
            .is_err()
        {
            tracing::debug!("Weather model dropped before request {} finished", token);
        }
    });
}
