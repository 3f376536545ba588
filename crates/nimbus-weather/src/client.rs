//! Open-Meteo forecast client.
//!
//! One GET per `fetch()`, no retries. The endpoint and coordinates are fixed
//! when the client is built.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::types::{DecodeError, FetchError, ForecastResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_LATITUDE: f64 = 28.6358;
pub const DEFAULT_LONGITUDE: f64 = 77.2245;
pub const DEFAULT_TIMEZONE: &str = "IST";

/// Anything that can produce a forecast.
///
/// The returned future owns everything it needs so the caller can start the
/// request on one task and await it on another.
pub trait ForecastSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<ForecastResponse, FetchError>> + Send + 'static;
}

/// Where to ask for the forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEndpoint {
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl Default for ForecastEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl ForecastEndpoint {
    /// Build the full request URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] if `base_url` does not parse.
    pub fn url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("latitude", &self.latitude.to_string())
            .append_pair("longitude", &self.longitude.to_string())
            .append_pair("hourly", "temperature_2m")
            .append_pair("daily", "weather_code")
            .append_pair("timezone", &self.timezone);
        Ok(url)
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Arc<Client>,
    endpoint: ForecastEndpoint,
}

impl ForecastClient {
    /// Create a client for `endpoint`. `None` leaves the transport without a timeout.
    ///
    /// The endpoint URL is not checked here; a malformed one surfaces from
    /// `fetch()` as [`FetchError::InvalidEndpoint`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::TransportFailure`] if the HTTP client cannot be built.
    pub fn new(endpoint: ForecastEndpoint, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoint,
        })
    }
}

impl ForecastSource for ForecastClient {
    fn fetch(&self) -> impl Future<Output = Result<ForecastResponse, FetchError>> + Send + 'static {
        let client = Arc::clone(&self.client);
        let url = self.endpoint.url();

        async move {
            let url = url?;
            tracing::debug!("Requesting forecast from {}", url);

            let response = client.get(url).send().await?.error_for_status()?;
            let body = response.text().await?;
            let forecast = decode_forecast(&body)?;

            tracing::info!("Forecast fetched: {} hourly points", forecast.hourly.len());
            Ok(forecast)
        }
    }
}

/// Decode an Open-Meteo body, rejecting hourly arrays of different lengths.
///
/// # Errors
///
/// Returns [`DecodeError`] on malformed JSON, a missing field, or misaligned arrays.
pub fn decode_forecast(body: &str) -> Result<ForecastResponse, DecodeError> {
    let forecast: ForecastResponse = serde_json::from_str(body)?;

    let times = forecast.hourly.time.len();
    let temperatures = forecast.hourly.temperature_2m.len();
    if times != temperatures {
        return Err(DecodeError::LengthMismatch {
            times,
            temperatures,
        });
    }

    Ok(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_has_fixed_query() {
        let url = ForecastEndpoint::default().url().unwrap();
        assert_eq!(url.host_str(), Some("api.open-meteo.com"));
        assert_eq!(url.path(), "/v1/forecast");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("latitude".into(), "28.6358".into())));
        assert!(pairs.contains(&("longitude".into(), "77.2245".into())));
        assert!(pairs.contains(&("hourly".into(), "temperature_2m".into())));
        assert!(pairs.contains(&("daily".into(), "weather_code".into())));
        assert!(pairs.contains(&("timezone".into(), "IST".into())));
    }

    #[test]
    fn test_malformed_base_url_is_invalid_endpoint() {
        let endpoint = ForecastEndpoint {
            base_url: "not a url".into(),
            ..ForecastEndpoint::default()
        };
        assert!(matches!(endpoint.url(), Err(FetchError::InvalidEndpoint(_))));
    }

    #[tokio::test]
    async fn test_fetch_with_malformed_base_url_fails_without_request() {
        let endpoint = ForecastEndpoint {
            base_url: "::".into(),
            ..ForecastEndpoint::default()
        };
        let client = ForecastClient::new(endpoint, None).unwrap();
        let result = client.fetch().await;
        assert!(matches!(result, Err(FetchError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_decode_valid_payload() {
        let body = r#"{
            "latitude": 28.625,
            "hourly": {
                "time": ["2024-11-25T00:00", "2024-11-25T01:00"],
                "temperature_2m": [-2.0, 3.0]
            },
            "daily": { "time": ["2024-11-25"], "weather_code": [3] }
        }"#;
        let forecast = decode_forecast(body).unwrap();
        assert_eq!(forecast.hourly.len(), 2);
        assert_eq!(forecast.hourly.temperature_2m, vec![-2.0, 3.0]);
        assert_eq!(forecast.daily.unwrap().weather_code, vec![3]);
    }

    #[test]
    fn test_decode_without_daily_block() {
        let body = r#"{"hourly": {"time": [], "temperature_2m": []}}"#;
        let forecast = decode_forecast(body).unwrap();
        assert!(forecast.hourly.is_empty());
        assert!(forecast.daily.is_none());
    }

    #[test]
    fn test_decode_missing_temperature_is_error() {
        let body = r#"{"hourly": {"time": ["2024-11-25T00:00"]}}"#;
        assert!(matches!(decode_forecast(body), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_length_mismatch_is_error() {
        let body = r#"{"hourly": {"time": ["2024-11-25T00:00"], "temperature_2m": [1.0, 2.0]}}"#;
        match decode_forecast(body) {
            Err(DecodeError::LengthMismatch {
                times,
                temperatures,
            }) => {
                assert_eq!(times, 1);
                assert_eq!(temperatures, 2);
            }
            other => panic!("expected length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_reencode_round_trip_keeps_arrays() {
        let body = r#"{"hourly": {"time": ["2024-11-25T00:00", "2024-11-25T01:00"], "temperature_2m": [-2.5, 3.25]}}"#;
        let first = decode_forecast(body).unwrap();
        let encoded = serde_json::to_string(&first).unwrap();
        let second = decode_forecast(&encoded).unwrap();
        assert_eq!(first, second);
    }
}
