//! Transport failures from a real HTTP exchange, mapped for display.

use std::time::Duration;

use nimbus_core::{AppError, NetworkError};
use nimbus_ui::error_mapping::{app_error, retry_message};
use nimbus_weather::{FetchError, ForecastClient, ForecastEndpoint, ForecastSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn fetch_from(
    mock_server: &MockServer,
    timeout: Option<Duration>,
) -> Result<nimbus_weather::ForecastResponse, FetchError> {
    let endpoint = ForecastEndpoint {
        base_url: format!("{}/v1/forecast", mock_server.uri()),
        ..ForecastEndpoint::default()
    };
    let client = ForecastClient::new(endpoint, timeout).unwrap();
    client.fetch().await
}

#[tokio::test]
async fn test_server_error_maps_to_network_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let err = fetch_from(&mock_server, None).await.unwrap_err();
    let app = app_error(&err);

    match &app {
        AppError::Network(NetworkError::ServerError { status, .. }) => assert_eq!(*status, 503),
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(
        app.user_message(),
        "The weather service is experiencing issues. Please try again later."
    );
    assert!(retry_message(&err).starts_with("Network request failed: "));
}

#[tokio::test]
async fn test_client_error_status_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let err = fetch_from(&mock_server, None).await.unwrap_err();
    let app = app_error(&err);

    assert!(matches!(
        app,
        AppError::Network(NetworkError::ServerError { status: 400, .. })
    ));
    assert_eq!(app.user_message(), "The request failed. Please try again.");
}

#[tokio::test]
async fn test_timeout_maps_to_network_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "hourly": { "time": [], "temperature_2m": [] }
                }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let err = fetch_from(&mock_server, Some(Duration::from_millis(50)))
        .await
        .unwrap_err();
    let app = app_error(&err);

    assert!(
        matches!(app, AppError::Network(NetworkError::Timeout)),
        "expected timeout, got {:?}",
        app
    );
    assert_eq!(app.user_message(), "The request timed out. Please try again.");
}
