//! View-state holder for the weather screen.
//!
//! Owns the latest fetch outcome and the loading flag. `refresh()` is the only
//! way to start a request; completions are applied through [`WeatherModel::apply`]
//! on the model's own context, and observers see every change through a
//! `watch` channel.

use std::sync::Arc;

use chrono::Local;
use nimbus_weather::{
    group_by_day, hourly_strip, today_aggregate_now, DailyAggregate, FetchError, ForecastResponse,
    ForecastSource, HourSlot, TodaySummary,
};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

use crate::error_mapping;
use crate::services::weather_service::{self, WeatherServiceMessage};

/// Snapshot the presentation layer renders from.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub is_loading: bool,
    pub data: Option<ForecastResponse>,
    pub error: Option<Arc<FetchError>>,
}

/// The branch of [`ViewState`] the screen should show.
#[derive(Debug, Clone, Copy)]
pub enum ActiveView<'a> {
    Loading,
    Error(&'a FetchError),
    Data(&'a ForecastResponse),
    Idle,
}

impl ViewState {
    /// Loading wins, then error (even over stale data), then data.
    pub fn active(&self) -> ActiveView<'_> {
        if self.is_loading {
            ActiveView::Loading
        } else if let Some(error) = &self.error {
            ActiveView::Error(error)
        } else if let Some(data) = &self.data {
            ActiveView::Data(data)
        } else {
            ActiveView::Idle
        }
    }
}

pub struct WeatherModel<S: ForecastSource> {
    source: S,
    runtime: Handle,
    state: ViewState,
    /// Token of the most recently issued request; older completions are stale.
    latest_token: u64,
    tx: mpsc::UnboundedSender<WeatherServiceMessage>,
    rx: mpsc::UnboundedReceiver<WeatherServiceMessage>,
    observers: watch::Sender<ViewState>,
}

impl<S: ForecastSource> WeatherModel<S> {
    pub fn new(source: S, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (observers, _) = watch::channel(ViewState::default());

        Self {
            source,
            runtime,
            state: ViewState::default(),
            latest_token: 0,
            tx,
            rx,
            observers,
        }
    }

    /// Start a new fetch. Safe to call while another is in flight; only the
    /// newest request's completion will be applied.
    pub fn refresh(&mut self) {
        self.latest_token += 1;
        let token = self.latest_token;

        self.state.is_loading = true;
        self.state.error = None;
        self.publish();

        tracing::debug!("Starting forecast request {}", token);
        let request = self.source.fetch();
        weather_service::request_fetch(&self.tx, &self.runtime, token, request);
    }

    /// Apply a completion. Returns `false` if it belonged to a superseded request.
    pub fn apply(&mut self, message: WeatherServiceMessage) -> bool {
        let WeatherServiceMessage::FetchDone { token, result } = message;

        if token != self.latest_token {
            tracing::debug!(
                "Discarding forecast request {} (latest is {})",
                token,
                self.latest_token
            );
            return false;
        }

        match result {
            Ok(data) => {
                tracing::info!("Weather data updated ({} hourly points)", data.hourly.len());
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(e) => {
                tracing::error!("Failed to fetch weather: {}", e);
                // Stale data is kept; the error branch takes display precedence.
                self.state.error = Some(Arc::new(e));
            }
        }
        self.state.is_loading = false;
        self.publish();
        true
    }

    /// Apply every completion that has already arrived, without waiting.
    /// Returns how many changed the state.
    pub fn process_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            if self.apply(message) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next completion and apply it.
    /// Returns `false` if it was stale.
    pub async fn next_message(&mut self) -> bool {
        match self.rx.recv().await {
            Some(message) => self.apply(message),
            // The model holds a sender, so the channel cannot close while it lives.
            None => false,
        }
    }

    /// Wait until the latest request has resolved.
    pub async fn settle(&mut self) {
        while self.state.is_loading {
            self.next_message().await;
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.observers.subscribe()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn data(&self) -> Option<&ForecastResponse> {
        self.state.data.as_ref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.state.error.as_deref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(error_mapping::retry_message)
    }

    /// Short, non-technical headline for the current error.
    pub fn user_message(&self) -> Option<&'static str> {
        self.error()
            .map(|e| error_mapping::app_error(e).user_message())
    }

    /// Per-day aggregates for the forecast list, empty without data.
    pub fn daily_forecast(&self) -> Vec<DailyAggregate> {
        self.data().map(group_by_day).unwrap_or_default()
    }

    /// Today's summary by the local clock; `None` without data or matching hours.
    pub fn today(&self) -> Option<TodaySummary> {
        self.data().and_then(today_aggregate_now)
    }

    pub fn hourly(&self, count: usize) -> Vec<HourSlot> {
        let now = Local::now().naive_local();
        self.data()
            .map(|data| hourly_strip(data, count, now))
            .unwrap_or_default()
    }

    fn publish(&self) {
        self.observers.send_replace(self.state.clone());
    }
}
