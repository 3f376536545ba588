//! Forecast fetching and derived aggregates for Nimbus
//!
//! Fetches hourly temperatures from the Open-Meteo API and folds them into
//! the per-day and per-hour summaries the screens display.

pub mod aggregate;
pub mod client;
pub mod types;

pub use aggregate::{
    feel_label, group_by_day, hour_label, hourly_strip, today_aggregate, today_aggregate_now,
    DailyAggregate, HourSlot, IconBand, TodaySummary,
};
pub use client::{decode_forecast, ForecastClient, ForecastEndpoint, ForecastSource};
pub use types::*;
