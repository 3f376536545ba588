//! Presentation-ready aggregates derived from the raw hourly arrays.
//!
//! Everything here is pure and recomputed on demand from the current
//! [`ForecastResponse`]; nothing is cached.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::{ForecastPoint, ForecastResponse};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mean temperature below which the day reads as "Cold".
pub const COLD_THRESHOLD: f64 = 10.0;

/// Temperature band used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconBand {
    /// Below 0°C
    BelowFreezing,
    /// [0, 20)
    Cool,
    /// [20, 30)
    Warm,
    /// 30°C and above
    Hot,
}

impl IconBand {
    pub fn from_temperature(celsius: f64) -> Self {
        if celsius < 0.0 {
            Self::BelowFreezing
        } else if celsius < 20.0 {
            Self::Cool
        } else if celsius < 30.0 {
            Self::Warm
        } else {
            Self::Hot
        }
    }

    pub fn icon_key(&self) -> &'static str {
        match self {
            Self::BelowFreezing => "snowflake",
            Self::Cool => "cloud_sleet",
            Self::Warm => "cloud_sun",
            Self::Hot => "sun",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BelowFreezing => "below 0°C",
            Self::Cool => "0-20°C",
            Self::Warm => "20-30°C",
            Self::Hot => "30°C and above",
        }
    }
}

/// One calendar day folded out of the hourly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: String,
    pub high: f64,
    pub low: f64,
    pub mean: f64,
    pub icon: IconBand,
}

impl DailyAggregate {
    fn from_temperatures(date: String, temperatures: &[f64]) -> Option<Self> {
        let stats = Stats::from_slice(temperatures)?;
        Some(Self {
            date,
            high: stats.high,
            low: stats.low,
            mean: stats.mean,
            icon: IconBand::from_temperature(stats.mean),
        })
    }
}

/// Today's mean, high and low.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TodaySummary {
    pub mean: f64,
    pub high: f64,
    pub low: f64,
}

/// One slot of the hourly strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourSlot {
    pub label: String,
    pub temperature: f64,
    pub icon: IconBand,
}

struct Stats {
    mean: f64,
    high: f64,
    low: f64,
}

impl Stats {
    fn from_slice(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let low = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { mean, high, low })
    }
}

/// Group hourly points by date prefix, ascending by calendar date.
///
/// Grouping is an exact match on the text before `T`. Prefixes that are not
/// `YYYY-MM-DD` still get a group; those sort after every valid date, in the
/// order they first appear.
pub fn group_by_day(response: &ForecastResponse) -> Vec<DailyAggregate> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();

    for point in response.points() {
        let date = point.date().to_string();
        groups
            .entry(date.clone())
            .or_insert_with(|| {
                order.push(date);
                Vec::new()
            })
            .push(point.temperature);
    }

    let mut days: Vec<DailyAggregate> = order
        .into_iter()
        .filter_map(|date| {
            let temperatures = groups.remove(&date)?;
            DailyAggregate::from_temperatures(date, &temperatures)
        })
        .collect();

    days.sort_by_key(|day| match NaiveDate::parse_from_str(&day.date, DATE_FORMAT) {
        Ok(date) => (false, Some(date)),
        Err(_) => (true, None),
    });

    days
}

/// Mean/high/low over the hours whose date prefix is `today`.
///
/// Returns `None` when no hour matches, so "no data" is never confused with 0°C.
pub fn today_aggregate(response: &ForecastResponse, today: NaiveDate) -> Option<TodaySummary> {
    let today = today.format(DATE_FORMAT).to_string();
    let temperatures: Vec<f64> = response
        .points()
        .filter(|p| p.date() == today)
        .map(|p| p.temperature)
        .collect();

    let stats = Stats::from_slice(&temperatures)?;
    Some(TodaySummary {
        mean: stats.mean,
        high: stats.high,
        low: stats.low,
    })
}

/// [`today_aggregate`] against the local wall clock.
pub fn today_aggregate_now(response: &ForecastResponse) -> Option<TodaySummary> {
    today_aggregate(response, Local::now().date_naive())
}

/// 12-hour label for `hour`, or "Now" when it is the current hour.
pub fn hour_label(hour: u32, current_hour: Option<u32>) -> String {
    if current_hour == Some(hour) {
        return "Now".to_string();
    }
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", display, suffix)
}

pub fn feel_label(mean: f64) -> &'static str {
    if mean < COLD_THRESHOLD {
        "Cold"
    } else {
        "Mild"
    }
}

/// The first `count` hours, labelled relative to `now`.
pub fn hourly_strip(response: &ForecastResponse, count: usize, now: NaiveDateTime) -> Vec<HourSlot> {
    let today = now.date().format(DATE_FORMAT).to_string();

    response
        .points()
        .take(count)
        .map(|point| {
            let current_hour = (point.date() == today).then(|| now.hour());
            HourSlot {
                label: slot_label(&point, current_hour),
                temperature: point.temperature,
                icon: IconBand::from_temperature(point.temperature),
            }
        })
        .collect()
}

fn slot_label(point: &ForecastPoint, current_hour: Option<u32>) -> String {
    match point.hour() {
        Some(hour) => hour_label(hour, current_hour),
        None => point.time.clone(),
    }
}
