use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::Sleet, // Freezing drizzle
            61 | 63 | 80 => Self::Rain,
            65 | 81 | 82 => Self::HeavyRain,
            66 | 67 => Self::Sleet, // Freezing rain
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Clear,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy Rain",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Thunderstorm => "Thunderstorm",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::PartlyCloudy => "cloud_sun",
            Self::Cloudy => "cloud",
            Self::Fog => "cloud_fog",
            Self::Drizzle | Self::Rain | Self::HeavyRain => "cloud_rain",
            Self::Snow | Self::Sleet => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
        }
    }
}

/// One hour of the forecast: a `YYYY-MM-DDTHH:MM` timestamp and a temperature in °C.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub time: String,
    pub temperature: f64,
}

impl ForecastPoint {
    /// Date prefix of the timestamp (everything before the `T`).
    ///
    /// A timestamp without a `T` is returned whole, so malformed values still
    /// land in a group of their own instead of being dropped.
    pub fn date(&self) -> &str {
        self.time
            .split_once('T')
            .map_or(self.time.as_str(), |(date, _)| date)
    }

    /// Hour of day, if the timestamp has a parseable `HH` after the `T`.
    pub fn hour(&self) -> Option<u32> {
        let (_, clock) = self.time.split_once('T')?;
        let hour = clock.split(':').next()?;
        hour.parse().ok().filter(|h| *h < 24)
    }
}

/// Raw `hourly` object as sent by Open-Meteo: index-aligned parallel arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Raw `daily` object. Only present when the request asked for daily variables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<i32>,
}

/// Decoded forecast payload. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub hourly: HourlySeries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailySeries>,
}

impl ForecastResponse {
    /// Hourly points in payload order.
    pub fn points(&self) -> impl Iterator<Item = ForecastPoint> + '_ {
        self.hourly
            .time
            .iter()
            .zip(self.hourly.temperature_2m.iter())
            .map(|(time, temperature)| ForecastPoint {
                time: time.clone(),
                temperature: *temperature,
            })
    }

    /// WMO condition reported for `date`, when the daily block carries one.
    pub fn condition_for(&self, date: &str) -> Option<WeatherCondition> {
        let daily = self.daily.as_ref()?;
        let index = daily.time.iter().position(|d| d == date)?;
        daily
            .weather_code
            .get(index)
            .copied()
            .map(WeatherCondition::from_wmo_code)
    }
}

/// Why a payload could not be turned into a [`ForecastResponse`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hourly arrays differ in length: {times} times, {temperatures} temperatures")]
    LengthMismatch { times: usize, temperatures: usize },
}

/// Fetch client errors. Every variant is terminal for the attempt that produced it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),
    #[error("Decode failure: {0}")]
    DecodeFailure(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: &str) -> ForecastPoint {
        ForecastPoint {
            time: time.to_string(),
            temperature: 0.0,
        }
    }

    #[test]
    fn test_wmo_code_clear() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
    }

    #[test]
    fn test_wmo_code_rain() {
        assert_eq!(WeatherCondition::from_wmo_code(61), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(63), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(80), WeatherCondition::Rain);
    }

    #[test]
    fn test_wmo_code_sleet() {
        assert_eq!(WeatherCondition::from_wmo_code(56), WeatherCondition::Sleet);
        assert_eq!(WeatherCondition::from_wmo_code(67), WeatherCondition::Sleet);
    }

    #[test]
    fn test_wmo_code_unknown_defaults_to_clear() {
        assert_eq!(WeatherCondition::from_wmo_code(999), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_wmo_code(-1), WeatherCondition::Clear);
    }

    #[test]
    fn test_condition_icon_name() {
        assert_eq!(WeatherCondition::Clear.icon_name(), "sun");
        assert_eq!(WeatherCondition::HeavyRain.icon_name(), "cloud_rain");
    }

    #[test]
    fn test_point_date_prefix() {
        assert_eq!(point("2024-11-25T13:00").date(), "2024-11-25");
        assert_eq!(point("garbage").date(), "garbage");
    }

    #[test]
    fn test_point_hour() {
        assert_eq!(point("2024-11-25T13:00").hour(), Some(13));
        assert_eq!(point("2024-11-25T00:00").hour(), Some(0));
        assert_eq!(point("2024-11-25").hour(), None);
        assert_eq!(point("2024-11-25T99:00").hour(), None);
    }

    #[test]
    fn test_points_are_index_aligned() {
        let response = ForecastResponse {
            hourly: HourlySeries {
                time: vec!["2024-11-25T00:00".into(), "2024-11-25T01:00".into()],
                temperature_2m: vec![-2.0, 3.0],
            },
            daily: None,
        };
        let points: Vec<_> = response.points().collect();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].time, "2024-11-25T01:00");
        assert_eq!(points[1].temperature, 3.0);
    }

    #[test]
    fn test_condition_for_date() {
        let response = ForecastResponse {
            hourly: HourlySeries::default(),
            daily: Some(DailySeries {
                time: vec!["2024-11-25".into(), "2024-11-26".into()],
                weather_code: vec![0, 71],
            }),
        };
        assert_eq!(response.condition_for("2024-11-26"), Some(WeatherCondition::Snow));
        assert_eq!(response.condition_for("2024-11-27"), None);
        assert_eq!(ForecastResponse::default().condition_for("2024-11-25"), None);
    }
}
