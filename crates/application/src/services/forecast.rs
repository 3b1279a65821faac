//! Forecast assembly
//!
//! Pure functions that reshape raw provider payloads into the three display
//! structures: the current-conditions card, the merged hourly timeline with
//! sunrise/sunset markers, and the relative-day daily list.
//!
//! All local-time arithmetic uses the payload's own UTC-offset seconds: the
//! shifted instant is rendered as if it were UTC, which yields the location's
//! wall time without a timezone database.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use domain::UnitSystem;
use serde::{Deserialize, Serialize};

use crate::ports::{CurrentConditions, DailyForecast, ForecastBlocks, HourlyForecast};

/// Current-conditions card, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCard {
    /// Place name as reported by the provider
    pub place: String,
    /// Local wall-clock time at the location, `HH:MM`
    pub local_time: String,
    /// Temperature rounded to the nearest integer
    pub temp: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    pub feels_like: i64,
    /// Title-cased condition description
    pub description: String,
    /// Icon asset name (SVG)
    pub icon: String,
    /// Formatted wind speed with unit suffix
    pub wind: String,
    /// Relative humidity percent
    pub humidity: u8,
    /// Cloud cover percent
    pub cloud_cover: u8,
    /// Formatted rain volume over the last hour with unit suffix
    pub precipitation: String,
    /// Formatted visibility in whole kilometers
    pub visibility: String,
}

/// One entry of the merged hourly timeline
///
/// Within one produced sequence items are non-decreasing by `dt`; at most
/// one sunrise and one sunset appear per local calendar date, each placed
/// immediately before the first hour at or after the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineItem {
    Hour {
        /// Local time `HH:MM`
        time: String,
        /// Icon asset name (SVG)
        icon: String,
        /// Feels-like temperature rounded to the nearest integer
        feels_like: i64,
        /// Unix timestamp
        dt: i64,
    },
    Sunrise { time: String, dt: i64 },
    Sunset { time: String, dt: i64 },
}

impl TimelineItem {
    /// The item's Unix timestamp
    #[must_use]
    pub const fn dt(&self) -> i64 {
        match self {
            Self::Hour { dt, .. } | Self::Sunrise { dt, .. } | Self::Sunset { dt, .. } => *dt,
        }
    }
}

/// One entry of the daily list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyItem {
    /// "Today", "Tomorrow", or the full weekday name
    pub day: String,
    /// Icon asset name (SVG)
    pub icon: String,
    /// Title-cased condition description
    pub description: String,
    pub temp_max: i64,
    pub temp_min: i64,
    /// Unix timestamp
    pub dt: i64,
}

/// One entry of the short outlook on a recent-location summary card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlookItem {
    /// Local time `HH:MM`
    pub time: String,
    /// Icon asset name (SVG)
    pub icon: String,
    pub temp: i64,
}

/// Map a provider icon code to its SVG asset name
#[must_use]
pub fn icon_asset(code: &str) -> &'static str {
    match code {
        "01d" => "clear-day.svg",
        "01n" => "clear-night.svg",
        "02d" => "partly-cloudy-day.svg",
        "02n" => "partly-cloudy-night.svg",
        "03d" | "03n" => "cloudy.svg",
        "04d" | "04n" => "overcast.svg",
        "09d" | "09n" => "rain.svg",
        "10d" => "partly-cloudy-day-rain.svg",
        "10n" => "partly-cloudy-night-rain.svg",
        "11d" => "thunderstorms-day.svg",
        "11n" => "thunderstorms-night.svg",
        "13d" | "13n" => "snow.svg",
        "50d" | "50n" => "mist.svg",
        _ => "not-available.svg",
    }
}

/// Build the current-conditions card
#[must_use]
pub fn build_current(raw: &CurrentConditions, units: UnitSystem) -> CurrentCard {
    let wind = match units {
        // Provider reports m/s for metric; display km/h
        UnitSystem::Metric => format!("{:.1} km/h", raw.wind_speed * 3.6),
        // Provider already reports mph for imperial
        UnitSystem::Imperial => format!("{:.1} mph", raw.wind_speed),
    };
    let rain = raw.rain_1h.unwrap_or(0.0);
    let precipitation = match units {
        UnitSystem::Metric => format!("{rain:.1} mm"),
        UnitSystem::Imperial => format!("{rain:.1} in"),
    };
    let visibility_km = round(raw.visibility_m.unwrap_or(0.0) / 1000.0);

    CurrentCard {
        place: raw.place_name.clone(),
        local_time: local_hhmm(raw.dt, raw.timezone_offset),
        temp: round(raw.temp),
        temp_min: round(raw.temp_min),
        temp_max: round(raw.temp_max),
        feels_like: round(raw.feels_like),
        description: title_case(&raw.description),
        icon: icon_asset(&raw.icon).to_string(),
        wind,
        humidity: raw.humidity,
        cloud_cover: raw.cloud_cover,
        precipitation,
        visibility: format!("{visibility_km} km"),
    }
}

/// Build the merged hourly timeline
///
/// Walks the hourly records in provider order (assumed chronological, never
/// re-sorted). When a daily payload is supplied, its sunrise/sunset epochs
/// are keyed by local calendar date; each marker is inserted once, right
/// before the first hour whose epoch is at or after the event, and only if
/// the event does not precede the first hour of the series.
#[must_use]
pub fn build_hourly(hourly: &HourlyForecast, daily: Option<&DailyForecast>) -> Vec<TimelineItem> {
    let offset = hourly.timezone_offset;

    let mut events: HashMap<NaiveDate, (i64, i64)> = HashMap::new();
    if let Some(daily) = daily {
        for day in &daily.days {
            events.insert(local_date(day.dt, offset), (day.sunrise, day.sunset));
        }
    }

    let Some(first) = hourly.hours.first() else {
        return Vec::new();
    };
    let window_start = first.dt;

    let mut sunrise_done: HashSet<NaiveDate> = HashSet::new();
    let mut sunset_done: HashSet<NaiveDate> = HashSet::new();
    let mut items = Vec::with_capacity(hourly.hours.len() + 4);

    for hour in &hourly.hours {
        let date = local_date(hour.dt, offset);
        if let Some(&(sunrise, sunset)) = events.get(&date) {
            if !sunrise_done.contains(&date) && hour.dt >= sunrise && sunrise >= window_start {
                items.push(TimelineItem::Sunrise {
                    time: local_hhmm(sunrise, offset),
                    dt: sunrise,
                });
                sunrise_done.insert(date);
            }
            if !sunset_done.contains(&date) && hour.dt >= sunset && sunset >= window_start {
                items.push(TimelineItem::Sunset {
                    time: local_hhmm(sunset, offset),
                    dt: sunset,
                });
                sunset_done.insert(date);
            }
        }
        items.push(TimelineItem::Hour {
            time: local_hhmm(hour.dt, offset),
            icon: icon_asset(&hour.icon).to_string(),
            feels_like: round(hour.feels_like),
            dt: hour.dt,
        });
    }

    items
}

/// Build the daily list with relative day labels
///
/// `now` anchors "today" and is computed in the location's local calendar
/// via the payload's UTC offset.
#[must_use]
pub fn build_daily(daily: &DailyForecast, now: DateTime<Utc>) -> Vec<DailyItem> {
    let offset = daily.timezone_offset;
    let today = local_date(now.timestamp(), offset);

    daily
        .days
        .iter()
        .map(|day| {
            let date = local_date(day.dt, offset);
            let label = match (date - today).num_days() {
                0 => "Today".to_string(),
                1 => "Tomorrow".to_string(),
                _ => date.format("%A").to_string(),
            };
            DailyItem {
                day: label,
                icon: icon_asset(&day.icon).to_string(),
                description: title_case(&day.description),
                temp_max: round(day.temp_max),
                temp_min: round(day.temp_min),
                dt: day.dt,
            }
        })
        .collect()
}

/// Build the short outlook for a recent-location summary card
#[must_use]
pub fn build_outlook(blocks: &ForecastBlocks) -> Vec<OutlookItem> {
    blocks
        .blocks
        .iter()
        .map(|block| OutlookItem {
            time: local_hhmm(block.dt, blocks.timezone_offset),
            icon: icon_asset(&block.icon).to_string(),
            temp: round(block.temp),
        })
        .collect()
}

/// Local wall time for an epoch: shift by the UTC offset, render as UTC
fn shifted_local(epoch: i64, offset_secs: i32) -> NaiveDateTime {
    DateTime::<Utc>::from_timestamp(epoch + i64::from(offset_secs), 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}

fn local_date(epoch: i64, offset_secs: i32) -> NaiveDate {
    shifted_local(epoch, offset_secs).date()
}

fn local_hhmm(epoch: i64, offset_secs: i32) -> String {
    shifted_local(epoch, offset_secs).format("%H:%M").to_string()
}

/// Round to the nearest integer, half away from zero
#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Capitalize the first letter of every word ("clear sky" -> "Clear Sky")
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
