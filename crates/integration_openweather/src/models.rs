//! Raw OpenWeatherMap response shapes
//!
//! Mirrors the provider's JSON as closely as serde allows, then converts
//! into the normalized payloads the application layer consumes. The
//! embedded `cod` status field is an integer on the current-weather
//! endpoint and a string on the forecast endpoints, so it gets its own
//! untagged type.

use application::ports::{
    BlockEntry, CurrentConditions, DailyEntry, DailyForecast, ForecastBlocks, GeocodeMatch,
    HourlyEntry, HourlyForecast,
};
use serde::Deserialize;

/// Provider-embedded status code, `200` or `"200"` on success
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProviderStatus {
    Number(i64),
    Text(String),
}

impl ProviderStatus {
    /// Whether the payload reports success
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Number(n) => *n == 200,
            Self::Text(s) => s == "200",
        }
    }
}

impl Default for ProviderStatus {
    fn default() -> Self {
        Self::Number(200)
    }
}

/// One entry of the `weather` condition array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionEntry {
    /// Condition group, e.g. "Clouds"
    #[serde(default)]
    pub main: String,
    /// Lowercase description, e.g. "scattered clouds"
    #[serde(default)]
    pub description: String,
    /// Icon code, e.g. "03d"
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Clouds {
    /// Cloud cover percent
    #[serde(default)]
    pub all: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rain {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

/// `/data/2.5/weather` response
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    #[serde(default)]
    pub cod: ProviderStatus,
    pub dt: i64,
    /// UTC offset in seconds
    pub timezone: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    pub main: MainReadings,
    pub visibility: Option<f64>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Clouds,
    pub rain: Option<Rain>,
}

impl CurrentResponse {
    /// Normalize into the application payload
    #[must_use]
    pub fn into_conditions(self) -> CurrentConditions {
        let condition = self.weather.into_iter().next().unwrap_or_default();
        CurrentConditions {
            dt: self.dt,
            timezone_offset: self.timezone,
            place_name: self.name,
            temp: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            description: condition.description,
            icon: condition.icon,
            wind_speed: self.wind.speed,
            humidity: self.main.humidity,
            cloud_cover: self.clouds.all,
            visibility_m: self.visibility,
            rain_1h: self.rain.and_then(|r| r.one_hour),
        }
    }
}

/// `city` envelope shared by the forecast endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct CityInfo {
    #[serde(default)]
    pub name: String,
    /// UTC offset in seconds
    pub timezone: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyItem {
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

/// `/data/2.5/forecast/hourly` response
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyResponse {
    #[serde(default)]
    pub cod: ProviderStatus,
    pub city: CityInfo,
    pub list: Vec<HourlyItem>,
}

impl HourlyResponse {
    #[must_use]
    pub fn into_forecast(self) -> HourlyForecast {
        let timezone_offset = self.city.timezone;
        let hours = self
            .list
            .into_iter()
            .map(|item| {
                let condition = item.weather.into_iter().next().unwrap_or_default();
                HourlyEntry {
                    dt: item.dt,
                    feels_like: item.main.feels_like,
                    icon: condition.icon,
                }
            })
            .collect();
        HourlyForecast {
            timezone_offset,
            hours,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyTemp {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyItem {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: DailyTemp,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

/// `/data/2.5/forecast/daily` response
#[derive(Debug, Clone, Deserialize)]
pub struct DailyResponse {
    #[serde(default)]
    pub cod: ProviderStatus,
    pub city: CityInfo,
    pub list: Vec<DailyItem>,
}

impl DailyResponse {
    #[must_use]
    pub fn into_forecast(self) -> DailyForecast {
        let timezone_offset = self.city.timezone;
        let days = self
            .list
            .into_iter()
            .map(|item| {
                let condition = item.weather.into_iter().next().unwrap_or_default();
                DailyEntry {
                    dt: item.dt,
                    sunrise: item.sunrise,
                    sunset: item.sunset,
                    temp_min: item.temp.min,
                    temp_max: item.temp.max,
                    icon: condition.icon,
                    description: condition.main,
                }
            })
            .collect();
        DailyForecast {
            timezone_offset,
            days,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockItem {
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

/// `/data/2.5/forecast` response (3-hour blocks)
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    #[serde(default)]
    pub cod: ProviderStatus,
    pub city: CityInfo,
    pub list: Vec<BlockItem>,
}

impl BlockResponse {
    #[must_use]
    pub fn into_blocks(self) -> ForecastBlocks {
        let timezone_offset = self.city.timezone;
        let blocks = self
            .list
            .into_iter()
            .map(|item| {
                let condition = item.weather.into_iter().next().unwrap_or_default();
                BlockEntry {
                    dt: item.dt,
                    temp: item.main.temp,
                    icon: condition.icon,
                }
            })
            .collect();
        ForecastBlocks {
            timezone_offset,
            blocks,
        }
    }
}

/// `/geo/1.0/direct` and `/geo/1.0/reverse` entry
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl From<GeocodeEntry> for GeocodeMatch {
    fn from(entry: GeocodeEntry) -> Self {
        Self {
            name: entry.name,
            lat: entry.lat,
            lon: entry.lon,
            country: entry.country,
            state: entry.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_number_and_text_both_succeed() {
        assert!(ProviderStatus::Number(200).is_success());
        assert!(ProviderStatus::Text("200".to_string()).is_success());
        assert!(!ProviderStatus::Number(404).is_success());
        assert!(!ProviderStatus::Text("404".to_string()).is_success());
    }

    #[test]
    fn status_deserializes_from_both_shapes() {
        let n: ProviderStatus = serde_json::from_str("200").unwrap();
        let s: ProviderStatus = serde_json::from_str("\"200\"").unwrap();
        assert!(n.is_success());
        assert!(s.is_success());
    }

    #[test]
    fn current_response_parses_and_converts() {
        let json = r#"{
            "coord": {"lon": -0.13, "lat": 51.51},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
            "main": {"temp": 8.2, "feels_like": 5.9, "temp_min": 6.7, "temp_max": 9.4, "pressure": 1012, "humidity": 81},
            "visibility": 10000,
            "wind": {"speed": 4.6, "deg": 250},
            "clouds": {"all": 75},
            "rain": {"1h": 0.4},
            "dt": 1702450800,
            "timezone": 0,
            "name": "London",
            "cod": 200
        }"#;
        let response: CurrentResponse = serde_json::from_str(json).unwrap();
        assert!(response.cod.is_success());

        let conditions = response.into_conditions();
        assert_eq!(conditions.place_name, "London");
        assert_eq!(conditions.icon, "04d");
        assert_eq!(conditions.description, "broken clouds");
        assert_eq!(conditions.humidity, 81);
        assert_eq!(conditions.cloud_cover, 75);
        assert_eq!(conditions.visibility_m, Some(10000.0));
        assert_eq!(conditions.rain_1h, Some(0.4));
    }

    #[test]
    fn current_response_without_rain_or_visibility() {
        let json = r#"{
            "weather": [{"main": "Clear", "description": "clear sky", "icon": "01n"}],
            "main": {"temp": -2.0, "feels_like": -6.3, "temp_min": -3.1, "temp_max": -1.2, "humidity": 60},
            "dt": 1702450800,
            "timezone": 3600,
            "name": "Oslo",
            "cod": 200
        }"#;
        let conditions: CurrentConditions =
            serde_json::from_str::<CurrentResponse>(json).unwrap().into_conditions();
        assert!(conditions.visibility_m.is_none());
        assert!(conditions.rain_1h.is_none());
        assert!((conditions.wind_speed - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hourly_response_converts_in_order() {
        let json = r#"{
            "cod": "200",
            "city": {"name": "Berlin", "timezone": 7200},
            "list": [
                {"dt": 1702450800, "main": {"temp": 11.0, "feels_like": 9.6}, "weather": [{"icon": "02d"}]},
                {"dt": 1702454400, "main": {"temp": 12.0, "feels_like": 10.8}, "weather": [{"icon": "03d"}]}
            ]
        }"#;
        let forecast = serde_json::from_str::<HourlyResponse>(json).unwrap().into_forecast();
        assert_eq!(forecast.timezone_offset, 7200);
        assert_eq!(forecast.hours.len(), 2);
        assert_eq!(forecast.hours[0].icon, "02d");
        assert_eq!(forecast.hours[1].dt, 1_702_454_400);
    }

    #[test]
    fn daily_response_carries_sun_events_and_group() {
        let json = r#"{
            "cod": "200",
            "city": {"timezone": 7200},
            "list": [
                {"dt": 1702450800, "sunrise": 1702447320, "sunset": 1702480980,
                 "temp": {"min": 4.1, "max": 9.8},
                 "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}]}
            ]
        }"#;
        let forecast = serde_json::from_str::<DailyResponse>(json).unwrap().into_forecast();
        let day = &forecast.days[0];
        assert_eq!(day.sunrise, 1_702_447_320);
        assert_eq!(day.sunset, 1_702_480_980);
        assert_eq!(day.description, "Rain");
        assert_eq!(day.icon, "10d");
    }

    #[test]
    fn block_response_converts() {
        let json = r#"{
            "cod": "200",
            "city": {"timezone": -18000},
            "list": [
                {"dt": 1702450800, "main": {"temp": 3.0, "feels_like": 0.1}, "weather": [{"icon": "13d"}]}
            ]
        }"#;
        let blocks = serde_json::from_str::<BlockResponse>(json).unwrap().into_blocks();
        assert_eq!(blocks.timezone_offset, -18000);
        assert!((blocks.blocks[0].temp - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_weather_array_falls_back_to_empty_strings() {
        let json = r#"{
            "main": {"temp": 1.0, "feels_like": 1.0},
            "dt": 1702450800,
            "timezone": 0,
            "cod": 200
        }"#;
        let conditions = serde_json::from_str::<CurrentResponse>(json).unwrap().into_conditions();
        assert!(conditions.icon.is_empty());
        assert!(conditions.description.is_empty());
    }

    #[test]
    fn geocode_entry_converts_to_match() {
        let json = r#"[{"name": "London", "lat": 51.5073, "lon": -0.1277, "country": "GB", "state": "England"}]"#;
        let entries: Vec<GeocodeEntry> = serde_json::from_str(json).unwrap();
        let matched: GeocodeMatch = entries.into_iter().next().unwrap().into();
        assert_eq!(matched.name, "London");
        assert_eq!(matched.country.as_deref(), Some("GB"));
    }
}
