//! Application services

pub mod forecast;
pub mod location_resolver;
pub mod weather_service;

pub use forecast::{
    build_current, build_daily, build_hourly, build_outlook, icon_asset, CurrentCard, DailyItem,
    OutlookItem, TimelineItem,
};
pub use location_resolver::LocationResolver;
pub use weather_service::{
    ForecastCounts, LocationView, RecentSummary, ViewRequest, WeatherService,
};
