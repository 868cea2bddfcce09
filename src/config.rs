//! Display preferences.
//!
//! The configuration portal stores these alongside network settings; only
//! the display-facing subset reaches the rendering core.

/// What the forecast area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WeatherDisplayType {
    /// A 5-day forecast with daily highs and lows.
    FiveDayForecast = 1,
    /// Today's forecast in 3-hour intervals.
    TodaysForecast = 2,
}

/// The line shown under the temperature in 3-hour forecast mode. (The
/// 5-day mode already shows high and low, so there is nothing to choose.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WeatherSecondaryDisplayType {
    ChanceOfPrecipitation = 1,
    Humidity = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WeatherUnits {
    Metric = 1,
    Imperial = 2,
}

/// User-selectable display options.
#[derive(Debug, Clone, Copy)]
pub struct DisplayPrefs {
    /// Show the day name on the right side, next to the XX/XX day.
    pub show_day: bool,
    /// Show the month name at the top.
    pub show_month: bool,
    /// Show the year at the top.
    pub show_year: bool,
    /// Show the weather in place of the chamber icons.
    pub show_weather: bool,
    /// 24-hour time labels in the 3-hour forecast.
    pub use_24h_time: bool,
    pub weather_display: WeatherDisplayType,
    pub weather_secondary: WeatherSecondaryDisplayType,
    pub weather_units: WeatherUnits,
    /// First hour (0-23) of the 12-hour window shown in 3-hour mode.
    pub weather_start_hour: u8,
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        DisplayPrefs {
            show_day: true,
            show_month: true,
            show_year: false,
            show_weather: false,
            use_24h_time: false,
            weather_display: WeatherDisplayType::FiveDayForecast,
            weather_secondary: WeatherSecondaryDisplayType::ChanceOfPrecipitation,
            weather_units: WeatherUnits::Imperial,
            weather_start_hour: 9,
        }
    }
}
