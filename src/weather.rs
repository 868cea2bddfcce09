//! Weather records as handed over by the forecast collaborator.
//!
//! Fetching and parsing the OpenWeatherMap feed happens elsewhere; the
//! rendering core only sees resolved entries, either five daily summaries
//! or five 3-hour slots.

/// Weather conditions, ordered by severity. Merging picks the worse of two
/// conditions via `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum WeatherCondition {
    #[default]
    Unknown = 0,
    Clear,
    FewClouds,
    ScatteredClouds,
    BrokenClouds,
    OvercastClouds,
    Fog,
    ScatteredShowers,
    Showers,
    Thunderstorm,
    FreezingRain,
    Snow,
}

/// A single forecast entry from the 5-day/3-hour feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherEntry {
    pub condition: WeatherCondition,
    pub temp: i16,
    pub daylight: bool,
    pub clouds: i8,
    /// Probability of precipitation, percent.
    pub pop: i8,
    pub humidity: i8,
    pub month: i8,
    pub mday: i8,
    pub wday: i8,
    pub hour: i8,
    pub minute: i8,
}

/// Aggregated weather for an entire day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyWeather {
    pub condition: WeatherCondition,
    pub high_temp: i16,
    pub low_temp: i16,
    pub daylight: bool,
    pub month: i8,
    pub mday: i8,
    pub wday: i8,
}

impl DailyWeather {
    /// Folds one day's 3-hour entries into a summary: worst condition,
    /// temperature extremes, dated from the first entry. Daily summaries
    /// always use the daytime icon.
    pub fn aggregate(entries: &[WeatherEntry]) -> DailyWeather {
        let first = match entries.first() {
            Some(first) => first,
            None => return DailyWeather::default(),
        };

        let mut day = DailyWeather {
            condition: WeatherCondition::Unknown,
            high_temp: i16::MIN,
            low_temp: i16::MAX,
            daylight: true,
            month: first.month,
            mday: first.mday,
            wday: first.wday,
        };
        for entry in entries {
            day.condition = day.condition.max(entry.condition);
            day.high_temp = day.high_temp.max(entry.temp);
            day.low_temp = day.low_temp.min(entry.temp);
        }
        day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(condition: WeatherCondition, temp: i16) -> WeatherEntry {
        WeatherEntry {
            condition,
            temp,
            month: 8,
            mday: 7,
            wday: 5,
            ..Default::default()
        }
    }

    #[test]
    fn severity_ordering_matches_the_enum_order() {
        assert!(WeatherCondition::Clear < WeatherCondition::Fog);
        assert!(WeatherCondition::Thunderstorm < WeatherCondition::Snow);
        assert_eq!(
            WeatherCondition::Showers.max(WeatherCondition::FewClouds),
            WeatherCondition::Showers
        );
    }

    #[test]
    fn aggregate_takes_worst_condition_and_temperature_extremes() {
        let entries = [
            entry(WeatherCondition::Clear, 18),
            entry(WeatherCondition::Showers, 14),
            entry(WeatherCondition::FewClouds, 23),
        ];
        let day = DailyWeather::aggregate(&entries);
        assert_eq!(day.condition, WeatherCondition::Showers);
        assert_eq!(day.high_temp, 23);
        assert_eq!(day.low_temp, 14);
        assert!(day.daylight);
        assert_eq!((day.month, day.mday, day.wday), (8, 7, 5));
    }

    #[test]
    fn aggregate_of_nothing_is_unknown() {
        let day = DailyWeather::aggregate(&[]);
        assert_eq!(day.condition, WeatherCondition::Unknown);
    }
}
