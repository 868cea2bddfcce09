//! Calendar scene compositor.
//!
//! Thin orchestration over the frame buffer: fixed layout coordinates, the
//! date header, the month progress bar, and either the chamber icon grid or
//! a weather forecast row. All assets arrive through a [`Theme`]; the
//! compositor never owns image data.

use crate::color::Color;
use crate::config::{DisplayPrefs, WeatherSecondaryDisplayType};
use crate::font::Font;
use crate::framebuffer::{Align, FrameBuffer, Rotation};
use crate::gdew075t7::driver::Gdew075t7;
use crate::image::Image;
use crate::locale::Locale;
use crate::weather::{DailyWeather, WeatherCondition, WeatherEntry};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

// Layout column, in the rotated (portrait) coordinate space
const LEFT: i32 = 110;
const RIGHT: i32 = 470;
const COLUMN_WIDTH: i32 = RIGHT - LEFT;
const ICON_SIZE: i32 = 64;
const ICON_SPACING: i32 = 9;
const ICON_GRID_TOP: i32 = 550;

/// A broken-down local date, as produced by the timekeeping collaborator.
#[derive(Debug, Clone, Copy)]
pub struct LocalDate {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub mday: u8,
    /// Day of week, 0 = Sunday
    pub wday: u8,
}

/// An on/off pair for one chamber icon slot.
#[derive(Debug, Clone, Copy)]
pub struct IconPair<'a> {
    pub on: Image<'a>,
    pub off: Image<'a>,
}

/// Weather condition icons, day and night variants where the sky matters.
#[derive(Debug, Clone, Copy)]
pub struct WeatherIcons<'a> {
    pub clear_day: Image<'a>,
    pub clear_night: Image<'a>,
    pub partly_cloudy_day: Image<'a>,
    pub partly_cloudy_night: Image<'a>,
    pub cloudy: Image<'a>,
    pub fog: Image<'a>,
    pub scattered_showers_day: Image<'a>,
    pub scattered_showers_night: Image<'a>,
    pub showers: Image<'a>,
    pub thunderstorm: Image<'a>,
    pub freezing_rain: Image<'a>,
    pub snow: Image<'a>,
    pub unknown: Image<'a>,
}

impl<'a> WeatherIcons<'a> {
    /// Pure lookup from a condition and day/night flag to its icon.
    pub fn for_condition(&self, condition: WeatherCondition, daylight: bool) -> Image<'a> {
        match (condition, daylight) {
            (WeatherCondition::Clear, true) => self.clear_day,
            (WeatherCondition::Clear, false) => self.clear_night,
            (WeatherCondition::FewClouds | WeatherCondition::ScatteredClouds, true) => {
                self.partly_cloudy_day
            }
            (WeatherCondition::FewClouds | WeatherCondition::ScatteredClouds, false) => {
                self.partly_cloudy_night
            }
            (WeatherCondition::BrokenClouds | WeatherCondition::OvercastClouds, _) => self.cloudy,
            (WeatherCondition::Fog, _) => self.fog,
            (WeatherCondition::ScatteredShowers, true) => self.scattered_showers_day,
            (WeatherCondition::ScatteredShowers, false) => self.scattered_showers_night,
            (WeatherCondition::Showers, _) => self.showers,
            (WeatherCondition::Thunderstorm, _) => self.thunderstorm,
            (WeatherCondition::FreezingRain, _) => self.freezing_rain,
            (WeatherCondition::Snow, _) => self.snow,
            (WeatherCondition::Unknown, _) => self.unknown,
        }
    }
}

/// All compiled-in assets one scene needs.
#[derive(Debug, Clone, Copy)]
pub struct Theme<'a> {
    pub small_font: Font<'a>,
    pub large_number_font: Font<'a>,
    pub logo: Image<'a>,
    pub progress_bar: Image<'a>,
    pub chamber_icons: [IconPair<'a>; 10],
    pub weather_icons: WeatherIcons<'a>,
}

/// What the area below the lower rule shows.
#[derive(Debug, Clone, Copy)]
pub enum Secondary<'a> {
    /// The classic two rows of chamber icons.
    ChamberIcons,
    /// Five daily summaries.
    FiveDayForecast(&'a [DailyWeather; 5]),
    /// Today's forecast in 3-hour slots.
    TodaysForecast(&'a [WeatherEntry; 5]),
}

/// Composes calendar scenes into a frame buffer.
pub struct Calendar<'a> {
    theme: Theme<'a>,
    locale: Locale<'a>,
    prefs: DisplayPrefs,
}

/// Days in a month, accounting for leap years.
pub fn days_in_month(month: u8, year: i32) -> u8 {
    match month {
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl<'a> Calendar<'a> {
    pub fn new(theme: Theme<'a>, locale: Locale<'a>, prefs: DisplayPrefs) -> Self {
        Calendar {
            theme,
            locale,
            prefs,
        }
    }

    /// Renders the full scene and pushes it to the panel.
    pub fn update<SPI, BSY, DC, RST, PWR, DELAY>(
        &self,
        frame: &mut FrameBuffer,
        display: &mut Gdew075t7<SPI, BSY, DC, RST, PWR, DELAY>,
        date: &LocalDate,
        secondary: Secondary<'_>,
    ) -> anyhow::Result<()>
    where
        SPI: SpiDevice,
        BSY: InputPin,
        DC: OutputPin,
        RST: OutputPin,
        PWR: OutputPin,
        DELAY: DelayNs,
    {
        self.render(frame, date, secondary);
        display
            .refresh(frame)
            .map_err(|e| anyhow::anyhow!("display refresh failed: {:?}", e))
    }

    /// Draws the calendar scene into the frame buffer.
    pub fn render(&self, frame: &mut FrameBuffer, date: &LocalDate, secondary: Secondary<'_>) {
        frame.set_rotation(Rotation::Rotate90);
        frame.set_alpha(Some(Color::White));
        frame.clear(Color::White);

        let days_in_month = days_in_month(date.month, date.year);

        // Static lines
        frame.draw_h_line(LEFT, 50, COLUMN_WIDTH, 2, Color::Black, Align::TOP_LEFT);
        frame.draw_h_line(LEFT, 430, COLUMN_WIDTH, 2, Color::Black, Align::TOP_LEFT);
        frame.draw_h_line(LEFT, 538, COLUMN_WIDTH, 2, Color::Black, Align::TOP_LEFT);

        frame.draw_image(self.theme.logo, LEFT, 740, Align::TOP_LEFT);

        // Big date
        let big_day = format!("{:02}", date.mday);
        frame.draw_text(&big_day, &self.theme.large_number_font, LEFT, 16, Align::TOP_LEFT, 10);

        // Small "XX/XX" date
        let small_day = format!("{:02}/{:02}", date.mday, days_in_month);
        frame.draw_text(&small_day, &self.theme.small_font, LEFT, 394, Align::TOP_LEFT, 0);

        if self.prefs.show_day {
            let day_name = self.locale.days[usize::from(date.wday.min(6))];
            frame.draw_text(day_name, &self.theme.small_font, RIGHT, 394, Align::TOP_RIGHT, 0);
        }

        if self.prefs.show_month {
            let month_name = self.locale.months[usize::from(date.month.clamp(1, 12)) - 1];
            frame.draw_text(month_name, &self.theme.small_font, LEFT, 14, Align::TOP_LEFT, 0);
        }

        if self.prefs.show_year {
            let year = date.year.to_string();
            frame.draw_text(&year, &self.theme.small_font, RIGHT, 14, Align::TOP_RIGHT, 0);
        }

        self.draw_progress_bar(frame, date.mday, days_in_month);

        match secondary {
            Secondary::ChamberIcons => self.draw_chamber_icons(frame, date),
            Secondary::FiveDayForecast(forecast) => self.draw_daily_forecast(frame, forecast),
            Secondary::TodaysForecast(entries) => self.draw_hourly_forecast(frame, entries),
        }
    }

    /// Centered error screen, drawn instead of a calendar scene.
    pub fn render_error(&self, frame: &mut FrameBuffer, message: &str) {
        frame.set_rotation(Rotation::Rotate90);
        frame.set_alpha(Some(Color::White));
        frame.clear(Color::White);
        let (x, y) = (frame.width() as i32 / 2, frame.height() as i32 / 2);
        let max_line = frame.width() - 80;
        frame.draw_multiline_text(
            message,
            &self.theme.small_font,
            x,
            y,
            max_line,
            Align::CENTER,
            0,
            0,
        );
    }

    /// How far through the month we are, shown as a partially-erased bar.
    fn draw_progress_bar(&self, frame: &mut FrameBuffer, mday: u8, days_in_month: u8) {
        let bar = self.theme.progress_bar;
        frame.draw_image(bar, LEFT, 438, Align::TOP_LEFT);
        let progress_width = i32::from(bar.width) * i32::from(mday) / i32::from(days_in_month.max(1));
        frame.fill_rect(
            LEFT + progress_width,
            438,
            i32::from(bar.width) - progress_width,
            i32::from(bar.height),
            Color::White,
            Align::TOP_LEFT,
        );
    }

    fn draw_chamber_icons(&self, frame: &mut FrameBuffer, date: &LocalDate) {
        for (slot, pair) in self.theme.chamber_icons.iter().enumerate() {
            let icon = if chamber_icon_on(date, slot as u32) {
                pair.on
            } else {
                pair.off
            };
            self.draw_icon(frame, icon, (slot % 5) as i32, (slot / 5) as i32);
        }
    }

    fn draw_icon(&self, frame: &mut FrameBuffer, icon: Image<'_>, x: i32, y: i32) {
        frame.draw_image(
            icon,
            LEFT + x * (ICON_SIZE + ICON_SPACING),
            ICON_GRID_TOP + y * (ICON_SIZE + ICON_SPACING),
            Align::TOP_LEFT,
        );
    }

    fn draw_daily_forecast(&self, frame: &mut FrameBuffer, forecast: &[DailyWeather; 5]) {
        for (i, day) in forecast.iter().enumerate() {
            let cx = self.forecast_column_center(i);
            let label = self.locale.day_abbreviations[usize::from(day.wday.max(0) as u8 % 7)];
            frame.draw_text(label, &self.theme.small_font, cx, 550, Align::TOP_CENTER, 0);

            let icon = self.theme.weather_icons.for_condition(day.condition, day.daylight);
            frame.draw_image(icon, cx, 586, Align::TOP_CENTER);

            let temps = format!("{}°/{}°", day.high_temp, day.low_temp);
            frame.draw_text(&temps, &self.theme.small_font, cx, 660, Align::TOP_CENTER, 0);
        }
    }

    fn draw_hourly_forecast(&self, frame: &mut FrameBuffer, entries: &[WeatherEntry; 5]) {
        for (i, entry) in entries.iter().enumerate() {
            let cx = self.forecast_column_center(i);
            let label = hour_label(entry.hour.clamp(0, 23) as u8, self.prefs.use_24h_time);
            frame.draw_text(&label, &self.theme.small_font, cx, 550, Align::TOP_CENTER, 0);

            let icon = self
                .theme
                .weather_icons
                .for_condition(entry.condition, entry.daylight);
            frame.draw_image(icon, cx, 586, Align::TOP_CENTER);

            let temp = format!("{}°", entry.temp);
            frame.draw_text(&temp, &self.theme.small_font, cx, 660, Align::TOP_CENTER, 0);

            let secondary = match self.prefs.weather_secondary {
                WeatherSecondaryDisplayType::ChanceOfPrecipitation => {
                    format!("{}%", entry.pop.max(0))
                }
                WeatherSecondaryDisplayType::Humidity => format!("{}%", entry.humidity.max(0)),
            };
            frame.draw_text(&secondary, &self.theme.small_font, cx, 694, Align::TOP_CENTER, 0);
        }
    }

    fn forecast_column_center(&self, column: usize) -> i32 {
        LEFT + column as i32 * (ICON_SIZE + ICON_SPACING) + ICON_SIZE / 2
    }
}

/// Deterministic on/off state for a chamber icon slot, mixed from the
/// date. Rendering the same day twice must produce identical frames so the
/// wakeup logic can skip redundant refreshes.
fn chamber_icon_on(date: &LocalDate, slot: u32) -> bool {
    let mut h = (date.year as u32)
        .wrapping_mul(31)
        .wrapping_add(u32::from(date.month))
        .wrapping_mul(31)
        .wrapping_add(u32::from(date.mday))
        .wrapping_mul(31)
        .wrapping_add(slot);
    h ^= h >> 16;
    h = h.wrapping_mul(0x45D9_F3B5);
    h ^= h >> 16;
    h & 1 == 0
}

/// Column label for a 3-hour forecast slot.
fn hour_label(hour: u8, use_24h_time: bool) -> String {
    if use_24h_time {
        format!("{:02}", hour)
    } else {
        match hour {
            0 => "12AM".to_string(),
            12 => "12PM".to_string(),
            h if h < 12 => format!("{}AM", h),
            h => format!("{}PM", h - 12),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::test_font::solid_font;
    use crate::gdew075t7::{NATIVE_HEIGHT, NATIVE_WIDTH};
    use crate::image::test_encoder::encode;

    fn solid_image(width: u16, height: u16) -> Image<'static> {
        let pixels = vec![Color::Black; usize::from(width) * usize::from(height)];
        Image {
            width,
            height,
            rle_bits: 8,
            data: Box::leak(encode(&pixels, 8).into_boxed_slice()),
        }
    }

    fn test_theme() -> Theme<'static> {
        let icon = || IconPair {
            on: solid_image(8, 8),
            off: solid_image(8, 8),
        };
        Theme {
            small_font: solid_font(
                &[('/', 3), ('0', 4), ('1', 4), ('2', 4), ('3', 4), ('4', 4)],
                8,
                2,
                4,
            ),
            large_number_font: solid_font(&[('0', 10), ('1', 10), ('7', 10)], 30, 5, 8),
            logo: solid_image(16, 8),
            progress_bar: solid_image(40, 8),
            chamber_icons: [
                icon(), icon(), icon(), icon(), icon(),
                icon(), icon(), icon(), icon(), icon(),
            ],
            weather_icons: WeatherIcons {
                clear_day: solid_image(8, 8),
                clear_night: solid_image(8, 8),
                partly_cloudy_day: solid_image(8, 8),
                partly_cloudy_night: solid_image(8, 8),
                cloudy: solid_image(8, 8),
                fog: solid_image(8, 8),
                scattered_showers_day: solid_image(8, 8),
                scattered_showers_night: solid_image(8, 8),
                showers: solid_image(8, 8),
                thunderstorm: solid_image(8, 8),
                freezing_rain: solid_image(8, 8),
                snow: solid_image(8, 8),
                unknown: solid_image(8, 8),
            },
        }
    }

    fn test_calendar() -> Calendar<'static> {
        Calendar::new(test_theme(), crate::locale::EN_US, DisplayPrefs::default())
    }

    fn date() -> LocalDate {
        LocalDate {
            year: 2026,
            month: 8,
            mday: 7,
            wday: 5,
        }
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2023), 28);
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(2, 2000), 29);
        assert_eq!(days_in_month(4, 2024), 30);
        assert_eq!(days_in_month(8, 2024), 31);
    }

    #[test]
    fn hour_labels_follow_the_clock_preference() {
        assert_eq!(hour_label(0, false), "12AM");
        assert_eq!(hour_label(9, false), "9AM");
        assert_eq!(hour_label(12, false), "12PM");
        assert_eq!(hour_label(15, false), "3PM");
        assert_eq!(hour_label(9, true), "09");
        assert_eq!(hour_label(15, true), "15");
    }

    #[test]
    fn chamber_icon_state_is_deterministic_and_varied() {
        let d = date();
        let mut on = 0;
        let mut off = 0;
        for mday in 1..=31 {
            let d = LocalDate { mday, ..d };
            for slot in 0..10 {
                let first = chamber_icon_on(&d, slot);
                assert_eq!(first, chamber_icon_on(&d, slot));
                if first {
                    on += 1;
                } else {
                    off += 1;
                }
            }
        }
        assert!(on > 0 && off > 0);
    }

    #[test]
    fn weather_icon_dispatch_honors_day_and_night() {
        let icons = test_theme().weather_icons;
        let day = icons.for_condition(WeatherCondition::Clear, true);
        let night = icons.for_condition(WeatherCondition::Clear, false);
        assert!(std::ptr::eq(day.data, icons.clear_day.data));
        assert!(std::ptr::eq(night.data, icons.clear_night.data));
        assert!(std::ptr::eq(
            icons.for_condition(WeatherCondition::OvercastClouds, true).data,
            icons.cloudy.data,
        ));
        assert!(std::ptr::eq(
            icons.for_condition(WeatherCondition::Snow, false).data,
            icons.snow.data,
        ));
    }

    #[test]
    fn render_draws_rules_logo_and_progress_bar() {
        let calendar = test_calendar();
        let mut frame = FrameBuffer::new(NATIVE_WIDTH, NATIVE_HEIGHT);
        calendar.render(&mut frame, &date(), Secondary::ChamberIcons);

        // The three horizontal rules
        for y in [50, 430, 538] {
            assert_eq!(frame.get_px(LEFT + 5, y), Color::Black, "rule at {y}");
            assert_eq!(frame.get_px(LEFT + 5, y + 2), Color::White);
        }
        // Logo
        assert_eq!(frame.get_px(LEFT, 740), Color::Black);
        // Big day number "07" starts at the column's left edge
        assert_eq!(frame.get_px(LEFT, 16), Color::Black);
        // Progress bar: 7/31 of 40px filled, the rest erased
        assert_eq!(frame.get_px(LEFT + 5, 440), Color::Black);
        assert_eq!(frame.get_px(LEFT + 20, 440), Color::White);
    }

    #[test]
    fn render_daily_forecast_populates_all_five_columns() {
        let calendar = test_calendar();
        let mut frame = FrameBuffer::new(NATIVE_WIDTH, NATIVE_HEIGHT);
        let day = DailyWeather {
            condition: WeatherCondition::Clear,
            high_temp: 23,
            low_temp: 14,
            daylight: true,
            month: 8,
            mday: 7,
            wday: 5,
        };
        calendar.render(&mut frame, &date(), Secondary::FiveDayForecast(&[day; 5]));

        for i in 0..5 {
            let cx = LEFT + i * (ICON_SIZE + ICON_SPACING) + ICON_SIZE / 2;
            assert_eq!(frame.get_px(cx, 588), Color::Black, "icon column {i}");
        }
    }

    #[test]
    fn render_hourly_forecast_draws_secondary_line() {
        let calendar = test_calendar();
        let mut frame = FrameBuffer::new(NATIVE_WIDTH, NATIVE_HEIGHT);
        let entry = WeatherEntry {
            condition: WeatherCondition::Showers,
            temp: 19,
            daylight: true,
            pop: 40,
            humidity: 70,
            hour: 9,
            ..Default::default()
        };
        calendar.render(&mut frame, &date(), Secondary::TodaysForecast(&[entry; 5]));

        let cx = LEFT + ICON_SIZE / 2;
        assert_eq!(frame.get_px(cx, 588), Color::Black);
        // "40%" below the temperature
        let mut secondary_row = false;
        for x in (cx - 20)..(cx + 20) {
            if frame.get_px(x, 695) == Color::Black {
                secondary_row = true;
            }
        }
        assert!(secondary_row);
    }

    #[test]
    fn error_screen_centers_its_message() {
        let calendar = test_calendar();
        let mut frame = FrameBuffer::new(NATIVE_WIDTH, NATIVE_HEIGHT);
        calendar.render_error(&mut frame, "404");

        let (cx, cy) = (frame.width() as i32 / 2, frame.height() as i32 / 2);
        let mut hit = false;
        for x in (cx - 30)..(cx + 30) {
            for y in (cy - 20)..(cy + 20) {
                if frame.get_px(x, y) == Color::Black {
                    hit = true;
                }
            }
        }
        assert!(hit);
    }
}
