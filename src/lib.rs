//! Rendering core for a battery-powered e-paper desk calendar.
//!
//! The device wakes a few times a day, composes a date/weather scene into a
//! packed 2-bit greyscale frame buffer, pushes it to a GDEW075T7 panel, and
//! goes back to deep sleep. This crate holds everything between "here is
//! today's data" and "the panel shows it":
//!
//! 1. draw a scene with [`layout::Calendar`] (or directly through the
//!    [`framebuffer::FrameBuffer`] primitives),
//! 1. then hand the buffer to [`gdew075t7::driver::Gdew075t7::refresh`],
//!    which sequences the panel's wake/transmit/refresh/sleep cycle.
//!
//! Wi-Fi provisioning, the configuration portal, NTP, and the weather
//! client live in the embedding firmware; they feed this crate plain data
//! ([`layout::LocalDate`], [`weather`] records, [`locale::Locale`],
//! [`config::DisplayPrefs`]) and pick the HAL types for the driver's
//! `embedded-hal` bounds.

pub mod color;
pub mod config;
pub mod font;
pub mod framebuffer;
pub mod gdew075t7;
pub mod image;
pub mod layout;
pub mod locale;
pub mod unicode;
pub mod weather;

#[cfg(feature = "graphics")]
mod graphics;

/// Useful exports
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::DisplayPrefs;
    pub use crate::font::{Font, Glyph};
    pub use crate::framebuffer::{Align, FrameBuffer, Rotation};
    pub use crate::gdew075t7::driver::Gdew075t7;
    pub use crate::image::Image;
    pub use crate::layout::{Calendar, LocalDate, Secondary, Theme};
}
