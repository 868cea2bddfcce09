//! Reference wiring for the calendar board.
//!
//! The driver itself is pin-agnostic; the embedding firmware maps these to
//! its HAL. These are the assignments used by the reference ESP32 build.

/// GPIO assignments for the GDEW075T7 display.
pub struct Pins;

#[allow(dead_code)]
impl Pins {
    /// Chip Select pin for the SPI display
    pub const CS: u8 = 15;
    /// Data/Command control pin (high for data, low for command)
    pub const DC: u8 = 4;
    /// Reset pin for the display
    pub const RST: u8 = 2;
    /// Busy status pin (low while the panel is busy)
    pub const BSY: u8 = 5;
    /// Panel power rail switch
    pub const PWR: u8 = 33;
    /// SPI clock pin
    pub const SCK: u8 = 14;
    /// SPI controller-out pin
    pub const COPI: u8 = 13;
}
