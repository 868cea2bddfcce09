//! Driver for the GDEW075T7 e-paper panel, the 800×480 7.5" B/W display
//! from Waveshare / Good Display: <https://www.good-display.com/product/244.html>
//!
//! The controller is UC8176-class; the LUT registers are documented in the
//! IL0373 datasheet rather than this panel's own. The driver supports
//! 4-level greyscale by loading custom waveform LUTs and transmitting the
//! frame as two 1-bit planes.
//!
//! ### Usage
//!
//! Draw a scene into a [`FrameBuffer`](crate::framebuffer::FrameBuffer) of
//! the panel's native resolution, then hand it to
//! [`driver::Gdew075t7::refresh`]. The driver wakes the panel, runs the
//! full refresh cycle, and puts it back into deep sleep; between scenes
//! [`driver::Gdew075t7::fast_clear`] blanks the screen without a greyscale
//! repaint.

pub mod driver;

mod cmd;
mod flag;
mod lut;

pub mod interface;
pub mod pins;

/// Panel width in pixels.
pub const NATIVE_WIDTH: u32 = 800;

/// Panel height in pixels.
pub const NATIVE_HEIGHT: u32 = 480;

pub use cmd::Cmd;
pub use flag::Flag;
