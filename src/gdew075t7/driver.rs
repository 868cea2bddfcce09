//! GDEW075T7 panel driver.
//!
//! The panel is a state machine: asleep → awake with LUTs loaded →
//! transmitting pixels → refreshing (panel-internal) → asleep again. Every
//! public entry point walks the full cycle, because the panel draws real
//! current while awake and the calendar only refreshes a few times a day.
//!
//! Greyscale works by sending the frame twice: for each 8-pixel chunk the
//! two passes ([`Cmd::DTM1`], [`Cmd::DTM2`]) each derive one bit per pixel
//! through a fixed map, and the resulting old/new bit pair selects which of
//! the loaded waveform LUTs drives that pixel.

pub use display_interface::DisplayError;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

use crate::framebuffer::FrameBuffer;
use crate::gdew075t7::interface::DisplayInterface;
use crate::gdew075t7::{cmd::Cmd, flag::Flag, lut, NATIVE_HEIGHT, NATIVE_WIDTH};

/// Upper bound on any single busy wait. Non-fatal: expiry is logged and the
/// sequence continues.
const BUSY_TIMEOUT_MS: u32 = 5000;

/// Largest single SPI transfer during frame transmission.
const DATA_CHUNK_SIZE: usize = 4096;

/// Driver for the 800×480 GDEW075T7 e-paper panel.
///
/// ## Type parameters
///
/// - `SPI` - SPI device for communication (owns chip select)
/// - `BSY` - busy input pin (low while the panel is busy)
/// - `DC` - data/command output pin
/// - `RST` - reset output pin
/// - `PWR` - panel power rail output pin
/// - `DELAY` - delay provider for timing
pub struct Gdew075t7<SPI, BSY, DC, RST, PWR, DELAY> {
    /// The display interface
    pub interface: DisplayInterface<SPI, BSY, DC, RST, PWR, DELAY>,
}

impl<SPI, BSY, DC, RST, PWR, DELAY> Gdew075t7<SPI, BSY, DC, RST, PWR, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    PWR: OutputPin,
    DELAY: DelayNs,
{
    /// Creates the driver. The panel stays asleep until the first refresh.
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, pwr: PWR, delay: DELAY) -> Self {
        Gdew075t7 {
            interface: DisplayInterface::new(spi, busy, dc, rst, pwr, delay),
        }
    }

    /// Powers the panel up and runs the init register sequence.
    ///
    /// The register values are Waveshare's reference defaults for this
    /// panel; order and timing are part of the contract with the hardware.
    fn wakeup(&mut self) -> Result<(), DisplayError> {
        log::info!("Waking up the panel");
        self.interface.set_power(true)?;
        self.interface.reset()?;

        self.interface.cmd_with_data(
            Cmd::PWR,
            &[
                Flag::PWR_BD_VSR_VS_VG_EN,
                Flag::PWR_VCOM_SLEW_VGH20_VGL20,
                Flag::PWR_VDH_15V,
                Flag::PWR_VDL_NEG_15V,
                Flag::PWR_VDHR_5V8,
            ],
        )?;
        self.interface.cmd_with_data(Cmd::VDCS, &[Flag::VDCS_NEG_1V8])?;
        self.interface.cmd_with_data(
            Cmd::BTST,
            &[
                Flag::BTST_PHASE_A,
                Flag::BTST_PHASE_B,
                Flag::BTST_PHASE_C1,
                Flag::BTST_PHASE_C2,
            ],
        )?;
        self.interface.cmd_with_data(Cmd::PLL, &[Flag::PLL_150HZ])?;

        self.interface.cmd(Cmd::POWER_ON)?;
        self.interface.delay.delay_ms(100);
        self.interface.wait_until_idle(BUSY_TIMEOUT_MS);

        self.interface.cmd_with_data(Cmd::PSR, &[Flag::PSR_CUSTOM_LUT_KW])?;
        self.interface.cmd_with_data(
            Cmd::TRES,
            &[
                (NATIVE_WIDTH / 256) as u8,
                (NATIVE_WIDTH % 256) as u8,
                (NATIVE_HEIGHT / 256) as u8,
                (NATIVE_HEIGHT % 256) as u8,
            ],
        )?;
        self.interface.cmd_with_data(Cmd::DUAL_SPI, &[Flag::DUAL_SPI_DISABLED])?;
        self.interface.cmd_with_data(
            Cmd::VCOM_CDI,
            &[Flag::CDI_BDZ_BDV_N2OCP_DDX_OFF, Flag::CDI_INTERVAL_10],
        )?;
        self.interface.cmd_with_data(Cmd::TCON, &[Flag::TCON_S2G_G2S_DEFAULT])?;
        self.interface.cmd_with_data(Cmd::GSST, &[0x00, 0x00, 0x00, 0x00])?;
        Ok(())
    }

    fn set_lut(&mut self, cmd: u8, lut: &[u8; 42]) -> Result<(), DisplayError> {
        self.interface.cmd_with_data(cmd, lut)
    }

    /// Transmits a frame and runs a full greyscale refresh, then puts the
    /// panel back to sleep.
    pub fn refresh(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        self.wakeup()?;

        self.set_lut(Cmd::LUT_VCOM, &lut::LUT_VCOM_2BIT)?;
        self.set_lut(Cmd::LUT_WW, &lut::LUT_WHITE_2BIT)?;
        self.set_lut(Cmd::LUT_BW, &lut::LUT_DGREY_2BIT)?;
        self.set_lut(Cmd::LUT_WB, &lut::LUT_LGREY_2BIT)?;
        self.set_lut(Cmd::LUT_BB, &lut::LUT_BLACK_2BIT)?;
        self.set_lut(Cmd::LUT_BD, &lut::LUT_WHITE_2BIT)?;

        log::info!("Transmitting frame, {} bytes per plane", frame.len() / 2);
        self.interface.cmd(Cmd::DTM1)?;
        self.interface
            .data_chunked(&encode_plane(frame.data(), lut::LUT_DTM1), DATA_CHUNK_SIZE)?;
        self.interface.cmd(Cmd::DTM2)?;
        self.interface
            .data_chunked(&encode_plane(frame.data(), lut::LUT_DTM2), DATA_CHUNK_SIZE)?;

        self.interface.cmd(Cmd::REFRESH)?;
        self.interface.delay.delay_ms(100);
        self.interface.wait_until_idle(BUSY_TIMEOUT_MS);
        self.sleep()
    }

    /// Blanks the panel to solid white or black with the single-step
    /// clear waveform. Much faster than a greyscale refresh; used between
    /// logical sessions.
    pub fn fast_clear(&mut self, black: bool) -> Result<(), DisplayError> {
        self.wakeup()?;

        let fill = if black {
            &lut::LUT_BLACK_FAST_CLEAR
        } else {
            &lut::LUT_WHITE_FAST_CLEAR
        };
        self.set_lut(Cmd::LUT_VCOM, &lut::LUT_VCOM_FAST_CLEAR)?;
        self.set_lut(Cmd::LUT_WW, fill)?;
        self.set_lut(Cmd::LUT_BW, fill)?;
        self.set_lut(Cmd::LUT_WB, fill)?;
        self.set_lut(Cmd::LUT_BB, fill)?;
        self.set_lut(Cmd::LUT_BD, fill)?;

        self.interface.cmd(Cmd::REFRESH)?;
        self.interface.delay.delay_ms(100);
        self.interface.wait_until_idle(BUSY_TIMEOUT_MS);
        self.sleep()
    }

    /// Powers the panel down into deep sleep and cuts its power rail.
    pub fn sleep(&mut self) -> Result<(), DisplayError> {
        log::info!("Putting panel into deep sleep");
        self.interface.cmd(Cmd::POWER_OFF)?;
        self.interface.wait_until_idle(BUSY_TIMEOUT_MS);
        self.interface
            .cmd_with_data(Cmd::DEEP_SLEEP, &[Flag::DEEP_SLEEP_CHECK])?;
        self.interface.set_power(false)
    }
}

/// Derives one 1-bit-per-pixel transmission plane from the packed 2-bit
/// frame buffer. Every 16-bit chunk holds 8 pixels; each pixel's greyscale
/// value indexes `map` for its output bit.
fn encode_plane(data: &[u8], map: [u8; 4]) -> Vec<u8> {
    data.chunks_exact(2)
        .map(|pair| {
            let chunk = (u16::from(pair[0]) << 8) | u16::from(pair[1]);
            let mut output: u8 = 0;
            for j in 0..8 {
                output |= map[usize::from((chunk >> (j * 2)) & 0b11)] << j;
            }
            output
        })
        .collect()
}
