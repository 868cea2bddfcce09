//! SPI link and pin plumbing for the GDEW075T7 panel.

use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// Busy poll period. The panel holds BUSY low while it works.
const BUSY_POLL_MS: u32 = 5;
/// Settle time appended after every busy wait.
const BUSY_SETTLE_MS: u32 = 20;

/// Owns the SPI device and control pins for the display.
///
/// Chip select belongs to the `SpiDevice` implementation; the interface
/// drives data/command, reset, the busy input, and the panel's power rail.
pub struct DisplayInterface<SPI, BSY, DC, RST, PWR, DELAY> {
    /// SPI device
    spi: SPI,
    /// Low while the panel is applying a waveform
    busy: BSY,
    /// Data/Command control pin (high for data, low for command)
    dc: DC,
    /// Pin for resetting
    rst: RST,
    /// Switches the panel's power rail
    pwr: PWR,
    pub(crate) delay: DELAY,
}

impl<SPI, BSY, DC, RST, PWR, DELAY> DisplayInterface<SPI, BSY, DC, RST, PWR, DELAY>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    PWR: OutputPin,
    DELAY: DelayNs,
{
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, pwr: PWR, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            pwr,
            delay,
        }
    }

    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi.write(data).map_err(|_| DisplayError::BusWriteError)
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Sends a large data block in chunks, so a single transfer never
    /// exceeds what the SPI peripheral can queue and the watchdog gets a
    /// chance to run between chunks.
    pub(crate) fn data_chunked(&mut self, data: &[u8], chunk_size: usize) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        let total_chunks = data.len().div_ceil(chunk_size);
        for (chunk_idx, chunk) in data.chunks(chunk_size).enumerate() {
            if chunk_idx % 8 == 0 && total_chunks > 8 {
                log::debug!("Writing chunk {}/{}", chunk_idx + 1, total_chunks);
            }
            self.spi.write(chunk).map_err(|_| DisplayError::BusWriteError)?;
        }
        Ok(())
    }

    /// Switches the panel's power rail.
    pub(crate) fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        // The DisplayError enum has no dedicated variant for an auxiliary
        // power pin, so treat it like the reset line
        if on {
            self.pwr.set_high().map_err(|_| DisplayError::RSError)
        } else {
            self.pwr.set_low().map_err(|_| DisplayError::RSError)
        }
    }

    /// Pulses the reset pin with the vendor-mandated timing:
    /// 20 ms high, 4 ms low, 20 ms high.
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(20);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(4);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(20);
        Ok(())
    }

    /// Waits for the busy pin to release, polling every 5 ms up to
    /// `timeout_ms`. A timeout is logged and swallowed: the panel has no
    /// other acknowledgement channel, so the command sequence continues
    /// either way.
    pub(crate) fn wait_until_idle(&mut self, timeout_ms: u32) {
        let mut elapsed: u32 = 0;
        loop {
            self.delay.delay_ms(BUSY_POLL_MS);
            elapsed += BUSY_POLL_MS;
            match self.busy.is_high() {
                Ok(true) => break,
                Ok(false) => {
                    if elapsed >= timeout_ms {
                        log::warn!("Busy pin still low after {} ms, proceeding anyway", elapsed);
                        break;
                    }
                }
                Err(_) => {
                    log::error!("Error reading busy pin state, assuming not busy");
                    break;
                }
            }
        }
        self.delay.delay_ms(BUSY_SETTLE_MS);
    }
}
