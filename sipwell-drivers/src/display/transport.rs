//! SPI display transport
//!
//! Carries controller commands and pixel payloads from the renderer to a
//! display controller on a 4-wire SPI bus (clock, data out, chip select,
//! data/command select). Commands and their parameters go out as 8-bit
//! frames; pixel payloads go out as 16-bit frames, one RGB565 pixel per
//! frame, so the controller receives each pixel high byte first.
//!
//! Pixel transfers hold the shared [`TransferFlag`] from the moment the bus
//! is claimed until the completion step, which runs after chip select is
//! released. The completion step clears the flag and then notifies the
//! renderer through [`FlushReady`] that the source buffer is free.

use embedded_hal::delay::DelayNs;
use sipwell_core::bus::TransferFlag;
use sipwell_core::config::DisplayConfig;
use sipwell_core::traits::{DisplaySink, FlushReady, TransferError};
use sipwell_hal::spi::{Mode, SpiConfig};
use sipwell_hal::{FrameFormat, FramedSpiBus, OutputPin, SpiBus};

use crate::line::Asserted;

/// Words staged per bus write
const WORD_CHUNK: usize = 32;

/// Bus setup for the display controller: mode 0 at the configured clock
pub const fn bus_config(config: &DisplayConfig) -> SpiConfig {
    SpiConfig::new(config.spi_frequency_hz, Mode::Mode0)
}

/// Display controller on SPI with a data/command select line
///
/// Both control lines are active-low: chip select low selects the
/// controller, data/command select low marks a command byte. Between
/// transfers chip select is high and data/command select idles in data
/// mode.
pub struct SpiDisplay<'a, SPI, DC, CS, F> {
    spi: SPI,
    dc: DC,
    cs: CS,
    flag: &'a TransferFlag,
    flush: F,
    config: DisplayConfig,
}

impl<'a, SPI, DC, CS, F> SpiDisplay<'a, SPI, DC, CS, F>
where
    SPI: FramedSpiBus,
    DC: OutputPin,
    CS: OutputPin,
    F: FlushReady,
{
    /// Create a new transport and put both control lines in their idle
    /// state
    pub fn new(
        spi: SPI,
        dc: DC,
        cs: CS,
        flag: &'a TransferFlag,
        flush: F,
        config: DisplayConfig,
    ) -> Self {
        let mut display = Self {
            spi,
            dc,
            cs,
            flag,
            flush,
            config,
        };
        display.cs.set_high();
        display.dc.set_high();
        display
    }

    /// Power up and hardware-reset the controller
    ///
    /// Turns the backlight on, holds reset low for `reset_pulse_ms`, then
    /// waits `reset_settle_ms` for the controller to come out of reset.
    pub fn init<RST, BL, D>(&mut self, reset: &mut RST, backlight: &mut BL, delay: &mut D)
    where
        RST: OutputPin,
        BL: OutputPin,
        D: DelayNs,
    {
        backlight.set_high();

        reset.set_low();
        delay.delay_ms(self.config.reset_pulse_ms);
        reset.set_high();
        delay.delay_ms(self.config.reset_settle_ms);

        self.dc.set_high();
        self.cs.set_high();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "display: {=u16}x{=u16} reset complete",
            self.config.width,
            self.config.height
        );
    }

    /// Check if a pixel transfer is in flight
    pub fn is_transfer_pending(&self) -> bool {
        self.flag.is_pending()
    }

    /// Transport configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Release the peripherals
    pub fn release(self) -> (SPI, DC, CS, F) {
        (self.spi, self.dc, self.cs, self.flush)
    }

    /// Command phase at 8 bits, then the payload as big-endian words
    ///
    /// A trailing odd byte cannot form a pixel and is not sent.
    fn stream(&mut self, cmd: &[u8], payload: &[u8]) -> Result<(), SPI::Error> {
        self.spi.set_frame_format(FrameFormat::Bits8)?;
        let _cs = Asserted::new(&mut self.cs);
        write_command(&mut self.spi, &mut self.dc, cmd)?;

        self.spi.set_frame_format(FrameFormat::Bits16)?;
        let mut words = [0u16; WORD_CHUNK];
        for chunk in payload.chunks(WORD_CHUNK * 2) {
            let mut count = 0;
            for (word, pair) in words.iter_mut().zip(chunk.chunks_exact(2)) {
                *word = u16::from_be_bytes([pair[0], pair[1]]);
                count += 1;
            }
            if count > 0 {
                self.spi.write_words(&words[..count])?;
            }
        }
        Ok(())
    }

    fn complete_transfer(&mut self) {
        self.flag.complete();
        self.flush.flush_ready();
    }
}

impl<SPI, DC, CS, F> DisplaySink for SpiDisplay<'_, SPI, DC, CS, F>
where
    SPI: FramedSpiBus,
    DC: OutputPin,
    CS: OutputPin,
    F: FlushReady,
{
    type Error = TransferError<SPI::Error>;

    fn send_command(&mut self, cmd: &[u8], params: Option<&[u8]>) -> Result<(), Self::Error> {
        if cmd.is_empty() {
            return Ok(());
        }

        // Never interleave with a pixel transfer
        self.flag.wait_idle(self.config.busy_wait)?;

        self.spi
            .set_frame_format(FrameFormat::Bits8)
            .map_err(TransferError::Bus)?;
        let _cs = Asserted::new(&mut self.cs);
        write_command(&mut self.spi, &mut self.dc, cmd).map_err(TransferError::Bus)?;

        match params {
            Some(params) if !params.is_empty() => {
                self.spi.write(params).map_err(TransferError::Bus)
            }
            _ => Ok(()),
        }
    }

    fn send_data(&mut self, cmd: &[u8], params: &[u8]) -> Result<(), Self::Error> {
        if cmd.is_empty() {
            return Ok(());
        }

        self.flag.begin(self.config.busy_wait)?;

        let sent = self.stream(cmd, params);
        // The payload buffer is no longer read, even after a bus error
        self.complete_transfer();

        if sent.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("display: pixel transfer failed");
        }

        sent.map_err(TransferError::Bus)
    }
}

/// Send command bytes with data/command select held in command mode
fn write_command<SPI, DC>(spi: &mut SPI, dc: &mut DC, cmd: &[u8]) -> Result<(), SPI::Error>
where
    SPI: SpiBus,
    DC: OutputPin,
{
    let _command = Asserted::new(dc);
    spi.write(cmd)
}
