//! Display controller configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bus::BusyWait;

/// Panel width in pixels
pub const LCD_H_RES: u16 = 240;

/// Panel height in pixels
pub const LCD_V_RES: u16 = 320;

/// Display SPI clock (SPI0 on the reference board)
pub const DISPLAY_SPI_HZ: u32 = 50_000_000;

/// Reset line held low for this long (datasheet minimum is 10 us)
pub const RESET_PULSE_MS: u32 = 100;

/// Wait after releasing reset (datasheet worst case is 120 ms)
pub const RESET_SETTLE_MS: u32 = 200;

/// Fraction of the frame covered by one partial-render buffer
pub const PARTIAL_BUFFER_DIVISOR: usize = 10;

/// Display transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Horizontal resolution
    pub width: u16,
    /// Vertical resolution
    pub height: u16,
    /// Bus clock
    pub spi_frequency_hz: u32,
    /// How long a transfer waits for a pending one
    pub busy_wait: BusyWait,
    /// Reset pulse length
    pub reset_pulse_ms: u32,
    /// Settle time after reset
    pub reset_settle_ms: u32,
}

impl DisplayConfig {
    /// Reference panel configuration
    pub const fn reference() -> Self {
        Self {
            width: LCD_H_RES,
            height: LCD_V_RES,
            spi_frequency_hz: DISPLAY_SPI_HZ,
            busy_wait: BusyWait::Spins(crate::bus::DEFAULT_BUSY_SPINS),
            reset_pulse_ms: RESET_PULSE_MS,
            reset_settle_ms: RESET_SETTLE_MS,
        }
    }

    /// Size in bytes of one partial-render buffer
    ///
    /// The renderer double-buffers, swapping on flush-ready; each buffer
    /// holds a tenth of the frame.
    pub const fn partial_buffer_len(&self, bytes_per_pixel: usize) -> usize {
        self.width as usize * self.height as usize * bytes_per_pixel / PARTIAL_BUFFER_DIVISOR
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::reference()
    }
}
