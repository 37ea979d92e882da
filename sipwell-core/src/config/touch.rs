//! Touch digitizer configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::touch::CalibrationWindow;

/// Delay before a valid touch is resampled
pub const DEBOUNCE_MS: u32 = 200;

/// Digitizer SPI clock (SPI1 on the reference board)
pub const TOUCH_SPI_HZ: u32 = 100_000;

/// Touch acquisition configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// X axis calibration
    pub x: CalibrationWindow,
    /// Y axis calibration
    pub y: CalibrationWindow,
    /// Resample interval while a touch is held
    pub debounce_ms: u32,
    /// Digitizer bus clock
    pub spi_frequency_hz: u32,
}

impl TouchConfig {
    /// Reference panel configuration
    pub const fn reference() -> Self {
        Self {
            x: CalibrationWindow::reference_x(),
            y: CalibrationWindow::reference_y(),
            debounce_ms: DEBOUNCE_MS,
            spi_frequency_hz: TOUCH_SPI_HZ,
        }
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::reference()
    }
}
