//! Board pin assignment
//!
//! The display and the digitizer sit on separate SPI instances, each with a
//! software-driven chip select, so the two drivers never contend for a
//! line. [`BoardPins::validate`] catches wiring tables that break that.

use heapless::FnvIndexSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pins of one SPI instance with a software chip select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiPins {
    /// Controller input (MISO)
    pub rx: u8,
    /// Chip select, driven as a GPIO
    pub cs: u8,
    /// Clock
    pub sck: u8,
    /// Controller output (MOSI)
    pub tx: u8,
}

/// Display controller lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayPins {
    /// Backlight enable
    pub backlight: u8,
    /// Data/command select (high = data)
    pub dcx: u8,
    /// Controller reset
    pub reset: u8,
    /// Display bus
    pub spi: SpiPins,
}

/// Digitizer lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchPins {
    /// Pen-down interrupt (falling edge)
    pub irq: u8,
    /// Digitizer bus
    pub spi: SpiPins,
}

/// Complete board wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardPins {
    /// Display on SPI0
    pub display: DisplayPins,
    /// Digitizer on SPI1
    pub touch: TouchPins,
}

/// Error validating a pin table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range
    InvalidPin(u8),
    /// Pin assigned twice
    Conflict(u8),
}

impl BoardPins {
    /// Reference board wiring
    pub const fn reference() -> Self {
        Self {
            display: DisplayPins {
                backlight: 2,
                dcx: 3,
                reset: 4,
                spi: SpiPins {
                    rx: 16,
                    cs: 17,
                    sck: 18,
                    tx: 19,
                },
            },
            touch: TouchPins {
                irq: 11,
                spi: SpiPins {
                    rx: 12,
                    cs: 13,
                    sck: 14,
                    tx: 15,
                },
            },
        }
    }

    /// Every pin number in the table
    pub const fn all(&self) -> [u8; 12] {
        let d = &self.display;
        let t = &self.touch;
        [
            d.backlight,
            d.dcx,
            d.reset,
            d.spi.rx,
            d.spi.cs,
            d.spi.sck,
            d.spi.tx,
            t.irq,
            t.spi.rx,
            t.spi.cs,
            t.spi.sck,
            t.spi.tx,
        ]
    }

    /// Check that every pin exists and none is used twice
    pub fn validate(&self) -> Result<(), PinError> {
        let mut allocated: FnvIndexSet<u8, 32> = FnvIndexSet::new();
        for pin in self.all() {
            if pin >= GPIO_COUNT {
                return Err(PinError::InvalidPin(pin));
            }
            match allocated.insert(pin) {
                Ok(true) => {}
                Ok(false) => return Err(PinError::Conflict(pin)),
                Err(_) => return Err(PinError::InvalidPin(pin)),
            }
        }
        Ok(())
    }
}

impl Default for BoardPins {
    fn default() -> Self {
        Self::reference()
    }
}
