//! SPI bus abstractions
//!
//! Provides traits for blocking SPI master operations. Chip-select is not
//! part of the bus: the drivers drive it as a plain [`OutputPin`] so that a
//! single assertion can span several bus operations.
//!
//! [`OutputPin`]: crate::gpio::OutputPin

/// SPI bus master
///
/// All operations block until the last bit has been clocked out.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data, clocking out `fill` for every byte received
    fn read(&mut self, fill: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// Word width of a single SPI frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameFormat {
    /// 8-bit frames (command phase, register access)
    #[default]
    Bits8,
    /// 16-bit frames, MSB first (pixel data)
    Bits16,
}

impl FrameFormat {
    /// Number of bits per frame
    pub const fn bits(self) -> u8 {
        match self {
            FrameFormat::Bits8 => 8,
            FrameFormat::Bits16 => 16,
        }
    }
}

/// SPI bus whose frame width can be switched between transfers
///
/// The frame format is controller state that persists across calls. Drivers
/// must set it explicitly before every phase instead of relying on whatever
/// the previous transfer left behind.
pub trait FramedSpiBus: SpiBus {
    /// Select the frame width for subsequent transfers
    fn set_frame_format(&mut self, format: FrameFormat) -> Result<(), Self::Error>;

    /// Currently selected frame width
    fn frame_format(&self) -> FrameFormat;

    /// Write 16-bit words, each sent most-significant bit first
    ///
    /// Only valid while the bus is in [`FrameFormat::Bits16`].
    fn write_words(&mut self, words: &[u16]) -> Result<(), Self::Error>;
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl SpiConfig {
    /// Create a config for `frequency` Hz in the given mode
    pub const fn new(frequency: u32, mode: Mode) -> Self {
        let (polarity, phase) = mode.split();
        Self {
            frequency,
            polarity,
            phase,
        }
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::new(1_000_000, Mode::Mode0)
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Split into polarity and phase
    pub const fn split(self) -> (Polarity, Phase) {
        match self {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        mode.split()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_split() {
        assert_eq!(
            Mode::Mode0.split(),
            (Polarity::IdleLow, Phase::CaptureOnFirstTransition)
        );
        assert_eq!(
            Mode::Mode3.split(),
            (Polarity::IdleHigh, Phase::CaptureOnSecondTransition)
        );
    }

    #[test]
    fn test_config_from_mode() {
        let config = SpiConfig::new(50_000_000, Mode::Mode2);
        assert_eq!(config.frequency, 50_000_000);
        assert_eq!(config.polarity, Polarity::IdleHigh);
        assert_eq!(config.phase, Phase::CaptureOnFirstTransition);
    }

    #[test]
    fn test_frame_bits() {
        assert_eq!(FrameFormat::default(), FrameFormat::Bits8);
        assert_eq!(FrameFormat::Bits8.bits(), 8);
        assert_eq!(FrameFormat::Bits16.bits(), 16);
    }
}
