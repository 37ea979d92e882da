//! Raw digitizer reading to panel pixel calibration
//!
//! The digitizer never reports the full 12-bit range. On the reference
//! panel a touch at the origin reads about 200 and the far corner about
//! 1800 on both axes, so each axis is clipped to that window, shifted to
//! zero and scaled to the panel resolution with truncating integer math.
//!
//! A result of 0 on either axis is later treated as "no touch". A real
//! touch on the very first pixel row or column also calibrates to 0; that
//! approximation is kept.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest raw reading the reference panel produces
pub const READING_MIN: u16 = 200;

/// Highest raw reading the reference panel produces
pub const READING_MAX: u16 = 1800;

/// Panel width in pixels (X axis)
pub const X_RESOLUTION: u16 = 240;

/// Panel height in pixels (Y axis)
pub const Y_RESOLUTION: u16 = 320;

/// Extract the 12-bit reading from a two-byte digitizer response
///
/// The response is big-endian with the value in the top 12 bits; the low
/// 4 bits are padding.
pub const fn raw_reading(response: [u8; 2]) -> u16 {
    u16::from_be_bytes(response) >> 4
}

/// Clip `reading` to `[min_reading, max_reading]` and scale it to
/// `0..=pixel_count`
///
/// Division truncates. A degenerate window (`max_reading <= min_reading`)
/// maps everything to 0.
pub fn sanitise_reading(reading: u16, pixel_count: u16, max_reading: u16, min_reading: u16) -> u16 {
    if max_reading <= min_reading {
        return 0;
    }

    let clipped = reading.clamp(min_reading, max_reading);
    let offset = u32::from(clipped - min_reading);
    let span = u32::from(max_reading - min_reading);

    // offset <= span, so the quotient never exceeds pixel_count
    (u32::from(pixel_count) * offset / span) as u16
}

/// Calibration window for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationWindow {
    /// Raw reading mapped to pixel 0
    pub reading_min: u16,
    /// Raw reading mapped to `pixel_count`
    pub reading_max: u16,
    /// Panel resolution along this axis
    pub pixel_count: u16,
}

impl CalibrationWindow {
    /// Create a window
    pub const fn new(reading_min: u16, reading_max: u16, pixel_count: u16) -> Self {
        Self {
            reading_min,
            reading_max,
            pixel_count,
        }
    }

    /// Reference X axis window (240 px)
    pub const fn reference_x() -> Self {
        Self::new(READING_MIN, READING_MAX, X_RESOLUTION)
    }

    /// Reference Y axis window (320 px)
    pub const fn reference_y() -> Self {
        Self::new(READING_MIN, READING_MAX, Y_RESOLUTION)
    }

    /// Convert a raw reading to a pixel coordinate
    pub fn sanitise(&self, reading: u16) -> u16 {
        sanitise_reading(reading, self.pixel_count, self.reading_max, self.reading_min)
    }

    /// Check whether `reading` falls outside the window and will be clipped
    pub fn clips(&self, reading: u16) -> bool {
        reading < self.reading_min || reading > self.reading_max
    }
}
