//! Touch input trait and point type

/// A touch sample as seen by the input layer
///
/// When `valid` is false the coordinates carry no meaning (after a release
/// they hold the last touched position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// A touch is present at (`x`, `y`)
    pub valid: bool,
    /// Panel column, 0 at the origin
    pub x: u16,
    /// Panel row, 0 at the origin
    pub y: u16,
}

impl TouchPoint {
    /// No touch
    pub const NONE: TouchPoint = TouchPoint {
        valid: false,
        x: 0,
        y: 0,
    };

    /// A valid touch at (`x`, `y`)
    pub const fn touched(x: u16, y: u16) -> Self {
        Self { valid: true, x, y }
    }
}

/// Source of touch points for the input layer
///
/// Polled once per application tick. Reads are consume-on-read: a touch is
/// returned once and then reads as invalid until the digitizer reports
/// again.
pub trait TouchInput {
    /// Take the most recent touch point
    fn get_touch_point(&self) -> TouchPoint;
}
