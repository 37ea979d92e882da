//! GPIO output abstraction
//!
//! The transport drivers only drive lines (chip-select, data/command
//! select, reset, backlight); they never sample a plain input.

/// Digital output line
///
/// Implementations write the hardware register directly. Setting a line is
/// treated as infallible, as it is on every supported chip.
pub trait OutputPin {
    /// Drive the line high (logic 1)
    fn set_high(&mut self);

    /// Drive the line low (logic 0)
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}
