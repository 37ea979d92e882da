//! Scoped control lines
//!
//! Chip-select and data/command select are active-low and must return to
//! their idle level on every exit path, including early returns on a bus
//! error. [`Asserted`] ties the active period to a scope.

use sipwell_hal::OutputPin;

/// An active-low line held asserted (low) until dropped
///
/// Used for chip-select (deasserted = bus released) and for the
/// data/command select line (deasserted = data mode, its idle level).
pub struct Asserted<'a, P: OutputPin> {
    pin: &'a mut P,
}

impl<'a, P: OutputPin> Asserted<'a, P> {
    /// Drive the line low for the lifetime of the guard
    pub fn new(pin: &'a mut P) -> Self {
        pin.set_low();
        Self { pin }
    }
}

impl<P: OutputPin> Drop for Asserted<'_, P> {
    fn drop(&mut self) {
        self.pin.set_high();
    }
}
