//! Edge interrupt line abstraction
//!
//! Embedded-hal has no interface for external interrupt control, so the
//! touch driver uses this one. All methods take `&self`: the same line is
//! touched from the interrupt handler (acknowledge, disarm) and from the
//! polled context (re-arm), and neither side may hold a `&mut` to it.
//! Implementations are expected to be single register writes.

/// Falling-edge interrupt line (e.g. the digitizer's active-low PENIRQ)
pub trait EdgeInterrupt {
    /// Acknowledge (clear) a latched edge event
    fn acknowledge(&self);

    /// Enable or disable edge interrupts on this line
    fn set_armed(&self, armed: bool);

    /// Check whether edge interrupts are currently enabled
    fn is_armed(&self) -> bool;
}

impl<T: EdgeInterrupt + ?Sized> EdgeInterrupt for &T {
    fn acknowledge(&self) {
        T::acknowledge(self)
    }

    fn set_armed(&self, armed: bool) {
        T::set_armed(self, armed)
    }

    fn is_armed(&self) -> bool {
        T::is_armed(self)
    }
}
