//! One-shot alarm abstraction

/// Schedules a single deferred callback
///
/// The callback target is fixed by the implementation (typically a closure
/// or function registered with the hardware alarm pool). Scheduling again
/// before the previous alarm fired replaces it.
pub trait OneShotAlarm {
    /// Fire the registered callback once, `delay_ms` milliseconds from now
    fn schedule_once(&mut self, delay_ms: u32);
}
