//! Free-running millisecond tick source
//!
//! The counter is incremented once per period by the SysTick exception and
//! read from anywhere. It wraps silently after 2^32 ticks (about 49.7 days
//! at 1 kHz); consumers compare ticks with [`elapsed_since`] so rollover is
//! harmless.
//!
//! [`elapsed_since`]: TickCounter::elapsed_since

use core::sync::atomic::Ordering;

use portable_atomic::AtomicU32;

/// Tick rate of the periodic interrupt
pub const TICK_HZ: u32 = 1_000;

/// Default RP2040 core clock
pub const CORE_CLOCK_HZ: u32 = 125_000_000;

/// Largest value the 24-bit SysTick reload register accepts
pub const SYSTICK_MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Monotonic tick counter
///
/// Single writer (the periodic interrupt), any number of readers. Reads are
/// one atomic load, so they never tear.
#[derive(Debug)]
pub struct TickCounter {
    count: AtomicU32,
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Advance the counter by one period
    ///
    /// Call exactly once from the periodic interrupt handler.
    pub fn on_tick(&self) {
        // fetch_add wraps on overflow
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Current tick count
    pub fn read(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Ticks elapsed since `earlier`, correct across one rollover
    pub fn elapsed_since(&self, earlier: u32) -> u32 {
        self.read().wrapping_sub(earlier)
    }
}

/// Process-wide tick counter driven by SysTick
pub static TICKS: TickCounter = TickCounter::new();

/// SysTick handler body
pub fn on_systick() {
    TICKS.on_tick();
}

/// Current process-wide tick count (milliseconds since [`configure`] at
/// the default rate)
pub fn read_tick_count() -> u32 {
    TICKS.read()
}

/// SysTick reload value for `tick_hz` interrupts from a `core_clock_hz` clock
///
/// Returns `None` when the rate is zero, faster than the core clock, or the
/// period does not fit the 24-bit reload register.
pub const fn systick_reload(core_clock_hz: u32, tick_hz: u32) -> Option<u32> {
    if tick_hz == 0 || core_clock_hz < tick_hz {
        return None;
    }
    let reload = core_clock_hz / tick_hz - 1;
    if reload > SYSTICK_MAX_RELOAD {
        None
    } else {
        Some(reload)
    }
}

/// Errors configuring the tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// Requested period cannot be produced from the core clock
    UnreachableRate,
}

/// Arm SysTick to fire at [`TICK_HZ`] from the processor clock
///
/// Enables the counter and its exception; the exception handler must call
/// [`on_systick`].
#[cfg(feature = "cortex-m")]
pub fn configure(syst: &mut cortex_m::peripheral::SYST, core_clock_hz: u32) -> Result<(), TickError> {
    use cortex_m::peripheral::syst::SystClkSource;

    let reload = systick_reload(core_clock_hz, TICK_HZ).ok_or(TickError::UnreachableRate)?;

    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(reload);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    #[cfg(feature = "defmt")]
    defmt::info!("SysTick armed: reload={=u32}", reload);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_each_tick() {
        let ticks = TickCounter::new();
        assert_eq!(ticks.read(), 0);

        for _ in 0..5 {
            ticks.on_tick();
        }
        assert_eq!(ticks.read(), 5);
    }

    #[test]
    fn test_wraps_silently() {
        let ticks = TickCounter {
            count: AtomicU32::new(u32::MAX),
        };
        ticks.on_tick();
        assert_eq!(ticks.read(), 0);
    }

    #[test]
    fn test_elapsed_across_rollover() {
        let ticks = TickCounter {
            count: AtomicU32::new(u32::MAX - 1),
        };
        let start = ticks.read();
        for _ in 0..4 {
            ticks.on_tick();
        }
        assert_eq!(ticks.read(), 2);
        assert_eq!(ticks.elapsed_since(start), 4);
    }

    #[test]
    fn test_global_counter_advances() {
        let before = read_tick_count();
        on_systick();
        // Other tests never touch TICKS, so the step is exact
        assert_eq!(read_tick_count().wrapping_sub(before), 1);
    }

    #[test]
    fn test_reload_for_rp2040() {
        assert_eq!(systick_reload(CORE_CLOCK_HZ, TICK_HZ), Some(124_999));
    }

    #[test]
    fn test_reload_rejects_unreachable_rates() {
        assert_eq!(systick_reload(CORE_CLOCK_HZ, 0), None);
        assert_eq!(systick_reload(1_000, 2_000), None);
        // 125 MHz / 1 Hz does not fit in 24 bits
        assert_eq!(systick_reload(CORE_CLOCK_HZ, 1), None);
    }
}
