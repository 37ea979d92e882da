//! Bus arbiter
//!
//! The display SPI controller is not reentrant. A single "transfer in
//! flight" flag is shared between the blocking write path and the transfer
//! completion step; at most one transfer may be pending at a time and any
//! caller wanting the bus waits until the flag clears.
//!
//! Waiting is a busy-wait in the polled context. [`BusyWait::Unbounded`]
//! waits forever; the default gives up after a fixed number of polls and
//! reports [`BusBusy`].

use core::sync::atomic::Ordering;

use portable_atomic::AtomicBool;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Polls before a bounded wait reports [`BusBusy`]
pub const DEFAULT_BUSY_SPINS: u32 = 100_000;

/// How long to wait for a pending transfer to complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BusyWait {
    /// Spin until the flag clears, however long that takes
    Unbounded,
    /// Give up after this many polls
    Spins(u32),
}

impl Default for BusyWait {
    fn default() -> Self {
        BusyWait::Spins(DEFAULT_BUSY_SPINS)
    }
}

/// Another transfer was still pending when the wait gave up
///
/// Retryable: nothing was transmitted and no line was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusBusy;

/// The shared "transfer pending" flag
#[derive(Debug)]
pub struct TransferFlag {
    pending: AtomicBool,
}

impl Default for TransferFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferFlag {
    /// Create an idle flag
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Check if a transfer is in flight
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Claim the bus if it is idle
    ///
    /// Returns `true` if this call moved the flag from idle to pending.
    pub fn try_begin(&self) -> bool {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Wait for the bus to go idle, then claim it
    pub fn begin(&self, wait: BusyWait) -> Result<(), BusBusy> {
        spin_until(wait, || self.try_begin())
    }

    /// Wait for the bus to go idle without claiming it
    pub fn wait_idle(&self, wait: BusyWait) -> Result<(), BusBusy> {
        spin_until(wait, || !self.is_pending())
    }

    /// Mark the in-flight transfer complete
    ///
    /// Only the completion step of the transfer that claimed the flag may
    /// call this.
    pub fn complete(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

fn spin_until(wait: BusyWait, mut ready: impl FnMut() -> bool) -> Result<(), BusBusy> {
    match wait {
        BusyWait::Unbounded => {
            while !ready() {
                core::hint::spin_loop();
            }
            Ok(())
        }
        BusyWait::Spins(limit) => {
            // One extra attempt so Spins(0) still succeeds on an idle bus
            for _ in 0..limit {
                if ready() {
                    return Ok(());
                }
                core::hint::spin_loop();
            }
            if ready() {
                Ok(())
            } else {
                #[cfg(feature = "defmt")]
                defmt::warn!("bus still busy after {=u32} polls", limit);
                Err(BusBusy)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_complete() {
        let flag = TransferFlag::new();
        assert!(!flag.is_pending());

        assert!(flag.try_begin());
        assert!(flag.is_pending());

        // Second claim fails while pending
        assert!(!flag.try_begin());

        flag.complete();
        assert!(!flag.is_pending());
        assert!(flag.try_begin());
    }

    #[test]
    fn test_bounded_wait_reports_busy() {
        let flag = TransferFlag::new();
        assert!(flag.try_begin());

        assert_eq!(flag.wait_idle(BusyWait::Spins(10)), Err(BusBusy));
        assert_eq!(flag.begin(BusyWait::Spins(10)), Err(BusBusy));
        // Failed waits leave the flag as they found it
        assert!(flag.is_pending());
    }

    #[test]
    fn test_zero_spins_on_idle_bus() {
        let flag = TransferFlag::new();
        assert_eq!(flag.wait_idle(BusyWait::Spins(0)), Ok(()));
        assert_eq!(flag.begin(BusyWait::Spins(0)), Ok(()));
        assert!(flag.is_pending());
    }

    #[test]
    fn test_unbounded_wait_on_idle_bus() {
        let flag = TransferFlag::new();
        assert_eq!(flag.begin(BusyWait::Unbounded), Ok(()));
        flag.complete();
        assert_eq!(flag.wait_idle(BusyWait::Unbounded), Ok(()));
    }

    #[test]
    fn test_wait_succeeds_once_cleared() {
        let flag = TransferFlag::new();
        assert!(flag.try_begin());

        let mut polls = 0;
        let result = spin_until(BusyWait::Spins(100), || {
            polls += 1;
            if polls == 5 {
                flag.complete();
            }
            !flag.is_pending()
        });
        assert_eq!(result, Ok(()));
        assert_eq!(polls, 5);
    }

    #[test]
    fn test_default_is_bounded() {
        assert_eq!(BusyWait::default(), BusyWait::Spins(DEFAULT_BUSY_SPINS));
    }
}
