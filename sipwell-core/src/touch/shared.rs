//! Touch state shared between interrupt, alarm and polled contexts
//!
//! Lives in a `static` for the lifetime of the firmware and is reached only
//! through the methods below. No locks: every field is one atomic, and each
//! state transition is a compare-and-swap from the one state its context
//! is allowed to leave.
//!
//! | Context   | Transition                          |
//! |-----------|-------------------------------------|
//! | edge irq  | `Idle`/`ArmedForEdge` → `Sampling`  |
//! | alarm     | `DebounceWait` → `Sampling`         |
//! | polled    | `Sampling` → `DebounceWait`         |
//! | polled    | `Sampling` → `ArmedForEdge` → `Idle`|

use core::sync::atomic::Ordering;

use portable_atomic::{AtomicU32, AtomicU64, AtomicU8};

use super::state::AcquisitionState;
use crate::traits::touch::{TouchInput, TouchPoint};

const VALID_BIT: u64 = 1 << 32;

const fn pack(point: TouchPoint) -> u64 {
    let valid = if point.valid { VALID_BIT } else { 0 };
    valid | ((point.y as u64) << 16) | point.x as u64
}

const fn unpack(bits: u64) -> TouchPoint {
    TouchPoint {
        valid: bits & VALID_BIT != 0,
        x: bits as u16,
        y: (bits >> 16) as u16,
    }
}

/// Shared acquisition state and latched touch point
#[derive(Debug)]
pub struct TouchShared {
    state: AtomicU8,
    latched: AtomicU64,
    ignored_edges: AtomicU32,
}

impl Default for TouchShared {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchShared {
    /// Create shared state: `Idle`, nothing latched
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(AcquisitionState::Idle.bits()),
            latched: AtomicU64::new(0),
            ignored_edges: AtomicU32::new(0),
        }
    }

    /// Current acquisition state
    pub fn state(&self) -> AcquisitionState {
        AcquisitionState::from_bits(self.state.load(Ordering::Acquire))
    }

    /// Check if a sample is waiting for the polled context
    pub fn sample_pending(&self) -> bool {
        self.state() == AcquisitionState::Sampling
    }

    /// Edge interrupt: start sampling if the pipeline is resting
    ///
    /// Returns `false` if the edge arrived while a sample or debounce was
    /// already in progress.
    pub fn enter_sampling_from_edge(&self) -> bool {
        let accepted = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                AcquisitionState::from_bits(bits)
                    .accepts_edge()
                    .then_some(AcquisitionState::Sampling.bits())
            })
            .is_ok();
        if !accepted {
            self.ignored_edges.fetch_add(1, Ordering::Relaxed);
        }
        accepted
    }

    /// Edges that arrived while a sample or debounce was in progress
    pub fn ignored_edges(&self) -> u32 {
        self.ignored_edges.load(Ordering::Relaxed)
    }

    /// Alarm callback: the debounce interval elapsed, resample
    ///
    /// Returns `false` if no debounce was in progress.
    pub fn on_debounce_elapsed(&self) -> bool {
        self.transition(AcquisitionState::DebounceWait, AcquisitionState::Sampling)
    }

    /// Polled context: a valid sample was published
    pub fn enter_debounce(&self) -> bool {
        self.transition(AcquisitionState::Sampling, AcquisitionState::DebounceWait)
    }

    /// Polled context: about to re-enable the edge interrupt
    pub fn begin_rearm(&self) -> bool {
        self.transition(AcquisitionState::Sampling, AcquisitionState::ArmedForEdge)
    }

    /// Polled context: the edge interrupt is enabled again
    ///
    /// Returns `false` if an edge already moved the pipeline back to
    /// `Sampling`, which is left untouched.
    pub fn finish_rearm(&self) -> bool {
        self.transition(AcquisitionState::ArmedForEdge, AcquisitionState::Idle)
    }

    /// Return to `Idle` and drop any latched point
    pub fn reset(&self) {
        self.latched.store(0, Ordering::Release);
        self.state
            .store(AcquisitionState::Idle.bits(), Ordering::Release);
    }

    /// Replace the latched point
    pub fn publish(&self, point: TouchPoint) {
        self.latched.store(pack(point), Ordering::Release);
    }

    /// Publish a release, keeping the last known coordinates
    pub fn publish_release(&self) {
        self.latched.fetch_and(!VALID_BIT, Ordering::AcqRel);
    }

    /// Read the latched point and clear its validity in one step
    ///
    /// A touch is therefore reported once; later reads return
    /// `valid: false` until the next valid sample is published.
    pub fn get_touch_point(&self) -> TouchPoint {
        unpack(self.latched.fetch_and(!VALID_BIT, Ordering::AcqRel))
    }

    /// Read the latched point without consuming it
    pub fn peek(&self) -> TouchPoint {
        unpack(self.latched.load(Ordering::Acquire))
    }

    fn transition(&self, from: AcquisitionState, to: AcquisitionState) -> bool {
        self.state
            .compare_exchange(from.bits(), to.bits(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl TouchInput for TouchShared {
    fn get_touch_point(&self) -> TouchPoint {
        TouchShared::get_touch_point(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_round_trip() {
        let point = TouchPoint::touched(239, 319);
        assert_eq!(unpack(pack(point)), point);
        assert_eq!(unpack(pack(TouchPoint::NONE)), TouchPoint::NONE);
    }

    #[test]
    fn test_consume_on_read() {
        let shared = TouchShared::new();
        shared.publish(TouchPoint::touched(120, 200));

        let first = shared.get_touch_point();
        assert_eq!(first, TouchPoint::touched(120, 200));

        let second = shared.get_touch_point();
        assert!(!second.valid);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let shared = TouchShared::new();
        shared.publish(TouchPoint::touched(10, 20));

        assert!(shared.peek().valid);
        assert!(shared.peek().valid);
        assert!(shared.get_touch_point().valid);
        assert!(!shared.peek().valid);
    }

    #[test]
    fn test_release_keeps_coordinates() {
        let shared = TouchShared::new();
        shared.publish(TouchPoint::touched(50, 60));
        shared.publish_release();

        let point = shared.get_touch_point();
        assert!(!point.valid);
        assert_eq!((point.x, point.y), (50, 60));
    }

    #[test]
    fn test_edge_only_accepted_when_resting() {
        let shared = TouchShared::new();
        assert!(shared.enter_sampling_from_edge());
        assert_eq!(shared.state(), AcquisitionState::Sampling);

        // A second edge during sampling changes nothing
        assert!(!shared.enter_sampling_from_edge());

        assert!(shared.enter_debounce());
        assert!(!shared.enter_sampling_from_edge());
        assert_eq!(shared.state(), AcquisitionState::DebounceWait);
        assert_eq!(shared.ignored_edges(), 2);
    }

    #[test]
    fn test_alarm_only_fires_from_debounce() {
        let shared = TouchShared::new();
        assert!(!shared.on_debounce_elapsed());
        assert_eq!(shared.state(), AcquisitionState::Idle);

        shared.enter_sampling_from_edge();
        shared.enter_debounce();
        assert!(shared.on_debounce_elapsed());
        assert!(shared.sample_pending());
    }

    #[test]
    fn test_edge_during_rearm_is_not_lost() {
        let shared = TouchShared::new();
        shared.enter_sampling_from_edge();

        assert!(shared.begin_rearm());
        assert_eq!(shared.state(), AcquisitionState::ArmedForEdge);

        // Edge lands between enabling the interrupt and finishing the re-arm
        assert!(shared.enter_sampling_from_edge());
        assert!(!shared.finish_rearm());
        assert_eq!(shared.state(), AcquisitionState::Sampling);
    }

    #[test]
    fn test_state_byte_uses_bits_encoding() {
        let shared = TouchShared::new();
        assert_eq!(
            shared.state.load(Ordering::Relaxed),
            AcquisitionState::Idle.bits()
        );

        shared.enter_sampling_from_edge();
        shared.enter_debounce();
        assert_eq!(
            shared.state.load(Ordering::Relaxed),
            AcquisitionState::DebounceWait.bits()
        );
    }

    #[test]
    fn test_reset() {
        let shared = TouchShared::new();
        shared.publish(TouchPoint::touched(1, 1));
        shared.enter_sampling_from_edge();

        shared.reset();
        assert_eq!(shared.state(), AcquisitionState::Idle);
        assert_eq!(shared.peek(), TouchPoint::NONE);
    }
}
