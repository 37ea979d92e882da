//! Touch acquisition states

/// Acquisition state of the touch pipeline
///
/// ```text
///            edge irq                      valid sample
///   Idle ─────────────────▶ Sampling ─────────────────▶ DebounceWait
///    ▲                        │  ▲                          │
///    │    ArmedForEdge        │  └──────── alarm ───────────┘
///    └──────────◀─────────────┘ invalid sample / bus error
/// ```
///
/// `Idle` is the resting state with the edge interrupt armed. The polled
/// context passes through `ArmedForEdge` while it re-enables the edge
/// interrupt; an edge in that window is taken exactly as in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AcquisitionState {
    /// Waiting for a pen-down edge; edge interrupt armed
    Idle = 0,
    /// Re-arming the edge interrupt after a release
    ArmedForEdge = 1,
    /// Sample pending; edge interrupt disarmed
    Sampling = 2,
    /// Valid touch published; resample scheduled
    DebounceWait = 3,
}

impl AcquisitionState {
    /// Encoding stored in the shared state byte
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a stored state byte
    ///
    /// Only values produced by [`bits`](Self::bits) are ever stored; any
    /// other value decodes as `Idle`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => AcquisitionState::ArmedForEdge,
            2 => AcquisitionState::Sampling,
            3 => AcquisitionState::DebounceWait,
            _ => AcquisitionState::Idle,
        }
    }

    /// Check if a pen-down edge may start a new sample in this state
    pub const fn accepts_edge(self) -> bool {
        matches!(self, AcquisitionState::Idle | AcquisitionState::ArmedForEdge)
    }
}
