//! Touch acquisition pipeline: calibration, state and the latched point
//!
//! The bus protocol and the state machine driving these types live in
//! `sipwell-drivers`; everything here is pure logic usable on the host.

pub mod calibration;
pub mod shared;
pub mod state;

pub use calibration::{
    raw_reading, sanitise_reading, CalibrationWindow, READING_MAX, READING_MIN, X_RESOLUTION,
    Y_RESOLUTION,
};
pub use shared::TouchShared;
pub use state::AcquisitionState;
