//! Capability traits
//!
//! These traits define the interface between the transport drivers and
//! the collaborators outside this subsystem: the renderer pushing frames
//! and the input layer polling for touches.

pub mod display;
pub mod touch;

pub use display::{DisplaySink, FlushReady, FlushSignal, SignalFlush, TransferError};
pub use touch::{TouchInput, TouchPoint};
