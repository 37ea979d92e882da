//! Board-agnostic core logic for the Sipwell transport subsystem
//!
//! This crate contains everything in the hardware transport that does not
//! depend on a specific chip:
//!
//! - Millisecond tick source shared with the renderer and timers
//! - Bus arbiter (the single "transfer in flight" flag)
//! - Digitizer calibration and the touch acquisition state
//! - The latched, consume-on-read touch point
//! - Capability traits consumed by the renderer and input layers
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod config;
pub mod tick;
pub mod touch;
pub mod traits;
