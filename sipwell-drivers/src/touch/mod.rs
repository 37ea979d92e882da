//! Touch digitizer drivers

pub mod xpt2046;

pub use xpt2046::{bus_config, on_debounce_alarm, on_pen_edge, TouchError, TouchStats, Xpt2046};
