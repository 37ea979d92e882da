//! Configuration types
//!
//! Board-agnostic configuration structures. Defaults reproduce the
//! reference appliance; every struct can be built in a `const` context.

pub mod display;
pub mod pins;
pub mod touch;

pub use display::*;
pub use pins::*;
pub use touch::*;
