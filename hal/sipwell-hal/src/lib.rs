//! Sipwell Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the transport drivers are written
//! against. A board support crate implements them for the real peripherals;
//! tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Renderer / input polling (external)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sipwell-drivers (touch, display)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sipwell-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  board support (RP2040 SPI0/SPI1, GPIO) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Chip-select, mode-select, reset and backlight lines
//! - [`spi::SpiBus`], [`spi::FramedSpiBus`] - Synchronous serial bus
//! - [`irq::EdgeInterrupt`] - Pen-down edge interrupt line
//! - [`timer::OneShotAlarm`] - Deferred callback scheduling

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "embedded-hal")]
pub mod adapters;
pub mod gpio;
pub mod irq;
pub mod spi;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use irq::EdgeInterrupt;
pub use spi::{FrameFormat, FramedSpiBus, SpiBus};
pub use timer::OneShotAlarm;
