//! Hardware driver implementations
//!
//! This crate provides the drivers behind the traits defined in
//! sipwell-core, written against the sipwell-hal abstractions:
//!
//! - Touch digitizer (XPT2046 over SPI, pen-down edge interrupt)
//! - Display transport (SPI with data/command line, ST7789 command set)

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod line;
pub mod touch;
