//! Device configuration for the Sunmeter solar monitoring node
//!
//! The node joins a WiFi network, measures the output of a solar
//! installation and uploads it to a data sink, or runs on synthetic data in
//! test mode. This crate holds everything it needs to know up front:
//!
//! - WiFi credentials (the password is wrapped in a redacting [`Secret`])
//! - Data sink host and port (port defaults to 80)
//! - Installed capacity in watts peak, used to scale sensor readings
//! - Test mode switch
//!
//! Values come from a [`ConfigSource`] (`device.toml` compiled into the
//! firmware, a `KEY=VALUE` blob, a variable lookup or a postcard record in
//! flash) and are validated once by [`load`]. The resulting [`DeviceConfig`]
//! is immutable.

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod config;

pub use config::*;
