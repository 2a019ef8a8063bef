//! Board-agnostic consumers of the Sunmeter device configuration
//!
//! This crate contains the logic that reads a loaded
//! [`DeviceConfig`](sunmeter_config::DeviceConfig) without depending on a
//! specific board:
//!
//! - Sensor and uplink traits implemented by board support
//! - Capacity scaling (raw counts to watts and utilisation)
//! - Synthetic day-curve data for test mode
//! - The reporting gate that keeps test mode off the network

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod capacity;
pub mod report;
pub mod synthetic;
pub mod traits;

pub use report::{Reading, ReportError, ReportMode, Reporter};
pub use traits::{PowerSensor, Uplink};
