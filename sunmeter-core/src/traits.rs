//! Collaborator traits
//!
//! The node's board support implements these; the crate itself never talks
//! to hardware or the network.

use sunmeter_config::DataEndpoint;

use crate::report::Reading;

/// Trait for the solar output sensor
///
/// Implementations wrap the specific measurement (CT clamp on an ADC,
/// inverter pulse counter, ...).
pub trait PowerSensor {
    /// Sensor-specific error
    type Error;

    /// Read the current output as a raw count in `0..=full_scale()`
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_raw(&mut self) -> Result<u32, Self::Error>;

    /// Raw count corresponding to the full installed capacity
    fn full_scale(&self) -> u32;
}

/// Trait for the telemetry client that uploads readings
pub trait Uplink {
    /// Transport-specific error
    type Error;

    /// Deliver one reading to the data sink
    fn send(&mut self, endpoint: DataEndpoint<'_>, reading: &Reading) -> Result<(), Self::Error>;
}
