//! Reporting gate
//!
//! [`Reporter`] decides per reading between live upload and synthetic data,
//! based on the configured test mode. In test mode neither the sensor, the
//! uplink nor the data endpoint is touched.

use sunmeter_config::{DeviceConfig, WattPeak};

use crate::capacity::{scale_raw, utilisation_permille, ScaleError};
use crate::synthetic::SyntheticSource;
use crate::traits::{PowerSensor, Uplink};

/// One output sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Output in watts
    pub power_w: u32,
    /// Share of installed capacity in per mille (0-1000)
    pub utilisation_permille: u16,
    /// Generated locally rather than measured
    pub synthetic: bool,
}

impl Reading {
    /// Create a reading, deriving utilisation from the installed capacity
    pub fn new(capacity: WattPeak, power_w: u32, synthetic: bool) -> Self {
        Self {
            power_w,
            utilisation_permille: utilisation_permille(capacity, power_w),
            synthetic,
        }
    }
}

/// Where readings come from and go to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportMode {
    /// Measured and uploaded to the data sink
    Live,
    /// Generated locally, never uploaded
    Synthetic,
}

/// Errors from a live report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError<S, U> {
    /// Sensor read failed
    Sensor(S),
    /// Raw reading could not be scaled
    Scale(ScaleError),
    /// Upload failed
    Uplink(U),
}

/// Produces readings and delivers them according to the configuration
pub struct Reporter<'c, P, U> {
    config: &'c DeviceConfig,
    sensor: P,
    uplink: U,
    synthetic: SyntheticSource,
}

impl<'c, P, U> Reporter<'c, P, U>
where
    P: PowerSensor,
    U: Uplink,
{
    /// Create a reporter over a loaded configuration
    pub fn new(config: &'c DeviceConfig, sensor: P, uplink: U) -> Self {
        let synthetic = SyntheticSource::new(config.installed_capacity());
        Self::with_synthetic(config, sensor, uplink, synthetic)
    }

    /// Create a reporter with a custom synthetic data source
    pub fn with_synthetic(
        config: &'c DeviceConfig,
        sensor: P,
        uplink: U,
        synthetic: SyntheticSource,
    ) -> Self {
        match mode_for(config) {
            ReportMode::Live => info!("Reporting live readings"),
            ReportMode::Synthetic => info!("Reporting synthetic readings, uplink disabled"),
        }
        Self {
            config,
            sensor,
            uplink,
            synthetic,
        }
    }

    /// Current mode
    pub fn mode(&self) -> ReportMode {
        mode_for(self.config)
    }

    /// Produce one reading and deliver it if live
    ///
    /// Uplink failures are returned to the caller; nothing is retried here.
    pub fn report(&mut self) -> Result<Reading, ReportError<P::Error, U::Error>> {
        if self.config.is_test_mode() {
            let reading = self.synthetic.next_reading();
            trace!("Synthetic reading: {} W", reading.power_w);
            return Ok(reading);
        }

        let capacity = self.config.installed_capacity();
        let raw = self.sensor.read_raw().map_err(ReportError::Sensor)?;
        let power_w =
            scale_raw(capacity, raw, self.sensor.full_scale()).map_err(ReportError::Scale)?;
        let reading = Reading::new(capacity, power_w, false);

        self.uplink
            .send(self.config.data_endpoint(), &reading)
            .map_err(|e| {
                warn!("Failed to upload reading");
                ReportError::Uplink(e)
            })?;

        debug!(
            "Uploaded reading: {} W ({} permille)",
            reading.power_w, reading.utilisation_permille
        );
        Ok(reading)
    }

    /// The sensor
    pub fn sensor(&self) -> &P {
        &self.sensor
    }

    /// The uplink
    pub fn uplink(&self) -> &U {
        &self.uplink
    }

    /// Release the sensor and uplink
    pub fn into_parts(self) -> (P, U) {
        (self.sensor, self.uplink)
    }
}

fn mode_for(config: &DeviceConfig) -> ReportMode {
    if config.is_test_mode() {
        ReportMode::Synthetic
    } else {
        ReportMode::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunmeter_config::{DataEndpoint, RawConfig};

    struct FixedSensor(u32);

    impl PowerSensor for FixedSensor {
        type Error = ();

        fn read_raw(&mut self) -> Result<u32, ()> {
            Ok(self.0)
        }

        fn full_scale(&self) -> u32 {
            4095
        }
    }

    struct FailingUplink;

    impl Uplink for FailingUplink {
        type Error = u8;

        fn send(&mut self, _endpoint: DataEndpoint<'_>, _reading: &Reading) -> Result<(), u8> {
            Err(7)
        }
    }

    fn config(test_mode: bool) -> DeviceConfig {
        RawConfig::new()
            .wifi_ssid("HomeNet")
            .unwrap()
            .wifi_password("secret123")
            .unwrap()
            .data_host("192.168.1.2")
            .unwrap()
            .data_port(8080)
            .installed_watt_peak(9900)
            .data_test_mode(test_mode)
            .validate()
            .unwrap()
    }

    #[test]
    fn test_mode_follows_config() {
        let live = config(false);
        let test = config(true);
        assert_eq!(
            Reporter::new(&live, FixedSensor(0), FailingUplink).mode(),
            ReportMode::Live
        );
        assert_eq!(
            Reporter::new(&test, FixedSensor(0), FailingUplink).mode(),
            ReportMode::Synthetic
        );
    }

    #[test]
    fn test_uplink_error_is_returned() {
        let live = config(false);
        let mut reporter = Reporter::new(&live, FixedSensor(4095), FailingUplink);
        assert_eq!(reporter.report(), Err(ReportError::Uplink(7)));
    }

    #[test]
    fn test_test_mode_skips_failing_uplink() {
        let test = config(true);
        let mut reporter = Reporter::new(&test, FixedSensor(4095), FailingUplink);
        let reading = reporter.report().unwrap();
        assert!(reading.synthetic);
    }

    #[test]
    fn test_reading_utilisation() {
        let capacity = WattPeak::new(9900).unwrap();
        let reading = Reading::new(capacity, 990, false);
        assert_eq!(reading.utilisation_permille, 100);
    }
}
