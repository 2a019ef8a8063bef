//! Simulated node runs against recording collaborators

use sunmeter_config::{ConfigSource, DataEndpoint, DeviceConfig, TomlSource};
use sunmeter_core::synthetic::SyntheticSource;
use sunmeter_core::{PowerSensor, Reading, ReportError, ReportMode, Reporter, Uplink};

const STEPS: usize = 200;

fn device_toml(test_mode: bool) -> String {
    format!(
        "wifi_ssid = \"HomeNet\"\n\
         wifi_password = \"secret123\"\n\
         data_host = \"192.168.1.2\"\n\
         data_port = 8080\n\
         installed_watt_peak = 9900\n\
         data_test_mode = {}\n",
        test_mode
    )
}

fn load(test_mode: bool) -> DeviceConfig {
    TomlSource(&device_toml(test_mode)).load().unwrap()
}

/// Sensor that walks through a fixed list of raw counts
struct ScriptedSensor {
    counts: Vec<u32>,
    reads: usize,
}

impl ScriptedSensor {
    fn new(counts: &[u32]) -> Self {
        Self {
            counts: counts.to_vec(),
            reads: 0,
        }
    }
}

impl PowerSensor for ScriptedSensor {
    type Error = &'static str;

    fn read_raw(&mut self) -> Result<u32, Self::Error> {
        let count = self.counts[self.reads % self.counts.len()];
        self.reads += 1;
        Ok(count)
    }

    fn full_scale(&self) -> u32 {
        1000
    }
}

/// Uplink that records every call instead of touching the network
#[derive(Default)]
struct RecordingUplink {
    sent: Vec<(String, Reading)>,
}

impl Uplink for RecordingUplink {
    type Error = &'static str;

    fn send(&mut self, endpoint: DataEndpoint<'_>, reading: &Reading) -> Result<(), Self::Error> {
        self.sent.push((endpoint.to_string(), *reading));
        Ok(())
    }
}

#[test]
fn test_mode_run_makes_no_network_calls() {
    let config = load(true);
    assert!(config.is_test_mode());

    let mut reporter = Reporter::new(
        &config,
        ScriptedSensor::new(&[500]),
        RecordingUplink::default(),
    );
    assert_eq!(reporter.mode(), ReportMode::Synthetic);

    let readings: Vec<Reading> = (0..STEPS).map(|_| reporter.report().unwrap()).collect();

    let (sensor, uplink) = reporter.into_parts();
    assert_eq!(uplink.sent.len(), 0);
    assert_eq!(sensor.reads, 0);

    assert!(readings.iter().all(|r| r.synthetic));
    assert!(readings.iter().all(|r| r.power_w <= 9900));
    assert!(readings.iter().any(|r| r.power_w == 9900));
    assert!(readings.iter().any(|r| r.power_w == 0));
}

#[test]
fn test_live_run_uploads_every_reading() {
    let config = load(false);
    let mut reporter = Reporter::new(
        &config,
        ScriptedSensor::new(&[0, 250, 500, 1000, 1500]),
        RecordingUplink::default(),
    );
    assert_eq!(reporter.mode(), ReportMode::Live);

    let readings: Vec<Reading> = (0..5).map(|_| reporter.report().unwrap()).collect();
    let powers: Vec<u32> = readings.iter().map(|r| r.power_w).collect();
    assert_eq!(powers, [0, 2475, 4950, 9900, 9900]);

    let uplink = reporter.uplink();
    assert_eq!(uplink.sent.len(), 5);
    assert!(uplink.sent.iter().all(|(endpoint, _)| endpoint == "192.168.1.2:8080"));
    assert!(uplink.sent.iter().all(|(_, r)| !r.synthetic));
    assert_eq!(uplink.sent[2].1.utilisation_permille, 500);
}

#[test]
fn test_live_run_reports_sensor_errors() {
    struct DeadSensor;

    impl PowerSensor for DeadSensor {
        type Error = &'static str;

        fn read_raw(&mut self) -> Result<u32, Self::Error> {
            Err("open circuit")
        }

        fn full_scale(&self) -> u32 {
            1000
        }
    }

    let config = load(false);
    let mut reporter = Reporter::new(&config, DeadSensor, RecordingUplink::default());
    assert_eq!(reporter.report(), Err(ReportError::Sensor("open circuit")));
    assert!(reporter.uplink().sent.is_empty());
}

#[test]
fn test_custom_synthetic_period() {
    let config = load(true);
    let synthetic = SyntheticSource::with_period(config.installed_capacity(), 8);
    let mut reporter = Reporter::with_synthetic(
        &config,
        ScriptedSensor::new(&[0]),
        RecordingUplink::default(),
        synthetic,
    );

    let first_day: Vec<u32> = (0..8).map(|_| reporter.report().unwrap().power_w).collect();
    let second_day: Vec<u32> = (0..8).map(|_| reporter.report().unwrap().power_w).collect();
    assert_eq!(first_day, second_day);
    assert_eq!(first_day[4], 9900);
}
