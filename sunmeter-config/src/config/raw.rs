//! Unvalidated configuration
//!
//! Sources produce a [`RawConfig`]; [`RawConfig::validate`] turns it into a
//! [`DeviceConfig`]. Text fields are bounded here already, numeric fields
//! are kept wide so that a negative or oversized value reaches validation
//! and is reported as out of range.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Field};
use super::host::{DataHost, MAX_HOST_LEN};
use super::rules::is_valid_password;
use super::secret::Secret;
use super::types::{DeviceConfig, WattPeak, DEFAULT_DATA_PORT, MAX_PASSWORD_LEN, MAX_SSID_LEN};

/// Configuration values as read from a source, before validation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawConfig {
    pub wifi_ssid: Option<String<MAX_SSID_LEN>>,
    pub wifi_password: Option<Secret<MAX_PASSWORD_LEN>>,
    pub data_host: Option<String<MAX_HOST_LEN>>,
    pub data_port: Option<i64>,
    pub installed_watt_peak: Option<i64>,
    pub data_test_mode: Option<bool>,
}

impl RawConfig {
    /// Create an empty configuration
    pub const fn new() -> Self {
        Self {
            wifi_ssid: None,
            wifi_password: None,
            data_host: None,
            data_port: None,
            installed_watt_peak: None,
            data_test_mode: None,
        }
    }

    /// Set the WiFi SSID
    pub fn wifi_ssid(mut self, ssid: &str) -> Result<Self, ConfigError> {
        self.wifi_ssid = Some(bounded(ssid, Field::WifiSsid)?);
        Ok(self)
    }

    /// Set the WiFi password (empty for an open network)
    pub fn wifi_password(mut self, password: &str) -> Result<Self, ConfigError> {
        self.wifi_password = Some(secret(password)?);
        Ok(self)
    }

    /// Set the data sink host
    pub fn data_host(mut self, host: &str) -> Result<Self, ConfigError> {
        self.data_host = Some(host_text(host)?);
        Ok(self)
    }

    /// Set the data sink port
    pub fn data_port(mut self, port: i64) -> Self {
        self.data_port = Some(port);
        self
    }

    /// Set the installed capacity in watts peak
    pub fn installed_watt_peak(mut self, watts: i64) -> Self {
        self.installed_watt_peak = Some(watts);
        self
    }

    /// Set test mode
    pub fn data_test_mode(mut self, test: bool) -> Self {
        self.data_test_mode = Some(test);
        self
    }

    /// Whether `field` already holds a value
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::WifiSsid => self.wifi_ssid.is_some(),
            Field::WifiPassword => self.wifi_password.is_some(),
            Field::DataHost => self.data_host.is_some(),
            Field::DataPort => self.data_port.is_some(),
            Field::InstalledWattPeak => self.installed_watt_peak.is_some(),
            Field::DataTestMode => self.data_test_mode.is_some(),
        }
    }

    /// Store a text value read from a source
    pub(crate) fn set_text(&mut self, field: Field, value: &str) -> Result<(), ConfigError> {
        self.check_unset(field)?;
        match field {
            Field::WifiSsid => self.wifi_ssid = Some(bounded(value, field)?),
            Field::WifiPassword => self.wifi_password = Some(secret(value)?),
            Field::DataHost => self.data_host = Some(host_text(value)?),
            _ => return Err(ConfigError::InvalidType(field)),
        }
        Ok(())
    }

    /// Store an integer value read from a source
    pub(crate) fn set_int(&mut self, field: Field, value: i64) -> Result<(), ConfigError> {
        self.check_unset(field)?;
        match field {
            Field::DataPort => self.data_port = Some(value),
            Field::InstalledWattPeak => self.installed_watt_peak = Some(value),
            _ => return Err(ConfigError::InvalidType(field)),
        }
        Ok(())
    }

    /// Store a boolean value read from a source
    pub(crate) fn set_bool(&mut self, field: Field, value: bool) -> Result<(), ConfigError> {
        self.check_unset(field)?;
        match field {
            Field::DataTestMode => self.data_test_mode = Some(value),
            _ => return Err(ConfigError::InvalidType(field)),
        }
        Ok(())
    }

    fn check_unset(&self, field: Field) -> Result<(), ConfigError> {
        if self.is_set(field) {
            Err(ConfigError::DuplicateField(field))
        } else {
            Ok(())
        }
    }

    /// Check every constraint and build the device configuration
    ///
    /// Fields are checked in declaration order; the first violation is
    /// returned. Only `data_port` has a default.
    pub fn validate(&self) -> Result<DeviceConfig, ConfigError> {
        let wifi_ssid = self
            .wifi_ssid
            .clone()
            .filter(|ssid| !ssid.is_empty())
            .ok_or(ConfigError::MissingField(Field::WifiSsid))?;

        let wifi_password = self
            .wifi_password
            .clone()
            .ok_or(ConfigError::MissingField(Field::WifiPassword))?;
        if !is_valid_password(wifi_password.expose()) {
            return Err(ConfigError::OutOfRange(Field::WifiPassword));
        }

        let data_host = self
            .data_host
            .as_ref()
            .ok_or(ConfigError::MissingField(Field::DataHost))?;
        let data_host = DataHost::parse(data_host.as_str())?;

        let data_port = match self.data_port {
            None => DEFAULT_DATA_PORT,
            Some(port) => u16::try_from(port)
                .ok()
                .filter(|port| *port != 0)
                .ok_or(ConfigError::OutOfRange(Field::DataPort))?,
        };

        let installed_watt_peak = self
            .installed_watt_peak
            .ok_or(ConfigError::MissingField(Field::InstalledWattPeak))?;
        let installed_watt_peak = u32::try_from(installed_watt_peak)
            .ok()
            .and_then(WattPeak::new)
            .ok_or(ConfigError::OutOfRange(Field::InstalledWattPeak))?;

        let data_test_mode = self
            .data_test_mode
            .ok_or(ConfigError::MissingField(Field::DataTestMode))?;

        Ok(DeviceConfig {
            wifi_ssid,
            wifi_password,
            data_host,
            data_port,
            installed_watt_peak,
            data_test_mode,
        })
    }
}

fn bounded<const N: usize>(value: &str, field: Field) -> Result<String<N>, ConfigError> {
    String::try_from(value).map_err(|_| ConfigError::OutOfRange(field))
}

fn secret(value: &str) -> Result<Secret<MAX_PASSWORD_LEN>, ConfigError> {
    Secret::try_from_str(value).map_err(|_| ConfigError::OutOfRange(Field::WifiPassword))
}

// Longer than any hostname, so reported the way validation would
fn host_text(value: &str) -> Result<String<MAX_HOST_LEN>, ConfigError> {
    String::try_from(value).map_err(|_| ConfigError::InvalidHost)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn example() -> RawConfig {
        RawConfig::new()
            .wifi_ssid("HomeNet")
            .unwrap()
            .wifi_password("secret123")
            .unwrap()
            .data_host("192.168.1.2")
            .unwrap()
            .data_port(8080)
            .installed_watt_peak(9900)
            .data_test_mode(true)
    }

    #[test]
    fn test_validate_example() {
        let config = example().validate().unwrap();
        assert!(config.is_test_mode());
        assert_eq!(config.installed_capacity().watts(), 9900);

        let creds = config.wifi_credentials();
        assert_eq!(creds.ssid, "HomeNet");
        assert_eq!(creds.password.expose(), "secret123");

        let endpoint = config.data_endpoint();
        assert_eq!(endpoint.host, &DataHost::parse("192.168.1.2").unwrap());
        assert_eq!(endpoint.port, 8080);
    }

    #[test]
    fn test_port_defaults_to_80() {
        let mut raw = example();
        raw.data_port = None;
        assert_eq!(raw.validate().unwrap().data_endpoint().port, DEFAULT_DATA_PORT);
    }

    #[test]
    fn test_port_out_of_range() {
        for port in [0, -1, 65536, i64::MAX] {
            let raw = example().data_port(port);
            assert_eq!(
                raw.validate(),
                Err(ConfigError::OutOfRange(Field::DataPort)),
                "port {}",
                port
            );
        }
        assert!(example().data_port(1).validate().is_ok());
        assert!(example().data_port(65535).validate().is_ok());
    }

    #[test]
    fn test_watt_peak_out_of_range() {
        for watts in [0, -9900, i64::from(u32::MAX) + 1] {
            let raw = example().installed_watt_peak(watts);
            assert_eq!(
                raw.validate(),
                Err(ConfigError::OutOfRange(Field::InstalledWattPeak))
            );
        }
    }

    #[test]
    fn test_empty_ssid_is_missing() {
        let raw = example().wifi_ssid("").unwrap();
        assert_eq!(
            raw.validate(),
            Err(ConfigError::MissingField(Field::WifiSsid))
        );

        let mut raw = example();
        raw.wifi_ssid = None;
        assert_eq!(
            raw.validate(),
            Err(ConfigError::MissingField(Field::WifiSsid))
        );
    }

    #[test]
    fn test_open_network_password() {
        let config = example().wifi_password("").unwrap().validate().unwrap();
        assert!(config.wifi_credentials().is_open());
    }

    #[test]
    fn test_short_password_rejected() {
        let raw = example().wifi_password("short").unwrap();
        assert_eq!(
            raw.validate(),
            Err(ConfigError::OutOfRange(Field::WifiPassword))
        );
    }

    #[test]
    fn test_raw_psk_must_be_hex() {
        let psk = "0123456789abcdef".repeat(4);
        assert!(example().wifi_password(&psk).unwrap().validate().is_ok());

        let not_hex = "z".repeat(MAX_PASSWORD_LEN);
        assert_eq!(
            example().wifi_password(&not_hex).unwrap().validate(),
            Err(ConfigError::OutOfRange(Field::WifiPassword))
        );

        let passphrase = "p".repeat(MAX_PASSWORD_LEN - 1);
        assert!(example().wifi_password(&passphrase).unwrap().validate().is_ok());
    }

    #[test]
    fn test_overlong_text_rejected() {
        let long_ssid = "s".repeat(MAX_SSID_LEN + 1);
        assert_eq!(
            RawConfig::new().wifi_ssid(&long_ssid),
            Err(ConfigError::OutOfRange(Field::WifiSsid))
        );

        let long_password = "p".repeat(MAX_PASSWORD_LEN + 1);
        assert_eq!(
            RawConfig::new().wifi_password(&long_password).err(),
            Some(ConfigError::OutOfRange(Field::WifiPassword))
        );

        let long_host = "h".repeat(MAX_HOST_LEN + 1);
        assert_eq!(
            RawConfig::new().data_host(&long_host),
            Err(ConfigError::InvalidHost)
        );
    }

    #[test]
    fn test_invalid_host() {
        let raw = example().data_host("not a host").unwrap();
        assert_eq!(raw.validate(), Err(ConfigError::InvalidHost));
    }

    #[test]
    fn test_required_fields() {
        let mut raw = example();
        raw.wifi_password = None;
        assert_eq!(
            raw.validate(),
            Err(ConfigError::MissingField(Field::WifiPassword))
        );

        let mut raw = example();
        raw.data_host = None;
        assert_eq!(
            raw.validate(),
            Err(ConfigError::MissingField(Field::DataHost))
        );

        let mut raw = example();
        raw.installed_watt_peak = None;
        assert_eq!(
            raw.validate(),
            Err(ConfigError::MissingField(Field::InstalledWattPeak))
        );

        let mut raw = example();
        raw.data_test_mode = None;
        assert_eq!(
            raw.validate(),
            Err(ConfigError::MissingField(Field::DataTestMode))
        );
    }

    #[test]
    fn test_set_rejects_duplicates_and_wrong_types() {
        let mut raw = RawConfig::new();
        raw.set_text(Field::WifiSsid, "HomeNet").unwrap();
        assert_eq!(
            raw.set_text(Field::WifiSsid, "Other"),
            Err(ConfigError::DuplicateField(Field::WifiSsid))
        );
        assert_eq!(raw.wifi_ssid.as_deref(), Some("HomeNet"));

        assert_eq!(
            raw.set_text(Field::DataPort, "8080"),
            Err(ConfigError::InvalidType(Field::DataPort))
        );
        assert_eq!(
            raw.set_int(Field::DataTestMode, 1),
            Err(ConfigError::InvalidType(Field::DataTestMode))
        );
        assert_eq!(
            raw.set_bool(Field::DataHost, true),
            Err(ConfigError::InvalidType(Field::DataHost))
        );
    }
}
