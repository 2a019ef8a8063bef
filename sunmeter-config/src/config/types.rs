//! Device configuration types
//!
//! [`DeviceConfig`] is built once at startup by [`load`](crate::load) and is
//! read-only afterwards. It has no public constructor other than validation,
//! so holding one means every constraint below has been checked.

use core::fmt;
use core::num::NonZeroU32;

use heapless::String;

use super::host::DataHost;
use super::secret::Secret;

pub use super::rules::{MAX_PASSWORD_LEN, MAX_SSID_LEN, MIN_PASSWORD_LEN};

/// Data port used when none is configured (HTTP)
pub const DEFAULT_DATA_PORT: u16 = 80;

/// Rated peak output of the installation in watts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WattPeak(NonZeroU32);

impl WattPeak {
    /// Create from a watt value, `None` if zero
    pub const fn new(watts: u32) -> Option<Self> {
        match NonZeroU32::new(watts) {
            Some(w) => Some(Self(w)),
            None => None,
        }
    }

    /// Capacity in watts
    pub const fn watts(self) -> u32 {
        self.0.get()
    }

    /// Capacity as a non-zero divisor
    pub const fn get(self) -> NonZeroU32 {
        self.0
    }
}

impl fmt::Display for WattPeak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Wp", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WattPeak {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32} Wp", self.watts())
    }
}

/// WiFi network identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiCredentials<'a> {
    /// Network name
    pub ssid: &'a str,
    /// Passphrase; empty for an open network
    pub password: &'a Secret<MAX_PASSWORD_LEN>,
}

impl WifiCredentials<'_> {
    /// Whether the network needs no passphrase
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

/// Data sink address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataEndpoint<'a> {
    pub host: &'a DataHost,
    pub port: u16,
}

impl fmt::Display for DataEndpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Validated device configuration
///
/// The `Debug` output redacts the WiFi password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub(crate) wifi_ssid: String<MAX_SSID_LEN>,
    pub(crate) wifi_password: Secret<MAX_PASSWORD_LEN>,
    pub(crate) data_host: DataHost,
    pub(crate) data_port: u16,
    pub(crate) installed_watt_peak: WattPeak,
    pub(crate) data_test_mode: bool,
}

impl DeviceConfig {
    /// WiFi SSID and password
    pub fn wifi_credentials(&self) -> WifiCredentials<'_> {
        WifiCredentials {
            ssid: self.wifi_ssid.as_str(),
            password: &self.wifi_password,
        }
    }

    /// Data sink host and port
    ///
    /// Must not be called when [`is_test_mode`](Self::is_test_mode) is true;
    /// doing so is a caller bug and is logged, but the stored values are
    /// still returned.
    pub fn data_endpoint(&self) -> DataEndpoint<'_> {
        if self.data_test_mode {
            warn!("Data endpoint requested while in test mode");
        }
        DataEndpoint {
            host: &self.data_host,
            port: self.data_port,
        }
    }

    /// Data sink host and port, or `None` in test mode
    pub fn live_endpoint(&self) -> Option<DataEndpoint<'_>> {
        if self.data_test_mode {
            None
        } else {
            Some(DataEndpoint {
                host: &self.data_host,
                port: self.data_port,
            })
        }
    }

    /// Installed solar capacity
    pub fn installed_capacity(&self) -> WattPeak {
        self.installed_watt_peak
    }

    /// Whether the device runs on synthetic data without a server
    pub fn is_test_mode(&self) -> bool {
        self.data_test_mode
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "DeviceConfig(ssid={=str}, password={}, host={}, port={=u16}, capacity={}, test_mode={=bool})",
            self.wifi_ssid.as_str(),
            self.wifi_password,
            self.data_host,
            self.data_port,
            self.installed_watt_peak,
            self.data_test_mode
        )
    }
}
