//! Process-wide configuration store
//!
//! The store starts [`StoreState::Unloaded`] and moves to
//! [`StoreState::Loaded`] on the first successful [`ConfigStore::load`].
//! There is no way back: the record is placed in a [`OnceLock`] and every
//! reader shares it by reference without locking.

use embassy_sync::once_lock::OnceLock;

use super::error::ConfigError;
use super::source::{load, ConfigSource};
use super::types::DeviceConfig;

/// Store lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreState {
    Unloaded,
    Loaded,
}

/// Holder for the one configuration of the running process
///
/// ```
/// use sunmeter_config::{ConfigStore, TomlSource};
///
/// static CONFIG: ConfigStore = ConfigStore::new();
///
/// let config = CONFIG
///     .load(&TomlSource(
///         "wifi_ssid = \"HomeNet\"\n\
///          wifi_password = \"secret123\"\n\
///          data_host = \"192.168.1.2\"\n\
///          installed_watt_peak = 9900\n\
///          data_test_mode = true\n",
///     ))
///     .unwrap();
/// assert!(config.is_test_mode());
///
/// // Any other component reads the same record through the static
/// assert!(CONFIG.get().is_some_and(|c| core::ptr::eq(c, config)));
/// ```
pub struct ConfigStore {
    slot: OnceLock<DeviceConfig>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Create an empty store, usable in a `static`
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> StoreState {
        if self.slot.try_get().is_some() {
            StoreState::Loaded
        } else {
            StoreState::Unloaded
        }
    }

    /// The installed configuration, `None` until a load succeeds
    pub fn get(&self) -> Option<&DeviceConfig> {
        self.slot.try_get()
    }

    /// Load and validate configuration, then install it for the process
    ///
    /// A failed validation leaves the store unloaded. Once a configuration is
    /// installed, further calls fail with [`ConfigError::AlreadyLoaded`]
    /// without reading the source.
    pub fn load<S: ConfigSource + ?Sized>(&self, source: &S) -> Result<&DeviceConfig, ConfigError> {
        if self.state() == StoreState::Loaded {
            error!("Configuration store is already loaded");
            return Err(ConfigError::AlreadyLoaded);
        }

        let config = load(source)?;
        self.slot.init(config).map_err(|_| {
            error!("Configuration store was loaded concurrently");
            ConfigError::AlreadyLoaded
        })?;

        self.get().ok_or(ConfigError::AlreadyLoaded)
    }
}
