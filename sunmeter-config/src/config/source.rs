//! Configuration sources and loading
//!
//! A [`ConfigSource`] produces a [`RawConfig`]; [`load`] validates it. No
//! source performs I/O: they parse text or bytes that are already in memory
//! (compiled in, read from flash by the caller, or handed over by the host).

use super::env::{apply_env_value, parse_env};
use super::error::{ConfigError, Field};
use super::raw::RawConfig;
use super::toml::parse_toml;
use super::types::DeviceConfig;

/// `device.toml` as validated and embedded by the build script
pub const COMPILED_IN_TOML: &str = include_str!(concat!(env!("OUT_DIR"), "/device.toml"));

/// Something that can produce unvalidated configuration
pub trait ConfigSource {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Read configuration values without validating them
    fn read(&self) -> Result<RawConfig, ConfigError>;

    /// Read and validate
    fn load(&self) -> Result<DeviceConfig, ConfigError> {
        load(self)
    }
}

/// Read `source` and validate the result
///
/// Failures are logged with the offending field and returned; nothing is
/// defaulted except the data port. Loading the same input twice yields equal
/// configurations.
pub fn load<S: ConfigSource + ?Sized>(source: &S) -> Result<DeviceConfig, ConfigError> {
    debug!("Loading configuration from {}", source.name());

    let config = source
        .read()
        .and_then(|raw| {
            if !raw.is_set(Field::DataPort) {
                debug!("No data port configured, using default");
            }
            raw.validate()
        })
        .map_err(|e| {
            warn!("Invalid configuration from {}: {}", source.name(), e);
            e
        })?;

    log_config_summary(&config);
    Ok(config)
}

/// Log a summary of the loaded configuration, without the password
fn log_config_summary(config: &DeviceConfig) {
    let creds = config.wifi_credentials();
    info!("Configuration loaded successfully");
    debug!("  wifi ssid: {}", creds.ssid);
    debug!("  wifi open network: {}", creds.is_open());
    if let Some(endpoint) = config.live_endpoint() {
        debug!("  data sink: {}:{}", endpoint.host, endpoint.port);
    }
    debug!("  installed capacity: {}", config.installed_capacity());
    if config.is_test_mode() {
        info!("Test mode: using synthetic data, data sink will not be contacted");
    }
}

/// `device.toml` text
#[derive(Debug, Clone, Copy)]
pub struct TomlSource<'a>(pub &'a str);

impl ConfigSource for TomlSource<'_> {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn read(&self) -> Result<RawConfig, ConfigError> {
        parse_toml(self.0)
    }
}

/// `KEY=VALUE` text
#[derive(Debug, Clone, Copy)]
pub struct EnvSource<'a>(pub &'a str);

impl ConfigSource for EnvSource<'_> {
    fn name(&self) -> &'static str {
        "env"
    }

    fn read(&self) -> Result<RawConfig, ConfigError> {
        parse_env(self.0)
    }
}

/// Variable lookup, e.g. over the process environment on a host build
///
/// Each field is looked up by its [`Field::env_key`]; unrelated variables
/// are never consulted.
#[derive(Clone, Copy)]
pub struct VarsSource<F>(pub F);

impl<F, V> ConfigSource for VarsSource<F>
where
    F: Fn(&str) -> Option<V>,
    V: AsRef<str>,
{
    fn name(&self) -> &'static str {
        "vars"
    }

    fn read(&self) -> Result<RawConfig, ConfigError> {
        let mut raw = RawConfig::new();
        for field in Field::ALL {
            if let Some(value) = (self.0)(field.env_key()) {
                apply_env_value(&mut raw, field, value.as_ref().trim())?;
            }
        }
        Ok(raw)
    }
}

/// The `device.toml` embedded at build time
#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledIn;

impl ConfigSource for CompiledIn {
    fn name(&self) -> &'static str {
        "compiled-in"
    }

    fn read(&self) -> Result<RawConfig, ConfigError> {
        parse_toml(COMPILED_IN_TOML)
    }
}

impl ConfigSource for RawConfig {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn read(&self) -> Result<RawConfig, ConfigError> {
        Ok(self.clone())
    }
}

/// Postcard-encoded [`RawConfig`], as stored in flash
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy)]
pub struct PostcardSource<'a>(pub &'a [u8]);

#[cfg(feature = "serde")]
impl ConfigSource for PostcardSource<'_> {
    fn name(&self) -> &'static str {
        "postcard"
    }

    fn read(&self) -> Result<RawConfig, ConfigError> {
        postcard::from_bytes(self.0).map_err(|_| ConfigError::Decode)
    }
}

#[cfg(feature = "serde")]
impl RawConfig {
    /// Encode for storage, returning the used part of `buf`
    pub fn to_postcard<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }
}
