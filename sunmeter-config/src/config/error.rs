//! Configuration fields and load errors

use core::fmt;

/// The six device configuration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    WifiSsid,
    WifiPassword,
    DataHost,
    DataPort,
    InstalledWattPeak,
    DataTestMode,
}

impl Field {
    /// All fields, in declaration order
    pub const ALL: [Field; 6] = [
        Field::WifiSsid,
        Field::WifiPassword,
        Field::DataHost,
        Field::DataPort,
        Field::InstalledWattPeak,
        Field::DataTestMode,
    ];

    /// Key used in `device.toml`
    pub const fn key(self) -> &'static str {
        match self {
            Field::WifiSsid => "wifi_ssid",
            Field::WifiPassword => "wifi_password",
            Field::DataHost => "data_host",
            Field::DataPort => "data_port",
            Field::InstalledWattPeak => "installed_watt_peak",
            Field::DataTestMode => "data_test_mode",
        }
    }

    /// Key used in `KEY=VALUE` environments
    pub const fn env_key(self) -> &'static str {
        match self {
            Field::WifiSsid => "WIFI_SSID",
            Field::WifiPassword => "WIFI_PASSWORD",
            Field::DataHost => "DATA_HOST",
            Field::DataPort => "DATA_PORT",
            Field::InstalledWattPeak => "INSTALLED_WATT_PEAK",
            Field::DataTestMode => "DATA_TEST",
        }
    }

    /// Look up a field by its `device.toml` key
    ///
    /// `data_test` is accepted as a short alias of `data_test_mode`.
    pub fn from_key(key: &str) -> Option<Self> {
        if key == "data_test" {
            return Some(Field::DataTestMode);
        }
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Look up a field by its environment key
    pub fn from_env_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.env_key() == key)
    }

    /// Whether values of this field must never be logged
    pub const fn is_secret(self) -> bool {
        matches!(self, Field::WifiPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors raised while reading or validating configuration
///
/// None of the variants carry field values, so a password can never leak
/// through an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A required value is absent (or an empty SSID)
    MissingField(Field),
    /// Numeric value or text length outside documented bounds
    OutOfRange(Field),
    /// Host is neither an IP literal nor a valid hostname
    InvalidHost,
    /// Value has the wrong type for its field (e.g. text for a port)
    InvalidType(Field),
    /// A field was given more than once
    DuplicateField(Field),
    /// Key does not name a configuration field
    UnknownKey {
        /// 1-based source line
        line: usize,
    },
    /// Malformed source line
    Syntax {
        /// 1-based source line
        line: usize,
    },
    /// Stored binary configuration could not be decoded
    Decode,
    /// Buffer too small to encode configuration
    Encode,
    /// The process-wide store already holds a configuration
    AlreadyLoaded,
}

impl ConfigError {
    /// Field the error refers to, if any
    pub const fn field(&self) -> Option<Field> {
        match self {
            ConfigError::MissingField(f)
            | ConfigError::OutOfRange(f)
            | ConfigError::InvalidType(f)
            | ConfigError::DuplicateField(f) => Some(*f),
            ConfigError::InvalidHost => Some(Field::DataHost),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField(field) => write!(f, "missing required field `{}`", field),
            ConfigError::OutOfRange(field) => write!(f, "field `{}` is out of range", field),
            ConfigError::InvalidHost => write!(
                f,
                "field `{}` is not a valid hostname or IP address",
                Field::DataHost
            ),
            ConfigError::InvalidType(field) => write!(f, "field `{}` has the wrong type", field),
            ConfigError::DuplicateField(field) => {
                write!(f, "field `{}` is given more than once", field)
            }
            ConfigError::UnknownKey { line } => write!(f, "unknown key on line {}", line),
            ConfigError::Syntax { line } => write!(f, "syntax error on line {}", line),
            ConfigError::Decode => f.write_str("stored configuration could not be decoded"),
            ConfigError::Encode => f.write_str("buffer too small to encode configuration"),
            ConfigError::AlreadyLoaded => f.write_str("configuration is already loaded"),
        }
    }
}
