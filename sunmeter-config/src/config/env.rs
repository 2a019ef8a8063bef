//! `KEY=VALUE` configuration
//!
//! Keys are the constant names the node firmware has always used
//! (`WIFI_SSID`, `DATA_PORT`, ...). Values are plain text, optionally wrapped
//! in double quotes. An empty numeric or boolean value counts as unset.

use super::error::{ConfigError, Field};
use super::raw::RawConfig;

/// Parse `KEY=VALUE` lines into an unvalidated configuration
///
/// Blank lines and `#` comments are skipped, and a leading `export ` is
/// ignored so shell env files can be used as-is.
pub fn parse_env(input: &str) -> Result<RawConfig, ConfigError> {
    let mut raw = RawConfig::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line
            .split_once('=')
            .ok_or(ConfigError::Syntax { line: line_no })?;

        let field =
            Field::from_env_key(key.trim()).ok_or(ConfigError::UnknownKey { line: line_no })?;
        let value = unquote(value.trim()).ok_or(ConfigError::Syntax { line: line_no })?;

        apply_env_value(&mut raw, field, value)?;
    }

    Ok(raw)
}

/// Store one environment value, converting it to the field's type
pub(crate) fn apply_env_value(
    raw: &mut RawConfig,
    field: Field,
    value: &str,
) -> Result<(), ConfigError> {
    match field {
        Field::WifiSsid | Field::WifiPassword | Field::DataHost => raw.set_text(field, value),
        Field::DataPort | Field::InstalledWattPeak => {
            if value.is_empty() {
                return Ok(());
            }
            let n = value
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidType(field))?;
            raw.set_int(field, n)
        }
        Field::DataTestMode => {
            if value.is_empty() {
                return Ok(());
            }
            let b = parse_bool(value).ok_or(ConfigError::InvalidType(field))?;
            raw.set_bool(field, b)
        }
    }
}

/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`, case-insensitive
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "1", "yes", "on"];
    const FALSE: [&str; 4] = ["false", "0", "no", "off"];

    if TRUE.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

fn unquote(value: &str) -> Option<&str> {
    match value.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"'),
        None => Some(value),
    }
}
