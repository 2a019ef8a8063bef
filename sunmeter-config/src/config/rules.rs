//! Validation rules shared with the build script
//!
//! `build.rs` pulls this file in with `#[path]`, so a `device.toml` that
//! passes the build is accepted by [`parse_toml`](super::toml::parse_toml)
//! and [`RawConfig::validate`](super::raw::RawConfig::validate) as well.
//! Everything here must only depend on `core`.

use core::net::{Ipv4Addr, Ipv6Addr};
use core::str::FromStr;

/// Maximum SSID length in bytes (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WiFi password length in bytes (64 hex digits raw PSK)
pub const MAX_PASSWORD_LEN: usize = 64;

/// Minimum WPA2 passphrase length; shorter non-empty passwords are rejected
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum hostname length in bytes
pub const MAX_HOST_LEN: usize = 253;

/// Maximum hostname label length in bytes
pub const MAX_LABEL_LEN: usize = 63;

/// WiFi password shape
///
/// Empty means an open network. A WPA2 passphrase is 8..=63 bytes; a
/// 64 byte value is a raw PSK and must be hex.
pub fn is_valid_password(password: &str) -> bool {
    match password.len() {
        0 => true,
        MAX_PASSWORD_LEN => password.bytes().all(|b| b.is_ascii_hexdigit()),
        len => (MIN_PASSWORD_LEN..MAX_PASSWORD_LEN).contains(&len),
    }
}

/// IPv4 literal
pub fn parse_ipv4(host: &str) -> Option<Ipv4Addr> {
    Ipv4Addr::from_str(host).ok()
}

/// IPv6 literal, bare or wrapped in brackets
pub fn parse_ipv6(host: &str) -> Option<Ipv6Addr> {
    let unbracketed = host
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(host);
    Ipv6Addr::from_str(unbracketed).ok()
}

/// RFC 1123 hostname check
///
/// A single trailing dot (fully qualified form) is allowed. The last label
/// must not be all digits, so malformed IPv4 such as `192.168.1.300` is
/// rejected rather than treated as a name.
pub fn is_valid_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > MAX_HOST_LEN {
        return false;
    }

    let mut last_label = "";
    for label in host.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return false;
        }
        last_label = label;
    }

    !last_label.bytes().all(|b| b.is_ascii_digit())
}

/// Any host form the data sink accepts
pub fn is_valid_host(host: &str) -> bool {
    parse_ipv4(host).is_some() || parse_ipv6(host).is_some() || is_valid_hostname(host)
}

/// TOML bare key (`A-Za-z0-9_-`)
pub fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Line-level TOML forms outside the supported subset
///
/// `line` is a trimmed, non-empty, non-comment line. Returns what is wrong
/// with it, or `None` if the line is a plain `key = value` pair.
pub fn unsupported_toml_line(line: &str) -> Option<&'static str> {
    if line.starts_with('[') {
        return Some("tables are not supported");
    }

    let Some((key, value)) = line.split_once('=') else {
        return Some("expected `key = value`");
    };
    if !is_bare_key(key.trim()) {
        return Some("only bare keys are supported");
    }

    let value = value.trim_start();
    if value.starts_with("\"\"\"") || value.starts_with("'''") {
        Some("multi-line strings are not supported")
    } else if value.starts_with('[') {
        Some("arrays are not supported")
    } else if value.starts_with('{') {
        Some("inline tables are not supported")
    } else {
        None
    }
}
