//! Data sink host parsing
//!
//! A host is accepted as an IPv4 literal, an IPv6 literal (bare or wrapped
//! in brackets) or an RFC 1123 hostname. Nothing here resolves names; a
//! hostname is only checked for shape.

use core::fmt;
use core::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use core::str::FromStr;

use heapless::String;

use super::error::ConfigError;
use super::rules::{is_valid_hostname, parse_ipv4, parse_ipv6};

pub use super::rules::{MAX_HOST_LEN, MAX_LABEL_LEN};

/// Validated data sink address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataHost {
    /// IPv4 literal, e.g. `192.168.1.2`
    Ipv4(Ipv4Addr),
    /// IPv6 literal, e.g. `fd00::2`
    Ipv6(Ipv6Addr),
    /// DNS hostname, resolved by the network stack before use
    Name(String<MAX_HOST_LEN>),
}

impl DataHost {
    /// Parse and validate a host string
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        if input.is_empty() {
            return Err(ConfigError::InvalidHost);
        }

        if let Some(addr) = parse_ipv4(input) {
            return Ok(DataHost::Ipv4(addr));
        }
        if let Some(addr) = parse_ipv6(input) {
            return Ok(DataHost::Ipv6(addr));
        }

        if is_valid_hostname(input) {
            let name = String::try_from(input).map_err(|_| ConfigError::InvalidHost)?;
            return Ok(DataHost::Name(name));
        }

        Err(ConfigError::InvalidHost)
    }

    /// IP address if the host is a literal
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            DataHost::Ipv4(addr) => Some(IpAddr::V4(*addr)),
            DataHost::Ipv6(addr) => Some(IpAddr::V6(*addr)),
            DataHost::Name(_) => None,
        }
    }

    /// Hostname if the host needs resolving
    pub fn name(&self) -> Option<&str> {
        match self {
            DataHost::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for DataHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataHost::Ipv4(addr) => write!(f, "{}", addr),
            DataHost::Ipv6(addr) => write!(f, "[{}]", addr),
            DataHost::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataHost {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", defmt::Display2Format(self))
    }
}

impl FromStr for DataHost {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
