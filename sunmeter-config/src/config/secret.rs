//! Redacting wrapper for credentials

use core::fmt;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placeholder printed instead of a secret value
pub const REDACTED: &str = "<redacted>";

/// Bounded secret text that never shows up in formatted output
///
/// `Debug`, `Display` and `defmt::Format` all print [`REDACTED`]. The value
/// is only reachable through [`Secret::expose`].
#[derive(Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Secret<const N: usize>(String<N>);

impl<const N: usize> Secret<N> {
    /// Wrap an already bounded string
    pub const fn new(value: String<N>) -> Self {
        Self(value)
    }

    /// Copy `value` into a secret, failing if it exceeds `N` bytes
    #[allow(clippy::result_unit_err)]
    pub fn try_from_str(value: &str) -> Result<Self, ()> {
        String::try_from(value).map(Self)
    }

    /// Access the secret value
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> fmt::Debug for Secret<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<const N: usize> fmt::Display for Secret<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for Secret<N> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "<redacted>")
    }
}
