//! Installed capacity scaling
//!
//! Integer-only conversions between raw sensor counts, watts and the share
//! of installed capacity. Results never exceed the installed capacity.

use sunmeter_config::WattPeak;

/// Utilisation at full installed capacity, in per mille
pub const PERMILLE_FULL: u16 = 1000;

/// Errors from scaling raw readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScaleError {
    /// Sensor reported a full scale of zero
    ZeroFullScale,
}

/// Share of installed capacity in per mille (0-1000), saturating
pub fn utilisation_permille(capacity: WattPeak, power_w: u32) -> u16 {
    let permille = u64::from(power_w) * u64::from(PERMILLE_FULL) / u64::from(capacity.watts());
    permille.min(u64::from(PERMILLE_FULL)) as u16
}

/// Share of installed capacity in percent (0-100), saturating
pub fn utilisation_percent(capacity: WattPeak, power_w: u32) -> u8 {
    (utilisation_permille(capacity, power_w) / 10) as u8
}

/// Map a raw sensor count onto watts
///
/// `raw_full_scale` is the count the sensor reports at installed capacity;
/// larger counts are clamped to it.
pub fn scale_raw(capacity: WattPeak, raw: u32, raw_full_scale: u32) -> Result<u32, ScaleError> {
    if raw_full_scale == 0 {
        return Err(ScaleError::ZeroFullScale);
    }

    let raw = raw.min(raw_full_scale);
    let watts = u64::from(raw) * u64::from(capacity.watts()) / u64::from(raw_full_scale);
    // raw <= full scale, so watts <= capacity
    Ok(watts as u32)
}
