//! Numeric Helpers Shared by the Conversion Steps
//!
//! ## Rounding Policy
//!
//! Every named step of a conversion rounds its result to
//! [`ROUNDING_DECIMALS`] places, half away from zero. The order matters:
//!
//! ```text
//! rate   = round(delta_liters / delta_cm, 2)
//! volume = round(rate * height, 2)          // not round(delta_liters * height / delta_cm)
//! ```
//!
//! Installations compare published values against older readings, so the
//! sequence is kept exactly as it has always been computed.
//!
//! ## Finite Checks
//!
//! Inputs come from sensors and hand-edited configuration. NaN and infinity
//! are rejected up front with [`ConversionError::InvalidValue`] instead of
//! propagating silently into published values.

use crate::{
    constants::tank::ROUNDING_DECIMALS,
    errors::{ConversionError, TankResult},
};

/// Round to `decimals` places, half away from zero
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = (0..decimals).fold(1.0, |acc, _| acc * 10.0);
    libm::round(value * scale) / scale
}

/// Round to the engine's standard precision
#[inline]
pub fn round2(value: f64) -> f64 {
    round_to(value, ROUNDING_DECIMALS)
}

/// Truncate toward zero, like an integer cast
#[inline]
pub fn truncate(value: f64) -> f64 {
    libm::trunc(value)
}

/// Reject NaN and infinities
pub fn check_finite(value: f64, parameter: &'static str) -> TankResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConversionError::InvalidValue { parameter })
    }
}

/// Divide, refusing a zero divisor
pub fn checked_div(numerator: f64, divisor: f64, parameter: &'static str) -> TankResult<f64> {
    if divisor == 0.0 {
        return Err(ConversionError::DivisionByZero { parameter });
    }
    Ok(numerator / divisor)
}
