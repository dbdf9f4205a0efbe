//! Level-to-volume conversion engine for TankGauge
//!
//! Turns a raw ultrasonic distance reading into a tank fill level in
//! centimeters, liters and percent of capacity.
//! Designed to run on the same edge devices that read the sensor.
//!
//! Key constraints:
//! - No heap allocation (calibration tables live in fixed-capacity storage)
//! - Pure functions of their explicit inputs, safe to call from anywhere
//! - Bit-exact rounding compatible with existing installations
//!
//! ```no_run
//! use tankgauge_core::{TankConfig, TankReading};
//!
//! let config = TankConfig::linear(120.0, 17.0, 3144.0);
//! let reading = TankReading::default();
//!
//! match reading.convert(50.0, &config) {
//!     Ok(result) => {}, // result.volume_liters, result.percent, result.band
//!     Err(e) => {},     // Skip this update cycle
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Optional logging, compiled out without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod calibration;
pub mod config;
pub mod constants;
pub mod converter;
pub mod errors;
pub mod math;
pub mod profile;
pub mod reading;

// Public API
pub use calibration::{CalibrationBreakpoint, CalibrationTable, RawBreakpoint};
pub use config::{BreakpointPrecision, TankConfig, TankType};
pub use converter::LevelConverter;
pub use errors::{ConversionError, TankResult};
pub use profile::{clamp_percent, ColorBand, ColorBandProfile, PercentLabel};
pub use reading::{ConversionResult, TankReading};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
