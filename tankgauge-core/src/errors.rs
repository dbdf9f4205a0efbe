//! Error Types for Tank Level Conversion
//!
//! ## Design Philosophy
//!
//! Conversion errors follow the same rules as the rest of the engine:
//!
//! 1. **Small Size**: every variant is a handful of scalars, so errors can be
//!    returned from the hot path and queued by the caller.
//!
//! 2. **No Heap Allocation**: messages are `&'static str`, never `String`.
//!
//! 3. **Copy Semantics**: errors are `Copy` and cheap to hand around.
//!
//! 4. **Actionable Information**: each variant carries the values needed to
//!    tell a miswired sensor from a bad calibration table.
//!
//! ## Error Categories
//!
//! ### Configuration
//! - `MalformedTable`: calibration data cannot be turned into breakpoints
//! - `DivisionByZero`: zero capacity, or zero fill height for a linear tank
//! - `InvalidValue`: NaN or infinite distance / configuration value
//!
//! ### Measurement
//! - `LevelOutOfRange`: the computed height lies outside the calibrated range
//!
//! None of these are retried by the engine. A guessed volume would be worse
//! than a skipped update, so the caller decides what to do:
//!
//! ```rust
//! use tankgauge_core::{ConversionError, TankConfig, TankReading};
//!
//! fn on_sample(distance: f64, config: &TankConfig) {
//!     match TankReading::default().convert(distance, config) {
//!         Ok(result) => {
//!             // publish result.volume_liters and result.percent
//!         }
//!         Err(ConversionError::LevelOutOfRange { .. }) => {
//!             // check sensor mounting against the calibration table
//!         }
//!         Err(_) => {
//!             // configuration problem - report and skip this cycle
//!         }
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for conversion operations
pub type TankResult<T> = Result<T, ConversionError>;

/// Conversion errors - kept small and `Copy`
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConversionError {
    /// Calibration data cannot be decoded into ascending breakpoints
    #[error("Malformed calibration table at entry {entry}: {reason}")]
    MalformedTable {
        /// Index of the offending entry (entry count for whole-table problems)
        entry: usize,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Computed height cannot be bracketed by the calibration table
    #[error("Level {height_cm} cm outside calibrated range [{min_level_cm}, {max_level_cm}) cm")]
    LevelOutOfRange {
        /// Fill height computed from the distance sample
        height_cm: f64,
        /// Lowest calibrated level
        min_level_cm: f64,
        /// Highest calibrated level (exclusive)
        max_level_cm: f64,
    },

    /// Degenerate configuration that would divide by zero
    #[error("Division by zero: {parameter} must not be 0")]
    DivisionByZero {
        /// Name of the configuration parameter that is zero
        parameter: &'static str,
    },

    /// Value makes no numeric sense (NaN, infinity)
    #[error("Invalid value for {parameter}: not a finite number")]
    InvalidValue {
        /// Name of the offending input
        parameter: &'static str,
    },
}

impl ConversionError {
    /// True for errors caused by configuration rather than by the sample
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::LevelOutOfRange { .. })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConversionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::MalformedTable { entry, reason } =>
                defmt::write!(fmt, "Malformed table entry {}: {}", entry, reason),
            Self::LevelOutOfRange { height_cm, min_level_cm, max_level_cm } =>
                defmt::write!(fmt, "Level {} cm outside [{}, {})", height_cm, min_level_cm, max_level_cm),
            Self::DivisionByZero { parameter } =>
                defmt::write!(fmt, "Division by zero: {}", parameter),
            Self::InvalidValue { parameter } =>
                defmt::write!(fmt, "Invalid value: {}", parameter),
        }
    }
}
