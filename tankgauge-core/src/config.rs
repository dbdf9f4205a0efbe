//! Tank Configuration
//!
//! Everything the engine needs to know about a tank, supplied by the caller
//! on every conversion. Nothing here is cached: a user editing the
//! calibration table between two samples sees the new table on the next one.
//!
//! ```rust
//! use tankgauge_core::{RawBreakpoint, TankConfig};
//!
//! // Upright tank, 120 cm high when full, sensor 17 cm above that
//! let linear = TankConfig::linear(120.0, 17.0, 3144.0);
//! assert!(linear.validate().is_ok());
//!
//! // Lying cylinder, calibrated by hand
//! let table = TankConfig::table(120.0, 17.0, 3000.0, &[
//!     RawBreakpoint::new(50.0, 1000.0),
//!     RawBreakpoint::new(100.0, 3000.0),
//! ])?;
//! assert!(table.validate().is_ok());
//! # Ok::<(), tankgauge_core::ConversionError>(())
//! ```

use heapless::Vec;

use crate::{
    calibration::{CalibrationTable, RawBreakpoint},
    constants::{
        buffers::MAX_BREAKPOINTS,
        tank::{DEFAULT_MAX_FILL_HEIGHT_CM, DEFAULT_SENSOR_DISTANCE_CM, DEFAULT_TANK_CAPACITY_L},
    },
    errors::{ConversionError, TankResult},
    math::check_finite,
};

/// Tank geometry model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TankType {
    /// Volume proportional to fill height
    #[default]
    Linear,
    /// Volume interpolated from a calibration table
    Table,
}

/// How breakpoint values are taken from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BreakpointPrecision {
    /// Whole-number segment deltas, as existing installations compute them
    #[default]
    Legacy,
    /// Keep fractional centimeters and liters
    Exact,
}

/// Static tank parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TankConfig {
    /// Fill height of a full tank, from the tank bottom (cm)
    pub max_fill_height_cm: f64,

    /// Gap between the sensor and the full-tank reference point (cm)
    pub sensor_distance_cm: f64,

    /// Total tank volume (liters)
    pub tank_capacity_l: f64,

    /// Geometry model
    pub tank_type: TankType,

    /// Raw calibration entries, only read for [`TankType::Table`]
    pub calibration: Vec<RawBreakpoint, MAX_BREAKPOINTS>,

    /// Truncation policy for calibration entries
    pub precision: BreakpointPrecision,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self::linear(
            DEFAULT_MAX_FILL_HEIGHT_CM,
            DEFAULT_SENSOR_DISTANCE_CM,
            DEFAULT_TANK_CAPACITY_L,
        )
    }
}

impl TankConfig {
    /// Configuration for a tank with uniform cross-section
    pub fn linear(max_fill_height_cm: f64, sensor_distance_cm: f64, tank_capacity_l: f64) -> Self {
        Self {
            max_fill_height_cm,
            sensor_distance_cm,
            tank_capacity_l,
            tank_type: TankType::Linear,
            calibration: Vec::new(),
            precision: BreakpointPrecision::Legacy,
        }
    }

    /// Configuration for a calibrated tank
    ///
    /// Fails only if the table would not fit [`MAX_BREAKPOINTS`] once the
    /// `{0, 0}` sentinel is prepended, which happens when the first level
    /// lies above 0 cm. The entries themselves are checked by
    /// [`validate`](Self::validate).
    pub fn table(
        max_fill_height_cm: f64,
        sensor_distance_cm: f64,
        tank_capacity_l: f64,
        calibration: &[RawBreakpoint],
    ) -> TankResult<Self> {
        let needs_sentinel = calibration
            .first()
            .and_then(|point| point.level_cm)
            .is_some_and(|level_cm| level_cm > 0.0);
        let room = MAX_BREAKPOINTS - usize::from(needs_sentinel);
        if calibration.len() > room {
            return Err(ConversionError::MalformedTable {
                entry: room,
                reason: "too many breakpoints",
            });
        }

        let calibration = Vec::from_slice(calibration).map_err(|_| ConversionError::MalformedTable {
            entry: MAX_BREAKPOINTS,
            reason: "too many breakpoints",
        })?;

        Ok(Self {
            max_fill_height_cm,
            sensor_distance_cm,
            tank_capacity_l,
            tank_type: TankType::Table,
            calibration,
            precision: BreakpointPrecision::Legacy,
        })
    }

    /// Use a different breakpoint precision
    pub fn with_precision(mut self, precision: BreakpointPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Parse the configured calibration entries
    pub fn calibration_table(&self) -> TankResult<CalibrationTable> {
        CalibrationTable::parse(&self.calibration, self.precision)
    }

    /// Check the configuration before converting with it
    ///
    /// Catches every degenerate setup the conversion would otherwise trip
    /// over: non-finite numbers, zero capacity, zero fill height for linear
    /// tanks, and missing or malformed calibration tables.
    pub fn validate(&self) -> TankResult<()> {
        check_finite(self.max_fill_height_cm, "max_fill_height")?;
        check_finite(self.sensor_distance_cm, "sensor_distance")?;
        check_finite(self.tank_capacity_l, "tank_capacity")?;

        if self.tank_capacity_l == 0.0 {
            return Err(ConversionError::DivisionByZero { parameter: "tank_capacity" });
        }

        match self.tank_type {
            TankType::Linear => {
                if self.max_fill_height_cm == 0.0 {
                    return Err(ConversionError::DivisionByZero { parameter: "max_fill_height" });
                }
            }
            TankType::Table => {
                let table = self.calibration_table()?;
                if table.is_empty() {
                    return Err(ConversionError::MalformedTable {
                        entry: 0,
                        reason: "calibration table is empty",
                    });
                }
            }
        }

        Ok(())
    }
}
