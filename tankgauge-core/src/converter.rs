//! Distance to Height to Volume to Percent
//!
//! ## Measurement Geometry
//!
//! The ultrasonic sensor sits above the tank and measures the distance down
//! to the oil surface. It is mounted `sensor_distance_cm` above the level
//! of a full tank:
//!
//! ```text
//!   ┌─ sensor ─┐
//!   │          │  sensor_distance_cm
//!   ├──────────┤  ── full tank ──────────┐
//!   │  distance│                         │
//!   │~~~~~~~~~~│  ── oil surface ──┐     │ max_fill_height_cm
//!   │          │  height_cm        │     │
//!   └──────────┘  ── bottom ───────┴─────┘
//!
//! height_cm = max_fill_height_cm - distance + sensor_distance_cm
//! ```
//!
//! The height is not clamped. A sensor reading beyond the bottom gives a
//! negative height, one inside the blind zone a height above full; both are
//! passed through so the published values show that something is off.
//!
//! ## Volume Models
//!
//! - **Linear**: a fixed number of liters per centimeter,
//!   `round(capacity / max_fill_height, 2)`, times the height.
//! - **Table**: piecewise linear interpolation over a
//!   [`CalibrationTable`], parsed fresh from the configuration on every call.
//!
//! ## Percent
//!
//! Always relative to the configured capacity, in both models, and not
//! clamped either: see [`clamp_percent`](crate::clamp_percent) for display.

use crate::{
    calibration::CalibrationTable,
    config::{TankConfig, TankType},
    errors::TankResult,
    math::{checked_div, round2},
};

/// Conversion steps for one tank configuration
#[derive(Debug, Clone, Copy)]
pub struct LevelConverter<'a> {
    config: &'a TankConfig,
}

impl<'a> LevelConverter<'a> {
    /// Bind the converter to a configuration
    pub fn new(config: &'a TankConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &TankConfig {
        self.config
    }

    /// Fill height from the tank bottom for a measured distance (cm)
    pub fn height_from_distance(&self, distance_cm: f64) -> f64 {
        self.config.max_fill_height_cm - distance_cm + self.config.sensor_distance_cm
    }

    /// Volume per centimeter of a linear tank, rounded to 2 places
    pub fn liters_per_cm(&self) -> TankResult<f64> {
        let rate = checked_div(
            self.config.tank_capacity_l,
            self.config.max_fill_height_cm,
            "max_fill_height",
        )?;
        Ok(round2(rate))
    }

    /// Volume at a fill height (liters)
    pub fn volume_from_height(&self, height_cm: f64) -> TankResult<f64> {
        match self.config.tank_type {
            TankType::Linear => Ok(round2(self.liters_per_cm()? * height_cm)),
            TankType::Table => {
                let table = self.config.calibration_table()?;
                Self::volume_from_table(&table, height_cm)
            }
        }
    }

    /// Volume at a fill height for an already parsed table (liters)
    pub fn volume_from_table(table: &CalibrationTable, height_cm: f64) -> TankResult<f64> {
        table.volume_at(height_cm)
    }

    /// Volume as percent of capacity, rounded to 2 places
    pub fn percent_from_volume(&self, liters: f64) -> TankResult<f64> {
        let fraction = checked_div(liters, self.config.tank_capacity_l, "tank_capacity")?;
        Ok(round2(fraction * 100.0))
    }
}
