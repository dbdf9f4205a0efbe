//! One Distance Sample In, One Tank Reading Out
//!
//! [`TankReading`] is the entry point callers use on every new sensor
//! sample. It validates the configuration, runs the conversion steps in
//! order and attaches the color band of the resulting percent:
//!
//! ```text
//! distance ─▶ height_cm ─▶ volume_liters ─▶ percent ─▶ band
//!              (always)     (linear/table)   (capacity)  (profile)
//! ```
//!
//! Either a complete [`ConversionResult`] comes back or a typed error;
//! nothing is partially computed, and nothing outside the call is touched.

use crate::{
    config::TankConfig,
    converter::LevelConverter,
    errors::TankResult,
    math::check_finite,
    profile::{ColorBand, ColorBandProfile},
};

/// Outcome of converting one distance sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionResult {
    /// Fill height from the tank bottom (cm)
    pub height_cm: f64,
    /// Oil volume (liters)
    pub volume_liters: f64,
    /// Volume relative to capacity (%, not clamped)
    pub percent: f64,
    /// Presentation band of `percent`
    pub band: ColorBand,
}

/// Conversion façade
#[derive(Debug, Clone, Copy, Default)]
pub struct TankReading {
    profile: ColorBandProfile,
}

impl TankReading {
    /// Color profile attached to results
    pub fn profile(&self) -> &ColorBandProfile {
        &self.profile
    }

    /// Convert a measured distance (cm) into a tank reading
    pub fn convert(&self, distance_cm: f64, config: &TankConfig) -> TankResult<ConversionResult> {
        check_finite(distance_cm, "distance")?;
        config.validate()?;

        let converter = LevelConverter::new(config);
        let height_cm = converter.height_from_distance(distance_cm);
        let volume_liters = converter.volume_from_height(height_cm)?;
        let percent = converter.percent_from_volume(volume_liters)?;
        let band = self.profile.band_for(percent);

        log_debug!(
            "Distance {} cm -> {} cm, {} L, {} %",
            distance_cm, height_cm, volume_liters, percent
        );

        Ok(ConversionResult {
            height_cm,
            volume_liters,
            percent,
            band,
        })
    }
}
