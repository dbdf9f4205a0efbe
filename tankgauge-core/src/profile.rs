//! Graduated Color Bands for the Relative Fill Level
//!
//! Home-automation front ends color a value by looking up the greatest
//! association threshold at or below it. The fill level uses five bands,
//! from bad to good:
//!
//! ```text
//! threshold │  0 %    20 %     40 %     60 %         80 %
//! color     │  red    orange   yellow   light green  green
//! ```
//!
//! The profile also carries the display format of the relative level
//! (one decimal, `" %"` suffix, stored with 2 digits) so every consumer
//! renders it the same way.
//!
//! ```rust
//! use tankgauge_core::ColorBandProfile;
//!
//! let profile = ColorBandProfile::default();
//! assert_eq!(profile.band_for(72.5).color, 0x9DFF00);
//! assert_eq!(profile.label(72.5).to_string(), "72.5 %");
//! ```

use core::fmt;

use crate::constants::{
    presentation::{
        BAND_COLORS, BAND_COUNT, BAND_THRESHOLDS_PCT, PERCENT_DISPLAY_DECIMALS, PERCENT_FORMAT,
        PERCENT_SUFFIX, STORED_DIGITS,
    },
    tank::FULL_TANK_PCT,
};

/// One threshold of the graduated scale
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorBand {
    /// Lowest percent shown in this color
    pub threshold_percent: f64,
    /// RGB color code
    pub color: u32,
}

/// Five-band color scale plus display format
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBandProfile {
    bands: [ColorBand; BAND_COUNT],
    format: &'static str,
    suffix: &'static str,
    digits: u8,
}

impl Default for ColorBandProfile {
    fn default() -> Self {
        Self::graduated()
    }
}

impl ColorBandProfile {
    /// Standard red-to-green scale at 0/20/40/60/80 %
    pub const fn graduated() -> Self {
        let mut bands = [ColorBand { threshold_percent: 0.0, color: 0 }; BAND_COUNT];
        let mut i = 0;
        while i < BAND_COUNT {
            bands[i] = ColorBand {
                threshold_percent: BAND_THRESHOLDS_PCT[i],
                color: BAND_COLORS[i],
            };
            i += 1;
        }

        Self {
            bands,
            format: PERCENT_FORMAT,
            suffix: PERCENT_SUFFIX,
            digits: STORED_DIGITS,
        }
    }

    /// Bands in ascending threshold order
    pub fn bands(&self) -> &[ColorBand; BAND_COUNT] {
        &self.bands
    }

    /// printf-style format of a band value
    pub fn format(&self) -> &'static str {
        self.format
    }

    /// Unit suffix
    pub fn suffix(&self) -> &'static str {
        self.suffix
    }

    /// Decimal places stored for the value
    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// Index of the band a percent falls into
    ///
    /// Greatest threshold at or below `percent`; negative and NaN values
    /// land in the lowest band, anything from 80 % up in the highest.
    pub fn band_index(&self, percent: f64) -> usize {
        self.bands
            .iter()
            .rposition(|band| band.threshold_percent <= percent)
            .unwrap_or(0)
    }

    /// Band a percent falls into
    pub fn band_for(&self, percent: f64) -> ColorBand {
        self.bands[self.band_index(percent)]
    }

    /// Render a percent the way the host displays it
    pub fn label(&self, percent: f64) -> PercentLabel {
        PercentLabel {
            percent,
            suffix: self.suffix,
        }
    }
}

/// Clamp a percent to `[0, 100]` for presentation
///
/// Conversions never clamp, so over- and under-range readings stay visible
/// in published values; use this only where a bounded gauge is drawn.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, FULL_TANK_PCT)
}

/// Display adapter for a percent, e.g. `72.5 %`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentLabel {
    percent: f64,
    suffix: &'static str,
}

impl fmt::Display for PercentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}{}", PERCENT_DISPLAY_DECIMALS, self.percent, self.suffix)
    }
}
