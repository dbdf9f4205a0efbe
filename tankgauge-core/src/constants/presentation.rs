//! Presentation Constants
//!
//! The relative fill level is published with a graduated color scale,
//! from bad (red, nearly empty) to good (green, nearly full).

// ===== COLOR BANDS =====

/// Number of color bands in the graduated scale.
pub const BAND_COUNT: usize = 5;

/// Lower threshold of each band (% of capacity), ascending.
pub const BAND_THRESHOLDS_PCT: [f64; BAND_COUNT] = [0.0, 20.0, 40.0, 60.0, 80.0];

/// Red, for a nearly empty tank.
pub const COLOR_RED: u32 = 0xFF0000;

/// Orange.
pub const COLOR_ORANGE: u32 = 0xFF9D00;

/// Yellow.
pub const COLOR_YELLOW: u32 = 0xFFF700;

/// Light green.
pub const COLOR_LIGHT_GREEN: u32 = 0x9DFF00;

/// Green, for a nearly full tank.
pub const COLOR_GREEN: u32 = 0x46F700;

/// Band colors (RGB), ordered like [`BAND_THRESHOLDS_PCT`].
pub const BAND_COLORS: [u32; BAND_COUNT] = [
    COLOR_RED,
    COLOR_ORANGE,
    COLOR_YELLOW,
    COLOR_LIGHT_GREEN,
    COLOR_GREEN,
];

// ===== DISPLAY FORMATS =====

/// printf-style format hosts use to render a band value.
pub const PERCENT_FORMAT: &str = "%.1f";

/// Decimal places shown when rendering a percentage.
pub const PERCENT_DISPLAY_DECIMALS: usize = 1;

/// Suffix appended to the relative fill level.
pub const PERCENT_SUFFIX: &str = " %";

/// Suffix appended to the absolute fill level.
pub const LITERS_SUFFIX: &str = " Liter";

/// Decimal places stored for published values.
pub const STORED_DIGITS: u8 = 2;
