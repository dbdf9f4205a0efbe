//! Display profiles of the published variables
//!
//! Both profiles are named after the instance's variable prefix so several
//! tank instances can carry differently named profiles side by side:
//!
//! | Profile                       | Suffix     | Digits | Associations     |
//! |-------------------------------|------------|--------|------------------|
//! | `<prefix>oil_level_relative`  | `" %"`     | 2      | 5 color bands    |
//! | `<prefix>oil_level_absolute`  | `" Liter"` | 2      | none             |

use serde::{Deserialize, Serialize};

use tankgauge_core::{
    constants::presentation::{LITERS_SUFFIX, STORED_DIGITS},
    ColorBandProfile,
};

use crate::ports::VariableKind;

/// Profile name of the relative level, without prefix
pub const RELATIVE_PROFILE: &str = "oil_level_relative";

/// Profile name of the absolute level, without prefix
pub const ABSOLUTE_PROFILE: &str = "oil_level_absolute";

/// Threshold-to-color mapping shown by the host front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// Lowest value shown with this entry
    pub value: f64,
    /// printf-style format of the value
    pub format: String,
    /// RGB color code
    pub color: u32,
}

/// Host display profile for a variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableProfile {
    /// Full profile name, prefix included
    pub name: String,
    /// Value type the profile applies to
    pub kind: VariableKind,
    /// Text before the value
    pub prefix: String,
    /// Text after the value
    pub suffix: String,
    /// Decimal places
    pub digits: u8,
    /// Graduated colors, ascending by value
    pub associations: Vec<Association>,
}

/// Profile of the relative level, built from a color band profile
pub fn relative_profile(prefix: &str, bands: &ColorBandProfile) -> VariableProfile {
    VariableProfile {
        name: format!("{prefix}{RELATIVE_PROFILE}"),
        kind: VariableKind::Float,
        prefix: String::new(),
        suffix: bands.suffix().to_string(),
        digits: bands.digits(),
        associations: bands
            .bands()
            .iter()
            .map(|band| Association {
                value: band.threshold_percent,
                format: bands.format().to_string(),
                color: band.color,
            })
            .collect(),
    }
}

/// Profile of the absolute level
pub fn absolute_profile(prefix: &str) -> VariableProfile {
    VariableProfile {
        name: format!("{prefix}{ABSOLUTE_PROFILE}"),
        kind: VariableKind::Float,
        prefix: String::new(),
        suffix: LITERS_SUFFIX.to_string(),
        digits: STORED_DIGITS,
        associations: Vec::new(),
    }
}
