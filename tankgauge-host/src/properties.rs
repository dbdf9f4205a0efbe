//! Instance properties
//!
//! The host stores the user-facing configuration of a tank instance as a
//! flat JSON object with PascalCase keys. Missing keys fall back to their
//! defaults, so an instance created before a property existed still loads.
//!
//! ```json
//! {
//!   "FillHeight": 12345,
//!   "ArchiveId": 0,
//!   "UpdateInterval": 180,
//!   "MaxFillHeight": 120,
//!   "SensorDistance": 17,
//!   "TankCapacity": 3144,
//!   "TankType": "linear",
//!   "OilLevels": "[{\"OilLevel\": 50, \"Liters\": 1000}]",
//!   "VariablePrefix": "oil_",
//!   "Debugging": false
//! }
//! ```
//!
//! `OilLevels` is itself a JSON document (a list of `{OilLevel, Liters}`
//! rows, as the host's list editor saves it) embedded as a string.

use std::time::Duration;

use heapless::Vec as BoundedVec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tankgauge_core::{
    constants::{
        buffers::MAX_BREAKPOINTS,
        tank::{DEFAULT_MAX_FILL_HEIGHT_CM, DEFAULT_SENSOR_DISTANCE_CM, DEFAULT_TANK_CAPACITY_L},
    },
    BreakpointPrecision, ConversionError, RawBreakpoint, TankConfig, TankResult, TankType,
};

use crate::{ports::ObjectId, HostError, HostResult};

/// Default update interval (seconds)
pub const DEFAULT_UPDATE_INTERVAL_S: u32 = 180;

/// Default prefix of profile names
pub const DEFAULT_VARIABLE_PREFIX: &str = "oil_";

/// `TankType` value selecting the linear model; anything else is a table
pub const LINEAR_TANK_TYPE: &str = "linear";

const LEVEL_KEY: &str = "OilLevel";
const LITERS_KEY: &str = "Liters";

/// User configuration of one tank instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TankProperties {
    /// Variable holding the measured distance (cm), `0` if unset
    pub fill_height: ObjectId,
    /// Archive instance logging the published values, `0` if unset
    pub archive_id: ObjectId,
    /// Seconds between updates, `0` disables the timer
    pub update_interval: u32,
    /// Fill height of a full tank (cm)
    pub max_fill_height: i32,
    /// Gap between sensor and full-tank level (cm)
    pub sensor_distance: i32,
    /// Total volume (liters)
    pub tank_capacity: i32,
    /// `"linear"` or a calibration table
    pub tank_type: String,
    /// Calibration rows as an embedded JSON list
    pub oil_levels: String,
    /// Prefix of the profile names
    pub variable_prefix: String,
    /// Verbose logging for this instance
    pub debugging: bool,
}

impl Default for TankProperties {
    fn default() -> Self {
        Self {
            fill_height: 0,
            archive_id: 0,
            update_interval: DEFAULT_UPDATE_INTERVAL_S,
            max_fill_height: DEFAULT_MAX_FILL_HEIGHT_CM as i32,
            sensor_distance: DEFAULT_SENSOR_DISTANCE_CM as i32,
            tank_capacity: DEFAULT_TANK_CAPACITY_L as i32,
            tank_type: LINEAR_TANK_TYPE.to_string(),
            oil_levels: String::new(),
            variable_prefix: DEFAULT_VARIABLE_PREFIX.to_string(),
            debugging: false,
        }
    }
}

impl TankProperties {
    /// Decode properties as stored by the host
    pub fn from_json(json: &str) -> HostResult<Self> {
        serde_json::from_str(json).map_err(|e| HostError::Properties(e.to_string()))
    }

    /// Encode properties for the host
    pub fn to_json(&self) -> HostResult<String> {
        serde_json::to_string(self).map_err(|e| HostError::Properties(e.to_string()))
    }

    /// Geometry model selected by `TankType`
    pub fn tank_type(&self) -> TankType {
        if self.tank_type == LINEAR_TANK_TYPE {
            TankType::Linear
        } else {
            TankType::Table
        }
    }

    /// Period of the update timer, zero when disabled
    pub fn timer_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.update_interval))
    }

    /// Engine configuration for these properties
    ///
    /// `OilLevels` is only decoded for table tanks; a linear tank ignores
    /// whatever the list editor still holds.
    pub fn to_tank_config(&self) -> TankResult<TankConfig> {
        let tank_type = self.tank_type();
        let calibration = match tank_type {
            TankType::Linear => BoundedVec::new(),
            TankType::Table => decode_oil_levels(&self.oil_levels)?,
        };

        Ok(TankConfig {
            max_fill_height_cm: f64::from(self.max_fill_height),
            sensor_distance_cm: f64::from(self.sensor_distance),
            tank_capacity_l: f64::from(self.tank_capacity),
            tank_type,
            calibration,
            precision: BreakpointPrecision::Legacy,
        })
    }
}

/// Decode the embedded `OilLevels` list into raw calibration entries
///
/// Levels and volumes may be JSON numbers or numeric strings. A missing or
/// non-numeric field becomes `None` and is reported with its entry index
/// when the table is parsed. An empty string is an empty table.
pub fn decode_oil_levels(json: &str) -> TankResult<BoundedVec<RawBreakpoint, MAX_BREAKPOINTS>> {
    let mut raw = BoundedVec::new();

    let json = json.trim();
    if json.is_empty() {
        return Ok(raw);
    }

    let rows: Vec<Value> = serde_json::from_str(json).map_err(|e| {
        log::warn!("OilLevels is not a JSON list: {e}");
        ConversionError::MalformedTable {
            entry: 0,
            reason: "calibration data is not a list",
        }
    })?;

    for (entry, row) in rows.iter().enumerate() {
        let point = RawBreakpoint {
            level_cm: numeric_field(row, LEVEL_KEY),
            liters: numeric_field(row, LITERS_KEY),
        };
        raw.push(point).map_err(|_| ConversionError::MalformedTable {
            entry,
            reason: "too many breakpoints",
        })?;
    }

    Ok(raw)
}

fn numeric_field(row: &Value, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
