//! Tank Geometry and Sensor Mounting Defaults
//!
//! Values a tank instance starts with before the user configures it.
//! They describe a common 3000 liter battery tank with an ultrasonic
//! sensor mounted above the filler neck.

// ===== TANK GEOMETRY =====

/// Default height of a full tank, measured from the tank bottom (cm).
///
/// Typical for upright plastic battery tanks.
pub const DEFAULT_MAX_FILL_HEIGHT_CM: f64 = 120.0;

/// Default total tank volume (liters).
pub const DEFAULT_TANK_CAPACITY_L: f64 = 3144.0;

// ===== SENSOR MOUNTING =====

/// Default gap between the sensor face and the full-tank reference point (cm).
///
/// Ultrasonic sensors cannot measure closer than their blind zone, so they
/// are mounted above the maximum fill level. The gap is added back when
/// converting a distance to a fill height.
pub const DEFAULT_SENSOR_DISTANCE_CM: f64 = 17.0;

// ===== NUMERIC POLICY =====

/// Decimal places kept at every rounding step.
///
/// Rates, volumes and percentages are all rounded to 2 places,
/// half away from zero, in a fixed order.
pub const ROUNDING_DECIMALS: u32 = 2;

/// Percent represented by a completely full tank.
pub const FULL_TANK_PCT: f64 = 100.0;
