//! Shared tank fixtures for integration tests
//!
//! Realistic configurations that show up in the field, plus an
//! approximate comparison helper for values that pass through two roundings.

#![allow(dead_code)]

use tankgauge_core::{RawBreakpoint, TankConfig};

/// Tolerance after two 2-decimal roundings
pub const ROUNDING_TOLERANCE: f64 = 0.01;

/// Default upright tank: 120 cm, sensor 17 cm above full, 3144 liters
pub fn upright_tank() -> TankConfig {
    TankConfig::linear(120.0, 17.0, 3144.0)
}

/// Three-point calibration used throughout the scenarios
pub const SCENARIO_BREAKPOINTS: [RawBreakpoint; 3] = [
    RawBreakpoint::new(0.0, 0.0),
    RawBreakpoint::new(50.0, 1000.0),
    RawBreakpoint::new(100.0, 3000.0),
];

/// Calibrated tank with the sensor mounted flush at 100 cm
///
/// Height equals `100 - distance`, which keeps scenarios readable.
pub fn calibrated_tank() -> TankConfig {
    TankConfig::table(100.0, 0.0, 3000.0, &SCENARIO_BREAKPOINTS).expect("fixture fits")
}

/// Lying cylinder, 150 cm diameter, 5000 liters, measured every 25 cm
///
/// The bottom was not measured, so parsing adds the zero sentinel.
pub fn lying_cylinder() -> TankConfig {
    TankConfig::table(
        150.0,
        20.0,
        5000.0,
        &[
            RawBreakpoint::new(25.0, 380.0),
            RawBreakpoint::new(50.0, 1040.0),
            RawBreakpoint::new(75.0, 1840.0),
            RawBreakpoint::new(100.0, 2690.0),
            RawBreakpoint::new(125.0, 3540.0),
            RawBreakpoint::new(150.0, 4330.0),
            RawBreakpoint::new(175.0, 5000.0),
        ],
    )
    .expect("fixture fits")
}

/// Worst-case error of a linear volume caused by rounding the per-cm rate
pub fn rate_rounding_bound(height_cm: f64) -> f64 {
    0.005 * height_cm.abs() + ROUNDING_TOLERANCE
}

/// Distance that produces `height_cm` for `config`
pub fn distance_for_height(config: &TankConfig, height_cm: f64) -> f64 {
    config.max_fill_height_cm + config.sensor_distance_cm - height_cm
}

/// Assert two values agree within rounding tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= ROUNDING_TOLERANCE + 1e-9,
        "expected {expected}, got {actual}"
    );
}
