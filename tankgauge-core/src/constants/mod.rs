//! Constants for TankGauge Core
//!
//! Centralized, documented constants used throughout the conversion engine.
//! Defaults mirror the values the host plugin ships with, so a fresh
//! installation behaves the same with or without explicit configuration.
//!
//! ## Organization
//!
//! - **Tank**: default tank geometry and sensor mounting
//! - **Presentation**: color bands and display formats for published values
//! - **Buffers**: fixed capacities for allocation-free storage
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units

/// Default tank geometry, sensor mounting and rounding.
pub mod tank;

/// Color bands and display formats for the relative fill level.
pub mod presentation;

/// Fixed capacities for heapless storage.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use tank::{
    DEFAULT_MAX_FILL_HEIGHT_CM, DEFAULT_SENSOR_DISTANCE_CM, DEFAULT_TANK_CAPACITY_L,
    ROUNDING_DECIMALS,
};

pub use presentation::{BAND_COUNT, BAND_THRESHOLDS_PCT, BAND_COLORS};

pub use buffers::MAX_BREAKPOINTS;
