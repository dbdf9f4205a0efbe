//! Buffer Sizes
//!
//! Calibration tables are stored in fixed-capacity `heapless` vectors so
//! the engine never allocates.

/// Maximum number of breakpoints in a calibration table, sentinel included.
///
/// Manual calibration is done in 5-10 cm steps; even a 3 m tall tank
/// measured every 5 cm stays well below this.
/// Memory: 64 entries × 16 bytes = 1 KB
pub const MAX_BREAKPOINTS: usize = 64;
