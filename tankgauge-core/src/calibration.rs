//! Calibration Tables for Irregular Tanks
//!
//! ## Motivation
//!
//! Only upright cylinders and boxes hold the same volume per centimeter at
//! every height. Lying cylinders, spherical ends, cellar tanks fitted
//! around pipes: for all of these the volume-over-height curve has to be
//! measured, usually by filling the tank in known steps and noting the
//! level. Those measurements become the breakpoints of a calibration table.
//!
//! ```text
//! level (cm) │  0     50     100
//! liters     │  0   1000    3000
//! ```
//!
//! ## Lookup
//!
//! A fill height is bracketed by the first breakpoint strictly above it
//! (`higher`) and the entry just before that (`lower`):
//!
//! ```text
//! lower.level_cm <= height < higher.level_cm
//! ```
//!
//! and the volume is interpolated linearly between the two. A height at or
//! above the last breakpoint cannot be bracketed and is reported as
//! [`ConversionError::LevelOutOfRange`]; the table does not extrapolate
//! upwards.
//!
//! ## Sentinel Breakpoint
//!
//! Users rarely measure the empty tank. When the first explicit breakpoint
//! lies above 0 cm, parsing prepends a `{0 cm, 0 L}` sentinel so the lowest
//! segment starts at the tank bottom and the lookup never needs a special
//! case. Heights below the lowest breakpoint extend the lowest segment
//! downwards.
//!
//! ## Precision
//!
//! Existing installations truncate breakpoint values to whole centimeters
//! and liters, but only inside the segment deltas. The bracket search and
//! the lower volume added back keep the configured values:
//!
//! ```text
//! rate   = round((int)higher.liters - (int)lower.liters)
//!               / ((int)higher.level - (int)lower.level), 2)
//! volume = lower.liters + round((height - (int)lower.level) * rate, 2)
//! ```
//!
//! [`BreakpointPrecision::Legacy`] reproduces that; [`BreakpointPrecision::Exact`]
//! drops the casts. Breakpoints are always stored as configured.
//!
//! ## Memory
//!
//! Breakpoints are stored inline in a `heapless::Vec` of
//! [`MAX_BREAKPOINTS`] entries (~1 KB), sentinel included.

use heapless::Vec;

use crate::{
    config::BreakpointPrecision,
    constants::buffers::MAX_BREAKPOINTS,
    errors::{ConversionError, TankResult},
    math::{round2, truncate},
};

/// Calibration entry as decoded from configuration, before validation
///
/// Fields are optional because configuration is hand-edited; a missing or
/// non-numeric value is kept as `None` and rejected by [`CalibrationTable::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawBreakpoint {
    /// Fill height from the tank bottom (cm)
    pub level_cm: Option<f64>,
    /// Volume at that height (liters)
    pub liters: Option<f64>,
}

impl RawBreakpoint {
    /// Fully specified entry
    pub const fn new(level_cm: f64, liters: f64) -> Self {
        Self {
            level_cm: Some(level_cm),
            liters: Some(liters),
        }
    }
}

/// Validated calibration point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationBreakpoint {
    /// Fill height from the tank bottom (cm)
    pub level_cm: f64,
    /// Volume at that height (liters)
    pub liters: f64,
}

impl CalibrationBreakpoint {
    /// Empty tank: no height, no volume
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a breakpoint
    pub const fn new(level_cm: f64, liters: f64) -> Self {
        Self { level_cm, liters }
    }
}

/// Ordered breakpoints, ascending by level, sentinel included
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    breakpoints: Vec<CalibrationBreakpoint, MAX_BREAKPOINTS>,
    /// Whether `breakpoints[0]` is the implicit `{0, 0}` entry
    has_sentinel: bool,
    precision: BreakpointPrecision,
}

impl CalibrationTable {
    /// Parse raw calibration entries into a table
    ///
    /// Every entry needs a finite level and volume, and levels must be
    /// strictly ascending. In [`BreakpointPrecision::Legacy`] they must
    /// also stay apart once truncated, or a segment would have zero width.
    /// An empty input
    /// yields an empty table; whether that is acceptable is up to
    /// [`TankConfig::validate`](crate::TankConfig::validate).
    pub fn parse(raw: &[RawBreakpoint], precision: BreakpointPrecision) -> TankResult<Self> {
        let mut breakpoints: Vec<CalibrationBreakpoint, MAX_BREAKPOINTS> = Vec::new();
        let mut has_sentinel = false;

        for (entry, point) in raw.iter().enumerate() {
            let breakpoint = Self::decode_entry(entry, point)?;

            if breakpoints.is_empty() && breakpoint.level_cm > 0.0 {
                // Capacity cannot be exceeded by the first push
                let _ = breakpoints.push(CalibrationBreakpoint::ZERO);
                has_sentinel = true;
            }

            if let Some(previous) = breakpoints.last() {
                if breakpoint.level_cm <= previous.level_cm {
                    return Err(ConversionError::MalformedTable {
                        entry,
                        reason: "levels are not strictly ascending",
                    });
                }
                if precision == BreakpointPrecision::Legacy
                    && truncate(breakpoint.level_cm) <= truncate(previous.level_cm)
                {
                    return Err(ConversionError::MalformedTable {
                        entry,
                        reason: "levels collide in whole centimeters",
                    });
                }
            }

            breakpoints.push(breakpoint).map_err(|_| ConversionError::MalformedTable {
                entry,
                reason: "too many breakpoints",
            })?;
        }

        log_debug!(
            "Parsed calibration table: {} breakpoints (sentinel: {})",
            breakpoints.len(),
            has_sentinel
        );

        Ok(Self {
            breakpoints,
            has_sentinel,
            precision,
        })
    }

    /// Build a table from already validated breakpoints, keeping fractions
    pub fn from_breakpoints(points: &[CalibrationBreakpoint]) -> TankResult<Self> {
        let mut raw: Vec<RawBreakpoint, MAX_BREAKPOINTS> = Vec::new();
        for (entry, point) in points.iter().enumerate() {
            raw.push(RawBreakpoint::new(point.level_cm, point.liters))
                .map_err(|_| ConversionError::MalformedTable {
                    entry,
                    reason: "too many breakpoints",
                })?;
        }
        Self::parse(&raw, BreakpointPrecision::Exact)
    }

    fn decode_entry(entry: usize, point: &RawBreakpoint) -> TankResult<CalibrationBreakpoint> {
        let level_cm = point.level_cm.ok_or(ConversionError::MalformedTable {
            entry,
            reason: "missing level",
        })?;
        let liters = point.liters.ok_or(ConversionError::MalformedTable {
            entry,
            reason: "missing liters",
        })?;

        if !level_cm.is_finite() || !liters.is_finite() {
            return Err(ConversionError::MalformedTable {
                entry,
                reason: "value is not a finite number",
            });
        }

        Ok(CalibrationBreakpoint::new(level_cm, liters))
    }

    /// All breakpoints, sentinel included
    pub fn breakpoints(&self) -> &[CalibrationBreakpoint] {
        &self.breakpoints
    }

    /// Breakpoints as configured, without the sentinel
    pub fn explicit_breakpoints(&self) -> &[CalibrationBreakpoint] {
        if self.has_sentinel {
            &self.breakpoints[1..]
        } else {
            &self.breakpoints
        }
    }

    /// How segment deltas are evaluated
    pub fn precision(&self) -> BreakpointPrecision {
        self.precision
    }

    /// Whether a `{0, 0}` sentinel was prepended
    pub fn has_sentinel(&self) -> bool {
        self.has_sentinel
    }

    /// Number of breakpoints, sentinel included
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// True when no breakpoints were configured
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Lowest and highest calibrated level (cm)
    pub fn bounds(&self) -> (f64, f64) {
        match (self.breakpoints.first(), self.breakpoints.last()) {
            (Some(first), Some(last)) => (first.level_cm, last.level_cm),
            _ => (0.0, 0.0),
        }
    }

    /// Find the `(lower, higher)` pair around a fill height
    pub fn bracket(&self, height_cm: f64) -> TankResult<(CalibrationBreakpoint, CalibrationBreakpoint)> {
        let points = self.breakpoints.as_slice();

        match points.iter().position(|point| point.level_cm > height_cm) {
            // Below the lowest breakpoint: extend the lowest segment
            Some(0) if points.len() >= 2 => Ok((points[0], points[1])),
            Some(idx) if idx > 0 => Ok((points[idx - 1], points[idx])),
            _ => {
                let (min_level_cm, max_level_cm) = self.bounds();
                log_warn!(
                    "Level {} cm is not covered by the calibration table [{}, {}) cm",
                    height_cm, min_level_cm, max_level_cm
                );
                Err(ConversionError::LevelOutOfRange {
                    height_cm,
                    min_level_cm,
                    max_level_cm,
                })
            }
        }
    }

    /// Interpolated volume at a fill height (liters)
    pub fn volume_at(&self, height_cm: f64) -> TankResult<f64> {
        let (lower, higher) = self.bracket(height_cm)?;
        Ok(self.interpolate(lower, higher, height_cm))
    }

    /// Linear interpolation between two breakpoints
    ///
    /// The per-cm rate is rounded before it is applied, and the product is
    /// rounded again; the lower volume is added as configured.
    fn interpolate(
        &self,
        lower: CalibrationBreakpoint,
        higher: CalibrationBreakpoint,
        height_cm: f64,
    ) -> f64 {
        let whole = |value: f64| match self.precision {
            BreakpointPrecision::Legacy => truncate(value),
            BreakpointPrecision::Exact => value,
        };

        let lower_level = whole(lower.level_cm);
        let liters_per_cm = round2(
            (whole(higher.liters) - whole(lower.liters)) / (whole(higher.level_cm) - lower_level),
        );
        lower.liters + round2((height_cm - lower_level) * liters_per_cm)
    }
}
