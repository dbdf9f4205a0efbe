//! Home-Automation Host Integration for TankGauge
//!
//! ## Overview
//!
//! `tankgauge-core` converts one distance sample at a time and touches
//! nothing outside the call. A deployed oil tank monitor needs more than
//! that: user-editable instance properties, two published variables with
//! their display profiles, archive logging and a periodic update. This
//! crate supplies those pieces on top of the engine.
//!
//! ```text
//!  TankProperties ──▶ TankConfig ──┐
//!  (JSON, PascalCase)              ▼
//!  distance variable ──▶ TankReading::convert ──▶ Oil_Level_Absolute
//!                                              └─▶ Oil_Level_Relative
//!                                                   │
//!                                                   ▼
//!                                                ArchiveSink
//! ```
//!
//! ## Capabilities
//!
//! The host platform is reached through two traits in [`ports`]:
//! [`VariableStore`] for variables and profiles, [`ArchiveSink`] for
//! logging. [`MemoryStore`] and [`MemoryArchive`] implement both in
//! memory for tests and the command-line tool.
//!
//! ## Lifecycle
//!
//! ```rust
//! use tankgauge_host::{MemoryArchive, MemoryStore, OilTankInstance, TankProperties};
//!
//! let mut store = MemoryStore::new();
//! let sensor = store.insert_float(0, "Distance", 50.0);
//!
//! let properties = TankProperties {
//!     fill_height: sensor,
//!     ..TankProperties::default()
//! };
//!
//! let mut tank = OilTankInstance::new(1, properties, store, MemoryArchive::new());
//! let interval = tank.apply_changes()?;
//! assert_eq!(interval.as_secs(), 180);
//!
//! let result = tank.update()?;
//! assert_eq!(result.volume_liters, 2279.4);
//! # Ok::<(), tankgauge_host::HostError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod instance;
pub mod memory;
pub mod ports;
pub mod profiles;
pub mod properties;

pub use instance::{OilTankInstance, ABSOLUTE_VARIABLE, RELATIVE_VARIABLE};
pub use memory::{MemoryArchive, MemoryStore, Variable, VariableValue};
pub use ports::{ArchiveSink, ObjectId, VariableKind, VariableStore};
pub use profiles::{absolute_profile, relative_profile, Association, VariableProfile};
pub use properties::{decode_oil_levels, TankProperties};

use tankgauge_core::ConversionError;

/// Errors raised by the host integration
#[derive(Debug, thiserror_no_std::Error)]
pub enum HostError {
    /// Instance properties could not be decoded
    #[error("Invalid instance properties: {0}")]
    Properties(String),

    /// Conversion engine rejected the configuration or the sample
    #[error("{0}")]
    Conversion(#[from] ConversionError),

    /// No distance variable selected
    #[error("No distance source variable configured (FillHeight = 0)")]
    SourceNotConfigured,

    /// Variable id unknown to the store
    #[error("Variable #{0} does not exist")]
    VariableNotFound(ObjectId),

    /// Variable holds a value of another kind
    #[error("Variable {name} is not of type {expected:?}")]
    TypeMismatch {
        /// Variable name
        name: String,
        /// Kind the operation needs
        expected: VariableKind,
    },

    /// Archive instance id unknown to the host
    #[error("Archive instance #{0} does not exist")]
    ArchiveNotFound(ObjectId),

    /// `ArchiveId` points at an instance that is not an archive
    #[error("Instance #{0} is not an archive")]
    NotAnArchive(ObjectId),
}

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;
