//! Host capabilities
//!
//! The instance logic never talks to a concrete home-automation server.
//! Everything it needs from the host goes through these two traits, so
//! the same code runs against the real platform and against
//! [`MemoryStore`](crate::MemoryStore) / [`MemoryArchive`](crate::MemoryArchive)
//! in tests.

use serde::{Deserialize, Serialize};

use crate::{profiles::VariableProfile, HostResult};

/// Host object id; `0` means "not set"
pub type ObjectId = u32;

/// Value type of a host variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    /// true / false
    Boolean,
    /// Whole number
    Integer,
    /// Floating point number
    Float,
    /// Text
    String,
}

/// Variables and display profiles of the host
pub trait VariableStore {
    /// Variable below `parent` with the given name
    fn find_variable(&self, parent: ObjectId, name: &str) -> Option<ObjectId>;

    /// Create a variable below `parent`
    fn create_variable(
        &mut self,
        parent: ObjectId,
        name: &str,
        kind: VariableKind,
    ) -> HostResult<ObjectId>;

    /// Attach a display profile to a variable
    fn set_variable_profile(&mut self, variable: ObjectId, profile: &str) -> HostResult<()>;

    /// Whether a profile with this name is registered
    fn profile_exists(&self, name: &str) -> bool;

    /// Register a display profile
    fn create_profile(&mut self, profile: &VariableProfile) -> HostResult<()>;

    /// Value type of a variable
    fn variable_kind(&self, variable: ObjectId) -> HostResult<VariableKind>;

    /// Current value of a numeric variable
    fn read_float(&self, variable: ObjectId) -> HostResult<f64>;

    /// Publish a value to a float variable
    fn write_float(&mut self, variable: ObjectId, value: f64) -> HostResult<()>;

    /// Existing variable, or a newly created one
    ///
    /// The flag is `true` when the variable was created by this call.
    fn get_or_create_variable(
        &mut self,
        parent: ObjectId,
        name: &str,
        kind: VariableKind,
    ) -> HostResult<(ObjectId, bool)> {
        match self.find_variable(parent, name) {
            Some(id) => Ok((id, false)),
            None => Ok((self.create_variable(parent, name, kind)?, true)),
        }
    }
}

/// Archive (history logging) of the host
pub trait ArchiveSink {
    /// Whether `archive` is an archive instance
    ///
    /// Fails with [`HostError::ArchiveNotFound`](crate::HostError::ArchiveNotFound)
    /// when no instance with that id exists at all.
    fn is_archive(&self, archive: ObjectId) -> HostResult<bool>;

    /// Whether `variable` is logged by `archive`
    fn logging_enabled(&self, archive: ObjectId, variable: ObjectId) -> bool;

    /// Switch logging of `variable` on or off
    fn set_logging(&mut self, archive: ObjectId, variable: ObjectId, enabled: bool)
        -> HostResult<()>;

    /// Record a published value
    fn append(&mut self, archive: ObjectId, variable: ObjectId, value: f64) -> HostResult<()>;
}
