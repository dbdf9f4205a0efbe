//! In-memory host
//!
//! Backs the capability traits with plain maps. Used by the test suites
//! and by `tankconvert`, which has no home-automation server to talk to.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    ports::{ArchiveSink, ObjectId, VariableKind, VariableStore},
    profiles::VariableProfile,
    HostError, HostResult,
};

/// First id handed out by [`MemoryStore`]
const FIRST_OBJECT_ID: ObjectId = 10_000;

/// Current value of a variable
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValue {
    /// true / false
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Text
    String(String),
}

impl VariableValue {
    fn initial(kind: VariableKind) -> Self {
        match kind {
            VariableKind::Boolean => Self::Boolean(false),
            VariableKind::Integer => Self::Integer(0),
            VariableKind::Float => Self::Float(0.0),
            VariableKind::String => Self::String(String::new()),
        }
    }

    /// Value type
    pub fn kind(&self) -> VariableKind {
        match self {
            Self::Boolean(_) => VariableKind::Boolean,
            Self::Integer(_) => VariableKind::Integer,
            Self::Float(_) => VariableKind::Float,
            Self::String(_) => VariableKind::String,
        }
    }
}

/// Variable held by [`MemoryStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Name, unique below `parent`
    pub name: String,
    /// Owning object
    pub parent: ObjectId,
    /// Attached display profile
    pub profile: Option<String>,
    /// Current value
    pub value: VariableValue,
}

/// Variables and profiles kept in memory
#[derive(Debug, Clone)]
pub struct MemoryStore {
    next_id: ObjectId,
    variables: BTreeMap<ObjectId, Variable>,
    profiles: HashMap<String, VariableProfile>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self {
            next_id: FIRST_OBJECT_ID,
            variables: BTreeMap::new(),
            profiles: HashMap::new(),
        }
    }

    /// Add a float variable with a value, e.g. a sensor reading
    pub fn insert_float(&mut self, parent: ObjectId, name: &str, value: f64) -> ObjectId {
        self.insert(parent, name, VariableValue::Float(value))
    }

    /// Add an integer variable with a value
    pub fn insert_integer(&mut self, parent: ObjectId, name: &str, value: i64) -> ObjectId {
        self.insert(parent, name, VariableValue::Integer(value))
    }

    fn insert(&mut self, parent: ObjectId, name: &str, value: VariableValue) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        self.variables.insert(
            id,
            Variable {
                name: name.to_string(),
                parent,
                profile: None,
                value,
            },
        );
        id
    }

    /// Variable by id
    pub fn variable(&self, id: ObjectId) -> Option<&Variable> {
        self.variables.get(&id)
    }

    /// Profile by name
    pub fn profile(&self, name: &str) -> Option<&VariableProfile> {
        self.profiles.get(name)
    }

    /// Number of variables
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    fn variable_mut(&mut self, id: ObjectId) -> HostResult<&mut Variable> {
        self.variables
            .get_mut(&id)
            .ok_or(HostError::VariableNotFound(id))
    }
}

impl VariableStore for MemoryStore {
    fn find_variable(&self, parent: ObjectId, name: &str) -> Option<ObjectId> {
        self.variables
            .iter()
            .find(|(_, v)| v.parent == parent && v.name == name)
            .map(|(id, _)| *id)
    }

    fn create_variable(
        &mut self,
        parent: ObjectId,
        name: &str,
        kind: VariableKind,
    ) -> HostResult<ObjectId> {
        Ok(self.insert(parent, name, VariableValue::initial(kind)))
    }

    fn set_variable_profile(&mut self, variable: ObjectId, profile: &str) -> HostResult<()> {
        self.variable_mut(variable)?.profile = Some(profile.to_string());
        Ok(())
    }

    fn profile_exists(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    fn create_profile(&mut self, profile: &VariableProfile) -> HostResult<()> {
        self.profiles.insert(profile.name.clone(), profile.clone());
        Ok(())
    }

    fn variable_kind(&self, variable: ObjectId) -> HostResult<VariableKind> {
        self.variables
            .get(&variable)
            .map(|var| var.value.kind())
            .ok_or(HostError::VariableNotFound(variable))
    }

    fn read_float(&self, variable: ObjectId) -> HostResult<f64> {
        let var = self
            .variables
            .get(&variable)
            .ok_or(HostError::VariableNotFound(variable))?;

        match var.value {
            VariableValue::Float(value) => Ok(value),
            VariableValue::Integer(value) => Ok(value as f64),
            _ => Err(HostError::TypeMismatch {
                name: var.name.clone(),
                expected: VariableKind::Float,
            }),
        }
    }

    fn write_float(&mut self, variable: ObjectId, value: f64) -> HostResult<()> {
        let var = self.variable_mut(variable)?;
        match &mut var.value {
            VariableValue::Float(current) => {
                *current = value;
                Ok(())
            }
            _ => Err(HostError::TypeMismatch {
                name: var.name.clone(),
                expected: VariableKind::Float,
            }),
        }
    }
}

/// Archive kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    archives: HashSet<ObjectId>,
    other_instances: HashSet<ObjectId>,
    logged: HashSet<(ObjectId, ObjectId)>,
    records: HashMap<(ObjectId, ObjectId), Vec<f64>>,
}

impl MemoryArchive {
    /// No instances at all
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an archive instance
    pub fn with_archive(mut self, archive: ObjectId) -> Self {
        self.archives.insert(archive);
        self
    }

    /// Register an instance that exists but is not an archive
    pub fn with_instance(mut self, instance: ObjectId) -> Self {
        self.other_instances.insert(instance);
        self
    }

    /// Values recorded for a variable, oldest first
    pub fn records(&self, archive: ObjectId, variable: ObjectId) -> &[f64] {
        self.records
            .get(&(archive, variable))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl ArchiveSink for MemoryArchive {
    fn is_archive(&self, archive: ObjectId) -> HostResult<bool> {
        if self.archives.contains(&archive) {
            Ok(true)
        } else if self.other_instances.contains(&archive) {
            Ok(false)
        } else {
            Err(HostError::ArchiveNotFound(archive))
        }
    }

    fn logging_enabled(&self, archive: ObjectId, variable: ObjectId) -> bool {
        self.logged.contains(&(archive, variable))
    }

    fn set_logging(
        &mut self,
        archive: ObjectId,
        variable: ObjectId,
        enabled: bool,
    ) -> HostResult<()> {
        if !self.is_archive(archive)? {
            return Err(HostError::NotAnArchive(archive));
        }
        if enabled {
            self.logged.insert((archive, variable));
        } else {
            self.logged.remove(&(archive, variable));
        }
        Ok(())
    }

    fn append(&mut self, archive: ObjectId, variable: ObjectId, value: f64) -> HostResult<()> {
        if !self.is_archive(archive)? {
            return Err(HostError::NotAnArchive(archive));
        }
        self.records
            .entry((archive, variable))
            .or_default()
            .push(value);
        Ok(())
    }
}
