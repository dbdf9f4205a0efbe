//! Oil Tank Instance Lifecycle
//!
//! One [`OilTankInstance`] per monitored tank. The host drives it through
//! two entry points:
//!
//! - [`apply_changes`](OilTankInstance::apply_changes) after the user saved
//!   the properties: registers the display profiles, creates the published
//!   variables and enables archive logging for both. Returns the timer
//!   period the host should schedule [`update`](OilTankInstance::update) at.
//! - [`update`](OilTankInstance::update) on every timer tick: reads the
//!   distance variable, converts it and publishes liters and percent.
//!
//! A failed update publishes nothing; the previous values stay in place
//! until the next tick succeeds.

use std::time::Duration;

use tankgauge_core::{ConversionResult, TankReading};

use crate::{
    ports::{ArchiveSink, ObjectId, VariableKind, VariableStore},
    profiles::{absolute_profile, relative_profile, VariableProfile},
    properties::TankProperties,
    HostError, HostResult,
};

/// Published volume (liters)
pub const ABSOLUTE_VARIABLE: &str = "Oil_Level_Absolute";

/// Published fill level (% of capacity)
pub const RELATIVE_VARIABLE: &str = "Oil_Level_Relative";

/// Tank instance bound to a host
#[derive(Debug)]
pub struct OilTankInstance<S, A> {
    id: ObjectId,
    properties: TankProperties,
    store: S,
    archive: A,
    reading: TankReading,
}

impl<S: VariableStore, A: ArchiveSink> OilTankInstance<S, A> {
    /// Bind an instance to its host capabilities
    pub fn new(id: ObjectId, properties: TankProperties, store: S, archive: A) -> Self {
        Self {
            id,
            properties,
            store,
            archive,
            reading: TankReading::default(),
        }
    }

    /// Instance id; parent of the published variables
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Current properties
    pub fn properties(&self) -> &TankProperties {
        &self.properties
    }

    /// Replace the properties; takes effect with the next
    /// [`apply_changes`](Self::apply_changes) or [`update`](Self::update)
    pub fn set_properties(&mut self, properties: TankProperties) {
        self.properties = properties;
    }

    /// Variable store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Variable store, mutable (e.g. to feed a new sensor value)
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Archive
    pub fn archive(&self) -> &A {
        &self.archive
    }

    /// Apply saved properties
    ///
    /// The archive is checked before anything is created, so a wrong
    /// `ArchiveId` fails the same way on every call. Logging is switched on
    /// for both variables, including ones created by an earlier call.
    pub fn apply_changes(&mut self) -> HostResult<Duration> {
        let archive = self.archive_target()?;
        if archive.is_none() {
            log::warn!(
                "OilTank [#{}]: no archive configured, levels will not be logged",
                self.id
            );
        }

        let prefix = self.properties.variable_prefix.clone();
        let absolute = absolute_profile(&prefix);
        let relative = relative_profile(&prefix, self.reading.profile());

        self.ensure_profile(&absolute)?;
        self.ensure_profile(&relative)?;

        let absolute = self.ensure_variable(ABSOLUTE_VARIABLE, &absolute.name)?;
        let relative = self.ensure_variable(RELATIVE_VARIABLE, &relative.name)?;

        if let Some(archive) = archive {
            for variable in [absolute, relative] {
                if !self.archive.logging_enabled(archive, variable) {
                    self.archive.set_logging(archive, variable, true)?;
                }
            }
        }

        let interval = self.properties.timer_interval();
        self.trace(format_args!("Update interval set to {interval:?}"));
        Ok(interval)
    }

    /// Convert the current distance and publish the result
    ///
    /// Both variables and the archive are resolved before the first write;
    /// on any error up to that point nothing is published.
    pub fn update(&mut self) -> HostResult<ConversionResult> {
        let source = match self.properties.fill_height {
            0 => return Err(HostError::SourceNotConfigured),
            id => id,
        };

        let distance_cm = self.store.read_float(source)?;
        self.trace(format_args!("Distance from #{source}: {distance_cm} cm"));

        let config = self.properties.to_tank_config()?;
        let result = self.reading.convert(distance_cm, &config).map_err(|e| {
            log::error!("OilTank [#{}]: {e}", self.id);
            HostError::from(e)
        })?;

        let archive = self.archive_target()?;
        let prefix = self.properties.variable_prefix.clone();
        let absolute = self.ensure_variable(ABSOLUTE_VARIABLE, &absolute_profile(&prefix).name)?;
        let relative = self.ensure_variable(
            RELATIVE_VARIABLE,
            &relative_profile(&prefix, self.reading.profile()).name,
        )?;

        let values = [(absolute, result.volume_liters), (relative, result.percent)];
        for (variable, value) in values {
            self.store.write_float(variable, value)?;
        }
        if let Some(archive) = archive {
            for (variable, value) in values {
                if self.archive.logging_enabled(archive, variable) {
                    self.archive.append(archive, variable, value)?;
                }
            }
        }

        log::info!(
            "OilTank [#{}]: Oil-Level = {} liters ({} %) - fill height = {} cm",
            self.id,
            result.volume_liters,
            result.percent,
            result.height_cm
        );

        Ok(result)
    }

    /// Configured archive, `None` when `ArchiveId` is 0
    fn archive_target(&self) -> HostResult<Option<ObjectId>> {
        match self.properties.archive_id {
            0 => Ok(None),
            id if self.archive.is_archive(id)? => Ok(Some(id)),
            id => Err(HostError::NotAnArchive(id)),
        }
    }

    fn ensure_profile(&mut self, profile: &VariableProfile) -> HostResult<()> {
        // User edits to an existing profile are kept
        if !self.store.profile_exists(&profile.name) {
            self.store.create_profile(profile)?;
            log::info!("OilTank [#{}]: created profile {}", self.id, profile.name);
        }
        Ok(())
    }

    /// Published float variable below the instance, created on first use
    fn ensure_variable(&mut self, name: &str, profile: &str) -> HostResult<ObjectId> {
        let (variable, created) =
            self.store
                .get_or_create_variable(self.id, name, VariableKind::Float)?;

        if created {
            self.store.set_variable_profile(variable, profile)?;
            log::info!("OilTank [#{}]: created variable {name}", self.id);
        } else if self.store.variable_kind(variable)? != VariableKind::Float {
            return Err(HostError::TypeMismatch {
                name: name.to_string(),
                expected: VariableKind::Float,
            });
        }

        Ok(variable)
    }

    fn trace(&self, message: core::fmt::Arguments<'_>) {
        if self.properties.debugging {
            log::info!("OilTank [#{}]: {message}", self.id);
        } else {
            log::debug!("OilTank [#{}]: {message}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryArchive, MemoryStore};

    const INSTANCE: ObjectId = 1;

    fn instance_with_distance(distance: f64) -> OilTankInstance<MemoryStore, MemoryArchive> {
        let mut store = MemoryStore::new();
        let sensor = store.insert_float(0, "Distance", distance);
        let properties = TankProperties {
            fill_height: sensor,
            ..TankProperties::default()
        };
        OilTankInstance::new(INSTANCE, properties, store, MemoryArchive::new())
    }

    #[test]
    fn apply_changes_creates_profiles_and_variables() {
        let mut tank = instance_with_distance(50.0);
        let interval = tank.apply_changes().unwrap();
        assert_eq!(interval, Duration::from_secs(180));

        let store = tank.store();
        assert!(store.profile("oil_oil_level_relative").is_some());
        assert!(store.profile("oil_oil_level_absolute").is_some());

        let absolute = store.find_variable(INSTANCE, ABSOLUTE_VARIABLE).unwrap();
        assert_eq!(
            store.variable(absolute).unwrap().profile.as_deref(),
            Some("oil_oil_level_absolute")
        );
        assert!(store.find_variable(INSTANCE, RELATIVE_VARIABLE).is_some());
    }

    #[test]
    fn apply_changes_is_idempotent() {
        let mut tank = instance_with_distance(50.0);
        tank.apply_changes().unwrap();
        let count = tank.store().variable_count();

        tank.apply_changes().unwrap();
        assert_eq!(tank.store().variable_count(), count);
    }

    #[test]
    fn update_publishes_liters_and_percent() {
        let mut tank = instance_with_distance(50.0);
        tank.apply_changes().unwrap();

        let result = tank.update().unwrap();
        assert_eq!(result.volume_liters, 2279.4);
        assert_eq!(result.percent, 72.5);

        let store = tank.store();
        let absolute = store.find_variable(INSTANCE, ABSOLUTE_VARIABLE).unwrap();
        let relative = store.find_variable(INSTANCE, RELATIVE_VARIABLE).unwrap();
        assert_eq!(store.read_float(absolute).unwrap(), 2279.4);
        assert_eq!(store.read_float(relative).unwrap(), 72.5);
    }

    #[test]
    fn update_without_source_fails() {
        let mut tank = OilTankInstance::new(
            INSTANCE,
            TankProperties::default(),
            MemoryStore::new(),
            MemoryArchive::new(),
        );
        assert!(matches!(tank.update(), Err(HostError::SourceNotConfigured)));
    }

    #[test]
    fn wrong_archive_fails_every_time_and_creates_nothing() {
        let mut tank = instance_with_distance(50.0);
        let mut properties = tank.properties().clone();
        properties.archive_id = 30_001;
        tank.set_properties(properties);
        tank.archive = MemoryArchive::new().with_instance(30_001);
        let count = tank.store().variable_count();

        for _ in 0..2 {
            assert!(matches!(tank.apply_changes(), Err(HostError::NotAnArchive(30_001))));
            assert_eq!(tank.store().variable_count(), count);
        }
        assert!(matches!(tank.update(), Err(HostError::NotAnArchive(30_001))));
    }

    #[test]
    fn archive_added_later_logs_existing_variables() {
        let mut tank = instance_with_distance(50.0);
        tank.apply_changes().unwrap();

        tank.archive = MemoryArchive::new().with_archive(30_000);
        let mut properties = tank.properties().clone();
        properties.archive_id = 30_000;
        tank.set_properties(properties);
        tank.apply_changes().unwrap();

        for name in [ABSOLUTE_VARIABLE, RELATIVE_VARIABLE] {
            let variable = tank.store().find_variable(INSTANCE, name).unwrap();
            assert!(tank.archive().logging_enabled(30_000, variable));
        }
    }

    #[test]
    fn mistyped_variable_blocks_both_writes() {
        let mut tank = instance_with_distance(50.0);
        tank.store_mut()
            .create_variable(INSTANCE, RELATIVE_VARIABLE, VariableKind::String)
            .unwrap();

        assert!(matches!(tank.update(), Err(HostError::TypeMismatch { .. })));

        let absolute = tank.store().find_variable(INSTANCE, ABSOLUTE_VARIABLE).unwrap();
        assert_eq!(tank.store().read_float(absolute).unwrap(), 0.0);
    }

    #[test]
    fn failed_conversion_publishes_nothing() {
        let mut tank = instance_with_distance(50.0);
        tank.apply_changes().unwrap();
        tank.update().unwrap();

        let mut properties = tank.properties().clone();
        properties.tank_capacity = 0;
        tank.set_properties(properties);

        assert!(matches!(tank.update(), Err(HostError::Conversion(_))));

        let store = tank.store();
        let absolute = store.find_variable(INSTANCE, ABSOLUTE_VARIABLE).unwrap();
        assert_eq!(store.read_float(absolute).unwrap(), 2279.4);
    }
}
