//! Integration tests for the tank instance lifecycle
//!
//! Loads properties from the JSON the host stores, applies them and runs
//! update cycles against the in-memory store and archive.

use tankgauge_core::ConversionError;
use tankgauge_host::{
    ArchiveSink, HostError, MemoryArchive, MemoryStore, ObjectId, OilTankInstance,
    TankProperties, VariableKind, VariableStore, ABSOLUTE_VARIABLE, RELATIVE_VARIABLE,
};

const INSTANCE: ObjectId = 20_000;
const ARCHIVE: ObjectId = 30_000;

/// Store with a distance sensor, plus properties pointing at it
fn setup(distance: f64, json: &str) -> (MemoryStore, TankProperties) {
    let mut store = MemoryStore::new();
    let sensor = store.insert_float(0, "Ultrasonic Distance", distance);

    let mut properties = TankProperties::from_json(json).expect("valid properties");
    properties.fill_height = sensor;
    (store, properties)
}

fn published(store: &MemoryStore, name: &str) -> f64 {
    let id = store.find_variable(INSTANCE, name).expect("variable exists");
    store.read_float(id).expect("float variable")
}

#[test]
fn linear_tank_cycle_with_archive() {
    let (store, properties) = setup(50.0, r#"{"ArchiveId": 30000}"#);
    let archive = MemoryArchive::new().with_archive(ARCHIVE);
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, archive);

    tank.apply_changes().unwrap();
    tank.update().unwrap();

    assert_eq!(published(tank.store(), ABSOLUTE_VARIABLE), 2279.4);
    assert_eq!(published(tank.store(), RELATIVE_VARIABLE), 72.5);

    let absolute = tank.store().find_variable(INSTANCE, ABSOLUTE_VARIABLE).unwrap();
    assert!(tank.archive().logging_enabled(ARCHIVE, absolute));
    assert_eq!(tank.archive().records(ARCHIVE, absolute), &[2279.4]);
}

#[test]
fn sensor_changes_are_picked_up_on_next_tick() {
    let (store, properties) = setup(50.0, r#"{"ArchiveId": 30000}"#);
    let sensor = properties.fill_height;
    let archive = MemoryArchive::new().with_archive(ARCHIVE);
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, archive);

    tank.apply_changes().unwrap();
    tank.update().unwrap();

    // Oil burned: surface dropped by 10 cm
    tank.store_mut().write_float(sensor, 60.0).unwrap();
    let result = tank.update().unwrap();
    assert_eq!(result.height_cm, 77.0);
    assert_eq!(result.volume_liters, 2017.4);

    let relative = tank.store().find_variable(INSTANCE, RELATIVE_VARIABLE).unwrap();
    assert_eq!(tank.archive().records(ARCHIVE, relative), &[72.5, 64.17]);
}

#[test]
fn table_tank_from_host_json() {
    let json = r#"{
        "MaxFillHeight": 100,
        "SensorDistance": 0,
        "TankCapacity": 3000,
        "TankType": "table",
        "OilLevels": "[{\"OilLevel\": 0, \"Liters\": 0}, {\"OilLevel\": 50, \"Liters\": 1000}, {\"OilLevel\": 100, \"Liters\": 3000}]"
    }"#;
    let (store, properties) = setup(25.0, json);
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, MemoryArchive::new());

    tank.apply_changes().unwrap();
    let result = tank.update().unwrap();

    assert_eq!(result.height_cm, 75.0);
    assert_eq!(result.volume_liters, 2000.0);
    assert_eq!(published(tank.store(), RELATIVE_VARIABLE), 66.67);
}

#[test]
fn out_of_range_keeps_previous_values() {
    let json = r#"{
        "MaxFillHeight": 100,
        "SensorDistance": 0,
        "TankCapacity": 3000,
        "TankType": "table",
        "OilLevels": "[{\"OilLevel\": 50, \"Liters\": 1000}, {\"OilLevel\": 100, \"Liters\": 3000}]"
    }"#;
    let (store, properties) = setup(25.0, json);
    let sensor = properties.fill_height;
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, MemoryArchive::new());

    tank.apply_changes().unwrap();
    tank.update().unwrap();

    // Sensor inside its blind zone: 100 - (-50) = 150 cm
    tank.store_mut().write_float(sensor, -50.0).unwrap();
    assert!(matches!(
        tank.update(),
        Err(HostError::Conversion(ConversionError::LevelOutOfRange { .. }))
    ));
    assert_eq!(published(tank.store(), ABSOLUTE_VARIABLE), 2000.0);
}

#[test]
fn malformed_oil_levels_are_reported() {
    let json = r#"{"TankType": "table", "OilLevels": "[{\"OilLevel\": 50}]"}"#;
    let (store, properties) = setup(25.0, json);
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, MemoryArchive::new());

    assert!(matches!(
        tank.update(),
        Err(HostError::Conversion(ConversionError::MalformedTable { entry: 0, .. }))
    ));
}

#[test]
fn missing_archive_id_skips_logging() {
    let (store, properties) = setup(50.0, "{}");
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, MemoryArchive::new());

    tank.apply_changes().unwrap();
    tank.update().unwrap();
    assert_eq!(published(tank.store(), ABSOLUTE_VARIABLE), 2279.4);
}

#[test]
fn archive_id_must_name_an_archive() {
    let (store, properties) = setup(50.0, r#"{"ArchiveId": 30001}"#);
    let archive = MemoryArchive::new().with_instance(30_001);
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, archive);

    assert!(matches!(tank.apply_changes(), Err(HostError::NotAnArchive(30_001))));
    // Same answer on retry, and nothing was provisioned in between
    assert!(matches!(tank.apply_changes(), Err(HostError::NotAnArchive(30_001))));
    assert!(tank.store().find_variable(INSTANCE, ABSOLUTE_VARIABLE).is_none());
    assert!(tank.store().profile("oil_oil_level_absolute").is_none());
}

#[test]
fn relative_variable_of_wrong_type_blocks_publishing() {
    let (mut store, properties) = setup(50.0, r#"{"ArchiveId": 30000}"#);
    // Left behind by a user as a text variable
    store
        .create_variable(INSTANCE, RELATIVE_VARIABLE, VariableKind::String)
        .unwrap();
    let archive = MemoryArchive::new().with_archive(ARCHIVE);
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, archive);

    assert!(matches!(tank.apply_changes(), Err(HostError::TypeMismatch { .. })));
    assert!(matches!(tank.update(), Err(HostError::TypeMismatch { .. })));

    let absolute = tank.store().find_variable(INSTANCE, ABSOLUTE_VARIABLE).unwrap();
    assert_eq!(published(tank.store(), ABSOLUTE_VARIABLE), 0.0);
    assert!(tank.archive().records(ARCHIVE, absolute).is_empty());
}

#[test]
fn unknown_archive_id_is_an_error() {
    let (store, properties) = setup(50.0, r#"{"ArchiveId": 31337}"#);
    let mut tank = OilTankInstance::new(INSTANCE, properties, store, MemoryArchive::new());

    assert!(matches!(tank.apply_changes(), Err(HostError::ArchiveNotFound(31_337))));
}

#[test]
fn existing_profiles_are_left_alone() {
    let (mut store, properties) = setup(50.0, "{}");
    let mut custom = tankgauge_host::absolute_profile("oil_");
    custom.suffix = " l".to_string();
    store.create_profile(&custom).unwrap();

    let mut tank = OilTankInstance::new(INSTANCE, properties, store, MemoryArchive::new());
    tank.apply_changes().unwrap();

    let profile = tank.store().profile("oil_oil_level_absolute").unwrap();
    assert_eq!(profile.suffix, " l");
}
