//! Integration tests for the conversion engine
//!
//! Drives the public API the way a host integration does: build a
//! configuration, feed distance samples through `TankReading::convert`,
//! and check the published values.

mod common;

use tankgauge_core::{
    BreakpointPrecision, ConversionError, LevelConverter, RawBreakpoint, TankConfig,
    TankReading, TankType,
};

use common::{
    assert_close, calibrated_tank, distance_for_height, lying_cylinder, rate_rounding_bound,
    upright_tank,
};

#[test]
fn linear_tank_scenario() {
    let config = upright_tank();
    let result = TankReading::default()
        .convert(50.0, &config)
        .expect("linear conversion succeeds");

    assert_eq!(result.height_cm, 87.0);
    assert_eq!(result.volume_liters, 2279.4);
    assert_eq!(result.percent, 72.5);
}

#[test]
fn calibrated_tank_scenario() {
    let config = calibrated_tank();
    let distance = distance_for_height(&config, 75.0);
    let result = TankReading::default()
        .convert(distance, &config)
        .expect("75 cm lies inside the table");

    assert_eq!(result.height_cm, 75.0);
    assert_eq!(result.volume_liters, 2000.0);
}

#[test]
fn calibrated_tank_out_of_range_scenario() {
    let config = calibrated_tank();
    let distance = distance_for_height(&config, 150.0);

    match TankReading::default().convert(distance, &config) {
        Err(ConversionError::LevelOutOfRange { height_cm, min_level_cm, max_level_cm }) => {
            assert_eq!(height_cm, 150.0);
            assert_eq!(min_level_cm, 0.0);
            assert_eq!(max_level_cm, 100.0);
        }
        other => panic!("expected LevelOutOfRange, got {other:?}"),
    }
}

#[test]
fn degenerate_config_scenario() {
    let config = TankConfig::linear(0.0, 17.0, 3144.0);

    // Caught by validation alone
    assert_eq!(
        config.validate(),
        Err(ConversionError::DivisionByZero { parameter: "max_fill_height" })
    );

    // And convert never yields infinity or NaN
    assert_eq!(
        TankReading::default().convert(10.0, &config),
        Err(ConversionError::DivisionByZero { parameter: "max_fill_height" })
    );
}

#[test]
fn lying_cylinder_sweep() {
    let config = lying_cylinder();
    let reading = TankReading::default();

    let mut previous = f64::NEG_INFINITY;
    for height in (0..175).step_by(5) {
        let distance = distance_for_height(&config, height as f64);
        let result = reading.convert(distance, &config).expect("inside calibrated range");

        assert_eq!(result.height_cm, height as f64);
        assert!(result.volume_liters >= previous, "volume must not drop while filling");
        previous = result.volume_liters;
    }

    // First segment runs from the implicit zero breakpoint
    let result = reading
        .convert(distance_for_height(&config, 10.0), &config)
        .unwrap();
    assert_eq!(result.volume_liters, 152.0);
}

#[test]
fn full_linear_tank_matches_capacity() {
    // Rates that need no more than 2 decimals reproduce the capacity
    for (height, capacity) in [(120.0, 3144.0), (100.0, 3000.0), (50.0, 1234.5)] {
        let config = TankConfig::linear(height, 10.0, capacity);
        let converter = LevelConverter::new(&config);
        assert_close(converter.volume_from_height(height).unwrap(), capacity);
    }

    // Otherwise the rounded rate is off by at most half a hundredth per cm
    for (height, capacity) in [(150.0, 5000.0), (97.0, 1500.0), (33.0, 1000.0)] {
        let config = TankConfig::linear(height, 10.0, capacity);
        let converter = LevelConverter::new(&config);
        let volume = converter.volume_from_height(height).unwrap();
        assert!((volume - capacity).abs() <= rate_rounding_bound(height));
    }
}

#[test]
fn band_follows_fill_level() {
    let config = upright_tank();
    let reading = TankReading::default();

    let expected = [
        (0.0, 0xFF0000),
        (30.0, 0xFF9D00),
        (50.0, 0xFFF700),
        (70.0, 0x9DFF00),
        (95.0, 0x46F700),
    ];

    for (fill_percent, color) in expected {
        let height = 120.0 * fill_percent / 100.0;
        let result = reading
            .convert(distance_for_height(&config, height), &config)
            .unwrap();
        assert_eq!(result.band.color, color, "fill {fill_percent} %");
    }
}

#[test]
fn config_changes_apply_on_next_sample() {
    let mut config = calibrated_tank();
    let reading = TankReading::default();
    let distance = distance_for_height(&config, 75.0);

    assert_eq!(reading.convert(distance, &config).unwrap().volume_liters, 2000.0);

    // User re-measures the top half of the tank
    config.calibration[2] = RawBreakpoint::new(100.0, 2600.0);
    assert_eq!(reading.convert(distance, &config).unwrap().volume_liters, 1800.0);

    // ... and then switches to a linear model
    config.tank_type = TankType::Linear;
    assert_eq!(reading.convert(distance, &config).unwrap().volume_liters, 2250.0);
}

#[test]
fn exact_precision_keeps_fractional_breakpoints() {
    let raw = [
        RawBreakpoint::new(10.5, 100.5),
        RawBreakpoint::new(20.5, 300.5),
    ];
    let legacy = TankConfig::table(20.5, 0.0, 300.0, &raw).unwrap();
    let exact = legacy.clone().with_precision(BreakpointPrecision::Exact);

    // Height 15.5 cm
    let legacy_volume = TankReading::default().convert(5.0, &legacy).unwrap().volume_liters;
    let exact_volume = TankReading::default().convert(5.0, &exact).unwrap().volume_liters;

    // Legacy: whole-number deltas give 20 L/cm from 10 cm, added to 100.5 -> 210.5
    assert_eq!(legacy_volume, 210.5);
    // Exact: (10.5, 100.5)-(20.5, 300.5), 20 L/cm from 10.5 cm -> 200.5
    assert_eq!(exact_volume, 200.5);
}

#[test]
fn unsorted_table_is_rejected_not_misinterpolated() {
    let config = TankConfig::table(
        100.0,
        0.0,
        3000.0,
        &[
            RawBreakpoint::new(50.0, 1000.0),
            RawBreakpoint::new(100.0, 3000.0),
            RawBreakpoint::new(75.0, 2000.0),
        ],
    )
    .unwrap();

    assert!(matches!(
        TankReading::default().convert(30.0, &config),
        Err(ConversionError::MalformedTable { entry: 2, .. })
    ));
}
