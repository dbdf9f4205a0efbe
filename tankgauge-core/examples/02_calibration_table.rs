//! Calibration Table Example
//!
//! Irregular tanks need a measured volume-over-height table. This example
//! converts samples for a lying cylinder and shows what happens when the
//! sensor reports a level the table does not cover.
//!
//! ## What You'll Learn
//!
//! - Building a table `TankConfig` from raw breakpoints
//! - The implicit zero breakpoint below the first measurement
//! - Handling `LevelOutOfRange` without publishing a guessed volume
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_calibration_table
//! ```

use tankgauge_core::{ConversionError, RawBreakpoint, TankConfig, TankReading};

fn main() -> Result<(), ConversionError> {
    println!("=== TankGauge Calibration Table Example ===\n");

    // Lying cylinder, measured every 25 cm while filling; bottom not measured
    let breakpoints = [
        RawBreakpoint::new(25.0, 380.0),
        RawBreakpoint::new(50.0, 1040.0),
        RawBreakpoint::new(75.0, 1840.0),
        RawBreakpoint::new(100.0, 2690.0),
        RawBreakpoint::new(125.0, 3540.0),
        RawBreakpoint::new(150.0, 4330.0),
    ];
    let config = TankConfig::table(150.0, 20.0, 4330.0, &breakpoints)?;
    config.validate()?;

    let table = config.calibration_table()?;
    println!(
        "{} breakpoints ({} measured), levels {:?} cm\n",
        table.len(),
        table.explicit_breakpoints().len(),
        table.bounds()
    );

    let reading = TankReading::default();

    // Last sample puts the level above the highest breakpoint
    for distance in [160.0, 120.0, 85.0, 40.0, 20.0] {
        match reading.convert(distance, &config) {
            Ok(result) => println!(
                "distance {:>5.1} cm -> height {:>5.1} cm, {:>8.2} L, {:>6.2} %",
                distance, result.height_cm, result.volume_liters, result.percent
            ),
            Err(ConversionError::LevelOutOfRange { height_cm, min_level_cm, max_level_cm }) => println!(
                "distance {:>5.1} cm -> {} cm not in [{}, {}) cm, skipping update",
                distance, height_cm, min_level_cm, max_level_cm
            ),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
