//! Linear Tank Example
//!
//! Converts a series of ultrasonic distance samples for an upright tank
//! into fill height, volume and percent.
//!
//! ## What You'll Learn
//!
//! - Building a linear `TankConfig`
//! - Validating it before the first sample
//! - Reading the color band attached to each result
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_linear_tank
//! ```

use tankgauge_core::{clamp_percent, TankConfig, TankReading};

fn main() {
    println!("=== TankGauge Linear Tank Example ===\n");

    // 3144 liter tank, full at 120 cm, sensor 17 cm above the full mark
    let config = TankConfig::linear(120.0, 17.0, 3144.0);
    if let Err(e) = config.validate() {
        println!("Configuration rejected: {}", e);
        return;
    }

    let reading = TankReading::default();
    let profile = reading.profile();

    // Sensor distances as the tank drains, plus one inside the blind zone
    let samples = [10.0, 17.0, 50.0, 80.0, 110.0, 137.0];

    for distance in samples {
        match reading.convert(distance, &config) {
            Ok(result) => {
                println!(
                    "distance {:>6.1} cm -> height {:>6.1} cm, {:>8.2} L, {} (gauge {:.0} %, color #{:06X})",
                    distance,
                    result.height_cm,
                    result.volume_liters,
                    profile.label(result.percent),
                    clamp_percent(result.percent),
                    result.band.color,
                );
            }
            Err(e) => println!("distance {:>6.1} cm -> error: {}", distance, e),
        }
    }
}
