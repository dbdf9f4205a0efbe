//! TankGauge Conversion CLI
//!
//! Converts a single distance reading without a home-automation server,
//! e.g. to check a calibration table before loading it into an instance.
//!
//! ## Usage
//!
//! ```bash
//! # Upright tank, 120 cm full height, sensor 17 cm above full level
//! cargo run --bin tankconvert -- --distance 50 --capacity 3144 --max-height 120 --sensor-offset 17
//!
//! # Lying cylinder with a calibration table
//! cargo run --bin tankconvert -- --distance 42 --capacity 5000 --max-height 150 \
//!     --sensor-offset 20 --mode table --table levels.json
//! ```
//!
//! The table file holds the same JSON list the instance property
//! `OilLevels` does:
//!
//! ```json
//! [{"OilLevel": 50, "Liters": 1000}, {"OilLevel": 100, "Liters": 3000}]
//! ```
//!
//! ## Exit Codes
//!
//! - `0` - success
//! - `2` - bad arguments or tank configuration
//! - `3` - fill height outside the calibrated range

use std::process::ExitCode;

use log::{LevelFilter, Log, Metadata, Record};

use tankgauge_core::{
    constants::tank::{DEFAULT_MAX_FILL_HEIGHT_CM, DEFAULT_SENSOR_DISTANCE_CM, DEFAULT_TANK_CAPACITY_L},
    BreakpointPrecision, ConversionError, ConversionResult, TankConfig, TankReading, TankType,
};
use tankgauge_host::decode_oil_levels;

const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_OUT_OF_RANGE: u8 = 3;

/// Writes log records to stderr, keeping stdout for results
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        eprintln!("[{:<5}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

enum CliError {
    Usage(String),
    Conversion(ConversionError),
}

impl From<ConversionError> for CliError {
    fn from(e: ConversionError) -> Self {
        Self::Conversion(e)
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--verbose") && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }

    match run(&args) {
        Ok(result) => {
            print_result(&result);
            ExitCode::SUCCESS
        }
        Err(CliError::Usage(message)) => {
            eprintln!("Error: {message}");
            eprintln!("Use --help for usage");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
        Err(CliError::Conversion(e)) => {
            eprintln!("Error: {e}");
            match e {
                ConversionError::LevelOutOfRange { .. } => ExitCode::from(EXIT_OUT_OF_RANGE),
                _ => ExitCode::from(EXIT_CONFIG_ERROR),
            }
        }
    }
}

fn run(args: &[String]) -> Result<ConversionResult, CliError> {
    reject_unknown_flags(args)?;

    let distance = number_arg(args, "--distance")?
        .ok_or_else(|| CliError::Usage("--distance <cm> is required".into()))?;
    let capacity = number_arg(args, "--capacity")?.unwrap_or(DEFAULT_TANK_CAPACITY_L);
    let max_height = number_arg(args, "--max-height")?.unwrap_or(DEFAULT_MAX_FILL_HEIGHT_CM);
    let sensor_offset =
        number_arg(args, "--sensor-offset")?.unwrap_or(DEFAULT_SENSOR_DISTANCE_CM);

    let table_path = flag_value(args, "--table")?;
    let tank_type = match flag_value(args, "--mode")? {
        Some("linear") => TankType::Linear,
        Some("table") => TankType::Table,
        Some(other) => return Err(CliError::Usage(format!("unknown mode '{other}'"))),
        // A table file alone selects table mode
        None if table_path.is_some() => TankType::Table,
        None => TankType::Linear,
    };

    let mut config = TankConfig::linear(max_height, sensor_offset, capacity);
    config.tank_type = tank_type;

    if tank_type == TankType::Table {
        let path = table_path
            .ok_or_else(|| CliError::Usage("table mode needs --table <path>".into()))?;
        let json = std::fs::read_to_string(path)
            .map_err(|e| CliError::Usage(format!("cannot read {path}: {e}")))?;
        config.calibration = decode_oil_levels(&json)?;
        log::debug!("Loaded {} calibration entries from {path}", config.calibration.len());
    }

    if args.iter().any(|a| a == "--exact") {
        config = config.with_precision(BreakpointPrecision::Exact);
    }

    Ok(TankReading::default().convert(distance, &config)?)
}

fn print_result(result: &ConversionResult) {
    println!("heightCm={}", result.height_cm);
    println!("volumeLiters={}", result.volume_liters);
    println!("percent={}", result.percent);
    println!(
        "colorBand={} (#{:06X})",
        result.band.threshold_percent, result.band.color
    );
}

const VALUE_FLAGS: [&str; 6] = [
    "--distance",
    "--capacity",
    "--max-height",
    "--sensor-offset",
    "--mode",
    "--table",
];
const SWITCHES: [&str; 2] = ["--exact", "--verbose"];

fn reject_unknown_flags(args: &[String]) -> Result<(), CliError> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !SWITCHES.contains(&arg.as_str()) {
            return Err(CliError::Usage(format!("unexpected argument '{arg}'")));
        }
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, CliError> {
    match args.iter().position(|a| a == flag) {
        Some(idx) => args
            .get(idx + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| CliError::Usage(format!("{flag} needs a value"))),
        None => Ok(None),
    }
}

fn number_arg(args: &[String], flag: &str) -> Result<Option<f64>, CliError> {
    flag_value(args, flag)?
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| CliError::Usage(format!("{flag}: '{v}' is not a number")))
        })
        .transpose()
}

fn print_usage() {
    println!("tankconvert - convert an ultrasonic distance reading into a tank level");
    println!();
    println!("Usage:");
    println!("  tankconvert --distance <cm> [--capacity <L>] [--max-height <cm>]");
    println!("              [--sensor-offset <cm>] [--mode linear|table]");
    println!("              [--table <path>] [--exact] [--verbose]");
    println!();
    println!("Options:");
    println!("  --distance <cm>       Measured distance from sensor to oil surface");
    println!("  --capacity <L>        Tank capacity (default {DEFAULT_TANK_CAPACITY_L})");
    println!("  --max-height <cm>     Fill height of a full tank (default {DEFAULT_MAX_FILL_HEIGHT_CM})");
    println!("  --sensor-offset <cm>  Sensor height above full level (default {DEFAULT_SENSOR_DISTANCE_CM})");
    println!("  --mode linear|table   Geometry model (default: table if --table is given)");
    println!("  --table <path>        JSON list of {{\"OilLevel\", \"Liters\"}} records");
    println!("  --exact               Keep fractional calibration values");
    println!("  --verbose             Log conversion steps to stderr");
}
