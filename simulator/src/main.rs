//! Desktop simulator for the soft-SoC sensor demos.
//!
//! Runs the thermometer or the theremin from `sensor-demos-common` against
//! simulated peripherals and prints what the board would show.
//!
//! ```text
//! simulator [thermometer|theremin] [ITERATIONS] [--fast] [--verbose]
//! ```
//!
//! `--fast` skips the real sleeps between iterations. Log output goes to
//! stderr through `env_logger`; `RUST_LOG` overrides the level.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod peripherals;
mod timing;

use clap::{Parser, ValueEnum};
use log::{debug, error, info, warn};
use sensor_demos_common::adt7420::{Adt7420, Identity};
use sensor_demos_common::config::ADT7420_DEVICE_ID;
use sensor_demos_common::{Reading, Shutdown, Thermometer, Theremin, run};

use crate::peripherals::{
    SimAdt7420,
    SimDisplay,
    SimLeds,
    SimSensor,
    SimTone,
    frame_to_ascii,
    leds_to_ascii,
};
use crate::timing::StdDelay;

/// Iterations when none are given on the command line.
const DEFAULT_ITERATIONS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Demo {
    Thermometer,
    Theremin,
}

/// Desktop simulator for the soft-SoC sensor demos
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// demo to run
    #[arg(value_enum, default_value_t = Demo::Thermometer)]
    demo: Demo,

    /// loop iterations before shutdown
    #[arg(default_value_t = DEFAULT_ITERATIONS, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,

    /// skip the real sleeps between iterations
    #[arg(short, long)]
    fast: bool,

    /// enable debug messages
    #[arg(short, long)]
    verbose: bool,
}

fn describe(reading: Reading) -> String {
    match reading {
        Reading::Distance(mm) => format!("{mm:>4} mm"),
        Reading::NoEcho => "no echo".into(),
        Reading::Fault => "FAULT".into(),
    }
}

fn run_thermometer(
    iterations: u32,
    delay: &mut StdDelay,
) -> u32 {
    // Every 7th bus transaction fails, to show the error path
    let sensor = Adt7420::new(SimAdt7420::new(-12.0, 38.0).with_nack_every(7));
    let mut app = Thermometer::new(sensor, SimDisplay::new());

    match app.verify_sensor() {
        Ok(Identity::Matched) => info!("ADT7420 detected"),
        Ok(Identity::Mismatch(id)) => {
            warn!("Unexpected device ID {id:#04x} (expected {ADT7420_DEVICE_ID:#04x})");
        },
        Err(e) => error!("ID read failed: {e:?}"),
    }

    let shutdown = Shutdown::new();
    let mut seen = 0;
    let count = run(&mut app, delay, &shutdown, |result| {
        match result {
            Ok(report) => {
                info!("Temperature: {:.2} C   display [{}]", report.celsius, frame_to_ascii(&report.frame));
            },
            Err(e) => error!("Temperature read failed: {e:?}"),
        }
        seen += 1;
        if seen >= iterations {
            shutdown.request();
        }
    });

    info!("Shutdown, display [{}]", app.display().to_ascii());
    count
}

fn run_theremin(
    iterations: u32,
    delay: &mut StdDelay,
) -> u32 {
    let mut app = Theremin::new(
        SimSensor::new(0.15),
        SimSensor::new(0.07).with_no_echo_every(9),
        SimTone::default(),
        SimLeds::default(),
    );
    app.startup(delay);
    info!("Start-up flash done, LEDs {}", leds_to_ascii(app.leds().bits));

    let shutdown = Shutdown::new();
    let mut seen = 0;
    let count = run(&mut app, delay, &shutdown, |result| {
        let Ok(report) = result;
        let frequency = report.actuation.frequency.map_or_else(|| "hold".to_string(), |hz| format!("{hz} Hz"));
        for (name, reading) in [("pitch", report.pitch), ("volume", report.volume)] {
            if reading == Reading::Fault {
                warn!("{name} sensor did not finish");
            }
        }
        info!(
            "pitch {:>8}  volume {:>8}  -> {:>7}  env {:.2}",
            describe(report.pitch),
            describe(report.volume),
            frequency,
            report.actuation.envelope
        );
        debug!("LEDs {}", leds_to_ascii(report.actuation.leds));
        seen += 1;
        if seen >= iterations {
            shutdown.request();
        }
    });

    let frequency = app.tone().frequency;
    let envelope = app.tone().envelope;
    let leds = leds_to_ascii(app.leds().bits);
    info!(
        "Shutdown, tone {:?} Hz at env {:.2}, LEDs {}",
        frequency,
        envelope,
        leds
    );
    count
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter(None, log::LevelFilter::Debug);
    } else {
        builder.filter(None, log::LevelFilter::Info);
    }
    builder.init();

    let mut delay = StdDelay::new(args.fast);
    let count = match args.demo {
        Demo::Thermometer => run_thermometer(args.iterations, &mut delay),
        Demo::Theremin => run_theremin(args.iterations, &mut delay),
    };

    info!("{count} iterations, {:.2} s simulated", delay.elapsed().as_secs_f32());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("simulator").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.demo, Demo::Thermometer);
        assert_eq!(args.iterations, DEFAULT_ITERATIONS);
        assert!(!args.fast);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_all() {
        let args = parse(&["theremin", "25", "--fast", "-v"]).unwrap();
        assert_eq!(args.demo, Demo::Theremin);
        assert_eq!(args.iterations, 25);
        assert!(args.fast);
        assert!(args.verbose);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse(&["piano"]).is_err());
        assert!(parse(&["theremin", "0"]).is_err());
        assert!(parse(&["theremin", "many"]).is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_thermometer_runs_requested_iterations() {
        let mut delay = StdDelay::new(true);
        assert_eq!(run_thermometer(9, &mut delay), 9);
        // One period between consecutive iterations, none after the last
        assert_eq!(delay.elapsed().as_millis(), 8 * 1_000);
    }

    #[test]
    fn test_theremin_runs_requested_iterations() {
        let mut delay = StdDelay::new(true);
        assert_eq!(run_theremin(20, &mut delay), 20);
        assert!(delay.elapsed().as_millis() >= 500 + 19 * 50);
    }
}
