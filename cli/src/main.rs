//! # The HR records command line utility
//!
//! Creates and seeds the records database and runs the employee and timesheet listings from a
//! terminal.
//!
//! ## Usage Examples
//!
//! Create the database and load the demo data:
//! ```bash
//! hr-cli init
//! hr-cli seed
//! ```
//!
//! Search employees by name or email within a department:
//! ```bash
//! hr-cli employees --search jane --department Engineering --sort-order desc
//! ```
//!
//! List the timesheets of employee 2 containing "bug":
//! ```bash
//! hr-cli timesheets --employee 2 --search bug
//! ```
//!
//! Point the tools at another database:
//! ```bash
//! hr-cli config update --database /var/lib/hr/records.db
//! ```
use anyhow::Result;
use clap::Parser;
use cli::{Command, LogLevel, Opts};
use commands::{configuration, listing, setup};
use env_logger::Env;
use hr::error::HrError;
use hr::ApplicationRuntime;
use log::debug;
use std::env;
use std::fs::File;
use std::process::exit;

mod cli;
mod commands;

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    configure_logging(&opts)?; // Handles the -v option

    match opts.cmd {
        Command::Init => setup::init()?,
        Command::Seed => setup::seed()?,
        Command::Config(config) => configuration::execute(config.cmd)?,
        Command::Employees(employees) => listing::employees(&employees)?,
        Command::Timesheets(timesheets) => listing::timesheets(&timesheets)?,
        Command::Calendar(calendar) => listing::calendar(&calendar)?,
    }

    Ok(())
}

fn get_runtime() -> ApplicationRuntime {
    match ApplicationRuntime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            match err {
                HrError::ApplicationConfig { .. } | HrError::TomlParse { .. } => {
                    eprintln!(
                        "Unable to read the configuration file {}: {err}",
                        hr::config::configuration_file().to_string_lossy()
                    );
                }
                _ => {
                    eprintln!("Failed to create runtime: '{err}'");
                }
            }

            exit(1);
        }
    }
}

fn configure_logging(opts: &Opts) -> Result<()> {
    let mut log_file = env::temp_dir();
    log_file.push("hr-cli.log");

    if opts.verbosity.is_some() {
        println!("Logging to {}", &log_file.to_string_lossy());
    }

    let target = Box::new(File::create(log_file)?);

    // If nothing else was specified in RUST_LOG, use 'warn'
    env_logger::Builder::from_env(Env::default().default_filter_or(opts.verbosity.map_or(
        "warn",
        |lvl| match lvl {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        },
    )))
    .target(env_logger::Target::Pipe(target))
    .init();
    debug!("Logging started");
    Ok(())
}
