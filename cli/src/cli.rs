use std::fmt::{self, Formatter};

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub(crate) enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
/// HR records utility - initialise, seed and query employees and timesheets
///
/// Dates are given as `YYYY-MM-DD`, date and time as `YYYY-MM-DDTHH:MM`, in local time.
#[command(author, version, about)] // Read from Cargo.toml
pub(crate) struct Opts {
    #[command(subcommand)]
    pub cmd: Command,

    #[arg(global = true, short, long)]
    pub verbosity: Option<LogLevel>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Create the database and its tables
    Init,
    /// Insert the demo employees and timesheets
    Seed,
    /// Subcommands for configuration
    Config(Config),
    /// List employees
    Employees(Employees),
    /// List timesheets
    Timesheets(Timesheets),
    /// Print timesheets as calendar events
    Calendar(Calendar),
}

#[derive(Args)]
pub(crate) struct Config {
    #[command(subcommand)]
    pub cmd: ConfigCommand,
}

#[derive(Subcommand, Clone)]
pub(crate) enum ConfigCommand {
    /// Write the current configuration to standard output
    List,
    /// Update the configuration file, creating it if needed
    Update(UpdateConfiguration),
}

#[derive(Args, Clone)]
pub(crate) struct UpdateConfiguration {
    /// Path of the SQLite database file
    #[arg(long)]
    pub database: Option<String>,
    /// Directory holding uploaded photos and documents
    #[arg(long)]
    pub uploads: Option<String>,
    /// Address the HTTP server listens on
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args)]
pub(crate) struct Employees {
    /// Text to look for in name or email, case-insensitive
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only employees of this department
    #[arg(short, long)]
    pub department: Option<String>,
    /// One of name, email, phone, department, job_title
    #[arg(long, default_value = "name")]
    pub sort_field: String,
    /// asc or desc
    #[arg(long, default_value = "asc")]
    pub sort_order: String,
    #[arg(short, long, default_value_t = 1)]
    pub page: i64,
    #[arg(long, default_value_t = 10)]
    pub page_size: i64,
}

#[derive(Args)]
pub(crate) struct Timesheets {
    /// Text to look for in the summary, case-insensitive
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only timesheets of this employee id
    #[arg(short, long)]
    pub employee: Option<i64>,
    /// One of employee_id, start_time, end_time, summary
    #[arg(long, default_value = "start_time")]
    pub sort_field: String,
    /// asc or desc
    #[arg(long, default_value = "asc")]
    pub sort_order: String,
    #[arg(short, long, default_value_t = 1)]
    pub page: i64,
    #[arg(long, default_value_t = 10)]
    pub page_size: i64,
}

#[derive(Args)]
pub(crate) struct Calendar {
    /// Start of the window, e.g. 2025-02-10T00:00
    #[arg(short, long, requires = "to")]
    pub from: Option<String>,
    /// End of the window
    #[arg(short, long, requires = "from")]
    pub to: Option<String>,
}
