use anyhow::Result;
use hr::config;

use crate::get_runtime;

/// Opens the database, creating the file and tables if needed, and writes a configuration file
/// when there is none.
pub fn init() -> Result<()> {
    let runtime = get_runtime();
    println!("Database ready in {}", runtime.config().database.sqlite_path);

    if config::configuration_file().exists() {
        println!(
            "Using configuration file {}",
            config::configuration_file().to_string_lossy()
        );
    } else {
        let path = config::save(runtime.config())?;
        println!("Configuration written to {}", path.to_string_lossy());
    }
    Ok(())
}

pub fn seed() -> Result<()> {
    let runtime = get_runtime();
    let summary = hr::seed::run(&runtime)?;
    println!(
        "Inserted {} employees and {} timesheets",
        summary.employees, summary.timesheets
    );
    Ok(())
}
