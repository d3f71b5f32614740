use anyhow::Result;
use hr::config;

use crate::cli::{ConfigCommand, UpdateConfiguration};

fn list() -> Result<()> {
    println!(
        "Configuration file {}:\n",
        config::configuration_file().to_string_lossy()
    );

    match config::load() {
        Ok(config) => {
            let toml_as_string = config::application_config_to_string(&config)?;
            println!("{toml_as_string}");
        }
        Err(e) => {
            eprintln!("ERROR: Unable to read the configuration, reason: {e}");
        }
    }
    Ok(())
}

fn update(settings: UpdateConfiguration) -> Result<()> {
    let mut app_config = config::load()?;

    if let Some(database) = settings.database {
        app_config.database.sqlite_path = database;
    }
    if let Some(uploads) = settings.uploads {
        app_config.uploads.directory = uploads;
    }
    if let Some(address) = settings.address {
        app_config.server.address = address;
    }
    if let Some(port) = settings.port {
        app_config.server.port = port;
    }

    let path = config::save(&app_config)?;
    println!("Configuration saved to {}", path.to_string_lossy());
    Ok(())
}

pub fn execute(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::List => list(),
        ConfigCommand::Update(settings) => update(settings),
    }
}
