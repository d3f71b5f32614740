use crate::error::HrError;
use anyhow::Result;
use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Environment variable overriding the location of the configuration file.
pub const CONFIG_ENV_VAR: &str = "HR_CONFIG";

/// Application configuration struct
/// Holds the location of the records database, the upload directory and the HTTP listener.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct AppConfiguration {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub uploads: UploadSettings,
}

/// Holds the configuration for the `database` section of the Toml file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct DatabaseSettings {
    /// The path to the SQLite file holding employees and timesheets
    pub sqlite_path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            sqlite_path: database_file().to_string_lossy().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ServerSettings {
    pub address: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            address: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct UploadSettings {
    /// Root directory of uploaded photos and documents
    pub directory: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            directory: upload_dir().to_string_lossy().to_string(),
        }
    }
}

/// Filename holding the application configuration parameters
#[must_use]
pub fn configuration_file() -> PathBuf {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join("hr.toml"),
        None => PathBuf::from("hr.toml"),
    }
}

/// Filename of the Sqlite DBMS holding the employee and timesheet records
#[must_use]
pub fn database_file() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join("hr.db"),
        None => PathBuf::from("hr.db"),
    }
}

#[must_use]
pub fn upload_dir() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join("uploads"),
        None => PathBuf::from("uploads"),
    }
}

/// Loads the configuration file, falling back to the defaults when there is none.
#[allow(clippy::missing_errors_doc)]
pub fn load() -> Result<AppConfiguration, HrError> {
    let config_path = configuration_file();
    if !config_path.exists() {
        info!(
            "No configuration file at {}, using defaults",
            config_path.display()
        );
        return Ok(AppConfiguration::default());
    }
    read(&config_path)
}

#[allow(clippy::missing_errors_doc)]
pub fn save(cfg: &AppConfiguration) -> Result<PathBuf> {
    let path = configuration_file();
    create_configuration_file(cfg, &path)?;
    Ok(path)
}

#[allow(clippy::missing_errors_doc)]
pub fn application_config_to_string(cfg: &AppConfiguration) -> Result<String> {
    Ok(toml::to_string::<AppConfiguration>(cfg)?)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "hr", "hr-records")
}

/// Reads the `Application` configuration struct from the supplied TOML file
#[allow(clippy::missing_errors_doc)]
pub fn read(path: &Path) -> Result<AppConfiguration, HrError> {
    let mut file = File::open(path).map_err(|source| HrError::ApplicationConfig {
        path: path.into(),
        source,
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|source| HrError::ApplicationConfig {
            path: path.into(),
            source,
        })?;
    toml::from_str::<AppConfiguration>(&contents).map_err(|source| HrError::TomlParse {
        path: path.into(),
        source,
    })
}

fn create_configuration_file(cfg: &AppConfiguration, path: &Path) -> Result<()> {
    if let Some(directory) = path.parent() {
        if !directory.as_os_str().is_empty() && !directory.try_exists()? {
            fs::create_dir_all(directory)?;
        }
    }

    let mut file = File::create(path).map_err(|_src_err| HrError::ConfigFileCreation {
        path: path.to_path_buf(),
    })?;
    let toml = application_config_to_string(cfg)?;
    file.write_all(toml.as_bytes())?;

    Ok(())
}
