use std::{io, path::PathBuf};

use crate::validation::ValidationErrors;
use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum HrError {
    #[error("Unable to load the application configuration file {path:?}")]
    ApplicationConfig { path: PathBuf, source: io::Error },
    #[error("Unable to parse contents of {path}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Unable to create configuration file {path}")]
    ConfigFileCreation { path: PathBuf },
    #[error("Unable to open DBMS in file {path}: {reason}")]
    OpenDbms { path: String, reason: String },
    #[error("SQL dbms error: {0}")]
    Sql(String),
    #[error("Directory creation failed")]
    CreateDir(#[from] io::Error),
    #[error("Unable to store uploaded file {path}: {source}")]
    Upload { path: PathBuf, source: io::Error },
    #[error("Mutex locking error")]
    LockPoisoned,
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

impl HrError {
    #[must_use]
    pub fn employee_not_found(id: i64) -> Self {
        HrError::NotFound {
            entity: "Employee",
            id,
        }
    }

    #[must_use]
    pub fn timesheet_not_found(id: i64) -> Self {
        HrError::NotFound {
            entity: "Timesheet",
            id,
        }
    }
}

impl From<rusqlite::Error> for HrError {
    fn from(err: rusqlite::Error) -> Self {
        HrError::Sql(format!("Sqlite error {err}"))
    }
}

impl From<ValidationErrors> for HrError {
    fn from(errors: ValidationErrors) -> Self {
        HrError::Validation(errors)
    }
}
