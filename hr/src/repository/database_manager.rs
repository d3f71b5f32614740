use crate::error::HrError;
use crate::repository::sqlite;
use crate::repository::sqlite::sqlite_employee_repo::SqliteEmployeeRepository;
use crate::repository::sqlite::sqlite_timesheet_repo::SqliteTimesheetRepository;
use crate::repository::SharedSqliteConnection;
use log::debug;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Represents parameters for initializing the database connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// SQLite database with a specific file path
    SqliteOnDisk { path: PathBuf },

    /// SQLite database that runs entirely in memory
    SqliteInMemory,
}

/// Owns the single connection to the records database and hands out repositories sharing it.
///
/// One manager is created by the process that owns the runtime and passed down explicitly.
pub struct DatabaseManager {
    connection: SharedSqliteConnection,
}

impl DatabaseManager {
    /// Opens the database described by `config` and creates any missing tables.
    ///
    /// # Errors
    /// Returns an `HrError` if the database cannot be opened or the schema cannot be created.
    pub fn new(config: &DatabaseConfig) -> Result<Self, HrError> {
        let connection = match config {
            DatabaseConfig::SqliteOnDisk { path } => {
                debug!("Opening records database {}", path.display());
                sqlite::create_connection(path)?
            }
            DatabaseConfig::SqliteInMemory => Connection::open_in_memory()?,
        };

        let connection = Arc::new(Mutex::new(connection));
        sqlite::create_schema(&connection)?;

        Ok(Self { connection })
    }

    /// Provide access to the shared database connection.
    pub(crate) fn get_connection(&self) -> SharedSqliteConnection {
        self.connection.clone()
    }

    #[must_use]
    pub fn create_employee_repository(&self) -> Arc<SqliteEmployeeRepository> {
        Arc::new(SqliteEmployeeRepository::new(self.get_connection()))
    }

    #[must_use]
    pub fn create_timesheet_repository(&self) -> Arc<SqliteTimesheetRepository> {
        Arc::new(SqliteTimesheetRepository::new(self.get_connection()))
    }
}
