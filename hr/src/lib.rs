//! Employee records and timesheets.
//!
//! The [`ApplicationRuntime`] owns the connection to the records database and the services built
//! on top of it. It is created once by the hosting process and handed to whatever needs it;
//! there is no global database handle.
use crate::error::HrError;
use config::AppConfiguration;
use repository::database_manager::{DatabaseConfig, DatabaseManager};
use service::employee_service::EmployeeService;
use service::timesheet_service::TimesheetService;
use std::path::PathBuf;
use std::sync::Arc;
use upload::UploadStore;

pub mod config;
pub mod error;
pub mod query;
pub mod repository;
pub mod seed;
pub mod service;
pub mod types;
pub mod upload;
pub mod validation;

pub struct ApplicationRuntime {
    config: AppConfiguration,
    database: DatabaseManager,
    uploads: Arc<UploadStore>,
    employee_service: Arc<EmployeeService>,
    timesheet_service: Arc<TimesheetService>,
}

impl ApplicationRuntime {
    /// Creates a runtime from the configuration file, see [`config::load`].
    ///
    /// # Errors
    ///
    /// - Returns an error if the configuration fails to load.
    /// - Returns an error if the records database cannot be opened or initialised.
    pub fn new() -> Result<Self, HrError> {
        ApplicationRuntimeBuilder::new()
            .with_config(config::load()?)
            .build()
    }

    #[must_use]
    pub fn config(&self) -> &AppConfiguration {
        &self.config
    }

    #[must_use]
    pub fn database(&self) -> &DatabaseManager {
        &self.database
    }

    #[must_use]
    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    #[must_use]
    pub fn employee_service(&self) -> Arc<EmployeeService> {
        self.employee_service.clone()
    }

    #[must_use]
    pub fn timesheet_service(&self) -> Arc<TimesheetService> {
        self.timesheet_service.clone()
    }
}

/// Assembles an [`ApplicationRuntime`], defaulting every part not explicitly set to the values
/// of the configuration.
#[derive(Default)]
pub struct ApplicationRuntimeBuilder {
    config: Option<AppConfiguration>,
    database: Option<DatabaseConfig>,
    upload_dir: Option<PathBuf>,
}

impl ApplicationRuntimeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfiguration) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn use_in_memory_db(mut self) -> Self {
        self.database = Some(DatabaseConfig::SqliteInMemory);
        self
    }

    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(DatabaseConfig::SqliteOnDisk { path: path.into() });
        self
    }

    #[must_use]
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    /// # Errors
    /// Returns an error if the records database cannot be opened or initialised.
    pub fn build(self) -> Result<ApplicationRuntime, HrError> {
        let config = self.config.unwrap_or_default();
        let database_config = self.database.unwrap_or_else(|| DatabaseConfig::SqliteOnDisk {
            path: PathBuf::from(&config.database.sqlite_path),
        });
        let upload_dir = self
            .upload_dir
            .unwrap_or_else(|| PathBuf::from(&config.uploads.directory));

        let database = DatabaseManager::new(&database_config)?;
        let uploads = Arc::new(UploadStore::new(upload_dir));
        let employee_service = Arc::new(EmployeeService::new(
            database.create_employee_repository(),
            uploads.clone(),
        ));
        let timesheet_service = Arc::new(TimesheetService::new(
            database.create_timesheet_repository(),
        ));

        Ok(ApplicationRuntime {
            config,
            database,
            uploads,
            employee_service,
            timesheet_service,
        })
    }
}
