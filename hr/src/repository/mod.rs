use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// Entity repositories
pub mod employee_repository;
pub mod timesheet_repository;

// Database-related utilities and managers.
pub mod database_manager;
pub mod sqlite;

/// A thread-safe, shared connection to an ``SQLite`` database,
/// used across multiple repository layers.
pub(crate) type SharedSqliteConnection = Arc<Mutex<Connection>>;
