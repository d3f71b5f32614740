use crate::error::HrError;
use crate::repository::SharedSqliteConnection;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub mod sqlite_employee_repo;
pub mod sqlite_timesheet_repo;

/// Creates the entire database schema by running schema creation functions for all entities.
pub(crate) fn create_schema(connection: &SharedSqliteConnection) -> Result<(), HrError> {
    sqlite_employee_repo::create_employee_table(connection)?;
    sqlite_timesheet_repo::create_timesheet_table(connection)?;
    Ok(())
}

pub(crate) fn create_connection(dbms_path: &Path) -> Result<Connection, HrError> {
    if let Some(parent) = dbms_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Connection::open(dbms_path).map_err(|e| HrError::OpenDbms {
        path: dbms_path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Turns free text into a `LIKE` pattern matching it anywhere in a column.
///
/// The wildcards `%` and `_` and the escape character itself are matched literally; the
/// pattern must be used with `ESCAPE '\'`.
pub(crate) fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
pub(crate) mod tests;
