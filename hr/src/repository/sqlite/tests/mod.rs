
use super::*;
use crate::repository::database_manager::{DatabaseConfig, DatabaseManager};
use crate::types::{NewEmployee, NewTimesheet};
use chrono::NaiveDate;

/// Creates a `DatabaseManager` with an in-memory database suitable for testing.
pub fn test_database_manager() -> Result<DatabaseManager, HrError> {
    DatabaseManager::new(&DatabaseConfig::SqliteInMemory)
}

#[test]
fn contains_pattern_escapes_wildcards() {
    assert_eq!(contains_pattern("jane"), "%jane%");
    assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
    assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
}

/// An employee with plausible values for every required column.
pub fn new_employee(name: &str, email: &str, department: &str) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        email: email.to_string(),
        phone: "1234567890".to_string(),
        dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        job_title: "Manager".to_string(),
        department: department.to_string(),
        salary: 30000.0,
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        end_date: None,
        photo_path: None,
        documents: None,
    }
}

/// A timesheet for `employee_id` starting at `start` ("YYYY-MM-DD HH:MM:SS") and lasting `hours`.
pub fn new_timesheet(employee_id: i64, start: &str, hours: i64, summary: Option<&str>) -> NewTimesheet {
    let start_time = crate::validation::parse_datetime(start).unwrap();
    NewTimesheet {
        employee_id,
        start_time,
        end_time: start_time + chrono::Duration::hours(hours),
        summary: summary.map(ToString::to_string),
    }
}
