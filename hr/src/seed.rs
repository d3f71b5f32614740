//! Demo records for a fresh database.
//!
//! Rows are written straight through the repositories, bypassing form validation, so the data
//! set can contain a department outside the selectable ones.
use crate::error::HrError;
use crate::repository::employee_repository::EmployeeRepository;
use crate::repository::timesheet_repository::TimesheetRepository;
use crate::types::{NewEmployee, NewTimesheet};
use crate::ApplicationRuntime;
use chrono::{NaiveDate, NaiveDateTime};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub employees: usize,
    pub timesheets: usize,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, 0, 0).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn employee(
    name: &str,
    email: &str,
    phone: &str,
    dob: NaiveDate,
    job_title: &str,
    department: &str,
    salary: f64,
    start_date: NaiveDate,
) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        dob,
        job_title: job_title.to_string(),
        department: department.to_string(),
        salary,
        start_date,
        end_date: None,
        photo_path: None,
        documents: None,
    }
}

#[must_use]
pub fn demo_employees() -> Vec<NewEmployee> {
    vec![
        employee(
            "John Doe",
            "john@example.com",
            "1234567890",
            date(1990, 1, 1),
            "Manager",
            "HR",
            30000.0,
            date(2020, 1, 1),
        ),
        employee(
            "Jane Smith",
            "jane@example.com",
            "0987654321",
            date(1985, 5, 15),
            "Developer",
            "Engineering",
            50000.0,
            date(2019, 3, 15),
        ),
        employee(
            "Alice Johnson",
            "alice@example.com",
            "5551234567",
            date(1992, 8, 21),
            "Designer",
            "Creative",
            40000.0,
            date(2021, 7, 1),
        ),
    ]
}

/// Timesheets for the employees of [`demo_employees`], which get ids 1 to 3 in an empty
/// database.
#[must_use]
pub fn demo_timesheets() -> Vec<NewTimesheet> {
    let rows = [
        (1, date(2025, 2, 10), 8, 17, "Worked on project A"),
        (2, date(2025, 2, 11), 12, 17, "Bug fixes and code review"),
        (3, date(2025, 2, 12), 7, 16, "Design brainstorming"),
    ];
    rows.iter()
        .map(|&(employee_id, day, from, to, summary)| NewTimesheet {
            employee_id,
            start_time: at(day, from),
            end_time: at(day, to),
            summary: Some(summary.to_string()),
        })
        .collect()
}

/// Inserts the demo employees and timesheets.
///
/// # Errors
/// Returns an `HrError` if an insert fails. Rows inserted before the failure are kept.
pub fn run(runtime: &ApplicationRuntime) -> Result<SeedSummary, HrError> {
    let employees = runtime.database().create_employee_repository();
    let timesheets = runtime.database().create_timesheet_repository();

    let mut summary = SeedSummary {
        employees: 0,
        timesheets: 0,
    };
    for e in demo_employees() {
        employees.insert(&e)?;
        summary.employees += 1;
    }
    for t in demo_timesheets() {
        timesheets.insert(&t)?;
        summary.timesheets += 1;
    }
    info!(
        "Seeded {} employees and {} timesheets",
        summary.employees, summary.timesheets
    );
    Ok(summary)
}
