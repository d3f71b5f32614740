use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The departments an employee may be assigned to when created or edited through a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Sales,
    Marketing,
    HR,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Engineering,
        Department::Sales,
        Department::Marketing,
        Department::HR,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::HR => "HR",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .iter()
            .find(|d| d.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownDepartment(s.to_string()))
    }
}

/// An employee record as stored in the `employees` table.
///
/// The department is kept as text, rows written outside the form flow (the seed data, for
/// instance) may carry a department that is not one of [`Department::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub job_title: String,
    pub department: String,
    pub salary: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub photo_path: Option<String>,
    pub documents: Option<String>,
}

/// Validated employee data ready to be inserted or used to overwrite an existing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub job_title: String,
    pub department: String,
    pub salary: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub photo_path: Option<String>,
    pub documents: Option<String>,
}

impl NewEmployee {
    #[must_use]
    pub fn with_id(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            dob: self.dob,
            job_title: self.job_title,
            department: self.department,
            salary: self.salary,
            start_date: self.start_date,
            end_date: self.end_date,
            photo_path: self.photo_path,
            documents: self.documents,
        }
    }
}

/// A block of time worked by an employee.
///
/// `employee_id` is not backed by a foreign key, nothing guarantees the employee exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timesheet {
    pub id: i64,
    pub employee_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimesheet {
    pub employee_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub summary: Option<String>,
}

impl NewTimesheet {
    #[must_use]
    pub fn with_id(self, id: i64) -> Timesheet {
        Timesheet {
            id,
            employee_id: self.employee_id,
            start_time: self.start_time,
            end_time: self.end_time,
            summary: self.summary,
        }
    }
}

/// A timesheet shaped for a calendar widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl From<&Timesheet> for CalendarEvent {
    fn from(ts: &Timesheet) -> Self {
        let title = match ts.summary.as_deref() {
            Some(summary) if !summary.is_empty() => {
                format!("Employee {}: {summary}", ts.employee_id)
            }
            _ => format!("Employee {}", ts.employee_id),
        };
        CalendarEvent {
            id: ts.id.to_string(),
            title,
            start: ts.start_time,
            end: ts.end_time,
        }
    }
}
