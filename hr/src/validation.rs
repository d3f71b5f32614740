//! Form validation for employees and timesheets.
//!
//! Forms arrive as raw strings. Validation either produces the typed payload that can be
//! persisted or a [`ValidationErrors`] map keyed by form field name. Nothing is written when
//! validation fails.
use crate::types::{Department, NewEmployee, NewTimesheet};
use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lowest salary accepted by the employee form.
pub const MIN_SALARY: f64 = 0.0;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
}

/// Field name to messages, serialised as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns `Ok(value)` when no errors were collected.
    #[allow(clippy::missing_errors_doc)]
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

fn required(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed.to_string()
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn date(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    missing: &str,
    label: &str,
) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, missing);
        return None;
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(d) => Some(d),
        Err(_) => {
            errors.add(field, format!("{label} must be a date (YYYY-MM-DD)"));
            None
        }
    }
}

/// Parses the datetime formats produced by `datetime-local` inputs and by the seed data.
#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Raw employee form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl EmployeeForm {
    /// Validates the form. Photo and document paths are attached later by the service.
    #[allow(clippy::missing_errors_doc)]
    pub fn validate(&self) -> Result<NewEmployee, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required(&mut errors, "name", &self.name, "Name is required");
        let email = self.email.trim().to_string();
        if !EMAIL_RE.is_match(&email) {
            errors.add("email", "Invalid email address");
        }
        let phone = required(&mut errors, "phone", &self.phone, "Phone is required");
        let dob = date(
            &mut errors,
            "dob",
            &self.dob,
            "Date of birth is required",
            "Date of birth",
        );
        let job_title = required(
            &mut errors,
            "job_title",
            &self.job_title,
            "Job title is required",
        );
        let department = match self.department.trim().parse::<Department>() {
            Ok(d) => Some(d),
            Err(_) => {
                errors.add(
                    "department",
                    format!(
                        "Department must be one of {}",
                        Department::ALL.map(|d| d.as_str()).join(", ")
                    ),
                );
                None
            }
        };
        let salary = match self.salary.trim().parse::<f64>() {
            Ok(s) if s.is_finite() && s >= MIN_SALARY => Some(s),
            _ => {
                errors.add("salary", "Salary must be a non-negative number");
                None
            }
        };
        let start_date = date(
            &mut errors,
            "start_date",
            &self.start_date,
            "Start date is required",
            "Start date",
        );
        let end_date = match optional(self.end_date.as_deref()) {
            None => None,
            Some(raw) => match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.add("end_date", "End date must be a date (YYYY-MM-DD)");
                    None
                }
            },
        };

        match (dob, department, salary, start_date) {
            (Some(dob), Some(department), Some(salary), Some(start_date)) if errors.is_empty() => {
                Ok(NewEmployee {
                    name,
                    email,
                    phone,
                    dob,
                    job_title,
                    department: department.to_string(),
                    salary,
                    start_date,
                    end_date,
                    photo_path: None,
                    documents: None,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Raw timesheet form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetForm {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub summary: Option<String>,
}

impl TimesheetForm {
    #[allow(clippy::missing_errors_doc)]
    pub fn validate(&self) -> Result<NewTimesheet, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let employee_id = match self.employee_id.trim().parse::<i64>() {
            Ok(id) if id >= 1 => Some(id),
            _ => {
                errors.add("employee_id", "Employee selection is required");
                None
            }
        };
        let start_time = parse_datetime(&self.start_time);
        if start_time.is_none() {
            errors.add("start_time", "Start time is required");
        }
        let end_time = parse_datetime(&self.end_time);
        if end_time.is_none() {
            errors.add("end_time", "End time is required");
        }
        if let (Some(start), Some(end)) = (start_time, end_time) {
            if start >= end {
                errors.add("start_time", "Start time must be before end time");
            }
        }

        match (employee_id, start_time, end_time) {
            (Some(employee_id), Some(start_time), Some(end_time)) => {
                errors.into_result(|| NewTimesheet {
                    employee_id,
                    start_time,
                    end_time,
                    summary: optional(self.summary.as_deref()),
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_employee_form() -> EmployeeForm {
        EmployeeForm {
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            phone: "0987654321".to_string(),
            dob: "1985-05-15".to_string(),
            job_title: "Developer".to_string(),
            department: "Engineering".to_string(),
            salary: "50000".to_string(),
            start_date: "2019-03-15".to_string(),
            end_date: None,
        }
    }

    fn valid_timesheet_form() -> TimesheetForm {
        TimesheetForm {
            employee_id: "2".to_string(),
            start_time: "2025-02-11T12:00".to_string(),
            end_time: "2025-02-11T17:00".to_string(),
            summary: Some("Bug fixes and code review".to_string()),
        }
    }

    #[test]
    fn accepts_a_complete_employee() {
        let employee = valid_employee_form().validate().unwrap();
        assert_eq!(employee.department, "Engineering");
        assert_eq!(employee.end_date, None);
        assert!((employee.salary - 50000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_negative_salary() {
        let form = EmployeeForm {
            salary: "-1".to_string(),
            ..valid_employee_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("salary"),
            Some(&["Salary must be a non-negative number".to_string()][..])
        );
    }

    #[test]
    fn accepts_zero_salary() {
        let form = EmployeeForm {
            salary: "0".to_string(),
            ..valid_employee_form()
        };
        let employee = form.validate().unwrap();
        assert!(employee.salary.abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_missing_and_malformed_fields() {
        let form = EmployeeForm {
            end_date: Some("next tuesday".to_string()),
            ..EmployeeForm::default()
        };
        let errors = form.validate().unwrap_err();
        for field in [
            "name",
            "email",
            "phone",
            "dob",
            "job_title",
            "department",
            "salary",
            "start_date",
            "end_date",
        ] {
            assert!(errors.contains(field), "expected an error for {field}");
        }
    }

    #[test]
    fn rejects_unknown_department() {
        let form = EmployeeForm {
            department: "Creative".to_string(),
            ..valid_employee_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["department"]);
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["jane", "jane@", "jane@example", "ja ne@example.com"] {
            let form = EmployeeForm {
                email: email.to_string(),
                ..valid_employee_form()
            };
            assert!(form.validate().unwrap_err().contains("email"), "{email}");
        }
    }

    #[test]
    fn accepts_a_complete_timesheet() {
        let ts = valid_timesheet_form().validate().unwrap();
        assert_eq!(ts.employee_id, 2);
        assert_eq!(ts.summary.as_deref(), Some("Bug fixes and code review"));
    }

    #[test]
    fn blank_summary_is_none() {
        let form = TimesheetForm {
            summary: Some("   ".to_string()),
            ..valid_timesheet_form()
        };
        assert_eq!(form.validate().unwrap().summary, None);
    }

    #[test]
    fn start_must_precede_end() {
        let form = TimesheetForm {
            end_time: "2025-02-11 12:00:00".to_string(),
            ..valid_timesheet_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("start_time"),
            Some(&["Start time must be before end time".to_string()][..])
        );

        let form = TimesheetForm {
            end_time: "2025-02-11T11:00".to_string(),
            ..valid_timesheet_form()
        };
        assert!(form.validate().unwrap_err().contains("start_time"));
    }

    #[test]
    fn employee_selection_is_required() {
        for id in ["", "0", "abc"] {
            let form = TimesheetForm {
                employee_id: id.to_string(),
                ..valid_timesheet_form()
            };
            assert!(form.validate().unwrap_err().contains("employee_id"), "{id}");
        }
    }

    #[test]
    fn parses_supported_datetime_formats() {
        assert!(parse_datetime("2025-02-10T08:00").is_some());
        assert!(parse_datetime("2025-02-10T08:00:30").is_some());
        assert!(parse_datetime("2025-02-10 08:00:00").is_some());
        assert!(parse_datetime("10/02/2025").is_none());
    }

    #[test]
    fn errors_serialise_as_an_object() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Invalid email address");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"email":["Invalid email address"]}"#);
    }
}
