use hr::validation::{EmployeeForm, TimesheetForm};

pub fn employee_form(name: &str, email: &str, department: &str) -> EmployeeForm {
    EmployeeForm {
        name: name.to_string(),
        email: email.to_string(),
        phone: "1234567890".to_string(),
        dob: "1990-01-01".to_string(),
        job_title: "Developer".to_string(),
        department: department.to_string(),
        salary: "40000".to_string(),
        start_date: "2020-01-01".to_string(),
        end_date: None,
    }
}

pub fn timesheet_form(employee_id: i64, start: &str, end: &str, summary: &str) -> TimesheetForm {
    TimesheetForm {
        employee_id: employee_id.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        summary: Some(summary.to_string()),
    }
}

/// Employees covering every department, with overlapping name fragments for search tests.
pub const STAFF: [(&str, &str, &str); 8] = [
    ("John Doe", "john@example.com", "HR"),
    ("Jane Smith", "jane@example.com", "Engineering"),
    ("Janet Hill", "jhill@corp.io", "HR"),
    ("Bob Stone", "bob.jane@corp.io", "Sales"),
    ("Carla Mendez", "carla@example.com", "Marketing"),
    ("Dmitri Ivanov", "dmitri@example.com", "Engineering"),
    ("Eve Adams", "eve@corp.io", "Sales"),
    ("Frank Moore", "frank@example.com", "Marketing"),
];
