pub mod employee_service;
pub mod timesheet_service;
