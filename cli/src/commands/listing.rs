use anyhow::{bail, Result};
use hr::query::{EmployeeQuery, Page, PageRequest, TimesheetQuery};
use hr::validation::parse_datetime;

use crate::cli::{Calendar, Employees, Timesheets};
use crate::get_runtime;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn page_footer<T>(page: &Page<T>) {
    println!(
        "\nPage {} of {} ({} matching)",
        page.page,
        page.total_pages().max(1),
        page.total
    );
}

pub fn employees(args: &Employees) -> Result<()> {
    let query = EmployeeQuery::new()
        .search(args.search.as_deref().unwrap_or_default())
        .department(args.department.as_deref().unwrap_or_default())
        .sort_by(&args.sort_field, &args.sort_order)
        .page(PageRequest::new(args.page, args.page_size));

    let page = get_runtime().employee_service().list(&query)?;

    println!(
        "{:>5} {:<24} {:<28} {:<14} {:<20} {:<12}",
        "Id", "Name", "Email", "Phone", "Job title", "Department"
    );
    println!("{}", "-".repeat(108));
    for e in &page.items {
        println!(
            "{:>5} {:<24} {:<28} {:<14} {:<20} {:<12}",
            e.id, e.name, e.email, e.phone, e.job_title, e.department
        );
    }
    page_footer(&page);
    Ok(())
}

pub fn timesheets(args: &Timesheets) -> Result<()> {
    let mut query = TimesheetQuery::new()
        .search(args.search.as_deref().unwrap_or_default())
        .sort_by(&args.sort_field, &args.sort_order)
        .page(PageRequest::new(args.page, args.page_size));
    if let Some(employee_id) = args.employee {
        query = query.employee(employee_id);
    }

    let page = get_runtime().timesheet_service().list(&query)?;

    println!(
        "{:>5} {:>8} {:<16} {:<16} {}",
        "Id", "Employee", "Start", "End", "Summary"
    );
    println!("{}", "-".repeat(80));
    for t in &page.items {
        println!(
            "{:>5} {:>8} {:<16} {:<16} {}",
            t.id,
            t.employee_id,
            t.start_time.format(DATE_TIME_FORMAT),
            t.end_time.format(DATE_TIME_FORMAT),
            t.summary.as_deref().unwrap_or("")
        );
    }
    page_footer(&page);
    Ok(())
}

pub fn calendar(args: &Calendar) -> Result<()> {
    let bound = |value: Option<&str>| -> Result<_> {
        match value {
            None => Ok(None),
            Some(v) => match parse_datetime(v) {
                Some(dt) => Ok(Some(dt)),
                None => bail!("'{v}' is not a date and time, use YYYY-MM-DDTHH:MM"),
            },
        }
    };
    let from = bound(args.from.as_deref())?;
    let to = bound(args.to.as_deref())?;

    for event in get_runtime().timesheet_service().calendar(from, to)? {
        println!(
            "{} - {}  {}",
            event.start.format(DATE_TIME_FORMAT),
            event.end.format(DATE_TIME_FORMAT),
            event.title
        );
    }
    Ok(())
}
