#[cfg(test)]
#[allow(dead_code)]
mod test_helpers;

use crate::test_helpers::common::create_test_runtime;
use crate::test_helpers::fixtures::{employee_form, timesheet_form};
use hr::error::HrError;
use hr::query::{EmployeeQuery, TimesheetQuery};
use hr::service::employee_service::{EmployeeAttachments, DUPLICATE_EMAIL};
use hr::upload::UploadedFile;
use hr::validation::parse_datetime;

#[test]
fn timesheet_ending_before_it_starts_is_not_stored() -> Result<(), HrError> {
    let (runtime, _uploads) = create_test_runtime()?;
    let service = runtime.timesheet_service();

    for end in ["2025-02-10T09:00", "2025-02-10T08:00"] {
        let form = timesheet_form(1, "2025-02-10T09:00", end, "Backwards");
        match service.create(&form) {
            Err(HrError::Validation(errors)) => {
                assert!(errors.contains("start_time"), "{errors}");
                assert!(!errors.contains("end_time"), "{errors}");
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    assert_eq!(service.list(&TimesheetQuery::new())?.total, 0);
    Ok(())
}

#[test]
fn timesheet_create_edit_and_calendar() -> Result<(), HrError> {
    let (runtime, _uploads) = create_test_runtime()?;
    let service = runtime.timesheet_service();

    let id = service.create(&timesheet_form(7, "2025-02-10T08:00", "2025-02-10T17:00", "Onboarding"))?;
    service.update(id, &timesheet_form(7, "2025-02-10T08:00", "2025-02-10T12:00", "Half day"))?;

    let stored = service.get(id)?;
    assert_eq!(stored.summary.as_deref(), Some("Half day"));
    assert_eq!(stored.end_time, parse_datetime("2025-02-10 12:00:00").unwrap());

    let events = service.calendar(None, None)?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, id.to_string());
    assert_eq!(events[0].title, "Employee 7: Half day");

    assert!(matches!(
        service.update(99, &timesheet_form(7, "2025-02-10T08:00", "2025-02-10T12:00", "")),
        Err(HrError::NotFound { .. })
    ));
    Ok(())
}

#[test]
fn salary_boundary() -> Result<(), HrError> {
    let (runtime, _uploads) = create_test_runtime()?;
    let service = runtime.employee_service();

    let mut form = employee_form("Ann Lee", "ann@example.com", "Sales");
    form.salary = "-1".to_string();
    match service.create(&form, &EmployeeAttachments::default()) {
        Err(HrError::Validation(errors)) => assert!(errors.contains("salary")),
        other => panic!("expected a validation error, got {other:?}"),
    }

    form.salary = "0".to_string();
    let id = service.create(&form, &EmployeeAttachments::default())?;
    assert!((service.get(id)?.salary - 0.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn duplicate_email_is_rejected_on_create_and_update() -> Result<(), HrError> {
    let (runtime, _uploads) = create_test_runtime()?;
    let service = runtime.employee_service();
    let none = EmployeeAttachments::default();

    let john = service.create(&employee_form("John Doe", "john@example.com", "HR"), &none)?;
    let jane = service.create(&employee_form("Jane Smith", "jane@example.com", "Engineering"), &none)?;

    match service.create(&employee_form("Johnny", "john@example.com", "Sales"), &none) {
        Err(HrError::Validation(errors)) => {
            assert_eq!(errors.get("email"), Some(&[DUPLICATE_EMAIL.to_string()][..]));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    // Taking another employee's email fails, keeping your own succeeds
    assert!(matches!(
        service.update(jane, &employee_form("Jane Smith", "john@example.com", "Engineering"), &none),
        Err(HrError::Validation(_))
    ));
    service.update(john, &employee_form("John Doe", "john@example.com", "Marketing"), &none)?;
    assert_eq!(service.get(john)?.department, "Marketing");

    assert_eq!(service.list(&EmployeeQuery::new())?.total, 2);
    Ok(())
}

#[test]
fn attachments_are_stored_and_kept_across_edits() -> Result<(), HrError> {
    let (runtime, uploads) = create_test_runtime()?;
    let service = runtime.employee_service();

    let attachments = EmployeeAttachments {
        photo: Some(UploadedFile::new("me.png", b"png".to_vec())),
        cv: Some(UploadedFile::new("cv.pdf", b"pdf".to_vec())),
    };
    let id = service.create(&employee_form("Ann Lee", "ann@example.com", "Sales"), &attachments)?;

    let created = service.get(id)?;
    let photo = created.photo_path.clone().expect("photo stored");
    let cv = created.documents.clone().expect("cv stored");
    assert!(photo.starts_with("/uploads/photos/") && photo.ends_with("-me.png"), "{photo}");
    assert!(cv.starts_with("/uploads/documents/") && cv.ends_with("-cv.pdf"), "{cv}");

    let on_disk = uploads
        .path()
        .join(photo.trim_start_matches("/uploads/"));
    assert_eq!(std::fs::read(on_disk)?, b"png");

    service.update(
        id,
        &employee_form("Ann Lee", "ann@example.com", "Marketing"),
        &EmployeeAttachments::default(),
    )?;
    let edited = service.get(id)?;
    assert_eq!(edited.photo_path, Some(photo));
    assert_eq!(edited.documents, Some(cv));
    Ok(())
}

#[test]
fn invalid_form_stores_no_attachment() -> Result<(), HrError> {
    let (runtime, uploads) = create_test_runtime()?;
    let service = runtime.employee_service();

    let attachments = EmployeeAttachments {
        photo: Some(UploadedFile::new("me.png", b"png".to_vec())),
        cv: None,
    };
    let mut form = employee_form("Ann Lee", "not-an-email", "Sales");
    form.name.clear();

    match service.create(&form, &attachments) {
        Err(HrError::Validation(errors)) => {
            assert!(errors.contains("name"));
            assert!(errors.contains("email"));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
    assert!(!uploads.path().join("photos").exists());
    Ok(())
}

#[test]
fn seeded_database_answers_listings() -> Result<(), HrError> {
    let (runtime, _uploads) = create_test_runtime()?;
    let summary = hr::seed::run(&runtime)?;
    assert_eq!(summary.employees, 3);
    assert_eq!(summary.timesheets, 3);

    let employees = runtime.employee_service();
    let page = employees.list(&EmployeeQuery::new().search("jane").department(""))?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, 2);

    // Seed rows may carry a department the form would reject
    let creative = employees.list(&EmployeeQuery::new().department("Creative"))?;
    assert_eq!(creative.total, 1);

    let timesheets = runtime.timesheet_service();
    let page = timesheets.list(&TimesheetQuery::new().sort_by("start_time", "desc"))?;
    let summaries: Vec<_> = page.items.iter().filter_map(|t| t.summary.as_deref()).collect();
    assert_eq!(
        summaries,
        vec!["Design brainstorming", "Bug fixes and code review", "Worked on project A"]
    );
    Ok(())
}
