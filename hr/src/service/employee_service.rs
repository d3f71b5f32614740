//! Employee listing, lookup and the create/edit form flows.
//!
//! A form is validated before anything is written: uploaded files are only stored, and rows only
//! inserted or updated, once the whole form is valid and the email is not used by another
//! employee.
use crate::error::HrError;
use crate::query::{EmployeeQuery, Page};
use crate::repository::employee_repository::EmployeeRepository;
use crate::types::{Employee, NewEmployee};
use crate::upload::{UploadKind, UploadStore, UploadedFile};
use crate::validation::{EmployeeForm, ValidationErrors};
use log::{debug, info};
use std::sync::Arc;

pub const DUPLICATE_EMAIL: &str = "An employee with this email already exists";

/// Files submitted together with an employee form.
#[derive(Debug, Clone, Default)]
pub struct EmployeeAttachments {
    pub photo: Option<UploadedFile>,
    pub cv: Option<UploadedFile>,
}

pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
    uploads: Arc<UploadStore>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>, uploads: Arc<UploadStore>) -> Self {
        Self { repo, uploads }
    }

    /// Runs the employee listing.
    ///
    /// # Errors
    /// Returns an `HrError` if the repository fails.
    pub fn list(&self, query: &EmployeeQuery) -> Result<Page<Employee>, HrError> {
        let (employees, total) = self.repo.find_page(query)?;
        Ok(Page::new(employees, total, query.page))
    }

    /// # Errors
    /// Returns `HrError::NotFound` if there is no employee with the given id.
    pub fn get(&self, id: i64) -> Result<Employee, HrError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| HrError::employee_not_found(id))
    }

    /// Every employee, ordered by name.
    ///
    /// # Errors
    /// Returns an `HrError` if the repository fails.
    pub fn all(&self) -> Result<Vec<Employee>, HrError> {
        self.repo.find_all()
    }

    /// Validates the form, stores the attachments and inserts the employee.
    ///
    /// # Returns
    /// The id of the new employee.
    ///
    /// # Errors
    /// * `HrError::Validation` if a field is invalid or the email is already registered.
    /// * `HrError::Upload` if an attachment cannot be written.
    /// * `HrError::Sql` if the insert fails.
    pub fn create(
        &self,
        form: &EmployeeForm,
        attachments: &EmployeeAttachments,
    ) -> Result<i64, HrError> {
        let mut employee = form.validate()?;

        // Check-then-insert, two concurrent submissions may both pass
        if self.repo.find_by_email(&employee.email)?.is_some() {
            return Err(duplicate_email().into());
        }

        self.attach(&mut employee, attachments)?;
        let id = self.repo.insert(&employee)?;
        info!("Created employee {id} <{}>", employee.email);
        Ok(id)
    }

    /// Validates the form and overwrites the employee with the given id.
    ///
    /// A photo or CV that is not re-uploaded keeps its previously stored path.
    ///
    /// # Errors
    /// * `HrError::NotFound` if there is no employee with the given id.
    /// * `HrError::Validation` if a field is invalid or the email belongs to another employee.
    /// * `HrError::Upload` or `HrError::Sql` if storing fails.
    pub fn update(
        &self,
        id: i64,
        form: &EmployeeForm,
        attachments: &EmployeeAttachments,
    ) -> Result<(), HrError> {
        let current = self.get(id)?;
        let mut employee = form.validate()?;

        if let Some(other) = self.repo.find_by_email(&employee.email)? {
            if other.id != id {
                return Err(duplicate_email().into());
            }
        }

        employee.photo_path = current.photo_path;
        employee.documents = current.documents;
        self.attach(&mut employee, attachments)?;

        if self.repo.update(id, &employee)? == 0 {
            // Deleted between the lookup and the update
            return Err(HrError::employee_not_found(id));
        }
        debug!("Updated employee {id}");
        Ok(())
    }

    /// # Errors
    /// Returns `HrError::NotFound` if there is no employee with the given id.
    pub fn delete(&self, id: i64) -> Result<(), HrError> {
        match self.repo.delete(id)? {
            0 => Err(HrError::employee_not_found(id)),
            _ => Ok(()),
        }
    }

    fn attach(
        &self,
        employee: &mut NewEmployee,
        attachments: &EmployeeAttachments,
    ) -> Result<(), HrError> {
        if let Some(photo) = &attachments.photo {
            if let Some(path) = self.uploads.store(UploadKind::Photo, photo)? {
                employee.photo_path = Some(path);
            }
        }
        if let Some(cv) = &attachments.cv {
            if let Some(path) = self.uploads.store(UploadKind::Document, cv)? {
                employee.documents = Some(path);
            }
        }
        Ok(())
    }
}

fn duplicate_email() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add("email", DUPLICATE_EMAIL);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::employee_repository::MockEmployeeRepository;
    use chrono::NaiveDate;

    fn form() -> EmployeeForm {
        EmployeeForm {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: "1234567890".to_string(),
            dob: "1990-01-01".to_string(),
            job_title: "Manager".to_string(),
            department: "HR".to_string(),
            salary: "30000".to_string(),
            start_date: "2020-01-01".to_string(),
            end_date: None,
        }
    }

    fn stored(id: i64, email: &str) -> Employee {
        Employee {
            id,
            name: "John Doe".to_string(),
            email: email.to_string(),
            phone: "1234567890".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            job_title: "Manager".to_string(),
            department: "HR".to_string(),
            salary: 30000.0,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: None,
            photo_path: Some("/uploads/photos/1-john.png".to_string()),
            documents: None,
        }
    }

    fn service(repo: MockEmployeeRepository, uploads: &std::path::Path) -> EmployeeService {
        EmployeeService::new(Arc::new(repo), Arc::new(UploadStore::new(uploads)))
    }

    #[test]
    fn invalid_form_never_reaches_the_repository() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_insert().never();
        let dir = tempfile::tempdir().unwrap();
        let photo = UploadedFile::new("me.png", vec![1]);

        let result = service(repo, dir.path()).create(
            &EmployeeForm {
                salary: "-1".to_string(),
                ..form()
            },
            &EmployeeAttachments {
                photo: Some(photo),
                cv: None,
            },
        );

        match result {
            Err(HrError::Validation(errors)) => assert!(errors.contains("salary")),
            other => panic!("expected a validation error, got {other:?}"),
        }
        assert!(!dir.path().join("photos").exists(), "no file may be written");
    }

    #[test]
    fn duplicate_email_is_a_validation_error() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored(1, email))));
        repo.expect_insert().never();
        let dir = tempfile::tempdir().unwrap();

        let result = service(repo, dir.path()).create(&form(), &EmployeeAttachments::default());

        match result {
            Err(HrError::Validation(errors)) => {
                assert_eq!(errors.get("email"), Some(&[DUPLICATE_EMAIL.to_string()][..]));
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_stores_attachments_and_inserts() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|e| {
                e.photo_path
                    .as_deref()
                    .is_some_and(|p| p.starts_with("/uploads/photos/"))
                    && e.documents.is_none()
            })
            .times(1)
            .returning(|_| Ok(5));
        let dir = tempfile::tempdir().unwrap();

        let attachments = EmployeeAttachments {
            photo: Some(UploadedFile::new("me.png", vec![1, 2])),
            cv: Some(UploadedFile::new("cv.pdf", vec![])),
        };
        let id = service(repo, dir.path()).create(&form(), &attachments).unwrap();
        assert_eq!(id, 5);
    }

    #[test]
    fn update_preserves_existing_photo() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "john@example.com"))));
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored(3, email))));
        repo.expect_update()
            .withf(|id, e| {
                *id == 3 && e.photo_path.as_deref() == Some("/uploads/photos/1-john.png")
            })
            .times(1)
            .returning(|_, _| Ok(1));
        let dir = tempfile::tempdir().unwrap();

        service(repo, dir.path())
            .update(3, &form(), &EmployeeAttachments::default())
            .unwrap();
    }

    #[test]
    fn update_rejects_email_of_another_employee() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored(id, "john@example.com"))));
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored(9, email))));
        repo.expect_update().never();
        let dir = tempfile::tempdir().unwrap();

        let result = service(repo, dir.path()).update(3, &form(), &EmployeeAttachments::default());
        assert!(matches!(result, Err(HrError::Validation(_))));
    }

    #[test]
    fn missing_employee_is_not_found() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().returning(|_| Ok(0));
        let dir = tempfile::tempdir().unwrap();
        let service = service(repo, dir.path());

        assert!(matches!(service.get(7), Err(HrError::NotFound { id: 7, .. })));
        assert!(matches!(
            service.update(7, &form(), &EmployeeAttachments::default()),
            Err(HrError::NotFound { .. })
        ));
        assert!(matches!(service.delete(7), Err(HrError::NotFound { .. })));
    }
}
