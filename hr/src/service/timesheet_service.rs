use crate::error::HrError;
use crate::query::{Page, TimesheetQuery};
use crate::repository::timesheet_repository::TimesheetRepository;
use crate::types::{CalendarEvent, Timesheet};
use crate::validation::TimesheetForm;
use chrono::NaiveDateTime;
use log::info;
use std::sync::Arc;

/// Timesheet listing, the calendar feed and the create/edit form flows.
pub struct TimesheetService {
    repo: Arc<dyn TimesheetRepository>,
}

impl TimesheetService {
    pub fn new(repo: Arc<dyn TimesheetRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    /// Returns an `HrError` if the repository fails.
    pub fn list(&self, query: &TimesheetQuery) -> Result<Page<Timesheet>, HrError> {
        let (timesheets, total) = self.repo.find_page(query)?;
        Ok(Page::new(timesheets, total, query.page))
    }

    /// # Errors
    /// Returns `HrError::NotFound` if there is no timesheet with the given id.
    pub fn get(&self, id: i64) -> Result<Timesheet, HrError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| HrError::timesheet_not_found(id))
    }

    /// Validates and inserts a timesheet. The employee id is not checked against the
    /// `employees` table.
    ///
    /// # Errors
    /// Returns `HrError::Validation` for an invalid form, or `HrError::Sql` if the insert fails.
    pub fn create(&self, form: &TimesheetForm) -> Result<i64, HrError> {
        let timesheet = form.validate()?;
        let id = self.repo.insert(&timesheet)?;
        info!("Created timesheet {id} for employee {}", timesheet.employee_id);
        Ok(id)
    }

    /// # Errors
    /// Returns `HrError::Validation` for an invalid form and `HrError::NotFound` when no row
    /// has the given id.
    pub fn update(&self, id: i64, form: &TimesheetForm) -> Result<(), HrError> {
        let timesheet = form.validate()?;
        match self.repo.update(id, &timesheet)? {
            0 => Err(HrError::timesheet_not_found(id)),
            _ => Ok(()),
        }
    }

    /// # Errors
    /// Returns `HrError::NotFound` when no row has the given id.
    pub fn delete(&self, id: i64) -> Result<(), HrError> {
        match self.repo.delete(id)? {
            0 => Err(HrError::timesheet_not_found(id)),
            _ => Ok(()),
        }
    }

    /// Calendar events for the timesheets overlapping `[from, to)`, or for every timesheet when
    /// either bound is missing.
    ///
    /// # Errors
    /// Returns an `HrError` if the repository fails.
    pub fn calendar(
        &self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
    ) -> Result<Vec<CalendarEvent>, HrError> {
        let timesheets = match (from, to) {
            (Some(from), Some(to)) => self.repo.find_between(from, to)?,
            _ => self.repo.find_all()?,
        };
        Ok(timesheets.iter().map(CalendarEvent::from).collect())
    }
}
