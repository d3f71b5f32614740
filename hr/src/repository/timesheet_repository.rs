use crate::error::HrError;
use crate::query::TimesheetQuery;
use crate::types::{NewTimesheet, Timesheet};
use chrono::NaiveDateTime;

/// All CRUD operations related to the `Timesheet` entity.
#[cfg_attr(test, mockall::automock)]
pub trait TimesheetRepository: Send + Sync {
    /// # Errors
    /// Returns an `HrError` if the query fails.
    fn find_by_id(&self, id: i64) -> Result<Option<Timesheet>, HrError>;

    /// Runs the filtered, sorted and paginated listing.
    ///
    /// # Returns
    /// The rows on the requested page and the number of rows matching the filter.
    ///
    /// # Errors
    /// Returns an `HrError` if either the page query or the count query fails.
    fn find_page(&self, query: &TimesheetQuery) -> Result<(Vec<Timesheet>, i64), HrError>;

    /// Finds the timesheets overlapping the window `[from, to)`, ordered by start time.
    ///
    /// # Errors
    /// Returns an `HrError` if the query fails.
    fn find_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Timesheet>, HrError>;

    /// Every timesheet ordered by start time.
    ///
    /// # Errors
    /// Returns an `HrError` if the query fails.
    fn find_all(&self) -> Result<Vec<Timesheet>, HrError>;

    /// # Errors
    /// Returns an `HrError` if the insert fails.
    fn insert(&self, timesheet: &NewTimesheet) -> Result<i64, HrError>;

    /// # Errors
    /// Returns an `HrError` if the update fails.
    fn update(&self, id: i64, timesheet: &NewTimesheet) -> Result<usize, HrError>;

    /// # Errors
    /// Returns an `HrError` if the delete fails.
    fn delete(&self, id: i64) -> Result<usize, HrError>;
}
