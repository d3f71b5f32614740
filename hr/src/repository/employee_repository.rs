use crate::error::HrError;
use crate::query::EmployeeQuery;
use crate::types::{Employee, NewEmployee};

/// All CRUD operations related to the `Employee` entity.
#[cfg_attr(test, mockall::automock)]
pub trait EmployeeRepository: Send + Sync {
    /// Returns the employee with the given id, or `None` when no such row exists.
    ///
    /// # Errors
    /// Returns an `HrError` if the query fails.
    fn find_by_id(&self, id: i64) -> Result<Option<Employee>, HrError>;

    /// Finds the first employee registered with `email`, if any.
    ///
    /// # Errors
    /// Returns an `HrError` if the query fails.
    fn find_by_email(&self, email: &str) -> Result<Option<Employee>, HrError>;

    /// Every employee ordered by name, used to populate selection lists.
    ///
    /// # Errors
    /// Returns an `HrError` if the query fails.
    fn find_all(&self) -> Result<Vec<Employee>, HrError>;

    /// Runs the filtered, sorted and paginated listing.
    ///
    /// # Returns
    /// The rows on the requested page and the number of rows matching the filter, regardless of
    /// pagination.
    ///
    /// # Errors
    /// Returns an `HrError` if either the page query or the count query fails.
    fn find_page(&self, query: &EmployeeQuery) -> Result<(Vec<Employee>, i64), HrError>;

    /// Inserts a new employee and returns the id assigned by the database.
    ///
    /// # Errors
    /// Returns an `HrError` if the insert fails.
    fn insert(&self, employee: &NewEmployee) -> Result<i64, HrError>;

    /// Overwrites every column of the employee with the given id.
    ///
    /// # Returns
    /// The number of rows changed, zero when the id is unknown.
    ///
    /// # Errors
    /// Returns an `HrError` if the update fails.
    fn update(&self, id: i64, employee: &NewEmployee) -> Result<usize, HrError>;

    /// # Errors
    /// Returns an `HrError` if the delete fails.
    fn delete(&self, id: i64) -> Result<usize, HrError>;
}
