//! Parameters of the employee and timesheet listing queries.
//!
//! Everything here arrives as loosely typed request parameters and is normalised before it
//! reaches a repository: blank strings become `None`, unknown sort fields fall back to the
//! default column, and page numbers are clamped into range. The repositories only ever see the
//! fixed column names returned by [`EmployeeSortField::column`] and
//! [`TimesheetSortField::column`].
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeSortField {
    #[default]
    Name,
    Email,
    Phone,
    Department,
    JobTitle,
}

impl EmployeeSortField {
    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            EmployeeSortField::Name => "name",
            EmployeeSortField::Email => "email",
            EmployeeSortField::Phone => "phone",
            EmployeeSortField::Department => "department",
            EmployeeSortField::JobTitle => "job_title",
        }
    }
}

impl From<&str> for EmployeeSortField {
    /// Unrecognised field names sort by name.
    fn from(value: &str) -> Self {
        match value.trim() {
            "email" => EmployeeSortField::Email,
            "phone" => EmployeeSortField::Phone,
            "department" => EmployeeSortField::Department,
            "job_title" => EmployeeSortField::JobTitle,
            _ => EmployeeSortField::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetSortField {
    EmployeeId,
    #[default]
    StartTime,
    EndTime,
    Summary,
}

impl TimesheetSortField {
    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            TimesheetSortField::EmployeeId => "employee_id",
            TimesheetSortField::StartTime => "start_time",
            TimesheetSortField::EndTime => "end_time",
            TimesheetSortField::Summary => "summary",
        }
    }
}

impl From<&str> for TimesheetSortField {
    /// Unrecognised field names sort by start time.
    fn from(value: &str) -> Self {
        match value.trim() {
            "employee_id" => TimesheetSortField::EmployeeId,
            "end_time" => TimesheetSortField::EndTime,
            "summary" => TimesheetSortField::Summary,
            _ => TimesheetSortField::StartTime,
        }
    }
}

/// A 1-based page number and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Pages below 1 are clamped to 1. A page size of 0 selects the default size and sizes
    /// above [`MAX_PAGE_SIZE`] are clamped.
    #[must_use]
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let page_size = match page_size {
            n if n <= 0 => DEFAULT_PAGE_SIZE,
            n => u32::try_from(n.min(i64::from(MAX_PAGE_SIZE))).unwrap_or(MAX_PAGE_SIZE),
        };
        Self { page, page_size }
    }

    /// Builds a page request from raw query string values, unparseable values use the defaults.
    #[must_use]
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = page.and_then(|p| p.trim().parse().ok()).unwrap_or(1);
        let page_size = page_size
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(i64::from(DEFAULT_PAGE_SIZE));
        Self::new(page, page_size)
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of a listing together with the number of rows matching the filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            page_size: request.page_size(),
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> i64 {
        let size = i64::from(self.page_size.max(1));
        (self.total + size - 1) / size
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        i64::from(self.page) < self.total_pages()
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Filter, sort and page parameters of the employee listing.
///
/// With both a search text and a department, rows must be in the department AND have the text
/// in their name OR email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub search: Option<String>,
    pub department: Option<String>,
    pub sort_field: EmployeeSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl EmployeeQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, text: &str) -> Self {
        self.search = non_blank(text);
        self
    }

    #[must_use]
    pub fn department(mut self, department: &str) -> Self {
        self.department = non_blank(department);
        self
    }

    #[must_use]
    pub fn sort_by(mut self, field: &str, order: &str) -> Self {
        self.sort_field = EmployeeSortField::from(field);
        self.sort_order = SortOrder::from(order);
        self
    }

    #[must_use]
    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_id(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(id) = text.parse::<i64>() {
        return Some(id);
    }
    let value = text.parse::<f64>().ok()?;
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then(|| value as i64)
}

/// Filter, sort and page parameters of the timesheet listing.
///
/// Unlike [`EmployeeQuery`] both predicates are combined with AND: the summary must contain the
/// search text and the row must belong to the filtered employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimesheetQuery {
    pub search: Option<String>,
    pub employee_id: Option<i64>,
    pub sort_field: TimesheetSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl TimesheetQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn search(mut self, text: &str) -> Self {
        self.search = non_blank(text);
        self
    }

    /// Sets the employee filter from its textual form. The text is read as a number, so `2.0`
    /// and `2e0` select employee 2; anything that is not an integral number is ignored.
    #[must_use]
    pub fn employee_filter(mut self, employee_id: &str) -> Self {
        self.employee_id = coerce_id(employee_id);
        self
    }

    #[must_use]
    pub fn employee(mut self, employee_id: i64) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    #[must_use]
    pub fn sort_by(mut self, field: &str, order: &str) -> Self {
        self.sort_field = TimesheetSortField::from(field);
        self.sort_order = SortOrder::from(order);
        self
    }

    #[must_use]
    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}
