use hr::query::Page;
use hr::types::Employee;
use serde::Serialize;

/// A page of a listing, flattened together with the parameters it was produced from so the
/// client can render the current sort and filter state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Listing<T, P> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: i64,
    #[serde(flatten)]
    pub params: P,
}

impl<T, P> Listing<T, P> {
    pub fn new(page: Page<T>, params: P) -> Self {
        let total_pages = page.total_pages();
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages,
            params,
        }
    }
}

/// An entry of an employee dropdown.
#[derive(Debug, Serialize)]
pub(crate) struct EmployeeOption {
    pub id: i64,
    pub name: String,
}

impl From<&Employee> for EmployeeOption {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
        }
    }
}

pub(crate) fn employee_options(employees: &[Employee]) -> Vec<EmployeeOption> {
    employees.iter().map(EmployeeOption::from).collect()
}
