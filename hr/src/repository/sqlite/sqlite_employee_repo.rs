use crate::error::HrError;
use crate::query::EmployeeQuery;
use crate::repository::employee_repository::EmployeeRepository;
use crate::repository::sqlite::contains_pattern;
use crate::repository::SharedSqliteConnection;
use crate::types::{Employee, NewEmployee};
use log::debug;
use rusqlite::{named_params, params, OptionalExtension, Row, ToSql};

pub struct SqliteEmployeeRepository {
    connection: SharedSqliteConnection,
}

/// SQL statement to create the `employees` table.
///
/// No `UNIQUE` constraint on email, the service looks for duplicates before inserting.
const CREATE_EMPLOYEE_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS employees (
        id integer primary key autoincrement not null,
        name text not null,
        email text not null,
        phone text not null,
        dob text not null,
        job_title text not null,
        department text not null,
        salary real not null,
        start_date text not null,
        end_date text,
        photo_path text,
        documents text
    );
";

const EMPLOYEE_COLUMNS: &str = "id, name, email, phone, dob, job_title, department, salary, start_date, end_date, photo_path, documents";

/// Creates the `employees` table in the database.
pub(crate) fn create_employee_table(connection: &SharedSqliteConnection) -> Result<(), HrError> {
    let conn = connection.lock().map_err(|_| HrError::LockPoisoned)?;
    conn.execute(CREATE_EMPLOYEE_TABLE_SQL, [])?;
    Ok(())
}

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        dob: row.get(4)?,
        job_title: row.get(5)?,
        department: row.get(6)?,
        salary: row.get(7)?,
        start_date: row.get(8)?,
        end_date: row.get(9)?,
        photo_path: row.get(10)?,
        documents: row.get(11)?,
    })
}

/// Builds the `WHERE` clause of the employee listing together with its bound values.
///
/// department = ? AND (name LIKE ? OR email LIKE ?), with either side omitted when absent.
fn listing_filter(query: &EmployeeQuery) -> (String, Vec<Box<dyn ToSql>>) {
    let mut conditions: Vec<&str> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(department) = &query.department {
        conditions.push("department = ?");
        params.push(Box::new(department.clone()));
    }
    if let Some(search) = &query.search {
        conditions.push("(name LIKE ? ESCAPE '\\' OR email LIKE ? ESCAPE '\\')");
        let pattern = contains_pattern(search);
        params.push(Box::new(pattern.clone()));
        params.push(Box::new(pattern));
    }

    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), params)
    }
}

impl SqliteEmployeeRepository {
    pub(crate) fn new(connection: SharedSqliteConnection) -> Self {
        Self { connection }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository {
    fn find_by_id(&self, id: i64) -> Result<Option<Employee>, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1");
        let employee = conn
            .query_row(&sql, params![id], employee_from_row)
            .optional()?;
        Ok(employee)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Employee>, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let sql =
            format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = ?1 ORDER BY id LIMIT 1");
        let employee = conn
            .query_row(&sql, params![email], employee_from_row)
            .optional()?;
        Ok(employee)
    }

    fn find_all(&self) -> Result<Vec<Employee>, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let mut stmt =
            conn.prepare(&format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY name, id"))?;
        let employees = stmt
            .query_map([], employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    fn find_page(&self, query: &EmployeeQuery) -> Result<(Vec<Employee>, i64), HrError> {
        let (where_clause, mut params) = listing_filter(query);
        let filter_len = params.len();

        // Sort column comes from a closed set, never from the request text
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees{where_clause} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
            query.sort_field.column(),
            query.sort_order.sql(),
        );
        let count_sql = format!("SELECT count(*) FROM employees{where_clause}");
        params.push(Box::new(query.page.limit()));
        params.push(Box::new(query.page.offset()));

        let params_slice: Vec<&dyn ToSql> = params.iter().map(AsRef::as_ref).collect();

        debug!("find_page():- {sql}");

        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;

        let total: i64 =
            conn.query_row(&count_sql, &params_slice[..filter_len], |row| row.get(0))?;

        let mut stmt = conn.prepare(&sql)?;
        let employees = stmt
            .query_map(params_slice.as_slice(), employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok((employees, total))
    }

    fn insert(&self, employee: &NewEmployee) -> Result<i64, HrError> {
        debug!("Adding employee {} <{}> to DBMS", employee.name, employee.email);
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let id = conn
            .query_row(
                r"INSERT INTO employees
                    (name, email, phone, dob, job_title, department, salary, start_date, end_date, photo_path, documents)
                  VALUES
                    (:name, :email, :phone, :dob, :job_title, :department, :salary, :start_date, :end_date, :photo_path, :documents)
                  RETURNING id",
                named_params! {
                    ":name": employee.name,
                    ":email": employee.email,
                    ":phone": employee.phone,
                    ":dob": employee.dob,
                    ":job_title": employee.job_title,
                    ":department": employee.department,
                    ":salary": employee.salary,
                    ":start_date": employee.start_date,
                    ":end_date": employee.end_date,
                    ":photo_path": employee.photo_path,
                    ":documents": employee.documents,
                },
                |row| row.get(0),
            )
            .map_err(|e| HrError::Sql(format!("Unable to insert into employees: {e}")))?;
        Ok(id)
    }

    fn update(&self, id: i64, employee: &NewEmployee) -> Result<usize, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let changes = conn
            .execute(
                r"UPDATE employees
                  SET name = :name, email = :email, phone = :phone, dob = :dob, job_title = :job_title,
                      department = :department, salary = :salary, start_date = :start_date,
                      end_date = :end_date, photo_path = :photo_path, documents = :documents
                  WHERE id = :id",
                named_params! {
                    ":id": id,
                    ":name": employee.name,
                    ":email": employee.email,
                    ":phone": employee.phone,
                    ":dob": employee.dob,
                    ":job_title": employee.job_title,
                    ":department": employee.department,
                    ":salary": employee.salary,
                    ":start_date": employee.start_date,
                    ":end_date": employee.end_date,
                    ":photo_path": employee.photo_path,
                    ":documents": employee.documents,
                },
            )
            .map_err(|e| HrError::Sql(format!("Unable to update employee {id}: {e}")))?;
        debug!("Updated employee {id}, {changes} row(s) changed");
        Ok(changes)
    }

    fn delete(&self, id: i64) -> Result<usize, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let changes = conn.execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PageRequest;
    use crate::repository::sqlite::tests::{new_employee, test_database_manager};
    use std::sync::Arc;

    fn seeded_repo() -> Result<Arc<SqliteEmployeeRepository>, HrError> {
        let repo = test_database_manager()?.create_employee_repository();
        repo.insert(&new_employee("John Doe", "john@example.com", "HR"))?;
        repo.insert(&new_employee("Jane Smith", "jane@example.com", "Engineering"))?;
        Ok(repo)
    }

    fn names(employees: &[Employee]) -> Vec<&str> {
        employees.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_on_name() -> Result<(), HrError> {
        let repo = seeded_repo()?;

        let query = EmployeeQuery::new().search("jane").department("");
        let (employees, total) = repo.find_page(&query)?;

        assert_eq!(total, 1);
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, 2);
        Ok(())
    }

    #[test]
    fn search_matches_email_or_name() -> Result<(), HrError> {
        let repo = seeded_repo()?;
        repo.insert(&new_employee("Bob Stone", "bstone@contoso.com", "Sales"))?;

        let (employees, total) = repo.find_page(&EmployeeQuery::new().search("EXAMPLE.COM"))?;
        assert_eq!(total, 2);
        assert_eq!(names(&employees), vec!["Jane Smith", "John Doe"]);

        let (employees, _) = repo.find_page(&EmployeeQuery::new().search("stone"))?;
        assert_eq!(names(&employees), vec!["Bob Stone"]);
        Ok(())
    }

    #[test]
    fn department_and_search_are_combined() -> Result<(), HrError> {
        let repo = seeded_repo()?;
        repo.insert(&new_employee("Janet Hill", "janet@example.com", "HR"))?;

        let query = EmployeeQuery::new().search("jan").department("HR");
        let (employees, total) = repo.find_page(&query)?;
        assert_eq!(total, 1);
        assert_eq!(names(&employees), vec!["Janet Hill"]);

        let query = EmployeeQuery::new().department("HR");
        let (employees, total) = repo.find_page(&query)?;
        assert_eq!(total, 2);
        assert_eq!(names(&employees), vec!["Janet Hill", "John Doe"]);

        let (_, total) = repo.find_page(&EmployeeQuery::new())?;
        assert_eq!(total, 3);
        Ok(())
    }

    #[test]
    fn wildcards_in_search_are_literal() -> Result<(), HrError> {
        let repo = seeded_repo()?;
        repo.insert(&new_employee("Percy 100%", "percy@example.com", "Sales"))?;

        let (employees, total) = repo.find_page(&EmployeeQuery::new().search("%"))?;
        assert_eq!(total, 1);
        assert_eq!(names(&employees), vec!["Percy 100%"]);

        let (_, total) = repo.find_page(&EmployeeQuery::new().search("_"))?;
        assert_eq!(total, 0);
        Ok(())
    }

    #[test]
    fn pages_are_sliced_and_total_ignores_pagination() -> Result<(), HrError> {
        let repo = test_database_manager()?.create_employee_repository();
        for i in 0..7 {
            repo.insert(&new_employee(
                &format!("Employee {i}"),
                &format!("e{i}@example.com"),
                "Sales",
            ))?;
        }

        for (page, expected) in [(1, 3), (2, 3), (3, 1), (4, 0)] {
            let query = EmployeeQuery::new().page(PageRequest::new(page, 3));
            let (employees, total) = repo.find_page(&query)?;
            assert_eq!(total, 7);
            assert_eq!(employees.len(), expected, "page {page}");
        }

        let query = EmployeeQuery::new().page(PageRequest::new(3, 3));
        let (employees, _) = repo.find_page(&query)?;
        assert_eq!(names(&employees), vec!["Employee 6"]);
        Ok(())
    }

    #[test]
    fn unknown_sort_field_sorts_by_name() -> Result<(), HrError> {
        let repo = seeded_repo()?;
        repo.insert(&new_employee("Alice Johnson", "zz@example.com", "Sales"))?;

        let query = EmployeeQuery::new().sort_by("salary", "desc");
        let (employees, _) = repo.find_page(&query)?;
        assert_eq!(names(&employees), vec!["John Doe", "Jane Smith", "Alice Johnson"]);

        let query = EmployeeQuery::new().sort_by("email", "asc");
        let (employees, _) = repo.find_page(&query)?;
        assert_eq!(names(&employees), vec!["Jane Smith", "John Doe", "Alice Johnson"]);
        Ok(())
    }

    #[test]
    fn update_find_and_delete() -> Result<(), HrError> {
        let repo = seeded_repo()?;

        let mut changed = new_employee("John Doe", "john.doe@example.com", "Sales");
        changed.photo_path = Some("/uploads/photos/1-john.png".to_string());
        assert_eq!(repo.update(1, &changed)?, 1);
        assert_eq!(repo.update(99, &changed)?, 0);

        let john = repo.find_by_id(1)?.expect("employee 1 exists");
        assert_eq!(john.email, "john.doe@example.com");
        assert_eq!(john.photo_path.as_deref(), Some("/uploads/photos/1-john.png"));

        assert_eq!(repo.find_by_email("john.doe@example.com")?.map(|e| e.id), Some(1));
        assert!(repo.find_by_email("john@example.com")?.is_none());

        assert_eq!(repo.delete(1)?, 1);
        assert!(repo.find_by_id(1)?.is_none());
        assert_eq!(repo.find_all()?.len(), 1);
        Ok(())
    }
}
