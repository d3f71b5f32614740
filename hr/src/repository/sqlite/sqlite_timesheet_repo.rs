use crate::error::HrError;
use crate::query::TimesheetQuery;
use crate::repository::sqlite::contains_pattern;
use crate::repository::timesheet_repository::TimesheetRepository;
use crate::repository::SharedSqliteConnection;
use crate::types::{NewTimesheet, Timesheet};
use chrono::NaiveDateTime;
use log::debug;
use rusqlite::{params, OptionalExtension, Row, ToSql};

pub struct SqliteTimesheetRepository {
    connection: SharedSqliteConnection,
}

/// SQL statement to create the `timesheets` table.
const CREATE_TIMESHEET_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS timesheets (
        id integer primary key autoincrement not null,
        employee_id integer not null,
        start_time text not null,
        end_time text not null,
        summary text
    );
";

const TIMESHEET_COLUMNS: &str = "id, employee_id, start_time, end_time, summary";

/// Creates the `timesheets` table in the database.
pub(crate) fn create_timesheet_table(connection: &SharedSqliteConnection) -> Result<(), HrError> {
    let conn = connection.lock().map_err(|_| HrError::LockPoisoned)?;
    conn.execute(CREATE_TIMESHEET_TABLE_SQL, [])?;
    Ok(())
}

fn timesheet_from_row(row: &Row<'_>) -> rusqlite::Result<Timesheet> {
    Ok(Timesheet {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        summary: row.get(4)?,
    })
}

/// Builds the `WHERE` clause of the timesheet listing, both predicates are joined with AND.
fn listing_filter(query: &TimesheetQuery) -> (String, Vec<Box<dyn ToSql>>) {
    let mut conditions: Vec<&str> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(search) = &query.search {
        conditions.push("summary LIKE ? ESCAPE '\\'");
        params.push(Box::new(contains_pattern(search)));
    }
    if let Some(employee_id) = query.employee_id {
        conditions.push("employee_id = ?");
        params.push(Box::new(employee_id));
    }

    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), params)
    }
}

impl SqliteTimesheetRepository {
    pub(crate) fn new(connection: SharedSqliteConnection) -> Self {
        Self { connection }
    }

    fn query_list(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<Vec<Timesheet>, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let mut stmt = conn.prepare(sql)?;
        let timesheets = stmt
            .query_map(params, timesheet_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(timesheets)
    }
}

impl TimesheetRepository for SqliteTimesheetRepository {
    fn find_by_id(&self, id: i64) -> Result<Option<Timesheet>, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let sql = format!("SELECT {TIMESHEET_COLUMNS} FROM timesheets WHERE id = ?1");
        let timesheet = conn
            .query_row(&sql, params![id], timesheet_from_row)
            .optional()?;
        Ok(timesheet)
    }

    fn find_page(&self, query: &TimesheetQuery) -> Result<(Vec<Timesheet>, i64), HrError> {
        let (where_clause, mut params) = listing_filter(query);
        let filter_len = params.len();

        let sql = format!(
            "SELECT {TIMESHEET_COLUMNS} FROM timesheets{where_clause} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
            query.sort_field.column(),
            query.sort_order.sql(),
        );
        let count_sql = format!("SELECT count(*) FROM timesheets{where_clause}");
        params.push(Box::new(query.page.limit()));
        params.push(Box::new(query.page.offset()));

        let params_slice: Vec<&dyn ToSql> = params.iter().map(AsRef::as_ref).collect();

        debug!("find_page():- {sql}");

        // Count and page are read under the same lock so they agree
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;

        let total: i64 =
            conn.query_row(&count_sql, &params_slice[..filter_len], |row| row.get(0))?;

        let mut stmt = conn.prepare(&sql)?;
        let timesheets = stmt
            .query_map(params_slice.as_slice(), timesheet_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok((timesheets, total))
    }

    fn find_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Timesheet>, HrError> {
        let sql = format!(
            "SELECT {TIMESHEET_COLUMNS} FROM timesheets WHERE start_time < ?2 AND end_time > ?1 ORDER BY start_time, id"
        );
        self.query_list(&sql, &[&from as &dyn ToSql, &to])
    }

    fn find_all(&self) -> Result<Vec<Timesheet>, HrError> {
        let sql = format!("SELECT {TIMESHEET_COLUMNS} FROM timesheets ORDER BY start_time, id");
        self.query_list(&sql, &[])
    }

    fn insert(&self, timesheet: &NewTimesheet) -> Result<i64, HrError> {
        debug!("Adding timesheet for employee {} to DBMS", timesheet.employee_id);
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let id = conn
            .query_row(
                r"INSERT INTO timesheets (employee_id, start_time, end_time, summary)
                  VALUES (?1, ?2, ?3, ?4)
                  RETURNING id",
                params![
                    timesheet.employee_id,
                    timesheet.start_time,
                    timesheet.end_time,
                    timesheet.summary,
                ],
                |row| row.get(0),
            )
            .map_err(|e| HrError::Sql(format!("Unable to insert into timesheets: {e}")))?;
        Ok(id)
    }

    fn update(&self, id: i64, timesheet: &NewTimesheet) -> Result<usize, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let changes = conn
            .execute(
                r"UPDATE timesheets
                  SET employee_id = ?1, start_time = ?2, end_time = ?3, summary = ?4
                  WHERE id = ?5",
                params![
                    timesheet.employee_id,
                    timesheet.start_time,
                    timesheet.end_time,
                    timesheet.summary,
                    id,
                ],
            )
            .map_err(|e| HrError::Sql(format!("Unable to update timesheet {id}: {e}")))?;
        Ok(changes)
    }

    fn delete(&self, id: i64) -> Result<usize, HrError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| HrError::LockPoisoned)?;
        let changes = conn.execute("DELETE FROM timesheets WHERE id = ?1", params![id])?;
        Ok(changes)
    }
}
