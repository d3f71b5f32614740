use crate::error::{ApiError, During};
use crate::listing::{employee_options, EmployeeOption, Listing};
use crate::routes::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::{Form, Json};
use chrono::{NaiveDate, NaiveDateTime};
use hr::query::{PageRequest, SortOrder, TimesheetQuery, TimesheetSortField};
use hr::types::{CalendarEvent, Timesheet};
use hr::validation::{parse_datetime, TimesheetForm};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    search: Option<String>,
    employee_filter: Option<String>,
    sort_field: Option<String>,
    sort_order: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

impl ListParams {
    fn query(&self) -> TimesheetQuery {
        TimesheetQuery::new()
            .search(self.search.as_deref().unwrap_or_default())
            .employee_filter(self.employee_filter.as_deref().unwrap_or_default())
            .sort_by(
                self.sort_field.as_deref().unwrap_or_default(),
                self.sort_order.as_deref().unwrap_or_default(),
            )
            .page(PageRequest::parse(
                self.page.as_deref(),
                self.page_size.as_deref(),
            ))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListEcho {
    search: String,
    employee_filter: Option<i64>,
    sort_field: TimesheetSortField,
    sort_order: SortOrder,
    employees: Vec<EmployeeOption>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EditForm {
    timesheet: Timesheet,
    employees: Vec<EmployeeOption>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewForm {
    employees: Vec<EmployeeOption>,
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Listing<Timesheet, ListEcho>>, ApiError> {
    let query = params.query();
    let page = state.runtime.timesheet_service().list(&query)?;
    let employees = state.runtime.employee_service().all()?;

    let echo = ListEcho {
        search: query.search.unwrap_or_default(),
        employee_filter: query.employee_id,
        sort_field: query.sort_field,
        sort_order: query.sort_order,
        employees: employee_options(&employees),
    };
    Ok(Json(Listing::new(page, echo)))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CalendarParams {
    from: Option<String>,
    to: Option<String>,
}

/// Accepts a date and time, or a bare date meaning midnight. Blank means unbounded.
fn calendar_bound(name: &str, value: Option<&str>) -> Result<Option<NaiveDateTime>, ApiError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    parse_datetime(value)
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(Some)
        .ok_or_else(|| ApiError::Form(format!("'{name}' is not a date and time: {value}")))
}

pub(crate) async fn calendar(
    State(state): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> Result<Json<Vec<CalendarEvent>>, ApiError> {
    let from = calendar_bound("from", params.from.as_deref())?;
    let to = calendar_bound("to", params.to.as_deref())?;
    let events = state.runtime.timesheet_service().calendar(from, to)?;
    Ok(Json(events))
}

pub(crate) async fn new_form(State(state): State<AppState>) -> Result<Json<NewForm>, ApiError> {
    let employees = state.runtime.employee_service().all()?;
    Ok(Json(NewForm {
        employees: employee_options(&employees),
    }))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    form: Result<Form<TimesheetForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    state
        .runtime
        .timesheet_service()
        .create(&form)
        .during("creating timesheet")?;
    Ok(Redirect::to("/timesheets"))
}

pub(crate) async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EditForm>, ApiError> {
    let timesheet = state.runtime.timesheet_service().get(id)?;
    let employees = state.runtime.employee_service().all()?;
    Ok(Json(EditForm {
        timesheet,
        employees: employee_options(&employees),
    }))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<TimesheetForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form?;
    state
        .runtime
        .timesheet_service()
        .update(id, &form)
        .during("updating timesheet")?;
    Ok(Redirect::to("/timesheets"))
}
