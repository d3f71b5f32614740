use crate::error::{ApiError, During};
use crate::listing::Listing;
use crate::routes::AppState;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::Redirect;
use axum::Json;
use hr::query::{EmployeeQuery, EmployeeSortField, PageRequest, SortOrder};
use hr::service::employee_service::EmployeeAttachments;
use hr::types::{Department, Employee};
use hr::upload::UploadedFile;
use hr::validation::EmployeeForm;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    search: Option<String>,
    sort_field: Option<String>,
    sort_order: Option<String>,
    filter_department: Option<String>,
    page: Option<String>,
    page_size: Option<String>,
}

impl ListParams {
    fn query(&self) -> EmployeeQuery {
        EmployeeQuery::new()
            .search(self.search.as_deref().unwrap_or_default())
            .department(self.filter_department.as_deref().unwrap_or_default())
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

/// The effective parameters of an employee listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListEcho {
    search: String,
    sort_field: EmployeeSortField,
    sort_order: SortOrder,
    filter_department: String,
    departments: Vec<&'static str>,
}

fn department_names() -> Vec<&'static str> {
    Department::ALL.iter().map(Department::as_str).collect()
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Listing<Employee, ListEcho>>, ApiError> {
    let query = params.query();
    let page = state.runtime.employee_service().list(&query)?;

    let echo = ListEcho {
        search: query.search.unwrap_or_default(),
        sort_field: query.sort_field,
        sort_order: query.sort_order,
        filter_department: query.department.unwrap_or_default(),
        departments: department_names(),
    };
    Ok(Json(Listing::new(page, echo)))
}

pub(crate) async fn new_form() -> Json<Value> {
    Json(json!({ "departments": department_names() }))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let (form, attachments) = read_form(multipart).await?;
    state
        .runtime
        .employee_service()
        .create(&form, &attachments)
        .during("creating employee")?;
    Ok(Redirect::to("/employees"))
}

pub(crate) async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state.runtime.employee_service().get(id)?;
    Ok(Json(employee))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let (form, attachments) = read_form(multipart).await?;
    state
        .runtime
        .employee_service()
        .update(id, &form, &attachments)
        .during("updating employee")?;
    Ok(Redirect::to("/employees"))
}

/// Collects the text fields into an [`EmployeeForm`] and the `photo` and `cv` parts into
/// attachments. Unknown fields are skipped.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(EmployeeForm, EmployeeAttachments), ApiError> {
    let mut form = EmployeeForm::default();
    let mut attachments = EmployeeAttachments::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "photo" || name == "cv" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let file = UploadedFile::new(file_name, field.bytes().await?.to_vec());
            if name == "photo" {
                attachments.photo = Some(file);
            } else {
                attachments.cv = Some(file);
            }
            continue;
        }

        let value = field.text().await?;
        match name.as_str() {
            "name" => form.name = value,
            "email" => form.email = value,
            "phone" => form.phone = value,
            "dob" => form.dob = value,
            "job_title" => form.job_title = value,
            "department" => form.department = value,
            "salary" => form.salary = value,
            "start_date" => form.start_date = value,
            "end_date" => form.end_date = Some(value),
            other => debug!("Ignoring form field '{other}'"),
        }
    }
    Ok((form, attachments))
}
