use crate::{employees, timesheets};
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use hr::ApplicationRuntime;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Largest employee form accepted, photo and CV included.
pub(crate) const MAX_EMPLOYEE_FORM_BYTES: usize = 20 * 1024 * 1024;

/// Shared by every handler, there is no other global state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub runtime: Arc<ApplicationRuntime>,
}

pub(crate) fn router(runtime: Arc<ApplicationRuntime>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(runtime.uploads().root());
    let state = AppState { runtime };

    Router::new()
        .route("/", get(|| async { Redirect::to("/employees") }))
        .route("/employees", get(employees::list))
        .route(
            "/employees/new",
            get(employees::new_form)
                .post(employees::create)
                .layer(DefaultBodyLimit::max(MAX_EMPLOYEE_FORM_BYTES)),
        )
        .route(
            "/employees/{id}",
            get(employees::show)
                .post(employees::update)
                .layer(DefaultBodyLimit::max(MAX_EMPLOYEE_FORM_BYTES)),
        )
        .route("/timesheets", get(timesheets::list))
        .route("/timesheets/calendar", get(timesheets::calendar))
        .route(
            "/timesheets/new",
            get(timesheets::new_form).post(timesheets::create),
        )
        .route(
            "/timesheets/{id}",
            get(timesheets::show).post(timesheets::update),
        )
        .nest_service(hr::upload::PUBLIC_PREFIX, uploads)
        .layer(cors)
        .with_state(state)
}
