use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::registry::domain::RegistrationType;

use super::domain::ApplicationStatus;
use super::repository::{ApplicationDirectory, ApplicationSearchFilter};

/// Router builder exposing the staff-facing application directory.
pub fn application_router<D>(directory: Arc<D>) -> Router
where
    D: ApplicationDirectory + 'static,
{
    Router::new()
        .route("/api/v1/applications", get(search_handler::<D>))
        .route(
            "/api/v1/applications/:application_number",
            get(header_handler::<D>),
        )
        .with_state(directory)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchParams {
    status: Option<ApplicationStatus>,
    registration_type: Option<RegistrationType>,
    record_number: Option<String>,
    #[serde(default)]
    include_draft: bool,
}

impl SearchParams {
    fn into_filter(self) -> ApplicationSearchFilter {
        ApplicationSearchFilter {
            statuses: self.status.into_iter().collect(),
            registration_types: self.registration_type.into_iter().collect(),
            record_number: self.record_number,
            include_draft: self.include_draft,
        }
    }
}

pub(crate) async fn search_handler<D>(
    State(directory): State<Arc<D>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    D: ApplicationDirectory + 'static,
{
    match directory.search(&params.into_filter()) {
        Ok(records) => {
            let headers: Vec<_> = records.iter().map(|record| record.header()).collect();
            (StatusCode::OK, axum::Json(json!({ "applications": headers }))).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn header_handler<D>(
    State(directory): State<Arc<D>>,
    Path(application_number): Path<String>,
) -> Response
where
    D: ApplicationDirectory + 'static,
{
    match directory.find_by_application_number(&application_number) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record.header())).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "application not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
