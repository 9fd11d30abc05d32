use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::registry::repository::{AuditRecorder, RegistrationRepository};

use super::service::PermitValidationService;

/// Router builder exposing the third-party permit validation endpoint.
pub fn validation_router<R, A>(service: Arc<PermitValidationService<R, A>>) -> Router
where
    R: RegistrationRepository + 'static,
    A: AuditRecorder + 'static,
{
    Router::new()
        .route("/api/v1/permits/validate", post(validate_handler::<R, A>))
        .with_state(service)
}

pub(crate) async fn validate_handler<R, A>(
    State(service): State<Arc<PermitValidationService<R, A>>>,
    Json(payload): Json<serde_json::Value>,
) -> Response
where
    R: RegistrationRepository + 'static,
    A: AuditRecorder + 'static,
{
    let (body, status) = service.validate_permit(payload);
    (status, Json(body)).into_response()
}
