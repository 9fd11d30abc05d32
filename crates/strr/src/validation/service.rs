use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

use crate::config::ValidationConfig;
use crate::registry::repository::{
    AuditRecorder, RegistrationRepository, ValidationAuditRecord,
};

use super::matcher::{self, PermitCheck, ValidationError, ValidationErrorCode};
use super::schema;

/// Orchestrates a validation call: schema check, registration lookup,
/// address matching, audit record, response assembly. Lookup and audit go
/// through the collaborator traits so the pipeline can run against any
/// backing store.
pub struct PermitValidationService<R, A> {
    registry: Arc<R>,
    audit: Arc<A>,
    config: ValidationConfig,
}

impl<R, A> PermitValidationService<R, A>
where
    R: RegistrationRepository + 'static,
    A: AuditRecorder + 'static,
{
    pub fn new(registry: Arc<R>, audit: Arc<A>, config: ValidationConfig) -> Self {
        Self {
            registry,
            audit,
            config,
        }
    }

    /// Validate the claimed address against the identified permit.
    ///
    /// Every invocation writes exactly one audit record carrying the raw
    /// request, the computed response, and the status code; a failed audit
    /// write is logged and never alters the caller's response.
    pub fn validate_permit(&self, raw: Value) -> (Value, StatusCode) {
        let (response, status) = self.decide(&raw);

        let record = ValidationAuditRecord {
            request: raw,
            response: response.clone(),
            status_code: status.as_u16(),
            recorded_at: Utc::now(),
        };
        if let Err(err) = self.audit.record(record) {
            warn!(error = %err, "failed to write validation audit record");
        }

        (response, status)
    }

    fn decide(&self, raw: &Value) -> (Value, StatusCode) {
        let request = match schema::validate_request(raw) {
            Ok(request) => request,
            Err(errors) => return (json!({ "errors": errors }), StatusCode::BAD_REQUEST),
        };

        let registration = match self
            .registry
            .find_by_registration_number(&request.identifier)
        {
            Ok(Some(registration)) => registration,
            Ok(None) => {
                debug!(identifier = %request.identifier, "no registration for identifier");
                let errors = vec![ValidationError::from_code(
                    ValidationErrorCode::PermitNotFound,
                )];
                return (json!({ "errors": errors }), StatusCode::NOT_FOUND);
            }
            Err(err) => {
                error!(error = %err, "registration lookup failed");
                return (
                    json!({ "error": "registry unavailable" }),
                    StatusCode::INTERNAL_SERVER_ERROR,
                );
            }
        };

        // The response echoes the request fields, then layers on the outcome.
        let mut response = match raw {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };

        let status = match matcher::check_permit(&request.address, &registration) {
            PermitCheck::Inactive { status } => {
                response.insert("status".to_string(), json!(status.label()));
                StatusCode::OK
            }
            PermitCheck::Mismatch { errors } => {
                response.insert("errors".to_string(), json!(errors));
                StatusCode::BAD_REQUEST
            }
            PermitCheck::Verified {
                status,
                valid_until,
            } => {
                let rendered = valid_until
                    .with_timezone(&self.config.display_offset)
                    .format("%Y-%m-%d")
                    .to_string();
                response.insert("status".to_string(), json!(status.label()));
                response.insert("validUntil".to_string(), json!(rendered));
                StatusCode::OK
            }
        };

        (Value::Object(response), status)
    }
}
