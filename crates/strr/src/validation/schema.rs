//! Inbound request shape checks for the validation endpoint.

use serde::{Deserialize, Serialize};

use crate::registry::domain::AddressClaim;

use super::matcher::{ValidationError, ValidationErrorCode};

/// A third-party permit validation request: the permit identifier plus the
/// address the caller claims for their listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub identifier: String,
    pub address: AddressClaim,
}

/// Check the raw payload against the request schema. Returns the typed
/// request, or the full list of shape errors as `{code, message}` entries.
pub fn validate_request(raw: &serde_json::Value) -> Result<ValidationRequest, Vec<ValidationError>> {
    let request: ValidationRequest = match serde_json::from_value(raw.clone()) {
        Ok(request) => request,
        Err(source) => {
            return Err(vec![ValidationError::with_message(
                ValidationErrorCode::InvalidRequest,
                format!("malformed request: {source}"),
            )])
        }
    };

    let mut errors = Vec::new();
    if request.identifier.trim().is_empty() {
        errors.push(required_field("identifier"));
    }
    if request.address.street_number.trim().is_empty() {
        errors.push(required_field("address.streetNumber"));
    }
    if request.address.postal_code.trim().is_empty() {
        errors.push(required_field("address.postalCode"));
    }

    if errors.is_empty() {
        Ok(request)
    } else {
        Err(errors)
    }
}

fn required_field(path: &str) -> ValidationError {
    ValidationError::with_message(
        ValidationErrorCode::InvalidRequest,
        format!("{path} is required"),
    )
}
