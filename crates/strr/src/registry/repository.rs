use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Registration;

/// Registry lookup seam so the validation service can be exercised in
/// isolation. `Ok(None)` means the identifier resolves to no permit.
pub trait RegistrationRepository: Send + Sync {
    fn find_by_registration_number(
        &self,
        registration_number: &str,
    ) -> Result<Option<Registration>, RepositoryError>;
}

/// Error enumeration for registry lookups.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// Immutable compliance row written once per validation call, capturing the
/// raw request, the computed response, and the HTTP status returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationAuditRecord {
    pub request: serde_json::Value,
    pub response: serde_json::Value,
    pub status_code: u16,
    pub recorded_at: DateTime<Utc>,
}

/// Sink for validation audit records. Fire-and-forget from the
/// orchestrator's viewpoint: write failures are logged, never surfaced.
pub trait AuditRecorder: Send + Sync {
    fn record(&self, record: ValidationAuditRecord) -> Result<(), AuditError>;
}

/// Audit sink error.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}
