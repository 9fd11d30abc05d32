use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::domain::{Registration, RegistrationType};

/// Lifecycle states for a submitted registration application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Draft,
    PaymentDue,
    Paid,
    AutoApproved,
    ProvisionallyApproved,
    FullReviewApproved,
    ProvisionalReview,
    AdditionalInfoRequested,
    FullReview,
    Declined,
    ProvisionallyDeclined,
    Provisional,
    NocPending,
    NocExpired,
    ProvisionalReviewNocPending,
    ProvisionalReviewNocExpired,
}

/// An application as tracked by the registry, with its optional link to an
/// issued registration once approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_number: String,
    pub status: ApplicationStatus,
    pub registration_type: RegistrationType,
    pub is_set_aside: bool,
    pub is_certificate_issued: bool,
    pub submitted_at: DateTime<Utc>,
    pub decision_date: Option<DateTime<Utc>>,
    pub registration: Option<Registration>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Generate a process-unique 14-digit application number.
pub fn next_application_number() -> String {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("1{id:013}")
}
