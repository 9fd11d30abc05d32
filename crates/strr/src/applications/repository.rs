use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::domain::{RegistrationStatus, RegistrationType};

use super::domain::{ApplicationRecord, ApplicationStatus};
use super::status::{ExaminerAction, HostAction};

/// Storage abstraction for the application directory so the router can be
/// exercised against an in-memory store.
pub trait ApplicationDirectory: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, DirectoryError>;
    fn find_by_application_number(
        &self,
        application_number: &str,
    ) -> Result<Option<ApplicationRecord>, DirectoryError>;
    fn search(
        &self,
        filter: &ApplicationSearchFilter,
    ) -> Result<Vec<ApplicationRecord>, DirectoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("application already exists")]
    Conflict,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Search criteria applied over the directory. Draft applications are
/// excluded unless explicitly requested.
#[derive(Debug, Clone, Default)]
pub struct ApplicationSearchFilter {
    pub statuses: Vec<ApplicationStatus>,
    pub registration_types: Vec<RegistrationType>,
    pub record_number: Option<String>,
    pub include_draft: bool,
}

impl ApplicationSearchFilter {
    /// Pure predicate shared by directory implementations.
    pub fn matches(&self, record: &ApplicationRecord) -> bool {
        if !self.include_draft && record.status == ApplicationStatus::Draft {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&record.status) {
            return false;
        }
        if !self.registration_types.is_empty()
            && !self.registration_types.contains(&record.registration_type)
        {
            return false;
        }
        if let Some(term) = self
            .record_number
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        {
            let needle = term.to_lowercase();
            let in_application = record.application_number.to_lowercase().contains(&needle);
            let in_registration = record
                .registration
                .as_ref()
                .map(|registration| {
                    registration
                        .registration_number
                        .to_lowercase()
                        .contains(&needle)
                })
                .unwrap_or(false);
            if !in_application && !in_registration {
                return false;
            }
        }
        true
    }
}

/// Serialized header view of an application, combining the raw status with
/// audience-specific labels and available actions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHeader {
    pub application_number: String,
    pub status: ApplicationStatus,
    pub host_status: &'static str,
    pub examiner_status: &'static str,
    pub host_actions: &'static [HostAction],
    pub examiner_actions: &'static [ExaminerAction],
    pub is_set_aside: bool,
    pub application_date_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_date: Option<DateTime<Utc>>,
    pub is_certificate_issued: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_status: Option<RegistrationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_end_date: Option<DateTime<Utc>>,
}

impl ApplicationRecord {
    /// Build the presentation header. Set-aside applications override the
    /// host label to "Pending Review" and reopen the examiner decision; an
    /// issued certificate closes out the examiner actions.
    pub fn header(&self) -> ApplicationHeader {
        let host_status = if self.is_set_aside {
            "Pending Review"
        } else {
            self.status.host_label()
        };

        let examiner_actions: &'static [ExaminerAction] = if self.is_set_aside {
            &[ExaminerAction::Approve, ExaminerAction::Reject]
        } else if self.status == ApplicationStatus::FullReviewApproved && self.is_certificate_issued
        {
            &[]
        } else {
            self.status.examiner_actions()
        };

        ApplicationHeader {
            application_number: self.application_number.clone(),
            status: self.status,
            host_status,
            examiner_status: self.status.examiner_label(),
            host_actions: self.status.host_actions(),
            examiner_actions,
            is_set_aside: self.is_set_aside,
            application_date_time: self.submitted_at,
            decision_date: self.decision_date,
            is_certificate_issued: self.is_certificate_issued,
            registration_number: self
                .registration
                .as_ref()
                .map(|registration| registration.registration_number.clone()),
            registration_status: self
                .registration
                .as_ref()
                .map(|registration| registration.status),
            registration_end_date: self
                .registration
                .as_ref()
                .map(|registration| registration.expiry),
        }
    }
}
