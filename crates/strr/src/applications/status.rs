//! Presentation tables for application statuses.
//!
//! Hosts and examiners see different labels and different available actions
//! for the same underlying status. These are fixed mappings, kept as match
//! tables rather than anything dynamic.

use serde::{Deserialize, Serialize};

use super::domain::ApplicationStatus;

/// Actions an applicant can take on their own application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostAction {
    SubmitPayment,
}

/// Actions available to staff examiners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExaminerAction {
    Approve,
    Reject,
    SendNoc,
    ProvisionalApprove,
    SetAside,
}

impl ApplicationStatus {
    /// Applicant-facing display label. Statuses without a public label
    /// render as an empty string.
    pub const fn host_label(self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "Draft",
            ApplicationStatus::PaymentDue => "Payment Due",
            ApplicationStatus::Paid | ApplicationStatus::FullReview => "Pending Approval",
            ApplicationStatus::AutoApproved
            | ApplicationStatus::ProvisionallyApproved
            | ApplicationStatus::FullReviewApproved => "Approved",
            ApplicationStatus::ProvisionalReview => "Approved \u{2013} Provisional",
            ApplicationStatus::Declined | ApplicationStatus::ProvisionallyDeclined => "Declined",
            ApplicationStatus::NocPending | ApplicationStatus::ProvisionalReviewNocPending => {
                "Notice of Consideration"
            }
            ApplicationStatus::NocExpired | ApplicationStatus::ProvisionalReviewNocExpired => {
                "Pending Review"
            }
            ApplicationStatus::AdditionalInfoRequested | ApplicationStatus::Provisional => "",
        }
    }

    /// Examiner-facing display label.
    pub const fn examiner_label(self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "Draft",
            ApplicationStatus::PaymentDue => "Payment Due",
            ApplicationStatus::Paid => "Paid",
            ApplicationStatus::AutoApproved => "Approved \u{2013} Automatic",
            ApplicationStatus::ProvisionallyApproved => "Approved \u{2013} Provisional",
            ApplicationStatus::FullReviewApproved => "Approved \u{2013} Examined",
            ApplicationStatus::ProvisionalReview => "Provisional Examination",
            ApplicationStatus::FullReview => "Full Examination",
            ApplicationStatus::ProvisionallyDeclined => "Declined - Provisional",
            ApplicationStatus::Declined => "Declined",
            ApplicationStatus::NocPending | ApplicationStatus::ProvisionalReviewNocPending => {
                "NOC - Pending"
            }
            ApplicationStatus::NocExpired | ApplicationStatus::ProvisionalReviewNocExpired => {
                "NOC - Expired"
            }
            ApplicationStatus::AdditionalInfoRequested | ApplicationStatus::Provisional => "",
        }
    }

    pub const fn host_actions(self) -> &'static [HostAction] {
        match self {
            ApplicationStatus::PaymentDue => &[HostAction::SubmitPayment],
            _ => &[],
        }
    }

    pub const fn examiner_actions(self) -> &'static [ExaminerAction] {
        match self {
            ApplicationStatus::FullReview => &[ExaminerAction::Approve, ExaminerAction::SendNoc],
            ApplicationStatus::NocPending | ApplicationStatus::NocExpired => {
                &[ExaminerAction::Approve, ExaminerAction::Reject]
            }
            ApplicationStatus::ProvisionalReview => {
                &[ExaminerAction::ProvisionalApprove, ExaminerAction::SendNoc]
            }
            ApplicationStatus::ProvisionalReviewNocPending
            | ApplicationStatus::ProvisionalReviewNocExpired => {
                &[ExaminerAction::ProvisionalApprove, ExaminerAction::Reject]
            }
            ApplicationStatus::Declined => &[ExaminerAction::SetAside],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_labels_cover_the_review_pipeline() {
        assert_eq!(ApplicationStatus::Paid.host_label(), "Pending Approval");
        assert_eq!(ApplicationStatus::AutoApproved.host_label(), "Approved");
        assert_eq!(
            ApplicationStatus::NocPending.host_label(),
            "Notice of Consideration"
        );
        assert_eq!(ApplicationStatus::NocExpired.host_label(), "Pending Review");
        assert_eq!(ApplicationStatus::Provisional.host_label(), "");
    }

    #[test]
    fn examiner_labels_distinguish_approval_paths() {
        assert_eq!(
            ApplicationStatus::AutoApproved.examiner_label(),
            "Approved \u{2013} Automatic"
        );
        assert_eq!(
            ApplicationStatus::FullReviewApproved.examiner_label(),
            "Approved \u{2013} Examined"
        );
        assert_eq!(
            ApplicationStatus::ProvisionalReviewNocExpired.examiner_label(),
            "NOC - Expired"
        );
    }

    #[test]
    fn actions_follow_the_status_tables() {
        assert_eq!(
            ApplicationStatus::PaymentDue.host_actions(),
            &[HostAction::SubmitPayment]
        );
        assert!(ApplicationStatus::Paid.host_actions().is_empty());
        assert_eq!(
            ApplicationStatus::FullReview.examiner_actions(),
            &[ExaminerAction::Approve, ExaminerAction::SendNoc]
        );
        assert_eq!(
            ApplicationStatus::Declined.examiner_actions(),
            &[ExaminerAction::SetAside]
        );
        assert!(ApplicationStatus::FullReviewApproved
            .examiner_actions()
            .is_empty());
    }
}
