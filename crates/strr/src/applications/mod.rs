//! Application lifecycle presentation: status label tables, the header view
//! served to hosts and examiners, and the searchable directory seam.

pub mod domain;
pub mod repository;
pub mod router;
pub mod status;

pub use domain::{next_application_number, ApplicationRecord, ApplicationStatus};
pub use repository::{
    ApplicationDirectory, ApplicationHeader, ApplicationSearchFilter, DirectoryError,
};
pub use router::application_router;
pub use status::{ExaminerAction, HostAction};
