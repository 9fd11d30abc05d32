//! Permit registry domain model and collaborator seams.

pub mod domain;
pub mod repository;

pub use domain::{
    AddressClaim, BuildingAddress, PermitAddress, Registration, RegistrationKind,
    RegistrationStatus, RegistrationType, StrataProfile,
};
pub use repository::{
    AuditError, AuditRecorder, RegistrationRepository, RepositoryError, ValidationAuditRecord,
};
