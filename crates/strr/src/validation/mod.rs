//! Third-party permit validation: address normalization, fuzzy matching
//! against the permit on file, and the orchestrating service.

pub mod matcher;
pub mod normalizer;
pub mod router;
pub mod schema;
pub mod service;

pub use matcher::{
    check_permit, PermitCheck, StrataMatch, ValidationError, ValidationErrorCode,
};
pub use normalizer::normalize_unit_number;
pub use router::validation_router;
pub use schema::{validate_request, ValidationRequest};
pub use service::PermitValidationService;
