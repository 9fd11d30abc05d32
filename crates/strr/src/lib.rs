//! Short-term rental registry core.
//!
//! The `registry` module holds the permit domain model and the collaborator
//! traits (registration lookup, audit recording). The `validation` module is
//! the heart of the crate: fuzzy address matching used by listing platforms
//! to cross-check a claimed address against an issued permit. The
//! `applications` module carries the presentation layer for the application
//! lifecycle (status labels, examiner actions, directory search).

pub mod applications;
pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
pub mod validation;
