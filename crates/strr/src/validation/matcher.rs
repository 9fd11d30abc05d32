//! Permit/address cross-checking rules.
//!
//! Pure computation over supplied data: the matcher performs no I/O and is
//! safe to call concurrently from any number of request handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::domain::{
    AddressClaim, PermitAddress, Registration, RegistrationKind, RegistrationStatus, StrataProfile,
};

use super::normalizer::normalize_unit_number;

/// Machine-readable failure codes surfaced by permit validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorCode {
    InvalidRequest,
    PermitNotFound,
    StreetNumberMismatch,
    PostalCodeMismatch,
    UnitNumberMismatch,
    AddressMismatch,
}

impl ValidationErrorCode {
    pub const fn message(self) -> &'static str {
        match self {
            ValidationErrorCode::InvalidRequest => "Request is missing required fields",
            ValidationErrorCode::PermitNotFound => {
                "No registration found for the given identifier"
            }
            ValidationErrorCode::StreetNumberMismatch => {
                "Street number does not match the permit"
            }
            ValidationErrorCode::PostalCodeMismatch => "Postal code does not match the permit",
            ValidationErrorCode::UnitNumberMismatch => "Unit number does not match the permit",
            ValidationErrorCode::AddressMismatch => "Address does not match the permit",
        }
    }
}

/// Structured error entry returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: ValidationErrorCode,
    pub message: String,
}

impl ValidationError {
    pub fn from_code(code: ValidationErrorCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
        }
    }

    pub fn with_message(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outcome of checking a claim against a registration. All-errors-or-clean:
/// there is no partial success.
#[derive(Debug, Clone, PartialEq)]
pub enum PermitCheck {
    /// The registration is not active; no address checks were run.
    Inactive { status: RegistrationStatus },
    /// One or more address fields failed to match.
    Mismatch { errors: Vec<ValidationError> },
    /// The claimed address refers to the permitted property.
    Verified {
        status: RegistrationStatus,
        valid_until: DateTime<Utc>,
    },
}

/// Which strata address satisfied the claim, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrataMatch {
    PrimaryLocation,
    Building(usize),
}

/// Check a claimed address against the permit on file. The status gate runs
/// first; inactive permits skip every address rule.
pub fn check_permit(claim: &AddressClaim, registration: &Registration) -> PermitCheck {
    if registration.status != RegistrationStatus::Active {
        return PermitCheck::Inactive {
            status: registration.status,
        };
    }

    let errors = match &registration.kind {
        RegistrationKind::Host(permit) => match_host_address(claim, permit),
        RegistrationKind::StrataHotel(profile) => match strata_match(claim, profile) {
            Some(_) => Vec::new(),
            None => vec![ValidationError::from_code(
                ValidationErrorCode::AddressMismatch,
            )],
        },
    };

    if errors.is_empty() {
        PermitCheck::Verified {
            status: registration.status,
            valid_until: registration.expiry,
        }
    } else {
        PermitCheck::Mismatch { errors }
    }
}

/// Host permits hold a single address; the street number, postal code, and
/// unit number are checked independently and every failure is reported.
pub(crate) fn match_host_address(
    claim: &AddressClaim,
    permit: &PermitAddress,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Street number: exact, or the first whitespace token of the claim to
    // tolerate suffixes like "123 A". No number on file means no mismatch.
    let claim_street = claim.street_number.trim().to_lowercase();
    let claim_street_first = first_token(&claim_street);
    if let Some(permit_street) = permit.street_number.as_deref() {
        let permit_street = permit_street.trim().to_lowercase();
        if permit_street != claim_street && permit_street != claim_street_first {
            errors.push(ValidationError::from_code(
                ValidationErrorCode::StreetNumberMismatch,
            ));
        }
    }

    // Postal code: exact, or forward-sortation-area prefix when the claim
    // carries at least four characters.
    let claim_postal = fold_postal(&claim.postal_code);
    let permit_postal = fold_postal(&permit.postal_code);
    let postal_matches = claim_postal == permit_postal
        || (claim_postal.chars().count() >= 4
            && fsa_prefix(&claim_postal) == fsa_prefix(&permit_postal));
    if !postal_matches {
        errors.push(ValidationError::from_code(
            ValidationErrorCode::PostalCodeMismatch,
        ));
    }

    // Unit number: both sides present compares canonical forms; one side
    // present is a mismatch; neither present is a match. Only the empty
    // string counts as absent; whitespace is a present (if odd) value.
    let claim_unit = claim.unit_number.as_deref().filter(|v| !v.is_empty());
    let permit_unit = permit.unit_number.as_deref().filter(|v| !v.is_empty());
    let unit_mismatch = match (claim_unit, permit_unit) {
        (Some(claimed), Some(on_file)) => {
            normalize_unit_number(claimed) != normalize_unit_number(on_file)
        }
        (None, None) => false,
        _ => true,
    };
    if unit_mismatch {
        errors.push(ValidationError::from_code(
            ValidationErrorCode::UnitNumberMismatch,
        ));
    }

    errors
}

/// Walk the primary location and then each building in registrar order,
/// stopping at the first address that satisfies the claim.
pub(crate) fn strata_match(claim: &AddressClaim, profile: &StrataProfile) -> Option<StrataMatch> {
    let claim_street = claim.street_number.trim();
    let claim_street_first = first_token(claim_street);
    let claim_fsa = fsa_prefix(&fold_postal(&claim.postal_code));

    let satisfies = |street_address: &str, postal_code: &str| {
        let number = building_street_number(street_address);
        (number == claim_street || number == claim_street_first)
            && claim_fsa == fsa_prefix(&fold_postal(postal_code))
    };

    if satisfies(&profile.location.street_address, &profile.location.postal_code) {
        return Some(StrataMatch::PrimaryLocation);
    }

    profile
        .buildings
        .iter()
        .position(|building| satisfies(&building.street_address, &building.postal_code))
        .map(StrataMatch::Building)
}

/// Extract the civic number from a strata street-address line: take the text
/// after the first hyphen (the line as-is when there is none), then its
/// first whitespace token.
fn building_street_number(street_address: &str) -> &str {
    let after_hyphen = match street_address.split_once('-') {
        Some((_, rest)) => rest,
        None => street_address,
    };
    first_token(after_hyphen.trim())
}

fn first_token(value: &str) -> &str {
    value.split(' ').next().unwrap_or_default()
}

fn fold_postal(code: &str) -> String {
    code.chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn fsa_prefix(folded: &str) -> String {
    folded.chars().take(4).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn claim(street: &str, unit: Option<&str>, postal: &str) -> AddressClaim {
        AddressClaim {
            street_number: street.to_string(),
            unit_number: unit.map(str::to_string),
            postal_code: postal.to_string(),
        }
    }

    fn permit(street: Option<&str>, unit: Option<&str>, postal: &str) -> PermitAddress {
        PermitAddress {
            street_number: street.map(str::to_string),
            unit_number: unit.map(str::to_string),
            postal_code: postal.to_string(),
        }
    }

    fn codes(errors: &[ValidationError]) -> Vec<ValidationErrorCode> {
        errors.iter().map(|error| error.code).collect()
    }

    mod host {
        use super::*;

        #[test]
        fn exact_address_matches_clean() {
            let errors = match_host_address(
                &claim("123", Some("4B"), "V8V 1V1"),
                &permit(Some("123"), Some("4B"), "V8V 1V1"),
            );
            assert!(errors.is_empty());
        }

        #[test]
        fn street_suffix_tolerated_via_first_token() {
            let errors = match_host_address(
                &claim("123 A", None, "V8V 1V1"),
                &permit(Some("123"), None, "V8V 1V1"),
            );
            assert!(errors.is_empty());
        }

        #[test]
        fn missing_permit_street_number_is_not_a_mismatch() {
            let errors = match_host_address(
                &claim("999", None, "V8V 1V1"),
                &permit(None, None, "V8V 1V1"),
            );
            assert!(errors.is_empty());
        }

        #[test]
        fn postal_prefix_match_accepted_at_fsa_granularity() {
            let errors = match_host_address(
                &claim("123", None, "V8V1V1"),
                &permit(Some("123"), None, "V8V 1V2"),
            );
            assert!(errors.is_empty());
        }

        #[test]
        fn short_claim_postal_requires_exact_match() {
            let errors = match_host_address(
                &claim("123", None, "V8V"),
                &permit(Some("123"), None, "V8V 1V1"),
            );
            assert_eq!(codes(&errors), vec![ValidationErrorCode::PostalCodeMismatch]);
        }

        #[test]
        fn unit_numbers_compare_canonically() {
            let errors = match_host_address(
                &claim("123", Some("Suite 5"), "V8V 1V1"),
                &permit(Some("123"), Some("Unit 4"), "V8V 1V1"),
            );
            assert_eq!(codes(&errors), vec![ValidationErrorCode::UnitNumberMismatch]);

            let errors = match_host_address(
                &claim("123", Some("#004"), "V8V 1V1"),
                &permit(Some("123"), Some("Unit 4"), "V8V 1V1"),
            );
            assert!(errors.is_empty());
        }

        #[test]
        fn whitespace_only_unit_number_counts_as_present() {
            let errors = match_host_address(
                &claim("123", Some(" "), "V8V 1V1"),
                &permit(Some("123"), None, "V8V 1V1"),
            );
            assert_eq!(codes(&errors), vec![ValidationErrorCode::UnitNumberMismatch]);

            // Both sides whitespace normalize to the same empty form.
            let errors = match_host_address(
                &claim("123", Some(" "), "V8V 1V1"),
                &permit(Some("123"), Some("  "), "V8V 1V1"),
            );
            assert!(errors.is_empty());
        }

        #[test]
        fn one_sided_unit_number_is_a_mismatch() {
            let errors = match_host_address(
                &claim("123", Some("4B"), "V8V 1V1"),
                &permit(Some("123"), None, "V8V 1V1"),
            );
            assert_eq!(codes(&errors), vec![ValidationErrorCode::UnitNumberMismatch]);

            let errors = match_host_address(
                &claim("123", None, "V8V 1V1"),
                &permit(Some("123"), Some("4B"), "V8V 1V1"),
            );
            assert_eq!(codes(&errors), vec![ValidationErrorCode::UnitNumberMismatch]);
        }

        #[test]
        fn independent_checks_collect_every_error() {
            let errors = match_host_address(
                &claim("77", Some("9"), "T0T 0T0"),
                &permit(Some("123"), Some("4"), "V8V 1V1"),
            );
            assert_eq!(
                codes(&errors),
                vec![
                    ValidationErrorCode::StreetNumberMismatch,
                    ValidationErrorCode::PostalCodeMismatch,
                    ValidationErrorCode::UnitNumberMismatch,
                ]
            );
        }
    }

    mod strata {
        use super::*;
        use crate::registry::domain::BuildingAddress;

        fn building(street_address: &str, postal: &str) -> BuildingAddress {
            BuildingAddress {
                street_address: street_address.to_string(),
                postal_code: postal.to_string(),
            }
        }

        fn profile(buildings: Vec<BuildingAddress>) -> StrataProfile {
            StrataProfile {
                location: building("100 - 1175 Douglas St", "V8W 2E1"),
                buildings,
            }
        }

        #[test]
        fn primary_location_matches_first() {
            let matched = strata_match(&claim("1175", None, "V8W 2E1"), &profile(Vec::new()));
            assert_eq!(matched, Some(StrataMatch::PrimaryLocation));
        }

        #[test]
        fn hyphenless_line_used_as_is() {
            let profile = StrataProfile {
                location: building("870 Railway Ave", "V0N 1T0"),
                buildings: Vec::new(),
            };
            let matched = strata_match(&claim("870", None, "V0N 1T0"), &profile);
            assert_eq!(matched, Some(StrataMatch::PrimaryLocation));
        }

        #[test]
        fn first_matching_building_wins_in_sequence_order() {
            let buildings = vec![
                building("200 - 800 Yates St", "V8X 1X1"),
                building("300 - 810 Yates St", "V8X 2X2"),
                building("1 - 45 Songhees Rd", "V9A 6T3"),
                // Shares the claimed FSA and number; must never be reached.
                building("2 - 45 Songhees Rd", "V9A 6T9"),
            ];
            let matched = strata_match(&claim("45", None, "V9A 6T3"), &profile(buildings));
            assert_eq!(matched, Some(StrataMatch::Building(2)));
        }

        #[test]
        fn claim_street_first_token_accepted() {
            let buildings = vec![building("12 - 400 Douglas St", "V8V 2P2")];
            let matched = strata_match(&claim("400 B", None, "v8v2p9"), &profile(buildings));
            assert_eq!(matched, Some(StrataMatch::Building(0)));
        }

        #[test]
        fn no_match_across_all_addresses() {
            let buildings = vec![building("200 - 800 Yates St", "V8X 1X1")];
            let matched = strata_match(&claim("999", None, "V1V 1V1"), &profile(buildings));
            assert_eq!(matched, None);
        }
    }

    mod status_gate {
        use super::*;
        use crate::registry::domain::{Registration, RegistrationKind};

        fn registration(status: RegistrationStatus) -> Registration {
            Registration {
                registration_number: "H1234567890".to_string(),
                status,
                expiry: chrono::Utc
                    .with_ymd_and_hms(2026, 5, 1, 7, 0, 0)
                    .single()
                    .expect("valid timestamp"),
                kind: RegistrationKind::Host(permit(Some("123"), None, "V8V 1V1")),
            }
        }

        #[test]
        fn inactive_permit_short_circuits_address_checks() {
            // Wildly wrong address, yet no address errors surface.
            let check = check_permit(&claim("999", Some("77"), "A1A 1A1"), &registration(RegistrationStatus::Suspended));
            assert_eq!(
                check,
                PermitCheck::Inactive {
                    status: RegistrationStatus::Suspended
                }
            );
        }

        #[test]
        fn active_permit_with_matching_claim_is_verified() {
            let check = check_permit(&claim("123", None, "V8V 1V1"), &registration(RegistrationStatus::Active));
            match check {
                PermitCheck::Verified { status, .. } => {
                    assert_eq!(status, RegistrationStatus::Active)
                }
                other => panic!("expected verified permit, got {other:?}"),
            }
        }

        #[test]
        fn active_permit_with_bad_claim_reports_mismatches() {
            let check = check_permit(&claim("999", None, "A1A 1A1"), &registration(RegistrationStatus::Active));
            match check {
                PermitCheck::Mismatch { errors } => {
                    assert_eq!(
                        codes(&errors),
                        vec![
                            ValidationErrorCode::StreetNumberMismatch,
                            ValidationErrorCode::PostalCodeMismatch,
                        ]
                    );
                }
                other => panic!("expected mismatch, got {other:?}"),
            }
        }
    }
}
