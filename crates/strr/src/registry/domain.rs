use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle states for an issued registration. Only `Active` permits are
/// eligible for address validation; every other state short-circuits to a
/// status-only response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Active,
    Expired,
    Suspended,
    Cancelled,
}

impl RegistrationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RegistrationStatus::Active => "ACTIVE",
            RegistrationStatus::Expired => "EXPIRED",
            RegistrationStatus::Suspended => "SUSPENDED",
            RegistrationStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Registration categories exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationType {
    Host,
    StrataHotel,
}

/// Rental-unit address held on file for an individual host permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermitAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    pub postal_code: String,
}

/// Primary location or building entry for a strata-hotel registration. The
/// street address is a single line, commonly of the form
/// `"100 - 1175 Douglas St"` (unit, hyphen, civic number, street name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingAddress {
    pub street_address: String,
    pub postal_code: String,
}

/// A strata-hotel permit covers one primary location plus zero or more
/// additional buildings, any of which may satisfy an address match. Building
/// order is preserved as supplied by the registrar; matching stops at the
/// first satisfying entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrataProfile {
    pub location: BuildingAddress,
    #[serde(default)]
    pub buildings: Vec<BuildingAddress>,
}

/// Type-specific payload carried by a registration. A host registration has
/// exactly one permit address; a strata registration has a building set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "address", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationKind {
    Host(PermitAddress),
    StrataHotel(StrataProfile),
}

impl RegistrationKind {
    pub const fn registration_type(&self) -> RegistrationType {
        match self {
            RegistrationKind::Host(_) => RegistrationType::Host,
            RegistrationKind::StrataHotel(_) => RegistrationType::StrataHotel,
        }
    }
}

/// Issued permit record as held by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub registration_number: String,
    pub status: RegistrationStatus,
    pub expiry: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: RegistrationKind,
}

/// Address details a third party claims for a listing. Immutable input to
/// the matcher; street number and postal code are mandatory at the schema
/// layer, the unit number is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressClaim {
    pub street_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_number: Option<String>,
    pub postal_code: String,
}
