use chrono::{TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use strr::applications::{
    next_application_number, ApplicationDirectory, ApplicationRecord, ApplicationSearchFilter,
    ApplicationStatus, DirectoryError,
};
use strr::registry::{
    AuditError, AuditRecorder, BuildingAddress, PermitAddress, Registration, RegistrationKind,
    RegistrationRepository, RegistrationStatus, RegistrationType, RepositoryError, StrataProfile,
    ValidationAuditRecord,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRegistry {
    registrations: Arc<Mutex<HashMap<String, Registration>>>,
}

impl InMemoryRegistry {
    pub(crate) fn with(registrations: Vec<Registration>) -> Self {
        let map = registrations
            .into_iter()
            .map(|registration| (registration.registration_number.clone(), registration))
            .collect();
        Self {
            registrations: Arc::new(Mutex::new(map)),
        }
    }
}

impl RegistrationRepository for InMemoryRegistry {
    fn find_by_registration_number(
        &self,
        registration_number: &str,
    ) -> Result<Option<Registration>, RepositoryError> {
        let guard = self.registrations.lock().expect("registry mutex poisoned");
        Ok(guard.get(registration_number).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditLog {
    records: Arc<Mutex<Vec<ValidationAuditRecord>>>,
}

impl InMemoryAuditLog {
    #[cfg(test)]
    pub(crate) fn records(&self) -> Vec<ValidationAuditRecord> {
        self.records.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditRecorder for InMemoryAuditLog {
    fn record(&self, record: ValidationAuditRecord) -> Result<(), AuditError> {
        self.records
            .lock()
            .expect("audit mutex poisoned")
            .push(record);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDirectory {
    records: Arc<Mutex<HashMap<String, ApplicationRecord>>>,
}

impl ApplicationDirectory for InMemoryDirectory {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, DirectoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        if guard.contains_key(&record.application_number) {
            return Err(DirectoryError::Conflict);
        }
        guard.insert(record.application_number.clone(), record.clone());
        Ok(record)
    }

    fn find_by_application_number(
        &self,
        application_number: &str,
    ) -> Result<Option<ApplicationRecord>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.get(application_number).cloned())
    }

    fn search(
        &self,
        filter: &ApplicationSearchFilter,
    ) -> Result<Vec<ApplicationRecord>, DirectoryError> {
        let guard = self.records.lock().expect("directory mutex poisoned");
        let mut matches: Vec<ApplicationRecord> = guard
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.application_number.cmp(&b.application_number));
        Ok(matches)
    }
}

/// Demonstration permits loaded at startup until the registry gains a real
/// backing store: an active host, a suspended host, and a strata hotel with
/// two extra buildings.
pub(crate) fn seed_registrations() -> Vec<Registration> {
    let expiry = Utc
        .with_ymd_and_hms(2026, 5, 1, 7, 0, 0)
        .single()
        .expect("seed expiry is valid");

    vec![
        Registration {
            registration_number: "H12345678901".to_string(),
            status: RegistrationStatus::Active,
            expiry,
            kind: RegistrationKind::Host(PermitAddress {
                street_number: Some("123".to_string()),
                unit_number: Some("4B".to_string()),
                postal_code: "V8V 1V1".to_string(),
            }),
        },
        Registration {
            registration_number: "H10000000002".to_string(),
            status: RegistrationStatus::Suspended,
            expiry,
            kind: RegistrationKind::Host(PermitAddress {
                street_number: Some("960".to_string()),
                unit_number: None,
                postal_code: "V8W 3E6".to_string(),
            }),
        },
        Registration {
            registration_number: "ST9876543210".to_string(),
            status: RegistrationStatus::Active,
            expiry,
            kind: RegistrationKind::StrataHotel(StrataProfile {
                location: BuildingAddress {
                    street_address: "100 - 1175 Douglas St".to_string(),
                    postal_code: "V8W 2E1".to_string(),
                },
                buildings: vec![
                    BuildingAddress {
                        street_address: "200 - 800 Yates St".to_string(),
                        postal_code: "V8X 1X1".to_string(),
                    },
                    BuildingAddress {
                        street_address: "1 - 45 Songhees Rd".to_string(),
                        postal_code: "V9A 6T3".to_string(),
                    },
                ],
            }),
        },
    ]
}

/// Seed the application directory with one entry per review stage so the
/// directory endpoints have something to show.
pub(crate) fn seed_applications(registrations: &[Registration]) -> Vec<ApplicationRecord> {
    let submitted_at = Utc
        .with_ymd_and_hms(2026, 1, 15, 18, 30, 0)
        .single()
        .expect("seed timestamp is valid");

    let mut records = vec![
        application(ApplicationStatus::Draft, RegistrationType::Host, None),
        application(ApplicationStatus::PaymentDue, RegistrationType::Host, None),
        application(ApplicationStatus::FullReview, RegistrationType::Host, None),
        application(
            ApplicationStatus::FullReviewApproved,
            RegistrationType::Host,
            registrations.first().cloned(),
        ),
        application(
            ApplicationStatus::NocPending,
            RegistrationType::StrataHotel,
            None,
        ),
    ];
    for record in &mut records {
        record.submitted_at = submitted_at;
    }
    records
}

fn application(
    status: ApplicationStatus,
    registration_type: RegistrationType,
    registration: Option<Registration>,
) -> ApplicationRecord {
    ApplicationRecord {
        application_number: next_application_number(),
        status,
        registration_type,
        is_set_aside: false,
        is_certificate_issued: false,
        submitted_at: Utc::now(),
        decision_date: None,
        registration,
    }
}
