use crate::cli::ServeArgs;
use crate::infra::{
    seed_applications, seed_registrations, AppState, InMemoryAuditLog, InMemoryDirectory,
    InMemoryRegistry,
};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use strr::applications::ApplicationDirectory;
use strr::config::AppConfig;
use strr::error::AppError;
use strr::telemetry;
use strr::validation::PermitValidationService;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registrations = seed_registrations();
    let directory = Arc::new(InMemoryDirectory::default());
    for record in seed_applications(&registrations) {
        if let Err(err) = directory.insert(record) {
            warn!(error = %err, "skipping duplicate seed application");
        }
    }

    let registry = Arc::new(InMemoryRegistry::with(registrations));
    let audit = Arc::new(InMemoryAuditLog::default());
    let validation_service = Arc::new(PermitValidationService::new(
        registry,
        audit,
        config.validation,
    ));

    let app = with_service_routes(validation_service, directory)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "permit validation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
