use crate::infra::{seed_registrations, InMemoryAuditLog, InMemoryRegistry};
use crate::server;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::sync::Arc;
use strr::config::AppConfig;
use strr::error::AppError;
use strr::validation::PermitValidationService;

#[derive(Parser, Debug)]
#[command(
    name = "Short-Term Rental Registry",
    about = "Run the permit validation service or exercise it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate an address claim against the seeded registry and print the response
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Registration number printed on the permit
    #[arg(long)]
    identifier: String,
    /// Claimed street number
    #[arg(long)]
    street_number: String,
    /// Claimed unit number, if any
    #[arg(long)]
    unit_number: Option<String>,
    /// Claimed postal code
    #[arg(long)]
    postal_code: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Validate(args) => run_validate(args),
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let registry = Arc::new(InMemoryRegistry::with(seed_registrations()));
    let audit = Arc::new(InMemoryAuditLog::default());
    let service = PermitValidationService::new(registry, audit, config.validation);

    let mut address = json!({
        "streetNumber": args.street_number,
        "postalCode": args.postal_code,
    });
    if let Some(unit_number) = args.unit_number {
        address["unitNumber"] = json!(unit_number);
    }
    let request = json!({ "identifier": args.identifier, "address": address });

    let (response, status) = service.validate_permit(request);
    println!("HTTP {status}");
    println!(
        "{}",
        serde_json::to_string_pretty(&response).unwrap_or_else(|_| response.to_string())
    );
    Ok(())
}
