use clap::Parser;
use ferrous_lookup_application::use_cases::{LookupOptions, LookupTargetsUseCase};
use ferrous_lookup_domain::{CliOverrides, OutputFormat};
use ferrous_lookup_infrastructure::dns::transport::create_transport;
use ferrous_lookup_infrastructure::output::stdout_sink;
use std::net::IpAddr;
use std::process::ExitCode;
use tracing::{debug, info};

mod bootstrap;

#[derive(Parser)]
#[command(name = "ferrous-lookup")]
#[command(version)]
#[command(about = "Ferrous Lookup - concurrent forward and reverse DNS lookups over UDP")]
struct Cli {
    /// Hostnames and/or IP addresses (IP literals get a PTR query)
    #[arg(required = true, value_name = "TARGET")]
    targets: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Resolver address
    #[arg(short = 's', long, value_name = "IP")]
    server: Option<IpAddr>,

    /// Resolver port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Record type for hostname targets (A or AAAA)
    #[arg(short = 't', long, value_name = "TYPE")]
    record_type: Option<String>,

    /// Per-target deadline in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Maximum lookups in flight at once
    #[arg(long, value_name = "N")]
    max_in_flight: Option<usize>,

    /// Report format (json, text)
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log every response status (forces debug level)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server: cli.server,
        port: cli.port,
        record_type: cli.record_type.clone(),
        timeout_ms: cli.timeout_ms,
        max_in_flight: cli.max_in_flight,
        format: cli.format,
        log_level: cli.log_level.clone(),
        debug: cli.debug,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!(
        resolver = %config.resolver.socket_addr(),
        targets = cli.targets.len(),
        "Starting Ferrous Lookup v{}",
        env!("CARGO_PKG_VERSION")
    );
    debug!(
        record_type = %config.query.record_type,
        timeout_ms = config.query.timeout_ms,
        max_in_flight = config.query.max_in_flight,
        format = %config.output.format,
        "Configuration loaded"
    );

    let transport = create_transport(&config.resolver);
    let use_case = LookupTargetsUseCase::new(transport, LookupOptions::from_config(&config.query));

    let summary = use_case
        .execute(&cli.targets, stdout_sink(config.output.format))
        .await?;

    if summary.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
