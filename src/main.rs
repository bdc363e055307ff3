//! User service entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use user_service::config::Config;
use user_service::routes::{RouteInitializer, RouteTable};
use user_service::users::InMemoryUserStore;
use user_service::{metrics, server, ServiceError};

/// User service HTTP server.
#[derive(Parser, Debug)]
#[command(name = "user-service")]
#[command(about = "Serves a health check and a versioned user listing")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default).
    Serve,

    /// Print the route table without starting a server.
    Routes,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration is loaded before logging so RUST_LOG and LOG_JSON apply
    let config = Config::load();
    let log_json = config.as_ref().map(|c| c.log_json).unwrap_or(false);
    let filter = match &config {
        Ok(c) => c.log_filter(args.verbose),
        Err(_) => Config::default().log_filter(args.verbose),
    };
    init_logging(&filter, log_json);

    let mut config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(ServiceError::from(e).into());
        }
    };

    if let Some(port) = args.port {
        config.port = port;
    }

    match args.command {
        Some(Command::Routes) => cmd_routes(&config),
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

fn init_logging(directives: &str, json: bool) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Print the route table.
fn cmd_routes(config: &Config) -> anyhow::Result<()> {
    let initializer = RouteInitializer::new(config.prefix()?);

    let mut table = RouteTable::new();
    initializer.initialize(&mut table)?;

    for route in table.routes() {
        println!("{}", route);
    }

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("USER SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    if let Some(path) = &config.users_file {
        print!("Loading users file... ");
        match InMemoryUserStore::from_json_file(path) {
            Ok(store) => {
                println!("OK");
                println!("  Users: {}", store.len()?);
            }
            Err(e) => {
                println!("FAILED");
                println!("  Error: {}", e);
                return Err(anyhow::anyhow!("Users file invalid"));
            }
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen: {}:{}", config.host, config.port);
    println!("  API Prefix: {}", config.api_prefix);
    println!(
        "  Users File: {}",
        config
            .users_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none, empty store)".to_string())
    );
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("  CORS Any Origin: {}", config.cors_allow_any);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }

    info!("Configuration loaded successfully");
    info!("API prefix: {}", config.api_prefix);

    // Recorder goes in before routes are registered so their counts are kept
    let metrics_handle = if config.metrics_enabled {
        match metrics::install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Metrics disabled, recorder install failed: {}", e);
                None
            }
        }
    } else {
        None
    };
    metrics::init_metrics();

    let router = server::build_app(&config, metrics_handle)?;
    let listener = server::bind(&config).await?;
    server::serve(listener, router).await?;

    Ok(())
}
