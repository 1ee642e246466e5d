//! Cars CLI - Command-line browser for the car catalog
//!
//! Every command is one aggregation against the catalog API: the listing,
//! a car detail, a side-by-side comparison, a batch lookup or the filter
//! options. A failed aggregation prints one generic message and exits with
//! status 1; the details go to the log.

mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use cars_client::HttpResourceClient;
use cars_core::{CarId, CategoryId, FilterCriteria, ManufacturerId};
use cars_gateway::{AggregateError, CatalogGateway};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Config, MergedConfig, Overrides};
use crate::output::{OutputContext, OutputFormat};

const DEFAULT_LOG_FILTER: &str = "cars_cli=info,cars_gateway=info,cars_client=info";
const VERBOSE_LOG_FILTER: &str = "cars_cli=debug,cars_gateway=debug,cars_client=debug";

#[derive(Parser)]
#[command(name = "cars-cli")]
#[command(author, version, about = "Car catalog browser")]
#[command(propagate_version = true)]
struct Cli {
    /// Catalog API base URL
    #[arg(short = 'u', long, env = "CARS_API_URL")]
    api_url: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "CARS_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum concurrent fetches per command
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Deadline for a whole command, in seconds
    #[arg(long, value_parser = parse_secs)]
    request_timeout: Option<Duration>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cars with their manufacturer
    List {
        /// Case-insensitive substring of the car name
        #[arg(long)]
        name: Option<String>,

        /// Manufacturer ID
        #[arg(long)]
        manufacturer: Option<ManufacturerId>,

        /// Category ID
        #[arg(long)]
        category: Option<CategoryId>,
    },

    /// Show one car with its manufacturer
    Show {
        /// Car ID
        id: CarId,
    },

    /// Compare cars side by side
    Compare {
        /// Car IDs, in display order
        #[arg(required = true)]
        ids: Vec<CarId>,
    },

    /// Fetch several cars by ID
    Cars {
        /// Car IDs
        #[arg(required = true)]
        ids: Vec<CarId>,
    },

    /// List manufacturers and categories available as filters
    Filters,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(Overrides {
        api_url: cli.api_url.clone(),
        max_concurrency: cli.max_concurrency,
        request_timeout: cli.request_timeout,
        output: cli.output,
        no_color: cli.no_color,
    });
    debug!(?merged, "Resolved configuration");

    // Create output context
    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);
    let gateway = create_gateway(&merged)?;

    // Execute command
    let result = match &cli.command {
        Commands::List {
            name,
            manufacturer,
            category,
        } => {
            let criteria = FilterCriteria {
                name: name.clone(),
                manufacturer_id: *manufacturer,
                category_id: *category,
            };
            commands::list(&gateway, &criteria, &ctx).await
        }

        Commands::Show { id } => commands::show(&gateway, *id, &ctx).await,

        Commands::Compare { ids } => commands::compare(&gateway, ids, &ctx).await,

        Commands::Cars { ids } => commands::cars(&gateway, ids, &ctx).await,

        Commands::Filters => commands::filters(&gateway, &ctx).await,
    };

    if let Err(err) = result {
        if let Some(failure) = err.downcast_ref::<AggregateError>() {
            error!(task = ?failure.task(), error = %failure, "Command failed");
            ctx.error(failure.user_message());
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

/// Create the catalog gateway for the resolved configuration
fn create_gateway(config: &MergedConfig) -> Result<CatalogGateway> {
    let client =
        HttpResourceClient::with_config(&config.client).context("Failed to create catalog client")?;
    Ok(CatalogGateway::new(Arc::new(client), config.gateway.clone()))
}

fn parse_secs(value: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("not a number of seconds: {value}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}
