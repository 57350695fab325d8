//! News Sorter - Main Entry Point
//!
//! Loads configuration, resolves the target project and serves reaction
//! events until interrupted.

use clap::{Parser, Subcommand};
use news_sorter::bot::{ApprovalPolicy, ReactionHandler, ReactionServer};
use news_sorter::config::{Credentials, SorterConfig};
use news_sorter::intake::{IntakePipeline, SystemClock};
use news_sorter::observability::{init_default_logging_with, level_for_verbosity};
use news_sorter::title::HttpTitleExtractor;
use news_sorter::todoist::TodoistClient;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// Files tasks for approved links into a Todoist project
#[derive(Parser)]
#[command(name = "news-sorter")]
#[command(about = "Turn approved chat links into scheduled Todoist tasks")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve reaction events until interrupted
    Run,
    /// File a single link without the chat bridge
    Intake {
        /// Page to file
        #[arg(long)]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Show the effective configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging_with(level_for_verbosity(cli.verbose));

    info!("Starting news-sorter v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Some(timeout) = cli.timeout {
        config.todoist.timeout_secs = timeout;
        if let Err(e) = config.validate() {
            error!("Invalid --timeout: {}", e);
            process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Run => run_sorter(config).await,
        Commands::Intake { url } => intake_once(config, &url).await,
        Commands::Config { show } => handle_config_command(config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }

    info!("Application shutdown complete");
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<SorterConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(SorterConfig::load_from_file(path)?)
        }
        None => {
            for path_str in ["news-sorter.toml", "config/news-sorter.toml"] {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(SorterConfig::load_from_file(&path)?);
                }
            }

            info!("No configuration file found, using defaults");
            Ok(SorterConfig::default())
        }
    }
}

/// Build the pipeline for `api_key`; an unknown project is fatal
async fn build_pipeline(
    config: &SorterConfig,
    api_key: &str,
) -> Result<Arc<IntakePipeline>, Box<dyn std::error::Error>> {
    let client = TodoistClient::from_config(config.gateway_config(api_key))?;
    let pipeline = IntakePipeline::initialize(
        Arc::new(client),
        &config.todoist.project_name,
        config.scheduling,
        Arc::new(SystemClock),
    )
    .await?;

    if let Some(project) = pipeline.project() {
        info!(project_id = %project.id, "Filing tasks into project '{}'", project.name);
    }
    Ok(Arc::new(pipeline))
}

fn build_handler(
    config: &SorterConfig,
    pipeline: Arc<IntakePipeline>,
) -> Result<ReactionHandler, Box<dyn std::error::Error>> {
    let extractor = HttpTitleExtractor::new(config.http_timeout())?;
    Ok(ReactionHandler::new(
        pipeline,
        Arc::new(extractor),
        ApprovalPolicy::new(config.bot.approve_emojis.iter().cloned()),
    ))
}

async fn run_sorter(config: SorterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::from_env(&config)?;

    let pipeline = build_pipeline(&config, &credentials.api_key).await?;
    let handler = Arc::new(build_handler(&config, pipeline)?);
    let server = ReactionServer::new(handler, credentials.bot_token, config.bot.listen_port);

    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    info!("News sorter is running and waiting for reactions...");

    tokio::select! {
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
        _ = server.run() => {
            warn!("Reaction webhook stopped unexpectedly");
        }
    }

    // Let in-flight log lines drain before exit
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}

async fn intake_once(config: SorterConfig, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = Credentials::api_key_from_env(&config)?;

    let pipeline = build_pipeline(&config, &api_key).await?;
    let handler = build_handler(&config, pipeline)?;

    let reply = handler.intake_link(url).await;
    println!("{}", serde_json::to_string_pretty(&reply)?);

    if reply.is_failure() {
        return Err("intake failed".into());
    }
    Ok(())
}

fn handle_config_command(
    config: SorterConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("{}", toml::to_string_pretty(&config)?);
    } else {
        info!("Configuration is valid");
    }
    Ok(())
}
