//! moviefind - movie catalog search CLI.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moviefind_api::catalog::CatalogClient;
use moviefind_search::{SearchSession, SearchView};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};

/// Environment variable holding the catalog API key.
const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run one lookup and print the results.
    Search(SearchArgs),
    /// Search interactively in the terminal.
    Browse,
    /// Inspect or create the config file.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title to search for. Omit to get the default Drama listing.
    #[arg(long, default_value = "")]
    query: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Builds a catalog client from config and the `RAPIDAPI_KEY` environment variable.
///
/// # Errors
///
/// Returns an error if `RAPIDAPI_KEY` is not set, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_catalog_client(config: &AppConfig) -> Result<CatalogClient> {
    let api_key =
        std::env::var(API_KEY_ENV).context("RAPIDAPI_KEY environment variable is required")?;
    let base_url = Url::parse(&config.catalog.base_url)
        .with_context(|| format!("invalid catalog base_url: {}", config.catalog.base_url))?;

    let mut builder = CatalogClient::builder()
        .base_url(base_url)
        .api_key(api_key)
        .api_host(&config.catalog.api_host)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(secs) = config.catalog.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("failed to build catalog client")
}

/// Loads the config file for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    tracing::debug!(path = %path.display(), "loading config");
    AppConfig::load(&path)
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the config or client cannot be set up. A failed
/// lookup is reported through the result message, not as an error.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config)?;

    let session = SearchSession::start(client, args.query.as_str());
    let view = session.settled().await.view();
    log_view(&view);

    Ok(())
}

/// Logs the message or one line per record.
fn log_view(view: &SearchView) {
    if !view.error_message.is_empty() {
        tracing::info!("{}", view.error_message);
        return;
    }
    tracing::info!("Results: {}", view.movies.len());
    tracing::info!("Title\tDescription\tImage");
    for movie in &view.movies {
        tracing::info!(
            "{}\t{}\t{}",
            movie.title,
            movie.description_or_placeholder(),
            movie.image_url_or_placeholder(),
        );
    }
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_catalog_client(&config)?;
    tui::run_browser(client)
        .await
        .context("browser TUI failed")
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;

    tracing::info!("Config file: {}", path.display());
    tracing::info!("base_url: {}", config.catalog.base_url);
    tracing::info!("api_host: {}", config.catalog.api_host);
    tracing::info!(
        "request_timeout_secs: {}",
        config
            .catalog
            .request_timeout_secs
            .map_or_else(|| String::from("none"), |s| s.to_string())
    );
    tracing::info!(
        "{API_KEY_ENV}: {}",
        if std::env::var_os(API_KEY_ENV).is_some() {
            "set"
        } else {
            "not set"
        }
    );

    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
#[instrument(skip_all)]
fn run_config_init(dir: Option<&PathBuf>, force: bool) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(cli.dir.as_ref()),
            ConfigSubcommands::Init { force } => run_config_init(cli.dir.as_ref(), force),
        },
    }
}
