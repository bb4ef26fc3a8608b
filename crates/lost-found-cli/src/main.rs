// crates/lost-found-cli/src/main.rs
// ============================================================================
// Module: Lost & Found CLI Entry Point
// Description: Command dispatcher for serving and inspecting the registry.
// Purpose: Run the HTTP backend and offline config and store checks.
// Dependencies: clap, lost-found-config, lost-found-server, tokio, tracing.
// ============================================================================

//! ## Overview
//! The Lost & Found CLI starts the item registry HTTP server and offers
//! offline helpers to validate configuration and dump the stored items.
//! Diagnostics go to stderr through `tracing`; command output goes to stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use lost_found_config::LostFoundConfig;
use lost_found_core::ItemStore;
use lost_found_server::ItemServer;
use lost_found_server::build_item_store;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "lost-found", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Lost & Found HTTP backend.
    Serve(ServeCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Item store utilities.
    Store {
        /// Selected store subcommand.
        #[command(subcommand)]
        command: StoreCommand,
    },
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to lost-found.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the listener address from configuration.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Lost & Found configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to lost-found.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Store subcommands.
#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Print every stored item as a JSON array, newest first.
    List(StoreListCommand),
}

/// Arguments for listing stored items.
#[derive(Args, Debug)]
struct StoreListCommand {
    /// Optional config file path (defaults to lost-found.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing()?;

    let Some(command) = cli.command else {
        write_stdout_line("usage: lost-found <serve|config|store> [--help]")
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => command_config(&command),
        Commands::Store {
            command,
        } => command_store(&command),
    }
}

/// Installs the stderr log subscriber.
fn init_tracing() -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|err| CliError::new(format!("failed to initialize logging: {err}")))
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = load_config(command.config)?;
    apply_bind_override(&mut config, command.bind.as_deref())?;

    let server = tokio::task::spawn_blocking(move || ItemServer::from_config(config))
        .await
        .map_err(|err| CliError::new(format!("server init failed: init join failed: {err}")))?
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    tracing::info!(bind = %server.bind_addr(), "starting lost & found backend");
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;

    Ok(ExitCode::SUCCESS)
}

/// Applies a `--bind` override and revalidates the configuration.
fn apply_bind_override(config: &mut LostFoundConfig, bind: Option<&str>) -> CliResult<()> {
    let Some(bind) = bind else {
        return Ok(());
    };
    config.server.bind = bind.to_string();
    config.validate().map_err(|err| CliError::new(format!("invalid --bind: {err}")))
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Executes config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = load_config(command.config.clone())?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Store Command
// ============================================================================

/// Executes store subcommands.
fn command_store(command: &StoreCommand) -> CliResult<ExitCode> {
    match command {
        StoreCommand::List(command) => command_store_list(command),
    }
}

/// Prints the configured store's items as a JSON array.
fn command_store_list(command: &StoreListCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.clone())?;
    let store = build_item_store(&config)
        .map_err(|err| CliError::new(format!("failed to open item store: {err}")))?;
    let items =
        store.list().map_err(|err| CliError::new(format!("failed to load items: {err}")))?;
    let payload = serde_json::to_string(&items)
        .map_err(|err| CliError::new(format!("failed to encode items: {err}")))?;
    write_stdout_line(&payload).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads configuration from an explicit path or the default locations.
fn load_config(path: Option<PathBuf>) -> CliResult<LostFoundConfig> {
    LostFoundConfig::load(path.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
