//! Binary entry point for fieldstore.
//!
//! Each invocation plays one dashboard page: it opens the store for a
//! resource from its cache, refreshes it from the backend, optionally
//! mutates it, and prints the result.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use fieldstore::config::FieldstoreConfig;
use fieldstore::observability;
use fieldstore::rendering::OutputFormat;
use fieldstore::ResourceKind;
use std::path::PathBuf;
use std::process::ExitCode;

/// Fieldstore - offline-tolerant client for the field-force backend.
#[derive(Parser)]
#[command(name = "fieldstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Skip the page-load refresh and work from the cache.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List one page of a resource.
    List {
        /// Resource name (see `fieldstore resources`).
        resource: ResourceKind,

        /// Page number (clamped to the available pages).
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Case-insensitive search term.
        #[arg(short, long)]
        search: Option<String>,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Create a record.
    Create {
        /// Resource name.
        resource: ResourceKind,

        /// Field values as key=value (repeatable).
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Update a record.
    Update {
        /// Resource name.
        resource: ResourceKind,

        /// Record id as listed (e.g. 17 or L1712345678901).
        id: String,

        /// Field values as key=value (repeatable).
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Delete a record.
    Delete {
        /// Resource name.
        resource: ResourceKind,

        /// Record id as listed.
        id: String,
    },

    /// Retry the server connection for a resource.
    Retry {
        /// Resource name.
        resource: ResourceKind,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Push records created offline to the server.
    Sync {
        /// Resource name.
        resource: ResourceKind,
    },

    /// Show configuration and cache status.
    Status,

    /// List the available resources.
    Resources,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "fieldstore", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = observability::init_from_env(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let config = match FieldstoreConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &FieldstoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let offline = cli.offline;
    match cli.command {
        Commands::List {
            resource,
            page,
            search,
            format,
        } => commands::cmd_list(config, resource, page, search, format, offline),

        Commands::Create { resource, fields } => {
            commands::cmd_create(config, resource, &fields, offline)
        },

        Commands::Update {
            resource,
            id,
            fields,
        } => commands::cmd_update(config, resource, &id, &fields, offline),

        Commands::Delete { resource, id } => commands::cmd_delete(config, resource, &id, offline),

        Commands::Retry { resource, format } => commands::cmd_retry(config, resource, format),

        Commands::Sync { resource } => commands::cmd_sync(config, resource),

        Commands::Status => commands::cmd_status(config),

        Commands::Resources => commands::cmd_resources(config),

        Commands::Completions { .. } => Ok(()),
    }
}
