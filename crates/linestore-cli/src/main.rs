//! linestore CLI
//!
//! Command-line interface over the line-oriented typed key-value store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use linestore_core::{Config, LogWriter, Store};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linestore")]
#[command(about = "Typed key-value store backed by a line-oriented text file")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Store file (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Config file (overrides the default location)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write entries in ascending key order on save
    #[arg(long, global = true)]
    sorted: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a key
    Get {
        /// Key to look up
        key: String,
    },
    /// Set a key and save
    Set {
        /// Key to set
        key: String,
        /// Value text; typed by inference unless --raw-string is given
        value: String,
        /// Skip type inference and store the value as a String (the store
        /// still coerces the texts "true"/"false" into Booleans)
        #[arg(long)]
        raw_string: bool,
    },
    /// Remove keys and save
    #[command(alias = "rm")]
    Unset {
        /// Keys to remove (absent keys are ignored)
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Move a value to a new key and save
    #[command(alias = "mv")]
    Rename {
        /// Existing key
        from: String,
        /// New key
        to: String,
    },
    /// List all entries
    #[command(alias = "ls")]
    List,
    /// Search keys
    Search {
        /// Text to match against keys
        text: String,
        /// Match keys starting with the text
        #[arg(long, conflicts_with = "suffix")]
        prefix: bool,
        /// Match keys ending with the text
        #[arg(long)]
        suffix: bool,
    },
    /// Export the store as JSON
    Export {
        /// Project delimited keys into a nested object using this delimiter
        #[arg(long, value_name = "DELIMITER")]
        nested: Option<char>,
    },
    /// Import a JSON object file into the store
    Import {
        /// JSON file to import
        file: PathBuf,
        /// Merge into the existing mapping instead of replacing it
        #[arg(long)]
        merge: bool,
        /// Do not save after importing
        #[arg(long)]
        no_save: bool,
    },
    /// Show store status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (store_path, sort_on_write, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone().unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => commands::config::show(cli.config.as_ref(), &output),
            ConfigCommands::Set { key, value } => {
                commands::config::set(key, value, cli.config.as_ref(), &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(cli.config.as_ref()).context("Failed to load configuration")?;

    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path.clone());
    let mut store = Store::open(&store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;
    store.set_sort_on_write(cli.sorted || config.sort_on_write);

    let log = config.log_file.as_ref().map(LogWriter::new);
    let log = log.as_ref();

    match cli.command {
        Commands::Get { key } => commands::entry::get(&store, &key, &output),
        Commands::Set {
            key,
            value,
            raw_string,
        } => commands::entry::set(&mut store, key, value, raw_string, log, &output),
        Commands::Unset { keys } => commands::entry::unset(&mut store, keys, log, &output),
        Commands::Rename { from, to } => {
            commands::entry::rename(&mut store, from, to, log, &output)
        }
        Commands::List => commands::query::list(&store, &output),
        Commands::Search {
            text,
            prefix,
            suffix,
        } => commands::query::search(&store, &text, prefix, suffix, &output),
        Commands::Export { nested } => commands::transfer::export(&store, nested, &output),
        Commands::Import {
            file,
            merge,
            no_save,
        } => commands::transfer::import(&mut store, file, merge, no_save, log, &output),
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Initialize stderr diagnostics, controlled by RUST_LOG
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
