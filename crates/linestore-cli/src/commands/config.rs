//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use linestore_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "store_path": config.store_path,
                    "sort_on_write": config.sort_on_write,
                    "log_file": config.log_file,
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.store_path.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  store_path:    {}", config.store_path.display());
            println!("  sort_on_write: {}", config.sort_on_write);
            println!(
                "  log_file:      {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match key.as_str() {
        "store_path" => {
            config.store_path = value.clone().into();
        }
        "sort_on_write" => {
            config.sort_on_write = value.eq_ignore_ascii_case("true") || value == "1";
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.clone().into())
            };
        }
        _ => bail!(
            "Unknown configuration key: {} (expected store_path, sort_on_write, or log_file)",
            key
        ),
    }

    // Persist to the same file the settings were loaded from
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;
    output.message(&format!("Set {} = {}", key, value));
    Ok(())
}
