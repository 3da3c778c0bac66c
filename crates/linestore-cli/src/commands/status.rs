//! Status command handler

use anyhow::Result;

use linestore_core::Store;

use crate::output::{Output, OutputFormat};

/// Show store status: path, validity, entry count, changed-ness
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let path = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unbound)".to_string());

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "path": path,
                    "valid": store.is_valid(),
                    "entries": store.len(),
                    "changed": store.is_changed(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", if store.is_changed() { "changed" } else { "clean" });
        }
        OutputFormat::Human => {
            println!("Store:   {}", path);
            println!("Valid:   {}", store.is_valid());
            println!("Entries: {}", store.len());
            println!("Changed: {}", store.is_changed());
        }
    }

    Ok(())
}
