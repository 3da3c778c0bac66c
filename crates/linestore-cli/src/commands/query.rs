//! Query command handlers: list, search

use anyhow::Result;

use linestore_core::Store;

use crate::output::Output;

/// List all entries in store order
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_entries(store.entries());
    Ok(())
}

/// Search keys by substring, prefix, or suffix
pub fn search(store: &Store, text: &str, prefix: bool, suffix: bool, output: &Output) -> Result<()> {
    let keys = if prefix {
        store.search_prefix(text)
    } else if suffix {
        store.search_suffix(text)
    } else {
        store.search(text)
    };
    output.print_keys(&keys);
    Ok(())
}
