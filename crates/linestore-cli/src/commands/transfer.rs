//! Export/import command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::{Map, Value as Json};

use linestore_core::{set_nested, LogWriter, Store};

use crate::commands::log_activity;
use crate::output::Output;

/// Export the store as JSON
///
/// With `nested`, keys are split on the given delimiter and projected into
/// a nested object (`folders/log` becomes `{"folders": {"log": ...}}`);
/// otherwise the export is the flat mapping.
pub fn export(store: &Store, nested: Option<char>, _output: &Output) -> Result<()> {
    match nested {
        Some(delimiter) => {
            let mut tree = Json::Object(Map::new());
            for (key, value) in store.iter() {
                set_nested(&mut tree, key, value.to_json(), delimiter);
            }
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        None => println!("{}", store.to_json()),
    }
    Ok(())
}

/// Import a JSON object file into the store
pub fn import(
    store: &mut Store,
    file: PathBuf,
    merge: bool,
    no_save: bool,
    log: Option<&LogWriter>,
    output: &Output,
) -> Result<()> {
    let text = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read import file: {}", file.display()))?;

    store
        .from_json(&text, merge, !no_save)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    log_activity(log, &format!("import {}", file.display()));
    output.message(&format!(
        "Imported {} ({} entries now in store)",
        file.display(),
        store.len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use linestore_core::Value;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_import_replaces_and_saves() {
        let temp = TempDir::new().unwrap();
        let store_path = temp.path().join("s.dat");
        let mut store = Store::open(&store_path).unwrap();
        store.set("old", 1i64);

        let file = temp.path().join("in.json");
        std::fs::write(&file, r#"{"a": 1, "b": "text"}"#).unwrap();

        import(&mut store, file, false, false, None, &quiet()).unwrap();
        assert!(!store.contains("old"));

        let reloaded = Store::open(&store_path).unwrap();
        assert_eq!(reloaded.get("a"), Some(&Value::Integer(1)));
        assert_eq!(reloaded.get("b"), Some(&Value::from("text")));
    }

    #[test]
    fn test_import_merge_keeps_existing_entries() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("s.dat")).unwrap();
        store.set("keep", 1i64);

        let file = temp.path().join("in.json");
        std::fs::write(&file, r#"{"added": true}"#).unwrap();

        import(&mut store, file, true, true, None, &quiet()).unwrap();
        assert_eq!(store.get("keep"), Some(&Value::Integer(1)));
        assert_eq!(store.get("added"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_import_rejects_non_object_file() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("s.dat")).unwrap();

        let file = temp.path().join("in.json");
        std::fs::write(&file, "[1, 2, 3]").unwrap();

        assert!(import(&mut store, file, false, true, None, &quiet()).is_err());
        assert!(store.is_empty());
    }
}
