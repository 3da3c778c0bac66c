//! Entry command handlers: get, set, unset, rename

use anyhow::{bail, Context, Result};

use linestore_core::{codec, LogWriter, Store, Value};

use crate::commands::log_activity;
use crate::output::Output;

/// Look up a single key
pub fn get(store: &Store, key: &str, output: &Output) -> Result<()> {
    match store.get(key) {
        Some(value) => {
            output.print_value(key, value);
            Ok(())
        }
        None => bail!("Key not found: {}", key),
    }
}

/// Set a key and save
///
/// Unless `raw_string` is given, the value text is typed through the same
/// inference rules the file format uses, so `set retries 3` stores an
/// Integer and `set verbose true` stores a Boolean. `raw_string` skips
/// that inference only; the store's own coercion of the texts `true` and
/// `false` into Booleans still applies, so those two words can never be
/// stored as Strings.
pub fn set(
    store: &mut Store,
    key: String,
    value: String,
    raw_string: bool,
    log: Option<&LogWriter>,
    output: &Output,
) -> Result<()> {
    let value = if raw_string {
        Value::String(value)
    } else {
        codec::infer(&value)
    };
    store.set(&key, value);
    store.save().context("Failed to save store")?;

    log_activity(log, &format!("set {}", key));
    output.message(&format!("Set {}", key));
    Ok(())
}

/// Remove keys and save. Absent keys are ignored.
pub fn unset(
    store: &mut Store,
    keys: Vec<String>,
    log: Option<&LogWriter>,
    output: &Output,
) -> Result<()> {
    store.unset_many(&keys);
    store.save().context("Failed to save store")?;

    log_activity(log, &format!("unset {}", keys.join(" ")));
    output.message(&format!("Removed {} key(s)", keys.len()));
    Ok(())
}

/// Move a value to a new key and save
pub fn rename(
    store: &mut Store,
    from: String,
    to: String,
    log: Option<&LogWriter>,
    output: &Output,
) -> Result<()> {
    if !store.contains(&from) {
        bail!("Key not found: {}", from);
    }
    store.rename(&from, &to);
    store.save().context("Failed to save store")?;

    log_activity(log, &format!("rename {} -> {}", from, to));
    output.message(&format!("Renamed {} to {}", from, to));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_set_infers_types_unless_raw() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("s.dat")).unwrap();

        set(&mut store, "n".into(), "5".into(), false, None, &quiet()).unwrap();
        set(&mut store, "s".into(), "5".into(), true, None, &quiet()).unwrap();

        assert_eq!(store.get("n"), Some(&Value::Integer(5)));
        assert_eq!(store.get("s"), Some(&Value::from("5")));
    }

    #[test]
    fn test_raw_string_cannot_bypass_boolean_coercion() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("s.dat")).unwrap();

        // The store coerces boolean text on every set, raw or not
        set(&mut store, "flag".into(), "true".into(), true, None, &quiet()).unwrap();
        assert_eq!(store.get("flag"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_get_missing_key_fails() {
        let temp = TempDir::new().unwrap();
        let store = Store::open(temp.path().join("s.dat")).unwrap();
        assert!(get(&store, "nope", &quiet()).is_err());
    }

    #[test]
    fn test_rename_requires_existing_key() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open(temp.path().join("s.dat")).unwrap();
        assert!(rename(&mut store, "ghost".into(), "b".into(), None, &quiet()).is_err());
    }

    #[test]
    fn test_unset_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("s.dat");
        let mut store = Store::open(&path).unwrap();
        set(&mut store, "a".into(), "1".into(), false, None, &quiet()).unwrap();

        unset(&mut store, vec!["a".into()], None, &quiet()).unwrap();

        let reloaded = Store::open(&path).unwrap();
        assert!(reloaded.is_empty());
    }
}
