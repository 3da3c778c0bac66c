//! linestore core library
//!
//! A typed key-value store backed by a line-oriented text file. Values are
//! typed by inference on read (integers, floats, booleans, null, strings,
//! and base64-embedded JSON trees), and the store tracks changes against a
//! snapshot captured at load time.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open("settings.dat")?;
//!
//! store.set("AVE_LOG_FOLDER", "logs");
//! store.set("retries", 3i64);
//! store.save()?;
//!
//! if store.is_changed() {
//!     // live mapping differs from what was loaded
//! }
//! ```
//!
//! # Modules
//!
//! - `store`: the store itself (main entry point)
//! - `value`: the typed value model
//! - `codec`: line-level decode/encode for the text format
//! - `diff`: change detection against the load-time snapshot
//! - `nested`: delimited-path projection into JSON trees
//! - `config`: application configuration
//! - `logging`: timestamped activity log writer
//!
//! # Threading
//!
//! A [`Store`] is a single-owner synchronous object with no internal
//! locking; see its type-level documentation.

pub mod codec;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod nested;
pub mod store;
pub mod value;

pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use logging::LogWriter;
pub use nested::set_nested;
pub use store::{EntryMap, Store};
pub use value::{Value, ValueKind};
