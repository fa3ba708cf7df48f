//! # webstorage-migrate
//!
//! One-shot, best-effort migration of a legacy embedded WebView
//! localStorage database (the SQLite file written by runtimes such as
//! Crosswalk) into the key-value store of the current WebView.
//!
//! The crate is a migration controller, not a storage engine: it
//! locates the legacy tree on a device filesystem whose layout is not
//! guaranteed, extracts the key-value table read-only, and hands the
//! snapshot to the new store exactly once, off the host's UI context.
//! Every failure degrades to "skip migration"; nothing propagates to
//! the host.
//!
//! ## Modules
//!
//! - `config` - layout of the legacy storage tree
//! - `controller` - run-once orchestration and state machine
//! - `error` - typed errors for the fallible internals
//! - `exec` - execution contexts for thread-affinity dispatch
//! - `inject` - batched handoff into the new store
//! - `paths` - legacy storage path resolution
//! - `reader` - read-only SQLite extraction
//! - `snapshot` - immutable extracted state
pub mod config;
pub mod controller;
pub mod error;
pub mod exec;
pub mod inject;
pub mod paths;
pub mod reader;
pub mod snapshot;

pub use config::MigrationConfig;
pub use controller::{HostEnvironment, MigrationController, MigrationState};
pub use error::{MigrationError, MigrationResult};
pub use exec::{BackgroundPool, ExecutionContext, InlineContext, Task};
pub use inject::{build_script, Injector, StoreBridge};
pub use reader::LegacyStoreReader;
pub use snapshot::MigrationSnapshot;
