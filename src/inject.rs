//! Injection of a migration snapshot into the new runtime's store
//!
//! The whole snapshot is batched into a single script so only one
//! dispatch crosses onto the UI context. Failures are logged and
//! swallowed; there is exactly one injection attempt per run.

use crate::error::{MigrationError, MigrationResult};
use crate::exec::ExecutionContext;
use crate::snapshot::MigrationSnapshot;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Write surface of the new runtime's key-value store.
///
/// The single operation evaluates a script in the page context.
/// Implementations are only ever driven from the UI execution context.
pub trait StoreBridge: Send + Sync {
    fn eval_script(&self, script: &str) -> anyhow::Result<()>;
}

/// Hands extracted snapshots to the new store on its required context.
pub struct Injector {
    ui: Arc<dyn ExecutionContext>,
    store: Arc<dyn StoreBridge>,
}

impl Injector {
    pub fn new(ui: Arc<dyn ExecutionContext>, store: Arc<dyn StoreBridge>) -> Self {
        Self { ui, store }
    }

    /// Dispatches one set-everything script onto the UI context.
    /// No-ops on an empty snapshot.
    pub fn inject(&self, snapshot: MigrationSnapshot) {
        if snapshot.is_empty() {
            debug!("snapshot is empty, nothing to inject");
            return;
        }

        let script = match build_script(&snapshot) {
            Ok(script) => script,
            Err(err) => {
                error!(error = %err, "failed to serialize snapshot for injection");
                return;
            }
        };

        let store = Arc::clone(&self.store);
        let items = snapshot.len();
        self.ui.dispatch(Box::new(move || match store.eval_script(&script) {
            Ok(()) => info!(items, "handed snapshot to new store"),
            Err(err) => {
                let err = MigrationError::Injection(err);
                error!(error = %err, "store injection failed");
            }
        }));
    }
}

/// Builds the script that replays the snapshot against the new store.
/// Per-key success and any failure are reported through the page's own
/// console so they land in the engine's diagnostic log.
pub fn build_script(snapshot: &MigrationSnapshot) -> MigrationResult<String> {
    let payload = serde_json::to_string(snapshot)?;
    Ok(format!(
        "try {{\n\
         \x20 const data = {payload};\n\
         \x20 for (const key in data) {{\n\
         \x20   localStorage.setItem(key, data[key]);\n\
         \x20   console.log('Migrated localStorage item:', key);\n\
         \x20 }}\n\
         \x20 console.log('LocalStorage migration complete');\n\
         }} catch (e) {{\n\
         \x20 console.error('LocalStorage migration error:', e);\n\
         }}\n"
    ))
}
