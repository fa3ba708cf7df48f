//! Orchestration of the one-shot migration run
//!
//! The controller owns the run-once guard and the state machine
//! (`NotStarted -> Running -> Completed | Skipped`), sequences the path
//! resolver, the reader and the injector, and contains every failure so
//! nothing escapes to the host. All outcomes short of a handoff are a
//! skip, never an error.

use crate::config::MigrationConfig;
use crate::exec::ExecutionContext;
use crate::inject::{Injector, StoreBridge};
use crate::paths::locate_legacy_root;
use crate::reader::LegacyStoreReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Filesystem surface the host platform hands over on startup.
#[derive(Debug, Clone)]
pub struct HostEnvironment {
    /// App-private files directory, the primary candidate.
    pub files_dir: PathBuf,
    /// External files directory, consulted only when the primary
    /// candidate yields nothing.
    pub external_files_dir: Option<PathBuf>,
}

impl HostEnvironment {
    pub fn new(files_dir: impl Into<PathBuf>) -> Self {
        Self {
            files_dir: files_dir.into(),
            external_files_dir: None,
        }
    }

    pub fn with_external_files_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.external_files_dir = Some(dir.into());
        self
    }

    fn candidates(&self) -> Vec<&Path> {
        let mut dirs = vec![self.files_dir.as_path()];
        if let Some(external) = &self.external_files_dir {
            dirs.push(external.as_path());
        }
        dirs
    }
}

/// Lifecycle of one migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    NotStarted,
    Running,
    /// Handoff issued to the new store. Not a per-item write receipt;
    /// the underlying write is fire-and-forget.
    Completed,
    /// Nothing to migrate, or a fault degraded the run to a no-op.
    Skipped,
}

impl MigrationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// Drives the whole migration. One instance lives for the process; the
/// guard makes the body run at most once no matter how often the host
/// calls [`MigrationController::on_ready`].
///
/// Cloning is shallow: clones share the guard and the state channel.
#[derive(Clone)]
pub struct MigrationController {
    inner: Arc<Inner>,
}

struct Inner {
    config: MigrationConfig,
    background: Arc<dyn ExecutionContext>,
    injector: Injector,
    attempted: AtomicBool,
    state_tx: watch::Sender<MigrationState>,
}

impl MigrationController {
    pub fn new(
        config: MigrationConfig,
        background: Arc<dyn ExecutionContext>,
        ui: Arc<dyn ExecutionContext>,
        store: Arc<dyn StoreBridge>,
    ) -> Self {
        let (state_tx, _) = watch::channel(MigrationState::NotStarted);
        Self {
            inner: Arc::new(Inner {
                config,
                background,
                injector: Injector::new(ui, store),
                attempted: AtomicBool::new(false),
                state_tx,
            }),
        }
    }

    pub fn state(&self) -> MigrationState {
        *self.inner.state_tx.borrow()
    }

    /// Subscription for hosts that want to await the terminal state
    /// instead of polling.
    pub fn watch_state(&self) -> watch::Receiver<MigrationState> {
        self.inner.state_tx.subscribe()
    }

    /// Host entry point, called once from the plugin lifecycle. Never
    /// blocks: the body is dispatched onto the background context and
    /// this returns immediately.
    ///
    /// The guard is set before dispatch, so a second call during an
    /// in-flight run is ignored rather than racing a double-run. It
    /// records "attempted", not "succeeded": a run that finds nothing
    /// still consumes the one attempt.
    pub fn on_ready(&self, env: &HostEnvironment) {
        if self.inner.attempted.swap(true, Ordering::SeqCst) {
            debug!("migration already attempted this process, ignoring");
            return;
        }
        self.inner.state_tx.send_replace(MigrationState::Running);

        let inner = Arc::clone(&self.inner);
        let env = env.clone();
        self.inner
            .background
            .dispatch(Box::new(move || inner.run(&env)));
    }
}

impl Inner {
    fn run(&self, env: &HostEnvironment) {
        info!("starting localStorage migration");

        let Some(legacy_root) = locate_legacy_root(env.candidates(), &self.config.legacy_data_dir)
        else {
            info!("no legacy runtime directory found, skipping migration");
            self.settle(MigrationState::Skipped);
            return;
        };

        let db_file = self.config.db_path(&legacy_root);
        if !db_file.exists() {
            info!(db = %db_file.display(), "legacy store file does not exist, skipping migration");
            self.settle(MigrationState::Skipped);
            return;
        }

        let snapshot = LegacyStoreReader::new(&self.config).read_all(&db_file);
        if snapshot.is_empty() {
            info!("no legacy data found to migrate, skipping");
            self.settle(MigrationState::Skipped);
            return;
        }

        self.injector.inject(snapshot);
        // Old files are left in place; cleanup is a follow-up concern.
        info!(
            legacy_root = %legacy_root.display(),
            "migration handoff complete, leaving legacy files for later cleanup"
        );
        self.settle(MigrationState::Completed);
    }

    fn settle(&self, state: MigrationState) {
        self.state_tx.send_replace(state);
    }
}
