use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use jobboard::config::AuthConfig;
use jobboard::store::{MemoryObjectStorage, MemoryStore};
use jobboard::JobBoard;
use metrics_exporter_prometheus::PrometheusHandle;

pub(crate) type MemoryBoard = JobBoard<MemoryStore, MemoryObjectStorage>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-process backends plus the board wired on top of them.
pub(crate) struct MemoryBackends {
    pub(crate) store: Arc<MemoryStore>,
    pub(crate) storage: Arc<MemoryObjectStorage>,
    pub(crate) board: Arc<MemoryBoard>,
}

pub(crate) fn memory_backends(auth: &AuthConfig, public_base_url: String) -> MemoryBackends {
    let store = Arc::new(MemoryStore::new());
    let storage = Arc::new(MemoryObjectStorage::new(public_base_url));
    let board = Arc::new(JobBoard::new(Arc::clone(&store), Arc::clone(&storage), auth));

    MemoryBackends {
        store,
        storage,
        board,
    }
}
