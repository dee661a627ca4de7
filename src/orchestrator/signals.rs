//! Per-tab load completion, keyed by tab identifier.
//!
//! Every waiter is registered before navigation starts and removed when it
//! resolves, times out or is dropped. Completions for tabs nobody waits on
//! are ignored.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use crate::app::{Result, SkimmerError};

/// Identifier of one hidden tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Outcome reported by the browser: `Err` carries the platform message.
pub type LoadOutcome = std::result::Result<(), String>;

struct Waiter {
    generation: u64,
    tx: oneshot::Sender<LoadOutcome>,
}

#[derive(Clone, Default)]
pub struct LoadSignals {
    waiters: Arc<Mutex<HashMap<TabId, Waiter>>>,
    generation: Arc<AtomicU64>,
}

impl LoadSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start waiting for `tab` to finish loading.
    pub fn register(&self, tab: TabId) -> LoadWait {
        let (tx, rx) = oneshot::channel();
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        self.waiters.lock().insert(tab, Waiter { generation, tx });
        LoadWait {
            tab,
            generation,
            rx,
            signals: self.clone(),
        }
    }

    /// Deliver a load outcome. Returns false if no one was waiting on `tab`.
    pub fn complete(&self, tab: TabId, outcome: LoadOutcome) -> bool {
        let Some(waiter) = self.waiters.lock().remove(&tab) else {
            debug!("Ignoring load signal for unwatched {}", tab);
            return false;
        };
        waiter.tx.send(outcome).is_ok()
    }

    /// Number of tabs still being waited on
    pub fn pending(&self) -> usize {
        self.waiters.lock().len()
    }

    fn release(&self, tab: TabId, generation: u64) {
        let mut waiters = self.waiters.lock();
        if waiters.get(&tab).is_some_and(|w| w.generation == generation) {
            waiters.remove(&tab);
        }
    }
}

/// A registered wait for one tab's load.
pub struct LoadWait {
    tab: TabId,
    generation: u64,
    rx: oneshot::Receiver<LoadOutcome>,
    signals: LoadSignals,
}

impl LoadWait {
    /// Resolve once the tab loads, fails, or `limit` elapses.
    pub async fn wait(mut self, limit: Duration) -> Result<()> {
        match tokio::time::timeout(limit, &mut self.rx).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(message))) => Err(SkimmerError::Platform(message)),
            Ok(Err(_)) => Err(SkimmerError::Platform(format!(
                "Load listener for {} was dropped",
                self.tab
            ))),
            Err(_) => Err(SkimmerError::Platform(format!(
                "Timed out after {:?} waiting for {} to load",
                limit,
                self.tab
            ))),
        }
    }
}

impl Drop for LoadWait {
    fn drop(&mut self) {
        self.signals.release(self.tab, self.generation);
    }
}
