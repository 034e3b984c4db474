// Tracks the active run per display target so a new run replaces the old one
use super::CancelHandle;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct ActiveRuns {
    handles: Mutex<HashMap<String, CancelHandle>>,
}

impl ActiveRuns {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CancelHandle>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `handle` for `target`, cancelling whatever run was active there.
    ///
    /// Returns the previous handle only if it was still running.
    pub fn replace(&self, target: &str, handle: CancelHandle) -> Option<CancelHandle> {
        let mut handles = self.lock();
        handles.retain(|_, h| h.is_active());
        let previous = handles.insert(target.to_string(), handle)?;
        previous.cancel().then_some(previous)
    }

    pub fn cancel(&self, target: &str) -> bool {
        self.lock()
            .remove(target)
            .map(|handle| handle.cancel())
            .unwrap_or(false)
    }

    pub fn cancel_all(&self) -> usize {
        self.lock()
            .drain()
            .filter(|(_, handle)| handle.cancel())
            .count()
    }

    pub fn get(&self, target: &str) -> Option<CancelHandle> {
        self.lock().get(target).filter(|h| h.is_active()).cloned()
    }

    pub fn active_count(&self) -> usize {
        self.lock().values().filter(|h| h.is_active()).count()
    }
}
