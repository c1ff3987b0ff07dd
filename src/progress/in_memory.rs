use anyhow::{format_err, Result};
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use super::*;

pub struct InMemoryProgressTracker {
    store: Mutex<BTreeMap<FollowerId, Offset>>,
}

impl InMemoryProgressTracker {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(BTreeMap::default()),
        }
    }

    pub fn new_shared() -> SharedProgressTracker {
        Arc::new(Self::new())
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<FollowerId, Offset>>> {
        self.store
            .lock()
            .map_err(|_e| format_err!("mutex poisoned"))
    }
}

impl Default for InMemoryProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker for InMemoryProgressTracker {
    fn load(&self, id: FollowerIdRef) -> Result<Option<Offset>> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn store(&self, id: FollowerIdRef, offset: Offset) -> Result<()> {
        self.lock()?.insert(id.to_owned(), offset);
        Ok(())
    }

    fn forget(&self, id: FollowerIdRef) -> Result<()> {
        self.lock()?.remove(id);
        Ok(())
    }
}
