use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::warn;

use crate::{RangePool, Result};

/// A [`RangePool`] behind a lock, handing out ids as [`IdHandle`]s that go
/// back to the pool when dropped.
#[derive(Debug, Clone, Default)]
pub struct SharedPool {
    inner: Arc<Mutex<RangePool>>
}

#[derive(Debug)]
pub struct IdHandle {
    id: u32,
    parent: Weak<Mutex<RangePool>>
}

impl SharedPool {
    pub fn new(max: u32) -> Result<Self> {
        RangePool::new(max).map(Self::from)
    }

    pub fn get(&self) -> Option<IdHandle> {
        let id = self.inner.lock().allocate();
        if id == 0 {
            return None;
        }
        Some(IdHandle { id, parent: Arc::downgrade(&self.inner) })
    }

    pub fn allocate(&self) -> u32 {
        self.inner.lock().allocate()
    }

    pub fn release(&self, id: u32) -> bool {
        self.inner.lock().release(id)
    }

    /// Runs `f` with the pool locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut RangePool) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

impl From<RangePool> for SharedPool {
    fn from(value: RangePool) -> Self {
        Self { inner: Arc::new(Mutex::new(value)) }
    }
}

impl IdHandle {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Detaches the id from the handle; it stays allocated until released
    /// by hand.
    pub fn into_raw(mut self) -> u32 {
        self.parent = Weak::new();
        self.id
    }
}

impl Drop for IdHandle {
    fn drop(&mut self) {
        let Some(parent) = self.parent.upgrade() else { return };
        if !parent.lock().release(self.id) {
            warn!(id = self.id, "handle dropped for an id that was already free");
        }
    }
}
