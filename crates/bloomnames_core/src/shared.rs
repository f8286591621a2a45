//! Thread-safe handle: one mutex guards reads and writes alike, so a reader
//! never observes an `add` that has set only some of its bits.
use crate::filter::BloomNames;
use crate::params::FilterParams;
use crate::raw::RawValue;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug, Default)]
pub struct SharedBloomNames {
    inner: Arc<Mutex<BloomNames>>,
}

impl SharedBloomNames {
    pub fn new(filter: BloomNames) -> Self {
        Self { inner: Arc::new(Mutex::new(filter)) }
    }

    // Bits only ever go from 0 to 1, so state left by a panicking holder is still valid.
    fn lock(&self) -> MutexGuard<'_, BloomNames> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add(&self, name: impl AsRef<[u8]>) {
        self.lock().add(name);
    }

    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.lock().contains(name)
    }

    pub fn raw_value(&self) -> RawValue {
        self.lock().raw_value()
    }

    pub fn params(&self) -> FilterParams {
        self.lock().params().clone()
    }

    /// Consistent copy for lock-free reads.
    pub fn snapshot(&self) -> BloomNames {
        self.lock().clone()
    }
}

impl From<BloomNames> for SharedBloomNames {
    fn from(filter: BloomNames) -> Self {
        Self::new(filter)
    }
}
