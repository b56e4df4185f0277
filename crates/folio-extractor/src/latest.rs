//! Most recently extracted record, shared between readers and a writer

use folio_domain::StructuredRecord;
use std::sync::{Arc, RwLock};

/// Slot holding the latest extracted record
///
/// Clones share the same slot. Writers replace the whole record, so a
/// reader sees either the old record or the new one, never a mix.
#[derive(Debug, Clone, Default)]
pub struct LatestRecord {
    inner: Arc<RwLock<Option<Arc<StructuredRecord>>>>,
}

impl LatestRecord {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Current record, if one was ever stored
    pub fn get(&self) -> Option<Arc<StructuredRecord>> {
        // A panicking writer cannot leave a half-written record behind
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    /// Replace the stored record
    pub fn set(&self, record: StructuredRecord) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(record));
    }

    /// True until the first `set`
    pub fn is_empty(&self) -> bool {
        self.get().is_none()
    }
}
