//! WindowRegistry - thread-safe store of window records
//!
//! Records are indexed by identifier and by native handle. Both indices are
//! updated under one write lock, so a record is present in one index exactly
//! when it is present in the other.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::entities::WindowRecord;
use crate::domain::value_objects::{NativeHandle, WindowId};
use crate::domain::RegistryError;

#[derive(Default)]
struct Indices {
    by_id: HashMap<WindowId, WindowRecord>,
    by_handle: HashMap<NativeHandle, WindowId>,
}

/// Owns every `WindowRecord`; other components refer to windows by id or handle
#[derive(Default)]
pub struct WindowRegistry {
    indices: RwLock<Indices>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under its id and handle
    pub fn insert(&self, record: WindowRecord) -> Result<(), RegistryError> {
        let mut indices = self.indices.write();

        if indices.by_id.contains_key(&record.id) || indices.by_handle.contains_key(&record.handle)
        {
            return Err(RegistryError::DuplicateKey {
                id: record.id,
                handle: record.handle,
            });
        }

        indices.by_handle.insert(record.handle, record.id);
        indices.by_id.insert(record.id, record);
        Ok(())
    }

    pub fn lookup_by_id(&self, id: WindowId) -> Option<WindowRecord> {
        self.indices.read().by_id.get(&id).cloned()
    }

    pub fn lookup_by_handle(&self, handle: NativeHandle) -> Option<WindowRecord> {
        let indices = self.indices.read();
        let id = indices.by_handle.get(&handle)?;
        indices.by_id.get(id).cloned()
    }

    /// Apply `update` to the record for `handle`. Returns false if unknown.
    pub fn update<F>(&self, handle: NativeHandle, update: F) -> bool
    where
        F: FnOnce(&mut WindowRecord),
    {
        let mut indices = self.indices.write();
        let Some(id) = indices.by_handle.get(&handle).copied() else {
            return false;
        };
        match indices.by_id.get_mut(&id) {
            Some(record) => {
                update(record);
                true
            }
            None => false,
        }
    }

    /// Mark the record for `id` invalid. Returns false if unknown.
    ///
    /// Keyed by identifier: by the time a pump gives up its window the
    /// native handle may already belong to a newer one.
    pub fn invalidate(&self, id: WindowId) -> bool {
        match self.indices.write().by_id.get_mut(&id) {
            Some(record) => {
                record.invalidate();
                true
            }
            None => false,
        }
    }

    /// Remove the record for `handle` from both indices.
    ///
    /// Unknown handles are ignored.
    pub fn erase(&self, handle: NativeHandle) -> Option<WindowRecord> {
        let mut indices = self.indices.write();
        let id = indices.by_handle.remove(&handle)?;
        let record = indices.by_id.remove(&id);

        log_at!(Debug, "Data for window {} was deleted", id);
        record
    }

    /// Release every record, returning how many were dropped
    pub fn clear(&self) -> usize {
        let mut indices = self.indices.write();
        let count = indices.by_id.len();
        indices.by_id.clear();
        indices.by_handle.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.indices.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
