use std::collections::HashMap;

use super::{OwnerKey, RecordBackend};
use crate::character::Character;
use crate::error::SheetResult;

/// Records held in memory; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: HashMap<OwnerKey, Character>,
}

impl MemoryBackend {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordBackend for MemoryBackend {
    fn get(&self, owner: &OwnerKey) -> SheetResult<Option<Character>> {
        Ok(self.records.get(owner).cloned())
    }

    fn put(&mut self, owner: &OwnerKey, record: &Character) -> SheetResult<()> {
        self.records.insert(owner.clone(), record.clone());
        Ok(())
    }

    fn delete(&mut self, owner: &OwnerKey) -> SheetResult<bool> {
        Ok(self.records.remove(owner).is_some())
    }

    fn exists(&self, owner: &OwnerKey) -> SheetResult<bool> {
        Ok(self.records.contains_key(owner))
    }
}
