//! In-memory mirror of the remote collection.

use crate::record::ItemRecord;

/// Ordered list of the rows last seen in the store. The store stays the
/// sole source of truth; the cache is disposable and fully replaced by a
/// refresh. Mutations apply the record the store client returned as a
/// targeted upsert instead of triggering a re-list.
#[derive(Debug, Clone, Default)]
pub struct InventoryCache {
    items: Vec<ItemRecord>,
}

impl InventoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly listed collection.
    pub fn replace_all(&mut self, items: Vec<ItemRecord>) {
        self.items = items;
    }

    /// Insert or replace by composite id.
    pub fn upsert(&mut self, record: ItemRecord) {
        match self
            .items
            .iter_mut()
            .find(|item| item.composite_id == record.composite_id)
        {
            Some(existing) => *existing = record,
            None => self.items.push(record),
        }
    }

    /// Drop the row with the given id, returning it if present.
    pub fn remove(&mut self, composite_id: &str) -> Option<ItemRecord> {
        let index = self
            .items
            .iter()
            .position(|item| item.composite_id == composite_id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, composite_id: &str) -> Option<&ItemRecord> {
        self.items
            .iter()
            .find(|item| item.composite_id == composite_id)
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
