use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use tracing::debug;

use stocksense_core::{DomainError, DomainResult, ItemId};
use stocksense_inventory::{
    InventoryPatch, InventoryRecord, InventoryRepository, NewInventoryRecord, Sku,
};

/// In-memory inventory store for tests/dev.
///
/// Records are kept in insertion order, which is what `list_all` returns.
#[derive(Debug, Default)]
pub struct InMemoryInventoryRepository {
    inner: RwLock<Vec<InventoryRecord>>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_unique_sku(records: &[InventoryRecord], sku: &Sku, except: Option<ItemId>) -> DomainResult<()> {
        let taken = records
            .iter()
            .any(|r| &r.sku == sku && Some(r.id) != except);
        if taken {
            return Err(DomainError::conflict(format!("sku {sku} already exists")));
        }
        Ok(())
    }
}

impl InventoryRepository for InMemoryInventoryRepository {
    fn list_all(&self) -> Vec<InventoryRecord> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn get(&self, id: ItemId) -> DomainResult<InventoryRecord> {
        let records = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    fn create(&self, input: NewInventoryRecord) -> DomainResult<InventoryRecord> {
        let record = input.into_record(ItemId::new(), Utc::now())?;

        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Self::ensure_unique_sku(&records, &record.sku, None)?;
        records.push(record.clone());

        debug!(id = %record.id, sku = %record.sku, "inventory record created");
        Ok(record)
    }

    fn update(&self, id: ItemId, patch: InventoryPatch) -> DomainResult<InventoryRecord> {
        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let pos = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(DomainError::NotFound)?;

        let updated = records[pos].apply_patch(patch, Utc::now())?;
        Self::ensure_unique_sku(&records, &updated.sku, Some(id))?;
        records[pos] = updated.clone();

        debug!(id = %id, "inventory record updated");
        Ok(updated)
    }

    fn delete(&self, id: ItemId) -> DomainResult<InventoryRecord> {
        let mut records = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let pos = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(DomainError::NotFound)?;

        let removed = records.remove(pos);
        debug!(id = %id, "inventory record deleted");
        Ok(removed)
    }
}
