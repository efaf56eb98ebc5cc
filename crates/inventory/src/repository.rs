use std::sync::Arc;

use stocksense_core::{DomainResult, ItemId};

use crate::record::{InventoryPatch, InventoryRecord, NewInventoryRecord};

/// Storage contract for inventory records.
///
/// Implementations own the record set and enforce SKU uniqueness. Unknown
/// identifiers surface as `DomainError::NotFound`, distinct from validation
/// failures.
pub trait InventoryRepository: Send + Sync {
    /// Snapshot of every record, in creation order.
    fn list_all(&self) -> Vec<InventoryRecord>;

    /// Records with `current_stock <= reorder_level`, ascending by `current_stock`.
    fn find_below_reorder_level(&self) -> Vec<InventoryRecord> {
        select_below_reorder_level(self.list_all())
    }

    fn get(&self, id: ItemId) -> DomainResult<InventoryRecord>;

    fn create(&self, input: NewInventoryRecord) -> DomainResult<InventoryRecord>;

    fn update(&self, id: ItemId, patch: InventoryPatch) -> DomainResult<InventoryRecord>;

    /// Remove a record, returning what was removed.
    fn delete(&self, id: ItemId) -> DomainResult<InventoryRecord>;
}

impl<S> InventoryRepository for Arc<S>
where
    S: InventoryRepository + ?Sized,
{
    fn list_all(&self) -> Vec<InventoryRecord> {
        (**self).list_all()
    }

    fn find_below_reorder_level(&self) -> Vec<InventoryRecord> {
        (**self).find_below_reorder_level()
    }

    fn get(&self, id: ItemId) -> DomainResult<InventoryRecord> {
        (**self).get(id)
    }

    fn create(&self, input: NewInventoryRecord) -> DomainResult<InventoryRecord> {
        (**self).create(input)
    }

    fn update(&self, id: ItemId, patch: InventoryPatch) -> DomainResult<InventoryRecord> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: ItemId) -> DomainResult<InventoryRecord> {
        (**self).delete(id)
    }
}

/// Keep records at or below their reorder level, lowest stock first.
///
/// The sort is stable, so records with equal stock keep their input order.
pub fn select_below_reorder_level(
    records: impl IntoIterator<Item = InventoryRecord>,
) -> Vec<InventoryRecord> {
    let mut low: Vec<InventoryRecord> = records.into_iter().filter(|r| r.needs_restock()).collect();
    low.sort_by_key(|r| r.current_stock);
    low
}
