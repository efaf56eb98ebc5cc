//! Inventory domain module.
//!
//! This crate contains the inventory record model and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage),
//! plus the repository contract storage adapters implement.

pub mod record;
pub mod repository;

pub use record::{InventoryPatch, InventoryRecord, NewInventoryRecord, SalesEntry, Sku};
pub use repository::{InventoryRepository, select_below_reorder_level};
