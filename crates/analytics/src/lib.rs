//! `stocksense-analytics`
//!
//! Catalogue-wide summary statistics computed from a snapshot of inventory
//! records. Pure computation: no IO, no caching, recomputed on every call.

pub mod aggregator;

pub use aggregator::{AnalyticsSnapshot, MonthlySales, StockSummary, UNCATEGORIZED, aggregate, month_key};
