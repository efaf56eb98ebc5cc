use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use stocksense_inventory::InventoryRecord;

/// Category bucket for records with a missing or blank category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Catalogue totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_skus: usize,
    pub total_stock_units: u64,
    /// Σ `current_stock × unit_price`.
    pub stock_value: f64,
}

/// Units sold in one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: String,
    pub total: u64,
}

/// Derived analytics over the full record set (never persisted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub summary: StockSummary,
    /// Category → summed stock units.
    pub category_breakdown: BTreeMap<String, u64>,
    /// Ascending by month.
    pub monthly_sales: Vec<MonthlySales>,
}

/// Compute the analytics snapshot for a record set.
///
/// Every record counts towards the summary and category breakdown. A sales
/// entry whose date has no four-digit month key is left out of
/// `monthly_sales`; the rest of its record is still counted.
pub fn aggregate(records: &[InventoryRecord]) -> AnalyticsSnapshot {
    let mut total_stock_units: u64 = 0;
    let mut stock_value = 0.0;
    let mut category_breakdown: BTreeMap<String, u64> = BTreeMap::new();
    let mut monthly: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        total_stock_units = total_stock_units.saturating_add(record.current_stock);
        stock_value += record.stock_value();

        let category = match record.category.trim() {
            "" => UNCATEGORIZED,
            c => c,
        };
        let bucket = category_breakdown.entry(category.to_string()).or_insert(0);
        *bucket = bucket.saturating_add(record.current_stock);

        for sale in &record.sales_history {
            let Some(key) = month_key(&sale.date) else {
                continue;
            };
            let total = monthly.entry(key).or_insert(0);
            *total = total.saturating_add(sale.quantity_sold);
        }
    }

    // Zero-padded keys: lexicographic order is chronological.
    let monthly_sales = monthly
        .into_iter()
        .map(|(month, total)| MonthlySales { month, total })
        .collect();

    AnalyticsSnapshot {
        summary: StockSummary {
            total_skus: records.len(),
            total_stock_units,
            stock_value,
        },
        category_breakdown,
        monthly_sales,
    }
}

/// Zero-padded `YYYY-MM` key for a timestamp (UTC).
///
/// Returns `None` for years outside `0..=9999`, which have no key that sorts
/// chronologically.
pub fn month_key(date: &DateTime<Utc>) -> Option<String> {
    let year = date.year();
    if !(0..=9999).contains(&year) {
        return None;
    }
    Some(format!("{year:04}-{:02}", date.month()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stocksense_core::ItemId;
    use stocksense_inventory::{SalesEntry, Sku};

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn record(
        sku: &str,
        category: &str,
        current_stock: u64,
        unit_price: f64,
        sales: Vec<(DateTime<Utc>, u64)>,
    ) -> InventoryRecord {
        let now = Utc::now();
        InventoryRecord {
            id: ItemId::new(),
            name: format!("Item {sku}"),
            sku: Sku::parse(sku).unwrap(),
            category: category.to_string(),
            current_stock,
            reorder_level: 0,
            reorder_quantity: 0,
            unit_price,
            sales_history: sales
                .into_iter()
                .map(|(date, quantity_sold)| SalesEntry { date, quantity_sold })
                .collect(),
            last_restocked_at: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_record_set_yields_zeroed_snapshot() {
        let snap = aggregate(&[]);
        assert_eq!(snap.summary.total_skus, 0);
        assert_eq!(snap.summary.total_stock_units, 0);
        assert_eq!(snap.summary.stock_value, 0.0);
        assert!(snap.category_breakdown.is_empty());
        assert!(snap.monthly_sales.is_empty());
    }

    #[test]
    fn summary_includes_zero_stock_records() {
        let snap = aggregate(&[
            record("A", "Tools", 10, 2.5, vec![]),
            record("B", "Tools", 0, 100.0, vec![]),
            record("C", "Garden", 4, 1.25, vec![]),
        ]);
        assert_eq!(snap.summary.total_skus, 3);
        assert_eq!(snap.summary.total_stock_units, 14);
        assert_eq!(snap.summary.stock_value, 30.0);
    }

    #[test]
    fn blank_categories_are_grouped_as_uncategorized() {
        let snap = aggregate(&[
            record("A", "", 3, 1.0, vec![]),
            record("B", "   ", 2, 1.0, vec![]),
            record("C", "Tools", 5, 1.0, vec![]),
        ]);
        assert_eq!(snap.category_breakdown.get(UNCATEGORIZED), Some(&5));
        assert_eq!(snap.category_breakdown.get("Tools"), Some(&5));
        assert_eq!(snap.category_breakdown.len(), 2);
    }

    #[test]
    fn monthly_sales_accumulate_across_records_in_ascending_order() {
        let snap = aggregate(&[
            record("A", "X", 1, 1.0, vec![(day(2024, 11, 3), 4), (day(2025, 1, 9), 1)]),
            record("B", "X", 1, 1.0, vec![(day(2024, 2, 1), 7), (day(2024, 11, 30), 6)]),
        ]);
        assert_eq!(
            snap.monthly_sales,
            vec![
                MonthlySales { month: "2024-02".to_string(), total: 7 },
                MonthlySales { month: "2024-11".to_string(), total: 10 },
                MonthlySales { month: "2025-01".to_string(), total: 1 },
            ]
        );
    }

    #[test]
    fn entries_without_a_month_key_are_skipped_but_the_record_counts() {
        let far_future = Utc.with_ymd_and_hms(12000, 1, 1, 0, 0, 0).unwrap();
        let snap = aggregate(&[record(
            "A",
            "X",
            9,
            1.0,
            vec![(far_future, 50), (day(2024, 5, 5), 2)],
        )]);
        assert_eq!(snap.summary.total_skus, 1);
        assert_eq!(snap.summary.total_stock_units, 9);
        assert_eq!(
            snap.monthly_sales,
            vec![MonthlySales { month: "2024-05".to_string(), total: 2 }]
        );
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(month_key(&day(2024, 3, 15)).as_deref(), Some("2024-03"));
        assert_eq!(month_key(&day(987, 12, 1)).as_deref(), Some("0987-12"));
    }

    #[test]
    fn snapshot_serializes_with_wire_field_names() {
        let snap = aggregate(&[record("A", "Tools", 2, 3.0, vec![(day(2024, 1, 1), 1)])]);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["summary"]["totalSkus"], 1);
        assert_eq!(json["summary"]["totalStockUnits"], 2);
        assert_eq!(json["summary"]["stockValue"], 6.0);
        assert_eq!(json["categoryBreakdown"]["Tools"], 2);
        assert_eq!(json["monthlySales"][0]["month"], "2024-01");
        assert_eq!(json["monthlySales"][0]["total"], 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_record() -> impl Strategy<Value = InventoryRecord> {
            (
                0u64..10_000,
                0u32..100_000,
                prop::sample::select(vec!["", "Tools", "Garden", "Toys", " "]),
                prop::collection::vec((2000i32..2030, 1u32..=12, 1u32..=28, 0u64..500), 0..10),
            )
                .prop_map(|(stock, cents, category, sales)| {
                    record(
                        "SKU",
                        category,
                        stock,
                        f64::from(cents) / 100.0,
                        sales
                            .into_iter()
                            .map(|(y, m, d, q)| (day(y, m, d), q))
                            .collect(),
                    )
                })
        }

        proptest! {
            /// Property: totals equal the per-record sums.
            #[test]
            fn summary_matches_per_record_sums(records in prop::collection::vec(arb_record(), 0..20)) {
                let snap = aggregate(&records);
                let units: u64 = records.iter().map(|r| r.current_stock).sum();
                let value: f64 = records.iter().map(|r| r.current_stock as f64 * r.unit_price).sum();
                prop_assert_eq!(snap.summary.total_skus, records.len());
                prop_assert_eq!(snap.summary.total_stock_units, units);
                prop_assert!((snap.summary.stock_value - value).abs() <= 1e-6 * value.max(1.0));
            }

            /// Property: category buckets partition the stock units.
            #[test]
            fn category_breakdown_partitions_stock(records in prop::collection::vec(arb_record(), 0..20)) {
                let snap = aggregate(&records);
                let bucketed: u64 = snap.category_breakdown.values().sum();
                prop_assert_eq!(bucketed, snap.summary.total_stock_units);
            }

            /// Property: months are strictly ascending and totals are conserved.
            #[test]
            fn monthly_sales_are_ascending_and_conserve_totals(records in prop::collection::vec(arb_record(), 0..20)) {
                let snap = aggregate(&records);
                for pair in snap.monthly_sales.windows(2) {
                    prop_assert!(pair[0].month < pair[1].month);
                }
                let sold: u64 = records
                    .iter()
                    .flat_map(|r| r.sales_history.iter())
                    .map(|s| s.quantity_sold)
                    .sum();
                let reported: u64 = snap.monthly_sales.iter().map(|m| m.total).sum();
                prop_assert_eq!(reported, sold);
            }
        }
    }
}
