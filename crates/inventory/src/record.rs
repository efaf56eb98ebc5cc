use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stocksense_core::{DomainError, DomainResult, Entity, ItemId, ValueObject};

/// Stock-keeping unit, normalized to trimmed upper-case.
///
/// Two SKUs that differ only in case or surrounding whitespace are the same SKU.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Sku {}

impl TryFrom<String> for Sku {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Sku> for String {
    fn from(value: Sku) -> Self {
        value.0
    }
}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One dated sales observation for a SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesEntry {
    pub date: DateTime<Utc>,
    pub quantity_sold: u64,
}

impl ValueObject for SalesEntry {}

/// A validated inventory record.
///
/// Records are only constructed through [`NewInventoryRecord::into_record`] and
/// [`InventoryRecord::apply_patch`], so every instance satisfies:
/// - `name`, `category` are trimmed and non-empty
/// - `unit_price` is finite and `>= 0`
/// - `sales_history` is ordered by date (oldest first)
///
/// Serialize-only: incoming data goes through [`NewInventoryRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: ItemId,
    pub name: String,
    pub sku: Sku,
    pub category: String,
    pub current_stock: u64,
    pub reorder_level: u64,
    pub reorder_quantity: u64,
    pub unit_price: f64,
    pub sales_history: Vec<SalesEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_restocked_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for InventoryRecord {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl InventoryRecord {
    /// Stock is at or below the reorder threshold (inclusive).
    pub fn needs_restock(&self) -> bool {
        self.current_stock <= self.reorder_level
    }

    /// `current_stock × unit_price`.
    pub fn stock_value(&self) -> f64 {
        self.current_stock as f64 * self.unit_price
    }

    /// The trailing window of at most `n` sales entries, oldest first.
    pub fn recent_sales(&self, n: usize) -> &[SalesEntry] {
        let start = self.sales_history.len().saturating_sub(n);
        &self.sales_history[start..]
    }

    /// Merge a partial update into this record and re-validate the result.
    ///
    /// Identity and `created_at` are preserved; `updated_at` becomes `now`.
    pub fn apply_patch(&self, patch: InventoryPatch, now: DateTime<Utc>) -> DomainResult<Self> {
        let merged = NewInventoryRecord {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            sku: patch.sku.unwrap_or_else(|| self.sku.to_string()),
            category: patch.category.unwrap_or_else(|| self.category.clone()),
            current_stock: patch.current_stock.unwrap_or(self.current_stock),
            reorder_level: patch.reorder_level.unwrap_or(self.reorder_level),
            reorder_quantity: patch.reorder_quantity.unwrap_or(self.reorder_quantity),
            unit_price: patch.unit_price.unwrap_or(self.unit_price),
            sales_history: patch.sales_history.unwrap_or_else(|| self.sales_history.clone()),
            last_restocked_at: patch.last_restocked_at.or(self.last_restocked_at),
            notes: patch.notes.or_else(|| self.notes.clone()),
        };

        let mut record = merged.into_record(self.id, now)?;
        record.created_at = self.created_at;
        Ok(record)
    }
}

/// Input for creating a record (unvalidated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryRecord {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub current_stock: u64,
    pub reorder_level: u64,
    pub reorder_quantity: u64,
    pub unit_price: f64,
    #[serde(default)]
    pub sales_history: Vec<SalesEntry>,
    #[serde(default)]
    pub last_restocked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewInventoryRecord {
    /// Validate and normalize into a record with the given identity.
    pub fn into_record(self, id: ItemId, now: DateTime<Utc>) -> DomainResult<InventoryRecord> {
        let name = required_text("name", &self.name)?;
        let category = required_text("category", &self.category)?;
        let sku = Sku::parse(&self.sku)?;

        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(DomainError::validation(
                "unitPrice must be a finite number >= 0",
            ));
        }

        let mut sales_history = self.sales_history;
        // Stable: same-day entries keep their submitted order.
        sales_history.sort_by_key(|s| s.date);

        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(InventoryRecord {
            id,
            name,
            sku,
            category,
            current_stock: self.current_stock,
            reorder_level: self.reorder_level,
            reorder_quantity: self.reorder_quantity,
            unit_price: self.unit_price,
            sales_history,
            last_restocked_at: self.last_restocked_at,
            notes,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub current_stock: Option<u64>,
    pub reorder_level: Option<u64>,
    pub reorder_quantity: Option<u64>,
    pub unit_price: Option<f64>,
    pub sales_history: Option<Vec<SalesEntry>>,
    pub last_restocked_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

fn required_text(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn widget() -> NewInventoryRecord {
        NewInventoryRecord {
            name: "  Widget ".to_string(),
            sku: " wid-001 ".to_string(),
            category: "Hardware".to_string(),
            current_stock: 12,
            reorder_level: 5,
            reorder_quantity: 40,
            unit_price: 2.5,
            sales_history: vec![],
            last_restocked_at: None,
            notes: None,
        }
    }

    #[test]
    fn into_record_normalizes_text_fields() {
        let rec = widget().into_record(ItemId::new(), day(2024, 1, 1)).unwrap();
        assert_eq!(rec.name, "Widget");
        assert_eq!(rec.sku.as_str(), "WID-001");
        assert_eq!(rec.created_at, rec.updated_at);
    }

    #[test]
    fn into_record_rejects_empty_name() {
        let mut input = widget();
        input.name = "   ".to_string();
        let err = input.into_record(ItemId::new(), Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::validation("name cannot be empty"));
    }

    #[test]
    fn into_record_rejects_empty_category() {
        let mut input = widget();
        input.category = String::new();
        assert!(matches!(
            input.into_record(ItemId::new(), Utc::now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn into_record_rejects_negative_or_nan_price() {
        for price in [-0.01, f64::NAN, f64::INFINITY] {
            let mut input = widget();
            input.unit_price = price;
            assert!(matches!(
                input.into_record(ItemId::new(), Utc::now()),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn into_record_sorts_sales_history_by_date() {
        let mut input = widget();
        input.sales_history = vec![
            SalesEntry { date: day(2024, 3, 1), quantity_sold: 3 },
            SalesEntry { date: day(2024, 1, 1), quantity_sold: 1 },
            SalesEntry { date: day(2024, 2, 1), quantity_sold: 2 },
        ];
        let rec = input.into_record(ItemId::new(), Utc::now()).unwrap();
        let sold: Vec<u64> = rec.sales_history.iter().map(|s| s.quantity_sold).collect();
        assert_eq!(sold, vec![1, 2, 3]);
    }

    #[test]
    fn blank_notes_are_dropped() {
        let mut input = widget();
        input.notes = Some("   ".to_string());
        let rec = input.into_record(ItemId::new(), Utc::now()).unwrap();
        assert_eq!(rec.notes, None);
    }

    #[test]
    fn needs_restock_is_inclusive_of_the_threshold() {
        let mut rec = widget().into_record(ItemId::new(), Utc::now()).unwrap();
        rec.current_stock = 5;
        assert!(rec.needs_restock());
        rec.current_stock = 6;
        assert!(!rec.needs_restock());
    }

    #[test]
    fn recent_sales_keeps_the_trailing_window() {
        let mut input = widget();
        input.sales_history = (1..=8)
            .map(|m| SalesEntry { date: day(2024, m, 1), quantity_sold: m as u64 })
            .collect();
        let rec = input.into_record(ItemId::new(), Utc::now()).unwrap();
        let sold: Vec<u64> = rec.recent_sales(6).iter().map(|s| s.quantity_sold).collect();
        assert_eq!(sold, vec![3, 4, 5, 6, 7, 8]);
        assert_eq!(rec.recent_sales(20).len(), 8);
    }

    #[test]
    fn apply_patch_preserves_identity_and_creation_time() {
        let created = day(2024, 1, 1);
        let rec = widget().into_record(ItemId::new(), created).unwrap();

        let patch = InventoryPatch {
            current_stock: Some(3),
            sku: Some("wid-002".to_string()),
            ..InventoryPatch::default()
        };
        let later = day(2024, 2, 1);
        let updated = rec.apply_patch(patch, later).unwrap();

        assert_eq!(updated.id, rec.id);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.current_stock, 3);
        assert_eq!(updated.sku.as_str(), "WID-002");
        assert_eq!(updated.name, "Widget");
    }

    #[test]
    fn apply_patch_revalidates() {
        let rec = widget().into_record(ItemId::new(), Utc::now()).unwrap();
        let patch = InventoryPatch {
            unit_price: Some(-1.0),
            ..InventoryPatch::default()
        };
        assert!(matches!(
            rec.apply_patch(patch, Utc::now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn record_serializes_with_camel_case_fields() {
        let rec = widget().into_record(ItemId::new(), Utc::now()).unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["sku"], "WID-001");
        assert_eq!(json["currentStock"], 12);
        assert_eq!(json["reorderLevel"], 5);
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn serialized_record_reenters_only_through_validation() {
        let rec = widget().into_record(ItemId::new(), Utc::now()).unwrap();
        let mut json = serde_json::to_value(&rec).unwrap();
        json["category"] = serde_json::json!("  Hardware  ");
        json["salesHistory"] = serde_json::json!([
            { "date": "2024-03-01T00:00:00Z", "quantitySold": 1 },
            { "date": "2024-01-01T00:00:00Z", "quantitySold": 2 }
        ]);

        let input: NewInventoryRecord = serde_json::from_value(json).unwrap();
        let revalidated = input.into_record(rec.id, rec.created_at).unwrap();

        assert_eq!(revalidated.category, "Hardware");
        let quantities: Vec<u64> = revalidated.sales_history.iter().map(|s| s.quantity_sold).collect();
        assert_eq!(quantities, vec![2, 1]);
    }

    #[test]
    fn sku_deserialization_normalizes() {
        let sku: Sku = serde_json::from_str("\" abc-9 \"").unwrap();
        assert_eq!(sku.as_str(), "ABC-9");
        assert!(serde_json::from_str::<Sku>("\"  \"").is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: SKU normalization is idempotent.
            #[test]
            fn sku_parse_is_idempotent(raw in "[ ]{0,3}[A-Za-z0-9-]{1,20}[ ]{0,3}") {
                let once = Sku::parse(&raw).unwrap();
                let twice = Sku::parse(once.as_str()).unwrap();
                prop_assert_eq!(once, twice);
            }

            /// Property: SKUs differing only by case are equal.
            #[test]
            fn sku_is_case_insensitive(raw in "[A-Za-z0-9]{1,20}") {
                prop_assert_eq!(
                    Sku::parse(&raw.to_lowercase()).unwrap(),
                    Sku::parse(&raw.to_uppercase()).unwrap()
                );
            }
        }
    }
}
