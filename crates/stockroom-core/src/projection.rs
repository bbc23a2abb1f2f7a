//! Search, sort, and aggregate over the cached rows.

use crate::record::ItemRecord;

/// Render-ready slice of the inventory: the matching rows, most recently
/// updated first, plus their quantity total.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryView {
    pub rows: Vec<ItemRecord>,
    /// Sum of `quantity` over the filtered rows, not the whole cache.
    pub total_quantity: u64,
}

/// Project the cache through a search query. Pure; recomputed on every
/// render.
///
/// The filter is a case-insensitive substring match against the composite
/// id OR the product name; an empty query matches everything. Rows sort by
/// `last_updated` descending, ties broken by id so the order is total.
pub fn project(items: &[ItemRecord], query: &str) -> InventoryView {
    let needle = query.to_lowercase();

    let mut rows: Vec<ItemRecord> = items
        .iter()
        .filter(|record| {
            needle.is_empty()
                || record.composite_id.to_lowercase().contains(&needle)
                || record.product_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        b.last_updated
            .cmp(&a.last_updated)
            .then_with(|| a.composite_id.cmp(&b.composite_id))
    });

    let total_quantity = rows.iter().map(|record| u64::from(record.quantity)).sum();

    InventoryView {
        rows,
        total_quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn record(id: &str, name: &str, quantity: u32, updated: DateTime<Utc>) -> ItemRecord {
        ItemRecord {
            composite_id: id.to_string(),
            product_name: name.to_string(),
            size: "42".to_string(),
            color: "Black".to_string(),
            quantity,
            price: None,
            brand: None,
            category: None,
            remarks: None,
            last_updated: updated,
        }
    }

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_most_recent_first_and_filtered_total() {
        let items = vec![
            record("A_Red_42", "Shirt", 5, t(1)),
            record("B_Blue_44", "Pants", 3, t(2)),
        ];

        let view = project(&items, "");
        assert_eq!(view.rows[0].composite_id, "B_Blue_44");
        assert_eq!(view.rows[1].composite_id, "A_Red_42");
        assert_eq!(view.total_quantity, 8);
    }

    #[test]
    fn test_filter_is_case_insensitive_on_id_or_name() {
        let items = vec![
            record("TS01_Blue_42", "Blue Shirt", 5, t(1)),
            record("TR02_Black_44", "Pants", 3, t(2)),
        ];

        let by_name = project(&items, "shirt");
        assert_eq!(by_name.rows.len(), 1);
        assert_eq!(by_name.rows[0].product_name, "Blue Shirt");

        let by_id = project(&items, "tr02");
        assert_eq!(by_id.rows.len(), 1);
        assert_eq!(by_id.rows[0].composite_id, "TR02_Black_44");

        assert!(project(&items, "boots").rows.is_empty());
    }

    #[test]
    fn test_total_covers_only_the_matching_rows() {
        let items = vec![
            record("TS01_Blue_42", "Blue Shirt", 5, t(1)),
            record("TR02_Black_44", "Pants", 3, t(2)),
        ];

        assert_eq!(project(&items, "shirt").total_quantity, 5);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let items = vec![
            record("A_Red_42", "Shirt", 5, t(1)),
            record("B_Blue_44", "Pants", 3, t(1)),
            record("C_Olive_46", "Coat", 2, t(3)),
        ];

        let first = project(&items, "");
        let second = project(&items, "");
        assert_eq!(first, second);

        // Re-projecting the projected rows changes nothing either
        let third = project(&first.rows, "");
        assert_eq!(first, third);
    }

    #[test]
    fn test_equal_timestamps_order_by_id() {
        let items = vec![
            record("B_Blue_44", "Pants", 3, t(1)),
            record("A_Red_42", "Shirt", 5, t(1)),
        ];

        let view = project(&items, "");
        assert_eq!(view.rows[0].composite_id, "A_Red_42");
        assert_eq!(view.rows[1].composite_id, "B_Blue_44");
    }
}
