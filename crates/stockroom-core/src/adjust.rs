//! Stock adjustment: receive or dispatch a positive count.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::cache::InventoryCache;
use crate::error::AdjustError;
use crate::record::ItemRecord;

/// Direction of a stock adjustment. The amount is always entered as a
/// positive count; the kind carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    /// Stock arriving; quantity goes up.
    Receive,
    /// Stock leaving; quantity goes down.
    Dispatch,
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentKind::Receive => write!(f, "Received"),
            AdjustmentKind::Dispatch => write!(f, "Dispatched"),
        }
    }
}

/// Compute the adjusted record. Pure; persistence is the caller's job.
///
/// Dispatching more than the current quantity is rejected, never clamped,
/// so the `quantity >= 0` invariant holds by construction and an operator
/// typo cannot silently zero a row.
pub fn apply_adjustment(
    record: &ItemRecord,
    kind: AdjustmentKind,
    amount: u32,
    now: DateTime<Utc>,
) -> Result<ItemRecord, AdjustError> {
    if amount == 0 {
        return Err(AdjustError::ZeroAmount);
    }

    let quantity = match kind {
        AdjustmentKind::Receive => record.quantity.saturating_add(amount),
        AdjustmentKind::Dispatch => {
            record
                .quantity
                .checked_sub(amount)
                .ok_or(AdjustError::InsufficientStock {
                    requested: amount,
                    available: record.quantity,
                })?
        }
    };

    Ok(ItemRecord {
        quantity,
        last_updated: now,
        ..record.clone()
    })
}

/// Look the target up in the cache and compute its adjusted record.
///
/// Does not mutate the cache; callers persist the result first and upsert
/// whatever the store reports back.
pub fn adjust_item(
    cache: &InventoryCache,
    composite_id: &str,
    kind: AdjustmentKind,
    amount: u32,
    now: DateTime<Utc>,
) -> Result<ItemRecord, AdjustError> {
    let current = cache
        .get(composite_id)
        .ok_or_else(|| AdjustError::UnknownItem(composite_id.to_string()))?;
    apply_adjustment(current, kind, amount, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(quantity: u32) -> ItemRecord {
        ItemRecord {
            composite_id: "TS01_Black_42".to_string(),
            product_name: "Basic Tee".to_string(),
            size: "42".to_string(),
            color: "Black".to_string(),
            quantity,
            price: None,
            brand: None,
            category: None,
            remarks: None,
            last_updated: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        }
    }

    fn later() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_receive_adds_the_amount() {
        let updated = apply_adjustment(&record(5), AdjustmentKind::Receive, 3, later()).unwrap();
        assert_eq!(updated.quantity, 8);
        assert_eq!(updated.last_updated, later());
        assert_eq!(updated.composite_id, "TS01_Black_42");
    }

    #[test]
    fn test_dispatch_subtracts_the_amount() {
        let updated = apply_adjustment(&record(5), AdjustmentKind::Dispatch, 5, later()).unwrap();
        assert_eq!(updated.quantity, 0);
    }

    #[test]
    fn test_over_dispatch_is_rejected_not_clamped() {
        let current = record(3);
        let result = apply_adjustment(&current, AdjustmentKind::Dispatch, 4, later());

        assert_eq!(
            result,
            Err(AdjustError::InsufficientStock {
                requested: 4,
                available: 3,
            })
        );
        // The input record is untouched
        assert_eq!(current.quantity, 3);
    }

    #[test]
    fn test_adjust_item_looks_up_by_id() {
        let mut cache = InventoryCache::new();
        cache.replace_all(vec![record(5)]);

        let updated = adjust_item(
            &cache,
            "TS01_Black_42",
            AdjustmentKind::Receive,
            2,
            later(),
        )
        .unwrap();
        assert_eq!(updated.quantity, 7);
        // The cache itself is untouched until the store confirms
        assert_eq!(cache.get("TS01_Black_42").unwrap().quantity, 5);

        assert_eq!(
            adjust_item(&cache, "gone", AdjustmentKind::Receive, 2, later()),
            Err(AdjustError::UnknownItem("gone".to_string()))
        );
    }

    #[test]
    fn test_zero_amount_is_rejected_for_both_kinds() {
        assert_eq!(
            apply_adjustment(&record(5), AdjustmentKind::Receive, 0, later()),
            Err(AdjustError::ZeroAmount)
        );
        assert_eq!(
            apply_adjustment(&record(5), AdjustmentKind::Dispatch, 0, later()),
            Err(AdjustError::ZeroAmount)
        );
    }
}
