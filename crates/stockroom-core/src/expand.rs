//! Product expansion: one draft into N size-specific rows.

use chrono::{DateTime, Utc};

use crate::draft::ProductDraft;
use crate::error::DraftError;
use crate::record::{composite_id, ItemRecord};

/// Expand a draft into one record per size whose quantity parses as a
/// positive integer. Sizes left blank, at zero, or with unreadable input
/// are skipped entirely, never created at zero quantity.
///
/// Blank `base_id`, `name`, or `color` fails the whole submission before
/// anything is produced; the caller makes no store calls in that case.
pub fn expand_draft(
    draft: &ProductDraft,
    now: DateTime<Utc>,
) -> Result<Vec<ItemRecord>, DraftError> {
    let base_id = draft.base_id.trim();
    let name = draft.name.trim();
    let color = draft.color.trim();

    if base_id.is_empty() {
        return Err(DraftError::MissingField("product id"));
    }
    if name.is_empty() {
        return Err(DraftError::MissingField("product name"));
    }
    if color.is_empty() {
        return Err(DraftError::MissingField("color"));
    }

    let records = draft
        .quantities
        .iter()
        .filter_map(|(size, raw)| {
            let quantity = parse_positive(raw)?;
            Some(ItemRecord {
                composite_id: composite_id(base_id, color, *size),
                product_name: name.to_string(),
                size: size.to_string(),
                color: color.to_string(),
                quantity,
                price: non_blank(&draft.price),
                brand: non_blank(&draft.brand),
                category: non_blank(&draft.category),
                remarks: non_blank(&draft.remarks),
                last_updated: now,
            })
        })
        .collect();

    Ok(records)
}

/// The quantity, when the input parses as a positive integer.
fn parse_positive(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft(base_id: &str, name: &str, color: &str) -> ProductDraft {
        ProductDraft {
            base_id: base_id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            ..ProductDraft::new()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_record_per_stocked_size() {
        let mut draft = draft("TS01", "Basic Tee", "Black");
        *draft.quantity_mut(38).unwrap() = "2".to_string();
        *draft.quantity_mut(42).unwrap() = "5".to_string();

        let records = expand_draft(&draft, now()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].composite_id, "TS01_Black_38");
        assert_eq!(records[0].quantity, 2);
        assert_eq!(records[1].composite_id, "TS01_Black_42");
        assert_eq!(records[1].quantity, 5);
        assert!(records.iter().all(|r| r.last_updated == now()));
    }

    #[test]
    fn test_blank_zero_and_junk_sizes_are_skipped() {
        let mut draft = draft("X", "Jacket", "Black");
        *draft.quantity_mut(42).unwrap() = "3".to_string();
        *draft.quantity_mut(44).unwrap() = "0".to_string();
        *draft.quantity_mut(46).unwrap() = "abc".to_string();

        let records = expand_draft(&draft, now()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].composite_id, "X_Black_42");
        assert_eq!(records[0].quantity, 3);
    }

    #[test]
    fn test_all_sizes_empty_produces_no_records() {
        let draft = draft("X", "Jacket", "Black");
        assert!(expand_draft(&draft, now()).unwrap().is_empty());
    }

    #[test]
    fn test_negative_quantity_is_skipped() {
        let mut draft = draft("X", "Jacket", "Black");
        *draft.quantity_mut(42).unwrap() = "-3".to_string();
        assert!(expand_draft(&draft, now()).unwrap().is_empty());
    }

    #[test]
    fn test_required_fields_fail_the_whole_submission() {
        let mut no_id = draft("", "Jacket", "Black");
        *no_id.quantity_mut(42).unwrap() = "3".to_string();
        assert_eq!(
            expand_draft(&no_id, now()),
            Err(DraftError::MissingField("product id"))
        );

        let no_color = draft("X", "Jacket", "  ");
        assert_eq!(
            expand_draft(&no_color, now()),
            Err(DraftError::MissingField("color"))
        );
    }

    #[test]
    fn test_composite_ids_are_distinct_across_sizes() {
        let mut draft = draft("TS01", "Basic Tee", "Navy");
        for size in crate::record::SIZE_RUN {
            *draft.quantity_mut(size).unwrap() = "1".to_string();
        }

        let records = expand_draft(&draft, now()).unwrap();
        let mut ids: Vec<_> = records.iter().map(|r| r.composite_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_optional_fields_are_blank_stripped() {
        let mut draft = draft("TS01", "Basic Tee", "Black");
        draft.category = "  Tops ".to_string();
        draft.remarks = "   ".to_string();
        *draft.quantity_mut(40).unwrap() = "1".to_string();

        let records = expand_draft(&draft, now()).unwrap();
        assert_eq!(records[0].category.as_deref(), Some("Tops"));
        assert_eq!(records[0].remarks, None);
    }
}
