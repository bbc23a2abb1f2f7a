//! Inventory item records as stored in the remote sheet.
//!
//! One record is one size of one color of one product. The sheet enforces
//! no schema and every cell may come back as a string, so the wire side is
//! deliberately tolerant: quantities accept numbers or numeric strings,
//! timestamps fall back to the epoch, and unknown columns are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed size run every garment is stocked in.
pub const SIZE_RUN: [u16; 6] = [38, 40, 42, 44, 46, 48];

/// Colors the add-product form suggests. Free text is also accepted.
pub const COLOR_SUGGESTIONS: [&str; 6] = ["Black", "White", "Navy", "Red", "Olive", "Beige"];

/// Build the composite key for one size-specific row.
///
/// Plain concatenation, no collision check: entering the same base id,
/// color and size twice addresses the same row.
pub fn composite_id(base_id: &str, color: &str, size: u16) -> String {
    format!("{}_{}_{}", base_id, color, size)
}

/// Custom deserializer for the quantity column, which the sheet returns as
/// either a number or a numeric string. Anything unreadable counts as zero.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct QuantityVisitor;

    impl<'de> Visitor<'de> for QuantityVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative integer, a numeric string, or null")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(u32::try_from(v).unwrap_or(0))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(u32::try_from(v).unwrap_or(0))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) {
                Ok(v as u32)
            } else {
                Ok(0)
            }
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.trim().parse().unwrap_or(0))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(QuantityVisitor)
        }
    }

    deserializer.deserialize_any(QuantityVisitor)
}

/// Custom deserializer for the lastUpdated column. Missing or unparseable
/// timestamps become the Unix epoch so damaged rows sort last instead of
/// failing the whole fetch.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH))
}

fn epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// One inventory row.
///
/// `composite_id` is the effective primary key once a draft has been
/// expanded; the store itself never checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub composite_id: String,
    pub product_name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default = "epoch", deserialize_with = "deserialize_timestamp")]
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_id_format() {
        assert_eq!(composite_id("TS01", "Black", 42), "TS01_Black_42");
    }

    #[test]
    fn test_parse_row_with_string_quantity() {
        let record: ItemRecord = serde_json::from_str(
            r#"{
                "compositeId": "TS01_Black_42",
                "productName": "Basic Tee",
                "size": "42",
                "color": "Black",
                "quantity": "7",
                "lastUpdated": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(record.quantity, 7);
        assert_eq!(record.size, "42");
        assert_eq!(record.price, None);
    }

    #[test]
    fn test_parse_row_with_numeric_quantity() {
        let record: ItemRecord = serde_json::from_str(
            r#"{"compositeId": "A", "productName": "B", "quantity": 12}"#,
        )
        .unwrap();

        assert_eq!(record.quantity, 12);
    }

    #[test]
    fn test_junk_quantity_counts_as_zero() {
        let record: ItemRecord = serde_json::from_str(
            r#"{"compositeId": "A", "productName": "B", "quantity": "lots"}"#,
        )
        .unwrap();

        assert_eq!(record.quantity, 0);
    }

    #[test]
    fn test_junk_timestamp_falls_back_to_epoch() {
        let record: ItemRecord = serde_json::from_str(
            r#"{"compositeId": "A", "productName": "B", "lastUpdated": "yesterday-ish"}"#,
        )
        .unwrap();

        assert_eq!(record.last_updated, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_row_without_name_is_rejected() {
        let result = serde_json::from_str::<ItemRecord>(r#"{"compositeId": "A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let record = ItemRecord {
            composite_id: "TS01_Black_42".to_string(),
            product_name: "Basic Tee".to_string(),
            size: "42".to_string(),
            color: "Black".to_string(),
            quantity: 3,
            price: None,
            brand: None,
            category: Some("Tops".to_string()),
            remarks: None,
            last_updated: DateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("compositeId").is_some());
        assert!(json.get("productName").is_some());
        assert!(json.get("lastUpdated").is_some());
        // Blank optionals stay off the wire entirely
        assert!(json.get("price").is_none());
    }
}
