use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const STORE_RECORD_TYPE: &str = "Stores";
pub const SEED_SET_VERSION: &str = "v1";
/// Upper bound on writes accepted by a single DynamoDB `BatchWriteItem` call.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    pub id: String,
    pub store_code: String,
    pub store_name: String,
    #[serde(rename = "type")]
    pub record_type: String,
}

impl SeedRecord {
    fn store(id: &str, store_code: &str, store_name: &str) -> Self {
        Self {
            id: id.to_string(),
            store_code: store_code.to_string(),
            store_name: store_name.to_string(),
            record_type: STORE_RECORD_TYPE.to_string(),
        }
    }

    /// Flat attribute view keyed by wire name, for adapters that build
    /// store-native items.
    pub fn attributes(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            ("id", self.id.as_str()),
            ("storeCode", self.store_code.as_str()),
            ("storeName", self.store_name.as_str()),
            ("type", self.record_type.as_str()),
        ])
    }
}

/// The fixed store reference data written on Create and Update.
pub fn seed_records() -> Vec<SeedRecord> {
    vec![
        SeedRecord::store("59b8a675-9bb7-46c7-955d-2566edfba8ea", "NEW", "Newcastle"),
        SeedRecord::store("4e02e8f2-c0fe-493e-b259-1047254ad969", "LON", "London"),
        SeedRecord::store("f5de2a0a-5a1d-4842-b38d-34e0fe420d33", "MAN", "Manchester"),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;

    use super::*;

    #[test]
    fn seed_set_fits_in_one_batch_write() {
        let records = seed_records();
        assert_eq!(records.len(), 3);
        assert!(records.len() <= MAX_BATCH_WRITE_ITEMS);
    }

    #[test]
    fn seed_ids_and_codes_are_unique() {
        let records = seed_records();
        let ids: BTreeSet<_> = records.iter().map(|record| record.id.as_str()).collect();
        let codes: BTreeSet<_> = records
            .iter()
            .map(|record| record.store_code.as_str())
            .collect();

        assert_eq!(ids.len(), records.len());
        assert_eq!(codes.len(), records.len());
        assert!(records
            .iter()
            .all(|record| record.record_type == STORE_RECORD_TYPE));
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let value = serde_json::to_value(&seed_records()[1]).expect("record should serialize");
        assert_eq!(
            value,
            json!({
                "id": "4e02e8f2-c0fe-493e-b259-1047254ad969",
                "storeCode": "LON",
                "storeName": "London",
                "type": "Stores"
            })
        );
    }

    #[test]
    fn attributes_match_serialized_fields() {
        let record = &seed_records()[0];
        let attributes = record.attributes();
        assert_eq!(attributes.get("storeCode"), Some(&"NEW"));
        assert_eq!(attributes.get("type"), Some(&"Stores"));
        assert_eq!(attributes.len(), 4);
    }
}
