use std::collections::BTreeMap;

use serde_json::Value;

use crate::seed::SeedRecord;

/// Writes that a bulk put could not apply, grouped by table name. Entries are
/// kept in the store's own representation so they can be reported verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchPutOutcome {
    pub unprocessed: BTreeMap<String, Vec<Value>>,
}

impl BatchPutOutcome {
    pub fn complete() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.unprocessed.values().all(Vec::is_empty)
    }

    pub fn unprocessed_count(&self) -> usize {
        self.unprocessed.values().map(Vec::len).sum()
    }
}

/// A keyed table supporting unconditional batched upserts by primary id.
///
/// A partial capacity failure is reported through [`BatchPutOutcome`], not as
/// an error. `Err` is reserved for calls that failed outright.
pub trait KeyedStore {
    fn batch_put(&self, table_name: &str, records: &[SeedRecord])
        -> Result<BatchPutOutcome, String>;
}

#[cfg(any(test, feature = "test-helpers"))]
pub use in_memory::InMemoryKeyedStore;

#[cfg(any(test, feature = "test-helpers"))]
mod in_memory {
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use serde_json::{json, Value};

    use super::{BatchPutOutcome, KeyedStore};
    use crate::seed::SeedRecord;

    type Tables = BTreeMap<String, BTreeMap<String, Value>>;

    /// Process-local keyed store with last-write-wins upserts.
    #[derive(Debug, Default)]
    pub struct InMemoryKeyedStore {
        tables: Mutex<Tables>,
        write_calls: Mutex<Vec<String>>,
        unprocessed_ids: BTreeSet<String>,
        failure: Option<String>,
    }

    impl InMemoryKeyedStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Leaves writes for these ids unapplied and reports them back.
        pub fn with_unprocessed_ids<I, S>(mut self, ids: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.unprocessed_ids = ids.into_iter().map(Into::into).collect();
            self
        }

        /// Fails every batch put outright with `message`.
        pub fn failing(mut self, message: impl Into<String>) -> Self {
            self.failure = Some(message.into());
            self
        }

        /// Inserts an arbitrary item keyed by its `id` attribute.
        pub fn put_item(&self, table_name: &str, item: Value) -> Result<(), String> {
            let id = item
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| "item must carry a string 'id' attribute".to_string())?
                .to_string();
            self.tables()
                .entry(table_name.to_string())
                .or_default()
                .insert(id, item);
            Ok(())
        }

        pub fn item(&self, table_name: &str, id: &str) -> Option<Value> {
            self.tables()
                .get(table_name)
                .and_then(|items| items.get(id))
                .cloned()
        }

        pub fn items(&self, table_name: &str) -> Vec<Value> {
            self.tables()
                .get(table_name)
                .map(|items| items.values().cloned().collect())
                .unwrap_or_default()
        }

        /// Table names targeted by each batch put, in call order.
        pub fn write_calls(&self) -> Vec<String> {
            self.write_calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        fn tables(&self) -> MutexGuard<'_, Tables> {
            self.tables.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl KeyedStore for InMemoryKeyedStore {
        fn batch_put(
            &self,
            table_name: &str,
            records: &[SeedRecord],
        ) -> Result<BatchPutOutcome, String> {
            self.write_calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(table_name.to_string());

            if let Some(message) = &self.failure {
                return Err(message.clone());
            }

            let mut outcome = BatchPutOutcome::complete();
            let mut tables = self.tables();
            let items = tables.entry(table_name.to_string()).or_default();
            for record in records {
                let item = serde_json::to_value(record)
                    .map_err(|error| format!("failed to encode seed record: {error}"))?;
                if self.unprocessed_ids.contains(&record.id) {
                    outcome
                        .unprocessed
                        .entry(table_name.to_string())
                        .or_default()
                        .push(json!({ "PutRequest": { "Item": item } }));
                    continue;
                }
                items.insert(record.id.clone(), item);
            }

            Ok(outcome)
        }
    }
}
