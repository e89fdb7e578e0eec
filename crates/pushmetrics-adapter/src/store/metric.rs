use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use pushmetrics_core::protocol::values::MetricValue;

/// Latest values of one metric, keyed by object key (`"<namespace>/<name>"`).
///
/// Reads share the lock, writes take it exclusively. A poisoned lock is
/// recovered: every mutation is a single map insert, so the table is never
/// left half-written.
#[derive(Debug, Default)]
pub struct Metric {
    values: RwLock<HashMap<String, MetricValue>>,
}

impl Metric {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Record `value` for `object_key`, stamped with the current time.
    pub fn set(&self, object_key: impl Into<String>, value: i64) {
        self.set_value(object_key, MetricValue::now(value));
    }

    /// Record a pre-built value, replacing any previous one wholesale.
    pub fn set_value(&self, object_key: impl Into<String>, value: MetricValue) {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(object_key.into(), value);
    }

    pub fn get(&self, object_key: &str) -> Option<MetricValue> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(object_key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered copy of the table, taken under one read lock.
    pub fn snapshot(&self) -> BTreeMap<String, MetricValue> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.iter().map(|(k, v)| (k.clone(), *v)).collect()
    }
}
