//! Stored values and the records served to the metrics-serving host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quantity::Quantity;
use crate::selector::LabelSelector;

/// Latest value of one metric for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricValue {
    pub value: Quantity,
    #[serde(with = "rfc3339_secs")]
    pub time: DateTime<Utc>,
}

impl MetricValue {
    /// Value stamped with the current time.
    pub fn now(value: i64) -> Self {
        Self {
            value: Quantity::from_i64(value),
            time: Utc::now(),
        }
    }
}

/// Reference to the object a metric value describes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    pub name: String,
    pub api_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricIdentifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

/// One metric value for one described object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValueRecord {
    pub described_object: ObjectReference,
    pub metric: MetricIdentifier,
    #[serde(with = "rfc3339_secs")]
    pub timestamp: DateTime<Utc>,
    pub value: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricValueList {
    pub items: Vec<MetricValueRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMetricValue {
    pub metric_name: String,
    #[serde(default)]
    pub metric_labels: std::collections::BTreeMap<String, String>,
    #[serde(with = "rfc3339_secs")]
    pub timestamp: DateTime<Utc>,
    pub value: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalMetricValueList {
    pub items: Vec<ExternalMetricValue>,
}

/// RFC3339 timestamps at second precision, always UTC (`2024-05-01T12:00:00Z`).
pub mod rfc3339_secs {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
