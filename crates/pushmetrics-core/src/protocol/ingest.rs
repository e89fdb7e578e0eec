//! Push batch (JSON).
//!
//! Decoding is a single upfront step: either the whole body decodes into a
//! batch or nothing is applied.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Deserialize;

use crate::error::{MetricsError, Result};
use crate::identity::NamespacedName;

/// One pushed batch: integer values for several metrics of a single object.
///
/// Absent fields decode as empty, unknown fields are ignored. Capitalized
/// field names are accepted as well.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestBatch {
    #[serde(default, alias = "Namespace")]
    pub namespace: String,
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Metrics", deserialize_with = "nullable_map")]
    pub metrics: BTreeMap<String, i64>,
}

impl IngestBatch {
    pub fn object(&self) -> NamespacedName {
        NamespacedName::new(self.namespace.clone(), self.name.clone())
    }

    /// Reject identities whose object key would be ambiguous.
    ///
    /// `"<namespace>/<name>"` splits uniquely at the first `/` only when the
    /// namespace itself carries none.
    pub fn validate(&self) -> Result<()> {
        if self.namespace.contains('/') {
            return Err(MetricsError::BadRequest(format!(
                "namespace must not contain '/': {:?}",
                self.namespace
            )));
        }
        Ok(())
    }
}

fn nullable_map<'de, D>(d: D) -> std::result::Result<BTreeMap<String, i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, i64>>::deserialize(d)?.unwrap_or_default())
}

/// Decode and validate a push body.
///
/// The error message is the decoder's own text, suitable for returning to
/// the pusher verbatim.
pub fn decode_ingest(body: Bytes) -> Result<IngestBatch> {
    let batch: IngestBatch =
        serde_json::from_slice(&body).map_err(|e| MetricsError::BadRequest(e.to_string()))?;
    batch.validate()?;

    tracing::trace!(
        namespace = %batch.namespace,
        name = %batch.name,
        metrics = batch.metrics.len(),
        "decoded push batch"
    );
    Ok(batch)
}
