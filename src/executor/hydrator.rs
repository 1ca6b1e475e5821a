// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Turns raw hits into domain records.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::index::RawHit;
use crate::metrics;

/// A record whose id is carried in the hit envelope
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Decode each hit's source into `T` and stamp it with the hit id.
///
/// Hits with no source, or whose source does not decode, are skipped with
/// a warning. Input order is kept.
pub fn hydrate<T>(hits: Vec<RawHit>) -> Vec<T>
where
    T: DeserializeOwned + Identified,
{
    let mut records = Vec::with_capacity(hits.len());
    for RawHit { id, source } in hits {
        let Some(source) = source else {
            warn!(id = %id, "Hit has no source, skipping");
            metrics::record_decode_skipped("missing_source");
            continue;
        };
        match serde_json::from_value::<T>(source) {
            Ok(mut record) => {
                record.set_id(id);
                records.push(record);
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to decode hit, skipping");
                metrics::record_decode_skipped("decode_error");
            }
        }
    }
    records
}
