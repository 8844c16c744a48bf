//! Snapshot codec: holdings <-> JSON text.
//!
//! A snapshot is the whole holdings list serialized as one JSON array,
//! in display order:
//!
//! ```json
//! [{"category":"stock","ticker":"VTI","amount":5000000.0}]
//! ```

use log::warn;

use crate::error::Result;
use crate::store::KeyValueStore;
use crate::types::HoldingRecord;

/// Key under which the holdings snapshot is stored.
pub const SNAPSHOT_KEY: &str = "assetData";

/// Serialize holdings to snapshot text.
pub fn encode(records: &[HoldingRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parse snapshot text back into holdings.
///
/// Blank text is an empty list; anything else must be a JSON array of
/// records.
pub fn decode(text: &str) -> Result<Vec<HoldingRecord>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(text)?)
}

/// Write holdings under `key`.
pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    records: &[HoldingRecord],
) -> Result<()> {
    let text = encode(records)?;
    store.set(key, &text)
}

/// Read holdings stored under `key`.
///
/// Never fails: a missing entry, a store read error or a malformed snapshot
/// all yield an empty list. Failures are logged and otherwise swallowed.
pub fn load_or_empty<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Vec<HoldingRecord> {
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("could not read snapshot '{key}', starting empty: {e}");
            return Vec::new();
        }
    };
    match decode(&text) {
        Ok(records) => records,
        Err(e) => {
            warn!("discarding malformed snapshot '{key}': {e}");
            Vec::new()
        }
    }
}
