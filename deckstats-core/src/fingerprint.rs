//! Snapshot fingerprinting.
//!
//! The purchase log is a manually maintained spreadsheet, so exports record
//! which snapshot they were derived from. The fingerprint is a BLAKE3 hash
//! over the canonicalized records in chronological order per player, so it
//! is independent of row order across players but changes with any edit
//! that affects the statistics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::PurchaseRecord;

/// Content hash of a purchase-log snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotHash(pub String);

impl SnapshotHash {
    /// First 12 hex digits, for status lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for SnapshotHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn snapshot_fingerprint(records: &[PurchaseRecord]) -> SnapshotHash {
    let mut sorted: Vec<&PurchaseRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        a.player
            .cmp(&b.player)
            .then_with(|| a.chronology().cmp(&b.chronology()))
    });

    let mut hasher = blake3::Hasher::new();
    for r in sorted {
        hasher.update(r.player.as_str().as_bytes());
        hasher.update(&[0]);
        hasher.update(r.card_name.as_bytes());
        hasher.update(&[0]);
        hasher.update(r.order.to_string().as_bytes());
        hasher.update(&[0]);
        match r.cost {
            Some(c) => hasher.update(&c.to_le_bytes()),
            None => hasher.update(b"-"),
        };
        hasher.update(&[
            r.purchased_with_crowns as u8,
            r.is_ethereal as u8,
            r.is_legendary as u8,
        ]);
    }
    SnapshotHash(hasher.finalize().to_hex().to_string())
}
