//! CSV mail-manifest loader.
//!
//! # CSV format
//!
//! One row per mail item:
//!
//! ```csv
//! arrival_tick,destination_floor,weight_grams,fragile
//! 0,8,450,false
//! 2,3,1200,true
//! 5,8,200,false
//! ```
//!
//! `MailId`s are assigned densely in file order and each item's creation
//! tick is its `arrival_tick`.  Rows are validated against the building:
//! a zero weight or an out-of-building destination is a [`ManifestError`].

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use mb_core::{Building, Floor, MailId, MailItem, Tick};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest parse error: {0}")]
    Parse(String),

    #[error("manifest row {row}: {reason}")]
    BadRecord { row: usize, reason: String },
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ManifestRecord {
    arrival_tick:      u64,
    destination_floor: u32,
    weight_grams:      u32,
    fragile:           bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load mail items from a CSV manifest file.
pub fn load_manifest_csv(path: &Path, building: &Building) -> Result<Vec<MailItem>, ManifestError> {
    let file = std::fs::File::open(path).map_err(ManifestError::Io)?;
    load_manifest_reader(file, building)
}

/// Like [`load_manifest_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded manifests.
pub fn load_manifest_reader<R: Read>(
    reader:   R,
    building: &Building,
) -> Result<Vec<MailItem>, ManifestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut items = Vec::new();

    for (i, result) in csv_reader.deserialize::<ManifestRecord>().enumerate() {
        let row = i + 1; // header is row 0
        let record = result.map_err(|e| ManifestError::Parse(e.to_string()))?;

        if record.weight_grams == 0 {
            return Err(ManifestError::BadRecord {
                row,
                reason: "weight must be positive".into(),
            });
        }
        let destination = Floor(record.destination_floor);
        if !building.contains(destination) {
            return Err(ManifestError::BadRecord {
                row,
                reason: format!(
                    "destination {destination} is outside the {}-floor building",
                    building.floor_count,
                ),
            });
        }

        items.push(MailItem::new(
            MailId(items.len() as u32),
            Tick(record.arrival_tick),
            destination,
            record.weight_grams,
            record.fragile,
        ));
    }

    Ok(items)
}
