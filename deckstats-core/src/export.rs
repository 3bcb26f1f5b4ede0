//! Export of derived series.
//!
//! - **CSV (long)**: one row per player per purchase
//! - **CSV (wide)**: one statistic, one column per player, for spreadsheets
//! - **JSON**: the full series with a `schema_version` and snapshot fingerprint
//! - **Summary**: plain-text table of each player's current deck
//!
//! JSON documents carry a `schema_version`; newer versions are rejected on import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PlayerStatSeries, Stat};
use crate::fingerprint::SnapshotHash;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema version {found} (max supported: {max})")]
    UnsupportedSchema { found: u32, max: u32 },
}

/// Persisted form of a derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDocument {
    pub schema_version: u32,
    pub fingerprint: SnapshotHash,
    pub generated_at: DateTime<Utc>,
    pub series: Vec<PlayerStatSeries>,
}

impl SeriesDocument {
    pub fn new(fingerprint: SnapshotHash, series: Vec<PlayerStatSeries>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            fingerprint,
            generated_at: Utc::now(),
            series,
        }
    }
}

// ─── JSON ───────────────────────────────────────────────────────────

pub fn export_json(doc: &SeriesDocument) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parse a document, rejecting schema versions newer than this build knows.
pub fn import_json(json: &str) -> Result<SeriesDocument, ExportError> {
    let doc: SeriesDocument = serde_json::from_str(json)?;
    if doc.schema_version > SCHEMA_VERSION {
        return Err(ExportError::UnsupportedSchema {
            found: doc.schema_version,
            max: SCHEMA_VERSION,
        });
    }
    Ok(doc)
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Columns: player, order_index, deck_size, deck_power, deck_efficiency.
/// Efficiency is empty while a deck has no size.
pub fn export_csv(series: &[PlayerStatSeries]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "player",
        "order_index",
        "deck_size",
        "deck_power",
        "deck_efficiency",
    ])?;

    for s in series {
        for p in &s.points {
            wtr.write_record([
                s.player.to_string(),
                p.order_index.to_string(),
                p.deck_size.to_string(),
                format_value(p.deck_power),
                p.deck_efficiency.map(format_value).unwrap_or_default(),
            ])?;
        }
    }

    finish(wtr)
}

/// One statistic in wide form: `order_index` then one column per player.
/// Cells past a player's last purchase are empty.
pub fn export_wide_csv(series: &[PlayerStatSeries], stat: Stat) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["order_index".to_string()];
    header.extend(series.iter().map(|s| s.player.to_string()));
    wtr.write_record(&header)?;

    let rows = series.iter().map(PlayerStatSeries::len).max().unwrap_or(0);
    for i in 0..rows {
        let mut record = vec![i.to_string()];
        record.extend(series.iter().map(|s| {
            s.points
                .get(i)
                .and_then(|p| stat.value(p))
                .map(format_value)
                .unwrap_or_default()
        }));
        wtr.write_record(&record)?;
    }

    finish(wtr)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v:.4}")
    }
}

// ─── Text summary ───────────────────────────────────────────────────

/// Current deck of every player, ranked by power.
pub fn summary_table(series: &[PlayerStatSeries]) -> String {
    let mut rows: Vec<(&PlayerStatSeries, u32, f64, Option<f64>)> = series
        .iter()
        .map(|s| match s.latest() {
            Some(p) => (s, p.deck_size, p.deck_power, p.deck_efficiency),
            None => (s, 0, 0.0, None),
        })
        .collect();
    rows.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.player.cmp(&b.0.player)));

    let width = series
        .iter()
        .map(|s| s.player.as_str().len())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut out = format!(
        "{:<width$}  {:>9}  {:>5}  {:>8}  {:>10}\n",
        "Player", "Purchases", "Size", "Power", "Efficiency"
    );
    out.push_str(&format!("{}\n", "-".repeat(width + 42)));
    for (s, size, power, eff) in rows {
        let eff = eff.map(|e| format!("{e:.2}")).unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "{:<width$}  {:>9}  {:>5}  {:>8.1}  {:>10}\n",
            s.player.as_str(),
            s.len(),
            size,
            power,
            eff
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerId, StatPoint};

    fn sample_series() -> Vec<PlayerStatSeries> {
        vec![
            PlayerStatSeries {
                player: PlayerId::from("P1"),
                points: vec![StatPoint::new(0, 1, 5.0), StatPoint::new(1, 2, 5.0)],
            },
            PlayerStatSeries {
                player: PlayerId::from("P2"),
                points: vec![StatPoint::new(0, 0, 15.0)],
            },
        ]
    }

    fn sample_doc() -> SeriesDocument {
        SeriesDocument::new(SnapshotHash("abc123".into()), sample_series())
    }

    // ─── JSON ────────────────────────────────────────────────────────

    #[test]
    fn json_roundtrip() {
        let original = sample_doc();
        let restored = import_json(&export_json(&original).unwrap()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn json_rejects_newer_version() {
        let mut doc = sample_doc();
        doc.schema_version = 99;
        let json = export_json(&doc).unwrap();
        let msg = import_json(&json).unwrap_err().to_string();
        assert!(msg.contains("unsupported schema version 99"), "{msg}");
    }

    #[test]
    fn json_has_top_level_fields() {
        let json = export_json(&sample_doc()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["fingerprint"], "abc123");
        assert_eq!(value["series"][0]["player"], "P1");
    }

    // ─── CSV ─────────────────────────────────────────────────────────

    #[test]
    fn long_csv_layout() {
        let csv = export_csv(&sample_series()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "player,order_index,deck_size,deck_power,deck_efficiency"
        );
        assert_eq!(lines[1], "P1,0,1,5,5");
        assert_eq!(lines[2], "P1,1,2,5,2.5000");
        assert_eq!(lines[3], "P2,0,0,15,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn wide_csv_pads_short_series() {
        let csv = export_wide_csv(&sample_series(), Stat::Size).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["order_index,P1,P2", "0,1,0", "1,2,"]);
    }

    #[test]
    fn wide_efficiency_leaves_undefined_empty() {
        let csv = export_wide_csv(&sample_series(), Stat::Efficiency).unwrap();
        assert_eq!(csv.lines().nth(1), Some("0,5,"));
    }

    #[test]
    fn empty_export_has_only_header() {
        assert_eq!(export_csv(&[]).unwrap().lines().count(), 1);
        assert_eq!(export_wide_csv(&[], Stat::Power).unwrap().trim(), "order_index");
    }

    // ─── Summary ─────────────────────────────────────────────────────

    #[test]
    fn summary_ranks_by_power() {
        let table = summary_table(&sample_series());
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Player"));
        assert!(lines[2].starts_with("P2"));
        assert!(lines[3].starts_with("P1"));
        assert!(lines[2].trim_end().ends_with('-'));
    }
}
