//! Purchase-log loading.
//!
//! Reads a CSV snapshot of the tracking spreadsheet into canonical
//! [`PurchaseRecord`]s:
//! 1. Headers are matched case-insensitively (`sequence`/`timestamp` alias `order`)
//! 2. Rows without a player are skipped, as are victory tomes
//! 3. Player nicknames resolve through the roster, card names through the catalog
//! 4. Rows that fail to parse, including cells that are not UTF-8, reject every
//!    record of their player
//!
//! A malformed file (missing column, unreadable CSV) is fatal; a malformed
//! row only takes its player out of the result.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{is_victory_tome, Catalog};
use crate::domain::{OrderKey, OrderKeyError, PlayerId, PurchaseRecord};
use crate::fingerprint::{snapshot_fingerprint, SnapshotHash};
use crate::roster::canonical_player;

/// Fatal errors: the snapshot cannot be read at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// What is wrong with a single row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowErrorKind {
    #[error("missing card name")]
    MissingCard,

    #[error("invalid order: {0}")]
    Order(#[from] OrderKeyError),

    #[error("cost '{0}' is not a number")]
    Cost(String),

    #[error("column '{column}' holds '{value}', expected yes/no")]
    Boolean { column: &'static str, value: String },

    #[error("column '{column}' is not valid UTF-8")]
    Encoding { column: String },
}

/// A row rejected during loading.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("player '{player}', row {row}: {kind}")]
pub struct RowError {
    pub player: PlayerId,
    pub row: usize,
    pub kind: RowErrorKind,
}

/// Result of loading a snapshot.
#[derive(Debug, Clone)]
pub struct LoadedLog {
    /// Records of every player whose rows all parsed.
    pub records: Vec<PurchaseRecord>,
    /// Rejected rows, in file order.
    pub rejected: Vec<RowError>,
    /// Blank-player rows and victory tomes.
    pub skipped: usize,
    pub fingerprint: SnapshotHash,
}

impl LoadedLog {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Players with at least one rejected row.
    pub fn rejected_players(&self) -> BTreeSet<&PlayerId> {
        self.rejected.iter().map(|e| &e.player).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    player: usize,
    card: usize,
    order: usize,
    cost: Option<usize>,
    crowns: Option<usize>,
    ethereal: Option<usize>,
    legendary: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim();
                names.iter().any(|n| h.eq_ignore_ascii_case(n))
            })
        };
        Ok(Self {
            player: find(&["player"]).ok_or(LoadError::MissingColumn("player"))?,
            card: find(&["card"]).ok_or(LoadError::MissingColumn("card"))?,
            order: find(&["order", "sequence", "timestamp"])
                .ok_or(LoadError::MissingColumn("order"))?,
            cost: find(&["cost"]),
            crowns: find(&["crowns"]),
            ethereal: find(&["ethereal"]),
            legendary: find(&["legendary"]),
        })
    }
}

/// Load a snapshot from a CSV file.
pub fn load_csv_path(path: &Path) -> Result<LoadedLog, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    load_csv(file)
}

/// Load a snapshot from any CSV reader.
pub fn load_csv<R: Read>(reader: R) -> Result<LoadedLog, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::resolve(&headers)?;
    let catalog = Catalog::standard();

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut skipped = 0;
    let mut unknown_cards: HashSet<String> = HashSet::new();

    // Byte records so one badly encoded cell costs only its player.
    for (idx, result) in rdr.byte_records().enumerate() {
        let row = idx + 1;
        let bytes = result?;

        let player = match bytes.get(columns.player).map(String::from_utf8_lossy) {
            Some(name) if !name.is_empty() => canonical_player(&name),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let raw = match csv::StringRecord::from_byte_record(bytes) {
            Ok(raw) => raw,
            Err(e) => {
                let field = e.utf8_error().field();
                let column = headers.get(field).unwrap_or("?").to_string();
                rejected.push(RowError {
                    player,
                    row,
                    kind: RowErrorKind::Encoding { column },
                });
                continue;
            }
        };
        let cell = |i: Option<usize>| i.and_then(|i| raw.get(i)).unwrap_or("");

        if is_victory_tome(cell(Some(columns.card))) {
            debug!(row, "skipping victory tome");
            skipped += 1;
            continue;
        }

        match parse_row(&raw, &columns, player.clone(), row) {
            Ok(mut record) => {
                apply_catalog(&mut record, catalog, &mut unknown_cards);
                records.push(record);
            }
            Err(kind) => rejected.push(RowError { player, row, kind }),
        }
    }

    if !rejected.is_empty() {
        let bad: HashSet<PlayerId> = rejected.iter().map(|e| e.player.clone()).collect();
        for e in &rejected {
            warn!(player = %e.player, row = e.row, "rejecting player: {}", e.kind);
        }
        records.retain(|r| !bad.contains(&r.player));
    }

    let fingerprint = snapshot_fingerprint(&records);
    info!(
        records = records.len(),
        rejected = rejected.len(),
        skipped,
        fingerprint = fingerprint.short(),
        "loaded purchase log"
    );

    Ok(LoadedLog {
        records,
        rejected,
        skipped,
        fingerprint,
    })
}

fn parse_row(
    raw: &csv::StringRecord,
    columns: &Columns,
    player: PlayerId,
    row: usize,
) -> Result<PurchaseRecord, RowErrorKind> {
    let cell = |i: Option<usize>| i.and_then(|i| raw.get(i)).unwrap_or("");

    let card_name = cell(Some(columns.card));
    if card_name.is_empty() {
        return Err(RowErrorKind::MissingCard);
    }
    let order: OrderKey = cell(Some(columns.order)).parse()?;
    let cost = parse_cost(cell(columns.cost))?;

    let flag = |column: &'static str, i: Option<usize>| {
        let value = cell(i);
        parse_bool(value).ok_or_else(|| RowErrorKind::Boolean {
            column,
            value: value.to_string(),
        })
    };

    Ok(PurchaseRecord {
        player,
        card_name: card_name.to_string(),
        order,
        cost,
        purchased_with_crowns: flag("crowns", columns.crowns)?,
        is_ethereal: flag("ethereal", columns.ethereal)?,
        is_legendary: flag("legendary", columns.legendary)?,
        row,
    })
}

fn apply_catalog(record: &mut PurchaseRecord, catalog: &Catalog, unknown: &mut HashSet<String>) {
    let Some(card) = catalog.lookup(&record.card_name) else {
        if unknown.insert(record.card_name.to_uppercase()) {
            warn!(card = %record.card_name, "card not in catalog, keeping name as given");
        }
        return;
    };

    if card.is_legendary() && !record.is_legendary {
        debug!(row = record.row, card = %card.name, "flagging legendary from catalog");
        record.is_legendary = true;
    }
    if card.is_ethereal() && !record.is_ethereal {
        debug!(row = record.row, card = %card.name, "flagging ethereal from catalog");
        record.is_ethereal = true;
    }
    record.card_name = card.name.clone();
}

/// Spreadsheet yes/no cell. Empty means no.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Some(false),
        "true" | "yes" | "y" | "1" | "x" => Some(true),
        _ => None,
    }
}

/// Ember cost cell. Blank, `-` and `??` mean "not recorded".
pub fn parse_cost(value: &str) -> Result<Option<f64>, RowErrorKind> {
    let value = value.trim();
    if matches!(value, "" | "-" | "??") {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| RowErrorKind::Cost(value.to_string()))
}
