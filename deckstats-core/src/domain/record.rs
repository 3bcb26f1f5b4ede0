//! PurchaseRecord — one card acquisition event from the purchase log.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ids::PlayerId;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Chronological position of a purchase within a player's history.
///
/// Spreadsheets either number purchases (run number) or stamp them with a
/// date. Sequence keys sort before timestamp keys when a player mixes both,
/// which keeps the ordering total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKey {
    Sequence(u64),
    Timestamp(NaiveDateTime),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is neither a sequence number nor a date/time")]
pub struct OrderKeyError(pub String);

impl FromStr for OrderKey {
    type Err = OrderKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u64>() {
            return Ok(OrderKey::Sequence(n));
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(OrderKey::Timestamp(dt));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(OrderKey::Timestamp(dt));
            }
        }
        Err(OrderKeyError(s.to_string()))
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKey::Sequence(n) => write!(f, "{n}"),
            OrderKey::Timestamp(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// A single card purchase, validated and canonicalized by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub player: PlayerId,
    pub card_name: String,
    pub order: OrderKey,
    /// Base price in frost embers. Absent for purchases priced by a rule.
    pub cost: Option<f64>,
    pub purchased_with_crowns: bool,
    pub is_ethereal: bool,
    pub is_legendary: bool,
    /// 1-based data row in the source snapshot. Breaks ties on `order`.
    pub row: usize,
}

impl PurchaseRecord {
    /// Plain ember purchase, mostly for tests and sample data.
    pub fn embers(player: impl Into<PlayerId>, card: &str, order: u64, cost: f64) -> Self {
        Self {
            player: player.into(),
            card_name: card.to_string(),
            order: OrderKey::Sequence(order),
            cost: Some(cost),
            purchased_with_crowns: false,
            is_ethereal: false,
            is_legendary: false,
            row: order as usize,
        }
    }

    pub fn with_crowns(mut self) -> Self {
        self.purchased_with_crowns = true;
        self
    }

    pub fn legendary(mut self) -> Self {
        self.is_legendary = true;
        self
    }

    pub fn ethereal(mut self) -> Self {
        self.is_ethereal = true;
        self
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    /// Sort key within a player's partition.
    pub fn chronology(&self) -> (OrderKey, usize) {
        (self.order, self.row)
    }
}
