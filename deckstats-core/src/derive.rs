//! Statistics deriver — purchase records → per-player statistic series.
//!
//! Records are partitioned by player, sorted by `(order, row)` and folded
//! into running deck size and power totals. One point is emitted per
//! purchase. Partitions are independent: a bad record fails only its own
//! player's series.
//!
//! The configured [`PowerModel`] seeds each deck with its starting cards and
//! adjusts the reported power; raw totals keep accumulating underneath.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::domain::{PlayerId, PlayerStatSeries, PurchaseRecord, StatPoint};
use crate::pricing::{PowerModel, PricingError, PricingRules, SizeWeights};

/// A record that cannot be folded into its player's totals.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("player '{player}', row {row} ('{card}'): {reason}")]
pub struct ValidationError {
    pub player: PlayerId,
    pub row: usize,
    pub card: String,
    pub reason: PricingError,
}

/// Errors surfaced to strict callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeriveError {
    #[error("{} player(s) failed validation{}", .0.len(), first_failure(.0))]
    Validation(Vec<ValidationError>),
}

fn first_failure(failures: &[ValidationError]) -> String {
    failures
        .first()
        .map(|e| format!("; first: {e}"))
        .unwrap_or_default()
}

/// Parameters of the derivation.
#[derive(Debug, Clone, Default)]
pub struct DeriveOptions {
    pub pricing: PricingRules,
    pub sizing: SizeWeights,
    pub power: PowerModel,
}

/// Outcome of deriving every partition.
#[derive(Debug, Clone, Default)]
pub struct Derivation {
    /// Series for every player whose records all validated, ordered by player.
    pub series: Vec<PlayerStatSeries>,
    /// One entry per failed player partition.
    pub failures: Vec<ValidationError>,
}

impl Derivation {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn get(&self, player: &PlayerId) -> Option<&PlayerStatSeries> {
        self.series.iter().find(|s| &s.player == player)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.series.iter().map(|s| &s.player)
    }

    /// Fail if any partition was rejected.
    pub fn into_result(self) -> Result<Vec<PlayerStatSeries>, DeriveError> {
        if self.failures.is_empty() {
            Ok(self.series)
        } else {
            Err(DeriveError::Validation(self.failures))
        }
    }
}

/// Derive one series per distinct player in `records`.
pub fn derive_series(records: &[PurchaseRecord], opts: &DeriveOptions) -> Derivation {
    let mut partitions: BTreeMap<&PlayerId, Vec<&PurchaseRecord>> = BTreeMap::new();
    for record in records {
        partitions.entry(&record.player).or_default().push(record);
    }

    let mut derivation = Derivation::default();
    for (player, partition) in partitions {
        match derive_player(player, &partition, opts) {
            Ok(series) => derivation.series.push(series),
            Err(e) => {
                warn!(player = %player, row = e.row, "rejecting player partition: {}", e.reason);
                derivation.failures.push(e);
            }
        }
    }

    info!(
        records = records.len(),
        players = derivation.series.len(),
        rejected = derivation.failures.len(),
        adjusted_power = !opts.power.is_plain(),
        "derived deck statistics"
    );
    derivation
}

/// Fold one player's records into a series. The slice may be in any order.
pub fn derive_player(
    player: &PlayerId,
    records: &[&PurchaseRecord],
    opts: &DeriveOptions,
) -> Result<PlayerStatSeries, ValidationError> {
    let mut sorted: Vec<&PurchaseRecord> = records.to_vec();
    sorted.sort_by_key(|r| r.chronology());

    let mut series = PlayerStatSeries::new(player.clone());
    series.points.reserve(sorted.len());

    let base = opts.power.base_deck(&opts.sizing);
    let mut size: u32 = base.size;
    let mut power: f64 = base.power;
    let mut copies: HashMap<&'static str, u32> = HashMap::new();
    let catalog = Catalog::standard();
    for card in opts.power.starting_deck.iter().filter_map(|n| catalog.lookup(n)) {
        *copies.entry(card.short_name.as_str()).or_insert(0) += 1;
    }

    for (order_index, record) in sorted.iter().enumerate() {
        let priced = opts.pricing.price(record).map_err(|reason| ValidationError {
            player: player.clone(),
            row: record.row,
            card: record.card_name.clone(),
            reason,
        })?;
        if let Some(rule) = priced.rule {
            debug!(player = %player, row = record.row, %rule, power = priced.power, "special pricing");
        }

        size = size.saturating_add(opts.sizing.weight(record));
        power += priced.power;
        let mut point = StatPoint::new(order_index, size, opts.power.deck_power(size, power));
        point.deck_efficiency = point.deck_efficiency.map(|e| opts.power.round_efficiency(e));
        series.points.push(point);

        check_limit(player, record, &mut copies);
    }

    Ok(series)
}

fn check_limit(player: &PlayerId, record: &PurchaseRecord, copies: &mut HashMap<&'static str, u32>) {
    let Some(card) = Catalog::standard().lookup(&record.card_name) else {
        return;
    };
    let count = copies.entry(card.short_name.as_str()).or_insert(0);
    *count += 1;
    if let Some(limit) = card.limit {
        if *count == limit + 1 {
            warn!(
                player = %player,
                card = %card.name,
                limit,
                "deck holds more copies than the card limit allows"
            );
        }
    }
}
