//! Special-case pricing rules.
//!
//! Each purchase contributes power to the deck. Most cards contribute their
//! ember price, but crown purchases, legendaries and ethereals follow their
//! own rules. The rules are an ordered list evaluated first-match-wins:
//!
//! 1. crowns    — fixed crown-equivalent power
//! 2. legendary — legendary adjustment
//! 3. ethereal  — the card table's power, else the configured fallback
//! 4. otherwise — the record's ember cost
//!
//! Size contributions are weighted per category (normal / ethereal).
//!
//! [`PowerModel`] then adjusts whole-deck power: an optional starting deck,
//! a penalty for decks below a minimum size and a constant offset. All of
//! it is off by default, leaving power as the plain cumulative sum.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::catalog::{Card, Catalog};
use crate::domain::PurchaseRecord;

/// Power of a crown purchase: the default ethereal price (3 crowns) at the
/// 5-embers-per-crown exchange rate.
pub const DEFAULT_CROWN_EQUIVALENT: f64 = 15.0;
/// Legendaries are priced out of reach of every other card.
pub const DEFAULT_LEGENDARY_POWER: f64 = 999.0;
/// Ethereals missing from the card table: 3 crowns, like Porkchop Power.
pub const DEFAULT_ETHEREAL_POWER: f64 = 15.0;

/// Which special case a rule covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Crowns,
    Legendary,
    Ethereal,
}

impl RuleKind {
    pub fn matches(self, record: &PurchaseRecord) -> bool {
        match self {
            RuleKind::Crowns => record.purchased_with_crowns,
            RuleKind::Legendary => record.is_legendary,
            RuleKind::Ethereal => record.is_ethereal,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleKind::Crowns => "crowns",
            RuleKind::Legendary => "legendary",
            RuleKind::Ethereal => "ethereal",
        };
        f.write_str(s)
    }
}

/// A predicate → power adjustment. `power` is fixed except for ethereals,
/// where the card table's value takes precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingRule {
    pub kind: RuleKind,
    pub power: f64,
}

/// Serializable pricing parameters (the `[pricing]` config section).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingParams {
    pub crown_equivalent: f64,
    pub legendary_power: f64,
    pub ethereal_power: f64,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            crown_equivalent: DEFAULT_CROWN_EQUIVALENT,
            legendary_power: DEFAULT_LEGENDARY_POWER,
            ethereal_power: DEFAULT_ETHEREAL_POWER,
        }
    }
}

/// Why a record could not be priced.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PricingError {
    #[error("missing ember cost")]
    MissingCost,

    #[error("invalid ember cost {0}")]
    InvalidCost(f64),
}

/// Power contributed by one record and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Priced {
    pub power: f64,
    /// `None` when the record's own ember cost was used.
    pub rule: Option<RuleKind>,
}

/// Ordered rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRules {
    rules: Vec<PricingRule>,
}

impl PricingRules {
    pub fn new(params: PricingParams) -> Self {
        Self {
            rules: vec![
                PricingRule {
                    kind: RuleKind::Crowns,
                    power: params.crown_equivalent,
                },
                PricingRule {
                    kind: RuleKind::Legendary,
                    power: params.legendary_power,
                },
                PricingRule {
                    kind: RuleKind::Ethereal,
                    power: params.ethereal_power,
                },
            ],
        }
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    /// Power contribution of a record. First matching rule wins; records no
    /// rule covers must carry a finite, non-negative ember cost.
    pub fn price(&self, record: &PurchaseRecord) -> Result<Priced, PricingError> {
        if let Some(rule) = self.rules.iter().find(|r| r.kind.matches(record)) {
            let power = match rule.kind {
                RuleKind::Ethereal => table_power(record).unwrap_or(rule.power),
                RuleKind::Crowns | RuleKind::Legendary => rule.power,
            };
            return Ok(Priced {
                power,
                rule: Some(rule.kind),
            });
        }
        match record.cost {
            None => Err(PricingError::MissingCost),
            Some(c) if !c.is_finite() || c < 0.0 => Err(PricingError::InvalidCost(c)),
            Some(c) => Ok(Priced {
                power: c,
                rule: None,
            }),
        }
    }
}

fn table_power(record: &PurchaseRecord) -> Option<f64> {
    Catalog::standard()
        .lookup(&record.card_name)
        .and_then(Card::deck_power)
        .map(f64::from)
}

impl Default for PricingRules {
    fn default() -> Self {
        Self::new(PricingParams::default())
    }
}

/// Deck-slot weight per category (the `[sizing]` config section).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizeWeights {
    pub normal: u32,
    pub ethereal: u32,
}

impl Default for SizeWeights {
    fn default() -> Self {
        Self {
            normal: 1,
            ethereal: 1,
        }
    }
}

impl SizeWeights {
    pub fn weight(&self, record: &PurchaseRecord) -> u32 {
        if record.is_ethereal {
            self.ethereal
        } else {
            self.normal
        }
    }
}

// ─── Deck power model ───────────────────────────────────────────────

/// Whole-deck power adjustments (the `[power]` config section).
///
/// ```toml
/// [power]
/// starting_deck = ["Sneak", "Treasure Hunter"]
/// small_deck_penalty = 7.0
/// min_deck_size = 10
/// normalize = 40.0
/// efficiency_decimals = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PowerModel {
    /// Cards every deck holds before the first purchase (name or short name).
    pub starting_deck: Vec<String>,
    /// Power lost per card a deck is short of `min_deck_size`.
    pub small_deck_penalty: f64,
    pub min_deck_size: u32,
    /// Constant added to every deck's power.
    pub normalize: f64,
    /// Round efficiency to this many decimal places.
    pub efficiency_decimals: Option<u32>,
}

impl Default for PowerModel {
    fn default() -> Self {
        Self {
            starting_deck: Vec::new(),
            small_deck_penalty: 0.0,
            min_deck_size: 10,
            normalize: 0.0,
            efficiency_decimals: None,
        }
    }
}

/// Size and raw power of the cards a deck starts with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaseDeck {
    pub size: u32,
    pub power: f64,
}

impl PowerModel {
    /// The tracking spreadsheet's model: every deck starts with Sneak and
    /// Treasure Hunter, a run under 10 cards draws stumbles that cancel a
    /// Sneak (7) each, and +40 puts the starting deck at zero.
    pub fn spreadsheet() -> Self {
        Self {
            starting_deck: vec!["Sneak".into(), "Treasure Hunter".into()],
            small_deck_penalty: 7.0,
            min_deck_size: 10,
            normalize: 40.0,
            efficiency_decimals: Some(2),
        }
    }

    /// Starting-deck entries the card table cannot price.
    pub fn unknown_starting_cards(&self) -> Vec<&str> {
        self.starting_deck
            .iter()
            .map(String::as_str)
            .filter(|name| Catalog::standard().lookup(name).and_then(Card::deck_power).is_none())
            .collect()
    }

    /// Starting cards priced from the card table. Entries it cannot price
    /// are left out; config validation rejects them up front.
    pub fn base_deck(&self, sizing: &SizeWeights) -> BaseDeck {
        let catalog = Catalog::standard();
        self.starting_deck
            .iter()
            .filter_map(|name| catalog.lookup(name))
            .filter_map(|card| {
                let weight = if card.is_ethereal() {
                    sizing.ethereal
                } else {
                    sizing.normal
                };
                card.deck_power().map(|p| (weight, f64::from(p)))
            })
            .fold(BaseDeck::default(), |acc, (weight, power)| BaseDeck {
                size: acc.size + weight,
                power: acc.power + power,
            })
    }

    /// Deck power after the small-deck penalty and offset.
    pub fn deck_power(&self, size: u32, raw_power: f64) -> f64 {
        let missing = self.min_deck_size.saturating_sub(size);
        raw_power - self.small_deck_penalty * f64::from(missing) + self.normalize
    }

    pub fn round_efficiency(&self, efficiency: f64) -> f64 {
        match self.efficiency_decimals {
            Some(d) => {
                let scale = 10f64.powi(d.min(12) as i32);
                (efficiency * scale).round() / scale
            }
            None => efficiency,
        }
    }

    /// Whether any adjustment is switched on.
    pub fn is_plain(&self) -> bool {
        *self == Self {
            min_deck_size: self.min_deck_size,
            ..Self::default()
        }
    }
}
