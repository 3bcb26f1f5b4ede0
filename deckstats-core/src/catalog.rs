//! Card catalog — the game's card table with short names and categories.
//!
//! Every card has a three-character short name used by the tracking
//! spreadsheet (e.g. `STA` for Stability). Lookups accept the full name in
//! any case, the short name, or one of a handful of known spellings.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crown price every ethereal card is bought for unless stated otherwise.
pub const DEFAULT_ETHEREAL_CROWN_PRICE: u32 = 3;
/// Embers per crown.
pub const CROWN_EXCHANGE_RATE: u32 = 5;

/// Rarity tier of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardLevel {
    Common,
    Uncommon,
    Rare,
    Legendary,
    Ethereal,
}

/// One entry in the card table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub short_name: String,
    pub level: CardLevel,
    /// Shop price. Embers unless `crowns` is set; legendaries have none.
    pub price: Option<u32>,
    /// Maximum copies allowed in one deck.
    pub limit: Option<u32>,
    pub crowns: bool,
    pub ethereal: bool,
    pub permanent: bool,
    /// Fixed deck power, where the card table pins one instead of the price.
    pub power: Option<u32>,
}

impl Card {
    fn new(name: &str, level: CardLevel, price: u32) -> Self {
        Self {
            name: name.to_string(),
            short_name: short_name_for(name),
            level,
            price: Some(price),
            limit: Some(3),
            crowns: false,
            ethereal: false,
            permanent: false,
            power: None,
        }
    }

    fn legendary(name: &str) -> Self {
        Self {
            price: None,
            limit: Some(1),
            ..Self::new(name, CardLevel::Legendary, 0)
        }
    }

    fn ethereal(name: &str, level: CardLevel) -> Self {
        Self {
            crowns: true,
            ethereal: true,
            ..Self::new(name, level, DEFAULT_ETHEREAL_CROWN_PRICE)
        }
    }

    fn limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    fn price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    fn short(mut self, short_name: &str) -> Self {
        self.short_name = short_name.to_string();
        self
    }

    fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    fn power(mut self, power: u32) -> Self {
        self.power = Some(power);
        self
    }

    /// Power the card adds to a deck: the pinned value, else its price with
    /// crowns converted at the exchange rate. Legendaries have neither.
    pub fn deck_power(&self) -> Option<u32> {
        self.power.or_else(|| {
            self.price
                .map(|p| if self.crowns { p * CROWN_EXCHANGE_RATE } else { p })
        })
    }

    pub fn is_legendary(&self) -> bool {
        self.level == CardLevel::Legendary
    }

    pub fn is_ethereal(&self) -> bool {
        self.ethereal
    }
}

/// Derive the spreadsheet short name from a card's full name.
///
/// One word: first three letters. Two words: two letters of the first word
/// and the first letter of the second. Longer: initials of the first two
/// words and the last word.
pub fn short_name_for(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let short: String = match words.as_slice() {
        [] => String::new(),
        [one] => one.chars().take(3).collect(),
        [first, second] => first.chars().take(2).chain(second.chars().take(1)).collect(),
        [first, second, .., last] => [first, second, last]
            .iter()
            .filter_map(|w| w.chars().next())
            .collect(),
    };
    short.to_uppercase()
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("short name '{short}' must be exactly 3 characters (card '{card}')")]
    BadShortName { card: String, short: String },

    #[error("'{card}' and '{other}' share the short name '{short}'")]
    DuplicateShortName {
        card: String,
        other: String,
        short: String,
    },

    #[error("name '{name}' is already mapped to '{short}'")]
    DuplicateName { name: String, short: String },
}

/// Indexed card table.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<Card>,
    by_short: HashMap<String, usize>,
    names: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting malformed or clashing short names.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, CatalogError> {
        let mut by_short = HashMap::new();
        let mut names = HashMap::new();

        for (idx, card) in cards.iter().enumerate() {
            if card.short_name.chars().count() != 3 {
                return Err(CatalogError::BadShortName {
                    card: card.name.clone(),
                    short: card.short_name.clone(),
                });
            }
            if let Some(&other) = by_short.get(&card.short_name) {
                let other: &Card = &cards[other];
                return Err(CatalogError::DuplicateShortName {
                    card: card.name.clone(),
                    other: other.name.clone(),
                    short: card.short_name.clone(),
                });
            }
            by_short.insert(card.short_name.clone(), idx);

            let upper = card.name.trim().to_uppercase();
            if names.contains_key(&upper) {
                return Err(CatalogError::DuplicateName {
                    name: upper,
                    short: card.short_name.clone(),
                });
            }
            names.insert(upper, idx);
        }

        let mut catalog = Self {
            cards,
            by_short,
            names,
        };
        catalog.alias("LOOT & SCOOT", "LAS");
        catalog.alias("LOOT N' SCOOT", "LAS");
        Ok(catalog)
    }

    /// The built-in card table.
    pub fn standard() -> &'static Catalog {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Catalog::from_cards(standard_cards()).expect("built-in card table is consistent")
        })
    }

    fn alias(&mut self, name: &str, short: &str) {
        if let Some(&idx) = self.by_short.get(short) {
            self.names.insert(name.to_uppercase(), idx);
        }
    }

    /// Resolve a full name, short name or alias (case-insensitive).
    pub fn lookup(&self, name: &str) -> Option<&Card> {
        let key = name.trim().to_uppercase();
        self.by_short
            .get(&key)
            .or_else(|| self.names.get(&key))
            .map(|&idx| &self.cards[idx])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Cards that never enter a deck and are dropped from purchase logs.
pub fn is_victory_tome(name: &str) -> bool {
    let upper = name.trim().to_uppercase();
    upper == "VT" || upper.contains("VICTORY TOME")
}

fn standard_cards() -> Vec<Card> {
    use CardLevel::*;

    vec![
        // common
        Card::new("Sneak", Common, 7).limit(Some(5)),
        Card::new("Stability", Common, 8).limit(Some(5)),
        Card::new("Treasure Hunter", Common, 9).limit(Some(5)),
        Card::new("Ember Seeker", Common, 10).limit(Some(5)),
        // one of each common plus its 6 crowns
        Card::ethereal("Moment of Clarity", Common).price(6).limit(None).power(40),
        // uncommon
        Card::new("Evasion", Uncommon, 16),
        Card::new("Tread Lightly", Uncommon, 18),
        Card::new("Frost Focus", Uncommon, 20),
        Card::new("Loot and Scoot", Uncommon, 20),
        Card::new("Second Wind", Uncommon, 22),
        Card::new("Beast Sense", Uncommon, 24),
        Card::new("Bounding Strides", Uncommon, 26).short("BST"),
        Card::new("Reckless Charge", Uncommon, 28),
        Card::new("Sprint", Uncommon, 30).short("SPT"),
        Card::new("Nimble Looting", Uncommon, 32),
        Card::new("Smash and Grab", Uncommon, 34),
        Card::new("Quickstep", Uncommon, 36),
        Card::new("Suit Up", Uncommon, 38).limit(Some(1)).permanent(),
        Card::new("Adrenaline Rush", Uncommon, 40),
        // rare
        Card::new("Eerie Silence", Rare, 46),
        Card::new("Dungeon Repairs", Rare, 48),
        Card::new("Swagger", Rare, 50),
        Card::new("Chill Step", Rare, 52),
        Card::new("Speed Runner", Rare, 54).permanent(),
        Card::new("Eyes on the Prize", Rare, 56),
        Card::new("Haste", Rare, 60),
        Card::new("Cold Snap", Rare, 62),
        Card::new("Silent Runner", Rare, 64).permanent(),
        Card::new("Fuzzy Bunny Slippers", Rare, 66).permanent(),
        Card::new("Deepfrost", Rare, 68).short("DEF"),
        Card::new("Brilliance", Rare, 70),
        // legendary
        Card::legendary("Avalanche"),
        Card::legendary("Glorious Moment").permanent(),
        Card::legendary("Beast Master").permanent(),
        Card::legendary("Cash Cow"),
        Card::legendary("Boots of Swiftness").permanent(),
        // ethereal
        // five ember seekers and change
        Card::ethereal("Pay to Win", Ethereal).short("P2W").power(58),
        // evasion + treasure hunter + 2
        Card::ethereal("Tactical Approach", Ethereal).limit(None).permanent().power(27),
        Card::ethereal("Porkchop Power", Ethereal).limit(None).permanent(),
    ]
}
