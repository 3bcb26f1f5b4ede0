//! DeckStats Core — purchase-log loading, deck statistics, interaction state.
//!
//! This crate contains everything below the terminal UI:
//! - Domain types (purchase records, order keys, stat series)
//! - Card catalog and player roster
//! - Ordered special-case pricing rules
//! - Per-player derivation of deck size, power and efficiency
//! - CSV loading with snapshot fingerprints
//! - CSV/JSON export
//! - Chart interaction state machine (hover, click-to-isolate)
//! - Synthetic sample logs

pub mod catalog;
pub mod config;
pub mod derive;
pub mod domain;
pub mod export;
pub mod fingerprint;
pub mod interaction;
pub mod loader;
pub mod pricing;
pub mod roster;
pub mod sample;

pub use config::DeckStatsConfig;
pub use derive::{derive_series, Derivation, DeriveError, DeriveOptions, ValidationError};
pub use domain::{PlayerId, PlayerStatSeries, PurchaseRecord, Stat, StatPoint};
pub use interaction::{InteractionEvent, InteractionState};
