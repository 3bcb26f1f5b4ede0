//! Domain types for DeckStats

pub mod ids;
pub mod record;
pub mod series;

pub use ids::PlayerId;
pub use record::{OrderKey, OrderKeyError, PurchaseRecord};
pub use series::{PlayerStatSeries, Stat, StatPoint};
