//! Derived per-player statistic series.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::PlayerId;

/// Deck state after one purchase has been folded in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatPoint {
    /// Dense 0..N-1 index within the player's history.
    pub order_index: usize,
    pub deck_size: u32,
    pub deck_power: f64,
    /// `deck_power / deck_size`; `None` while the deck is empty.
    pub deck_efficiency: Option<f64>,
}

impl StatPoint {
    pub fn new(order_index: usize, deck_size: u32, deck_power: f64) -> Self {
        let deck_efficiency = if deck_size > 0 {
            Some(deck_power / f64::from(deck_size))
        } else {
            None
        };
        Self {
            order_index,
            deck_size,
            deck_power,
            deck_efficiency,
        }
    }
}

/// One player's chronological statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatSeries {
    pub player: PlayerId,
    pub points: Vec<StatPoint>,
}

impl PlayerStatSeries {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The player's current deck (after the latest purchase).
    pub fn latest(&self) -> Option<&StatPoint> {
        self.points.last()
    }

    /// `(order_index, value)` pairs for one statistic, skipping undefined values.
    pub fn xy(&self, stat: Stat) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| stat.value(p).map(|v| (p.order_index as f64, v)))
            .collect()
    }
}

/// Which derived statistic to read from a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Size,
    Power,
    Efficiency,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Size, Stat::Power, Stat::Efficiency];

    pub fn value(self, point: &StatPoint) -> Option<f64> {
        match self {
            Stat::Size => Some(f64::from(point.deck_size)),
            Stat::Power => Some(point.deck_power),
            Stat::Efficiency => point.deck_efficiency,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stat::Size => "Deck Size",
            Stat::Power => "Deck Power",
            Stat::Efficiency => "Deck Efficiency",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stat::Size => "size",
            Stat::Power => "power",
            Stat::Efficiency => "efficiency",
        };
        f.write_str(s)
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "size" => Ok(Stat::Size),
            "power" => Ok(Stat::Power),
            "efficiency" | "eff" => Ok(Stat::Efficiency),
            other => Err(format!("unknown statistic '{other}' (expected size, power or efficiency)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiency_undefined_for_empty_deck() {
        let p = StatPoint::new(0, 0, 12.0);
        assert_eq!(p.deck_efficiency, None);
        assert_eq!(Stat::Efficiency.value(&p), None);
    }

    #[test]
    fn efficiency_is_power_over_size() {
        let p = StatPoint::new(1, 4, 10.0);
        assert_eq!(p.deck_efficiency, Some(2.5));
    }

    #[test]
    fn xy_skips_undefined_points() {
        let series = PlayerStatSeries {
            player: PlayerId::from("P1"),
            points: vec![StatPoint::new(0, 0, 0.0), StatPoint::new(1, 1, 5.0)],
        };
        assert_eq!(series.xy(Stat::Efficiency), vec![(1.0, 5.0)]);
        assert_eq!(series.xy(Stat::Size), vec![(0.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn stat_round_trips_through_str() {
        for stat in Stat::ALL {
            assert_eq!(stat.to_string().parse::<Stat>().unwrap(), stat);
        }
        assert!("clank".parse::<Stat>().is_err());
    }
}
