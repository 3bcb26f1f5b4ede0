//! TOML configuration.
//!
//! ```toml
//! [pricing]
//! crown_equivalent = 15.0
//! legendary_power = 999.0
//! ethereal_power = 15.0
//!
//! [sizing]
//! normal = 1
//! ethereal = 1
//!
//! [chart]
//! hover_tolerance = 1.5
//!
//! [power]
//! starting_deck = ["Sneak", "Treasure Hunter"]
//! small_deck_penalty = 7.0
//! min_deck_size = 10
//! normalize = 40.0
//! efficiency_decimals = 2
//! ```
//!
//! Every field is optional and falls back to its default. The `[power]`
//! defaults leave deck power as the plain cumulative sum; the values above
//! reproduce the tracking spreadsheet's model.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::derive::DeriveOptions;
use crate::pricing::{PowerModel, PricingParams, PricingRules, SizeWeights};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Chart interaction settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Maximum pointer distance, in terminal cells, that still hovers a line.
    pub hover_tolerance: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            hover_tolerance: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckStatsConfig {
    pub pricing: PricingParams,
    pub sizing: SizeWeights,
    pub chart: ChartConfig,
    pub power: PowerModel,
}

impl DeckStatsConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pricing;
        for (name, value) in [
            ("pricing.crown_equivalent", p.crown_equivalent),
            ("pricing.legendary_power", p.legendary_power),
            ("pricing.ethereal_power", p.ethereal_power),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        let power = &self.power;
        if !power.small_deck_penalty.is_finite() || power.small_deck_penalty < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "power.small_deck_penalty must be a non-negative number, got {}",
                power.small_deck_penalty
            )));
        }
        if !power.normalize.is_finite() {
            return Err(ConfigError::Invalid("power.normalize must be finite".into()));
        }
        let unknown = power.unknown_starting_cards();
        if !unknown.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "power.starting_deck has cards without a known power: {}",
                unknown.join(", ")
            )));
        }
        let tolerance = self.chart.hover_tolerance;
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::Invalid(
                "chart.hover_tolerance must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn derive_options(&self) -> DeriveOptions {
        DeriveOptions {
            pricing: PricingRules::new(self.pricing),
            sizing: self.sizing,
            power: self.power.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{DEFAULT_CROWN_EQUIVALENT, DEFAULT_LEGENDARY_POWER};

    #[test]
    fn empty_file_gives_defaults() {
        let config = DeckStatsConfig::from_toml("").unwrap();
        assert_eq!(config, DeckStatsConfig::default());
        assert_eq!(config.pricing.crown_equivalent, DEFAULT_CROWN_EQUIVALENT);
        assert_eq!(config.pricing.legendary_power, DEFAULT_LEGENDARY_POWER);
        assert_eq!(config.sizing.ethereal, 1);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = DeckStatsConfig::from_toml(
            r#"
            [pricing]
            legendary_power = 0.0

            [sizing]
            ethereal = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.legendary_power, 0.0);
        assert_eq!(config.pricing.ethereal_power, 15.0);
        assert_eq!(config.sizing.normal, 1);
        assert_eq!(config.sizing.ethereal, 0);
        assert_eq!(config.chart, ChartConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DeckStatsConfig::from_toml("[pricing]\nlegend = 3.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn negative_power_is_rejected() {
        let err = DeckStatsConfig::from_toml("[pricing]\ncrown_equivalent = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("crown_equivalent"));
    }

    #[test]
    fn derive_options_follow_config() {
        let config = DeckStatsConfig::from_toml("[pricing]\ncrown_equivalent = 1.0\n").unwrap();
        let opts = config.derive_options();
        let r = crate::domain::PurchaseRecord::embers("P", "Haste", 1, 60.0).with_crowns();
        assert_eq!(opts.pricing.price(&r).unwrap().power, 1.0);
    }

    #[test]
    fn power_section_reproduces_the_spreadsheet_model() {
        let config = DeckStatsConfig::from_toml(
            r#"
            [power]
            starting_deck = ["SNE", "TRH"]
            small_deck_penalty = 7.0
            normalize = 40.0
            efficiency_decimals = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.power.min_deck_size, 10);
        let opts = config.derive_options();
        let base = opts.power.base_deck(&opts.sizing);
        assert_eq!(opts.power.deck_power(base.size, base.power), 0.0);
    }

    #[test]
    fn unknown_starting_card_is_rejected() {
        let err = DeckStatsConfig::from_toml("[power]\nstarting_deck = [\"Nope\"]\n").unwrap_err();
        assert!(err.to_string().contains("Nope"), "{err}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = DeckStatsConfig::from_file(Path::new("/nonexistent/deckstats.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/deckstats.toml"));
    }
}
