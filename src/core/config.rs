//! Rule configuration.
//!
//! The engine never hardcodes hand size, table capacity or the power
//! scale. Tables configure these via `RulesConfig`, either in code with the
//! `with_*` builders or from JSON.

use serde::{Deserialize, Serialize};

use super::error::SetupError;

/// Tunable rules for one table.
///
/// ## Example
///
/// ```
/// use faction_durak::core::RulesConfig;
///
/// let config = RulesConfig::from_json(r#"{ "can_defend_with_equal_power": false }"#).unwrap();
/// assert_eq!(config.hand_size, 6);
/// assert!(!config.can_defend_with_equal_power);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Cards dealt to each player and the replenishment target.
    pub hand_size: usize,

    /// Attack slots on the table (defense slots mirror them).
    pub table_capacity: usize,

    /// Lowest power a catalog card may carry.
    pub min_card_power: u32,

    /// Highest power a catalog card may carry.
    pub max_card_power: u32,

    /// Whether a defense card of equal power beats the attack.
    /// When false the defense must be strictly stronger.
    pub can_defend_with_equal_power: bool,

    pub min_players: usize,
    pub max_players: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 6,
            table_capacity: 6,
            min_card_power: 50,
            max_card_power: 100,
            can_defend_with_equal_power: true,
            min_players: 2,
            max_players: 6,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.hand_size == 0 {
            return Err(SetupError::InvalidConfig("hand_size must be at least 1".into()));
        }
        if self.table_capacity == 0 {
            return Err(SetupError::InvalidConfig(
                "table_capacity must be at least 1".into(),
            ));
        }
        if self.min_card_power > self.max_card_power {
            return Err(SetupError::InvalidConfig(format!(
                "min_card_power {} exceeds max_card_power {}",
                self.min_card_power, self.max_card_power
            )));
        }
        if self.min_players < 2 || self.min_players > self.max_players || self.max_players > 255 {
            return Err(SetupError::InvalidConfig(format!(
                "player bounds {}..={} must lie within 2..=255",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_table_capacity(mut self, capacity: usize) -> Self {
        self.table_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_power_range(mut self, min: u32, max: u32) -> Self {
        self.min_card_power = min;
        self.max_card_power = max;
        self
    }

    /// Require defense cards to be strictly stronger than the attack.
    #[must_use]
    pub fn strict_defense(mut self) -> Self {
        self.can_defend_with_equal_power = false;
        self
    }

    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Cards a catalog must hold to deal full hands to `player_count` players.
    #[must_use]
    pub fn cards_required(&self, player_count: usize) -> usize {
        self.hand_size * player_count
    }
}
