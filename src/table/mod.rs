//! Attack and defense slots.
//!
//! The table holds two index-aligned rows of the same capacity: defense slot
//! `i` answers attack slot `i`. Attack cards fill from the left; a defense
//! card may only land on an occupied attack slot whose defense slot is free.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{GameError, RulesConfig};

/// The two card rows of the current turn.
///
/// ## Example
///
/// ```
/// use faction_durak::cards::CardId;
/// use faction_durak::table::Table;
///
/// let mut table = Table::new(6);
/// let slot = table.place_attack(CardId::new(4)).unwrap();
/// assert!(table.has_undefended());
///
/// table.bind_defense(slot, CardId::new(9)).unwrap();
/// assert!(!table.has_undefended());
/// assert_eq!(table.clear(), vec![CardId::new(4), CardId::new(9)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    attack: Vec<Option<CardId>>,
    defense: Vec<Option<CardId>>,
}

impl Table {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            attack: vec![None; capacity],
            defense: vec![None; capacity],
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.attack.len()
    }

    /// Number of attack cards on the table.
    #[must_use]
    pub fn attack_count(&self) -> usize {
        self.attack.iter().flatten().count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.attack_count() >= self.capacity()
    }

    /// True when no attack card has been played this turn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attack.iter().all(Option::is_none)
    }

    #[must_use]
    pub fn attack_at(&self, slot: usize) -> Option<CardId> {
        self.attack.get(slot).copied().flatten()
    }

    #[must_use]
    pub fn defense_at(&self, slot: usize) -> Option<CardId> {
        self.defense.get(slot).copied().flatten()
    }

    /// Put an attack card in the first free slot and return that slot.
    pub fn place_attack(&mut self, card: CardId) -> Result<usize, GameError> {
        let slot = self
            .attack
            .iter()
            .position(Option::is_none)
            .ok_or(GameError::TableFull {
                capacity: self.capacity(),
            })?;
        self.attack[slot] = Some(card);
        Ok(slot)
    }

    /// Check that a defense card could land in `slot`.
    pub fn check_defense_slot(&self, slot: usize) -> Result<CardId, GameError> {
        if slot >= self.capacity() {
            return Err(GameError::SlotOutOfRange {
                slot,
                capacity: self.capacity(),
            });
        }
        let attack = self.attack[slot].ok_or(GameError::EmptyAttackSlot(slot))?;
        if self.defense[slot].is_some() {
            return Err(GameError::DefenseSlotTaken(slot));
        }
        Ok(attack)
    }

    /// Bind a defense card to the attack in `slot`.
    pub fn bind_defense(&mut self, slot: usize, card: CardId) -> Result<(), GameError> {
        self.check_defense_slot(slot)?;
        self.defense[slot] = Some(card);
        Ok(())
    }

    /// True when some attack card has no defense card on it.
    #[must_use]
    pub fn has_undefended(&self) -> bool {
        self.undefended_slots().next().is_some()
    }

    pub fn undefended_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.attack
            .iter()
            .zip(&self.defense)
            .enumerate()
            .filter(|(_, (a, d))| a.is_some() && d.is_none())
            .map(|(i, _)| i)
    }

    /// Occupied attack slots with their cards.
    pub fn attacks(&self) -> impl Iterator<Item = (usize, CardId)> + '_ {
        self.attack
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i, c)))
    }

    /// Occupied defense slots with their cards.
    pub fn defenses(&self) -> impl Iterator<Item = (usize, CardId)> + '_ {
        self.defense
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i, c)))
    }

    /// Every card on the table, attack row first.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.attack.iter().chain(&self.defense).flatten().copied()
    }

    /// Empty both rows, returning their cards (attack row first).
    pub fn clear(&mut self) -> Vec<CardId> {
        let cards = self.cards().collect();
        self.attack.fill(None);
        self.defense.fill(None);
        cards
    }
}

/// Power the defense card must reach to beat an attack of `attack_power`.
#[must_use]
pub fn required_power(attack_power: u32, config: &RulesConfig) -> u32 {
    if config.can_defend_with_equal_power {
        attack_power
    } else {
        attack_power.saturating_add(1)
    }
}

/// Check the power rule for a defense card.
pub fn validate_defense(
    defense_power: u32,
    attack_power: u32,
    config: &RulesConfig,
) -> Result<(), GameError> {
    let required = required_power(attack_power, config);
    if defense_power < required {
        return Err(GameError::InsufficientPower {
            power: defense_power,
            required,
        });
    }
    Ok(())
}
