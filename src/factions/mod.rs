//! Faction attack-chain validation.
//!
//! An attack may only grow by cards that share lineage with the chain. The
//! lineage starts at the anchor (the first attack card of the turn) and may
//! branch through any defense card on the table.
//!
//! ## State
//!
//! - `active`: anchor factions still alive. Only ever shrinks within a turn.
//! - `counter`: faction credit currently on offer, from the anchor and from
//!   defense cards. Entries never sit at zero.
//! - `buffer`: defense-origin credit saved across the last extension.
//! - `used`: per defense card, the factions already spent on a branch.
//!
//! ## Extending
//!
//! `FactionChain::extend` is the single transformation. It returns a new
//! chain or a rejection and never touches `self`:
//!
//! ```
//! use faction_durak::cards::{CardCatalog, CardDefinition, CardId, FactionId};
//! use faction_durak::factions::{ChainPath, FactionChain};
//! use faction_durak::table::Table;
//!
//! let mut catalog = CardCatalog::new();
//! for f in 1..=3 {
//!     catalog.register_faction(FactionId::new(f), format!("F{f}"));
//! }
//! let anchor = CardDefinition::new(CardId::new(0), "Anchor", 60)
//!     .with_factions(&[FactionId::new(1), FactionId::new(2)]);
//! let stray = CardDefinition::new(CardId::new(1), "Stray", 70)
//!     .with_faction(FactionId::new(3));
//!
//! let table = Table::new(6);
//! let chain = FactionChain::new()
//!     .extend(&anchor, ChainPath::Anchor, &table, &catalog)
//!     .unwrap();
//!
//! let mut table = table;
//! table.place_attack(anchor.id).unwrap();
//! assert!(chain.extend(&stray, ChainPath::Anchor, &table, &catalog).is_err());
//! ```

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardDefinition, CardId, FactionId};
use crate::core::GameError;
use crate::table::Table;

/// How a new attack card joins the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainPath {
    /// Share a faction with the anchor lineage.
    Anchor,
    /// Share an unused faction with the defense card in this slot.
    ThroughDefense { slot: usize },
}

impl ChainPath {
    /// `None` targets the anchor, `Some(slot)` the defense card there.
    #[must_use]
    pub fn from_target(target_slot: Option<usize>) -> Self {
        target_slot.map_or(ChainPath::Anchor, |slot| ChainPath::ThroughDefense { slot })
    }
}

/// Faction bookkeeping for one turn's attack row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionChain {
    active: OrdSet<FactionId>,
    counter: OrdMap<FactionId, u32>,
    buffer: OrdMap<FactionId, u32>,
    used: OrdMap<CardId, OrdSet<FactionId>>,
}

impl FactionChain {
    /// An empty chain, as at the start of every turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor factions still alive.
    #[must_use]
    pub fn active(&self) -> &OrdSet<FactionId> {
        &self.active
    }

    #[must_use]
    pub fn counter(&self) -> &OrdMap<FactionId, u32> {
        &self.counter
    }

    #[must_use]
    pub fn count(&self, faction: FactionId) -> u32 {
        self.counter.get(&faction).copied().unwrap_or(0)
    }

    /// Defense-origin credit saved by the last extension.
    #[must_use]
    pub fn buffer(&self) -> &OrdMap<FactionId, u32> {
        &self.buffer
    }

    /// Factions of `defense` already spent on a branch.
    #[must_use]
    pub fn used_for(&self, defense: CardId) -> OrdSet<FactionId> {
        self.used.get(&defense).cloned().unwrap_or_default()
    }

    /// Factions of `defense` still open for branching, in card order.
    #[must_use]
    pub fn available_for(&self, defense: &CardDefinition) -> Vec<FactionId> {
        let used = self.used.get(&defense.id);
        defense
            .factions
            .iter()
            .copied()
            .filter(|f| used.map_or(true, |u| !u.contains(f)))
            .collect()
    }

    /// Factions with positive credit, in id order.
    pub fn credited(&self) -> impl Iterator<Item = FactionId> + '_ {
        self.counter.keys().copied()
    }

    /// Add `card` to the attack row along `path`.
    ///
    /// `table` is the table before the card lands. A full row or a card with
    /// no admissible faction is rejected and the chain stays as it was.
    pub fn extend(
        &self,
        card: &CardDefinition,
        path: ChainPath,
        table: &Table,
        catalog: &CardCatalog,
    ) -> Result<Self, GameError> {
        if table.is_full() {
            return Err(GameError::TableFull {
                capacity: table.capacity(),
            });
        }
        match path {
            ChainPath::Anchor if table.is_empty() => Ok(self.anchor(card)),
            ChainPath::Anchor => self.extend_from_anchor(card, catalog),
            ChainPath::ThroughDefense { slot } => {
                let defense_id = table
                    .defense_at(slot)
                    .ok_or(GameError::NoDefenseCardInSlot(slot))?;
                let defense = catalog
                    .get(defense_id)
                    .ok_or(GameError::UnknownCard(defense_id))?;
                self.extend_through_defense(card, defense, table, catalog)
            }
        }
    }

    /// Credit a defense card's factions. No-op once the attack row is full.
    #[must_use]
    pub fn record_defense(&self, defense: &CardDefinition, table: &Table) -> Self {
        let mut next = self.clone();
        if table.is_full() {
            return next;
        }
        for &f in &defense.factions {
            next.counter.insert(f, self.count(f) + 1);
        }
        next
    }

    fn anchor(&self, card: &CardDefinition) -> Self {
        let mut next = self.clone();
        next.active = card.factions.iter().copied().collect();
        for &f in &card.factions {
            next.counter.insert(f, next.count(f) + 1);
        }
        next
    }

    fn extend_from_anchor(
        &self,
        card: &CardDefinition,
        catalog: &CardCatalog,
    ) -> Result<Self, GameError> {
        let shared: OrdSet<FactionId> = card
            .shared_factions(|f| self.active.contains(&f))
            .collect();
        if shared.is_empty() {
            return Err(GameError::NoCommonFaction {
                active: catalog.faction_names(self.active.iter().copied()),
                offered: catalog.faction_names(card.factions.iter().copied()),
            });
        }

        let buffer = self.defense_credit();
        let mut counter: OrdMap<FactionId, u32> = self
            .counter
            .iter()
            .filter(|&(f, _)| shared.contains(f))
            .map(|(&f, &n)| (f, n))
            .collect();
        counter.extend(buffer.iter().map(|(&f, &n)| (f, n)));

        Ok(Self {
            active: shared,
            counter,
            buffer,
            used: self.used.clone(),
        })
    }

    fn extend_through_defense(
        &self,
        card: &CardDefinition,
        defense: &CardDefinition,
        table: &Table,
        catalog: &CardCatalog,
    ) -> Result<Self, GameError> {
        let available = self.available_for(defense);
        let shared: OrdSet<FactionId> = card
            .shared_factions(|f| available.contains(&f))
            .collect();
        if shared.is_empty() {
            return Err(GameError::DefenseFactionsExhausted {
                defense: defense.id,
                offered: catalog.faction_names(card.factions.iter().copied()),
                available: catalog.faction_names(available),
                exhausted: catalog.faction_names(self.used_for(defense.id)),
            });
        }

        let buffer = self.defense_credit();

        let mut counter: OrdMap<FactionId, u32> = self
            .counter
            .iter()
            .filter(|&(f, _)| self.active.contains(f) || shared.contains(f))
            .map(|(&f, &n)| (f, n))
            .collect();
        for f in &defense.factions {
            if let Some(n) = counter.get(f).copied() {
                if n <= 1 {
                    counter.remove(f);
                } else {
                    counter.insert(*f, n - 1);
                }
            }
        }

        let spent: OrdSet<FactionId> = defense
            .factions
            .iter()
            .copied()
            .filter(|f| !shared.contains(f))
            .collect();
        let mut used = self.used.clone();
        used.insert(defense.id, self.used_for(defense.id).union(spent));

        let kept: OrdMap<FactionId, u32> = buffer
            .into_iter()
            .filter(|(f, _)| {
                shared.contains(f)
                    || !defense.has_faction(*f)
                    || self.other_defense_has(*f, defense.id, table, catalog)
            })
            .collect();
        counter.extend(kept.iter().map(|(&f, &n)| (f, n)));

        Ok(Self {
            active: self.active.clone(),
            counter,
            buffer: kept,
            used,
        })
    }

    /// Counter entries that did not come from the anchor lineage.
    fn defense_credit(&self) -> OrdMap<FactionId, u32> {
        self.counter
            .iter()
            .filter(|&(f, &n)| !self.active.contains(f) && n > 0)
            .map(|(&f, &n)| (f, n))
            .collect()
    }

    fn other_defense_has(
        &self,
        faction: FactionId,
        consumed: CardId,
        table: &Table,
        catalog: &CardCatalog,
    ) -> bool {
        table
            .defenses()
            .filter(|&(_, id)| id != consumed)
            .filter_map(|(_, id)| catalog.get(id))
            .any(|c| c.has_faction(faction))
    }
}
