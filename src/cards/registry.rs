//! Card catalog for definition and faction-name lookup.
//!
//! The `CardCatalog` stores every card of a game plus the display name of
//! each faction. Cards keep their insertion order, which is the order the
//! deck is built in before shuffling.

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::definition::{CardDefinition, CardId, FactionId};
use crate::core::{RulesConfig, SetupError};

/// Registry of card definitions and faction names.
///
/// ## Example
///
/// ```
/// use faction_durak::cards::{CardCatalog, CardDefinition, CardId, FactionId};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register_faction(FactionId::new(6), "Marines");
/// catalog.register(
///     CardDefinition::new(CardId::new(1), "Garp", 96).with_faction(FactionId::new(6)),
/// );
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().power, 96);
/// assert_eq!(catalog.faction_name(FactionId::new(6)), "Marines");
/// assert_eq!(catalog.faction_name(FactionId::new(40)), "Unknown Faction 40");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    index: FxHashMap<CardId, usize>,
    factions: FxHashMap<FactionId, String>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if let Err(err) = self.try_register(card) {
            panic!("{err}");
        }
    }

    /// Register a card definition, rejecting duplicate IDs.
    pub fn try_register(&mut self, card: CardDefinition) -> Result<(), SetupError> {
        if self.index.contains_key(&card.id) {
            return Err(SetupError::DuplicateCard(card.id));
        }
        self.index.insert(card.id, self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    /// Name a faction. Re-registering replaces the name.
    pub fn register_faction(&mut self, id: FactionId, name: impl Into<String>) {
        self.factions.insert(id, name.into());
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// All card IDs in registration order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    /// Power of a card, `None` if it is not in the catalog.
    #[must_use]
    pub fn power(&self, id: CardId) -> Option<u32> {
        self.get(id).map(|c| c.power)
    }

    /// Display name of a faction, with a fallback for unnamed ids.
    #[must_use]
    pub fn faction_name(&self, id: FactionId) -> Cow<'_, str> {
        match self.factions.get(&id) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("Unknown Faction {}", id.raw())),
        }
    }

    /// Display names for a set of factions, in the order given.
    pub fn faction_names(&self, ids: impl IntoIterator<Item = FactionId>) -> Vec<String> {
        ids.into_iter()
            .map(|f| self.faction_name(f).into_owned())
            .collect()
    }

    #[must_use]
    pub fn faction_count(&self) -> usize {
        self.factions.len()
    }

    /// Check every card against the configured power range and the faction
    /// table.
    pub fn validate(&self, config: &RulesConfig) -> Result<(), SetupError> {
        for card in &self.cards {
            if card.power < config.min_card_power || card.power > config.max_card_power {
                return Err(SetupError::PowerOutOfRange {
                    card: card.id,
                    power: card.power,
                    min: config.min_card_power,
                    max: config.max_card_power,
                });
            }
            let unknown = card
                .factions
                .iter()
                .find(|&&f| !self.factions.contains_key(&f));
            if let Some(&faction) = unknown {
                return Err(SetupError::UnknownFaction {
                    card: card.id,
                    faction,
                });
            }
        }
        Ok(())
    }

    /// Load a catalog from JSON.
    ///
    /// ```
    /// use faction_durak::cards::{CardCatalog, CardId};
    ///
    /// let catalog = CardCatalog::from_json(r#"{
    ///     "factions": [{ "id": 1, "name": "Straw Hat Pirates" }],
    ///     "cards": [{ "id": 0, "name": "Luffy", "power": 100, "factions": [1] }]
    /// }"#).unwrap();
    ///
    /// assert_eq!(catalog.get(CardId::new(0)).unwrap().name, "Luffy");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for faction in file.factions {
            catalog.register_faction(faction.id, faction.name);
        }
        for card in file.cards {
            catalog.try_register(card)?;
        }
        Ok(catalog)
    }

    /// The built-in catalog: 24 factions and 16 cards.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for (id, name) in STANDARD_FACTIONS {
            catalog.register_faction(FactionId::new(*id), *name);
        }
        for (id, name, power, factions) in STANDARD_CARDS {
            let factions: Vec<FactionId> = factions.iter().map(|&f| FactionId::new(f)).collect();
            catalog.register(
                CardDefinition::new(CardId::new(*id), *name, *power).with_factions(&factions),
            );
        }
        catalog
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    factions: Vec<FactionEntry>,
    cards: Vec<CardDefinition>,
}

#[derive(Deserialize)]
struct FactionEntry {
    id: FactionId,
    name: String,
}

const STANDARD_FACTIONS: &[(u16, &str)] = &[
    (1, "Roger's Pirates"),
    (2, "Whitebeard's Pirates"),
    (3, "Yonko"),
    (4, "Shichibukai"),
    (5, "Worst Generation"),
    (6, "Marines"),
    (7, "Monkey family"),
    (8, "Adopted and Honorary"),
    (9, "Revolutionary Army"),
    (10, "Red Hair Pirates"),
    (11, "Cross Guild"),
    (12, "Straw Hat Pirates"),
    (13, "Kuja Pirates"),
    (14, "Baroque Works"),
    (15, "Fish-men"),
    (16, "Father-Son"),
    (17, "Skypiea"),
    (18, "Kid Pirates"),
    (19, "Baratie crew"),
    (20, "Black Cat Pirates"),
    (21, "Giants"),
    (22, "Arlong's Pirates"),
    (23, "Baratie Arc"),
    (24, "Blackbeard's Pirates"),
];

const STANDARD_CARDS: &[(u32, &str, u32, &[u16])] = &[
    (0, "Luffy", 100, &[1]),
    (1, "Zoro", 95, &[1]),
    (2, "Nami", 70, &[1]),
    (3, "Usopp", 65, &[1]),
    (4, "Sanji", 85, &[1]),
    (5, "Chopper", 60, &[1]),
    (6, "Robin", 75, &[1]),
    (7, "Franky", 80, &[1]),
    (8, "Brook", 75, &[1]),
    (9, "Jinbe", 90, &[1]),
    (10, "Vivi", 55, &[1]),
    (11, "Ace", 95, &[2]),
    (12, "Sabo", 90, &[2]),
    (13, "Shanks", 100, &[3]),
    (14, "Mihawk", 98, &[3]),
    (15, "Whitebeard", 100, &[3]),
];
