//! Card definitions - static card data.
//!
//! Every card in the catalog is unique, so a `CardId` identifies both the
//! card type and the single physical instance of it in play.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Unique identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Faction tag. Factions are a flat lookup with no hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u16);

impl FactionId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for FactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Faction({})", self.0)
    }
}

/// Faction list of a card. Most cards carry one to three factions.
pub type FactionList = SmallVec<[FactionId; 4]>;

/// Static card definition.
///
/// ## Example
///
/// ```
/// use faction_durak::cards::{CardDefinition, CardId, FactionId};
///
/// let ace = CardDefinition::new(CardId::new(11), "Ace", 95)
///     .with_faction(FactionId::new(2))
///     .with_faction(FactionId::new(7));
///
/// assert!(ace.has_faction(FactionId::new(7)));
/// assert_eq!(ace.factions.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub power: u32,
    #[serde(default)]
    pub factions: FactionList,
}

impl CardDefinition {
    /// Create a new card definition with no factions.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, power: u32) -> Self {
        Self {
            id,
            name: name.into(),
            power,
            factions: FactionList::new(),
        }
    }

    /// Add a faction (builder pattern). Repeated factions are ignored.
    #[must_use]
    pub fn with_faction(mut self, faction: FactionId) -> Self {
        if !self.factions.contains(&faction) {
            self.factions.push(faction);
        }
        self
    }

    /// Add several factions (builder pattern).
    #[must_use]
    pub fn with_factions(self, factions: &[FactionId]) -> Self {
        factions.iter().fold(self, |card, &f| card.with_faction(f))
    }

    #[must_use]
    pub fn has_faction(&self, faction: FactionId) -> bool {
        self.factions.contains(&faction)
    }

    /// Factions of this card that also appear in `others`, in card order.
    pub fn shared_factions<'a>(
        &'a self,
        others: impl Fn(FactionId) -> bool + 'a,
    ) -> impl Iterator<Item = FactionId> + 'a {
        self.factions.iter().copied().filter(move |&f| others(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Card(5)");
    }

    #[test]
    fn test_faction_id() {
        let id = FactionId::new(12);
        assert_eq!(id.raw(), 12);
        assert_eq!(format!("{}", id), "Faction(12)");
    }

    #[test]
    fn test_with_faction_deduplicates() {
        let card = CardDefinition::new(CardId::new(1), "Zoro", 95)
            .with_faction(FactionId::new(1))
            .with_faction(FactionId::new(1));

        assert_eq!(card.factions.as_slice(), &[FactionId::new(1)]);
    }

    #[test]
    fn test_shared_factions() {
        let card = CardDefinition::new(CardId::new(1), "Robin", 75)
            .with_factions(&[FactionId::new(1), FactionId::new(9), FactionId::new(14)]);

        let shared: Vec<_> = card
            .shared_factions(|f| f == FactionId::new(14) || f == FactionId::new(1))
            .collect();
        assert_eq!(shared, vec![FactionId::new(1), FactionId::new(14)]);
    }

    #[test]
    fn test_serialization() {
        let card = CardDefinition::new(CardId::new(3), "Usopp", 65).with_faction(FactionId::new(1));
        let json = serde_json::to_string(&card).unwrap();
        let back: CardDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
