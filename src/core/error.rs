//! Error types.
//!
//! - `GameError`: a rejected intent. Always recoverable; the state the
//!   intent was applied to is left untouched.
//! - `SetupError`: a table that cannot be dealt or a malformed catalog or
//!   configuration. Fails game start outright.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::{CardId, FactionId};
use crate::roles::Role;
use crate::turn::AttackRole;

/// Rule violation reported back to the acting player.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,

    #[error("{0} is not seated at this table")]
    UnknownPlayer(PlayerId),

    #[error("{0} is not in the catalog")]
    UnknownCard(CardId),

    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: CardId },

    #[error("{player} is the {role} and cannot {action}")]
    WrongRole {
        player: PlayerId,
        role: Role,
        action: &'static str,
    },

    #[error("attack priority belongs to the {holder}")]
    NotYourPriority { holder: AttackRole },

    #[error("the co-attacker must wait until the attacker has played")]
    MainAttackerFirst,

    #[error("no attack card has been played this turn")]
    NoAttackYet,

    #[error("the {0} has already declined further attacks this turn")]
    AlreadyDeclined(AttackRole),

    #[error("attack row full ({capacity} cards)")]
    TableFull { capacity: usize },

    #[error("slot {slot} does not exist (table holds {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },

    #[error(
        "card lacks a faction in common with {{{}}} (card factions: {})",
        .active.join(", "),
        .offered.join(", ")
    )]
    NoCommonFaction {
        active: Vec<String>,
        offered: Vec<String>,
    },

    #[error(
        "defense card {defense} offers no unused faction of the attack card \
         (card factions: {}; still available: {}; exhausted: {})",
        .offered.join(", "),
        .available.join(", "),
        .exhausted.join(", ")
    )]
    DefenseFactionsExhausted {
        defense: CardId,
        offered: Vec<String>,
        available: Vec<String>,
        exhausted: Vec<String>,
    },

    #[error("no defense card lies in slot {0}")]
    NoDefenseCardInSlot(usize),

    #[error("attack slot {0} is empty")]
    EmptyAttackSlot(usize),

    #[error("slot {0} is already defended")]
    DefenseSlotTaken(usize),

    #[error("defense power {power} below required {required}")]
    InsufficientPower { power: u32, required: u32 },

    #[error("undefended attack cards remain on the table")]
    UndefendedCardsRemain,

    #[error("no undefended cards to act on")]
    NoUndefendedCards,

    #[error("the {0} has already pressed Bito this cycle")]
    BitoAlreadyPressed(AttackRole),

    #[error("there is no active co-attacker to yield priority to")]
    NoPartnerToYieldTo,

    #[error("the deck is empty")]
    DeckEmpty,

    #[error("hand already holds {size} cards")]
    HandFull { size: usize },

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Fatal setup failure.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("catalog holds {available} cards but {required} are needed to deal {players} hands")]
    NotEnoughCards {
        required: usize,
        available: usize,
        players: usize,
    },

    #[error("{count} players cannot sit at a table for {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("{0} registered twice")]
    DuplicateCard(CardId),

    #[error("{card} has power {power} outside {min}..={max}")]
    PowerOutOfRange {
        card: CardId,
        power: u32,
        min: u32,
        max: u32,
    },

    #[error("{card} references unknown faction {faction}")]
    UnknownFaction { card: CardId, faction: FactionId },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_message_names_threshold() {
        let err = GameError::InsufficientPower {
            power: 55,
            required: 60,
        };
        assert_eq!(err.to_string(), "defense power 55 below required 60");
    }

    #[test]
    fn test_faction_conflict_lists_names() {
        let err = GameError::NoCommonFaction {
            active: vec!["Marines".into(), "Yonko".into()],
            offered: vec!["Giants".into()],
        };
        assert_eq!(
            err.to_string(),
            "card lacks a faction in common with {Marines, Yonko} (card factions: Giants)"
        );
    }

    #[test]
    fn test_wrong_role_message() {
        let err = GameError::WrongRole {
            player: PlayerId::new(2),
            role: Role::Observer,
            action: "attack",
        };
        assert_eq!(err.to_string(), "Player 2 is the observer and cannot attack");
    }

    #[test]
    fn test_setup_error_is_wrapped_transparently() {
        let setup = SetupError::NotEnoughCards {
            required: 18,
            available: 16,
            players: 3,
        };
        let expected = setup.to_string();
        let err: GameError = setup.into();
        assert_eq!(err.to_string(), expected);
    }
}
