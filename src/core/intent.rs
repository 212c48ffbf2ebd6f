//! Intents: the discrete requests a view layer sends to the engine.
//!
//! An intent names its actor and the card or slot it concerns. The engine
//! either accepts it, producing a new state, or rejects it with a reason.
//! Accepted intents are kept on the state as `IntentRecord`s.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::CardId;

/// A request to change the game.
///
/// ## Example
///
/// ```
/// use faction_durak::cards::CardId;
/// use faction_durak::core::{Intent, PlayerId};
///
/// // Attach through the defense card lying in slot 0.
/// let play = Intent::PlayAttackCard {
///     player: PlayerId::new(0),
///     card: CardId::new(4),
///     target_slot: Some(0),
/// };
/// assert_eq!(play.player(), Some(PlayerId::new(0)));
/// assert_eq!(play.name(), "play attack card");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Put an attack card in the next free slot. `target_slot` picks the
    /// defense card to branch through; `None` extends the anchor lineage.
    PlayAttackCard {
        player: PlayerId,
        card: CardId,
        target_slot: Option<usize>,
    },

    /// Beat the attack card in `slot`.
    PlayDefenseCard {
        player: PlayerId,
        card: CardId,
        slot: usize,
    },

    /// Pas.
    DeclineFurtherAttack { player: PlayerId },

    /// Bito.
    YieldPriority { player: PlayerId },

    /// The defender picks up every card on the table.
    TakeCards { player: PlayerId },

    /// Draw one card from the deck.
    DrawCard { player: PlayerId },

    /// Deal a new game for the given roster, in table order.
    StartGame {
        players: Vec<String>,
        seed: Option<u64>,
    },
}

impl Intent {
    /// The acting player. `StartGame` has none.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Intent::PlayAttackCard { player, .. }
            | Intent::PlayDefenseCard { player, .. }
            | Intent::DeclineFurtherAttack { player }
            | Intent::YieldPriority { player }
            | Intent::TakeCards { player }
            | Intent::DrawCard { player } => Some(*player),
            Intent::StartGame { .. } => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Intent::PlayAttackCard { .. } => "play attack card",
            Intent::PlayDefenseCard { .. } => "play defense card",
            Intent::DeclineFurtherAttack { .. } => "pas",
            Intent::YieldPriority { .. } => "bito",
            Intent::TakeCards { .. } => "take cards",
            Intent::DrawCard { .. } => "draw card",
            Intent::StartGame { .. } => "start game",
        }
    }
}

/// An accepted intent in the game's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    pub player: Option<PlayerId>,
    pub intent: Intent,
    /// Turn number the intent was applied in.
    pub turn: u32,
    /// Position in the game's history, starting at 0.
    pub sequence: u64,
}

impl IntentRecord {
    #[must_use]
    pub fn new(intent: Intent, turn: u32, sequence: u64) -> Self {
        Self {
            player: intent.player(),
            intent,
            turn,
            sequence,
        }
    }
}
