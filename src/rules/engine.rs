//! Rules engine trait.
//!
//! The engine is a pure function of (state, intent): it either returns the
//! next state or rejects the intent with a reason. Collaborators (stores,
//! view layers) only ever talk to the game through this trait.

use serde::{Deserialize, Serialize};

use crate::cards::CardCatalog;
use crate::core::{GameError, GameState, Intent, PlayerId, RulesConfig};

/// Result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// One player was left holding cards.
    Durak {
        loser: PlayerId,
        winners: Vec<PlayerId>,
    },
    /// Everyone ran out of cards together.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Durak { winners, .. } => winners.contains(&player),
            GameResult::Draw => false,
        }
    }

    #[must_use]
    pub fn loser(&self) -> Option<PlayerId> {
        match self {
            GameResult::Durak { loser, .. } => Some(*loser),
            GameResult::Draw => None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_intent`: must leave `state` untouched and be deterministic
///   (the only randomness is the shuffle, seeded by `StartGame`)
/// - `is_terminal`: return `None` while the game continues
pub trait RulesEngine {
    fn config(&self) -> &RulesConfig;

    fn catalog(&self) -> &CardCatalog;

    /// Deal a fresh game. An unseeded game draws a seed and records it.
    fn start_game(&self, players: &[String], seed: Option<u64>) -> Result<GameState, GameError>;

    /// Validate `intent` against `state` and produce the next state.
    fn apply_intent(&self, state: &GameState, intent: &Intent) -> Result<GameState, GameError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.outcome.clone()
    }

    // === Convenience Methods ===

    /// Every intent shape `player` could submit right now, legal or not.
    fn candidate_intents(&self, state: &GameState, player: PlayerId) -> Vec<Intent> {
        let Some(hand) = state.hand(player) else {
            return Vec::new();
        };
        let defended: Vec<usize> = state.table.defenses().map(|(slot, _)| slot).collect();
        let open: Vec<usize> = state.table.undefended_slots().collect();

        let mut intents = Vec::new();
        for &card in hand {
            intents.push(Intent::PlayAttackCard {
                player,
                card,
                target_slot: None,
            });
            for &slot in &defended {
                intents.push(Intent::PlayAttackCard {
                    player,
                    card,
                    target_slot: Some(slot),
                });
            }
            for &slot in &open {
                intents.push(Intent::PlayDefenseCard { player, card, slot });
            }
        }
        intents.extend([
            Intent::DeclineFurtherAttack { player },
            Intent::YieldPriority { player },
            Intent::TakeCards { player },
            Intent::DrawCard { player },
        ]);
        intents
    }

    /// Enumerate all intents the engine would accept from `player`.
    fn legal_intents(&self, state: &GameState, player: PlayerId) -> Vec<Intent> {
        self.candidate_intents(state, player)
            .into_iter()
            .filter(|intent| self.apply_intent(state, intent).is_ok())
            .collect()
    }
}
