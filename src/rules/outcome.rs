//! End-of-game detection.

use crate::core::{GameState, PlayerId};

use super::engine::GameResult;

/// The game ends once the deck is empty and at most one player still holds
/// cards. That player is the durak; everyone else wins. If nobody holds
/// cards the game is drawn.
#[must_use]
pub fn detect_outcome(state: &GameState) -> Option<GameResult> {
    if !state.deck.is_empty() {
        return None;
    }

    let holders: Vec<PlayerId> = state
        .hands
        .iter()
        .filter(|(_, hand)| !hand.is_empty())
        .map(|(p, _)| p)
        .collect();

    match holders.as_slice() {
        [] => Some(GameResult::Draw),
        [loser] => Some(GameResult::Durak {
            loser: *loser,
            winners: state
                .hands
                .player_ids()
                .filter(|p| p != loser)
                .collect(),
        }),
        _ => None,
    }
}
