//! Shuffling and dealing.
//!
//! The catalog is shuffled once per game. Hands are dealt as contiguous
//! chunks of the shuffled order, one chunk per seat in table order; what is
//! left becomes the shared deck, drawn from the front.

use im::Vector;

use crate::cards::CardId;
use crate::core::{GameRng, PlayerMap, SetupError};

/// Hands and the remaining deck after the deal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dealt {
    pub hands: PlayerMap<Vector<CardId>>,
    pub deck: Vector<CardId>,
}

/// Shuffle `cards` and deal `hand_size` to each of `player_count` seats.
///
/// Fails when there are not enough cards to deal every hand in full.
///
/// ```
/// use faction_durak::cards::CardId;
/// use faction_durak::core::{GameRng, PlayerId};
/// use faction_durak::deck::deal;
///
/// let cards: Vec<_> = (0..16).map(CardId::new).collect();
/// let dealt = deal(&cards, 2, 6, &mut GameRng::new(7)).unwrap();
///
/// assert_eq!(dealt.hands[PlayerId::new(0)].len(), 6);
/// assert_eq!(dealt.deck.len(), 4);
/// ```
pub fn deal(
    cards: &[CardId],
    player_count: usize,
    hand_size: usize,
    rng: &mut GameRng,
) -> Result<Dealt, SetupError> {
    let required = hand_size * player_count;
    if cards.len() < required {
        return Err(SetupError::NotEnoughCards {
            required,
            available: cards.len(),
            players: player_count,
        });
    }

    let mut order = cards.to_vec();
    rng.shuffle(&mut order);

    let hands = PlayerMap::new(player_count, |player| {
        let start = player.index() * hand_size;
        order[start..start + hand_size].iter().copied().collect()
    });
    let deck = order[required..].iter().copied().collect();

    Ok(Dealt { hands, deck })
}
