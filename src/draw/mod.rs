//! Post-turn replenishment.
//!
//! Players who attacked are queued at the front (the latest attacker draws
//! first); players who defended are queued at the back. At the turn
//! boundary the queue drains and each player draws from the front of the
//! deck up to the hand size. Order only matters when the deck runs short.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{PlayerId, PlayerMap};

/// Players owed cards at the next turn boundary.
///
/// ```
/// use faction_durak::core::PlayerId;
/// use faction_durak::draw::DrawQueue;
///
/// let mut queue = DrawQueue::new();
/// queue.push_defender(PlayerId::new(1));
/// queue.push_attacker(PlayerId::new(0));
/// queue.push_attacker(PlayerId::new(2));
///
/// let order: Vec<_> = queue.iter().collect();
/// assert_eq!(order, vec![PlayerId::new(2), PlayerId::new(0), PlayerId::new(1)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawQueue {
    queue: Vector<PlayerId>,
}

impl DrawQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an attacker at the front, moving them if already queued.
    pub fn push_attacker(&mut self, player: PlayerId) {
        if let Some(i) = self.queue.index_of(&player) {
            self.queue.remove(i);
        }
        self.queue.push_front(player);
    }

    /// Queue a defender at the back, unless already queued.
    pub fn push_defender(&mut self, player: PlayerId) {
        if !self.queue.contains(&player) {
            self.queue.push_back(player);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.queue.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.queue.contains(&player)
    }

    /// Empty the queue, returning it in draw order.
    pub fn drain(&mut self) -> Vector<PlayerId> {
        std::mem::take(&mut self.queue)
    }
}

/// One card handed out during replenishment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drawn {
    pub player: PlayerId,
    pub card: CardId,
}

/// Drain `queue`, topping each hand up to `hand_size` from the deck front.
///
/// Returns the cards handed out, in order.
pub fn replenish(
    queue: &mut DrawQueue,
    hands: &mut PlayerMap<Vector<CardId>>,
    deck: &mut Vector<CardId>,
    hand_size: usize,
) -> Vec<Drawn> {
    let mut drawn = Vec::new();
    for player in queue.drain() {
        let Some(hand) = hands.try_get(player).map(Vector::len) else {
            continue;
        };
        for _ in hand..hand_size {
            let Some(card) = deck.pop_front() else {
                return drawn;
            };
            hands[player].push_back(card);
            drawn.push(Drawn { player, card });
        }
    }
    drawn
}
