//! Role assignment and rotation.
//!
//! Every seated player holds exactly one role. Once the game has started
//! there is always one attacker and one defender; a co-attacker exists only
//! at tables of three or more; everyone else observes.
//!
//! ## Rotation
//!
//! Two events end a turn, and each has its own rotation:
//!
//! | players | successful defense                         | take-cards                                      |
//! |---------|--------------------------------------------|-------------------------------------------------|
//! | 2       | attacker and defender swap                 | unchanged                                       |
//! | 3       | attacker and defender swap                 | co-attacker attacks, attacker defends, defender co-attacks |
//! | 4+      | defender attacks, co-attacker defends, next seat co-attacks | co-attacker attacks, next two seats defend and co-attack |

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId};
use crate::core::{PlayerId, PlayerMap};

/// A player's part in the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Attacker,
    CoAttacker,
    Defender,
    Observer,
}

impl Role {
    /// Attacker or co-attacker.
    #[must_use]
    pub fn is_attacking(self) -> bool {
        matches!(self, Role::Attacker | Role::CoAttacker)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Attacker => "attacker",
            Role::CoAttacker => "co-attacker",
            Role::Defender => "defender",
            Role::Observer => "observer",
        };
        f.write_str(name)
    }
}

/// The player who opens the game, and the card that decided it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstPlayer {
    pub player: PlayerId,
    pub card: CardId,
    pub power: u32,
}

/// Find the holder of the weakest card dealt.
///
/// Ties on power go to the lowest card id, so the result never depends on
/// hand order. Returns `None` when no hand holds a catalogued card.
#[must_use]
pub fn determine_first_player(
    hands: &PlayerMap<Vector<CardId>>,
    catalog: &CardCatalog,
) -> Option<FirstPlayer> {
    hands
        .iter()
        .flat_map(|(player, hand)| {
            hand.iter().filter_map(move |&card| {
                catalog
                    .power(card)
                    .map(|power| FirstPlayer { player, card, power })
            })
        })
        .min_by_key(|fp| (fp.power, fp.card))
}

/// Assign roles relative to the first player in table order.
///
/// ```
/// use faction_durak::core::PlayerId;
/// use faction_durak::roles::{assign_roles, Role};
///
/// let roles = assign_roles(PlayerId::new(2), 4);
/// assert_eq!(roles[PlayerId::new(2)], Role::Attacker);
/// assert_eq!(roles[PlayerId::new(3)], Role::Defender);
/// assert_eq!(roles[PlayerId::new(0)], Role::CoAttacker);
/// assert_eq!(roles[PlayerId::new(1)], Role::Observer);
/// ```
#[must_use]
pub fn assign_roles(first: PlayerId, player_count: usize) -> PlayerMap<Role> {
    let mut roles = PlayerMap::with_value(player_count, Role::Observer);
    roles[first] = Role::Attacker;
    roles[first.offset(1, player_count)] = Role::Defender;
    if player_count >= 3 {
        roles[first.offset(2, player_count)] = Role::CoAttacker;
    }
    roles
}

/// Seat holding `role`, if any.
#[must_use]
pub fn holder(roles: &PlayerMap<Role>, role: Role) -> Option<PlayerId> {
    roles.find(|&r| r == role)
}

/// Rotate after the defender beat every attack.
#[must_use]
pub fn rotate_after_defense(roles: &PlayerMap<Role>) -> PlayerMap<Role> {
    let count = roles.player_count();
    let Some((attacker, defender)) = attack_pair(roles) else {
        return roles.clone();
    };

    match (count, holder(roles, Role::CoAttacker)) {
        (count, Some(co)) if count >= 4 => seat(count, defender, co, co.offset(1, count)),
        (_, co) => {
            let mut next = roles.clone();
            next[attacker] = Role::Defender;
            next[defender] = Role::Attacker;
            if let Some(co) = co {
                next[co] = Role::CoAttacker;
            }
            next
        }
    }
}

/// Rotate after the defender took the table.
#[must_use]
pub fn rotate_after_take(roles: &PlayerMap<Role>) -> PlayerMap<Role> {
    let count = roles.player_count();
    let pair = attack_pair(roles);
    let (Some((attacker, defender)), Some(co)) = (pair, holder(roles, Role::CoAttacker)) else {
        // Heads-up: the same defender keeps defending.
        return roles.clone();
    };

    if count == 3 {
        seat(count, co, attacker, defender)
    } else {
        seat(count, co, co.offset(1, count), co.offset(2, count))
    }
}

fn attack_pair(roles: &PlayerMap<Role>) -> Option<(PlayerId, PlayerId)> {
    Some((holder(roles, Role::Attacker)?, holder(roles, Role::Defender)?))
}

fn seat(count: usize, attacker: PlayerId, defender: PlayerId, co: PlayerId) -> PlayerMap<Role> {
    let mut roles = PlayerMap::with_value(count, Role::Observer);
    roles[attacker] = Role::Attacker;
    roles[defender] = Role::Defender;
    roles[co] = Role::CoAttacker;
    roles
}
