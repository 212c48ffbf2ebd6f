//! Game state snapshot.
//!
//! `GameState` is the whole rule-engine state as a plain record: no
//! behavior the view layer must call, and no view-only fields. It uses
//! `im` persistent collections, so the clone taken for every intent shares
//! structure with the previous snapshot.
//!
//! ## Card locations
//!
//! Every card of the catalog lives in exactly one of: a hand, an attack
//! slot, a defense slot, the deck, or the discard pile. `cards()` walks all
//! of them.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::intent::IntentRecord;
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::{CardCatalog, CardId};
use crate::deck::Dealt;
use crate::draw::DrawQueue;
use crate::factions::FactionChain;
use crate::roles::{self, FirstPlayer, Role};
use crate::rules::GameResult;
use crate::table::Table;
use crate::turn::TurnControl;

/// Whether the game still accepts play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Where the current turn stands, derived from the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStage {
    /// No attack card yet.
    AwaitingFirstAttack,
    /// At least one attack card is unanswered.
    Attacking,
    /// Every attack card is beaten; attackers may add more or decline.
    Resolved,
}

/// Complete rule-engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub players: PlayerMap<Player>,

    /// Seed of the deal, so any game can be replayed.
    pub seed: u64,

    pub roles: PlayerMap<Role>,
    pub first_player: Option<FirstPlayer>,

    // === Cards ===
    pub hands: PlayerMap<Vector<CardId>>,
    /// Shared draw pile, drawn from the front.
    pub deck: Vector<CardId>,
    pub discard: Vector<CardId>,
    pub table: Table,

    // === Turn ===
    pub chain: FactionChain,
    pub turn: TurnControl,
    pub draw_queue: DrawQueue,
    /// Starts at 1.
    pub turn_number: u32,

    pub outcome: Option<GameResult>,
    pub history: Vector<IntentRecord>,
}

impl GameState {
    /// Seat the players around a fresh deal.
    ///
    /// The first player attacks; with no catalogued card in any hand,
    /// seat 0 opens.
    #[must_use]
    pub fn new(
        players: PlayerMap<Player>,
        dealt: Dealt,
        first_player: Option<FirstPlayer>,
        seed: u64,
        table_capacity: usize,
    ) -> Self {
        let count = players.player_count();
        let opener = first_player.map_or(PlayerId::new(0), |fp| fp.player);

        Self {
            phase: Phase::Playing,
            players,
            seed,
            roles: roles::assign_roles(opener, count),
            first_player,
            hands: dealt.hands,
            deck: dealt.deck,
            discard: Vector::new(),
            table: Table::new(table_capacity),
            chain: FactionChain::new(),
            turn: TurnControl::new(),
            draw_queue: DrawQueue::new(),
            turn_number: 1,
            outcome: None,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Role of a seated player.
    pub fn role_of(&self, player: PlayerId) -> Result<Role, GameError> {
        self.roles
            .try_get(player)
            .copied()
            .ok_or(GameError::UnknownPlayer(player))
    }

    /// Seat holding `role`, if any.
    #[must_use]
    pub fn holder(&self, role: Role) -> Option<PlayerId> {
        roles::holder(&self.roles, role)
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&Vector<CardId>> {
        self.hands.try_get(player)
    }

    #[must_use]
    pub fn has_co_attacker(&self) -> bool {
        self.holder(Role::CoAttacker).is_some()
    }

    #[must_use]
    pub fn turn_stage(&self) -> TurnStage {
        if self.table.is_empty() {
            TurnStage::AwaitingFirstAttack
        } else if self.table.has_undefended() {
            TurnStage::Attacking
        } else {
            TurnStage::Resolved
        }
    }

    /// Names of every faction currently credited on the chain.
    #[must_use]
    pub fn active_faction_names(&self, catalog: &CardCatalog) -> Vec<String> {
        catalog.faction_names(self.chain.credited())
    }

    /// Every card in play or out of it: hands, table, deck, discard.
    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.hands
            .iter()
            .flat_map(|(_, hand)| hand.iter().copied())
            .chain(self.table.cards())
            .chain(self.deck.iter().copied())
            .chain(self.discard.iter().copied())
    }

    /// Number of accepted intents so far.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.history.len() as u64
    }
}
