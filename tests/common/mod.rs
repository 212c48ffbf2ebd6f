//! Table fixtures shared by the integration tests.
//!
//! Games here are seated by hand rather than shuffled, so every test knows
//! exactly which cards each player holds.

#![allow(dead_code)]

use faction_durak::cards::{CardCatalog, CardDefinition, CardId, FactionId};
use faction_durak::core::{GameState, Intent, Player, PlayerId, PlayerMap, RulesConfig};
use faction_durak::deck::Dealt;
use faction_durak::roles::{determine_first_player, Role};
use faction_durak::rules::{DurakEngine, RulesEngine};
use im::Vector;

pub const FACTIONS: [&str; 4] = ["Alpha", "Beta", "Gamma", "Delta"];

/// `(id, power, factions)`
pub type CardSpec<'a> = (u32, u32, &'a [u16]);

pub fn p(i: u8) -> PlayerId {
    PlayerId::new(i)
}

pub fn c(id: u32) -> CardId {
    CardId::new(id)
}

pub fn f(id: u16) -> FactionId {
    FactionId::new(id)
}

/// A catalog over factions 1..=4 named after `FACTIONS`.
pub fn catalog(cards: &[CardSpec<'_>]) -> CardCatalog {
    let mut catalog = CardCatalog::new();
    for (i, name) in FACTIONS.iter().enumerate() {
        catalog.register_faction(f(i as u16 + 1), *name);
    }
    for &(id, power, factions) in cards {
        let factions: Vec<FactionId> = factions.iter().copied().map(f).collect();
        catalog.register(
            CardDefinition::new(c(id), format!("Card {id}"), power).with_factions(&factions),
        );
    }
    catalog
}

pub fn engine(cards: &[CardSpec<'_>], hand_size: usize) -> DurakEngine {
    DurakEngine::new(catalog(cards), RulesConfig::default().with_hand_size(hand_size))
        .expect("fixture catalog is valid")
}

/// Seat `hands` around the table with `deck` left to draw.
pub fn seat(engine: &DurakEngine, hands: &[&[u32]], deck: &[u32]) -> GameState {
    let hands: Vec<Vector<CardId>> = hands
        .iter()
        .map(|hand| hand.iter().copied().map(c).collect())
        .collect();
    let count = hands.len();
    let dealt = Dealt {
        hands: PlayerMap::from_vec(hands),
        deck: deck.iter().copied().map(c).collect(),
    };
    let first = determine_first_player(&dealt.hands, engine.catalog());
    let players = PlayerMap::new(count, |p| Player::new(p, format!("P{}", p.index())));
    GameState::new(players, dealt, first, 0, engine.config().table_capacity)
}

/// Apply a run of intents, panicking on the first rejection.
pub fn play(engine: &DurakEngine, state: &GameState, intents: &[Intent]) -> GameState {
    intents.iter().fold(state.clone(), |state, intent| {
        engine
            .apply_intent(&state, intent)
            .unwrap_or_else(|err| panic!("{} rejected: {err}", intent.name()))
    })
}

pub fn roles(state: &GameState) -> Vec<Role> {
    state.roles.iter().map(|(_, &r)| r).collect()
}

pub fn hand(state: &GameState, player: PlayerId) -> Vec<u32> {
    state.hands[player].iter().map(|card| card.raw()).collect()
}

pub fn attack(player: PlayerId, card: u32) -> Intent {
    Intent::PlayAttackCard {
        player,
        card: c(card),
        target_slot: None,
    }
}

pub fn branch(player: PlayerId, card: u32, slot: usize) -> Intent {
    Intent::PlayAttackCard {
        player,
        card: c(card),
        target_slot: Some(slot),
    }
}

pub fn defend(player: PlayerId, card: u32, slot: usize) -> Intent {
    Intent::PlayDefenseCard {
        player,
        card: c(card),
        slot,
    }
}

pub fn pas(player: PlayerId) -> Intent {
    Intent::DeclineFurtherAttack { player }
}

pub fn bito(player: PlayerId) -> Intent {
    Intent::YieldPriority { player }
}

pub fn take(player: PlayerId) -> Intent {
    Intent::TakeCards { player }
}
