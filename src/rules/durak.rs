//! The faction durak rules.
//!
//! Every intent runs against a clone of the current snapshot. Validation
//! happens before any mutation that could fail half-way, and a rejected
//! intent simply drops the clone, so the caller's state never changes.

use tracing::{debug, info};

use crate::cards::{CardCatalog, CardDefinition, CardId};
use crate::core::{
    GameError, GameRng, GameState, Intent, IntentRecord, Phase, Player, PlayerId, PlayerMap,
    RulesConfig, SetupError,
};
use crate::deck;
use crate::draw;
use crate::factions::{ChainPath, FactionChain};
use crate::roles::{self, Role};
use crate::table;
use crate::turn::{AttackRole, Decline, TurnControl};

use super::engine::RulesEngine;
use super::outcome::detect_outcome;

/// Rules engine for faction durak.
///
/// ## Example
///
/// ```
/// use faction_durak::core::{Intent, PlayerId};
/// use faction_durak::roles::Role;
/// use faction_durak::rules::{DurakEngine, RulesEngine};
///
/// let engine = DurakEngine::standard();
/// let state = engine
///     .start_game(&["Ann".to_string(), "Bo".to_string()], Some(42))
///     .unwrap();
///
/// let attacker = state.holder(Role::Attacker).unwrap();
/// let card = state.hands[attacker][0];
/// let next = engine
///     .apply_intent(&state, &Intent::PlayAttackCard { player: attacker, card, target_slot: None })
///     .unwrap();
///
/// assert_eq!(next.table.attack_at(0), Some(card));
/// assert_eq!(state.table.attack_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct DurakEngine {
    catalog: CardCatalog,
    config: RulesConfig,
}

impl DurakEngine {
    /// Check the configuration and the catalog against it.
    pub fn new(catalog: CardCatalog, config: RulesConfig) -> Result<Self, SetupError> {
        config.validate()?;
        catalog.validate(&config)?;
        Ok(Self { catalog, config })
    }

    /// The built-in catalog under default rules.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            catalog: CardCatalog::standard(),
            config: RulesConfig::default(),
        }
    }

    fn deal(&self, names: &[String], seed: Option<u64>) -> Result<GameState, SetupError> {
        let count = names.len();
        if count < self.config.min_players || count > self.config.max_players {
            return Err(SetupError::PlayerCount {
                count,
                min: self.config.min_players,
                max: self.config.max_players,
            });
        }

        let mut rng = GameRng::from_optional_seed(seed);
        let cards: Vec<CardId> = self.catalog.ids().collect();
        let dealt = deck::deal(&cards, count, self.config.hand_size, &mut rng)?;
        let first = roles::determine_first_player(&dealt.hands, &self.catalog);
        let players = PlayerMap::new(count, |p| Player::new(p, names[p.index()].clone()));

        let state = GameState::new(players, dealt, first, rng.seed(), self.config.table_capacity);
        info!(
            players = count,
            seed = state.seed,
            first_player = ?first.map(|fp| fp.player),
            deck = state.deck.len(),
            "game started"
        );
        Ok(state)
    }

    fn card(&self, card: CardId) -> Result<&CardDefinition, GameError> {
        self.catalog.get(card).ok_or(GameError::UnknownCard(card))
    }

    fn attack_role(
        state: &GameState,
        player: PlayerId,
        action: &'static str,
    ) -> Result<AttackRole, GameError> {
        let role = state.role_of(player)?;
        AttackRole::of(role).ok_or(GameError::WrongRole {
            player,
            role,
            action,
        })
    }

    fn require_defender(
        state: &GameState,
        player: PlayerId,
        action: &'static str,
    ) -> Result<(), GameError> {
        match state.role_of(player)? {
            Role::Defender => Ok(()),
            role => Err(GameError::WrongRole {
                player,
                role,
                action,
            }),
        }
    }

    fn hand_position(state: &GameState, player: PlayerId, card: CardId) -> Result<usize, GameError> {
        state
            .hands
            .try_get(player)
            .and_then(|hand| hand.index_of(&card))
            .ok_or(GameError::CardNotInHand { player, card })
    }

    fn play_attack(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card: CardId,
        target_slot: Option<usize>,
    ) -> Result<(), GameError> {
        let role = Self::attack_role(state, player, "attack")?;
        state.turn.check_attack(role)?;
        let position = Self::hand_position(state, player, card)?;
        let definition = self.card(card)?;

        let path = ChainPath::from_target(target_slot);
        let chain = state
            .chain
            .extend(definition, path, &state.table, &self.catalog)?;
        let slot = state.table.place_attack(card)?;

        state.hands[player].remove(position);
        state.chain = chain;
        state.turn.record_attack(role);
        state.draw_queue.push_attacker(player);
        debug!(%player, %card, slot, ?path, "attack card placed");
        Ok(())
    }

    fn play_defense(
        &self,
        state: &mut GameState,
        player: PlayerId,
        card: CardId,
        slot: usize,
    ) -> Result<(), GameError> {
        Self::require_defender(state, player, "defend")?;
        let position = Self::hand_position(state, player, card)?;
        let attack = state.table.check_defense_slot(slot)?;
        let defense = self.card(card)?;
        let attack_power = self.card(attack)?.power;
        table::validate_defense(defense.power, attack_power, &self.config)?;

        state.chain = state.chain.record_defense(defense, &state.table);
        state.table.bind_defense(slot, card)?;
        state.hands[player].remove(position);
        state.draw_queue.push_defender(player);
        debug!(%player, %card, slot, %attack, "defense card placed");
        Ok(())
    }

    fn decline(&self, state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        let role = Self::attack_role(state, player, "decline further attacks")?;
        let (turn, outcome) =
            state
                .turn
                .decline(role, state.has_co_attacker(), state.table.has_undefended())?;
        state.turn = turn;
        debug!(%player, %role, ?outcome, "pas");
        if outcome == Decline::TurnOver {
            self.end_turn(state);
        }
        Ok(())
    }

    fn yield_priority(&self, state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        let role = Self::attack_role(state, player, "yield priority")?;
        state.turn =
            state
                .turn
                .yield_priority(role, state.has_co_attacker(), state.table.has_undefended())?;
        debug!(%player, %role, "bito");
        Ok(())
    }

    fn take_cards(&self, state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        Self::require_defender(state, player, "take cards")?;
        if !state.table.has_undefended() {
            return Err(GameError::NoUndefendedCards);
        }

        let taken = state.table.clear();
        info!(%player, taken = taken.len(), turn = state.turn_number, "defender takes the table");
        state.hands[player].extend(taken);
        state.roles = roles::rotate_after_take(&state.roles);
        state.draw_queue.push_defender(player);
        self.close_turn(state);
        Ok(())
    }

    fn draw_card(&self, state: &mut GameState, player: PlayerId) -> Result<(), GameError> {
        state.role_of(player)?;
        let held = state.hands[player].len();
        if held >= self.config.hand_size {
            return Err(GameError::HandFull {
                size: self.config.hand_size,
            });
        }
        let card = state.deck.pop_front().ok_or(GameError::DeckEmpty)?;
        state.hands[player].push_back(card);
        debug!(%player, %card, left = state.deck.len(), "card drawn");

        if state.deck.is_empty() {
            self.check_outcome(state);
        }
        Ok(())
    }

    /// Successful defense: discard the table and rotate.
    fn end_turn(&self, state: &mut GameState) {
        let discarded = state.table.clear();
        info!(
            turn = state.turn_number,
            discarded = discarded.len(),
            "turn ends with a successful defense"
        );
        state.discard.extend(discarded);
        state.roles = roles::rotate_after_defense(&state.roles);
        self.close_turn(state);
    }

    /// Shared tail of both turn endings: fresh turn state, replenishment,
    /// and the win check.
    fn close_turn(&self, state: &mut GameState) {
        state.chain = FactionChain::new();
        state.turn = TurnControl::new();

        let mut queue = std::mem::take(&mut state.draw_queue);
        for drawn in draw::replenish(
            &mut queue,
            &mut state.hands,
            &mut state.deck,
            self.config.hand_size,
        ) {
            debug!(player = %drawn.player, card = %drawn.card, "card drawn");
        }

        state.turn_number += 1;
        self.check_outcome(state);
    }

    fn check_outcome(&self, state: &mut GameState) {
        if let Some(result) = detect_outcome(state) {
            info!(?result, turn = state.turn_number, "game over");
            state.phase = Phase::GameOver;
            state.outcome = Some(result);
        }
    }

    fn apply_play(&self, state: &mut GameState, intent: &Intent) -> Result<(), GameError> {
        match *intent {
            Intent::PlayAttackCard {
                player,
                card,
                target_slot,
            } => self.play_attack(state, player, card, target_slot),
            Intent::PlayDefenseCard { player, card, slot } => {
                self.play_defense(state, player, card, slot)
            }
            Intent::DeclineFurtherAttack { player } => self.decline(state, player),
            Intent::YieldPriority { player } => self.yield_priority(state, player),
            Intent::TakeCards { player } => self.take_cards(state, player),
            Intent::DrawCard { player } => self.draw_card(state, player),
            Intent::StartGame { ref players, seed } => {
                *state = self.start_game(players, seed)?;
                Ok(())
            }
        }
    }
}

impl RulesEngine for DurakEngine {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    fn start_game(&self, players: &[String], seed: Option<u64>) -> Result<GameState, GameError> {
        let mut state = self.deal(players, seed)?;
        let start = Intent::StartGame {
            players: players.to_vec(),
            seed: Some(state.seed),
        };
        state.history.push_back(IntentRecord::new(start, 0, 0));
        Ok(state)
    }

    fn apply_intent(&self, state: &GameState, intent: &Intent) -> Result<GameState, GameError> {
        let restart = matches!(intent, Intent::StartGame { .. });
        if state.is_over() && !restart {
            return Err(GameError::GameOver);
        }

        let mut next = state.clone();
        let turn = state.turn_number;
        match self.apply_play(&mut next, intent) {
            Ok(()) => {
                // A restart carries its own fresh history.
                if !restart {
                    let record = IntentRecord::new(intent.clone(), turn, state.sequence());
                    next.history.push_back(record);
                }
                Ok(next)
            }
            Err(err) => {
                debug!(
                    intent = intent.name(),
                    player = ?intent.player(),
                    reason = %err,
                    "intent rejected"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::FactionId;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{i}")).collect()
    }

    fn attacker(state: &GameState) -> PlayerId {
        state.holder(Role::Attacker).unwrap()
    }

    fn defender(state: &GameState) -> PlayerId {
        state.holder(Role::Defender).unwrap()
    }

    #[test]
    fn test_start_game_records_seed_and_first_player() {
        let engine = DurakEngine::standard();
        let state = engine.start_game(&names(2), Some(3)).unwrap();

        assert_eq!(state.seed, 3);
        assert_eq!(state.deck.len(), 4);
        let first = state.first_player.unwrap();
        assert_eq!(attacker(&state), first.player);
        assert!(state.hands[first.player].contains(&first.card));
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_standard_catalog_seats_two() {
        let engine = DurakEngine::standard();
        let err = engine.start_game(&names(3), Some(1)).unwrap_err();
        assert!(matches!(
            err,
            GameError::Setup(SetupError::NotEnoughCards { required: 18, .. })
        ));
    }

    #[test]
    fn test_player_count_bounds() {
        let engine = DurakEngine::standard();
        let err = engine.start_game(&names(1), None).unwrap_err();
        assert!(matches!(err, GameError::Setup(SetupError::PlayerCount { count: 1, .. })));
    }

    #[test]
    fn test_unseeded_game_keeps_its_seed() {
        let engine = DurakEngine::standard();
        let live = engine.start_game(&names(2), None).unwrap();
        let replay = engine.start_game(&names(2), Some(live.seed)).unwrap();
        assert_eq!(live.hands, replay.hands);
        assert_eq!(live.deck, replay.deck);
    }

    #[test]
    fn test_new_rejects_out_of_range_catalog() {
        let mut catalog = CardCatalog::new();
        catalog.register_faction(FactionId::new(1), "F1");
        catalog.register(
            CardDefinition::new(CardId::new(0), "Weak", 10).with_faction(FactionId::new(1)),
        );

        let err = DurakEngine::new(catalog, RulesConfig::default()).unwrap_err();
        assert!(matches!(err, SetupError::PowerOutOfRange { power: 10, .. }));
    }

    #[test]
    fn test_defender_cannot_attack() {
        let engine = DurakEngine::standard();
        let state = engine.start_game(&names(2), Some(8)).unwrap();
        let def = defender(&state);
        let card = state.hands[def][0];

        let err = engine
            .apply_intent(
                &state,
                &Intent::PlayAttackCard {
                    player: def,
                    card,
                    target_slot: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, GameError::WrongRole { role: Role::Defender, .. }));
    }

    #[test]
    fn test_card_must_be_in_hand() {
        let engine = DurakEngine::standard();
        let state = engine.start_game(&names(2), Some(8)).unwrap();
        let att = attacker(&state);
        let foreign = state.hands[defender(&state)][0];

        let err = engine
            .apply_intent(
                &state,
                &Intent::PlayAttackCard {
                    player: att,
                    card: foreign,
                    target_slot: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, GameError::CardNotInHand { .. }));
    }

    #[test]
    fn test_manual_draw_needs_room() {
        let engine = DurakEngine::standard();
        let state = engine.start_game(&names(2), Some(8)).unwrap();

        let err = engine
            .apply_intent(&state, &Intent::DrawCard { player: attacker(&state) })
            .unwrap_err();
        assert!(matches!(err, GameError::HandFull { size: 6 }));
    }

    #[test]
    fn test_history_grows_with_accepted_intents() {
        let engine = DurakEngine::standard();
        let state = engine.start_game(&names(2), Some(8)).unwrap();
        let att = attacker(&state);
        let card = state.hands[att][0];

        let next = engine
            .apply_intent(
                &state,
                &Intent::PlayAttackCard {
                    player: att,
                    card,
                    target_slot: None,
                },
            )
            .unwrap();

        let last = next.history.last().unwrap();
        assert_eq!(last.player, Some(att));
        assert_eq!(last.sequence, 1);
        assert_eq!(last.turn, 1);
    }

    #[test]
    fn test_restart_deals_a_new_game() {
        let engine = DurakEngine::standard();
        let state = engine.start_game(&names(2), Some(8)).unwrap();
        let restarted = engine
            .apply_intent(
                &state,
                &Intent::StartGame {
                    players: names(2),
                    seed: Some(9),
                },
            )
            .unwrap();

        assert_eq!(restarted.seed, 9);
        assert_eq!(restarted.turn_number, 1);
        assert_eq!(restarted.history.len(), 1);
    }
}
