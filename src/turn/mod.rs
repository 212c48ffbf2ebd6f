//! Attack priority and the Bito/Pas protocol.
//!
//! Priority starts with the attacker each turn. The co-attacker joins only
//! after the attacker has played. Either attacking role may:
//!
//! - **Bito**: hand priority to the partner and keep attacking later. One
//!   press per cycle; pressing unlocks the partner's button.
//! - **Pas**: stop attacking for the rest of the turn.
//!
//! Both need every attack card on the table to be beaten. The turn ends
//! when both roles have passed, or at once when a heads-up attacker passes.

use serde::{Deserialize, Serialize};

use crate::core::GameError;
use crate::roles::Role;

/// One of the two roles allowed to attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackRole {
    Attacker,
    CoAttacker,
}

impl AttackRole {
    /// The attacking role of `role`, if it attacks at all.
    #[must_use]
    pub fn of(role: Role) -> Option<Self> {
        match role {
            Role::Attacker => Some(AttackRole::Attacker),
            Role::CoAttacker => Some(AttackRole::CoAttacker),
            Role::Defender | Role::Observer => None,
        }
    }

    #[must_use]
    pub fn partner(self) -> Self {
        match self {
            AttackRole::Attacker => AttackRole::CoAttacker,
            AttackRole::CoAttacker => AttackRole::Attacker,
        }
    }

    #[must_use]
    pub fn role(self) -> Role {
        match self {
            AttackRole::Attacker => Role::Attacker,
            AttackRole::CoAttacker => Role::CoAttacker,
        }
    }
}

impl std::fmt::Display for AttackRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.role(), f)
    }
}

/// Per-role flags, reset every turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideFlags {
    /// Pas pressed: no more attacks from this role this turn.
    pub declined: bool,
    /// Bito button locked until the partner presses theirs.
    pub bito_pressed: bool,
}

/// What a Pas did to the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decline {
    /// Every attacking role is out; resolve the turn.
    TurnOver,
    /// The partner attacks on.
    PriorityPassed(AttackRole),
}

/// Priority and button state of the current turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnControl {
    pub priority: AttackRole,
    pub main_attacker_has_played: bool,
    attacker: SideFlags,
    co_attacker: SideFlags,
}

impl Default for TurnControl {
    fn default() -> Self {
        Self {
            priority: AttackRole::Attacker,
            main_attacker_has_played: false,
            attacker: SideFlags::default(),
            co_attacker: SideFlags::default(),
        }
    }
}

impl TurnControl {
    /// Fresh flags for a new turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn side(&self, role: AttackRole) -> SideFlags {
        match role {
            AttackRole::Attacker => self.attacker,
            AttackRole::CoAttacker => self.co_attacker,
        }
    }

    fn side_mut(&mut self, role: AttackRole) -> &mut SideFlags {
        match role {
            AttackRole::Attacker => &mut self.attacker,
            AttackRole::CoAttacker => &mut self.co_attacker,
        }
    }

    #[must_use]
    pub fn has_declined(&self, role: AttackRole) -> bool {
        self.side(role).declined
    }

    /// The co-attacker waits for the attacker's first card, unless the
    /// attacker already passed.
    fn check_co_attacker_may_act(&self, role: AttackRole) -> Result<(), GameError> {
        if role == AttackRole::CoAttacker
            && !self.main_attacker_has_played
            && !self.attacker.declined
        {
            return Err(GameError::MainAttackerFirst);
        }
        Ok(())
    }

    /// Check that `role` may put an attack card down now.
    pub fn check_attack(&self, role: AttackRole) -> Result<(), GameError> {
        if self.has_declined(role) {
            return Err(GameError::AlreadyDeclined(role));
        }
        if role == AttackRole::CoAttacker && !self.main_attacker_has_played {
            return Err(GameError::MainAttackerFirst);
        }
        if self.priority != role {
            return Err(GameError::NotYourPriority {
                holder: self.priority,
            });
        }
        Ok(())
    }

    /// Note an accepted attack card.
    pub fn record_attack(&mut self, role: AttackRole) {
        if role == AttackRole::Attacker {
            self.main_attacker_has_played = true;
        }
    }

    /// Bito: pass priority to the partner.
    ///
    /// `has_partner` is false at a heads-up table.
    pub fn yield_priority(
        &self,
        role: AttackRole,
        has_partner: bool,
        undefended: bool,
    ) -> Result<Self, GameError> {
        if !has_partner {
            return Err(GameError::NoPartnerToYieldTo);
        }
        if !self.main_attacker_has_played {
            return Err(GameError::NoAttackYet);
        }
        if undefended {
            return Err(GameError::UndefendedCardsRemain);
        }
        if self.priority != role {
            return Err(GameError::NotYourPriority {
                holder: self.priority,
            });
        }
        if self.has_declined(role.partner()) {
            return Err(GameError::AlreadyDeclined(role.partner()));
        }
        if self.side(role).bito_pressed {
            return Err(GameError::BitoAlreadyPressed(role));
        }

        let mut next = self.clone();
        next.priority = role.partner();
        next.side_mut(role).bito_pressed = true;
        next.side_mut(role.partner()).bito_pressed = false;
        Ok(next)
    }

    /// Pas: `role` stops attacking for this turn.
    pub fn decline(
        &self,
        role: AttackRole,
        has_partner: bool,
        undefended: bool,
    ) -> Result<(Self, Decline), GameError> {
        if self.has_declined(role) {
            return Err(GameError::AlreadyDeclined(role));
        }
        self.check_co_attacker_may_act(role)?;
        if undefended {
            return Err(GameError::UndefendedCardsRemain);
        }

        let mut next = self.clone();
        next.side_mut(role).declined = true;

        if !has_partner || next.has_declined(role.partner()) {
            return Ok((next, Decline::TurnOver));
        }
        next.priority = role.partner();
        Ok((next, Decline::PriorityPassed(role.partner())))
    }
}
