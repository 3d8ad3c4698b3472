//! Battle event types.
//!
//! Every state change a round makes is reported as a `BattleEvent`. The
//! engine never renders anything; a presentation layer replays the events
//! (or just the latest round's slice) to update its view and log.

use serde::{Deserialize, Serialize};

use crate::combat::ComboMatch;
use crate::core::{EntityId, Side};
use crate::zones::SlotKey;

/// Final result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOutcome {
    PlayerWins,
    EnemyWins,
    Draw,
}

impl GameOutcome {
    /// The winning side, if any.
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::PlayerWins => Some(Side::Player),
            GameOutcome::EnemyWins => Some(Side::Enemy),
            GameOutcome::Draw => None,
        }
    }

    /// Outcome when `loser` has run out of cards.
    #[must_use]
    pub fn defeat_of(loser: Side) -> Self {
        match loser {
            Side::Player => GameOutcome::EnemyWins,
            Side::Enemy => GameOutcome::PlayerWins,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::PlayerWins => write!(f, "player wins"),
            GameOutcome::EnemyWins => write!(f, "enemy wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// What dealt a `CardDamaged` hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DamageSource {
    /// A regular attack by this card.
    Attack(EntityId),
    /// Flat triple-combo damage.
    TripleCombo,
}

/// Why an action was skipped rather than performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The acting side has no card in its battle zone.
    NoAttacker,
    /// The opposing side has no card in its battle zone.
    NoDefender,
    /// No card in hand fits an open slot.
    NoPlaceableCard,
    /// The enemy policy made no usable choice.
    Declined,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SkipReason::NoAttacker => "no card available to attack",
            SkipReason::NoDefender => "no card available to defend",
            SkipReason::NoPlaceableCard => "no card in hand fits an open slot",
            SkipReason::Declined => "no usable choice was made",
        };
        f.write_str(text)
    }
}

/// Something that happened during a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
    },
    CardPlaced {
        side: Side,
        card: EntityId,
        slot: SlotKey,
    },
    /// `side` owns the damaged card.
    CardDamaged {
        side: Side,
        target: EntityId,
        source: DamageSource,
        damage: u32,
        remaining_hp: u32,
    },
    CardDefeated {
        side: Side,
        card: EntityId,
        slot: SlotKey,
    },
    ComboTriggered {
        side: Side,
        combo: ComboMatch,
    },
    CardDrawn {
        side: Side,
        card: EntityId,
    },
    AttackSkipped {
        side: Side,
        reason: SkipReason,
    },
    PlacementSkipped {
        side: Side,
        reason: SkipReason,
    },
    GameEnded {
        outcome: GameOutcome,
    },
}

impl BattleEvent {
    /// The side this event concerns, if it concerns one.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        match self {
            BattleEvent::CardPlaced { side, .. }
            | BattleEvent::CardDamaged { side, .. }
            | BattleEvent::CardDefeated { side, .. }
            | BattleEvent::ComboTriggered { side, .. }
            | BattleEvent::CardDrawn { side, .. }
            | BattleEvent::AttackSkipped { side, .. }
            | BattleEvent::PlacementSkipped { side, .. } => Some(*side),
            BattleEvent::RoundStarted { .. } | BattleEvent::GameEnded { .. } => None,
        }
    }

    #[must_use]
    pub fn is_damage(&self) -> bool {
        matches!(self, BattleEvent::CardDamaged { .. })
    }

    #[must_use]
    pub fn is_defeat(&self) -> bool {
        matches!(self, BattleEvent::CardDefeated { .. })
    }

    #[must_use]
    pub fn is_combo(&self) -> bool {
        matches!(self, BattleEvent::ComboTriggered { .. })
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, BattleEvent::CardDrawn { .. })
    }
}
