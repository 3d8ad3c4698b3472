//! Turn controller.
//!
//! `TurnController` owns the `GameSession` and is the only way to change it.
//! A round has two phases:
//!
//! ## Placement
//!
//! Each side places at most one card from hand into the matching open slot.
//! The player must place if any card in hand fits; otherwise it passes with
//! `pass_placement`. Either way the enemy answers with its own placement, so
//! a card the enemy puts down can be selected as the defender.
//!
//! ## Combat
//!
//! `play_round` closes a placement phase still left open, then resolves, in
//! order:
//!
//! 1. Pair combos on both sides are reported.
//! 2. The player's selected attacker hits the selected defender
//!    (skipped if either zone is empty).
//! 3. Defeated cards are removed; a full player zone fires a triple combo.
//! 4. The enemy attacks with a card of its choosing, against a player card
//!    of its choosing. Its attack is boosted when its zone holds a pair
//!    combo.
//! 5. Defeated cards are removed; a full enemy zone fires a triple combo.
//! 6. Each side draws one card if its hand has room and its deck has cards.
//! 7. Placement flags and selections are cleared.
//!
//! The game ends after a round in which a side has neither deck nor hand
//! left.
//!
//! A rejected request (`Err`) changes nothing, with one exception: when
//! `play_round` had to pass the player's placement first, that pass (and
//! the enemy placement it triggers) stands even if the round is then
//! rejected. Every accepted change is reported as `BattleEvent`s, returned
//! to the caller and appended to the session history.

use serde::{Deserialize, Serialize};

use crate::combat::{apply_triple_combo, detect_pair_combo, pair_combos, triple_combo, DamageCalculator};
use crate::core::{EntityId, Side};
use crate::error::BattleError;
use crate::events::{BattleEvent, DamageSource, GameOutcome, SkipReason};
use crate::zones::SlotKey;

use super::enemy::{EnemyPolicy, RandomEnemy};
use super::state::GameSession;

/// Everything that happened in one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Number of the round that was played.
    pub round: u32,
    pub events: Vec<BattleEvent>,
    /// Set if the game ended with this round.
    pub outcome: Option<GameOutcome>,
}

impl RoundResult {
    pub fn damage_events(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter().filter(|e| e.is_damage())
    }

    pub fn defeats(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter().filter(|e| e.is_defeat())
    }

    pub fn combos(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter().filter(|e| e.is_combo())
    }

    pub fn draws(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter().filter(|e| e.is_draw())
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }
}

/// The player's half of combat, decided before anything is mutated.
enum PlayerAttack {
    Strike {
        attacker: EntityId,
        defender: EntityId,
        combo: bool,
    },
    Skip(SkipReason),
}

/// Drives a battle round by round.
///
/// ```
/// use strategic_mythology::cards::{CardDefinition, Category};
/// use strategic_mythology::core::{BattleConfig, Side};
/// use strategic_mythology::session::{GameSessionBuilder, TurnController};
///
/// let deck = vec![
///     CardDefinition::new("a", "A", Category::Char).with_stats(30, 0, 0, 40),
///     CardDefinition::new("b", "B", Category::Char).with_stats(30, 0, 0, 40),
/// ];
/// let session = GameSessionBuilder::new()
///     .config(BattleConfig { starting_hand_size: 1, ..BattleConfig::default() })
///     .shuffle(false)
///     .deck(Side::Player, deck.clone())
///     .deck(Side::Enemy, deck)
///     .build()
///     .unwrap();
/// let mut game = TurnController::new(session);
///
/// let mine = game.session().hand(Side::Player).iter().next().unwrap().entity_id;
/// game.place_card(Side::Player, mine).unwrap(); // the enemy places too
/// let theirs = game.session().zone(Side::Enemy).occupied_ids()[0];
///
/// game.select_attacker(mine).unwrap();
/// game.select_defender(theirs).unwrap();
/// let result = game.play_round().unwrap();
///
/// assert_eq!(result.round, 1);
/// assert_eq!(result.damage_events().count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct TurnController<P = RandomEnemy> {
    session: GameSession,
    enemy: P,
}

impl TurnController<RandomEnemy> {
    /// Control `session` with the default enemy.
    #[must_use]
    pub fn new(session: GameSession) -> Self {
        Self::with_policy(session, RandomEnemy)
    }
}

impl<P: EnemyPolicy> TurnController<P> {
    #[must_use]
    pub fn with_policy(session: GameSession, enemy: P) -> Self {
        Self { session, enemy }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    /// `None` while the game is still running.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.session.outcome
    }

    // === Placement ===

    /// Place `card` from `side`'s hand into its slot.
    ///
    /// A player placement triggers the enemy's placement for the round,
    /// unless the enemy has already placed. Returns the events produced.
    pub fn place_card(&mut self, side: Side, card: EntityId) -> Result<Vec<BattleEvent>, BattleError> {
        self.ensure_active().map_err(|err| rejected("placement", err))?;

        let mut events = Vec::new();
        self.place(side, card, &mut events)
            .map_err(|err| rejected("placement", err))?;

        if side == Side::Player && !self.session.turn.enemy_has_placed() {
            self.enemy_place(&mut events);
        }

        self.record(&events);
        Ok(events)
    }

    fn place(&mut self, side: Side, card: EntityId, events: &mut Vec<BattleEvent>) -> Result<(), BattleError> {
        let session = &mut self.session;
        if session.turn.has_placed[side] {
            return Err(BattleError::AlreadyPlaced(side));
        }
        let Some(index) = session.hands[side].position(card) else {
            return Err(match session.card(card) {
                Some(_) => BattleError::NotInHand { side, card },
                None => BattleError::UnknownCard(card),
            });
        };
        let instance = session.hands[side]
            .remove(card)
            .ok_or(BattleError::NotInHand { side, card })?;

        let slot = SlotKey::for_category(instance.category());
        if let Err((instance, err)) = session.zones[side].place(instance, slot) {
            session.hands[side].insert(index, instance);
            return Err(err);
        }
        log::debug!("{side} places {card} in the {slot} slot");
        session.turn.has_placed[side] = true;

        events.push(BattleEvent::CardPlaced { side, card, slot });
        Ok(())
    }

    /// End the player's placement without placing a card.
    ///
    /// Only allowed when no card in hand fits an open slot. The enemy then
    /// places as it would after a player placement. Returns the events
    /// produced.
    pub fn pass_placement(&mut self) -> Result<Vec<BattleEvent>, BattleError> {
        self.ensure_active()
            .and_then(|()| self.check_pass())
            .map_err(|err| rejected("pass", err))?;

        let mut events = Vec::new();
        self.pass(&mut events);
        self.record(&events);
        Ok(events)
    }

    fn check_pass(&self) -> Result<(), BattleError> {
        let side = Side::Player;
        if self.session.turn.has_placed[side] {
            return Err(BattleError::AlreadyPlaced(side));
        }
        if self.session.can_place(side) {
            return Err(BattleError::PlacementRequired);
        }
        Ok(())
    }

    fn pass(&mut self, events: &mut Vec<BattleEvent>) {
        let side = Side::Player;
        log::debug!("{side} passes placement");
        self.session.turn.has_placed[side] = true;
        events.push(BattleEvent::PlacementSkipped {
            side,
            reason: SkipReason::NoPlaceableCard,
        });

        if !self.session.turn.enemy_has_placed() {
            self.enemy_place(events);
        }
    }

    fn enemy_place(&mut self, events: &mut Vec<BattleEvent>) {
        let side = Side::Enemy;
        let session = &mut self.session;
        let choice = self
            .enemy
            .choose_placement(&session.hands[side], &session.zones[side], &mut session.rng);

        let reason = match choice {
            Some(card) => match self.place(side, card, events) {
                Ok(()) => return,
                Err(err) => {
                    log::warn!("enemy placement of {card} failed: {err}");
                    SkipReason::Declined
                }
            },
            None => SkipReason::NoPlaceableCard,
        };

        log::warn!("{side} skips placement: {reason}");
        events.push(BattleEvent::PlacementSkipped { side, reason });
    }

    // === Selection ===

    /// Choose the player card that attacks this round.
    pub fn select_attacker(&mut self, card: EntityId) -> Result<(), BattleError> {
        self.ensure_active()
            .and_then(|()| self.require_in_zone(Side::Player, card))
            .and_then(|()| match self.session.turn.combo {
                Some(combo) if combo == card => Err(BattleError::ComboIsAttacker(card)),
                _ => Ok(()),
            })
            .map_err(|err| rejected("attacker selection", err))?;

        log::debug!("attacker selected: {card}");
        self.session.turn.attacker = Some(card);
        Ok(())
    }

    /// Choose the enemy card to attack this round.
    pub fn select_defender(&mut self, card: EntityId) -> Result<(), BattleError> {
        self.ensure_active()
            .and_then(|()| self.require_in_zone(Side::Enemy, card))
            .map_err(|err| rejected("defender selection", err))?;

        log::debug!("defender selected: {card}");
        self.session.turn.defender = Some(card);
        Ok(())
    }

    /// Choose a second player card to boost the attack.
    pub fn select_combo(&mut self, card: EntityId) -> Result<(), BattleError> {
        self.ensure_active()
            .and_then(|()| self.require_in_zone(Side::Player, card))
            .and_then(|()| match self.session.turn.attacker {
                Some(attacker) if attacker == card => Err(BattleError::ComboIsAttacker(card)),
                _ => Ok(()),
            })
            .map_err(|err| rejected("combo selection", err))?;

        log::debug!("combo selected: {card}");
        self.session.turn.combo = Some(card);
        Ok(())
    }

    /// Drop attacker, defender and combo selections.
    pub fn clear_selection(&mut self) {
        let turn = &mut self.session.turn;
        turn.attacker = None;
        turn.defender = None;
        turn.combo = None;
    }

    // === Combat ===

    /// Resolve the combat phase and close the round.
    ///
    /// If the player has neither placed nor passed, the placement is passed
    /// first (rejected with `PlacementRequired` when a card fits). Combat is
    /// planned only after that, so an enemy card placed in answer must be
    /// targeted like any other: `SelectionRequired` is returned if no
    /// defender was selected yet. The pass events lead the round's events.
    pub fn play_round(&mut self) -> Result<RoundResult, BattleError> {
        self.ensure_active().map_err(|err| rejected("round", err))?;

        let mut events = Vec::new();
        if !self.session.turn.player_has_placed() {
            self.check_pass().map_err(|err| rejected("round", err))?;
            self.pass(&mut events);
        }

        let plan = match self.plan_player_attack() {
            Ok(plan) => plan,
            Err(err) => {
                self.record(&events);
                return Err(rejected("round", err));
            }
        };

        self.session.round_in_progress = true;
        let round = self.session.round;
        log::info!("round {round} started");

        events.push(BattleEvent::RoundStarted { round });
        let resolved = self.resolve_round(plan, &mut events);

        self.session.round_in_progress = false;
        self.record(&events);
        resolved?;

        self.session.round += 1;
        let outcome = self.session.outcome;
        log::info!("round {round} finished with {} events", events.len());

        Ok(RoundResult {
            round,
            events,
            outcome,
        })
    }

    /// Check selections against the zones as placement left them.
    fn plan_player_attack(&self) -> Result<PlayerAttack, BattleError> {
        let session = &self.session;
        let turn = &session.turn;

        let own = &session.zones[Side::Player];
        let other = &session.zones[Side::Enemy];
        if own.is_empty() {
            return Ok(PlayerAttack::Skip(SkipReason::NoAttacker));
        }
        if other.is_empty() {
            return Ok(PlayerAttack::Skip(SkipReason::NoDefender));
        }

        let (Some(attacker), Some(defender)) = (turn.attacker, turn.defender) else {
            return Err(BattleError::SelectionRequired);
        };
        if !own.contains(attacker) {
            return Err(BattleError::NotInZone {
                side: Side::Player,
                card: attacker,
            });
        }
        if !other.contains(defender) {
            return Err(BattleError::NotInZone {
                side: Side::Enemy,
                card: defender,
            });
        }

        let combo = turn.combo.is_some_and(|card| own.contains(card));
        Ok(PlayerAttack::Strike {
            attacker,
            defender,
            combo,
        })
    }

    fn resolve_round(&mut self, plan: PlayerAttack, events: &mut Vec<BattleEvent>) -> Result<(), BattleError> {
        for side in Side::ALL {
            for combo in pair_combos(&self.session.zones[side]) {
                log::debug!("{side} has a {}", combo.kind);
                events.push(BattleEvent::ComboTriggered { side, combo });
            }
        }

        match plan {
            PlayerAttack::Strike {
                attacker,
                defender,
                combo,
            } => self.attack(Side::Player, attacker, defender, combo, events)?,
            PlayerAttack::Skip(reason) => skip_attack(Side::Player, reason, events),
        }

        self.enemy_attack(events)?;
        self.draw_cards(events);
        self.session.turn.reset();

        if let Some(outcome) = self.session.check_outcome() {
            log::info!("game over: {outcome}");
            self.session.outcome = Some(outcome);
            events.push(BattleEvent::GameEnded { outcome });
        }
        Ok(())
    }

    fn enemy_attack(&mut self, events: &mut Vec<BattleEvent>) -> Result<(), BattleError> {
        let side = Side::Enemy;
        let session = &mut self.session;

        if session.zones[side].is_empty() {
            skip_attack(side, SkipReason::NoAttacker, events);
            return Ok(());
        }
        if session.zones[side.opponent()].is_empty() {
            skip_attack(side, SkipReason::NoDefender, events);
            return Ok(());
        }

        let choice = self.enemy.choose_attack(
            &session.zones[side],
            &session.zones[side.opponent()],
            &mut session.rng,
        );
        let valid = choice.filter(|(attacker, defender)| {
            session.zones[side].contains(*attacker) && session.zones[side.opponent()].contains(*defender)
        });
        let Some((attacker, defender)) = valid else {
            skip_attack(side, SkipReason::Declined, events);
            return Ok(());
        };

        let combo = detect_pair_combo(&session.zones[side]);
        self.attack(side, attacker, defender, combo, events)
    }

    /// One side's attack plus its aftermath: sweep, triple combo, sweep.
    fn attack(
        &mut self,
        side: Side,
        attacker: EntityId,
        defender: EntityId,
        combo: bool,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        self.strike(side, attacker, defender, combo, events)?;
        self.remove_defeated(events);

        if self.fire_triple_combo(side, events) {
            self.remove_defeated(events);
        }
        Ok(())
    }

    fn strike(
        &mut self,
        side: Side,
        attacker: EntityId,
        defender: EntityId,
        combo: bool,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        let session = &mut self.session;
        let calc = DamageCalculator::new(&session.system, &session.config);
        let (own, other) = session.zones.split_mut(side);

        let (_, attacker_card) = own.find(attacker).ok_or(BattleError::NotInZone {
            side,
            card: attacker,
        })?;
        let defender_card = other.find_mut(defender).ok_or(BattleError::NotInZone {
            side: side.opponent(),
            card: defender,
        })?;

        let report = calc.resolve_attack(attacker_card, defender_card, combo)?;
        events.push(BattleEvent::CardDamaged {
            side: side.opponent(),
            target: report.defender,
            source: DamageSource::Attack(report.attacker),
            damage: report.damage,
            remaining_hp: report.remaining_hp,
        });
        Ok(())
    }

    /// Returns whether a triple combo fired.
    fn fire_triple_combo(&mut self, side: Side, events: &mut Vec<BattleEvent>) -> bool {
        let damage = self.session.config.triple_combo_damage;
        let (own, other) = self.session.zones.split_mut(side);
        let Some(combo) = triple_combo(own) else {
            return false;
        };

        log::debug!("{side} triple combo hits every opposing card for {damage}");
        events.push(BattleEvent::ComboTriggered { side, combo });
        for hit in apply_triple_combo(other, damage) {
            events.push(BattleEvent::CardDamaged {
                side: side.opponent(),
                target: hit.target,
                source: DamageSource::TripleCombo,
                damage: hit.damage,
                remaining_hp: hit.remaining_hp,
            });
        }
        true
    }

    fn remove_defeated(&mut self, events: &mut Vec<BattleEvent>) {
        for (side, zone) in self.session.zones.iter_mut() {
            for (slot, card) in zone.remove_defeated() {
                events.push(BattleEvent::CardDefeated {
                    side,
                    card: card.entity_id,
                    slot,
                });
            }
        }
    }

    fn draw_cards(&mut self, events: &mut Vec<BattleEvent>) {
        let session = &mut self.session;
        for side in Side::ALL {
            if let Some(card) = session.hands[side].draw_from(&mut session.decks[side]) {
                log::debug!("{side} draws {card}");
                events.push(BattleEvent::CardDrawn { side, card });
            }
        }
    }

    // === Helpers ===

    fn ensure_active(&self) -> Result<(), BattleError> {
        if self.session.is_over() {
            return Err(BattleError::GameOver);
        }
        if self.session.round_in_progress {
            return Err(BattleError::RoundInProgress);
        }
        Ok(())
    }

    fn require_in_zone(&self, side: Side, card: EntityId) -> Result<(), BattleError> {
        if self.session.zones[side].contains(card) {
            Ok(())
        } else if self.session.card(card).is_none() {
            Err(BattleError::UnknownCard(card))
        } else {
            Err(BattleError::NotInZone { side, card })
        }
    }

    fn record(&mut self, events: &[BattleEvent]) {
        self.session.history.extend(events.iter().cloned());
    }
}

fn skip_attack(side: Side, reason: SkipReason, events: &mut Vec<BattleEvent>) {
    log::warn!("{side} attack skipped: {reason}");
    events.push(BattleEvent::AttackSkipped { side, reason });
}

fn rejected(action: &str, err: BattleError) -> BattleError {
    log::warn!("{action} rejected: {err}");
    err
}
