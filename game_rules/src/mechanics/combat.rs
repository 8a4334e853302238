//! Turn-based combat between the player and a single enemy.
//!
//! Each call to [`CombatSession::act`] resolves one round:
//! 1. The player's action is applied (attack, heal, defend, or escape attempt)
//! 2. If the enemy is still standing, it retaliates (unless the action replaced retaliation)
//! 3. The outcome is re-evaluated; terminal outcomes are final

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CombatAction, CombatRules, DamageRoller};
use crate::entities::PlayerState;
use crate::error::{Result, RulesError};

/// Where a fight stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatOutcome {
    Ongoing,
    Victory,
    Defeat,
    Escaped,
}

impl CombatOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CombatOutcome::Ongoing)
    }
}

/// Something that happened during a round, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    PlayerStruck { damage: i32, enemy_hp: i32 },
    PlayerHealed { amount: i32, restored: i32 },
    PlayerDefended,
    EnemyStruck { damage: i32, reduced: bool, player_hp: i32 },
    EscapeFailed { roll: i32 },
    Escaped { roll: i32, penalty: i32, player_hp: i32 },
}

/// Everything one round produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub action: CombatAction,
    pub events: Vec<CombatEvent>,
    pub outcome: CombatOutcome,
}

/// A fight in progress. The player state it acts on is owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSession {
    rules: CombatRules,
    enemy_hp: i32,
    round: u32,
    outcome: CombatOutcome,
}

impl CombatSession {
    /// Start a fight with the enemy at the full pool from `rules`.
    pub fn new(rules: CombatRules) -> Self {
        Self {
            enemy_hp: rules.enemy_hp,
            rules,
            round: 0,
            outcome: CombatOutcome::Ongoing,
        }
    }

    pub fn enemy_hp(&self) -> i32 {
        self.enemy_hp
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> CombatOutcome {
        self.outcome
    }

    pub fn rules(&self) -> &CombatRules {
        &self.rules
    }

    /// Resolve one round.
    ///
    /// A killing blow ends the fight before the enemy can retaliate. Calling
    /// this after a terminal outcome is an error.
    pub fn act(
        &mut self,
        player: &mut PlayerState,
        action: CombatAction,
        roller: &mut dyn DamageRoller,
    ) -> Result<RoundReport> {
        if self.outcome.is_terminal() {
            return Err(RulesError::CombatFinished);
        }
        if !self.rules.allows(action) {
            return Err(RulesError::ActionUnavailable(action));
        }

        self.round += 1;
        let mut events = Vec::new();

        match action {
            CombatAction::Attack => {
                let damage = self.rules.attack.roll(roller);
                self.enemy_hp -= damage;
                events.push(CombatEvent::PlayerStruck {
                    damage,
                    enemy_hp: self.enemy_hp.max(0),
                });
                if self.enemy_hp <= 0 {
                    self.outcome = CombatOutcome::Victory;
                } else {
                    self.retaliate(player, roller, &mut events);
                }
            }
            CombatAction::Heal => {
                let amount = self.rules.heal_amount;
                let restored = player.heal(amount);
                events.push(CombatEvent::PlayerHealed { amount, restored });
                self.retaliate(player, roller, &mut events);
            }
            CombatAction::Defend => {
                events.push(CombatEvent::PlayerDefended);
                if let Some(reduced) = self.rules.defend {
                    let damage = reduced.roll(roller);
                    self.strike_player(player, damage, true, &mut events);
                }
            }
            CombatAction::Escape => {
                if let Some(escape) = self.rules.escape.clone() {
                    let roll = escape.roll.roll(roller);
                    if roll > escape.threshold {
                        let status = player.take_damage(escape.penalty);
                        events.push(CombatEvent::Escaped {
                            roll,
                            penalty: escape.penalty,
                            player_hp: player.hp(),
                        });
                        self.outcome = if status.is_defeated() {
                            CombatOutcome::Defeat
                        } else {
                            CombatOutcome::Escaped
                        };
                    } else {
                        events.push(CombatEvent::EscapeFailed { roll });
                        if escape.retaliate_on_failure {
                            self.retaliate(player, roller, &mut events);
                        }
                    }
                }
            }
        }

        debug!(
            round = self.round,
            ?action,
            enemy_hp = self.enemy_hp,
            player_hp = player.hp(),
            outcome = ?self.outcome,
            "Combat round resolved"
        );

        Ok(RoundReport {
            round: self.round,
            action,
            events,
            outcome: self.outcome,
        })
    }

    fn retaliate(
        &mut self,
        player: &mut PlayerState,
        roller: &mut dyn DamageRoller,
        events: &mut Vec<CombatEvent>,
    ) {
        if self.enemy_hp <= 0 {
            return;
        }
        let damage = self.rules.enemy_attack.roll(roller);
        self.strike_player(player, damage, false, events);
    }

    fn strike_player(
        &mut self,
        player: &mut PlayerState,
        damage: i32,
        reduced: bool,
        events: &mut Vec<CombatEvent>,
    ) {
        let status = player.take_damage(damage);
        events.push(CombatEvent::EnemyStruck {
            damage,
            reduced,
            player_hp: player.hp(),
        });
        if status.is_defeated() {
            self.outcome = CombatOutcome::Defeat;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::{DamageRange, MaxRoller, MinRoller, RandRoller, ScriptedRoller};

    #[test]
    fn test_killing_blow_prevents_retaliation() {
        let mut player = PlayerState::new();
        let mut combat = CombatSession::new(CombatRules::abyss());
        let mut roller = MaxRoller::new();

        let first = combat.act(&mut player, CombatAction::Attack, &mut roller).unwrap();
        assert_eq!(combat.enemy_hp(), 25);
        assert_eq!(player.hp(), 85);
        assert_eq!(first.outcome, CombatOutcome::Ongoing);

        let second = combat.act(&mut player, CombatAction::Attack, &mut roller).unwrap();
        assert_eq!(combat.enemy_hp(), 0);
        assert_eq!(second.outcome, CombatOutcome::Victory);
        assert_eq!(player.hp(), 85);
        assert_eq!(second.events.len(), 1);
    }

    #[test]
    fn test_attack_only_with_max_rolls_finishes_quickly() {
        let mut player = PlayerState::new();
        let mut rules = CombatRules::abyss();
        rules.attack = DamageRange::new(10, 25);
        let mut combat = CombatSession::new(rules);
        let mut roller = MaxRoller::new();

        while !combat.outcome().is_terminal() {
            combat.act(&mut player, CombatAction::Attack, &mut roller).unwrap();
        }

        assert!(combat.round() <= 5);
        assert_eq!(combat.outcome(), CombatOutcome::Victory);
    }

    #[test]
    fn test_attack_only_terminates_with_min_rolls() {
        for rules in [CombatRules::abyss(), CombatRules::lost_sector()] {
            let mut player = PlayerState::new();
            let mut combat = CombatSession::new(rules);
            let mut roller = MinRoller::new();

            while !combat.outcome().is_terminal() {
                combat.act(&mut player, CombatAction::Attack, &mut roller).unwrap();
                assert!(combat.round() <= 50);
            }
        }
    }

    #[test]
    fn test_random_fights_terminate() {
        let mut roller = RandRoller::seeded(2024);
        for _ in 0..200 {
            let mut player = PlayerState::new();
            let mut combat = CombatSession::new(CombatRules::lost_sector());
            while !combat.outcome().is_terminal() {
                combat.act(&mut player, CombatAction::Attack, &mut roller).unwrap();
            }
            assert!(combat.round() <= 3);
        }
    }

    #[test]
    fn test_heal_then_retaliation() {
        let mut player = PlayerState::new();
        player.take_damage(40);
        let mut combat = CombatSession::new(CombatRules::lost_sector());
        let mut roller = ScriptedRoller::new([18]);

        let report = combat.act(&mut player, CombatAction::Heal, &mut roller).unwrap();
        assert_eq!(player.hp(), 100 - 40 + 25 - 18);
        assert_eq!(
            report.events,
            vec![
                CombatEvent::PlayerHealed { amount: 25, restored: 25 },
                CombatEvent::EnemyStruck { damage: 18, reduced: false, player_hp: 67 },
            ]
        );
    }

    #[test]
    fn test_defend_replaces_retaliation() {
        let mut player = PlayerState::new();
        let mut combat = CombatSession::new(CombatRules::lost_sector());
        let mut roller = MaxRoller::new();

        let report = combat.act(&mut player, CombatAction::Defend, &mut roller).unwrap();
        assert_eq!(player.hp(), 90);
        assert_eq!(combat.enemy_hp(), 50);
        assert!(matches!(
            report.events.last(),
            Some(CombatEvent::EnemyStruck { damage: 10, reduced: true, .. })
        ));
    }

    #[test]
    fn test_escape_success_costs_penalty() {
        let mut player = PlayerState::new();
        let mut combat = CombatSession::new(CombatRules::abyss());
        let mut roller = ScriptedRoller::new([6]);

        let report = combat.act(&mut player, CombatAction::Escape, &mut roller).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Escaped);
        assert_eq!(player.hp(), 85);
    }

    #[test]
    fn test_failed_escape_skips_enemy_turn() {
        let mut player = PlayerState::new();
        let mut combat = CombatSession::new(CombatRules::abyss());
        let mut roller = ScriptedRoller::new([5, 15]);

        let report = combat.act(&mut player, CombatAction::Escape, &mut roller).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Ongoing);
        assert_eq!(report.events, vec![CombatEvent::EscapeFailed { roll: 5 }]);
        assert_eq!(player.hp(), 100);
        assert_eq!(roller.remaining(), 1);
    }

    #[test]
    fn test_failed_escape_can_be_configured_to_retaliate() {
        let mut rules = CombatRules::abyss();
        if let Some(escape) = rules.escape.as_mut() {
            escape.retaliate_on_failure = true;
        }
        let mut player = PlayerState::new();
        let mut combat = CombatSession::new(rules);
        let mut roller = ScriptedRoller::new([2, 11]);

        combat.act(&mut player, CombatAction::Escape, &mut roller).unwrap();
        assert_eq!(player.hp(), 89);
    }

    #[test]
    fn test_escape_penalty_can_be_fatal() {
        let mut player = PlayerState::new();
        player.take_damage(90);
        let mut combat = CombatSession::new(CombatRules::abyss());
        let mut roller = MaxRoller::new();

        let report = combat.act(&mut player, CombatAction::Escape, &mut roller).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Defeat);
        assert_eq!(player.hp(), 0);
    }

    #[test]
    fn test_defeat_is_final() {
        let mut player = PlayerState::new();
        player.take_damage(95);
        let mut combat = CombatSession::new(CombatRules::lost_sector());
        let mut roller = MinRoller::new();

        let report = combat.act(&mut player, CombatAction::Attack, &mut roller).unwrap();
        assert_eq!(report.outcome, CombatOutcome::Defeat);
        assert_eq!(player.hp(), 0);

        let err = combat
            .act(&mut player, CombatAction::Attack, &mut roller)
            .unwrap_err();
        assert!(matches!(err, RulesError::CombatFinished));
        assert_eq!(combat.round(), 1);
    }

    #[test]
    fn test_unavailable_actions_are_rejected() {
        let mut player = PlayerState::new();
        let mut roller = MaxRoller::new();

        let mut droid = CombatSession::new(CombatRules::lost_sector());
        let err = droid
            .act(&mut player, CombatAction::Escape, &mut roller)
            .unwrap_err();
        assert!(matches!(err, RulesError::ActionUnavailable(CombatAction::Escape)));

        let mut crawler = CombatSession::new(CombatRules::abyss());
        assert!(crawler
            .act(&mut player, CombatAction::Defend, &mut roller)
            .is_err());
        assert_eq!(crawler.round(), 0);
        assert_eq!(player.hp(), 100);
    }
}
