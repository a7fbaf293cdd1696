use crate::battle::calculators::compute_damage;
use crate::battle::conditions::{can_act, end_of_turn_status};
use crate::battle::move_effects::{apply_move_effects, EffectContext};
use crate::battle::state::{
    BattleEvent, BattleOutcome, BattleState, EventBus, GameState, Side, TurnRng,
};
use crate::battle::stats::{effective_speed, move_hits};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything that happened during one resolved turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub turn_number: u32,
    pub events: Vec<BattleEvent>,
    /// Set when this turn ended the battle.
    pub outcome: Option<BattleOutcome>,
}

impl TurnReport {
    /// Narration lines in the order they happened.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }
}

/// Which side acts first. Ties go to the player.
pub fn determine_action_order(state: &BattleState) -> [Side; 2] {
    let player_speed = effective_speed(state.player.active());
    let opponent_speed = effective_speed(state.opponent.active());
    debug!(player_speed, opponent_speed, "Determining action order");

    if player_speed >= opponent_speed {
        [Side::Player, Side::Opponent]
    } else {
        [Side::Opponent, Side::Player]
    }
}

/// Resolve one full turn: the player uses `player_move_index`, the opponent picks one of
/// its moves uniformly at random.
///
/// The caller validates the index and the session phase; this only mutates `state`.
/// Random outcomes are drawn in a fixed order: opponent move choice, then for each action
/// the status check, accuracy, damage roll, secondary-effect chance and sleep duration, as
/// each applies.
pub fn resolve_turn(
    state: &mut BattleState,
    player_move_index: usize,
    rng: &mut TurnRng,
) -> EventBus {
    let mut bus = EventBus::new();

    state.turn_number += 1;
    state.game_state = GameState::Resolving;
    bus.push(BattleEvent::TurnStarted {
        turn_number: state.turn_number,
    });

    let opponent_move_count = state.opponent.active().moves().len();
    let opponent_move_index = rng.pick_index(opponent_move_count, "opponent move choice");

    let order = determine_action_order(state);
    for (position, &side) in order.iter().enumerate() {
        let move_index = match side {
            Side::Player => player_move_index,
            Side::Opponent => opponent_move_index,
        };
        let target_fainted = execute_attack(state, side, move_index, rng, &mut bus);
        if target_fainted {
            if position == 0 {
                debug!("First action knocked out its target, skipping the second action");
            }
            break;
        }
    }

    execute_end_turn_phase(state, &mut bus);
    resolve_faints(state, &mut bus);

    bus
}

/// Run one side's attack against the other side's active combatant.
/// Returns true if the defender is fainted afterwards.
pub fn execute_attack(
    state: &mut BattleState,
    attacker_side: Side,
    move_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    let defender_side = attacker_side.opposite();
    let (attacker_team, defender_team) = state.teams_mut(attacker_side);
    let attacker = attacker_team.active_mut();
    let defender = defender_team.active_mut();

    if attacker.is_fainted() || defender.is_fainted() {
        return defender.is_fainted();
    }

    if !can_act(attacker, attacker_side, rng, bus) {
        return false;
    }

    let Some(move_data) = attacker.moves().get(move_index).cloned() else {
        return false;
    };

    bus.push(BattleEvent::MoveUsed {
        side: attacker_side,
        pokemon: attacker.name().to_string(),
        move_name: move_data.display_name(),
    });

    if !move_hits(attacker, defender, &move_data, rng) {
        debug!(attacker = attacker.name(), move_name = %move_data.name, "Move missed");
        bus.push(BattleEvent::MoveMissed {
            side: attacker_side,
            pokemon: attacker.name().to_string(),
        });
        return false;
    }

    if move_data.power > 0 || move_data.is_fixed_damage() {
        let result = compute_damage(attacker, defender, &move_data, rng);
        if result.effectiveness == 0.0 {
            bus.push(BattleEvent::NoEffect {
                side: defender_side,
                pokemon: defender.name().to_string(),
            });
            return false;
        }

        defender.take_damage(result.damage);
        bus.push(BattleEvent::DamageDealt {
            side: defender_side,
            pokemon: defender.name().to_string(),
            damage: result.damage,
            remaining_hp: defender.current_hp(),
        });
        bus.push(BattleEvent::AttackTypeEffectiveness {
            multiplier: result.effectiveness,
        });
    }

    apply_move_effects(
        &move_data,
        attacker,
        defender,
        EffectContext::new(attacker_side),
        rng,
        bus,
    );

    if defender.is_fainted() {
        defender.faint();
        bus.push(BattleEvent::PokemonFainted {
            side: defender_side,
            pokemon: defender.name().to_string(),
        });
        return true;
    }
    false
}

/// Poison and burn damage for both active combatants, player first.
pub fn execute_end_turn_phase(state: &mut BattleState, bus: &mut EventBus) {
    let anyone_afflicted = [Side::Player, Side::Opponent].iter().any(|&side| {
        let active = state.team(side).active();
        !active.is_fainted() && active.status.is_some()
    });
    if !anyone_afflicted {
        return;
    }

    for side in [Side::Player, Side::Opponent] {
        let active = state.team_mut(side).active_mut();
        if end_of_turn_status(active, side, bus) > 0 && active.is_fainted() {
            active.faint();
            bus.push(BattleEvent::PokemonFainted {
                side,
                pokemon: active.name().to_string(),
            });
        }
    }
}

/// Replace fainted combatants or end the battle. The opponent is checked first, so if both
/// sides run out on the same turn the player wins. Nobody is sent out once the outcome is set.
pub fn resolve_faints(state: &mut BattleState, bus: &mut EventBus) {
    for side in [Side::Opponent, Side::Player] {
        if state.outcome.is_some() {
            break;
        }
        if !state.team(side).active().is_fainted() {
            continue;
        }

        if state.team_mut(side).advance() {
            let trainer = state.trainer_name(side).to_string();
            let pokemon = state.team(side).active().name().to_string();
            debug!(?side, pokemon = %pokemon, "Sending out replacement");
            bus.push(BattleEvent::PokemonSentOut {
                side,
                trainer,
                pokemon,
            });
        } else {
            let outcome = match side {
                Side::Opponent => BattleOutcome::Win,
                Side::Player => BattleOutcome::Loss,
            };
            state.outcome = Some(outcome);
            state.game_state = GameState::Concluded;
            info!(%outcome, turn = state.turn_number, leader = %state.leader_name, "Battle concluded");
            bus.push(BattleEvent::BattleConcluded {
                outcome,
                leader: state.leader_name.clone(),
            });
        }
    }
}
