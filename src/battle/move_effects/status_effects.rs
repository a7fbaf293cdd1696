use super::EffectContext;
use crate::battle::state::{BattleEvent, EventBus, StatusFailure, TurnRng};
use crate::pokemon::{Combatant, StatusCondition};
use schema::{DamageClass, MoveData, PokemonType, StatusType};
use tracing::debug;

/// Poison and Steel types can't be poisoned; Fire types can't be burned.
pub fn is_immune_to_status(combatant: &Combatant, status: StatusType) -> bool {
    match status {
        StatusType::Poison => {
            combatant.has_type(PokemonType::Poison) || combatant.has_type(PokemonType::Steel)
        }
        StatusType::Burn => combatant.has_type(PokemonType::Fire),
        _ => false,
    }
}

/// Sleep length in turns, 1 to 3.
pub fn sleep_duration(rng: &mut TurnRng) -> u8 {
    match rng.cycle_index(3, "sleep duration") {
        0 => 1,
        1 => 2,
        _ => 3,
    }
}

pub(super) fn apply_ailment(
    ailment: StatusType,
    move_data: &MoveData,
    defender: &mut Combatant,
    context: &EffectContext,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    if defender.is_fainted() {
        return;
    }

    let failure = if defender.status.is_some() {
        Some(StatusFailure::AlreadyAfflicted)
    } else if is_immune_to_status(defender, ailment) {
        Some(StatusFailure::Immune)
    } else {
        None
    };

    if let Some(reason) = failure {
        debug!(pokemon = defender.name(), %ailment, ?reason, "Status not applied");
        // Only status moves announce the failure; a damaging move's rider fails quietly.
        if move_data.damage_class == DamageClass::Status {
            bus.push(BattleEvent::StatusFailed {
                side: context.defender_side,
                pokemon: defender.name().to_string(),
                reason,
            });
        }
        return;
    }

    let sleep_turns = if ailment == StatusType::Sleep {
        sleep_duration(rng)
    } else {
        0
    };
    defender.status = Some(StatusCondition::from_status_type(ailment, sleep_turns));

    debug!(pokemon = defender.name(), %ailment, sleep_turns, "Status applied");
    bus.push(BattleEvent::StatusApplied {
        side: context.defender_side,
        pokemon: defender.name().to_string(),
        status: ailment,
    });
}
