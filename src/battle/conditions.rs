//! Pre-action status checks and end-of-turn status damage.

use crate::battle::state::{BattleEvent, EventBus, Side, TurnRng};
use crate::pokemon::{Combatant, StatusCondition};
use schema::StatusType;
use tracing::debug;

/// Chance in percent that a frozen combatant thaws on its pre-action check.
pub const THAW_CHANCE: u8 = 20;
/// Chance in percent that paralysis stops a combatant from acting.
pub const FULL_PARALYSIS_CHANCE: u8 = 25;

/// Decide whether `combatant` may act this turn, updating its status in place.
///
/// Sleep counts down and wakes at zero, acting that same turn. Freeze thaws 20% of the time.
/// Paralysis blocks 25% of the time and never clears by itself.
pub fn can_act(
    combatant: &mut Combatant,
    side: Side,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    if combatant.is_fainted() {
        return false;
    }

    let pokemon = combatant.name().to_string();

    if let Some(StatusCondition::Sleep(turns_remaining)) = combatant.status {
        if turns_remaining > 0 {
            combatant.status = Some(StatusCondition::Sleep(turns_remaining - 1));
            debug!(pokemon = %pokemon, turns_remaining = turns_remaining - 1, "Still asleep");
            bus.push(BattleEvent::FastAsleep { side, pokemon });
            return false;
        }
        combatant.status = None;
        debug!(pokemon = %pokemon, "Woke up");
        bus.push(BattleEvent::WokeUp {
            side,
            pokemon: pokemon.clone(),
        });
    }

    if combatant.status == Some(StatusCondition::Freeze) {
        if !rng.roll_percent(THAW_CHANCE, "freeze thaw check") {
            bus.push(BattleEvent::FrozenSolid { side, pokemon });
            return false;
        }
        combatant.status = None;
        debug!(pokemon = %pokemon, "Thawed out");
        bus.push(BattleEvent::Thawed {
            side,
            pokemon: pokemon.clone(),
        });
    }

    if combatant.status == Some(StatusCondition::Paralysis)
        && rng.roll_percent(FULL_PARALYSIS_CHANCE, "full paralysis check")
    {
        bus.push(BattleEvent::FullyParalyzed { side, pokemon });
        return false;
    }

    true
}

/// HP lost to a status at the end of a turn, or `None` for statuses that don't tick.
pub fn status_damage(combatant: &Combatant) -> Option<(StatusType, u16)> {
    let max_hp = combatant.max_hp();
    match combatant.status? {
        StatusCondition::Poison => Some((StatusType::Poison, (max_hp / 8).max(1))),
        StatusCondition::Burn => Some((StatusType::Burn, (max_hp / 16).max(1))),
        _ => None,
    }
}

/// Apply end-of-turn poison or burn damage. Returns the damage dealt.
pub fn end_of_turn_status(combatant: &mut Combatant, side: Side, bus: &mut EventBus) -> u16 {
    if combatant.is_fainted() {
        return 0;
    }
    let Some((status, damage)) = status_damage(combatant) else {
        return 0;
    };

    combatant.take_damage(damage);
    debug!(pokemon = combatant.name(), %status, damage, "End-of-turn status damage");
    bus.push(BattleEvent::StatusDamage {
        side,
        pokemon: combatant.name().to_string(),
        status,
        damage,
        remaining_hp: combatant.current_hp(),
    });
    damage
}
