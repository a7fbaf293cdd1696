use super::EffectContext;
use crate::battle::state::{BattleEvent, EventBus};
use crate::pokemon::Combatant;
use schema::StatChange;
use tracing::debug;

/// Positive deltas raise the attacker's stage, others lower the defender's.
pub(super) fn apply_stat_change(
    change: &StatChange,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    context: &EffectContext,
    bus: &mut EventBus,
) {
    let (target, side) = if change.change > 0 {
        (attacker, context.attacker_side)
    } else {
        (defender, context.defender_side)
    };

    if target.is_fainted() {
        return;
    }

    let (old_stage, new_stage) = target.stat_stages.modify(change.stat, change.change);
    let pokemon = target.name().to_string();

    if old_stage == new_stage {
        bus.push(BattleEvent::StatChangeBlocked {
            side,
            pokemon,
            stat: change.stat,
            rising: change.change > 0,
        });
        return;
    }

    debug!(pokemon = %pokemon, stat = %change.stat, old_stage, new_stage, "Stat stage changed");
    bus.push(BattleEvent::StatStageChanged {
        side,
        pokemon,
        stat: change.stat,
        old_stage,
        new_stage,
    });
}
