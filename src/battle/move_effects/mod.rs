//! Secondary effects resolved after a move's damage step.

mod stat_effects;
mod status_effects;

use crate::battle::state::{EventBus, Side, TurnRng};
use crate::pokemon::Combatant;
use schema::MoveData;
use tracing::debug;

use self::{stat_effects::*, status_effects::*};

pub use self::status_effects::{is_immune_to_status, sleep_duration};

#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    pub attacker_side: Side,
    pub defender_side: Side,
}

impl EffectContext {
    pub fn new(attacker_side: Side) -> Self {
        Self {
            attacker_side,
            defender_side: attacker_side.opposite(),
        }
    }
}

/// Apply the move's secondary effect, if any.
///
/// A trigger chance is rolled once up front; a failed roll skips the whole effect. Stat
/// changes come first (rises to the attacker, drops to the defender), then the ailment.
/// Nothing lands on a defender that has already fainted.
///
/// Randomness drawn, in order: one outcome for the trigger chance, only when the chance is
/// below 100; then one for the sleep duration, only when sleep actually lands.
pub fn apply_move_effects(
    move_data: &MoveData,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    context: EffectContext,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let Some(effect) = &move_data.effect else {
        return;
    };

    if let Some(chance) = effect.chance() {
        if chance < 100 && !rng.roll_percent(chance, "secondary effect chance") {
            debug!(move_name = %move_data.name, chance, "Secondary effect did not trigger");
            return;
        }
    }

    for change in effect.stat_changes() {
        apply_stat_change(change, attacker, defender, &context, bus);
    }

    if let Some(ailment) = effect.ailment() {
        apply_ailment(ailment, move_data, defender, &context, rng, bus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::{BattleEvent, StatusFailure};
    use crate::battle::tests::common::{move_named, TestCombatantBuilder};
    use crate::pokemon::StatusCondition;
    use pretty_assertions::assert_eq;
    use schema::{MoveEffect, StatType, StatusType};

    fn run(
        move_name: &str,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        outcomes: Vec<u8>,
    ) -> (EventBus, TurnRng) {
        let mut rng = TurnRng::new_for_test(outcomes);
        let mut bus = EventBus::new();
        apply_move_effects(
            &move_named(move_name),
            attacker,
            defender,
            EffectContext::new(Side::Player),
            &mut rng,
            &mut bus,
        );
        (bus, rng)
    }

    #[test]
    fn test_failed_chance_roll_skips_everything() {
        let mut attacker = TestCombatantBuilder::new(6).build();
        let mut defender = TestCombatantBuilder::new(143).build();

        let (bus, rng) = run("flamethrower", &mut attacker, &mut defender, vec![11]);
        assert_eq!(defender.status, None);
        assert!(bus.events().is_empty());
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn test_successful_chance_roll_applies_status() {
        let mut attacker = TestCombatantBuilder::new(6).build();
        let mut defender = TestCombatantBuilder::new(143).build();

        let (bus, _) = run("flamethrower", &mut attacker, &mut defender, vec![10]);
        assert_eq!(defender.status, Some(StatusCondition::Burn));
        assert_eq!(
            bus.events(),
            &[BattleEvent::StatusApplied {
                side: Side::Opponent,
                pokemon: "Snorlax".to_string(),
                status: StatusType::Burn,
            }]
        );
    }

    #[test]
    fn test_status_move_without_chance_always_applies() {
        let mut attacker = TestCombatantBuilder::new(25).build();
        let mut defender = TestCombatantBuilder::new(143).build();

        let (_, rng) = run("thunder-wave", &mut attacker, &mut defender, vec![]);
        assert_eq!(defender.status, Some(StatusCondition::Paralysis));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_certain_chance_draws_nothing() {
        let mut attacker = TestCombatantBuilder::new(25).build();
        let mut defender = TestCombatantBuilder::new(143).build();
        let mut certain = move_named("thunderbolt");
        certain.effect = Some(MoveEffect::Ailment {
            ailment: StatusType::Paralysis,
            chance: Some(100),
        });

        let mut rng = TurnRng::new_for_test(vec![]);
        let mut bus = EventBus::new();
        apply_move_effects(
            &certain,
            &mut attacker,
            &mut defender,
            EffectContext::new(Side::Player),
            &mut rng,
            &mut bus,
        );
        assert_eq!(defender.status, Some(StatusCondition::Paralysis));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_live_sleep_duration_covers_one_to_three() {
        let mut rng = TurnRng::seeded(3);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let turns = sleep_duration(&mut rng);
            assert!((1..=3).contains(&turns));
            seen[usize::from(turns - 1)] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_positive_changes_target_attacker() {
        let mut attacker = TestCombatantBuilder::new(68).build();
        let mut defender = TestCombatantBuilder::new(143).build();

        run("swords-dance", &mut attacker, &mut defender, vec![]);
        assert_eq!(attacker.stat_stages.get(StatType::Attack), 2);
        assert!(defender.stat_stages.is_neutral());
    }

    #[test]
    fn test_negative_changes_target_defender() {
        let mut attacker = TestCombatantBuilder::new(95).build();
        let mut defender = TestCombatantBuilder::new(143).build();

        run("screech", &mut attacker, &mut defender, vec![]);
        assert_eq!(defender.stat_stages.get(StatType::Defense), -2);
        assert!(attacker.stat_stages.is_neutral());
    }

    #[test]
    fn test_stat_change_at_limit_logs_no_effect() {
        let mut attacker = TestCombatantBuilder::new(68)
            .with_stage(StatType::Attack, 6)
            .build();
        let mut defender = TestCombatantBuilder::new(143).build();

        let (bus, _) = run("swords-dance", &mut attacker, &mut defender, vec![]);
        assert_eq!(attacker.stat_stages.get(StatType::Attack), 6);
        assert_eq!(
            bus.events(),
            &[BattleEvent::StatChangeBlocked {
                side: Side::Player,
                pokemon: "Machamp".to_string(),
                stat: StatType::Attack,
                rising: true,
            }]
        );
    }

    #[test]
    fn test_stat_change_clamps_partial_rise() {
        let mut attacker = TestCombatantBuilder::new(68)
            .with_stage(StatType::Attack, 5)
            .build();
        let mut defender = TestCombatantBuilder::new(143).build();

        let (bus, _) = run("swords-dance", &mut attacker, &mut defender, vec![]);
        assert_eq!(attacker.stat_stages.get(StatType::Attack), 6);
        assert!(matches!(
            bus.events()[0],
            BattleEvent::StatStageChanged {
                old_stage: 5,
                new_stage: 6,
                ..
            }
        ));
    }

    #[rstest::rstest]
    #[case("toxic", 89)] // Muk is Poison
    #[case("toxic", 82)] // Magneton is Steel
    #[case("will-o-wisp", 59)] // Arcanine is Fire
    fn test_type_immunity_blocks_status(#[case] move_name: &str, #[case] defender_id: u16) {
        let mut attacker = TestCombatantBuilder::new(94).build();
        let mut defender = TestCombatantBuilder::new(defender_id).build();

        let (bus, _) = run(move_name, &mut attacker, &mut defender, vec![]);
        assert_eq!(defender.status, None);
        assert!(matches!(
            bus.events()[0],
            BattleEvent::StatusFailed {
                reason: StatusFailure::Immune,
                ..
            }
        ));
    }

    #[test]
    fn test_existing_status_is_not_overwritten() {
        let mut attacker = TestCombatantBuilder::new(25).build();
        let mut defender = TestCombatantBuilder::new(143)
            .with_status(StatusCondition::Burn)
            .build();

        let (bus, _) = run("thunder-wave", &mut attacker, &mut defender, vec![]);
        assert_eq!(defender.status, Some(StatusCondition::Burn));
        assert!(matches!(
            bus.events()[0],
            BattleEvent::StatusFailed {
                reason: StatusFailure::AlreadyAfflicted,
                ..
            }
        ));
    }

    #[test]
    fn test_damaging_move_fails_silently_on_afflicted_target() {
        let mut attacker = TestCombatantBuilder::new(6).build();
        let mut defender = TestCombatantBuilder::new(143)
            .with_status(StatusCondition::Poison)
            .build();

        let (bus, _) = run("flamethrower", &mut attacker, &mut defender, vec![1]);
        assert_eq!(defender.status, Some(StatusCondition::Poison));
        assert!(bus.events().is_empty());
    }

    #[rstest::rstest]
    #[case(3, 1)]
    #[case(1, 2)]
    #[case(50, 3)]
    fn test_sleep_lasts_one_to_three_turns(#[case] outcome: u8, #[case] turns: u8) {
        let mut attacker = TestCombatantBuilder::new(3).build();
        let mut defender = TestCombatantBuilder::new(143).build();

        run("sleep-powder", &mut attacker, &mut defender, vec![outcome]);
        assert_eq!(defender.status, Some(StatusCondition::Sleep(turns)));
    }

    #[test]
    fn test_fainted_defender_receives_nothing() {
        let mut attacker = TestCombatantBuilder::new(65).build();
        let mut defender = TestCombatantBuilder::new(143).with_hp(0).build();

        let (bus, _) = run("psychic", &mut attacker, &mut defender, vec![1]);
        assert!(defender.stat_stages.is_neutral());
        assert!(bus.events().is_empty());
    }
}
