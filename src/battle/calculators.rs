use crate::battle::state::TurnRng;
use crate::battle::stats::{apply_stat_stage_multiplier, stage_multiplier};
use crate::pokemon::Combatant;
use schema::{DamageClass, MoveData, PokemonType, StatType};
use tracing::debug;

/// Same-type attack bonus.
const STAB_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageResult {
    pub damage: u16,
    pub effectiveness: f64,
}

/// Random damage factor in [0.85, 1.0) for an outcome in 1..=100.
pub fn damage_roll_factor(outcome: u8) -> f64 {
    0.85 + 0.15 * f64::from(outcome.clamp(1, 100) - 1) / 100.0
}

/// Offense stat for the move's damage class, after stages and the burn penalty.
fn offense_stat(attacker: &Combatant, move_data: &MoveData) -> u16 {
    match move_data.damage_class {
        DamageClass::Special => apply_stat_stage_multiplier(
            attacker.stats().sp_attack,
            attacker.stat_stages.get(StatType::SpecialAttack),
        ),
        DamageClass::Physical | DamageClass::Status => {
            let stage_scaled = f64::from(attacker.stats().attack)
                * stage_multiplier(attacker.stat_stages.get(StatType::Attack));
            let burn_modifier = if attacker.is_burned() { 0.5 } else { 1.0 };
            (stage_scaled * burn_modifier).floor() as u16
        }
    }
}

fn defense_stat(defender: &Combatant, move_data: &MoveData) -> u16 {
    match move_data.damage_class {
        DamageClass::Special => apply_stat_stage_multiplier(
            defender.stats().sp_defense,
            defender.stat_stages.get(StatType::SpecialDefense),
        ),
        DamageClass::Physical | DamageClass::Status => apply_stat_stage_multiplier(
            defender.stats().defense,
            defender.stat_stages.get(StatType::Defense),
        ),
    }
}

/// Damage dealt by `move_data` from `attacker` to `defender`.
///
/// Immunity short-circuits before anything else and draws no randomness. Fixed-damage
/// moves deal the attacker's level and also draw nothing. Everything else draws exactly
/// one outcome for the random factor.
pub fn compute_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> DamageResult {
    let effectiveness = PokemonType::effectiveness_multiplier(move_data.move_type, defender.types());
    if effectiveness == 0.0 {
        return DamageResult {
            damage: 0,
            effectiveness,
        };
    }

    if move_data.is_fixed_damage() {
        return DamageResult {
            damage: attacker.level(),
            effectiveness,
        };
    }

    let attack = f64::from(offense_stat(attacker, move_data));
    // A zero defense can only come from a corrupt record.
    let defense = f64::from(defense_stat(defender, move_data).max(1));
    let level_factor = f64::from(2 * attacker.level() / 5 + 2);
    let base_damage =
        ((level_factor * f64::from(move_data.power) * (attack / defense)) / 50.0 + 2.0).floor();

    let stab = if attacker.has_type(move_data.move_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    };

    let roll = rng.next_outcome("damage roll");
    let random_factor = damage_roll_factor(roll);
    let damage = (base_damage * effectiveness * stab * random_factor).floor();

    debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        move_name = %move_data.name,
        base_damage,
        effectiveness,
        stab,
        random_factor,
        damage,
        "Damage calculated"
    );

    DamageResult {
        damage: damage.clamp(0.0, f64::from(u16::MAX)) as u16,
        effectiveness,
    }
}
