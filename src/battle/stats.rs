use crate::battle::state::TurnRng;
use crate::pokemon::{Combatant, MAX_STAT_STAGE, MIN_STAT_STAGE};
use schema::{MoveData, StatType};

/// Multiplier for a battle stat at `stage`.
/// Negative stages: 2 / (2 + |stage|), positive stages: (2 + stage) / 2.
/// Callers clamp stages when they change them; out-of-range input is clamped here too.
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE);
    if stage < 0 {
        2.0 / (2.0 + f64::from(-stage))
    } else {
        (2.0 + f64::from(stage)) / 2.0
    }
}

/// Accuracy and evasion use their own, flatter progression.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    match stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE) {
        -6 => 3.0 / 9.0,
        -5 => 3.0 / 8.0,
        -4 => 3.0 / 7.0,
        -3 => 3.0 / 6.0,
        -2 => 3.0 / 5.0,
        -1 => 3.0 / 4.0,
        0 => 1.0,
        1 => 4.0 / 3.0,
        2 => 5.0 / 3.0,
        3 => 6.0 / 3.0,
        4 => 7.0 / 3.0,
        5 => 8.0 / 3.0,
        _ => 9.0 / 3.0,
    }
}

/// `base_stat` scaled by the stage multiplier, rounded down.
pub fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    if stage == 0 {
        return base_stat;
    }
    (f64::from(base_stat) * stage_multiplier(stage)).floor() as u16
}

/// A combatant's stat after its current stage is applied.
pub fn effective_stat(combatant: &Combatant, stat: StatType) -> u16 {
    apply_stat_stage_multiplier(combatant.stats().get(stat), combatant.stat_stages.get(stat))
}

/// Speed used for turn order: staged speed, halved while paralyzed.
pub fn effective_speed(combatant: &Combatant) -> u16 {
    let speed = effective_stat(combatant, StatType::Speed);
    if combatant.is_paralyzed() {
        speed / 2
    } else {
        speed
    }
}

/// Hit chance in percent after the attacker's accuracy and the defender's evasion stages.
/// A move with accuracy 0 never misses.
pub fn hit_threshold(attacker: &Combatant, defender: &Combatant, move_data: &MoveData) -> u8 {
    if move_data.accuracy == 0 {
        return 100;
    }
    let accuracy_stage = attacker.stat_stages.get(StatType::Accuracy);
    let evasion_stage = defender.stat_stages.get(StatType::Evasion);
    let adjusted_stage = accuracy_stage
        .saturating_sub(evasion_stage)
        .clamp(MIN_STAT_STAGE, MAX_STAT_STAGE);

    let modified = (f64::from(move_data.accuracy) * accuracy_stage_multiplier(adjusted_stage)).round();
    modified.clamp(1.0, 100.0) as u8
}

/// Roll for a hit. Always consumes one outcome.
pub fn move_hits(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> bool {
    let threshold = hit_threshold(attacker, defender, move_data);
    rng.roll_percent(threshold, "accuracy check")
}
