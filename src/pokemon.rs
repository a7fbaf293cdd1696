use schema::{BaseStats, MoveData, PokemonType, SpeciesRecord, StatType, StatusType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Every combatant fights at this level.
pub const BATTLE_LEVEL: u16 = 50;

/// Rental and leader combatants use perfect IVs and no EVs.
const DEFAULT_IV: u16 = 31;

pub const MIN_STAT_STAGE: i8 = -6;
pub const MAX_STAT_STAGE: i8 = 6;

/// Non-volatile status held by a combatant. Sleep carries its remaining turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCondition {
    Sleep(u8),
    Freeze,
    Paralysis,
    Poison,
    Burn,
}

impl StatusCondition {
    /// Build the condition a move inflicts. `sleep_turns` is only used for sleep.
    pub fn from_status_type(status: StatusType, sleep_turns: u8) -> Self {
        match status {
            StatusType::Sleep => StatusCondition::Sleep(sleep_turns),
            StatusType::Freeze => StatusCondition::Freeze,
            StatusType::Paralysis => StatusCondition::Paralysis,
            StatusType::Poison => StatusCondition::Poison,
            StatusType::Burn => StatusCondition::Burn,
        }
    }

    pub fn status_type(&self) -> StatusType {
        match self {
            StatusCondition::Sleep(_) => StatusType::Sleep,
            StatusCondition::Freeze => StatusType::Freeze,
            StatusCondition::Paralysis => StatusType::Paralysis,
            StatusCondition::Poison => StatusType::Poison,
            StatusCondition::Burn => StatusType::Burn,
        }
    }

    /// Short tag shown next to the HP bar.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StatusCondition::Sleep(_) => "SLP",
            StatusCondition::Freeze => "FRZ",
            StatusCondition::Paralysis => "PAR",
            StatusCondition::Poison => "PSN",
            StatusCondition::Burn => "BRN",
        }
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_type())
    }
}

/// Stat stage modifiers, each kept within [-6, +6]. Unset stats are at stage 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatStages {
    stages: HashMap<StatType, i8>,
}

impl StatStages {
    pub fn get(&self, stat: StatType) -> i8 {
        self.stages.get(&stat).copied().unwrap_or(0)
    }

    pub fn set(&mut self, stat: StatType, stage: i8) {
        let clamped = stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE);
        if clamped == 0 {
            self.stages.remove(&stat);
        } else {
            self.stages.insert(stat, clamped);
        }
    }

    /// Add `delta` to the stage, clamping the result. Returns `(old, new)`.
    pub fn modify(&mut self, stat: StatType, delta: i8) -> (i8, i8) {
        let old_stage = self.get(stat);
        let new_stage = old_stage.saturating_add(delta).clamp(MIN_STAT_STAGE, MAX_STAT_STAGE);
        self.set(stat, new_stage);
        (old_stage, new_stage)
    }

    pub fn clear(&mut self) {
        self.stages.clear();
    }

    pub fn is_neutral(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Level-50 stats derived from a species' base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl Stats {
    /// HP = floor((2*base + IV) * L / 100) + L + 10, others = floor((2*base + IV) * L / 100) + 5
    pub fn at_battle_level(base: &BaseStats) -> Self {
        let scaled = |base: u8| (2 * u16::from(base) + DEFAULT_IV) * BATTLE_LEVEL / 100;
        Stats {
            hp: scaled(base.hp) + BATTLE_LEVEL + 10,
            attack: scaled(base.attack) + 5,
            defense: scaled(base.defense) + 5,
            sp_attack: scaled(base.sp_attack) + 5,
            sp_defense: scaled(base.sp_defense) + 5,
            speed: scaled(base.speed) + 5,
        }
    }

    /// Raw value for a battle stat. Accuracy and evasion have no raw value.
    pub fn get(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.sp_attack,
            StatType::SpecialDefense => self.sp_defense,
            StatType::Speed => self.speed,
            StatType::Accuracy | StatType::Evasion => 0,
        }
    }
}

/// A species brought into battle: its fixed record plus mutable HP, status and stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    species: SpeciesRecord,
    moves: Vec<MoveData>,
    stats: Stats,
    current_hp: u16,
    pub status: Option<StatusCondition>,
    pub stat_stages: StatStages,
}

impl Combatant {
    pub fn new(species: &SpeciesRecord) -> Self {
        let stats = Stats::at_battle_level(&species.base_stats);
        let moves = if species.moves.is_empty() {
            vec![MoveData::tackle()]
        } else {
            species.moves.clone()
        };

        Combatant {
            species: species.clone(),
            moves,
            stats,
            current_hp: stats.hp,
            status: None,
            stat_stages: StatStages::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn species(&self) -> &SpeciesRecord {
        &self.species
    }

    pub fn species_id(&self) -> u16 {
        self.species.id
    }

    pub fn types(&self) -> &[PokemonType] {
        &self.species.types
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.species.has_type(pokemon_type)
    }

    pub fn moves(&self) -> &[MoveData] {
        &self.moves
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn level(&self) -> u16 {
        BATTLE_LEVEL
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Set HP directly, capped at max HP.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    /// Reduce HP, stopping at 0. Returns true if this damage made the combatant faint.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        let was_fainted = self.is_fainted();
        self.current_hp = self.current_hp.saturating_sub(damage);
        !was_fainted && self.is_fainted()
    }

    /// Record the faint: HP to 0 and status cleared.
    pub fn faint(&mut self) {
        self.current_hp = 0;
        self.status = None;
    }

    pub fn is_paralyzed(&self) -> bool {
        matches!(self.status, Some(StatusCondition::Paralysis))
    }

    pub fn is_burned(&self) -> bool {
        matches!(self.status, Some(StatusCondition::Burn))
    }

    /// Replace the computed stats, refilling HP to the new maximum.
    #[cfg(test)]
    pub fn set_stats(&mut self, stats: Stats) {
        self.stats = stats;
        self.current_hp = stats.hp;
    }

    /// Back to full HP with no status and neutral stages.
    pub fn restore(&mut self) {
        self.current_hp = self.max_hp();
        self.status = None;
        self.stat_stages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn species(base: BaseStats, moves: Vec<MoveData>) -> SpeciesRecord {
        SpeciesRecord {
            id: 1,
            name: "Testmon".to_string(),
            types: vec![PokemonType::Normal],
            base_stats: base,
            sprites: Default::default(),
            moves,
        }
    }

    #[test]
    fn test_level_50_stats() {
        // Pikachu: 35/55/40/50/50/90
        let base = BaseStats {
            hp: 35,
            attack: 55,
            defense: 40,
            sp_attack: 50,
            sp_defense: 50,
            speed: 90,
        };
        assert_eq!(
            Stats::at_battle_level(&base),
            Stats {
                hp: 110,
                attack: 75,
                defense: 60,
                sp_attack: 70,
                sp_defense: 70,
                speed: 110,
            }
        );
    }

    #[test]
    fn test_species_without_moves_gets_tackle() {
        let combatant = Combatant::new(&species(BaseStats::default(), vec![]));
        assert_eq!(combatant.moves(), &[MoveData::tackle()]);
    }

    #[test]
    fn test_hp_stays_within_bounds() {
        let mut combatant = Combatant::new(&species(BaseStats::default(), vec![]));
        let max_hp = combatant.max_hp();

        combatant.set_hp(max_hp + 100);
        assert_eq!(combatant.current_hp(), max_hp);

        assert!(!combatant.take_damage(10));
        assert_eq!(combatant.current_hp(), max_hp - 10);

        assert!(combatant.take_damage(u16::MAX));
        assert_eq!(combatant.current_hp(), 0);
        assert!(!combatant.take_damage(5), "Already fainted");
    }

    #[test]
    fn test_faint_clears_status() {
        let mut combatant = Combatant::new(&species(BaseStats::default(), vec![]));
        combatant.status = Some(StatusCondition::Poison);
        combatant.faint();
        assert!(combatant.is_fainted());
        assert_eq!(combatant.status, None);
    }

    #[test]
    fn test_stat_stages_clamp() {
        let mut stages = StatStages::default();
        assert_eq!(stages.modify(StatType::Attack, 2), (0, 2));
        assert_eq!(stages.modify(StatType::Attack, 6), (2, 6));
        assert_eq!(stages.modify(StatType::Attack, 1), (6, 6));
        assert_eq!(stages.modify(StatType::Speed, -7), (0, -6));
        assert_eq!(stages.get(StatType::Defense), 0);

        stages.clear();
        assert!(stages.is_neutral());
    }

    #[test]
    fn test_restore_resets_battle_state() {
        let mut combatant = Combatant::new(&species(BaseStats::default(), vec![]));
        combatant.take_damage(30);
        combatant.status = Some(StatusCondition::Burn);
        combatant.stat_stages.modify(StatType::Defense, -2);

        combatant.restore();
        assert_eq!(combatant.current_hp(), combatant.max_hp());
        assert_eq!(combatant.status, None);
        assert!(combatant.stat_stages.is_neutral());
    }
}
