use crate::battle::session::BattleSession;
use crate::battle::state::{BattleEvent, Side, TurnRng};
use crate::dataset::Dataset;
use crate::pokemon::{Combatant, StatusCondition, Stats};
use crate::team::Team;
use schema::{MoveData, StatType};

/// A builder for test combatants backed by the bundled dataset.
///
/// # Example
/// ```ignore
/// let pikachu = TestCombatantBuilder::new(25)
///     .with_moves(&["thunderbolt"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    species_id: u16,
    moves: Option<Vec<String>>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
    stats: Option<Stats>,
    stages: Vec<(StatType, i8)>,
}

impl TestCombatantBuilder {
    pub fn new(species_id: u16) -> Self {
        Self {
            species_id,
            moves: None,
            status: None,
            current_hp: None,
            stats: None,
            stages: Vec::new(),
        }
    }

    /// Replace the species' moves with moves from the bundled dataset.
    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = Some(moves.iter().map(|name| name.to_string()).collect());
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// Override the level-50 stats, e.g. to match hand-computed damage.
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_stage(mut self, stat: StatType, stage: i8) -> Self {
        self.stages.push((stat, stage));
        self
    }

    pub fn build(self) -> Combatant {
        let dataset = match Dataset::bundled() {
            Ok(dataset) => dataset,
            Err(err) => panic!("Failed to load bundled dataset: {}", err),
        };
        let mut record = match dataset.get(self.species_id) {
            Some(record) => record.clone(),
            None => panic!("Species {} is not in the bundled dataset", self.species_id),
        };
        if let Some(moves) = &self.moves {
            record.moves = moves.iter().map(|name| move_named(name)).collect();
        }

        let mut combatant = Combatant::new(&record);
        if let Some(stats) = self.stats {
            combatant.set_stats(stats);
        }
        for (stat, stage) in self.stages {
            combatant.stat_stages.set(stat, stage);
        }
        combatant.status = self.status;
        if let Some(hp) = self.current_hp {
            combatant.set_hp(hp);
        }
        combatant
    }
}

/// Look up a move by name among the bundled species' moves.
pub fn move_named(name: &str) -> MoveData {
    if name == "tackle" {
        return MoveData::tackle();
    }
    let dataset = match Dataset::bundled() {
        Ok(dataset) => dataset,
        Err(err) => panic!("Failed to load bundled dataset: {}", err),
    };
    match dataset
        .iter()
        .flat_map(|species| species.moves.iter())
        .find(|move_data| move_data.name == name)
    {
        Some(move_data) => move_data.clone(),
        None => panic!("No bundled species knows '{}'", name),
    }
}

/// Creates a session against a leader named "Brock" with the default log size.
pub fn create_test_session(player: Vec<Combatant>, opponent: Vec<Combatant>) -> BattleSession {
    let player = Team::new(player).unwrap_or_else(|err| panic!("Invalid player team: {}", err));
    let opponent =
        Team::new(opponent).unwrap_or_else(|err| panic!("Invalid opponent team: {}", err));
    BattleSession::from_teams(player, opponent, "Brock", 5)
}

/// A `TurnRng` with a long list of 50s, for tests where the outcomes don't matter.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// The side whose move was announced first in `events`.
pub fn first_mover(events: &[BattleEvent]) -> Option<Side> {
    events.iter().find_map(|event| match event {
        BattleEvent::MoveUsed { side, .. } => Some(*side),
        _ => None,
    })
}

pub fn count_events<F>(events: &[BattleEvent], predicate: F) -> usize
where
    F: Fn(&BattleEvent) -> bool,
{
    events.iter().filter(|event| predicate(event)).count()
}
