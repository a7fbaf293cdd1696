use crate::battle::engine::{resolve_turn, TurnReport};
use crate::battle::state::{BattleEvent, BattleLog, BattleOutcome, BattleState, GameState, TurnRng};
use crate::config::EngineConfig;
use crate::errors::{ActionError, BattleResult};
use crate::pokemon::Combatant;
use crate::team::Team;
use schema::SpeciesRecord;
use tracing::{info, warn};

/// A battle between the player's rentals and a gym leader.
///
/// The session owns both teams. Callers read state through accessors and change it only
/// through [`BattleSession::select_move`], [`BattleSession::finish_turn`] and
/// [`BattleSession::reset`].
#[derive(Debug, Clone)]
pub struct BattleSession {
    state: BattleState,
    log: BattleLog,
}

impl BattleSession {
    pub fn start(
        player_roster: &[SpeciesRecord],
        opponent_roster: &[SpeciesRecord],
        leader_name: &str,
        config: &EngineConfig,
    ) -> BattleResult<Self> {
        let player = Team::from_species(player_roster)?;
        let opponent = Team::from_species(opponent_roster)?;
        Ok(Self::from_teams(player, opponent, leader_name, config.log_capacity))
    }

    pub fn from_teams(player: Team, opponent: Team, leader_name: &str, log_capacity: usize) -> Self {
        let mut session = Self {
            state: BattleState::new(player, opponent, leader_name.to_string()),
            log: BattleLog::new(log_capacity),
        };
        session.announce();
        session
    }

    fn announce(&mut self) {
        info!(
            leader = %self.state.leader_name,
            player_lead = self.state.player.active().name(),
            opponent_lead = self.state.opponent.active().name(),
            "Battle started"
        );
        self.log.record(&BattleEvent::BattleStarted {
            leader: self.state.leader_name.clone(),
        });
    }

    /// Resolve a turn with the player's move at `move_index`.
    ///
    /// Only valid while `Idle`. The turn is fully resolved before this returns; the session
    /// then stays in `Resolving` (or `Concluded`) until [`BattleSession::finish_turn`].
    pub fn select_move(&mut self, move_index: usize, rng: &mut TurnRng) -> Result<TurnReport, ActionError> {
        match self.state.game_state {
            GameState::Resolving => {
                warn!(move_index, "Rejected move selection while a turn is resolving");
                return Err(ActionError::TurnInProgress);
            }
            GameState::Concluded => {
                warn!(move_index, "Rejected move selection after the battle concluded");
                return Err(ActionError::BattleConcluded);
            }
            GameState::Idle => {}
        }

        if move_index >= self.state.player.active().moves().len() {
            warn!(move_index, "Rejected invalid move index");
            return Err(ActionError::InvalidMoveIndex(move_index));
        }

        let bus = resolve_turn(&mut self.state, move_index, rng);
        for event in bus.events() {
            self.log.record(event);
        }

        Ok(TurnReport {
            turn_number: self.state.turn_number,
            events: bus.into_events(),
            outcome: self.outcome(),
        })
    }

    /// Leave `Resolving` once the turn's playback is over. A no-op after the battle concluded.
    pub fn finish_turn(&mut self) -> Result<(), ActionError> {
        match self.state.game_state {
            GameState::Resolving => {
                self.state.game_state = GameState::Idle;
                Ok(())
            }
            GameState::Concluded => Ok(()),
            GameState::Idle => Err(ActionError::NoTurnInProgress),
        }
    }

    /// Select a move and immediately finish the turn.
    pub fn play_turn(&mut self, move_index: usize, rng: &mut TurnRng) -> Result<TurnReport, ActionError> {
        let report = self.select_move(move_index, rng)?;
        self.finish_turn()?;
        Ok(report)
    }

    /// Start the match over with both teams fully restored.
    pub fn reset(&mut self) {
        self.state.player.reset();
        self.state.opponent.reset();
        self.state.turn_number = 0;
        self.state.outcome = None;
        self.state.game_state = GameState::Idle;
        self.log.clear();
        self.announce();
    }

    pub fn phase(&self) -> GameState {
        self.state.game_state
    }

    /// The result, only once the battle has concluded.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state.game_state {
            GameState::Concluded => self.state.outcome,
            _ => None,
        }
    }

    pub fn player_active(&self) -> &Combatant {
        self.state.player.active()
    }

    pub fn opponent_active(&self) -> &Combatant {
        self.state.opponent.active()
    }

    pub fn player_team(&self) -> &Team {
        &self.state.player
    }

    pub fn opponent_team(&self) -> &Team {
        &self.state.opponent
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn_number
    }

    pub fn leader_name(&self) -> &str {
        &self.state.leader_name
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }
}
