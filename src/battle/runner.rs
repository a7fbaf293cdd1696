use crate::battle::engine::TurnReport;
use crate::battle::session::BattleSession;
use crate::battle::state::{BattleEvent, BattleOutcome, GameState, TurnRng};
use crate::config::PacingConfig;
use crate::errors::ActionError;
use crate::pokemon::{Combatant, StatusCondition};
use crate::team::Team;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Snapshot of a battle for a presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleInfo {
    pub leader_name: String,
    pub turn_number: u32,
    pub game_state: GameState,
    pub outcome: Option<BattleOutcome>,
    pub player: TeamInfo,
    pub opponent: TeamInfo,
    /// Newest first.
    pub log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamInfo {
    pub active_index: usize,
    pub members: Vec<CombatantInfo>,
    pub fainted_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombatantInfo {
    pub species_id: u16,
    pub name: String,
    pub current_hp: u16,
    pub max_hp: u16,
    pub is_fainted: bool,
    pub status: Option<StatusCondition>,
    pub moves: Vec<String>,
}

impl From<&Combatant> for CombatantInfo {
    fn from(combatant: &Combatant) -> Self {
        Self {
            species_id: combatant.species_id(),
            name: combatant.name().to_string(),
            current_hp: combatant.current_hp(),
            max_hp: combatant.max_hp(),
            is_fainted: combatant.is_fainted(),
            status: combatant.status,
            moves: combatant.moves().iter().map(|m| m.display_name()).collect(),
        }
    }
}

impl From<&Team> for TeamInfo {
    fn from(team: &Team) -> Self {
        Self {
            active_index: team.active_index(),
            members: team.members().iter().map(CombatantInfo::from).collect(),
            fainted_count: team.len() - team.remaining(),
        }
    }
}

impl From<&BattleSession> for BattleInfo {
    fn from(session: &BattleSession) -> Self {
        Self {
            leader_name: session.leader_name().to_string(),
            turn_number: session.turn_number(),
            game_state: session.phase(),
            outcome: session.outcome(),
            player: TeamInfo::from(session.player_team()),
            opponent: TeamInfo::from(session.opponent_team()),
            log: session.log().lines().map(str::to_string).collect(),
        }
    }
}

/// Shared handle that plays turns back with pacing delays.
///
/// The turn is resolved up front while the session lock is held; the delays only pace the
/// narration. The session stays in `Resolving` for the whole playback, so a second
/// `play_move` during playback is rejected with [`ActionError::TurnInProgress`].
#[derive(Debug, Clone)]
pub struct BattleRunner {
    session: Arc<Mutex<BattleSession>>,
    pacing: PacingConfig,
}

impl BattleRunner {
    pub fn new(session: BattleSession, pacing: PacingConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            pacing,
        }
    }

    pub async fn info(&self) -> BattleInfo {
        BattleInfo::from(&*self.session.lock().await)
    }

    pub async fn phase(&self) -> GameState {
        self.session.lock().await.phase()
    }

    pub async fn outcome(&self) -> Option<BattleOutcome> {
        self.session.lock().await.outcome()
    }

    /// Resolve a turn, then hand each narrated event to `on_event` with pacing in between.
    pub async fn play_move<F>(
        &self,
        move_index: usize,
        rng: &mut TurnRng,
        mut on_event: F,
    ) -> Result<TurnReport, ActionError>
    where
        F: FnMut(&BattleEvent),
    {
        let report = self.session.lock().await.select_move(move_index, rng)?;
        debug!(turn = report.turn_number, events = report.events.len(), "Playing back turn");

        for event in &report.events {
            if event.format().is_none() {
                continue;
            }
            on_event(event);
            let delay = match event {
                BattleEvent::PokemonFainted { .. } => self.pacing.faint_delay(),
                _ => self.pacing.action_delay(),
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        self.session.lock().await.finish_turn()?;
        Ok(report)
    }

    /// Restart the match. Rejected while a turn is playing back.
    pub async fn reset(&self) -> Result<(), ActionError> {
        let mut session = self.session.lock().await;
        if session.phase() == GameState::Resolving {
            return Err(ActionError::TurnInProgress);
        }
        session.reset();
        Ok(())
    }
}
