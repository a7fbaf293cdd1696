//! Daily Gym Battle Engine
//!
//! A turn-based creature battle engine with level-50 rental teams, plus a deterministic
//! daily challenge that picks one gym leader and a rental roster per Korean calendar day.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod challenge;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod pokemon;
pub mod team;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, DamageClass, MoveCategory, MoveData, MoveEffect, PokemonType, SpeciesRecord,
    StatChange, StatType, StatusType,
};

// --- From this crate's modules (`src/`) ---

// Battle engine and session.
pub use battle::engine::{resolve_turn, TurnReport};
pub use battle::runner::{BattleInfo, BattleRunner};
pub use battle::session::BattleSession;
pub use battle::state::{BattleEvent, BattleLog, BattleOutcome, BattleState, GameState, Side, TurnRng};

// Daily challenge.
pub use challenge::{
    generate_daily_challenge, time_until_next_challenge, Countdown, DailyChallenge, DateProvider,
    GymLeader, TeamSelection,
};

pub use config::{EngineConfig, PacingConfig};
pub use dataset::Dataset;
pub use pokemon::{Combatant, StatusCondition};
pub use team::Team;

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, ChallengeError,
    ChallengeResult, ConfigError, DatasetError, DatasetResult, SelectionError,
};
