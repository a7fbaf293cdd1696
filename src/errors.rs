use thiserror::Error;

/// Main error type for the daily gym battle engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Error related to loading or validating the roster dataset
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid player commands
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error related to daily challenge generation
    #[error("Challenge error: {0}")]
    Challenge(#[from] ChallengeError),
    /// Error related to rental team selection
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
    /// Error related to the engine configuration file
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to the static roster dataset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("Malformed RON dataset: {0}")]
    Ron(String),
    #[error("Malformed JSON dataset: {0}")]
    Json(String),
    #[error("Duplicate species id: {0}")]
    DuplicateSpecies(u16),
    #[error("Species {species} references unknown move '{move_name}'")]
    UnknownMove { species: u16, move_name: String },
    #[error("Dataset contains no species")]
    Empty,
}

/// Errors related to battle construction and invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    #[error("A team needs at least one combatant")]
    EmptyTeam,
    #[error("A team holds at most {max} combatants, got {got}")]
    TeamTooLarge { max: usize, got: usize },
}

/// Rejected player commands. None of these mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("A turn is already being resolved")]
    TurnInProgress,
    #[error("The battle has already concluded")]
    BattleConcluded,
    #[error("No turn is being resolved")]
    NoTurnInProgress,
    #[error("Invalid move index: {0}")]
    InvalidMoveIndex(usize),
}

/// Errors raised while generating the daily challenge
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChallengeError {
    #[error("Leader roster references species {0}, which is not in the dataset")]
    UnknownSpecies(u16),
    #[error("Rental pool exhausted: requested {requested} species but only {available} remain")]
    RentalPoolExhausted { requested: usize, available: usize },
}

/// Errors raised while picking a team from the rental roster
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Species {0} is not part of today's rentals")]
    NotARental(u16),
    #[error("A team already has {0} members")]
    TeamFull(usize),
    #[error("A team needs exactly {required} members, got {got}")]
    IncompleteTeam { required: usize, got: usize },
}

/// Errors related to the engine configuration file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("Malformed config: {0}")]
    Parse(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using DatasetError
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Type alias for Results using ChallengeError
pub type ChallengeResult<T> = Result<T, ChallengeError>;
