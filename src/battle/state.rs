use crate::team::Team;
use schema::{StatType, StatusType};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Phase of a battle session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    /// Awaiting the player's move choice.
    Idle,
    /// A turn is being resolved or played back; new commands are rejected.
    Resolving,
    /// One side has run out of combatants. Terminal until the session is reset.
    Concluded,
}

/// Result of a concluded battle, from the player's point of view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Win => write!(f, "win"),
            BattleOutcome::Loss => write!(f, "loss"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Why a status-only move failed to inflict its condition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum StatusFailure {
    Immune,
    AlreadyAfflicted,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted {
        leader: String,
    },
    TurnStarted {
        turn_number: u32,
    },

    // Actions
    MoveUsed {
        side: Side,
        pokemon: String,
        move_name: String,
    },
    MoveMissed {
        side: Side,
        pokemon: String,
    },
    DamageDealt {
        side: Side,
        pokemon: String,
        damage: u16,
        remaining_hp: u16,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    NoEffect {
        side: Side,
        pokemon: String,
    },

    // Pre-action status checks
    FastAsleep {
        side: Side,
        pokemon: String,
    },
    WokeUp {
        side: Side,
        pokemon: String,
    },
    FrozenSolid {
        side: Side,
        pokemon: String,
    },
    Thawed {
        side: Side,
        pokemon: String,
    },
    FullyParalyzed {
        side: Side,
        pokemon: String,
    },

    // Secondary effects
    StatusApplied {
        side: Side,
        pokemon: String,
        status: StatusType,
    },
    StatusFailed {
        side: Side,
        pokemon: String,
        reason: StatusFailure,
    },
    StatusDamage {
        side: Side,
        pokemon: String,
        status: StatusType,
        damage: u16,
        remaining_hp: u16,
    },
    StatStageChanged {
        side: Side,
        pokemon: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        side: Side,
        pokemon: String,
        stat: StatType,
        rising: bool,
    },

    // Fainting and replacement
    PokemonFainted {
        side: Side,
        pokemon: String,
    },
    PokemonSentOut {
        side: Side,
        trainer: String,
        pokemon: String,
    },
    BattleConcluded {
        outcome: BattleOutcome,
        leader: String,
    },
}

impl BattleEvent {
    /// Narration line for this event, or `None` for silent bookkeeping events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { leader } => {
                Some(format!("Gym Leader {} wants to battle!", leader))
            }
            BattleEvent::TurnStarted { .. } => None,

            BattleEvent::MoveUsed {
                side,
                pokemon,
                move_name,
            } => Some(format!("{} used {}!", Self::label(*side, pokemon), move_name)),
            BattleEvent::MoveMissed { side, pokemon } => {
                Some(format!("{}'s attack missed!", Self::label(*side, pokemon)))
            }
            BattleEvent::DamageDealt {
                side,
                pokemon,
                damage,
                ..
            } => Some(format!("{} took {} damage!", Self::label(*side, pokemon), damage)),
            BattleEvent::AttackTypeEffectiveness { multiplier } => {
                if *multiplier > 1.0 {
                    Some("It's super effective!".to_string())
                } else if *multiplier > 0.0 && *multiplier < 1.0 {
                    Some("It's not very effective...".to_string())
                } else {
                    None
                }
            }
            BattleEvent::NoEffect { side, pokemon } => {
                Some(format!("It doesn't affect {}...", Self::label(*side, pokemon)))
            }

            BattleEvent::FastAsleep { side, pokemon } => {
                Some(format!("{} is fast asleep.", Self::label(*side, pokemon)))
            }
            BattleEvent::WokeUp { side, pokemon } => {
                Some(format!("{} woke up!", Self::label(*side, pokemon)))
            }
            BattleEvent::FrozenSolid { side, pokemon } => {
                Some(format!("{} is frozen solid!", Self::label(*side, pokemon)))
            }
            BattleEvent::Thawed { side, pokemon } => {
                Some(format!("{} thawed out!", Self::label(*side, pokemon)))
            }
            BattleEvent::FullyParalyzed { side, pokemon } => Some(format!(
                "{} is paralyzed! It can't move!",
                Self::label(*side, pokemon)
            )),

            BattleEvent::StatusApplied {
                side,
                pokemon,
                status,
            } => {
                let name = Self::label(*side, pokemon);
                Some(match status {
                    StatusType::Sleep => format!("{} fell asleep!", name),
                    StatusType::Freeze => format!("{} was frozen solid!", name),
                    StatusType::Paralysis => format!("{} is paralyzed!", name),
                    StatusType::Poison => format!("{} was poisoned!", name),
                    StatusType::Burn => format!("{} was burned!", name),
                })
            }
            BattleEvent::StatusFailed {
                side,
                pokemon,
                reason,
            } => match reason {
                StatusFailure::Immune => Some(format!(
                    "It doesn't affect {}...",
                    Self::label(*side, pokemon)
                )),
                StatusFailure::AlreadyAfflicted => Some("But it failed!".to_string()),
            },
            BattleEvent::StatusDamage {
                side,
                pokemon,
                status,
                damage,
                ..
            } => {
                let name = Self::label(*side, pokemon);
                match status {
                    StatusType::Poison => {
                        Some(format!("{} is hurt by poison! ({})", name, damage))
                    }
                    StatusType::Burn => Some(format!("{} is hurt by its burn! ({})", name, damage)),
                    _ => None,
                }
            }
            BattleEvent::StatStageChanged {
                side,
                pokemon,
                stat,
                old_stage,
                new_stage,
            } => {
                let name = Self::label(*side, pokemon);
                let change = new_stage - old_stage;
                let verb = match change {
                    c if c >= 2 => "rose sharply",
                    c if c > 0 => "rose",
                    c if c <= -2 => "harshly fell",
                    _ => "fell",
                };
                Some(format!("{}'s {} {}!", name, stat, verb))
            }
            BattleEvent::StatChangeBlocked {
                side,
                pokemon,
                stat,
                rising,
            } => {
                let direction = if *rising { "higher" } else { "lower" };
                Some(format!(
                    "{}'s {} won't go any {}!",
                    Self::label(*side, pokemon),
                    stat,
                    direction
                ))
            }

            BattleEvent::PokemonFainted { side, pokemon } => {
                Some(format!("{} fainted!", Self::label(*side, pokemon)))
            }
            BattleEvent::PokemonSentOut {
                side,
                trainer,
                pokemon,
            } => match side {
                Side::Player => Some(format!("Go! {}!", pokemon)),
                Side::Opponent => Some(format!("{} sent out {}!", trainer, pokemon)),
            },
            BattleEvent::BattleConcluded { outcome, leader } => match outcome {
                BattleOutcome::Win => Some(format!("You defeated Gym Leader {}!", leader)),
                BattleOutcome::Loss => Some(format!("You lost to Gym Leader {}...", leader)),
            },
        }
    }

    fn label(side: Side, pokemon: &str) -> String {
        match side {
            Side::Player => pokemon.to_string(),
            Side::Opponent => format!("The foe's {}", pokemon),
        }
    }
}

/// Events produced while resolving a turn, in the order they happened.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }
}

/// Rolling narration log. Newest line first, oldest dropped past capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl BattleLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        self.lines.push_front(line);
        self.lines.truncate(self.capacity);
    }

    pub fn record(&mut self, event: &BattleEvent) {
        if let Some(line) = event.format() {
            self.push(line);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Both teams plus the bookkeeping the turn controller mutates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleState {
    pub player: Team,
    pub opponent: Team,
    pub leader_name: String,
    pub turn_number: u32,
    pub game_state: GameState,
    pub outcome: Option<BattleOutcome>,
}

impl BattleState {
    pub fn new(player: Team, opponent: Team, leader_name: String) -> Self {
        Self {
            player,
            opponent,
            leader_name,
            turn_number: 0,
            game_state: GameState::Idle,
            outcome: None,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// The acting side's team and the other team, borrowed together.
    pub fn teams_mut(&mut self, acting: Side) -> (&mut Team, &mut Team) {
        match acting {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    /// Display name of the trainer controlling `side`.
    pub fn trainer_name(&self, side: Side) -> &str {
        match side {
            Side::Player => "You",
            Side::Opponent => &self.leader_name,
        }
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Live(rand::rngs::StdRng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

/// Source of every random outcome in a battle. Outcomes are integers in 1..=100.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// A fixed list of outcomes, consumed in order. Running out is a test bug and panics.
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        use rand::SeedableRng;
        Self {
            source: RngSource::Live(rand::rngs::StdRng::from_rng(&mut rand::rng())),
        }
    }

    /// A live generator with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            source: RngSource::Live(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            RngSource::Live(rng) => {
                use rand::Rng;
                rng.random_range(1..=100)
            }
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];
                *index += 1;
                outcome
            }
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        outcome
    }

    /// True when the next outcome is at most `threshold` percent.
    pub fn roll_percent(&mut self, threshold: u8, reason: &str) -> bool {
        self.next_outcome(reason) <= threshold
    }

    /// Uniform index in `0..len`. Scripted outcomes map onto equal buckets of 1..=100.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        if len <= 1 {
            return 0;
        }
        if let RngSource::Live(rng) = &mut self.source {
            use rand::Rng;
            return rng.random_range(0..len);
        }
        let outcome = usize::from(self.next_outcome(reason).clamp(1, 100));
        ((outcome - 1) * len / 100).min(len - 1)
    }

    /// Uniform index in `0..len`. Scripted outcomes map by remainder, so outcome 3 with
    /// `len` 3 gives 0.
    pub fn cycle_index(&mut self, len: usize, reason: &str) -> usize {
        if len <= 1 {
            return 0;
        }
        if let RngSource::Live(rng) = &mut self.source {
            use rand::Rng;
            return rng.random_range(0..len);
        }
        usize::from(self.next_outcome(reason)) % len
    }

    /// How many scripted outcomes have been consumed. Always 0 for live generators.
    pub fn consumed(&self) -> usize {
        match &self.source {
            RngSource::Live(_) => 0,
            RngSource::Scripted { index, .. } => *index,
        }
    }
}
