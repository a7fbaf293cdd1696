//! Deterministic daily gym challenge: one leader and a rental roster per KST calendar day.

pub mod clock;
pub mod leaders;
pub mod prng;
pub mod selection;

pub use clock::{
    kst_date, time_until_next_challenge, Countdown, DateProvider, FixedClock, SystemClock,
    VirtualDayClock,
};
pub use leaders::{GymLeader, GYM_LEADERS};
pub use prng::{daily_seed, Mulberry32};
pub use selection::TeamSelection;

use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::errors::{ChallengeError, ChallengeResult};
use chrono::NaiveDate;
use schema::SpeciesRecord;
use serde::Serialize;
use tracing::info;

/// Everything the player needs to know about one day's challenge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyChallenge {
    pub date: NaiveDate,
    pub seed: u32,
    pub leader: GymLeader,
    /// In send-out order.
    pub leader_roster: Vec<SpeciesRecord>,
    /// In draw order. Never overlaps the leader's roster.
    pub rentals: Vec<SpeciesRecord>,
}

impl DailyChallenge {
    pub fn leader_roster_ids(&self) -> Vec<u16> {
        self.leader_roster.iter().map(|record| record.id).collect()
    }

    pub fn rental_ids(&self) -> Vec<u16> {
        self.rentals.iter().map(|record| record.id).collect()
    }

    pub fn selection(&self) -> TeamSelection {
        TeamSelection::new(&self.rentals)
    }
}

/// Build the challenge for a KST calendar date.
///
/// The first generator draw picks the leader. Each following draw takes one rental out of
/// the species not on the leader's roster, in dataset order, without replacement.
pub fn generate_daily_challenge(
    date: NaiveDate,
    dataset: &Dataset,
    config: &EngineConfig,
) -> ChallengeResult<DailyChallenge> {
    let seed = daily_seed(date);
    let mut rng = Mulberry32::new(seed);

    let leader = GYM_LEADERS[rng.next_index(GYM_LEADERS.len())];
    let leader_roster = leader
        .roster
        .iter()
        .map(|&id| {
            dataset
                .get(id)
                .cloned()
                .ok_or(ChallengeError::UnknownSpecies(id))
        })
        .collect::<ChallengeResult<Vec<_>>>()?;

    let mut pool: Vec<&SpeciesRecord> = dataset
        .iter()
        .filter(|record| !leader.roster.contains(&record.id))
        .collect();
    let requested = config.rental_pool_size;
    if pool.len() < requested {
        return Err(ChallengeError::RentalPoolExhausted {
            requested,
            available: pool.len(),
        });
    }

    let mut rentals = Vec::with_capacity(requested);
    for _ in 0..requested {
        let index = rng.next_index(pool.len());
        rentals.push(pool.remove(index).clone());
    }

    let challenge = DailyChallenge {
        date,
        seed,
        leader,
        leader_roster,
        rentals,
    };
    info!(
        %date,
        seed,
        leader = leader.name,
        rentals = ?challenge.rental_ids(),
        "Generated daily challenge"
    );
    Ok(challenge)
}

/// The challenge for whatever day `clock` says it is in Korea.
pub fn todays_challenge<P: DateProvider>(
    clock: &P,
    dataset: &Dataset,
    config: &EngineConfig,
) -> ChallengeResult<DailyChallenge> {
    generate_daily_challenge(clock.today_kst(), dataset, config)
}
