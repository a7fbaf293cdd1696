//! Where "now" comes from, and what calendar day it is in Korea.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Korea Standard Time is UTC+9 with no daylight saving.
pub const KST_OFFSET_HOURS: i64 = 9;

/// Source of the current instant for the challenge generator.
pub trait DateProvider {
    fn now(&self) -> DateTime<Utc>;

    /// The KST calendar date at [`DateProvider::now`].
    fn today_kst(&self) -> NaiveDate {
        kst_date(self.now())
    }
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl DateProvider for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl DateProvider for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Shifts another provider by whole days, for previewing other days' challenges.
#[derive(Debug, Clone, Copy)]
pub struct VirtualDayClock<P> {
    inner: P,
    day_offset: i64,
}

impl<P: DateProvider> VirtualDayClock<P> {
    pub fn new(inner: P, day_offset: i64) -> Self {
        Self { inner, day_offset }
    }

    pub fn day_offset(&self) -> i64 {
        self.day_offset
    }

    pub fn advance(&mut self, days: i64) {
        self.day_offset += days;
    }
}

impl<P: DateProvider> DateProvider for VirtualDayClock<P> {
    fn now(&self) -> DateTime<Utc> {
        self.inner.now() + Duration::days(self.day_offset)
    }
}

/// Time left until the next challenge unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// KST calendar date of a UTC instant.
pub fn kst_date(now: DateTime<Utc>) -> NaiveDate {
    (now.naive_utc() + Duration::hours(KST_OFFSET_HOURS)).date()
}

/// Whole seconds left until the next KST midnight, split into h/m/s.
pub fn time_until_next_challenge(now: DateTime<Utc>) -> Countdown {
    let local = now.naive_utc() + Duration::hours(KST_OFFSET_HOURS);
    let next_midnight = match local.date().succ_opt() {
        Some(tomorrow) => tomorrow.and_time(NaiveTime::MIN),
        None => local,
    };
    let remaining = (next_midnight - local).num_seconds().max(0);
    let remaining = u32::try_from(remaining).unwrap_or(0);

    Countdown {
        hours: remaining / 3600,
        minutes: remaining % 3600 / 60,
        seconds: remaining % 60,
    }
}
