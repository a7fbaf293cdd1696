//! Date-seeded 32-bit generator for the daily challenge.
//!
//! The output sequence is part of the challenge contract: the same seed must produce the same
//! leader and rentals on every platform, so everything here is plain wrapping `u32` math.

use chrono::{Datelike, NaiveDate};

const INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32: an additive counter mixed with xorshift/multiply rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Index in `0..len`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}

/// Seed for a calendar date: YYYY·10000 + MM·100 + DD.
pub fn daily_seed(date: NaiveDate) -> u32 {
    let year = u32::try_from(date.year()).unwrap_or(0);
    year * 10_000 + date.month() * 100 + date.day()
}
