pub mod calculators;
pub mod conditions;
pub mod engine;
pub mod move_effects;
pub mod runner;
pub mod session;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;
