// Daily Gym Schema - Shared type definitions
// This crate contains the static data shapes shared by the battle engine and the
// challenge generator: elemental types, stats, moves and species records.

pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_data;
pub mod pokemon_types;
pub mod species_data;
