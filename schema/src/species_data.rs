use crate::{MoveData, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stats that can carry a stage modifier during battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatType {
    #[serde(rename = "attack")]
    Attack,
    #[serde(rename = "defense")]
    Defense,
    #[serde(rename = "spAttack", alias = "special-attack", alias = "sp_attack")]
    SpecialAttack,
    #[serde(rename = "spDefense", alias = "special-defense", alias = "sp_defense")]
    SpecialDefense,
    #[serde(rename = "speed")]
    Speed,
    #[serde(rename = "accuracy")]
    Accuracy,
    #[serde(rename = "evasion")]
    Evasion,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatType::Attack => "Attack",
            StatType::Defense => "Defense",
            StatType::SpecialAttack => "Sp. Atk",
            StatType::SpecialDefense => "Sp. Def",
            StatType::Speed => "Speed",
            StatType::Accuracy => "accuracy",
            StatType::Evasion => "evasiveness",
        };
        write!(f, "{}", display_name)
    }
}

fn default_base_stat() -> u8 {
    50
}

/// Base stat sextuple. A stat missing from the dataset falls back to a neutral value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    #[serde(default = "default_base_stat")]
    pub hp: u8,
    #[serde(default = "default_base_stat")]
    pub attack: u8,
    #[serde(default = "default_base_stat")]
    pub defense: u8,
    #[serde(default = "default_base_stat", alias = "spAttack")]
    pub sp_attack: u8,
    #[serde(default = "default_base_stat", alias = "spDefense")]
    pub sp_defense: u8,
    #[serde(default = "default_base_stat")]
    pub speed: u8,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            hp: default_base_stat(),
            attack: default_base_stat(),
            defense: default_base_stat(),
            sp_attack: default_base_stat(),
            sp_defense: default_base_stat(),
            speed: default_base_stat(),
        }
    }
}

/// Sprite references carried through for the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default, alias = "image")]
    pub front: Option<String>,
    #[serde(default, alias = "image_back")]
    pub back: Option<String>,
    #[serde(default, alias = "image_high")]
    pub artwork: Option<String>,
}

/// Immutable species record as loaded from the roster dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: u16,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub sprites: Sprites,
    /// At most four moves.
    #[serde(default)]
    pub moves: Vec<MoveData>,
}

impl SpeciesRecord {
    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.types.contains(&pokemon_type)
    }
}
