use crate::{PokemonType, StatType};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which offense/defense stat pair a move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageClass {
    #[default]
    Physical,
    Special,
    Status,
}

/// Move category as published by the upstream move database.
/// Only `DamageFixed` changes how damage is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MoveCategory {
    #[default]
    Damage,
    DamageAilment,
    DamageLower,
    DamageRaise,
    DamageFixed,
    Ailment,
    NetGoodStats,
    Other,
}

impl MoveCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveCategory::Damage => "damage",
            MoveCategory::DamageAilment => "damage+ailment",
            MoveCategory::DamageLower => "damage+lower",
            MoveCategory::DamageRaise => "damage+raise",
            MoveCategory::DamageFixed => "damage+fixed",
            MoveCategory::Ailment => "ailment",
            MoveCategory::NetGoodStats => "net-good-stats",
            MoveCategory::Other => "unique",
        }
    }
}

impl From<String> for MoveCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "damage" => MoveCategory::Damage,
            "damage+ailment" => MoveCategory::DamageAilment,
            "damage+lower" => MoveCategory::DamageLower,
            "damage+raise" => MoveCategory::DamageRaise,
            "damage+fixed" => MoveCategory::DamageFixed,
            "ailment" => MoveCategory::Ailment,
            "net-good-stats" => MoveCategory::NetGoodStats,
            _ => MoveCategory::Other,
        }
    }
}

impl From<MoveCategory> for String {
    fn from(value: MoveCategory) -> Self {
        value.as_str().to_string()
    }
}

/// Non-volatile status a move can inflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    Sleep,
    Freeze,
    Paralysis,
    Poison,
    Burn,
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusType::Sleep => "sleep",
            StatusType::Freeze => "freeze",
            StatusType::Paralysis => "paralysis",
            StatusType::Poison => "poison",
            StatusType::Burn => "burn",
        };
        write!(f, "{}", name)
    }
}

/// A single stat-stage delta. Positive deltas target the user, negative ones the foe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: StatType,
    #[serde(alias = "delta")]
    pub change: i8,
}

/// Secondary effect of a move.
///
/// The upstream data stores this as an object with optional `condition`, `chance` and
/// `stat_changes` fields; that shape is accepted on input and normalized into one of
/// these variants. `chance` is a percentage; `None` means the effect always triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMoveEffect", into = "RawMoveEffect")]
pub enum MoveEffect {
    Ailment {
        ailment: StatusType,
        chance: Option<u8>,
    },
    StatChanges {
        changes: Vec<StatChange>,
        chance: Option<u8>,
    },
    AilmentWithStatChanges {
        ailment: StatusType,
        changes: Vec<StatChange>,
        chance: Option<u8>,
    },
}

impl MoveEffect {
    pub fn chance(&self) -> Option<u8> {
        match self {
            MoveEffect::Ailment { chance, .. }
            | MoveEffect::StatChanges { chance, .. }
            | MoveEffect::AilmentWithStatChanges { chance, .. } => *chance,
        }
    }

    pub fn ailment(&self) -> Option<StatusType> {
        match self {
            MoveEffect::Ailment { ailment, .. }
            | MoveEffect::AilmentWithStatChanges { ailment, .. } => Some(*ailment),
            MoveEffect::StatChanges { .. } => None,
        }
    }

    pub fn stat_changes(&self) -> &[StatChange] {
        match self {
            MoveEffect::StatChanges { changes, .. }
            | MoveEffect::AilmentWithStatChanges { changes, .. } => changes,
            MoveEffect::Ailment { .. } => &[],
        }
    }
}

/// Wire shape of a move effect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMoveEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<StatusType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stat_changes: Vec<StatChange>,
}

/// Accepts either a probability in `(0, 1]` or a percentage in `(1, 100]`.
/// Zero is treated as "always", like a missing chance.
fn normalize_chance(raw: Option<f64>) -> Option<u8> {
    let value = raw?;
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    Some(percent.round().clamp(1.0, 100.0) as u8)
}

impl TryFrom<RawMoveEffect> for MoveEffect {
    type Error = String;

    fn try_from(raw: RawMoveEffect) -> Result<Self, Self::Error> {
        let chance = normalize_chance(raw.chance);
        match (raw.condition, raw.stat_changes.is_empty()) {
            (Some(ailment), true) => Ok(MoveEffect::Ailment { ailment, chance }),
            (None, false) => Ok(MoveEffect::StatChanges {
                changes: raw.stat_changes,
                chance,
            }),
            (Some(ailment), false) => Ok(MoveEffect::AilmentWithStatChanges {
                ailment,
                changes: raw.stat_changes,
                chance,
            }),
            (None, true) => Err("move effect has neither a condition nor stat changes".to_string()),
        }
    }
}

impl From<MoveEffect> for RawMoveEffect {
    fn from(effect: MoveEffect) -> Self {
        RawMoveEffect {
            condition: effect.ailment(),
            chance: effect.chance().map(f64::from),
            stat_changes: effect.stat_changes().to_vec(),
        }
    }
}

fn default_accuracy() -> u8 {
    100
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Missing, null and zero accuracy all mean the move never misses.
fn null_as_full_accuracy<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u8>::deserialize(deserializer)?
        .filter(|&accuracy| accuracy > 0)
        .unwrap_or_else(default_accuracy))
}

/// An effect entry that cannot be understood is dropped rather than failing the dataset.
fn lenient_effect<'de, D>(deserializer: D) -> Result<Option<MoveEffect>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawMoveEffect>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| MoveEffect::try_from(raw).ok()))
}

fn default_move_type() -> PokemonType {
    PokemonType::Normal
}

fn null_as_default_move_type<'de, D>(deserializer: D) -> Result<PokemonType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PokemonType>::deserialize(deserializer)?.unwrap_or_else(default_move_type))
}

/// A move as carried by a species record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(default, alias = "nameKo", skip_serializing_if = "Option::is_none")]
    pub name_ko: Option<String>,
    #[serde(
        rename = "type",
        default = "default_move_type",
        deserialize_with = "null_as_default_move_type"
    )]
    pub move_type: PokemonType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub power: u16,
    #[serde(default = "default_accuracy", deserialize_with = "null_as_full_accuracy")]
    pub accuracy: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pp: u8,
    #[serde(default, alias = "damageClass", deserialize_with = "null_as_default")]
    pub damage_class: DamageClass,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: MoveCategory,
    #[serde(default, deserialize_with = "lenient_effect", skip_serializing_if = "Option::is_none")]
    pub effect: Option<MoveEffect>,
}

impl MoveData {
    /// Fallback move given to species whose dataset entry lists no moves.
    pub fn tackle() -> Self {
        MoveData {
            name: "tackle".to_string(),
            name_ko: Some("몸통박치기".to_string()),
            move_type: PokemonType::Normal,
            power: 40,
            accuracy: 100,
            pp: 35,
            damage_class: DamageClass::Physical,
            category: MoveCategory::Damage,
            effect: None,
        }
    }

    pub fn is_fixed_damage(&self) -> bool {
        self.category == MoveCategory::DamageFixed
    }

    /// Human-readable name, converting `kebab-case` identifiers into Title Case.
    pub fn display_name(&self) -> String {
        self.name
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_move_uses_safe_defaults() {
        let json = r#"{ "name": "mystery", "power": null, "accuracy": null, "effect": {} }"#;
        let move_data: MoveData = serde_json::from_str(json).unwrap();

        assert_eq!(move_data.power, 0);
        assert_eq!(move_data.accuracy, 100);
        assert_eq!(move_data.move_type, PokemonType::Normal);
        assert_eq!(move_data.damage_class, DamageClass::Physical);
        assert_eq!(move_data.category, MoveCategory::Damage);
        assert!(move_data.effect.is_none());
    }

    #[test]
    fn test_explicit_nulls_use_safe_defaults() {
        let json = r#"{
            "name": "mystery", "type": null, "damageClass": null, "category": null,
            "pp": null, "effect": null
        }"#;
        let move_data: MoveData = serde_json::from_str(json).unwrap();
        assert_eq!(move_data.move_type, PokemonType::Normal);
        assert_eq!(move_data.damage_class, DamageClass::Physical);
        assert_eq!(move_data.category, MoveCategory::Damage);
        assert_eq!(move_data.pp, 0);
        assert!(move_data.effect.is_none());
    }

    #[test]
    fn test_zero_accuracy_never_misses() {
        let json = r#"{ "name": "swift", "type": "normal", "power": 60, "accuracy": 0 }"#;
        let move_data: MoveData = serde_json::from_str(json).unwrap();
        assert_eq!(move_data.accuracy, 100);
    }

    #[test]
    fn test_effect_shapes_become_tagged_variants() {
        let json = r#"{
            "name": "fire-punch", "type": "fire", "power": 75, "accuracy": 100,
            "damageClass": "physical", "category": "damage+ailment",
            "effect": { "condition": "burn", "chance": 0.1 }
        }"#;
        let move_data: MoveData = serde_json::from_str(json).unwrap();
        assert_eq!(
            move_data.effect,
            Some(MoveEffect::Ailment {
                ailment: StatusType::Burn,
                chance: Some(10)
            })
        );

        let json = r#"{
            "name": "growl", "type": "normal", "power": null, "damageClass": "status",
            "effect": { "stat_changes": [{ "stat": "attack", "change": -1 }] }
        }"#;
        let move_data: MoveData = serde_json::from_str(json).unwrap();
        assert_eq!(
            move_data.effect,
            Some(MoveEffect::StatChanges {
                changes: vec![StatChange {
                    stat: StatType::Attack,
                    change: -1
                }],
                chance: None
            })
        );
    }

    #[test]
    fn test_percentage_chance_is_kept() {
        assert_eq!(normalize_chance(Some(30.0)), Some(30));
        assert_eq!(normalize_chance(Some(0.3)), Some(30));
        assert_eq!(normalize_chance(Some(0.0)), None);
        assert_eq!(normalize_chance(None), None);
    }

    #[test]
    fn test_unknown_category_maps_to_other() {
        assert_eq!(MoveCategory::from("ohko".to_string()), MoveCategory::Other);
        assert_eq!(
            MoveCategory::from("damage+fixed".to_string()),
            MoveCategory::DamageFixed
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(MoveData::tackle().display_name(), "Tackle");
        let mut move_data = MoveData::tackle();
        move_data.name = "night-shade".to_string();
        assert_eq!(move_data.display_name(), "Night Shade");
    }
}
