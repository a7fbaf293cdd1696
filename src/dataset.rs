//! The static roster dataset every battle and daily challenge draws from.
//!
//! Two input shapes are accepted. The bundled RON file keeps a move table and lets species
//! reference moves by name; the JSON shape is the flat `pokemonData.json` export with moves
//! embedded in every species. Both resolve into the same ordered list of [`SpeciesRecord`]s.

use crate::errors::{DatasetError, DatasetResult};
use ron::extensions::Extensions;
use schema::{BaseStats, MoveData, PokemonType, SpeciesRecord, Sprites};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Species carry at most this many moves.
pub const MAX_MOVES: usize = 4;

static BUNDLED: LazyLock<DatasetResult<Dataset>> =
    LazyLock::new(|| Dataset::from_ron_str(include_str!("../data/species.ron")));

#[derive(Debug, Deserialize)]
struct BundledFile {
    moves: Vec<MoveData>,
    species: Vec<BundledSpecies>,
}

#[derive(Debug, Deserialize)]
struct BundledSpecies {
    id: u16,
    name: String,
    types: Vec<PokemonType>,
    #[serde(default)]
    base_stats: BaseStats,
    #[serde(default)]
    sprites: Sprites,
    #[serde(default)]
    moves: Vec<String>,
}

/// One entry of the flat JSON export.
#[derive(Debug, Deserialize)]
struct JsonSpecies {
    id: u16,
    name: String,
    #[serde(default)]
    types: Vec<PokemonType>,
    #[serde(default, rename = "typesEn")]
    types_en: Option<Vec<PokemonType>>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_back: Option<String>,
    #[serde(default)]
    image_high: Option<String>,
    #[serde(default)]
    stats: BaseStats,
    #[serde(default)]
    moves: Vec<MoveData>,
}

impl From<JsonSpecies> for SpeciesRecord {
    fn from(raw: JsonSpecies) -> Self {
        // The English list is authoritative when both are present.
        let types = match raw.types_en {
            Some(types_en) if !types_en.is_empty() => types_en,
            _ => raw.types,
        };
        SpeciesRecord {
            id: raw.id,
            name: raw.name,
            types,
            base_stats: raw.stats,
            sprites: Sprites {
                front: raw.image,
                back: raw.image_back,
                artwork: raw.image_high,
            },
            moves: raw.moves,
        }
    }
}

/// An ordered, id-indexed collection of species records.
#[derive(Debug, Clone)]
pub struct Dataset {
    species: Vec<SpeciesRecord>,
    index: HashMap<u16, usize>,
}

impl Dataset {
    /// The dataset compiled into the binary.
    pub fn bundled() -> DatasetResult<&'static Dataset> {
        BUNDLED.as_ref().map_err(Clone::clone)
    }

    /// Load a dataset from disk. Files ending in `.json` use the flat export shape,
    /// everything else is read as bundled-style RON.
    pub fn load(path: &Path) -> DatasetResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_ron_str(&contents)
        }
    }

    pub fn from_ron_str(contents: &str) -> DatasetResult<Self> {
        let file: BundledFile = ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(contents)
            .map_err(|e| DatasetError::Ron(e.to_string()))?;

        let move_table: HashMap<&str, &MoveData> = file
            .moves
            .iter()
            .map(|move_data| (move_data.name.as_str(), move_data))
            .collect();

        let mut records = Vec::with_capacity(file.species.len());
        for entry in file.species {
            let moves = entry
                .moves
                .iter()
                .map(|name| {
                    move_table
                        .get(name.as_str())
                        .map(|move_data| (*move_data).clone())
                        .ok_or_else(|| DatasetError::UnknownMove {
                            species: entry.id,
                            move_name: name.clone(),
                        })
                })
                .collect::<DatasetResult<Vec<_>>>()?;

            records.push(SpeciesRecord {
                id: entry.id,
                name: entry.name,
                types: entry.types,
                base_stats: entry.base_stats,
                sprites: entry.sprites,
                moves,
            });
        }

        Self::from_records(records)
    }

    pub fn from_json_str(contents: &str) -> DatasetResult<Self> {
        let raw: Vec<JsonSpecies> =
            serde_json::from_str(contents).map_err(|e| DatasetError::Json(e.to_string()))?;
        Self::from_records(raw.into_iter().map(SpeciesRecord::from).collect())
    }

    /// Validate and index records, preserving their order.
    pub fn from_records(mut records: Vec<SpeciesRecord>) -> DatasetResult<Self> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter_mut().enumerate() {
            if index.insert(record.id, position).is_some() {
                return Err(DatasetError::DuplicateSpecies(record.id));
            }
            if record.types.is_empty() {
                warn!(species = record.id, name = %record.name, "Species has no types, treating it as normal");
                record.types.push(PokemonType::Normal);
            }
            if record.types.len() > 2 {
                warn!(species = record.id, name = %record.name, "Species has more than two types, keeping the first two");
                record.types.truncate(2);
            }
            if record.moves.len() > MAX_MOVES {
                warn!(species = record.id, name = %record.name, "Species has more than {} moves, keeping the first {}", MAX_MOVES, MAX_MOVES);
                record.moves.truncate(MAX_MOVES);
            }
        }

        debug!(species = records.len(), "Dataset indexed");
        Ok(Self {
            species: records,
            index,
        })
    }

    pub fn get(&self, id: u16) -> Option<&SpeciesRecord> {
        self.index.get(&id).map(|&position| &self.species[position])
    }

    pub fn contains(&self, id: u16) -> bool {
        self.index.contains_key(&id)
    }

    /// All species in dataset order.
    pub fn species(&self) -> &[SpeciesRecord] {
        &self.species
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesRecord> {
        self.species.iter()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
