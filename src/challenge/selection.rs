use crate::errors::SelectionError;
use crate::team::MAX_TEAM_SIZE;
use schema::SpeciesRecord;
use tracing::debug;

/// The player's picks from the day's rental roster, in the order they were chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSelection {
    rentals: Vec<SpeciesRecord>,
    selected: Vec<u16>,
}

impl TeamSelection {
    pub fn new(rentals: &[SpeciesRecord]) -> Self {
        Self {
            rentals: rentals.to_vec(),
            selected: Vec::new(),
        }
    }

    /// Select the species, or deselect it if it was already picked.
    /// Returns whether the species is selected afterwards.
    pub fn toggle(&mut self, species_id: u16) -> Result<bool, SelectionError> {
        if !self.rentals.iter().any(|record| record.id == species_id) {
            return Err(SelectionError::NotARental(species_id));
        }

        if let Some(position) = self.selected.iter().position(|&id| id == species_id) {
            self.selected.remove(position);
            debug!(species_id, "Deselected rental");
            return Ok(false);
        }

        if self.selected.len() >= MAX_TEAM_SIZE {
            return Err(SelectionError::TeamFull(MAX_TEAM_SIZE));
        }
        self.selected.push(species_id);
        debug!(species_id, picked = self.selected.len(), "Selected rental");
        Ok(true)
    }

    pub fn is_selected(&self, species_id: u16) -> bool {
        self.selected.contains(&species_id)
    }

    pub fn selected_ids(&self) -> &[u16] {
        &self.selected
    }

    pub fn rentals(&self) -> &[SpeciesRecord] {
        &self.rentals
    }

    pub fn is_complete(&self) -> bool {
        self.selected.len() == MAX_TEAM_SIZE
    }

    /// The chosen species in selection order. Requires exactly three picks.
    pub fn confirm(&self) -> Result<Vec<SpeciesRecord>, SelectionError> {
        if !self.is_complete() {
            return Err(SelectionError::IncompleteTeam {
                required: MAX_TEAM_SIZE,
                got: self.selected.len(),
            });
        }
        Ok(self
            .selected
            .iter()
            .filter_map(|id| self.rentals.iter().find(|record| record.id == *id))
            .cloned()
            .collect())
    }
}
