use crate::errors::BattleStateError;
use crate::pokemon::Combatant;
use schema::SpeciesRecord;
use serde::{Deserialize, Serialize};

/// Largest team a side may field.
pub const MAX_TEAM_SIZE: usize = 3;

/// An ordered roster of combatants with a pointer to the one currently battling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    members: Vec<Combatant>,
    active_index: usize,
}

impl Team {
    pub fn new(members: Vec<Combatant>) -> Result<Self, BattleStateError> {
        if members.is_empty() {
            return Err(BattleStateError::EmptyTeam);
        }
        if members.len() > MAX_TEAM_SIZE {
            return Err(BattleStateError::TeamTooLarge {
                max: MAX_TEAM_SIZE,
                got: members.len(),
            });
        }
        Ok(Self {
            members,
            active_index: 0,
        })
    }

    pub fn from_species(roster: &[SpeciesRecord]) -> Result<Self, BattleStateError> {
        Self::new(roster.iter().map(Combatant::new).collect())
    }

    pub fn active(&self) -> &Combatant {
        &self.members[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut Combatant {
        &mut self.members[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Index of the next member after the active one that can still fight.
    pub fn next_available(&self) -> Option<usize> {
        (self.active_index + 1..self.members.len()).find(|&index| !self.members[index].is_fainted())
    }

    /// Move the pointer to the next member that can still fight.
    /// Returns false, leaving the pointer where it is, when nobody is left.
    pub fn advance(&mut self) -> bool {
        match self.next_available() {
            Some(index) => {
                self.active_index = index;
                true
            }
            None => false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.members.iter().filter(|member| !member.is_fainted()).count()
    }

    pub fn is_defeated(&self) -> bool {
        self.remaining() == 0
    }

    /// Restore every member and rewind the pointer to the lead.
    pub fn reset(&mut self) {
        for member in &mut self.members {
            member.restore();
        }
        self.active_index = 0;
    }
}
