//=========================================================================
// Characters, Party and Inventory
//=========================================================================
//
// The progression state the skill graph window reads and spends:
// per-character experience and obtained nodes, the active party and the
// shared item inventory.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::graph::{ItemId, NodeId};
use super::SkillGraphError;

//=== Constants ===========================================================

pub const MAX_PARTY_SIZE: usize = 4;

//=== SkillCharacter ======================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SkillCharacter {
    name: String,
    icon: String,
    unspent_experience: u32,
    location: NodeId,
    obtained: Vec<NodeId>,
}

impl SkillCharacter {
    /// Creates a character standing on (and owning) `start_node`.
    pub fn new(name: impl Into<String>, icon: impl Into<String>, start_node: NodeId) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            unspent_experience: 0,
            location: start_node,
            obtained: vec![start_node],
        }
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.unspent_experience = experience;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn unspent_experience(&self) -> u32 {
        self.unspent_experience
    }

    pub fn add_experience(&mut self, amount: u32) {
        self.unspent_experience = self.unspent_experience.saturating_add(amount);
    }

    /// Node the character was last moved to.
    pub fn location(&self) -> NodeId {
        self.location
    }

    pub fn obtained(&self) -> &[NodeId] {
        &self.obtained
    }

    pub fn is_obtained(&self, node: NodeId) -> bool {
        self.obtained.contains(&node)
    }

    /// Pays `cost` experience, records `node` and moves the character there.
    pub(super) fn obtain(&mut self, node: NodeId, cost: u32) {
        self.unspent_experience = self.unspent_experience.saturating_sub(cost);
        if !self.is_obtained(node) {
            self.obtained.push(node);
        }
        self.location = node;
        debug!(target: "skill_graph", "{} obtained skill node {}", self.name, node);
    }
}

//=== Party ===============================================================

#[derive(Debug, Clone, Default)]
pub struct Party {
    members: Vec<SkillCharacter>,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, character: SkillCharacter) -> Result<(), SkillGraphError> {
        if self.members.len() >= MAX_PARTY_SIZE {
            return Err(SkillGraphError::PartyFull(MAX_PARTY_SIZE));
        }
        self.members.push(character);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&SkillCharacter> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SkillCharacter> {
        self.members.get_mut(index)
    }

    pub fn members(&self) -> &[SkillCharacter] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

//=== Inventory ===========================================================

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: HashMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: ItemId, count: u32) {
        let held = self.items.entry(item).or_insert(0);
        *held = held.saturating_add(count);
    }

    /// Count held, or `None` if the item was never in the inventory.
    pub fn count(&self, item: ItemId) -> Option<u32> {
        self.items.get(&item).copied()
    }

    /// Removes `count` of `item`. Fails without change when short.
    pub fn remove(&mut self, item: ItemId, count: u32) -> bool {
        match self.items.get_mut(&item) {
            Some(held) if *held >= count => {
                *held -= count;
                if *held == 0 {
                    self.items.remove(&item);
                }
                true
            }
            _ => false,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
