//=========================================================================
// Skill Graph
//=========================================================================
//
// Immutable graph of skill nodes. Each node lists its children; parent
// links are derived once at construction.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::SkillGraphError;
use crate::core::geometry::Position2D;

//=== Types ===============================================================

pub type NodeId = u32;
pub type ItemId = u32;

//=== SkillNode ===========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SkillNode {
    id: NodeId,
    position: Position2D,
    icon: String,
    experience_needed: u32,
    items_needed: Vec<(ItemId, u32)>,
    children: Vec<NodeId>,
    parents: Vec<NodeId>,
}

impl SkillNode {
    pub fn new(id: NodeId, position: Position2D, icon: impl Into<String>, experience_needed: u32) -> Self {
        Self {
            id,
            position,
            icon: icon.into(),
            experience_needed,
            items_needed: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Adds a required item stack to the node's cost. Repeated items add
    /// up into a single entry.
    pub fn with_item(mut self, item: ItemId, count: u32) -> Self {
        match self.items_needed.iter_mut().find(|(id, _)| *id == item) {
            Some((_, needed)) => *needed = needed.saturating_add(count),
            None => self.items_needed.push((item, count)),
        }
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeId>) -> Self {
        self.children.extend(children);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Position2D {
        self.position
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn experience_needed(&self) -> u32 {
        self.experience_needed
    }

    pub fn items_needed(&self) -> &[(ItemId, u32)] {
        &self.items_needed
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Returns true if `other` is a child or a parent of this node.
    pub fn is_linked_to(&self, other: NodeId) -> bool {
        self.children.contains(&other) || self.parents.contains(&other)
    }
}

//=== SkillGraph ==========================================================

#[derive(Debug, Clone, Default)]
pub struct SkillGraph {
    nodes: Vec<SkillNode>,
    index: HashMap<NodeId, usize>,
}

impl SkillGraph {
    /// Builds a graph, rejecting duplicate ids and links to unknown nodes.
    pub fn new(mut nodes: Vec<SkillNode>) -> Result<Self, SkillGraphError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id, position).is_some() {
                return Err(SkillGraphError::DuplicateNode(node.id));
            }
        }

        let mut parent_links = Vec::new();
        for node in &nodes {
            for &child in &node.children {
                if child == node.id {
                    return Err(SkillGraphError::SelfLink(node.id));
                }
                let Some(&child_index) = index.get(&child) else {
                    return Err(SkillGraphError::DanglingLink { from: node.id, to: child });
                };
                parent_links.push((child_index, node.id));
            }
        }

        for (child_index, parent) in parent_links {
            let parents = &mut nodes[child_index].parents;
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }

        debug!(target: "skill_graph", "Built skill graph with {} node(s)", nodes.len());
        Ok(Self { nodes, index })
    }

    pub fn node(&self, id: NodeId) -> Option<&SkillNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn nodes(&self) -> &[SkillNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
