//=========================================================================
// Skill Graph Navigation
//=========================================================================
//
// Picks the linked node an arrow press moves the selection to.
//
// Direction rules (screen space, y grows down):
//   diagonal    → both axes must move the right way
//   horizontal  → tangent ≤ 1 (at most 45° off the axis)
//   vertical    → tangent ≥ 1
//
// The tangent compares squared distances, which keeps the 45° split.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::graph::{NodeId, SkillGraph};
use crate::core::geometry::Position2D;
use crate::core::services::InputService;

//=== Constants ===========================================================

/// Tangent used when the target sits straight above or below.
const VERTICAL_TANGENT: f32 = 90.0;

//=== Direction ===========================================================

/// Arrow buttons pressed this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Direction {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Direction {
    pub fn from_input(input: &dyn InputService) -> Self {
        Self {
            left: input.left_press(),
            right: input.right_press(),
            up: input.up_press(),
            down: input.down_press(),
        }
    }

    pub fn is_none(&self) -> bool {
        !(self.left || self.right || self.up || self.down)
    }

    /// Returns true if moving from `from` to `to` goes this way.
    pub fn accepts(&self, from: Position2D, to: Position2D) -> bool {
        let tangent = tangent(from, to);

        if self.left || self.right {
            let horizontal_ok = if self.left { to.x < from.x } else { to.x > from.x };
            if !horizontal_ok {
                return false;
            }
            if self.up {
                return to.y < from.y;
            }
            if self.down {
                return to.y > from.y;
            }
            return tangent <= 1.0;
        }

        if self.up {
            return to.y < from.y && tangent >= 1.0;
        }
        if self.down {
            return to.y > from.y && tangent >= 1.0;
        }
        false
    }
}

//=== Navigation ==========================================================

/// First node in `visible` linked to `current` that lies in `direction`.
pub fn navigate(graph: &SkillGraph, current: NodeId, visible: &[NodeId], direction: Direction) -> Option<NodeId> {
    if direction.is_none() {
        return None;
    }

    let current_node = graph.node(current)?;
    let from = current_node.position();

    visible
        .iter()
        .copied()
        .filter(|&candidate| candidate != current && current_node.is_linked_to(candidate))
        .find(|&candidate| {
            graph
                .node(candidate)
                .is_some_and(|node| direction.accepts(from, node.position()))
        })
}

//--- Helpers ---------------------------------------------------------------

/// Squared tangent of the angle between the x axis and `from → to`.
fn tangent(from: Position2D, to: Position2D) -> f32 {
    let corner = Position2D::new(to.x, from.y);
    let adjacent = from.distance2(&corner);
    if adjacent == 0.0 {
        return VERTICAL_TANGENT;
    }
    corner.distance2(&to) / adjacent
}

//=========================================================================
// Unit Tests
//=========================================================================
