//=========================================================================
// Skill Graph
//=========================================================================
//
// Character progression menu: a graph of purchasable skill nodes, the
// window that browses and buys them, and the game mode hosting it.
//
//   graph       nodes, links, costs
//   character   characters, party, inventory
//   navigation  arrow-key movement between linked nodes
//   window      selection state machine, view scrolling, purchases
//   mode        GameMode wrapper pushed onto the mode stack
//
//=========================================================================

//=== Module Declarations =================================================

mod character;
mod graph;
mod mode;
mod navigation;
mod window;

//=== Public Exports ======================================================

pub use character::{Inventory, Party, SkillCharacter, MAX_PARTY_SIZE};
pub use graph::{ItemId, NodeId, SkillGraph, SkillNode};
pub use mode::SkillGraphMode;
pub use navigation::{navigate, Direction};
pub use window::{
    check_purchase, BottomInfo, NodeLine, PurchaseOutcome, RejectReason, SkillGraphWindow, WindowState,
    NODES_DISPLAY_MARGIN, SKILL_GRAPH_AREA_HEIGHT, SKILL_GRAPH_AREA_WIDTH, WINDOW_BORDER_WIDTH,
};

//=== SkillGraphError =====================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkillGraphError {
    #[error("duplicate skill node id {0}")]
    DuplicateNode(NodeId),

    #[error("skill node {0} links to itself")]
    SelfLink(NodeId),

    #[error("skill node {from} links to unknown node {to}")]
    DanglingLink { from: NodeId, to: NodeId },

    #[error("party already has the maximum of {0} members")]
    PartyFull(usize),
}
