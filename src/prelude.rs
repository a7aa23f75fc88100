//=========================================================================
// Prelude
//=========================================================================
//
// Re-exports the types most game code needs.
//
// Usage:
//   use stratum_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Mode stack
pub use crate::core::mode::{
    GameMode, ModeCommands, ModeContext, ModeHandle, ModeStackConfig, ModeStackManager, ModeType,
    TransitionPhase,
};

// Services and geometry
pub use crate::core::effects::ModeSystems;
pub use crate::core::geometry::{Color, Position2D, Rect2D};
pub use crate::core::services::{AudioService, InputService, TimingService, VideoService};

// Skill graph
pub use crate::skill_graph::{Inventory, Party, SkillCharacter, SkillGraph, SkillGraphMode, SkillGraphWindow, SkillNode};
