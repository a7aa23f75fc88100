//=========================================================================
// Stratum Engine - Library Root
//=========================================================================
//
// Mode-stack game engine core: fade-gated screen transitions between
// exclusive game modes, plus a skill graph progression menu built on it.
//
// Typical usage:
// ```no_run
// use stratum_engine::prelude::*;
//
// EngineBuilder::new()
//     .build()
//     .init(|modes| {
//         modes.push(Title, false, true);
//     })
//     .run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the logic-thread systems: mode stack, services, effects
// and input. `skill_graph` is a client subsystem hosted as a game mode.
//
pub mod core;
pub mod prelude;
pub mod skill_graph;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and is not part of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
