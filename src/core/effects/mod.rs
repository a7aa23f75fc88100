//=========================================================================
// Mode Systems
//=========================================================================
//
// Transient subsystems every game mode owns: script hooks, screen
// effects and particles.
//
// Architecture:
//   ModeSystems
//     ├─ scripts:   ScriptSupervisor   (per-frame hooks)
//     ├─ effects:   EffectSupervisor   (timed overlays)
//     └─ particles: ParticleSystem     (emitters + particles)
//
// Flow:
//   update(dt) → scripts → effects → particles
//   draw(video) → particles → effects   (effects layer on top)
//
//=========================================================================

//=== Module Declarations =================================================

mod effect;
mod particle;
mod script;

//=== Public API ==========================================================

pub use effect::{EffectSupervisor, FlashEffect, DEFAULT_SCREEN};
pub use particle::{Emitter, Particle, ParticleSystem};
pub use script::{ScriptHook, ScriptSupervisor};

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::services::VideoService;

//=== ModeSystems =========================================================

/// The transient subsystems owned by a single game mode.
///
/// Held by the mode stack next to its mode and advanced before the
/// mode's own update, so a mode cannot skip them.
#[derive(Debug, Default)]
pub struct ModeSystems {
    pub scripts: ScriptSupervisor,
    pub effects: EffectSupervisor,
    pub particles: ParticleSystem,
}

impl ModeSystems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.scripts.update(elapsed);
        self.effects.update(elapsed);
        self.particles.update(elapsed);
    }

    /// Draws particles, then effects over them.
    pub fn draw(&self, video: &mut dyn VideoService) {
        self.particles.draw(video);
        self.effects.draw_effects(video);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
