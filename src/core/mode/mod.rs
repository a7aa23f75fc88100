//=========================================================================
// Game Modes
//=========================================================================
//
// Exclusive application states and the stack that drives them.
//
// Architecture:
//   ModeStackManager
//     ├─ stack:   Vec<ModeSlot>   (bottom → top, only the top is live)
//     ├─ pending: Vec<ModeSlot>   (pushed, awaiting the resolution point)
//     └─ phase:   TransitionPhase (Idle → FadingOut → ReadyToSwap → Idle)
//
//   ModeSlot { handle, mode: Box<dyn GameMode>, systems: ModeSystems }
//
// Flow (once per frame):
//   update() → fade-out check → resolve pops/pushes → reset new top
//            → fade-in + timer notification → systems.update → mode.update
//
//=========================================================================

//=== Module Declarations =================================================

mod commands;
mod mode_manager;
mod transition;

//=== Public API ==========================================================

pub use commands::{ModeCommand, ModeCommands};
pub use mode_manager::{ModeStackConfig, ModeStackManager, FADE_IN_OUT_TIME};
pub use transition::TransitionPhase;

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::effects::ModeSystems;
use crate::core::services::{AudioService, InputService, Services, TimingService, VideoService};

//=== ModeType ============================================================

/// Tag identifying the kind of a game mode.
///
/// Fixed for the lifetime of a mode. `DUMMY` marks an unset mode and is
/// what lookups return when no mode matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModeType(pub u8);

impl ModeType {
    pub const DUMMY: ModeType = ModeType(0);
    pub const BOOT: ModeType = ModeType(1);
    pub const MAP: ModeType = ModeType(2);
    pub const BATTLE: ModeType = ModeType(3);
    pub const MENU: ModeType = ModeType(4);
    pub const SHOP: ModeType = ModeType(5);
    pub const PAUSE: ModeType = ModeType(6);
    pub const SCENE: ModeType = ModeType(7);
    pub const WORLD: ModeType = ModeType(8);
    pub const SAVE: ModeType = ModeType(9);
    pub const TEST: ModeType = ModeType(10);

    pub fn is_dummy(self) -> bool {
        self == Self::DUMMY
    }

    fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::DUMMY => "DUMMY",
            Self::BOOT => "BOOT",
            Self::MAP => "MAP",
            Self::BATTLE => "BATTLE",
            Self::MENU => "MENU",
            Self::SHOP => "SHOP",
            Self::PAUSE => "PAUSE",
            Self::SCENE => "SCENE",
            Self::WORLD => "WORLD",
            Self::SAVE => "SAVE",
            Self::TEST => "TEST",
            _ => return None,
        };
        Some(name)
    }
}

impl Default for ModeType {
    fn default() -> Self {
        Self::DUMMY
    }
}

impl fmt::Display for ModeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "ModeType({})", self.0),
        }
    }
}

//=== ModeHandle ==========================================================

/// Identity of a pushed mode, unique per manager.
///
/// Used as the owner key for per-mode audio resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModeHandle(u64);

impl ModeHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== ModeContext =========================================================

/// What a game mode sees while it is updated or reset.
pub struct ModeContext<'a> {
    handle: ModeHandle,
    pub systems: &'a mut ModeSystems,
    pub timing: &'a dyn TimingService,
    pub video: &'a mut dyn VideoService,
    pub audio: &'a mut dyn AudioService,
    pub input: &'a dyn InputService,
    /// Stack requests; they take effect at the next resolution point.
    pub commands: &'a mut ModeCommands,
}

impl<'a> ModeContext<'a> {
    pub(crate) fn new(
        handle: ModeHandle,
        systems: &'a mut ModeSystems,
        services: &'a mut Services<'_>,
        commands: &'a mut ModeCommands,
    ) -> Self {
        Self {
            handle,
            systems,
            timing: &*services.timing,
            video: &mut *services.video,
            audio: &mut *services.audio,
            input: services.input,
            commands,
        }
    }

    /// Handle of the mode being run.
    pub fn handle(&self) -> ModeHandle {
        self.handle
    }

    /// Elapsed update time of the current frame.
    pub fn elapsed(&self) -> Duration {
        self.timing.elapsed_update_time()
    }

    /// Plays a sound released together with this mode.
    pub fn play_owned_sound(&mut self, name: &str) {
        self.audio.play_owned(self.handle, name);
    }
}

//=== GameMode Trait ======================================================

/// One exclusive application state: a menu, a battle, a map.
///
/// Modes are owned by the [`ModeStackManager`] from the moment they are
/// pushed. Only the top of the stack is updated and drawn. The mode's
/// [`ModeSystems`] are advanced by the manager before `update` runs.
///
/// # Minimal Implementation
///
/// ```rust
/// # use stratum_engine::prelude::*;
/// struct TitleScreen;
///
/// impl GameMode for TitleScreen {
///     fn mode_type(&self) -> ModeType {
///         ModeType::BOOT
///     }
///
///     fn draw(&mut self, video: &mut dyn VideoService) {
///         video.draw_text("Press Enter", Position2D::new(400.0, 300.0));
///     }
///
///     fn reset(&mut self, _context: &mut ModeContext<'_>) {}
/// }
/// ```
pub trait GameMode: Send {
    fn mode_type(&self) -> ModeType;

    /// Called every frame while this mode is on top.
    ///
    /// Default implementation does nothing beyond the systems update the
    /// manager has already performed.
    fn update(&mut self, _context: &mut ModeContext<'_>) {}

    /// Renders the mode's own content.
    fn draw(&mut self, video: &mut dyn VideoService);

    /// Renders the mode's particles and effects, in that order.
    fn draw_effects(&mut self, systems: &ModeSystems, video: &mut dyn VideoService) {
        systems.draw(video);
    }

    /// Renders anything that must appear above effects (HUD, menus).
    fn draw_post_effects(&mut self, _video: &mut dyn VideoService) {}

    /// Called once each time this mode becomes the top of the stack.
    fn reset(&mut self, context: &mut ModeContext<'_>);
}

//=========================================================================
// Unit Tests
//=========================================================================
