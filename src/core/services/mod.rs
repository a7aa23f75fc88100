//=========================================================================
// Engine Services
//=========================================================================
//
// Contracts for the collaborators the mode stack depends on but does not
// own: timing, video/transitions, audio, input and the application host.
//
// Architecture:
//   Services<'a> { timing, video, audio, input, host }
//        │
//        ├─► ModeStackManager::update()   (fades, timers, exit)
//        └─► ModeContext                  (what a GameMode sees)
//
// Each contract ships with a stock implementation used by the engine
// runtime. Tests substitute recording doubles.
//
//=========================================================================

//=== Module Declarations =================================================

mod audio;
mod host;
mod timing;
mod video;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use audio::SoundRegistry;
pub use host::{CoreEvent, HostHandle};
pub use timing::FrameClock;
pub use video::{DrawCommand, FrameCanvas};

//=== Internal Dependencies ===============================================

use std::time::Duration;

use crate::core::geometry::{Color, Position2D, Rect2D};
use crate::core::mode::ModeHandle;

//=== TimingService =======================================================

/// Frame timing as seen by game modes and the mode stack.
pub trait TimingService {
    /// Time elapsed during the last update step.
    fn elapsed_update_time(&self) -> Duration;

    /// Informs timers that the active mode changed.
    ///
    /// Timers bound to a mode must not account the transition time as
    /// elapsed game time.
    fn notify_active_context_changed(&mut self);

    /// Zeroes the update-time accumulator so the next update starts fresh.
    fn reset_update_time_accumulator(&mut self);
}

//=== VideoService ========================================================

/// Screen transitions and the drawing primitives modes render with.
pub trait VideoService {
    //--- Transitions ------------------------------------------------------

    /// Starts a transitional fade toward `color`.
    fn begin_fade_out(&mut self, color: Color, duration: Duration);

    /// Starts a transitional fade back to a clear screen.
    ///
    /// A zero duration clears the screen immediately.
    fn begin_fade_in(&mut self, duration: Duration);

    /// Starts a fade unrelated to mode transitions (damage flash, etc.).
    fn begin_fade(&mut self, color: Color, duration: Duration);

    /// Returns true while any fade is still running.
    fn is_fading(&self) -> bool;

    /// Returns true if the most recent fade was started as a transition.
    fn is_last_fade_transitional(&self) -> bool;

    //--- Drawing ----------------------------------------------------------

    fn draw_line(&mut self, from: Position2D, to: Position2D, width: f32, color: Color);

    /// Draws an image by name with its top-left corner at `at`.
    fn draw_image(&mut self, image: &str, at: Position2D, width: f32);

    fn draw_rect(&mut self, rect: Rect2D, color: Color);

    fn draw_text(&mut self, text: &str, at: Position2D);

    /// Restricts subsequent drawing to `rect` until the matching pop.
    fn push_scissor(&mut self, rect: Rect2D);

    fn pop_scissor(&mut self);
}

//=== AudioService ========================================================

/// Sound playback with per-owner resource tracking.
pub trait AudioService {
    /// Plays a shared, fire-and-forget sound.
    fn play_sound(&mut self, name: &str);

    /// Plays a sound whose resources belong to `owner`.
    fn play_owned(&mut self, owner: ModeHandle, name: &str);

    /// Frees every resource registered under `owner`.
    fn release_resources_owned_by(&mut self, owner: ModeHandle);
}

//=== InputService ========================================================

/// Menu-level input queries for the current frame.
///
/// "Press" means the button went down this frame.
pub trait InputService {
    fn up_press(&self) -> bool;
    fn down_press(&self) -> bool;
    fn left_press(&self) -> bool;
    fn right_press(&self) -> bool;
    fn confirm_press(&self) -> bool;
    fn cancel_press(&self) -> bool;

    /// Returns true if any directional button was pressed.
    fn arrow_press(&self) -> bool {
        self.up_press() || self.down_press() || self.left_press() || self.right_press()
    }
}

//=== AppHost =============================================================

/// The application hosting the mode stack.
pub trait AppHost {
    /// Asks the application to shut down gracefully.
    fn request_exit(&mut self);
}

//=== Services ============================================================

/// One frame's borrowed view of every engine service.
pub struct Services<'a> {
    pub timing: &'a mut dyn TimingService,
    pub video: &'a mut dyn VideoService,
    pub audio: &'a mut dyn AudioService,
    pub input: &'a dyn InputService,
    pub host: &'a mut dyn AppHost,
}
