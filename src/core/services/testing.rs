//=========================================================================
// Test Doubles
//=========================================================================
//
// Recording implementations of every service contract, shared by the
// unit tests of the mode stack, effects and skill graph modules.
//
//=========================================================================

use std::time::Duration;

use super::{AppHost, AudioService, InputService, Services, TimingService, VideoService};
use crate::core::geometry::{Color, Position2D, Rect2D};
use crate::core::mode::ModeHandle;

//=== Timing ==============================================================

#[derive(Debug, Default)]
pub struct RecordingTiming {
    pub elapsed: Duration,
    pub context_changes: u32,
    pub accumulator_resets: u32,
}

impl TimingService for RecordingTiming {
    fn elapsed_update_time(&self) -> Duration {
        self.elapsed
    }

    fn notify_active_context_changed(&mut self) {
        self.context_changes += 1;
    }

    fn reset_update_time_accumulator(&mut self) {
        self.accumulator_resets += 1;
        self.elapsed = Duration::ZERO;
    }
}

//=== Video ===============================================================

/// Fades never finish on their own; tests call `finish_fade()`.
#[derive(Debug, Default)]
pub struct RecordingVideo {
    pub fading: bool,
    pub transitional: bool,
    pub fade_outs: Vec<(Color, Duration)>,
    pub fade_ins: Vec<Duration>,
    pub lines: Vec<(Position2D, Position2D, Color)>,
    pub images: Vec<(String, Position2D)>,
    pub rects: Vec<(Rect2D, Color)>,
    pub texts: Vec<String>,
    pub scissor_depth: i32,
}

impl RecordingVideo {
    pub fn finish_fade(&mut self) {
        self.fading = false;
    }
}

impl VideoService for RecordingVideo {
    fn begin_fade_out(&mut self, color: Color, duration: Duration) {
        self.fade_outs.push((color, duration));
        self.fading = !duration.is_zero();
        self.transitional = true;
    }

    fn begin_fade_in(&mut self, duration: Duration) {
        self.fade_ins.push(duration);
        self.fading = !duration.is_zero();
        self.transitional = true;
    }

    fn begin_fade(&mut self, _color: Color, duration: Duration) {
        self.fading = !duration.is_zero();
        self.transitional = false;
    }

    fn is_fading(&self) -> bool {
        self.fading
    }

    fn is_last_fade_transitional(&self) -> bool {
        self.transitional
    }

    fn draw_line(&mut self, from: Position2D, to: Position2D, _width: f32, color: Color) {
        self.lines.push((from, to, color));
    }

    fn draw_image(&mut self, image: &str, at: Position2D, _width: f32) {
        self.images.push((image.to_string(), at));
    }

    fn draw_rect(&mut self, rect: Rect2D, color: Color) {
        self.rects.push((rect, color));
    }

    fn draw_text(&mut self, text: &str, _at: Position2D) {
        self.texts.push(text.to_string());
    }

    fn push_scissor(&mut self, _rect: Rect2D) {
        self.scissor_depth += 1;
    }

    fn pop_scissor(&mut self) {
        self.scissor_depth -= 1;
    }
}

//=== Audio ===============================================================

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<String>,
    pub owned: Vec<(ModeHandle, String)>,
    pub released: Vec<ModeHandle>,
}

impl AudioService for RecordingAudio {
    fn play_sound(&mut self, name: &str) {
        self.played.push(name.to_string());
    }

    fn play_owned(&mut self, owner: ModeHandle, name: &str) {
        self.owned.push((owner, name.to_string()));
    }

    fn release_resources_owned_by(&mut self, owner: ModeHandle) {
        self.released.push(owner);
    }
}

//=== Input ===============================================================

/// Presses stay set until `clear()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptedInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    pub cancel: bool,
}

impl ScriptedInput {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl InputService for ScriptedInput {
    fn up_press(&self) -> bool {
        self.up
    }

    fn down_press(&self) -> bool {
        self.down
    }

    fn left_press(&self) -> bool {
        self.left
    }

    fn right_press(&self) -> bool {
        self.right
    }

    fn confirm_press(&self) -> bool {
        self.confirm
    }

    fn cancel_press(&self) -> bool {
        self.cancel
    }
}

//=== Host ================================================================

#[derive(Debug, Default)]
pub struct CountingHost {
    pub exit_requests: u32,
}

impl AppHost for CountingHost {
    fn request_exit(&mut self) {
        self.exit_requests += 1;
    }
}

//=== TestRig =============================================================

/// One of each double, lendable as a `Services` bundle.
#[derive(Debug, Default)]
pub struct TestRig {
    pub timing: RecordingTiming,
    pub video: RecordingVideo,
    pub audio: RecordingAudio,
    pub input: ScriptedInput,
    pub host: CountingHost,
}

impl TestRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn services(&mut self) -> Services<'_> {
        Services {
            timing: &mut self.timing,
            video: &mut self.video,
            audio: &mut self.audio,
            input: &self.input,
            host: &mut self.host,
        }
    }
}
