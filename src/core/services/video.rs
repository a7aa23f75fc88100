//=========================================================================
// Frame Canvas
//=========================================================================
//
// Stock VideoService: a fade state machine plus a per-frame list of draw
// commands. Presenting the command list is the renderer's business.
//
// Frame lifecycle: begin_frame() → draw_*() → finish_frame() → advance(dt)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::VideoService;
use crate::core::geometry::{lerp, Color, Position2D, Rect2D};

//=== DrawCommand =========================================================

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Position2D,
        to: Position2D,
        width: f32,
        color: Color,
    },
    Image {
        name: String,
        at: Position2D,
        width: f32,
    },
    Rect {
        rect: Rect2D,
        color: Color,
    },
    Text {
        text: String,
        at: Position2D,
    },
    PushScissor(Rect2D),
    PopScissor,

    /// Full-screen fade overlay, always last in a frame.
    Overlay(Color),
}

//=== Fade ================================================================

#[derive(Debug, Clone, Copy)]
struct Fade {
    from: Color,
    to: Color,
    duration: Duration,
    elapsed: Duration,
}

impl Fade {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn current(&self) -> Color {
        let t = self.progress();
        Color::rgba(
            lerp(self.from.r, self.to.r, t),
            lerp(self.from.g, self.to.g, t),
            lerp(self.from.b, self.to.b, t),
            lerp(self.from.a, self.to.a, t),
        )
    }
}

//=== FrameCanvas =========================================================

/// Records draw commands and runs screen fades against its own timer.
#[derive(Debug)]
pub struct FrameCanvas {
    fade: Option<Fade>,
    overlay: Color,
    last_fade_transitional: bool,
    commands: Vec<DrawCommand>,
    scissor_depth: usize,
}

impl FrameCanvas {
    pub fn new() -> Self {
        Self {
            fade: None,
            overlay: Color::CLEAR,
            last_fade_transitional: false,
            commands: Vec::with_capacity(256),
            scissor_depth: 0,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Advances the running fade by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };

        fade.elapsed += elapsed;
        self.overlay = fade.current();

        if fade.progress() >= 1.0 {
            trace!(target: "video", "Fade finished at {:?}", self.overlay);
            self.fade = None;
        }
    }

    /// Discards the previous frame's commands.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        if self.scissor_depth != 0 {
            warn!(target: "video", "{} scissor rect(s) left pushed last frame", self.scissor_depth);
            self.scissor_depth = 0;
        }
    }

    /// Appends the fade overlay and returns the frame's commands.
    pub fn finish_frame(&mut self) -> &[DrawCommand] {
        if self.overlay.a > 0.0 {
            self.commands.push(DrawCommand::Overlay(self.overlay));
        }
        &self.commands
    }

    //--- Queries ----------------------------------------------------------

    /// Commands recorded so far this frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current full-screen overlay color.
    pub fn overlay(&self) -> Color {
        self.overlay
    }

    //--- Internal Helpers -------------------------------------------------

    fn start_fade(&mut self, to: Color, duration: Duration, transitional: bool) {
        self.last_fade_transitional = transitional;

        if duration.is_zero() {
            self.overlay = to;
            self.fade = None;
            return;
        }

        self.fade = Some(Fade {
            from: self.overlay,
            to,
            duration,
            elapsed: Duration::ZERO,
        });
    }
}

impl Default for FrameCanvas {
    fn default() -> Self {
        Self::new()
    }
}

//=== VideoService ========================================================

impl VideoService for FrameCanvas {
    fn begin_fade_out(&mut self, color: Color, duration: Duration) {
        self.start_fade(color.with_alpha(1.0), duration, true);
    }

    fn begin_fade_in(&mut self, duration: Duration) {
        let clear = self.overlay.with_alpha(0.0);
        self.start_fade(clear, duration, true);
    }

    fn begin_fade(&mut self, color: Color, duration: Duration) {
        self.start_fade(color, duration, false);
    }

    fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn is_last_fade_transitional(&self) -> bool {
        self.last_fade_transitional
    }

    fn draw_line(&mut self, from: Position2D, to: Position2D, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn draw_image(&mut self, image: &str, at: Position2D, width: f32) {
        self.commands.push(DrawCommand::Image {
            name: image.to_string(),
            at,
            width,
        });
    }

    fn draw_rect(&mut self, rect: Rect2D, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_text(&mut self, text: &str, at: Position2D) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
        });
    }

    fn push_scissor(&mut self, rect: Rect2D) {
        self.scissor_depth += 1;
        self.commands.push(DrawCommand::PushScissor(rect));
    }

    fn pop_scissor(&mut self) {
        if self.scissor_depth == 0 {
            warn!(target: "video", "pop_scissor() without a matching push");
            return;
        }
        self.scissor_depth -= 1;
        self.commands.push(DrawCommand::PopScissor);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
