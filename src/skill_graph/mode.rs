//=========================================================================
// Skill Graph Mode
//=========================================================================
//
// Hosts a SkillGraphWindow on the mode stack. Closing the window pops the
// mode with a fade on both sides.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::window::SkillGraphWindow;
use crate::core::mode::{GameMode, ModeContext, ModeType};
use crate::core::services::VideoService;

//=== SkillGraphMode ======================================================

#[derive(Debug)]
pub struct SkillGraphMode {
    window: SkillGraphWindow,
    closing: bool,
}

impl SkillGraphMode {
    pub fn new(window: SkillGraphWindow) -> Self {
        Self { window, closing: false }
    }

    pub fn window(&self) -> &SkillGraphWindow {
        &self.window
    }
}

impl GameMode for SkillGraphMode {
    fn mode_type(&self) -> ModeType {
        ModeType::MENU
    }

    fn update(&mut self, context: &mut ModeContext<'_>) {
        // Pop already queued; the stack removes this mode once the fade ends.
        if self.closing {
            return;
        }

        let elapsed = context.elapsed();
        self.window.update(context.input, context.audio, elapsed);

        if !self.window.is_active() {
            info!(target: "skill_graph", "Skill graph closed, leaving mode {}", context.handle());
            self.closing = true;
            context.commands.pop(true, true);
        }
    }

    fn draw(&mut self, video: &mut dyn VideoService) {
        self.window.draw(video);
    }

    fn draw_post_effects(&mut self, video: &mut dyn VideoService) {
        self.window.draw_bottom_window(video);
    }

    fn reset(&mut self, _context: &mut ModeContext<'_>) {
        self.closing = false;
        if !self.window.is_active() {
            self.window.set_active(true);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
