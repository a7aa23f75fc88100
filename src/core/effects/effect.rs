//=========================================================================
// Effect Supervisor
//=========================================================================
//
// Timed full-screen overlays (damage flashes, screen tints) owned by one
// game mode. Each flash starts at its color's alpha and fades to nothing
// over its duration, then expires.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{lerp, Color, Rect2D};
use crate::core::services::VideoService;

//=== Constants ===========================================================

/// Area covered by overlays unless a mode sets its own.
pub const DEFAULT_SCREEN: Rect2D = Rect2D {
    left: 0.0,
    right: 1024.0,
    top: 0.0,
    bottom: 768.0,
};

//=== FlashEffect =========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashEffect {
    color: Color,
    duration: Duration,
    elapsed: Duration,
}

impl FlashEffect {
    pub fn new(color: Color, duration: Duration) -> Self {
        Self {
            color,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Overlay color at the current point of the flash.
    pub fn current_color(&self) -> Color {
        if self.is_expired() {
            return self.color.with_alpha(0.0);
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.color.with_alpha(lerp(self.color.a, 0.0, t))
    }
}

//=== EffectSupervisor ====================================================

#[derive(Debug)]
pub struct EffectSupervisor {
    effects: Vec<FlashEffect>,
    screen: Rect2D,
}

impl EffectSupervisor {
    pub fn new() -> Self {
        Self::with_screen(DEFAULT_SCREEN)
    }

    pub fn with_screen(screen: Rect2D) -> Self {
        Self {
            effects: Vec::new(),
            screen,
        }
    }

    /// Starts a flash of `color` lasting `duration`.
    ///
    /// Zero-length flashes are ignored.
    pub fn flash(&mut self, color: Color, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        self.effects.push(FlashEffect::new(color, duration));
    }

    /// Ages every effect and drops the expired ones.
    pub fn update(&mut self, elapsed: Duration) {
        for effect in &mut self.effects {
            effect.elapsed += elapsed;
        }

        let before = self.effects.len();
        self.effects.retain(|effect| !effect.is_expired());
        if before != self.effects.len() {
            trace!(target: "effects", "{} effect(s) expired", before - self.effects.len());
        }
    }

    /// Draws every live overlay, oldest first.
    pub fn draw_effects(&self, video: &mut dyn VideoService) {
        for effect in &self.effects {
            video.draw_rect(self.screen, effect.current_color());
        }
    }

    pub fn active_count(&self) -> usize {
        self.effects.len()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl Default for EffectSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::testing::RecordingVideo;

    const RED: Color = Color::rgba(1.0, 0.0, 0.0, 0.8);

    #[test]
    fn flash_fades_then_expires() {
        let mut effects = EffectSupervisor::new();
        effects.flash(RED, Duration::from_millis(200));

        effects.update(Duration::from_millis(100));
        assert_eq!(effects.active_count(), 1);

        let mut video = RecordingVideo::default();
        effects.draw_effects(&mut video);
        assert_eq!(video.rects.len(), 1);
        assert!((video.rects[0].1.a - 0.4).abs() < 1e-4);
        assert_eq!(video.rects[0].0, DEFAULT_SCREEN);

        effects.update(Duration::from_millis(100));
        assert_eq!(effects.active_count(), 0);
    }

    #[test]
    fn zero_length_flash_is_ignored() {
        let mut effects = EffectSupervisor::new();
        effects.flash(RED, Duration::ZERO);
        assert_eq!(effects.active_count(), 0);
    }

    #[test]
    fn custom_screen_is_used_for_overlays() {
        let screen = Rect2D::from_origin(0.0, 0.0, 320.0, 240.0);
        let mut effects = EffectSupervisor::with_screen(screen);
        effects.flash(Color::WHITE, Duration::from_secs(1));

        let mut video = RecordingVideo::default();
        effects.draw_effects(&mut video);
        assert_eq!(video.rects[0].0, screen);
    }

    #[test]
    fn expired_flash_is_transparent() {
        let mut flash = FlashEffect::new(RED, Duration::from_millis(10));
        flash.elapsed = Duration::from_millis(20);
        assert!(flash.is_expired());
        assert_eq!(flash.current_color().a, 0.0);
    }
}
