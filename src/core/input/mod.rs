//=========================================================================
// Input System
//=========================================================================
//
// Turns the platform's keyboard batches into menu-level button presses.
//
// Architecture:
//   Vec<Vec<InputEvent>> → StateTracker → bindings: KeyCode → MenuButton
//                                               ↓
//                                   InputService queries (this frame)
//
// Notes:
// Owned and fed by the CoreSystemsOrchestrator once per tick, before the
// mode stack updates, so every mode sees one consistent frame of input.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode};
pub(crate) use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::services::InputService;

//=== MenuButton ==========================================================

/// Logical menu buttons a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuButton {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

//=== MenuInput ===========================================================

/// Keyboard-driven implementation of [`InputService`].
///
/// Default bindings: arrows and WASD for directions, Enter/Space/F to
/// confirm, Escape/Backspace/X to cancel.
pub struct MenuInput {
    tracker: StateTracker,
    bindings: HashMap<KeyCode, MenuButton>,
}

impl MenuInput {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        let mut input = Self::unbound();
        for (key, button) in [
            (KeyCode::ArrowUp, MenuButton::Up),
            (KeyCode::KeyW, MenuButton::Up),
            (KeyCode::ArrowDown, MenuButton::Down),
            (KeyCode::KeyS, MenuButton::Down),
            (KeyCode::ArrowLeft, MenuButton::Left),
            (KeyCode::KeyA, MenuButton::Left),
            (KeyCode::ArrowRight, MenuButton::Right),
            (KeyCode::KeyD, MenuButton::Right),
            (KeyCode::Enter, MenuButton::Confirm),
            (KeyCode::Space, MenuButton::Confirm),
            (KeyCode::KeyF, MenuButton::Confirm),
            (KeyCode::Escape, MenuButton::Cancel),
            (KeyCode::Backspace, MenuButton::Cancel),
            (KeyCode::KeyX, MenuButton::Cancel),
        ] {
            input.bind_key(key, button);
        }
        input
    }

    /// Creates an input system with no key bindings.
    pub fn unbound() -> Self {
        Self {
            tracker: StateTracker::new(),
            bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key` to `button`, replacing any previous binding of `key`.
    pub fn bind_key(&mut self, key: KeyCode, button: MenuButton) {
        self.bindings.insert(key, button);
    }

    //--- Frame Processing -------------------------------------------------

    /// Digests every input batch received since the previous tick.
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) {
        self.tracker.clear();
        for batch in batches {
            self.tracker.process_events(batch);
        }

        if self.tracker.keys_pressed().next().is_some() {
            trace!(target: "input", "Pressed this frame: {:?}", self.tracker.keys_pressed().collect::<Vec<_>>());
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if any key bound to `button` went down this frame.
    pub fn is_pressed(&self, button: MenuButton) -> bool {
        self.bindings
            .iter()
            .any(|(key, bound)| *bound == button && self.tracker.is_key_pressed(*key))
    }
}

impl Default for MenuInput {
    fn default() -> Self {
        Self::new()
    }
}

//=== InputService ========================================================

impl InputService for MenuInput {
    fn up_press(&self) -> bool {
        self.is_pressed(MenuButton::Up)
    }

    fn down_press(&self) -> bool {
        self.is_pressed(MenuButton::Down)
    }

    fn left_press(&self) -> bool {
        self.is_pressed(MenuButton::Left)
    }

    fn right_press(&self) -> bool {
        self.is_pressed(MenuButton::Right)
    }

    fn confirm_press(&self) -> bool {
        self.is_pressed(MenuButton::Confirm)
    }

    fn cancel_press(&self) -> bool {
        self.is_pressed(MenuButton::Cancel)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: KeyCode) -> Vec<Vec<InputEvent>> {
        vec![vec![InputEvent::KeyDown { key }]]
    }

    #[test]
    fn default_bindings_map_arrows_and_wasd() {
        let mut input = MenuInput::new();

        input.process_frame(&press(KeyCode::KeyW));
        assert!(input.up_press());
        assert!(input.arrow_press());
        assert!(!input.down_press());

        let mut input = MenuInput::new();
        input.process_frame(&press(KeyCode::ArrowRight));
        assert!(input.right_press());
    }

    #[test]
    fn confirm_and_cancel() {
        let mut input = MenuInput::new();
        input.process_frame(&press(KeyCode::Enter));
        assert!(input.confirm_press());
        assert!(!input.cancel_press());
        assert!(!input.arrow_press());

        let mut input = MenuInput::new();
        input.process_frame(&press(KeyCode::Escape));
        assert!(input.cancel_press());
    }

    #[test]
    fn press_lasts_one_frame() {
        let mut input = MenuInput::new();
        input.process_frame(&press(KeyCode::Enter));
        input.process_frame(&[]);
        assert!(!input.confirm_press());
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut input = MenuInput::unbound();
        input.process_frame(&press(KeyCode::Enter));
        assert!(!input.confirm_press());
        assert!(input.tracker.is_key_pressed(KeyCode::Enter));
    }

    #[test]
    fn rebinding_replaces_previous_button() {
        let mut input = MenuInput::new();
        input.bind_key(KeyCode::Enter, MenuButton::Cancel);
        input.process_frame(&press(KeyCode::Enter));
        assert!(input.cancel_press());
        assert!(!input.confirm_press());
        assert!(!input.is_pressed(MenuButton::Confirm));
    }
}
