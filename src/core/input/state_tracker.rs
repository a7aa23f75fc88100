//=========================================================================
// State Tracker
//=========================================================================
//
// Keyboard state with per-frame deltas.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys held) → query
//
// Frame lifecycle: clear() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// Tracks keys held across frames and keys pressed/released this frame.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub(super) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    pub(super) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match *event {
                InputEvent::KeyDown { key } => {
                    // OS key repeat arrives as more KeyDowns; only the first counts
                    if self.keys_down.insert(key) {
                        self.keys_pressed_this_frame.insert(key);
                    }
                }
                InputEvent::KeyUp { key } => {
                    if self.keys_down.remove(&key) {
                        self.keys_released_this_frame.insert(key);
                    }
                }
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    #[cfg(test)]
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    #[cfg(test)]
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_pressed_this_frame.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
