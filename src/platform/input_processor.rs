//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit keyboard events into engine InputEvents.
//
//   winit KeyEvent → physical key → KeyCode → InputEvent → InputBuffer
//
// Keys the engine does not name (F-keys, numpad, media keys) are dropped
// here and never cross the thread boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode};

//=== Event Processing ====================================================

/// Converts a winit key event, filtering unmapped keys.
pub(crate) fn process_key_event(key_event: &KeyEvent) -> Option<InputEvent> {
    let PhysicalKey::Code(code) = key_event.physical_key else {
        return None;
    };
    key_input_event(KeyCode::from(code), key_event.state)
}

fn key_input_event(key: KeyCode, state: ElementState) -> Option<InputEvent> {
    if key == KeyCode::Unidentified {
        return None;
    }

    let event = match state {
        ElementState::Pressed => InputEvent::KeyDown { key },
        ElementState::Released => InputEvent::KeyUp { key },
    };
    Some(event)
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps the physical keys the menus use. Everything else is `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Arrows -------------------------------------------------------
            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Letters ------------------------------------------------------
            KeyW => KeyCode::KeyW,
            KeyA => KeyCode::KeyA,
            KeyS => KeyCode::KeyS,
            KeyD => KeyCode::KeyD,
            KeyF => KeyCode::KeyF,
            KeyX => KeyCode::KeyX,
            KeyZ => KeyCode::KeyZ,

            //--- Special ------------------------------------------------------
            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Backspace => KeyCode::Backspace,
            Tab => KeyCode::Tab,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_maps_to_key_down() {
        assert_eq!(
            key_input_event(KeyCode::Enter, ElementState::Pressed),
            Some(InputEvent::KeyDown { key: KeyCode::Enter })
        );
    }

    #[test]
    fn released_maps_to_key_up() {
        assert_eq!(
            key_input_event(KeyCode::Escape, ElementState::Released),
            Some(InputEvent::KeyUp { key: KeyCode::Escape })
        );
    }

    #[test]
    fn unidentified_keys_are_filtered() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(key_input_event(KeyCode::Unidentified, ElementState::Pressed), None);
    }

    #[test]
    fn menu_keys_convert() {
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::Backspace), KeyCode::Backspace);
    }
}
