//=========================================================================
// Input Event Types
//=========================================================================
//
// Engine-side representation of keyboard input, independent of the
// windowing backend.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (keys held / pressed this frame)
//         ↓
//    MenuInput (up/down/left/right/confirm/cancel)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the key location, not the character produced, so `KeyW`
/// is the same key on QWERTY and AZERTY layouts. Only the keys a menu
/// driven game needs are listed; everything else maps to `Unidentified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Arrow Keys -------------------------------------------------------
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    //--- Letter Keys ------------------------------------------------------
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyF,
    KeyX,
    KeyZ,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,

    /// Any key not mapped by the platform layer.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Discrete keyboard event from the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
}

impl InputEvent {
    /// The key this event refers to.
    pub fn key(&self) -> KeyCode {
        match *self {
            Self::KeyDown { key } | Self::KeyUp { key } => key,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
