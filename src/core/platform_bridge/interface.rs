//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages and errors crossing the platform ↔ logic thread boundary.
//
//   Platform ──PlatformEvent──► logic thread
//   Platform ◄──CoreEvent────── logic thread  (see services::host)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over crossbeam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlatformEvent {
    /// Key events buffered since the previous redraw, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    #[error("event loop error: {0}")]
    EventLoopExecution(String),
}

//=========================================================================
// Unit Tests
//=========================================================================
