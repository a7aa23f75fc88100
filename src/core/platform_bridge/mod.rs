//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the windowing backend and the logic thread. The core
// only sees these types, never winit.
//
// Components:
// - `interface`: event and error types
// - `event_collector`: logic-side draining of the platform channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
