//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Winit window and keyboard plumbing on the main thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  EventCollector      │
//  │   ↓                      │    │   ↓                  │
//  │  input_processor         │    │  MenuInput           │
//  │   ↓                      │    │   ↓                  │
//  │  InputBuffer             │    │  ModeStackManager    │
//  │   ↓                      │    │   ↓                  │
//  │  RedrawRequested (flush) │    │  HostHandle          │
//  │   ↓                      │    └──────────────────────┘
//  │  PlatformEvent ──────────┼──────────►   │
//  │                          │              │
//  │  about_to_wait ◄─────────┼── CoreEvent ─┘
//  └──────────────────────────┘
// ```
//
// Frame boundary is RedrawRequested: all keys seen since the previous
// redraw are sent as one batch. The loop exits on window close, on
// CoreEvent::ExitRequested, or when the logic thread has gone away.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::services::CoreEvent;
use input_buffer::InputBuffer;

//=== WindowConfig ========================================================

/// Window parameters chosen on the engine builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stratum Engine".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

//=== Platform ============================================================

/// Window owner and keyboard forwarder.
///
/// Not `Send`: winit requires the main thread on macOS/iOS. Talks to
/// the logic thread only through its two channels.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    config: WindowConfig,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    core_events: Receiver<CoreEvent>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(config: WindowConfig, event_sender: Sender<PlatformEvent>, core_events: Receiver<CoreEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
            core_events,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes or the logic
    /// thread asks to exit.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        // Poll keeps about_to_wait firing so exit requests are seen promptly
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends the keys buffered since the last redraw. A closed channel
    /// drops them with a warning so the window can still be closed.
    fn flush_input_buffer(&mut self) {
        let Some(events) = self.buffer.drain() else {
            return;
        };

        let count = events.len();
        trace!(target: "platform::input", "Flushing {} key events", count);

        if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
        }
    }

    /// Returns true when the logic thread requested exit or is gone.
    fn exit_requested(&self) -> bool {
        match self.core_events.try_recv() {
            Ok(CoreEvent::ExitRequested) => {
                info!(target: "platform", "Exit requested by core");
                true
            }
            Err(TryRecvError::Disconnected) => {
                info!(target: "platform", "Core thread gone, closing window");
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match input_processor::process_key_event(key_event) {
                    Some(event) => self.buffer.push(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested() {
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
