//=========================================================================
// Stratum Engine
//=========================================================================
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                                   │                       │
//         ├─ with_tps()                       └─ push boot mode(s)    ├─ spawns logic thread
//         ├─ with_channel_capacity()                                  ├─ runs winit platform
//         ├─ with_fade_duration()                                     └─ blocks until exit
//         ├─ with_window_title()
//         └─ with_window_size()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformEvent;
use crate::core::services::{CoreEvent, HostHandle};
use crate::core::{CoreSystemsOrchestrator, ModeStackConfig, ModeStackManager};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Fade duration**: 800 ms for transition fades
/// - **Window**: "Stratum Engine", 1024x768
///
/// # Examples
///
/// ```no_run
/// use stratum_engine::prelude::*;
///
/// struct Boot;
///
/// impl GameMode for Boot {
///     fn mode_type(&self) -> ModeType { ModeType::BOOT }
///     fn draw(&mut self, _video: &mut dyn VideoService) {}
///     fn reset(&mut self, _context: &mut ModeContext<'_>) {}
/// }
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_window_title("Skill Tree")
///     .build()
///     .init(|modes| {
///         modes.push(Boot, false, true);
///     })
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    fade_duration: Duration,
    window: WindowConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            fade_duration: crate::core::mode::FADE_IN_OUT_TIME,
            window: WindowConfig::default(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the length of the fade-out and fade-in around mode changes.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is zero. Use non-fading push/pop requests
    /// for instant changes.
    pub fn with_fade_duration(mut self, duration: Duration) -> Self {
        assert!(!duration.is_zero(), "Fade duration must be positive");
        self.fade_duration = duration;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the logical window size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, fade: {:?})",
            self.tps, self.channel_capacity, self.fade_duration
        );

        let config = ModeStackConfig::new().with_fade_duration(self.fade_duration);
        Engine {
            orchestrator: CoreSystemsOrchestrator::new(config),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Stratum engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► MenuInput, ModeStackManager, stock services
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Keyboard
///
/// Communication: PlatformEvent (platform → core), CoreEvent (core → platform)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Gives access to the mode stack before the engine starts, so the
    /// boot mode can be pushed. Pushed modes become active on the first
    /// frame.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut ModeStackManager),
    {
        info!("Initializing mode stack");
        self.orchestrator.init_modes(init_fn);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core and core → platform channels
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close or exit request: both sides stop, the mode
    ///    stack is torn down and the logic thread is joined
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels ----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(self.channel_capacity);
        let (core_tx, core_rx): (Sender<CoreEvent>, Receiver<CoreEvent>) = unbounded();

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self
            .orchestrator
            .spawn_core_thread(rx, HostHandle::new(core_tx), self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(self.window, tx, core_rx);

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Wait for logic thread to terminate ------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mode::{GameMode, ModeContext, ModeType, FADE_IN_OUT_TIME};
    use crate::core::services::VideoService;

    struct Boot;

    impl GameMode for Boot {
        fn mode_type(&self) -> ModeType {
            ModeType::BOOT
        }

        fn draw(&mut self, _video: &mut dyn VideoService) {}

        fn reset(&mut self, _context: &mut ModeContext<'_>) {}
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.fade_duration, FADE_IN_OUT_TIME);
        assert_eq!(builder.window, WindowConfig::default());
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Fade duration must be positive")]
    fn builder_with_zero_fade_panics() {
        EngineBuilder::new().with_fade_duration(Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_empty_window_panics() {
        EngineBuilder::new().with_window_size(0, 600);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_fade_duration(Duration::from_millis(300))
            .with_window_title("Skills")
            .with_window_size(800, 600)
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window.title, "Skills");
        assert_eq!((engine.window.width, engine.window.height), (800, 600));
    }

    #[test]
    fn init_queues_boot_mode() {
        let mut pending = 0;
        let _engine = EngineBuilder::new().build().init(|modes| {
            modes.push(Boot, false, true);
            pending = modes.pending_push_count();
        });
        assert_eq!(pending, 1);
    }
}
