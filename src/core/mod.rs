//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Logic-thread coordinator: owns the mode stack and the stock services
// and ticks them at a fixed rate.
//
// Architecture:
// ```text
//   EventCollector ─► MenuInput ─► FrameClock / FrameCanvas fades
//                                         │
//                                         ▼
//                        ModeStackManager::update(Services)
//                                         │
//                                         ▼
//                draw → draw_effects → draw_post_effects (FrameCanvas)
//                                         │
//                                         ▼
//                      empty stack → HostHandle exit
// ```
//
// Notes:
// The orchestrator runs apart from the platform layer. The only traffic
// between them is PlatformEvent (keys, window close) one way and
// CoreEvent (exit request) the other.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod effects;
pub mod geometry;
pub mod input;
pub mod mode;
pub(crate) mod platform_bridge;
pub mod services;

//=== Public API ==========================================================

pub use mode::{GameMode, ModeContext, ModeStackConfig, ModeStackManager, ModeType};

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{info, trace};

//=== Internal Dependencies ===============================================

use input::{InputEvent, MenuInput};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};
use services::{AppHost, FrameCanvas, FrameClock, HostHandle, Services, SoundRegistry, TimingService};

//=== CoreSystemsOrchestrator =============================================

/// Owns every logic-thread system and runs one frame at a time.
pub(crate) struct CoreSystemsOrchestrator {
    manager: ModeStackManager,
    clock: FrameClock,
    canvas: FrameCanvas,
    audio: SoundRegistry,
    input: MenuInput,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new(config: ModeStackConfig) -> Self {
        let mut audio = SoundRegistry::new();
        let mut manager = ModeStackManager::with_config(config);
        manager.initialize(&mut audio);

        Self {
            manager,
            clock: FrameClock::new(),
            canvas: FrameCanvas::new(),
            audio,
            input: MenuInput::new(),
        }
    }

    /// Gives the caller the mode stack before the first frame, typically
    /// to push the boot mode.
    pub fn init_modes<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut ModeStackManager),
    {
        init_fn(&mut self.manager);
        info!(
            target: "core",
            "Mode stack prepared: {} mode(s) pending",
            self.manager.pending_push_count()
        );
    }

    //--- spawn_core_thread() ---------------------------------------------

    /// Moves the orchestrator onto its own thread, ticking at `tps`.
    ///
    /// Each tick:
    ///  1. Collects platform events (exit on window close / disconnect)
    ///  2. Samples the clock
    ///  3. Runs one frame
    ///  4. Sleeps to keep the fixed rate
    ///
    /// The mode stack is torn down before the thread ends.
    pub fn spawn_core_thread(self, receiver: Receiver<PlatformEvent>, host: HostHandle, tps: f64) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut orchestrator = self;
            let mut host = host;
            let mut collector = EventCollector::new(receiver);

            loop {
                let frame_start = Instant::now();

                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "core", "Platform closed, core thread exiting");
                    break;
                }

                orchestrator.clock.tick();
                if orchestrator.frame(collector.batches(), &mut host) == TickControl::Exit {
                    info!(target: "core", "Exit requested, core thread exiting");
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }

            orchestrator.shutdown();
        })
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame with the update time already recorded on the clock.
    fn frame(&mut self, batches: &[Vec<InputEvent>], host: &mut dyn AppHost) -> TickControl {
        let elapsed = self.clock.elapsed_update_time();

        self.input.process_frame(batches);
        self.canvas.advance(elapsed);

        let mut services = Services {
            timing: &mut self.clock,
            video: &mut self.canvas,
            audio: &mut self.audio,
            input: &self.input,
            host,
        };
        self.manager.update(&mut services);

        self.canvas.begin_frame();
        self.manager.draw(&mut self.canvas);
        self.manager.draw_effects(&mut self.canvas);
        self.manager.draw_post_effects(&mut self.canvas);
        let commands = self.canvas.finish_frame().len();
        trace!(target: "core", "Frame rendered {} draw command(s)", commands);

        if self.manager.is_empty() && !self.manager.phase().is_change_pending() {
            return TickControl::Exit;
        }
        TickControl::Continue
    }

    fn shutdown(&mut self) {
        self.manager.teardown(&mut self.audio);
        info!(target: "core", "Core systems shut down");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
