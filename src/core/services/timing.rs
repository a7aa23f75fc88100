//=========================================================================
// Frame Clock
//=========================================================================
//
// Stock TimingService measuring wall-clock time between logic ticks.
//
// Frame lifecycle: tick() → [modes read elapsed_update_time()] → tick()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use log::debug;

//=== Internal Dependencies ===============================================

use super::TimingService;

//=== FrameClock ==========================================================

/// Measures per-tick update time and keeps a resettable accumulator.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    update_time: Duration,
    accumulated: Duration,
    context_changes: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            update_time: Duration::ZERO,
            accumulated: Duration::ZERO,
            context_changes: 0,
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Samples the wall clock and records the time since the previous tick.
    ///
    /// The first tick after construction or a reset reports zero.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = self
            .last_tick
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.advance(elapsed);
        elapsed
    }

    /// Records `elapsed` as this frame's update time without sampling.
    pub fn advance(&mut self, elapsed: Duration) {
        self.update_time = elapsed;
        self.accumulated += elapsed;
    }

    //--- Queries ----------------------------------------------------------

    /// Total update time since the accumulator was last reset.
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Number of active-mode changes reported so far.
    pub fn context_changes(&self) -> u64 {
        self.context_changes
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//=== TimingService =======================================================

impl TimingService for FrameClock {
    fn elapsed_update_time(&self) -> Duration {
        self.update_time
    }

    fn notify_active_context_changed(&mut self) {
        self.context_changes += 1;
        debug!(target: "timing", "Active context changed ({} so far)", self.context_changes);
    }

    fn reset_update_time_accumulator(&mut self) {
        self.update_time = Duration::ZERO;
        self.accumulated = Duration::ZERO;
        self.last_tick = Some(Instant::now());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_reports_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), Duration::ZERO);
        assert_eq!(clock.elapsed_update_time(), Duration::ZERO);
    }

    #[test]
    fn advance_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(17));

        assert_eq!(clock.elapsed_update_time(), Duration::from_millis(17));
        assert_eq!(clock.accumulated(), Duration::from_millis(33));
    }

    #[test]
    fn reset_clears_update_time_and_accumulator() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_millis(500));

        clock.reset_update_time_accumulator();

        assert_eq!(clock.elapsed_update_time(), Duration::ZERO);
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }

    #[test]
    fn context_changes_are_counted() {
        let mut clock = FrameClock::new();
        clock.notify_active_context_changed();
        clock.notify_active_context_changed();
        assert_eq!(clock.context_changes(), 2);
    }
}
