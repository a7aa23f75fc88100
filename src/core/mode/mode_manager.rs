//=========================================================================
// Mode Stack Manager
//=========================================================================
//
// Owns the stack of game modes and applies deferred pushes and pops at a
// single resolution point per frame, gated by transitional fades.
//
// Resolution order:
//   1. pops      (over-pop is reported and the counter reset)
//   2. pushes    (drained from the back of the pending buffer)
//   3. empty?    → request application exit, stop
//   4. reset new top → fade-in → timer notification
//
// Requests made while the top mode runs are queued in ModeCommands and
// become ordinary pending requests once the mode returns.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{GameMode, ModeCommand, ModeCommands, ModeContext, ModeHandle, ModeType, TransitionPhase};
use crate::core::effects::ModeSystems;
use crate::core::geometry::Color;
use crate::core::services::{AudioService, Services, VideoService};

//=== Constants ===========================================================

/// Standard duration of transitional fades.
pub const FADE_IN_OUT_TIME: Duration = Duration::from_millis(800);

//=== ModeStackConfig =====================================================

/// Fade settings applied to every transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeStackConfig {
    pub fade_duration: Duration,
    pub fade_color: Color,
}

impl ModeStackConfig {
    pub fn new() -> Self {
        Self {
            fade_duration: FADE_IN_OUT_TIME,
            fade_color: Color::BLACK,
        }
    }

    pub fn with_fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Sets the color faded to. Its alpha is ignored.
    pub fn with_fade_color(mut self, color: Color) -> Self {
        self.fade_color = color;
        self
    }
}

impl Default for ModeStackConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=== ModeSlot ============================================================

struct ModeSlot {
    handle: ModeHandle,
    mode: Box<dyn GameMode>,
    systems: ModeSystems,
}

//=== ModeStackManager ====================================================

/// Stack of exclusive game modes with deferred, fade-gated transitions.
///
/// Only the top mode is updated and drawn. `push`, `pop` and `pop_all`
/// never touch the stack directly; every request made within a frame is
/// applied together at the start of the next `update`.
///
/// # Example
///
/// ```rust
/// # use stratum_engine::prelude::*;
/// # struct Title;
/// # impl GameMode for Title {
/// #     fn mode_type(&self) -> ModeType { ModeType::BOOT }
/// #     fn draw(&mut self, _video: &mut dyn VideoService) {}
/// #     fn reset(&mut self, _context: &mut ModeContext<'_>) {}
/// # }
/// let mut manager = ModeStackManager::new();
/// manager.push(Title, false, false);
///
/// assert_eq!(manager.depth(), 0);
/// assert_eq!(manager.pending_push_count(), 1);
/// ```
pub struct ModeStackManager {
    stack: Vec<ModeSlot>,
    pending: Vec<ModeSlot>,
    pop_count: usize,
    phase: TransitionPhase,
    next_handle: u64,
    config: ModeStackConfig,
}

impl ModeStackManager {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::with_config(ModeStackConfig::default())
    }

    pub fn with_config(config: ModeStackConfig) -> Self {
        Self {
            stack: Vec::new(),
            pending: Vec::new(),
            pop_count: 0,
            phase: TransitionPhase::Idle,
            next_handle: 1,
            config,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Destroys every owned mode and clears all pending requests.
    ///
    /// Safe to call repeatedly.
    pub fn initialize(&mut self, audio: &mut dyn AudioService) {
        self.teardown(audio);
        info!(target: "mode_manager", "Mode stack initialized");
    }

    /// Destroys every mode on the stack and in the pending buffer, each
    /// releasing its audio resources exactly once.
    pub fn teardown(&mut self, audio: &mut dyn AudioService) {
        let owned = self.stack.len() + self.pending.len();
        if owned > 0 {
            debug!(target: "mode_manager", "Tearing down {} mode(s)", owned);
        }

        while let Some(slot) = self.stack.pop() {
            Self::destroy(slot, audio);
        }
        while let Some(slot) = self.pending.pop() {
            Self::destroy(slot, audio);
        }

        self.pop_count = 0;
        self.phase = TransitionPhase::Idle;
    }

    //--- Stack Requests ---------------------------------------------------

    /// Queues `mode` to be pushed at the next resolution point.
    ///
    /// Ownership moves to the manager immediately. With `fade_out` the
    /// resolution waits for a transitional fade-out to finish; `fade_in`
    /// selects a timed fade-in after the swap.
    pub fn push<M>(&mut self, mode: M, fade_out: bool, fade_in: bool) -> ModeHandle
    where
        M: GameMode + 'static,
    {
        self.push_boxed(Box::new(mode), fade_out, fade_in)
    }

    pub fn push_boxed(&mut self, mode: Box<dyn GameMode>, fade_out: bool, fade_in: bool) -> ModeHandle {
        let handle = ModeHandle::from_raw(self.next_handle);
        self.next_handle += 1;

        debug!(
            target: "mode_manager",
            "Queued push of mode {} ({}), fade_out: {}, fade_in: {}",
            handle, mode.mode_type(), fade_out, fade_in
        );

        self.pending.push(ModeSlot {
            handle,
            mode,
            systems: ModeSystems::new(),
        });
        self.phase = TransitionPhase::requested(fade_out, fade_in);
        handle
    }

    /// Queues the removal of the top mode. Calls accumulate.
    pub fn pop(&mut self, fade_out: bool, fade_in: bool) {
        self.pop_count += 1;
        debug!(
            target: "mode_manager",
            "Queued pop ({} pending), fade_out: {}, fade_in: {}",
            self.pop_count, fade_out, fade_in
        );
        self.phase = TransitionPhase::requested(fade_out, fade_in);
    }

    /// Schedules every mode currently on the stack for removal.
    ///
    /// Overrides the pending pop count instead of adding to it. Does not
    /// by itself start a transition: the pops are applied at the next
    /// resolution triggered by a `push` or `pop`.
    pub fn pop_all(&mut self) {
        self.pop_count = self.stack.len();
        debug!(target: "mode_manager", "Scheduled pop of all {} mode(s)", self.pop_count);
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one frame: resolves pending requests if their fade allows it,
    /// then updates the top mode.
    pub fn update(&mut self, services: &mut Services<'_>) {
        self.poll_fade_out(services.video);

        if let TransitionPhase::ReadyToSwap { fade_in } = self.phase {
            self.resolve(services, fade_in);
        }

        self.update_top(services);
    }

    //--- Drawing ----------------------------------------------------------

    pub fn draw(&mut self, video: &mut dyn VideoService) {
        if let Some(top) = self.stack.last_mut() {
            top.mode.draw(video);
        }
    }

    pub fn draw_effects(&mut self, video: &mut dyn VideoService) {
        if let Some(top) = self.stack.last_mut() {
            top.mode.draw_effects(&top.systems, video);
        }
    }

    pub fn draw_post_effects(&mut self, video: &mut dyn VideoService) {
        if let Some(top) = self.stack.last_mut() {
            top.mode.draw_post_effects(video);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn top(&self) -> Option<&dyn GameMode> {
        self.stack.last().map(|slot| slot.mode.as_ref())
    }

    pub fn top_mut(&mut self) -> Option<&mut dyn GameMode> {
        self.stack.last_mut().map(|slot| &mut *slot.mode as &mut dyn GameMode)
    }

    pub fn top_handle(&self) -> Option<ModeHandle> {
        self.stack.last().map(|slot| slot.handle)
    }

    /// Mode at `index` counted from the top, where 1 is the top.
    ///
    /// Index 0 also means the top. Returns `None` past the bottom.
    pub fn get(&self, index: usize) -> Option<&dyn GameMode> {
        self.slot_index(index).map(|i| self.stack[i].mode.as_ref())
    }

    /// Type of the top mode, or `ModeType::DUMMY` if the stack is empty.
    pub fn game_type(&self) -> ModeType {
        self.game_type_at(1)
    }

    /// Type of the mode at `index` (as in [`get`](Self::get)), or
    /// `ModeType::DUMMY` if there is no such mode.
    pub fn game_type_at(&self, index: usize) -> ModeType {
        self.get(index)
            .map(|mode| mode.mode_type())
            .unwrap_or(ModeType::DUMMY)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn pending_push_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_pop_count(&self) -> usize {
        self.pop_count
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn config(&self) -> &ModeStackConfig {
        &self.config
    }

    /// Human-readable listing of the stack, top first.
    pub fn dump_stack(&self) -> String {
        if self.stack.is_empty() {
            return String::from("***Game stack is empty!");
        }

        let mut out = String::from("***top of stack***\n");
        for (index, slot) in self.stack.iter().enumerate().rev() {
            out.push_str(&format!(" index: {} type: {}\n", index, slot.mode.mode_type()));
        }
        out.push_str("***bottom of stack***");
        out
    }

    //--- Internal Helpers -------------------------------------------------

    fn poll_fade_out(&mut self, video: &mut dyn VideoService) {
        let TransitionPhase::FadingOut { fade_in, started } = self.phase else {
            return;
        };

        if !started {
            video.begin_fade_out(self.config.fade_color, self.config.fade_duration);
            self.phase = TransitionPhase::FadingOut { fade_in, started: true };
        }

        if video.is_last_fade_transitional() && !video.is_fading() {
            trace!(target: "mode_manager", "Transition fade-out finished");
            self.phase = TransitionPhase::ReadyToSwap { fade_in };
        }
    }

    fn resolve(&mut self, services: &mut Services<'_>, fade_in: bool) {
        self.phase = TransitionPhase::Idle;

        while self.pop_count > 0 {
            let Some(slot) = self.stack.pop() else {
                warn!(
                    target: "mode_manager",
                    "Tried to pop off {} more mode(s) than were on the stack",
                    self.pop_count
                );
                self.pop_count = 0;
                break;
            };
            Self::destroy(slot, services.audio);
            self.pop_count -= 1;
        }

        // Drained from the back: a batch lands in reverse request order
        while let Some(slot) = self.pending.pop() {
            self.stack.push(slot);
        }

        let depth = self.stack.len();
        let Some(top) = self.stack.last_mut() else {
            warn!(target: "mode_manager", "Mode stack is empty, exiting application");
            services.host.request_exit();
            return;
        };

        info!(
            target: "mode_manager",
            "Mode {} ({}) is now active, stack depth {}",
            top.handle, top.mode.mode_type(), depth
        );

        let mut commands = ModeCommands::new();
        {
            let mut context = ModeContext::new(top.handle, &mut top.systems, services, &mut commands);
            top.mode.reset(&mut context);
        }

        let fade = if fade_in { self.config.fade_duration } else { Duration::ZERO };
        services.video.begin_fade_in(fade);
        services.timing.notify_active_context_changed();
        services.timing.reset_update_time_accumulator();

        self.apply_commands(commands);
    }

    fn update_top(&mut self, services: &mut Services<'_>) {
        let elapsed = services.timing.elapsed_update_time();
        let Some(top) = self.stack.last_mut() else {
            return;
        };

        top.systems.update(elapsed);

        let mut commands = ModeCommands::new();
        {
            let mut context = ModeContext::new(top.handle, &mut top.systems, services, &mut commands);
            top.mode.update(&mut context);
        }

        self.apply_commands(commands);
    }

    fn apply_commands(&mut self, mut commands: ModeCommands) {
        for command in commands.take() {
            match command {
                ModeCommand::Push { mode, fade_out, fade_in } => {
                    self.push_boxed(mode, fade_out, fade_in);
                }
                ModeCommand::Pop { fade_out, fade_in } => self.pop(fade_out, fade_in),
                ModeCommand::PopAll => self.pop_all(),
            }
        }
    }

    /// Maps a 1-based index from the top onto the stack vector.
    fn slot_index(&self, index: usize) -> Option<usize> {
        let depth = self.stack.len();
        if depth == 0 || index > depth {
            return None;
        }
        Some(depth - index.max(1))
    }

    fn destroy(slot: ModeSlot, audio: &mut dyn AudioService) {
        debug!(target: "mode_manager", "Destroying mode {} ({})", slot.handle, slot.mode.mode_type());
        audio.release_resources_owned_by(slot.handle);
    }
}

impl Default for ModeStackManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ModeStackManager {
    fn drop(&mut self) {
        let owned = self.stack.len() + self.pending.len();
        if owned > 0 {
            warn!(
                target: "mode_manager",
                "Mode stack dropped without teardown, {} mode(s) never released their audio",
                owned
            );
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::testing::TestRig;
    use std::sync::{Arc, Mutex};

    //=====================================================================
    // Probe Mode
    //=====================================================================

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Reset(u8),
        Update(u8),
        Script(u8),
        Draw(u8),
        DrawPost(u8),
    }

    #[derive(Debug, Clone, Copy)]
    enum Request {
        Push(u8),
        Pop,
    }

    type CallLog = Arc<Mutex<Vec<Call>>>;

    struct Probe {
        tag: u8,
        log: CallLog,
        scripted: bool,
        on_update: Vec<Request>,
    }

    impl Probe {
        fn new(tag: u8, log: &CallLog) -> Self {
            Self {
                tag,
                log: Arc::clone(log),
                scripted: false,
                on_update: Vec::new(),
            }
        }

        /// Registers a script hook and a flash effect on every reset.
        fn scripted(mut self) -> Self {
            self.scripted = true;
            self
        }

        fn on_update(mut self, request: Request) -> Self {
            self.on_update.push(request);
            self
        }

        fn record(&self, call: Call) {
            self.log.lock().unwrap().push(call);
        }
    }

    impl GameMode for Probe {
        fn mode_type(&self) -> ModeType {
            ModeType(self.tag)
        }

        fn update(&mut self, context: &mut ModeContext<'_>) {
            self.record(Call::Update(self.tag));
            for request in self.on_update.drain(..) {
                match request {
                    Request::Push(tag) => context.commands.push(Probe::new(tag, &self.log), false, false),
                    Request::Pop => context.commands.pop(false, false),
                }
            }
        }

        fn draw(&mut self, _video: &mut dyn VideoService) {
            self.record(Call::Draw(self.tag));
        }

        fn draw_post_effects(&mut self, _video: &mut dyn VideoService) {
            self.record(Call::DrawPost(self.tag));
        }

        fn reset(&mut self, context: &mut ModeContext<'_>) {
            self.record(Call::Reset(self.tag));
            if self.scripted {
                let log = Arc::clone(&self.log);
                let tag = self.tag;
                context
                    .systems
                    .scripts
                    .add("probe", move |_| log.lock().unwrap().push(Call::Script(tag)));
                context.systems.effects.flash(Color::WHITE, Duration::from_secs(1));
            }
        }
    }

    //=====================================================================
    // Helpers
    //=====================================================================

    fn new_log() -> CallLog {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn calls(log: &CallLog) -> Vec<Call> {
        log.lock().unwrap().clone()
    }

    fn take_calls(log: &CallLog) -> Vec<Call> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    fn frame(manager: &mut ModeStackManager, rig: &mut TestRig) {
        manager.update(&mut rig.services());
    }

    /// Builds a resolved stack, bottom first, and clears every record.
    fn stacked(tags: &[u8], log: &CallLog, rig: &mut TestRig) -> (ModeStackManager, Vec<ModeHandle>) {
        let mut manager = ModeStackManager::new();
        let mut handles = Vec::new();
        for &tag in tags {
            handles.push(manager.push(Probe::new(tag, log), false, false));
            frame(&mut manager, rig);
        }
        take_calls(log);
        *rig = TestRig::new();
        (manager, handles)
    }

    fn stack_types(manager: &ModeStackManager) -> Vec<u8> {
        (1..=manager.depth())
            .rev()
            .map(|index| manager.game_type_at(index).0)
            .collect()
    }

    //=====================================================================
    // Request Deferral
    //=====================================================================

    #[test]
    fn new_manager_is_empty() {
        let manager = ModeStackManager::new();
        assert_eq!(manager.depth(), 0);
        assert!(manager.top().is_none());
        assert_eq!(manager.game_type(), ModeType::DUMMY);
        assert_eq!(manager.phase(), TransitionPhase::Idle);
        assert_eq!(manager.config().fade_duration, FADE_IN_OUT_TIME);
    }

    #[test]
    fn push_is_applied_at_next_update() {
        let log = new_log();
        let mut rig = TestRig::new();
        let mut manager = ModeStackManager::new();

        manager.push(Probe::new(1, &log), false, false);
        assert_eq!(manager.depth(), 0);
        assert_eq!(manager.pending_push_count(), 1);
        assert_eq!(manager.phase(), TransitionPhase::ReadyToSwap { fade_in: false });

        frame(&mut manager, &mut rig);

        assert_eq!(manager.depth(), 1);
        assert_eq!(manager.pending_push_count(), 0);
        assert_eq!(manager.phase(), TransitionPhase::Idle);
        assert_eq!(calls(&log), vec![Call::Reset(1), Call::Update(1)]);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn handles_are_unique() {
        let log = new_log();
        let mut rig = TestRig::new();
        let mut manager = ModeStackManager::new();
        let a = manager.push(Probe::new(1, &log), false, false);
        let b = manager.push(Probe::new(2, &log), false, false);
        assert_ne!(a, b);

        manager.teardown(&mut rig.audio);
    }

    //=====================================================================
    // Scenarios
    //=====================================================================

    #[test]
    fn push_over_main_menu() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1], &log, &mut rig);

        manager.push(Probe::new(2, &log), false, false);
        frame(&mut manager, &mut rig);

        assert_eq!(stack_types(&manager), vec![1, 2]);
        assert_eq!(calls(&log), vec![Call::Reset(2), Call::Update(2)]);
        assert_eq!(rig.video.fade_ins, vec![Duration::ZERO]);
        assert_eq!(rig.timing.context_changes, 1);
        assert_eq!(rig.timing.accumulator_resets, 1);

        frame(&mut manager, &mut rig);
        assert!(!calls(&log).contains(&Call::Update(1)), "Lower modes are never updated");

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn popping_last_mode_requests_exit() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, handles) = stacked(&[1], &log, &mut rig);

        manager.pop(false, false);
        frame(&mut manager, &mut rig);

        assert!(manager.is_empty());
        assert_eq!(rig.host.exit_requests, 1);
        assert_eq!(rig.audio.released, handles);
        assert!(calls(&log).is_empty(), "No reset or update without a mode");
        assert!(rig.video.fade_ins.is_empty());
        assert_eq!(rig.timing.context_changes, 0);

        frame(&mut manager, &mut rig);
        assert_eq!(rig.host.exit_requests, 1, "Exit is requested once");
    }

    #[test]
    fn pops_then_push_in_one_frame() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, handles) = stacked(&[1, 2, 3], &log, &mut rig);

        manager.pop(false, false);
        manager.pop(false, false);
        manager.push(Probe::new(4, &log), false, false);
        frame(&mut manager, &mut rig);

        assert_eq!(stack_types(&manager), vec![1, 4]);
        assert_eq!(rig.audio.released, vec![handles[2], handles[1]]);
        assert_eq!(calls(&log), vec![Call::Reset(4), Call::Update(4)]);
        assert_eq!(rig.timing.context_changes, 1, "One resolution for the whole batch");

        manager.teardown(&mut rig.audio);
    }

    //=====================================================================
    // Ordering and Over-pop
    //=====================================================================

    #[test]
    fn batch_of_pushes_lands_in_reverse_order() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1], &log, &mut rig);

        manager.push(Probe::new(2, &log), false, false);
        manager.push(Probe::new(3, &log), false, false);
        frame(&mut manager, &mut rig);

        assert_eq!(stack_types(&manager), vec![1, 3, 2]);
        assert_eq!(manager.game_type(), ModeType(2));
        assert_eq!(calls(&log), vec![Call::Reset(2), Call::Update(2)]);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn over_pop_stops_at_empty_stack() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1], &log, &mut rig);

        manager.pop(false, false);
        manager.pop(false, false);
        manager.pop(false, false);
        manager.push(Probe::new(2, &log), false, false);
        frame(&mut manager, &mut rig);

        assert_eq!(stack_types(&manager), vec![2]);
        assert_eq!(manager.pending_pop_count(), 0);
        assert_eq!(rig.host.exit_requests, 0);
        assert_eq!(rig.audio.released.len(), 1);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn pop_all_overrides_pending_count() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1, 2], &log, &mut rig);

        manager.pop(false, false);
        manager.pop(false, false);
        manager.pop(false, false);
        manager.pop_all();

        assert_eq!(manager.pending_pop_count(), 2);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn pop_all_waits_for_a_push_or_pop() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1, 2, 3], &log, &mut rig);

        manager.pop_all();
        assert_eq!(manager.phase(), TransitionPhase::Idle);
        frame(&mut manager, &mut rig);
        assert_eq!(manager.depth(), 3);

        manager.push(Probe::new(9, &log), false, false);
        frame(&mut manager, &mut rig);

        assert_eq!(stack_types(&manager), vec![9]);
        assert_eq!(rig.audio.released.len(), 3);

        manager.teardown(&mut rig.audio);
    }

    //=====================================================================
    // Fade Gating
    //=====================================================================

    #[test]
    fn fade_out_gates_resolution() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1], &log, &mut rig);

        manager.push(Probe::new(2, &log), true, true);
        frame(&mut manager, &mut rig);

        assert_eq!(rig.video.fade_outs, vec![(Color::BLACK, FADE_IN_OUT_TIME)]);
        assert_eq!(manager.phase(), TransitionPhase::FadingOut { fade_in: true, started: true });
        assert_eq!(manager.depth(), 1);

        frame(&mut manager, &mut rig);
        frame(&mut manager, &mut rig);
        assert_eq!(manager.depth(), 1, "Still fading");
        assert_eq!(rig.video.fade_outs.len(), 1, "Fade-out started once");
        assert_eq!(take_calls(&log), vec![Call::Update(1); 3]);

        rig.video.finish_fade();
        frame(&mut manager, &mut rig);

        assert_eq!(stack_types(&manager), vec![1, 2]);
        assert_eq!(rig.video.fade_ins, vec![FADE_IN_OUT_TIME]);
        assert_eq!(calls(&log), vec![Call::Reset(2), Call::Update(2)]);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn non_transitional_fade_does_not_release_gate() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1], &log, &mut rig);

        manager.pop(true, false);
        frame(&mut manager, &mut rig);

        rig.video.begin_fade(Color::WHITE, Duration::ZERO);
        frame(&mut manager, &mut rig);

        assert_eq!(manager.depth(), 1);
        assert!(matches!(manager.phase(), TransitionPhase::FadingOut { .. }));

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn last_request_decides_fades() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1], &log, &mut rig);

        manager.push(Probe::new(2, &log), true, true);
        manager.pop(false, false);
        assert_eq!(manager.phase(), TransitionPhase::ReadyToSwap { fade_in: false });

        frame(&mut manager, &mut rig);

        assert!(rig.video.fade_outs.is_empty());
        assert_eq!(rig.video.fade_ins, vec![Duration::ZERO]);
        assert_eq!(stack_types(&manager), vec![2]);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn custom_fade_settings_are_used() {
        let log = new_log();
        let mut rig = TestRig::new();
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
        let mut manager = ModeStackManager::with_config(
            ModeStackConfig::new()
                .with_fade_duration(Duration::from_millis(300))
                .with_fade_color(red),
        );

        manager.push(Probe::new(1, &log), true, true);
        frame(&mut manager, &mut rig);
        rig.video.finish_fade();
        frame(&mut manager, &mut rig);

        assert_eq!(rig.video.fade_outs, vec![(red, Duration::from_millis(300))]);
        assert_eq!(rig.video.fade_ins, vec![Duration::from_millis(300)]);
        assert_eq!(manager.depth(), 1);

        manager.teardown(&mut rig.audio);
    }

    //=====================================================================
    // Mode Lifecycle
    //=====================================================================

    #[test]
    fn systems_update_before_mode() {
        let log = new_log();
        let mut rig = TestRig::new();
        let mut manager = ModeStackManager::new();

        manager.push(Probe::new(1, &log).scripted(), false, false);
        frame(&mut manager, &mut rig);

        assert_eq!(calls(&log), vec![Call::Reset(1), Call::Script(1), Call::Update(1)]);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn exposed_mode_is_reset_again() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1, 2], &log, &mut rig);

        manager.pop(false, false);
        frame(&mut manager, &mut rig);

        assert_eq!(calls(&log), vec![Call::Reset(1), Call::Update(1)]);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn mode_requests_resolve_next_frame() {
        let log = new_log();
        let mut rig = TestRig::new();
        let mut manager = ModeStackManager::new();

        manager.push(Probe::new(1, &log).on_update(Request::Push(2)), false, false);
        frame(&mut manager, &mut rig);

        assert_eq!(manager.depth(), 1);
        assert_eq!(manager.pending_push_count(), 1);

        frame(&mut manager, &mut rig);

        assert_eq!(stack_types(&manager), vec![1, 2]);
        assert_eq!(
            calls(&log),
            vec![Call::Reset(1), Call::Update(1), Call::Reset(2), Call::Update(2)]
        );

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn mode_can_pop_itself() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1], &log, &mut rig);

        manager.push(Probe::new(2, &log).on_update(Request::Pop), false, false);
        frame(&mut manager, &mut rig);
        frame(&mut manager, &mut rig);

        assert_eq!(stack_types(&manager), vec![1]);
        assert_eq!(calls(&log), vec![Call::Reset(2), Call::Update(2), Call::Reset(1), Call::Update(1)]);

        manager.teardown(&mut rig.audio);
    }

    //=====================================================================
    // Drawing
    //=====================================================================

    #[test]
    fn only_top_mode_is_drawn() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1, 2], &log, &mut rig);

        manager.draw(&mut rig.video);
        manager.draw_effects(&mut rig.video);
        manager.draw_post_effects(&mut rig.video);

        assert_eq!(calls(&log), vec![Call::Draw(2), Call::DrawPost(2)]);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn draw_effects_renders_mode_systems() {
        let log = new_log();
        let mut rig = TestRig::new();
        let mut manager = ModeStackManager::new();
        manager.push(Probe::new(1, &log).scripted(), false, false);
        frame(&mut manager, &mut rig);

        manager.draw_effects(&mut rig.video);

        assert_eq!(rig.video.rects.len(), 1);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn drawing_empty_stack_is_noop() {
        let mut rig = TestRig::new();
        let mut manager = ModeStackManager::new();
        manager.draw(&mut rig.video);
        manager.draw_effects(&mut rig.video);
        manager.draw_post_effects(&mut rig.video);
        assert!(rig.video.rects.is_empty());
    }

    //=====================================================================
    // Queries
    //=====================================================================

    #[test]
    fn indexed_access_counts_from_top() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, handles) = stacked(&[1, 2, 3], &log, &mut rig);

        assert_eq!(manager.game_type_at(1), ModeType(3));
        assert_eq!(manager.game_type_at(3), ModeType(1));
        assert_eq!(manager.game_type_at(0), ModeType(3), "Index 0 means the top");
        assert_eq!(manager.game_type_at(4), ModeType::DUMMY);
        assert!(manager.get(4).is_none());
        assert_eq!(manager.get(2).map(|mode| mode.mode_type()), Some(ModeType(2)));
        assert_eq!(manager.top_handle(), Some(handles[2]));

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn top_mut_reaches_the_active_mode() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[5], &log, &mut rig);

        let top = manager.top_mut().expect("stack has a mode");
        top.draw(&mut rig.video);

        assert_eq!(calls(&log), vec![Call::Draw(5)]);

        manager.teardown(&mut rig.audio);
    }

    #[test]
    fn dump_lists_top_first() {
        let log = new_log();
        let mut rig = TestRig::new();
        assert_eq!(ModeStackManager::new().dump_stack(), "***Game stack is empty!");

        let (mut manager, _) = stacked(&[ModeType::BOOT.0, ModeType::MENU.0], &log, &mut rig);

        assert_eq!(
            manager.dump_stack(),
            "***top of stack***\n index: 1 type: MENU\n index: 0 type: BOOT\n***bottom of stack***"
        );
        manager.teardown(&mut rig.audio);
    }

    //=====================================================================
    // Teardown
    //=====================================================================

    #[test]
    fn teardown_releases_every_mode_once() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, mut handles) = stacked(&[1, 2], &log, &mut rig);
        handles.push(manager.push(Probe::new(3, &log), false, false));
        manager.pop(false, false);

        manager.teardown(&mut rig.audio);
        manager.teardown(&mut rig.audio);

        let mut released = rig.audio.released.clone();
        released.sort();
        assert_eq!(released, handles);
        assert!(manager.is_empty());
        assert_eq!(manager.pending_push_count(), 0);
        assert_eq!(manager.pending_pop_count(), 0);
        assert_eq!(manager.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn initialize_resets_to_a_clean_stack() {
        let log = new_log();
        let mut rig = TestRig::new();
        let (mut manager, _) = stacked(&[1], &log, &mut rig);
        manager.pop(true, true);

        manager.initialize(&mut rig.audio);
        frame(&mut manager, &mut rig);

        assert!(manager.is_empty());
        assert_eq!(rig.host.exit_requests, 0, "Nothing pending after initialize");
        assert!(rig.video.fade_outs.is_empty());
    }
}
