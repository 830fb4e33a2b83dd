//! Cook-mode session core.
//!
//! A session is a sequential walkthrough of one recipe's steps with an
//! attached per-step countdown timer. The controller here is the sole mutator
//! of session state: the input router feeds it commands, every command
//! recomputes the derived view, and rendering only ever reads that view.
//! State is transient, scoped to one cook-mode activation.

mod input;
mod sequencer;
mod timer;
mod ticker;

pub use input::CookCommand;
pub use ticker::{TickScheduler, TokioTicker};
pub use timer::TimerPhase;

use crate::model::Step;
use input::InputRouter;
use sequencer::StepSequencer;
use timer::TimerEngine;
use std::fmt;

/// Recoverable session failures callers are expected to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A session cannot be built from a recipe with no steps.
    EmptySession,
    /// `jump_to` target outside `0..len`; the session is left unchanged.
    OutOfRangeIndex { index: usize, len: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptySession => write!(f, "recipe has no steps to cook"),
            SessionError::OutOfRangeIndex { index, len } => {
                write!(f, "step index {index} out of range (0..{len})")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Read-only timer snapshot for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    pub phase: TimerPhase,
    pub remaining: Option<u32>,
    pub initial: Option<u32>,
}

/// Read-only view model, recomputed after every command.
#[derive(Debug, Clone)]
pub struct CookView {
    pub current_index: usize,
    pub total_steps: usize,
    pub step: Step,
    pub timer: TimerView,
    pub is_first: bool,
    pub is_last: bool,
}

/// Composes the sequencer, timer, and input router; owns the injected tick
/// capability. All mutation goes through here, synchronously, on the thread
/// that owns the session.
///
/// Tick ordering: every transition into Running schedules ticks under a fresh
/// epoch, and every step change or teardown cancels the outstanding schedule
/// before returning. A tick that was already in flight carries its old epoch
/// and is dropped in `on_tick`, so a tick scheduled before a step change can
/// never land after it.
pub struct SessionController {
    sequencer: StepSequencer,
    timer: TimerEngine,
    router: InputRouter,
    ticker: Box<dyn TickScheduler>,
    epoch: u64,
    active: bool,
}

impl SessionController {
    pub fn new(steps: Vec<Step>, ticker: Box<dyn TickScheduler>) -> Result<Self, SessionError> {
        let sequencer = StepSequencer::new(steps)?;
        let timer = TimerEngine::for_step(sequencer.current_step().timer_seconds);
        Ok(Self {
            sequencer,
            timer,
            router: InputRouter::attach(),
            ticker,
            epoch: 0,
            active: true,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn next(&mut self) {
        self.assert_active();
        if self.sequencer.next() {
            self.on_step_changed();
        }
    }

    pub fn prev(&mut self) {
        self.assert_active();
        if self.sequencer.prev() {
            self.on_step_changed();
        }
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.assert_active();
        let from = self.sequencer.current_index();
        self.sequencer.jump_to(index)?;
        if index != from {
            self.on_step_changed();
        }
        Ok(())
    }

    pub fn start_timer(&mut self) {
        self.assert_active();
        if self.timer.start() {
            self.epoch += 1;
            self.ticker.start(self.epoch);
        }
    }

    pub fn pause_timer(&mut self) {
        self.assert_active();
        if self.timer.pause() {
            self.ticker.cancel();
        }
    }

    pub fn reset_timer(&mut self) {
        self.assert_active();
        self.ticker.cancel();
        self.timer.reset();
    }

    /// Apply a tick delivered by the scheduler. Ticks from a superseded
    /// schedule or a torn-down session are suppressed, not errors: delivery
    /// races with step changes and teardown by design.
    pub fn on_tick(&mut self, epoch: u64) {
        if !self.active || epoch != self.epoch {
            return;
        }
        if !self.timer.tick() {
            // Expired: stop scheduling further ticks.
            self.ticker.cancel();
        }
    }

    /// Route a key press through the session's input router.
    #[cfg(feature = "tui")]
    pub fn route_key(&self, key: crossterm::event::KeyEvent) -> Option<CookCommand> {
        self.router.route_key(key)
    }

    /// Dispatch a routed command. `Exit` tears the session down; the caller
    /// observes that through `is_active` and drops the session.
    pub fn apply(&mut self, cmd: CookCommand) -> Result<(), SessionError> {
        match cmd {
            CookCommand::Next => self.next(),
            CookCommand::Prev => self.prev(),
            CookCommand::JumpTo(i) => self.jump_to(i)?,
            CookCommand::StartTimer => self.start_timer(),
            CookCommand::PauseTimer => self.pause_timer(),
            CookCommand::ToggleTimer => {
                if self.timer.is_running() {
                    self.pause_timer();
                } else {
                    self.start_timer();
                }
            }
            CookCommand::ResetTimer => self.reset_timer(),
            CookCommand::Exit => self.teardown(),
        }
        Ok(())
    }

    /// Cancel tick scheduling and detach the keyboard subscription. Safe to
    /// call repeatedly; commands after teardown are programmer errors.
    pub fn teardown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.ticker.cancel();
        self.router.detach();
    }

    pub fn view(&self) -> CookView {
        CookView {
            current_index: self.sequencer.current_index(),
            total_steps: self.sequencer.len(),
            step: self.sequencer.current_step().clone(),
            timer: TimerView {
                phase: self.timer.phase(),
                remaining: self.timer.remaining(),
                initial: self.timer.initial(),
            },
            is_first: self.sequencer.is_first(),
            is_last: self.sequencer.is_last(),
        }
    }

    /// Any index change reinitializes the timer for the new step, cancelling
    /// the outstanding tick schedule first so in-flight ticks go stale.
    fn on_step_changed(&mut self) {
        self.epoch += 1;
        self.ticker.cancel();
        self.timer = TimerEngine::for_step(self.sequencer.current_step().timer_seconds);
    }

    fn assert_active(&self) {
        assert!(self.active, "cook session used after teardown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TickAction {
        Start(u64),
        Cancel,
    }

    /// Recording scheduler; tests deliver ticks by calling `on_tick` with the
    /// epoch of the schedule they are simulating.
    #[derive(Clone, Default)]
    struct ManualTicker {
        actions: Arc<Mutex<Vec<TickAction>>>,
    }

    impl ManualTicker {
        fn actions(&self) -> Vec<TickAction> {
            self.actions.lock().unwrap().clone()
        }

        fn last_started_epoch(&self) -> Option<u64> {
            self.actions()
                .iter()
                .rev()
                .find_map(|a| match a {
                    TickAction::Start(e) => Some(*e),
                    TickAction::Cancel => None,
                })
        }
    }

    impl TickScheduler for ManualTicker {
        fn start(&mut self, epoch: u64) {
            self.actions.lock().unwrap().push(TickAction::Start(epoch));
        }

        fn cancel(&mut self) {
            self.actions.lock().unwrap().push(TickAction::Cancel);
        }
    }

    fn step(id: &str, timer_seconds: Option<u32>) -> Step {
        Step {
            id: id.into(),
            title: None,
            description: format!("do {id}"),
            order: 0,
            timer_seconds,
        }
    }

    fn session(steps: Vec<Step>) -> (SessionController, ManualTicker) {
        let ticker = ManualTicker::default();
        let ctrl = SessionController::new(steps, Box::new(ticker.clone())).unwrap();
        (ctrl, ticker)
    }

    #[test]
    fn empty_step_list_fails_construction() {
        match SessionController::new(Vec::new(), Box::<ManualTicker>::default()) {
            Ok(_) => panic!("empty step list must be rejected"),
            Err(err) => assert_eq!(err, SessionError::EmptySession),
        }
    }

    #[test]
    fn jump_resets_timer_to_target_step_value() {
        let (mut ctrl, _) = session(vec![
            step("a", Some(10)),
            step("b", None),
            step("c", Some(45)),
        ]);
        ctrl.jump_to(2).unwrap();
        let view = ctrl.view();
        assert_eq!(view.current_index, 2);
        assert_eq!(view.timer.phase, TimerPhase::Ready);
        assert_eq!(view.timer.remaining, Some(45));
    }

    #[test]
    fn invalid_jump_is_rejected_and_state_unchanged() {
        let (mut ctrl, ticker) = session(vec![step("a", Some(10)), step("b", None)]);
        ctrl.start_timer();
        ctrl.on_tick(ticker.last_started_epoch().unwrap());
        let before_actions = ticker.actions().len();

        let err = ctrl.jump_to(5).unwrap_err();
        assert_eq!(err, SessionError::OutOfRangeIndex { index: 5, len: 2 });
        let view = ctrl.view();
        assert_eq!(view.current_index, 0);
        assert_eq!(view.timer.remaining, Some(9));
        assert_eq!(view.timer.phase, TimerPhase::Running);
        // No cancel was issued; the countdown schedule survived the rejection.
        assert_eq!(ticker.actions().len(), before_actions);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let (mut ctrl, _) = session(vec![step("a", None), step("b", None)]);
        ctrl.prev();
        assert_eq!(ctrl.view().current_index, 0);
        assert!(ctrl.view().is_first);
        ctrl.next();
        ctrl.next();
        let view = ctrl.view();
        assert_eq!(view.current_index, 1);
        assert!(view.is_last);
    }

    #[test]
    fn step_change_cancels_pending_ticks_and_stales_old_epoch() {
        let (mut ctrl, ticker) = session(vec![step("a", Some(30)), step("b", Some(60))]);
        ctrl.start_timer();
        let old_epoch = ticker.last_started_epoch().unwrap();
        ctrl.on_tick(old_epoch);
        assert_eq!(ctrl.view().timer.remaining, Some(29));

        ctrl.next();
        assert!(ticker.actions().contains(&TickAction::Cancel));
        let view = ctrl.view();
        assert_eq!(view.timer.phase, TimerPhase::Ready);
        assert_eq!(view.timer.remaining, Some(60));

        // A tick scheduled before the step change that fires after it must be
        // suppressed: the new step's timer is untouched.
        ctrl.on_tick(old_epoch);
        assert_eq!(ctrl.view().timer.remaining, Some(60));
        assert_eq!(ctrl.view().timer.phase, TimerPhase::Ready);
    }

    #[test]
    fn resume_uses_a_fresh_epoch() {
        let (mut ctrl, ticker) = session(vec![step("a", Some(30))]);
        ctrl.start_timer();
        let first_epoch = ticker.last_started_epoch().unwrap();
        ctrl.pause_timer();
        ctrl.start_timer();
        let second_epoch = ticker.last_started_epoch().unwrap();
        assert_ne!(first_epoch, second_epoch);

        // A leftover tick from before the pause does not decrement.
        ctrl.on_tick(first_epoch);
        assert_eq!(ctrl.view().timer.remaining, Some(30));
        ctrl.on_tick(second_epoch);
        assert_eq!(ctrl.view().timer.remaining, Some(29));
    }

    #[test]
    fn ninety_ticks_drive_running_to_expired() {
        let (mut ctrl, ticker) = session(vec![step("a", Some(90))]);
        ctrl.start_timer();
        let epoch = ticker.last_started_epoch().unwrap();
        for _ in 0..90 {
            ctrl.on_tick(epoch);
        }
        let view = ctrl.view();
        assert_eq!(view.timer.phase, TimerPhase::Expired);
        assert_eq!(view.timer.remaining, Some(0));
        // Expiry stops the schedule.
        assert_eq!(ticker.actions().last(), Some(&TickAction::Cancel));

        // Extra deliveries clamp at zero.
        ctrl.on_tick(epoch);
        assert_eq!(ctrl.view().timer.remaining, Some(0));
    }

    #[test]
    fn reset_restores_configured_value_and_stops_ticks() {
        let (mut ctrl, ticker) = session(vec![step("a", Some(20))]);
        ctrl.start_timer();
        let epoch = ticker.last_started_epoch().unwrap();
        ctrl.on_tick(epoch);
        ctrl.on_tick(epoch);
        ctrl.reset_timer();
        let view = ctrl.view();
        assert_eq!(view.timer.phase, TimerPhase::Ready);
        assert_eq!(view.timer.remaining, Some(20));
        assert_eq!(ticker.actions().last(), Some(&TickAction::Cancel));
    }

    #[test]
    fn timer_commands_on_timerless_step_are_noops() {
        let (mut ctrl, ticker) = session(vec![step("a", None)]);
        ctrl.start_timer();
        ctrl.pause_timer();
        ctrl.reset_timer();
        let view = ctrl.view();
        assert_eq!(view.timer.phase, TimerPhase::Idle);
        assert_eq!(view.timer.remaining, None);
        // No schedule was ever started.
        assert!(ticker.last_started_epoch().is_none());
    }

    #[test]
    fn idle_step_then_timed_step_countdown() {
        let (mut ctrl, ticker) = session(vec![step("1", None), step("2", Some(30))]);
        let view = ctrl.view();
        assert_eq!(view.current_index, 0);
        assert_eq!(view.timer.phase, TimerPhase::Idle);

        ctrl.next();
        let view = ctrl.view();
        assert_eq!(view.current_index, 1);
        assert_eq!(view.timer.phase, TimerPhase::Ready);
        assert_eq!(view.timer.remaining, Some(30));

        ctrl.start_timer();
        assert_eq!(ctrl.view().timer.phase, TimerPhase::Running);
        let epoch = ticker.last_started_epoch().unwrap();
        for _ in 0..30 {
            ctrl.on_tick(epoch);
        }
        let view = ctrl.view();
        assert_eq!(view.timer.phase, TimerPhase::Expired);
        assert_eq!(view.timer.remaining, Some(0));

        ctrl.prev();
        let view = ctrl.view();
        assert_eq!(view.current_index, 0);
        assert_eq!(view.timer.phase, TimerPhase::Idle);
    }

    #[test]
    fn teardown_cancels_and_is_idempotent() {
        let (mut ctrl, ticker) = session(vec![step("a", Some(10))]);
        ctrl.start_timer();
        let epoch = ticker.last_started_epoch().unwrap();
        ctrl.teardown();
        assert!(!ctrl.is_active());
        assert_eq!(ticker.actions().last(), Some(&TickAction::Cancel));

        // Repeat teardown is safe; late ticks are ignored.
        ctrl.teardown();
        ctrl.on_tick(epoch);
        assert!(!ctrl.is_active());
    }

    #[test]
    #[should_panic(expected = "after teardown")]
    fn command_after_teardown_panics() {
        let (mut ctrl, _) = session(vec![step("a", None)]);
        ctrl.teardown();
        ctrl.next();
    }

    #[test]
    fn exit_command_tears_down() {
        let (mut ctrl, _) = session(vec![step("a", None)]);
        ctrl.apply(CookCommand::Exit).unwrap();
        assert!(!ctrl.is_active());
    }

    #[test]
    fn toggle_command_starts_then_pauses() {
        let (mut ctrl, ticker) = session(vec![step("a", Some(15))]);
        ctrl.apply(CookCommand::ToggleTimer).unwrap();
        assert_eq!(ctrl.view().timer.phase, TimerPhase::Running);
        ctrl.on_tick(ticker.last_started_epoch().unwrap());
        ctrl.apply(CookCommand::ToggleTimer).unwrap();
        let view = ctrl.view();
        assert_eq!(view.timer.phase, TimerPhase::Paused);
        assert_eq!(view.timer.remaining, Some(14));
    }
}
