/// Countdown phase for the current step's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// The step has no configured timer.
    Idle,
    /// Configured but not started; `remaining == initial`.
    Ready,
    /// Counting down, one tick per second.
    Running,
    /// Frozen mid-countdown with `remaining > 0`.
    Paused,
    /// Reached zero.
    Expired,
}

/// Per-step countdown state machine. Owns the remaining time and the
/// run/pause/expire transitions; scheduling of ticks lives with the caller.
///
/// `start`/`pause` on a timerless step are no-ops, not errors, and
/// `remaining` never goes below zero even if ticks arrive late or coalesced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEngine {
    initial: Option<u32>,
    remaining: Option<u32>,
    phase: TimerPhase,
}

impl TimerEngine {
    /// Engine for a step's configured duration, discarding any prior state.
    /// Ready when the step carries time to count, Idle without a timer.
    /// `remaining` is present exactly when the step has a timer, so a
    /// zero-second timer starts out Expired rather than Idle.
    pub fn for_step(timer_seconds: Option<u32>) -> Self {
        match timer_seconds {
            Some(secs) => Self {
                initial: Some(secs),
                remaining: Some(secs),
                phase: if secs == 0 {
                    TimerPhase::Expired
                } else {
                    TimerPhase::Ready
                },
            },
            None => Self {
                initial: None,
                remaining: None,
                phase: TimerPhase::Idle,
            },
        }
    }

    /// Ready|Paused -> Running. Returns true when the countdown (re)started,
    /// so the caller knows to schedule ticks.
    pub fn start(&mut self) -> bool {
        match self.phase {
            TimerPhase::Ready | TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                true
            }
            _ => false,
        }
    }

    /// Running -> Paused. Returns true when the countdown was frozen, so the
    /// caller knows to cancel tick scheduling.
    pub fn pause(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
            true
        } else {
            false
        }
    }

    /// Back to Ready with `remaining = initial`, from any state. No-op on a
    /// timerless step.
    pub fn reset(&mut self) {
        if let Some(initial) = self.initial {
            self.remaining = Some(initial);
            self.phase = TimerPhase::Ready;
        }
    }

    /// One-second decrement. Only meaningful while Running; transitions to
    /// Expired on reaching zero. Returns true while still Running, so the
    /// caller knows whether to keep ticks scheduled.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        let next = self.remaining.unwrap_or(0).saturating_sub(1);
        self.remaining = Some(next);
        if next == 0 {
            self.phase = TimerPhase::Expired;
            false
        } else {
            true
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    pub fn initial(&self) -> Option<u32> {
        self.initial
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }
}
