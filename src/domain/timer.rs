use serde::Serialize;

pub const FOCUS_MINUTES: u32 = 25;
pub const BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase { Focus, Break }

impl Phase {
    pub fn minutes(self) -> u32 {
        match self {
            Phase::Focus => FOCUS_MINUTES,
            Phase::Break => BREAK_MINUTES,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    Counted,
    /// The countdown hit zero. The timer now holds the next phase's full
    /// duration and is stopped.
    PhaseCompleted(Phase),
}

/// Two-phase Pomodoro countdown. Pure state; the periodic tick source
/// lives in [`crate::application::timer_service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownTimer {
    minutes: u32,
    seconds: u32,
    running: bool,
    phase: Phase,
}

impl Default for CountdownTimer {
    fn default() -> Self { Self::new() }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self { minutes: FOCUS_MINUTES, seconds: 0, running: false, phase: Phase::Focus }
    }

    /// Rebuilds a timer at an arbitrary point. Seconds above 59 are clamped.
    pub fn from_parts(minutes: u32, seconds: u32, phase: Phase, running: bool) -> Self {
        Self { minutes, seconds: seconds.min(59), running, phase }
    }

    pub fn minutes(&self) -> u32 { self.minutes }
    pub fn seconds(&self) -> u32 { self.seconds }
    pub fn is_running(&self) -> bool { self.running }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn is_break(&self) -> bool { self.phase == Phase::Break }

    /// Returns false if the timer was already running.
    pub fn start(&mut self) -> bool {
        let was_idle = !self.running;
        self.running = true;
        was_idle
    }

    /// Returns false if the timer was not running.
    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    pub fn reset(&mut self) { *self = Self::new(); }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            self.phase = self.phase.next();
            self.minutes = self.phase.minutes();
            self.seconds = 0;
            self.running = false;
            return TickOutcome::PhaseCompleted(self.phase);
        }
        TickOutcome::Counted
    }
}
