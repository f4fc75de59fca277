//! Drives a [`CountdownTimer`] from a one-second tokio interval.
//!
//! At most one tick source is live per driver. Each source carries the
//! generation it was spawned for; `pause`, `reset` and every new `start`
//! bump the generation under the same lock that guards the timer, so a
//! source that was cancelled while already woken finds a stale generation
//! and exits without touching the state.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::domain::timer::{CountdownTimer, TickOutcome};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

struct Shared {
    timer: CountdownTimer,
    generation: u64,
}

pub struct TimerDriver {
    shared: Arc<Mutex<Shared>>,
    ticker: Option<JoinHandle<()>>,
    updates: watch::Sender<CountdownTimer>,
}

impl Default for TimerDriver {
    fn default() -> Self { Self::new() }
}

impl TimerDriver {
    pub fn new() -> Self { Self::with_timer(CountdownTimer::new()) }

    /// Wraps an existing timer. A timer that claims to be running is
    /// stopped; call [`TimerDriver::start`] to attach a tick source.
    pub fn with_timer(mut timer: CountdownTimer) -> Self {
        timer.pause();
        let (updates, _) = watch::channel(timer);
        Self {
            shared: Arc::new(Mutex::new(Shared { timer, generation: 0 })),
            ticker: None,
            updates,
        }
    }

    pub fn snapshot(&self) -> CountdownTimer { lock(&self.shared).timer }

    /// Receives a fresh snapshot after every start, pause, reset and tick.
    pub fn subscribe(&self) -> watch::Receiver<CountdownTimer> { self.updates.subscribe() }

    /// Starts counting down. Does nothing if already running. Must be
    /// called from within a tokio runtime.
    pub fn start(&mut self) {
        let (generation, snapshot) = {
            let mut shared = lock(&self.shared);
            if !shared.timer.start() {
                return;
            }
            shared.generation += 1;
            (shared.generation, shared.timer)
        };
        // A source that finished on its own at a phase boundary may still
        // hold a handle.
        if let Some(old) = self.ticker.take() {
            old.abort();
        }
        self.ticker = Some(tokio::spawn(run_ticks(Arc::clone(&self.shared), self.updates.clone(), generation)));
        debug!(generation, "timer started");
        self.updates.send_replace(snapshot);
    }

    pub fn pause(&mut self) {
        let snapshot = {
            let mut shared = lock(&self.shared);
            if !shared.timer.pause() {
                return;
            }
            shared.generation += 1;
            shared.timer
        };
        self.cancel_ticker();
        debug!("timer paused");
        self.updates.send_replace(snapshot);
    }

    pub fn toggle(&mut self) {
        if self.snapshot().is_running() { self.pause() } else { self.start() }
    }

    pub fn reset(&mut self) {
        let snapshot = {
            let mut shared = lock(&self.shared);
            shared.timer.reset();
            shared.generation += 1;
            shared.timer
        };
        self.cancel_ticker();
        debug!("timer reset");
        self.updates.send_replace(snapshot);
    }

    /// Whether a tick source task is still alive.
    pub fn has_live_ticker(&self) -> bool { self.ticker.as_ref().is_some_and(|t| !t.is_finished()) }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) { self.cancel_ticker(); }
}

async fn run_ticks(shared: Arc<Mutex<Shared>>, updates: watch::Sender<CountdownTimer>, generation: u64) {
    let mut interval = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let snapshot = {
            let mut shared = lock(&shared);
            if shared.generation != generation {
                return;
            }
            if let TickOutcome::PhaseCompleted(next) = shared.timer.tick() {
                info!(next = ?next, "timer phase completed");
            }
            shared.timer
        };
        updates.send_replace(snapshot);
        if !snapshot.is_running() {
            return;
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> { shared.lock().unwrap_or_else(PoisonError::into_inner) }
