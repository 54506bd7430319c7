//! Game phase state machine and progress bookkeeping.

use std::time::Duration;

use maze_runner_core::{Event, GamePhase, GameStatus};
use tracing::info;

/// Sole owner of the game phase.
///
/// `Idle → Running ⇄ Paused`, `Running → Victory | Defeat`, and any phase back
/// to `Running` through a start or restart.
#[derive(Debug)]
pub(crate) struct GameStateMachine {
    phase: GamePhase,
    collected_keys: u32,
    total_keys: u32,
    elapsed: Duration,
}

impl GameStateMachine {
    pub(crate) fn new(total_keys: u32) -> Self {
        Self {
            phase: GamePhase::Idle,
            collected_keys: 0,
            total_keys,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn status(&self) -> GameStatus {
        GameStatus {
            phase: self.phase,
            collected_keys: self.collected_keys,
            total_keys: self.total_keys,
            elapsed: self.elapsed,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Begins a fresh run from any phase.
    pub(crate) fn start(&mut self, out_events: &mut Vec<Event>) {
        self.reset_progress();
        self.transition(GamePhase::Running, out_events);
    }

    pub(crate) fn pause(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::Running {
            self.transition(GamePhase::Paused, out_events);
        }
    }

    pub(crate) fn resume(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::Paused {
            self.transition(GamePhase::Running, out_events);
        }
    }

    /// Accumulates running time; ignored outside `Running`.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        true
    }

    /// Counts a newly collected key; ignored outside `Running`.
    pub(crate) fn record_key(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.collected_keys = self.collected_keys.saturating_add(1).min(self.total_keys);
        true
    }

    pub(crate) fn signal_victory(&mut self, out_events: &mut Vec<Event>) {
        if self.is_running() {
            self.transition(GamePhase::Victory, out_events);
        }
    }

    pub(crate) fn signal_defeat(&mut self, out_events: &mut Vec<Event>) {
        if self.is_running() {
            self.transition(GamePhase::Defeat, out_events);
        }
    }

    fn reset_progress(&mut self) {
        self.collected_keys = 0;
        self.elapsed = Duration::ZERO;
    }

    fn transition(&mut self, to: GamePhase, out_events: &mut Vec<Event>) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        info!(?from, ?to, elapsed = ?self.elapsed, "game phase changed");
        out_events.push(Event::PhaseChanged { from, to });
    }
}
