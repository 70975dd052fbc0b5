use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::game::{GameState, TickOutcome};
use crate::input::GameInput;

/// Fixed-period tick deadline that can be stopped and restarted.
///
/// Callers pass the current time in, so the schedule is driven entirely by
/// the event loop and never sleeps on its own.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    /// Creates a disarmed scheduler.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedules the next tick one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true when a tick is due, and re-arms for one period after `now`.
    ///
    /// A late poll fires once; missed periods are not replayed.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.arm(now);
                true
            }
            _ => false,
        }
    }

    /// Time left before the next tick, or `None` while disarmed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Owns the game state and its tick schedule for one run of the program.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    scheduler: TickScheduler,
    games_played: u32,
}

impl Session {
    /// Starts ticking `state` one period after `now`.
    #[must_use]
    pub fn new(state: GameState, now: Instant) -> Self {
        let mut scheduler = TickScheduler::new(state.config().tick_interval());
        if state.is_active() {
            scheduler.arm(now);
        }

        info!(
            "game started: {}x{} grid, cell {}, tick {:?}",
            state.config().width,
            state.config().height,
            state.config().cell_size,
            scheduler.period()
        );

        Self {
            state,
            scheduler,
            games_played: 1,
        }
    }

    /// Applies one input event. Returns `Break` when the player asked to quit.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> ControlFlow<()> {
        match input {
            GameInput::Direction(direction) => {
                if !self.state.change_direction(direction) {
                    trace!(
                        "ignored turn {direction:?} while heading {:?}",
                        self.state.direction()
                    );
                }
            }
            GameInput::Restart => self.restart(now),
            GameInput::Quit => {
                info!(
                    "quit after {} game(s), final score {}",
                    self.games_played,
                    self.state.score()
                );
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }

    /// Advances the game when a tick is due. Stops the schedule on game over.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.scheduler.poll_due(now) {
            return None;
        }

        let outcome = self.state.advance_tick();
        match outcome {
            TickOutcome::Ate => debug!(
                "food eaten at {:?}, score {}",
                self.state.head(),
                self.state.score()
            ),
            TickOutcome::Collided(reason) => {
                info!(
                    "game over ({reason:?}) after {} ticks, score {}",
                    self.state.tick_count(),
                    self.state.score()
                );
            }
            TickOutcome::Moved | TickOutcome::Idle => {}
        }

        if !self.state.is_active() {
            self.scheduler.disarm();
        }

        Some(outcome)
    }

    fn restart(&mut self, now: Instant) {
        self.state.reset();
        self.scheduler.arm(now);
        self.games_played += 1;
        info!("game restarted (game #{})", self.games_played);
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// How long the event loop may block on input before the next tick,
    /// capped at `max`.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant, max: Duration) -> Duration {
        self.scheduler
            .time_until_due(now)
            .map_or(max, |remaining| remaining.min(max))
    }
}
