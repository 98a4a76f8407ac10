//! Session runner
//!
//! Drives the simulation at a fixed rate and talks to the outside world
//! through three seams:
//! - input arrives as [`HostEvent`]s over a channel, drained at the start of
//!   each cycle so commands never interleave with a tick
//! - a [`Renderer`] sees an immutable view of the state after every tick
//! - a [`TerminationSink`] is told how the session ended

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use rand::Rng;

use crate::error::SessionError;
use crate::settings::Config;
use crate::sim::{Command, FrameClock, GameState, Outcome, apply_command, tick};

/// Event from the host (input thread, window/terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Command(Command),
    /// The display area changed size (columns, rows)
    Resize(u16, u16),
    /// The host is closing; ends the session abnormally
    Quit,
}

impl From<Command> for HostEvent {
    fn from(command: Command) -> Self {
        HostEvent::Command(command)
    }
}

/// Presents a frame. Must not (and cannot) change the simulation.
pub trait Renderer {
    fn render(&mut self, state: &GameState) -> Result<(), SessionError>;

    fn resize(&mut self, _cols: u16, _rows: u16) {}
}

/// Receives the final outcome of a session
pub trait TerminationSink {
    fn finish(&mut self, outcome: Outcome, final_score: u32);
}

/// A single game session
pub struct Session<R: Rng> {
    state: GameState,
    clock: FrameClock,
    rng: R,
    input: Receiver<HostEvent>,
    input_open: bool,
    started: Instant,
    max_ticks: Option<u64>,
}

impl<R: Rng> Session<R> {
    /// Start a fresh session with a randomly populated field
    pub fn new(config: &Config, mut rng: R, input: Receiver<HostEvent>) -> Self {
        let state = GameState::new(config, &mut rng);
        Self::from_state(config, state, rng, input)
    }

    /// Run an existing state under the given config's timing
    pub fn from_state(config: &Config, state: GameState, rng: R, input: Receiver<HostEvent>) -> Self {
        Self {
            state,
            clock: FrameClock::new(config.tick_interval()),
            rng,
            input,
            input_open: true,
            started: Instant::now(),
            max_ticks: config.max_ticks,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply every pending host event. Returns false if the host asked to quit.
    fn drain_input(&mut self, renderer: &mut impl Renderer) -> bool {
        while self.input_open {
            match self.input.try_recv() {
                Ok(HostEvent::Command(command)) => apply_command(&mut self.state, command),
                Ok(HostEvent::Resize(cols, rows)) => renderer.resize(cols, rows),
                Ok(HostEvent::Quit) => return false,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Input source disconnected; player controls are gone");
                    self.input_open = false;
                }
            }
        }
        true
    }

    /// One update+render cycle at `now`. Returns the outcome once the
    /// session has ended.
    pub fn cycle(
        &mut self,
        now: Instant,
        renderer: &mut impl Renderer,
    ) -> Result<Option<Outcome>, SessionError> {
        if !self.drain_input(renderer) {
            log::info!("Host requested quit");
            return Ok(Some(Outcome::Aborted));
        }

        let elapsed = now.saturating_duration_since(self.started);
        for event in tick(&mut self.state, elapsed, &mut self.rng) {
            log::trace!("tick {}: {:?}", self.state.time_ticks, event);
        }

        if let Some(outcome) = self.state.outcome() {
            return Ok(Some(outcome));
        }
        if self
            .max_ticks
            .is_some_and(|limit| self.state.time_ticks >= limit)
        {
            log::info!("Tick limit reached after {} ticks", self.state.time_ticks);
            return Ok(Some(Outcome::Aborted));
        }

        renderer.render(&self.state)?;
        Ok(None)
    }

    /// Run until the session ends, then notify the sink
    pub fn run(
        mut self,
        renderer: &mut impl Renderer,
        sink: &mut impl TerminationSink,
    ) -> Outcome {
        log::info!(
            "Session started: {} pickups, {} enemies",
            self.state.registry.pickups_remaining(),
            self.state.registry.enemies.len()
        );

        let outcome = loop {
            let now = Instant::now();
            if !self.clock.poll(now) {
                // Early wakeups just re-check on the next pass
                std::thread::sleep(self.clock.time_until_next(now));
                continue;
            }

            // A panicking cycle still ends the session through the sink
            match panic::catch_unwind(AssertUnwindSafe(|| self.cycle(now, renderer))) {
                Ok(Ok(Some(outcome))) => break outcome,
                Ok(Ok(None)) => {}
                Ok(Err(err)) => {
                    log::error!("Session aborted: {err}");
                    break Outcome::Aborted;
                }
                Err(_) => {
                    log::error!("Session aborted: cycle panicked at tick {}", self.state.time_ticks);
                    break Outcome::Aborted;
                }
            }
        };

        log::info!(
            "Session ended: {:?} with score {} after {} ticks",
            outcome,
            self.state.score,
            self.state.time_ticks
        );
        if log::log_enabled!(log::Level::Debug) {
            match serde_json::to_string(&self.state) {
                Ok(json) => log::debug!("Final state: {json}"),
                Err(err) => log::debug!("Final state not serializable: {err}"),
            }
        }

        sink.finish(outcome, self.state.score);
        outcome
    }
}
