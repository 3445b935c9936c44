//! Autoplay timer.
//!
//! A deadline-driven state machine: the owner polls it with the current time
//! and it answers whether an advance is due. Nothing runs in the background,
//! so after [`AutoplayTimer::teardown`] no tick can ever be reported.

use crate::error::{AppError, Result};
use log::debug;
use std::time::{Duration, Instant};

/// Validated dwell and cooldown durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoplayTiming {
    dwell: Duration,
    cooldown: Duration,
}

impl AutoplayTiming {
    /// The cooldown must exceed the dwell so a resume is not immediately
    /// followed by another pause cycle.
    pub fn new(dwell: Duration, cooldown: Duration) -> Result<Self> {
        if dwell.is_zero() {
            return Err(AppError::Config("dwell interval must be positive".to_string()));
        }
        if cooldown <= dwell {
            return Err(AppError::Config(format!(
                "cooldown ({} ms) must exceed dwell ({} ms)",
                cooldown.as_millis(),
                dwell.as_millis()
            )));
        }
        Ok(Self { dwell, cooldown })
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

/// Observable state of the timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayState {
    Running,
    Paused,
    Stopped,
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Running { next_tick: Instant },
    Paused { resume_at: Instant },
    Stopped,
}

pub struct AutoplayTimer {
    timing: AutoplayTiming,
    phase: Phase,
}

impl AutoplayTimer {
    /// Start running; the first tick is one dwell from `now`.
    pub fn start(timing: AutoplayTiming, now: Instant) -> Self {
        Self {
            timing,
            phase: Phase::Running {
                next_tick: now + timing.dwell,
            },
        }
    }

    pub fn state(&self) -> AutoplayState {
        match self.phase {
            Phase::Running { .. } => AutoplayState::Running,
            Phase::Paused { .. } => AutoplayState::Paused,
            Phase::Stopped => AutoplayState::Stopped,
        }
    }

    /// A user interaction: drop any pending tick and (re)start the cooldown
    /// from `now`.
    pub fn interact(&mut self, now: Instant) {
        match self.phase {
            Phase::Stopped => {}
            Phase::Running { .. } => {
                debug!("Autoplay paused for {:?}", self.timing.cooldown);
                self.phase = Phase::Paused {
                    resume_at: now + self.timing.cooldown,
                };
            }
            Phase::Paused { .. } => {
                self.phase = Phase::Paused {
                    resume_at: now + self.timing.cooldown,
                };
            }
        }
    }

    /// Bring the timer up to `now`. Returns true when one advance is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Phase::Paused { resume_at } = self.phase {
            if now < resume_at {
                return false;
            }
            debug!("Autoplay resumed");
            self.phase = Phase::Running {
                next_tick: resume_at + self.timing.dwell,
            };
        }

        match self.phase {
            Phase::Running { next_tick } if now >= next_tick => {
                self.phase = Phase::Running {
                    next_tick: now + self.timing.dwell,
                };
                true
            }
            _ => false,
        }
    }

    /// The next instant at which [`poll`](Self::poll) can change anything.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Running { next_tick } => Some(next_tick),
            Phase::Paused { resume_at } => Some(resume_at),
            Phase::Stopped => None,
        }
    }

    /// Cancel every pending deadline for good.
    pub fn teardown(&mut self) {
        self.phase = Phase::Stopped;
    }
}
