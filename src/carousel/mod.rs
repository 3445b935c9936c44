//! Headless slide sequencing engine for the home carousel.
//!
//! A [`Carousel`] is one mounted instance: it owns a [`Sequencer`] and an
//! [`AutoplayTimer`], routes user interactions to the timer, and tears both
//! down exactly once when unmounted or dropped. Rendering is left to whoever
//! subscribes to the sequencer's changes.

mod autoplay;
mod catalog;
mod input;
mod sequencer;
mod transition;

pub use autoplay::{AutoplayState, AutoplayTimer, AutoplayTiming};
pub use catalog::{AboutSlide, CallToAction, Catalog, ContactSlide, EpisodeSlide, LabelStyle, Slide};
pub use input::{Control, Dispatch, NavCommand, dispatch_control, dispatch_key};
pub use sequencer::{Direction, Origin, Sequencer, SlideChange};
pub use transition::{Axis, Edge, Transition, enter_edge, exit_edge};

use crate::config::Keybindings;
use crate::error::Result;
use crossterm::event::KeyEvent;
use log::{debug, info, warn};
use std::time::Instant;
use tokio::sync::watch;

pub struct Carousel {
    catalog: Catalog,
    sequencer: Sequencer,
    autoplay: AutoplayTimer,
}

impl Carousel {
    /// Mount at the first slide with autoplay running.
    pub fn mount(catalog: Catalog, timing: AutoplayTiming, now: Instant) -> Self {
        info!(
            "Mounting carousel: {} slides, dwell {:?}, cooldown {:?}",
            catalog.len(),
            timing.dwell(),
            timing.cooldown()
        );
        let sequencer = Sequencer::new(catalog.len());
        Self {
            catalog,
            sequencer,
            autoplay: AutoplayTimer::start(timing, now),
        }
    }

    /// Run a navigation command. User-originated moves pause autoplay;
    /// rejected moves change nothing.
    pub fn navigate(&mut self, command: NavCommand, origin: Origin, now: Instant) -> Result<SlideChange> {
        let change = match command {
            NavCommand::Next => self.sequencer.next(origin),
            NavCommand::Previous => self.sequencer.previous(origin),
            NavCommand::GoTo(index) => self.sequencer.go_to(index, origin)?,
        };
        if origin == Origin::User {
            self.autoplay.interact(now);
        }
        debug!("Slide {} -> {} ({:?})", change.from, change.to, origin);
        Ok(change)
    }

    /// Handle a key press. Keys that are not navigation keys are ignored.
    pub fn handle_key(&mut self, bindings: &Keybindings, key: &KeyEvent, now: Instant) -> Option<SlideChange> {
        let command = dispatch_key(bindings, key)?;
        self.navigate(command, Origin::User, now).ok()
    }

    /// Handle a pointer activation. Always an interaction.
    pub fn activate(&mut self, control: Control, now: Instant) -> Option<SlideChange> {
        match dispatch_control(control) {
            Dispatch::Navigate(command) => match self.navigate(command, Origin::User, now) {
                Ok(change) => Some(change),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            },
            Dispatch::Interact => {
                self.interact(now);
                None
            }
        }
    }

    /// Record an interaction that does not move the carousel.
    pub fn interact(&mut self, now: Instant) {
        self.autoplay.interact(now);
    }

    /// Advance if the autoplay timer is due.
    pub fn poll_timers(&mut self, now: Instant) -> Option<SlideChange> {
        if self.autoplay.poll(now) {
            Some(self.sequencer.next(Origin::Autoplay))
        } else {
            None
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.autoplay.next_deadline()
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SlideChange> {
        self.sequencer.subscribe()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_index(&self) -> usize {
        self.sequencer.current()
    }

    pub fn current_slide(&self) -> &Slide {
        &self.catalog.slides()[self.sequencer.current()]
    }

    pub fn current_label(&self) -> &str {
        &self.catalog.labels()[self.sequencer.current()]
    }

    pub fn direction(&self) -> Direction {
        self.sequencer.direction()
    }

    pub fn len(&self) -> usize {
        self.sequencer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequencer.is_empty()
    }

    pub fn position_label(&self) -> String {
        self.sequencer.position_label()
    }

    pub fn progress(&self) -> f64 {
        self.sequencer.progress()
    }

    /// Tear the carousel down. Consuming `self` means no timer can be
    /// polled afterwards.
    pub fn unmount(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        if self.autoplay.state() != AutoplayState::Stopped {
            self.autoplay.teardown();
            info!("Carousel unmounted at slide {}", self.sequencer.current());
        }
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.teardown();
    }
}
