//! Position and navigation over a circular slide sequence.

use crate::error::{AppError, Result};
use tokio::sync::watch;

/// Direction of the last move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Who requested a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Keyboard, button, sidebar marker
    User,
    /// The autoplay timer's own tick
    Autoplay,
}

/// A completed move, published to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub origin: Origin,
}

/// Owns the current index of a sequence of fixed length.
///
/// Every successful move is published on a watch channel so a renderer can
/// redraw without the sequencer knowing about it.
pub struct Sequencer {
    len: usize,
    index: usize,
    direction: Direction,
    changes: watch::Sender<SlideChange>,
}

impl Sequencer {
    /// Start at index 0. Only built from a `Catalog`, which always holds at
    /// least the about and contact slides.
    pub(crate) fn new(len: usize) -> Self {
        let (changes, _) = watch::channel(SlideChange {
            from: 0,
            to: 0,
            direction: Direction::Forward,
            origin: Origin::Autoplay,
        });
        Self {
            len,
            index: 0,
            direction: Direction::Forward,
            changes,
        }
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Receive every future change. The receiver sees the latest one only.
    pub fn subscribe(&self) -> watch::Receiver<SlideChange> {
        self.changes.subscribe()
    }

    /// Jump to `index`. Moving to a higher index is forward, anything else
    /// is backward. Out-of-range requests leave the state untouched.
    pub fn go_to(&mut self, index: usize, origin: Origin) -> Result<SlideChange> {
        if index >= self.len {
            return Err(AppError::OutOfRange {
                index,
                len: self.len,
            });
        }
        let direction = if index > self.index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        Ok(self.move_to(index, direction, origin))
    }

    /// Advance one slide, wrapping from the last to the first.
    pub fn next(&mut self, origin: Origin) -> SlideChange {
        let index = (self.index + 1) % self.len;
        self.move_to(index, Direction::Forward, origin)
    }

    /// Step back one slide, wrapping from the first to the last.
    pub fn previous(&mut self, origin: Origin) -> SlideChange {
        let index = (self.index + self.len - 1) % self.len;
        self.move_to(index, Direction::Backward, origin)
    }

    fn move_to(&mut self, index: usize, direction: Direction, origin: Origin) -> SlideChange {
        let change = SlideChange {
            from: self.index,
            to: index,
            direction,
            origin,
        };
        self.index = index;
        self.direction = direction;
        self.changes.send_replace(change);
        change
    }

    /// 1-based position, e.g. `"03 / 08"`.
    pub fn position_label(&self) -> String {
        format!("{:02} / {:02}", self.index + 1, self.len)
    }

    /// Fraction of the sequence reached, in `(0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.index + 1) as f64 / self.len as f64
    }
}
