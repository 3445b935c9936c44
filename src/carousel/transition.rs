//! Slide transition geometry.
//!
//! The incoming slide enters from the trailing edge when moving forward and
//! from the leading edge when moving backward; the outgoing slide leaves
//! toward the opposite edge.

use super::sequencer::{Direction, SlideChange};
use std::time::{Duration, Instant};

/// Axis slides move along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Side of the viewport along the axis. Leading is left/top, trailing is
/// right/bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Leading,
    Trailing,
}

impl Edge {
    fn sign(self) -> i32 {
        match self {
            Edge::Leading => -1,
            Edge::Trailing => 1,
        }
    }
}

pub fn enter_edge(direction: Direction) -> Edge {
    match direction {
        Direction::Forward => Edge::Trailing,
        Direction::Backward => Edge::Leading,
    }
}

pub fn exit_edge(direction: Direction) -> Edge {
    match enter_edge(direction) {
        Edge::Leading => Edge::Trailing,
        Edge::Trailing => Edge::Leading,
    }
}

/// An in-flight move between two slides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub started: Instant,
    pub duration: Duration,
}

impl Transition {
    pub fn begin(change: SlideChange, started: Instant, duration: Duration) -> Self {
        Self {
            from: change.from,
            to: change.to,
            direction: change.direction,
            started,
            duration,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = now.saturating_duration_since(self.started).as_secs_f32()
            / self.duration.as_secs_f32();
        ease_out_cubic(t.clamp(0.0, 1.0))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Signed displacement along the axis of `(incoming, outgoing)` for a
    /// viewport `extent` cells long. Incoming reaches 0 as progress reaches 1.
    pub fn offsets(&self, now: Instant, extent: u16) -> (i32, i32) {
        let p = self.progress(now);
        let extent = f32::from(extent);
        let incoming = enter_edge(self.direction).sign() as f32 * extent * (1.0 - p);
        let outgoing = exit_edge(self.direction).sign() as f32 * extent * p;
        (incoming.round() as i32, outgoing.round() as i32)
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::sequencer::Origin;

    fn change(direction: Direction) -> SlideChange {
        SlideChange {
            from: 0,
            to: 1,
            direction,
            origin: Origin::User,
        }
    }

    #[test]
    fn test_edges() {
        assert_eq!(enter_edge(Direction::Forward), Edge::Trailing);
        assert_eq!(exit_edge(Direction::Forward), Edge::Leading);
        assert_eq!(enter_edge(Direction::Backward), Edge::Leading);
        assert_eq!(exit_edge(Direction::Backward), Edge::Trailing);
    }

    #[test]
    fn test_forward_offsets() {
        let t0 = Instant::now();
        let tr = Transition::begin(change(Direction::Forward), t0, Duration::from_millis(400));

        assert_eq!(tr.offsets(t0, 80), (80, 0));
        assert_eq!(tr.offsets(t0 + Duration::from_millis(400), 80), (0, -80));
        assert!(tr.is_finished(t0 + Duration::from_millis(400)));

        let (incoming, outgoing) = tr.offsets(t0 + Duration::from_millis(200), 80);
        assert!(incoming > 0 && incoming < 80);
        assert!(outgoing < 0 && outgoing > -80);
    }

    #[test]
    fn test_backward_offsets() {
        let t0 = Instant::now();
        let tr = Transition::begin(change(Direction::Backward), t0, Duration::from_millis(400));
        assert_eq!(tr.offsets(t0, 20), (-20, 0));
        assert_eq!(tr.offsets(t0 + Duration::from_secs(1), 20), (0, 20));
    }

    #[test]
    fn test_progress_is_monotonic() {
        let t0 = Instant::now();
        let tr = Transition::begin(change(Direction::Forward), t0, Duration::from_millis(500));
        let mut last = 0.0;
        for step in 0..=10 {
            let p = tr.progress(t0 + Duration::from_millis(step * 50));
            assert!(p >= last);
            last = p;
        }
        assert!((last - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let t0 = Instant::now();
        let tr = Transition::begin(change(Direction::Forward), t0, Duration::ZERO);
        assert_eq!(tr.progress(t0), 1.0);
        assert!(tr.is_finished(t0));
    }
}
