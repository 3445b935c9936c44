//! A terminal front page for a podcast, built around a sequenced slide carousel.
//!
//! podcast-carousel shows every episode of the show as a slide, followed by an
//! about slide and a contact slide. Slides advance on their own, pause while the
//! visitor is interacting, and resume once they have been left alone.
//!
//! # Features
//!
//! - Headless carousel engine: catalog, sequencer, autoplay timer
//! - Horizontal and vertical presets with their own timing and labels
//! - Keyboard and mouse navigation with configurable key bindings
//! - Episode, show, about and contact pages reachable from slide links
//!
//! # Usage
//!
//! ```bash
//! # Run with the bundled sample data
//! cargo run
//!
//! # Vertical preset with a custom data file
//! cargo run -- --variant vertical --data podcast.json
//! ```

pub mod carousel;
pub mod config;
pub mod data;
pub mod error;
pub mod tui;
pub mod types;
