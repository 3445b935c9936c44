//! Terminal User Interface for podcast-carousel using ratatui.
//!
//! This module provides a full-screen TUI around the home carousel, with
//! pages for browsing episodes, shows, hosts and social links.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::{App, HitAreas};
pub use types::{Action, Focus, Route, Screen};
