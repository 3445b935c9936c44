//! Translation of key events and pointer controls into navigation commands.
//!
//! Pure dispatch: nothing here keeps state between calls.

use crate::config::Keybindings;
use crossterm::event::KeyEvent;

/// A navigation request against the sequencer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    GoTo(usize),
}

/// A clickable carousel affordance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    PreviousButton,
    NextButton,
    /// Sidebar marker for the slide at this index
    Marker(usize),
    /// The current slide's call-to-action link
    CallToAction,
}

/// What a pointer activation amounts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Navigate; counts as an interaction
    Navigate(NavCommand),
    /// Interaction without navigation
    Interact,
}

/// Map a key to a navigation command. Keys bound to neither direction map
/// to `None` and must not be treated as interactions.
pub fn dispatch_key(bindings: &Keybindings, key: &KeyEvent) -> Option<NavCommand> {
    if bindings.matches(&bindings.forward, key) {
        Some(NavCommand::Next)
    } else if bindings.matches(&bindings.backward, key) {
        Some(NavCommand::Previous)
    } else {
        None
    }
}

pub fn dispatch_control(control: Control) -> Dispatch {
    match control {
        Control::PreviousButton => Dispatch::Navigate(NavCommand::Previous),
        Control::NextButton => Dispatch::Navigate(NavCommand::Next),
        Control::Marker(index) => Dispatch::Navigate(NavCommand::GoTo(index)),
        Control::CallToAction => Dispatch::Interact,
    }
}
