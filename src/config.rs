//! Configuration file support for podcast-carousel.
//!
//! This module provides functionality for loading and saving user preferences
//! from a TOML configuration file.

use crate::carousel::{AutoplayTiming, Axis, LabelStyle};
use crate::error::{AppError, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Carousel presentation preset.
///
/// Both presets drive the same engine; they differ in timing, label style
/// and transition axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Horizontal slides, numbered sidebar labels, 4s dwell, 20s cooldown
    #[default]
    Horizontal,
    /// Vertical slides, category sidebar labels, 8s dwell, 30s cooldown
    Vertical,
}

impl Variant {
    pub fn default_dwell_ms(&self) -> u64 {
        match self {
            Variant::Horizontal => 4_000,
            Variant::Vertical => 8_000,
        }
    }

    pub fn default_cooldown_ms(&self) -> u64 {
        match self {
            Variant::Horizontal => 20_000,
            Variant::Vertical => 30_000,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Variant::Horizontal => Axis::Horizontal,
            Variant::Vertical => Axis::Vertical,
        }
    }

    pub fn label_style(&self) -> LabelStyle {
        match self {
            Variant::Horizontal => LabelStyle::Numbered,
            Variant::Vertical => LabelStyle::Category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Horizontal => "horizontal",
            Variant::Vertical => "vertical",
        }
    }
}

/// User configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Carousel preset: "horizontal" or "vertical"
    #[serde(default)]
    pub variant: Variant,

    /// Autoplay dwell interval in milliseconds (overrides the preset)
    #[serde(default)]
    pub dwell_ms: Option<u64>,

    /// Autoplay cooldown after an interaction in milliseconds (overrides the preset)
    #[serde(default)]
    pub cooldown_ms: Option<u64>,

    /// Slide transition length in milliseconds
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// Dataset JSON file (bundled sample data when unset)
    #[serde(default)]
    pub data_path: Option<String>,

    /// Key bindings
    #[serde(default)]
    pub keybindings: Keybindings,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_transition_ms() -> u64 {
    450
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            variant: Variant::default(),
            dwell_ms: None,
            cooldown_ms: None,
            transition_ms: default_transition_ms(),
            data_path: None,
            keybindings: Keybindings::default(),
        }
    }

    /// Resolve and validate the autoplay timing for the configured preset.
    pub fn timing(&self) -> Result<AutoplayTiming> {
        let dwell = self
            .dwell_ms
            .unwrap_or_else(|| self.variant.default_dwell_ms());
        let cooldown = self
            .cooldown_ms
            .unwrap_or_else(|| self.variant.default_cooldown_ms());
        AutoplayTiming::new(Duration::from_millis(dwell), Duration::from_millis(cooldown))
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/podcast-carousel/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("podcast-carousel");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load config from `path`, or defaults when there is no file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.keybindings.validate()?;
        Ok(config)
    }

    /// Write this config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Write the default config to `path` unless a file is already there.
    ///
    /// Returns whether a file was written.
    pub fn write_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::new().save_to(path)?;
        Ok(true)
    }

    /// Create a default config file if one doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn create_default_if_missing() -> Result<PathBuf> {
        let path = Self::get_config_path()?;
        if Self::write_default(&path)? {
            info!("Wrote default config to {}", path.display());
        }
        Ok(path)
    }
}

/// Configurable key bindings. Each action accepts several keys, written as
/// `"j"`, `"Down"`, `"Enter"` or `"Ctrl+c"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub forward: Vec<String>,
    pub backward: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
    pub quit: Vec<String>,
    pub help: Vec<String>,
    pub episodes: Vec<String>,
    pub shows: Vec<String>,
    pub about: Vec<String>,
    pub contact: Vec<String>,
    pub toggle_focus: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            forward: keys(&["Right", "Down", "l", "j"]),
            backward: keys(&["Left", "Up", "h", "k"]),
            select: keys(&["Enter"]),
            back: keys(&["Esc", "Backspace"]),
            quit: keys(&["q"]),
            help: keys(&["?"]),
            episodes: keys(&["e"]),
            shows: keys(&["s"]),
            about: keys(&["a"]),
            contact: keys(&["c"]),
            toggle_focus: keys(&["Tab"]),
        }
    }
}

impl Keybindings {
    /// Check whether a key event matches any key of a binding.
    pub fn matches(&self, binding: &[String], key: &KeyEvent) -> bool {
        binding
            .iter()
            .filter_map(|name| parse_key(name))
            .any(|(code, modifiers)| {
                key.code == code && (key.modifiers & !KeyModifiers::SHIFT) == modifiers
            })
    }

    /// Reject key names that cannot be parsed.
    pub fn validate(&self) -> Result<()> {
        let all = [
            &self.forward,
            &self.backward,
            &self.select,
            &self.back,
            &self.quit,
            &self.help,
            &self.episodes,
            &self.shows,
            &self.about,
            &self.contact,
            &self.toggle_focus,
        ];
        for name in all.iter().flat_map(|b| b.iter()) {
            if parse_key(name).is_none() {
                return Err(AppError::Config(format!("Unknown key '{}'", name)));
            }
        }
        Ok(())
    }
}

/// Parse a key name into a key code and the modifiers it requires.
pub fn parse_key(name: &str) -> Option<(KeyCode, KeyModifiers)> {
    let (modifiers, rest) = match name.split_once('+') {
        Some((prefix, rest)) if !rest.is_empty() => {
            let modifiers = match prefix.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                _ => return None,
            };
            (modifiers, rest)
        }
        _ => (KeyModifiers::NONE, name),
    };

    let code = match rest {
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Esc,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "Space" => KeyCode::Char(' '),
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some((code, modifiers))
}
