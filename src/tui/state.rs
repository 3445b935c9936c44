//! Application state management and input handling.

use crate::carousel::{AutoplayTiming, Carousel, Catalog, Control, SlideChange, Transition};
use crate::config::{Config, Keybindings, Variant};
use crate::error::{AppError, Result};
use crate::types::{Dataset, Episode, Series};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use super::types::{Action, Focus, Route, Screen};

/// Redraw interval while a transition is animating.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// Upper bound on how long the event loop sleeps.
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Screen regions of the clickable home controls, recorded while drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitAreas {
    pub sidebar: Rect,
    pub previous: Rect,
    pub next: Rect,
    pub cta: Rect,
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Application state for the TUI.
pub struct App {
    /// Current screen being displayed
    pub screen: Screen,
    /// Current focus on the home screen (sidebar or slide)
    pub focus: Focus,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether help modal is shown
    pub show_help: bool,
    /// The loaded dataset
    pub dataset: Dataset,
    /// Episodes sorted by episode number
    pub episodes: Vec<Episode>,
    /// Slide sequence used for every home mount
    catalog: Catalog,
    /// The mounted carousel, present only on the home screen
    pub carousel: Option<Carousel>,
    /// Subscription to the mounted carousel's slide changes
    changes: Option<watch::Receiver<SlideChange>>,
    /// Slide transition currently animating
    pub transition: Option<Transition>,
    /// Carousel preset
    pub variant: Variant,
    timing: AutoplayTiming,
    transition_duration: Duration,
    /// Key bindings
    pub keybindings: Keybindings,
    /// Highlighted sidebar marker
    pub sidebar_state: ListState,
    /// Selection in the episode and show lists
    pub list_state: ListState,
    /// Scroll offset of the episode detail page
    pub detail_scroll: u16,
    /// Status message shown in the footer
    pub status_message: Option<String>,
    /// Error message to display
    pub error_message: Option<String>,
    /// Clickable regions from the last draw
    pub hit_areas: HitAreas,
}

impl App {
    /// Build the catalog, validate timing and mount the home carousel.
    pub fn new(dataset: Dataset, config: &Config, now: Instant) -> Result<Self> {
        let catalog = Catalog::from_dataset(&dataset, config.variant.label_style())?;
        let timing = config.timing()?;
        let episodes = dataset.sorted_episodes();

        let mut app = Self {
            screen: Screen::Home,
            focus: Focus::Main,
            should_quit: false,
            show_help: false,
            dataset,
            episodes,
            catalog,
            carousel: None,
            changes: None,
            transition: None,
            variant: config.variant,
            timing,
            transition_duration: config.transition_duration(),
            keybindings: config.keybindings.clone(),
            sidebar_state: ListState::default(),
            list_state: ListState::default(),
            detail_scroll: 0,
            status_message: None,
            error_message: None,
            hit_areas: HitAreas::default(),
        };
        app.mount_home(now);
        Ok(app)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn mount_home(&mut self, now: Instant) {
        let carousel = Carousel::mount(self.catalog.clone(), self.timing, now);
        self.changes = Some(carousel.subscribe());
        self.carousel = Some(carousel);
        self.transition = None;
        self.focus = Focus::Main;
        self.sidebar_state.select(Some(0));
    }

    fn unmount_home(&mut self) {
        self.changes = None;
        self.transition = None;
        if let Some(carousel) = self.carousel.take() {
            carousel.unmount();
        }
    }

    /// Release the carousel before the terminal is restored.
    pub fn shutdown(&mut self) {
        self.unmount_home();
    }

    /// Episodes shown on the current list screen.
    pub fn listed_episodes(&self) -> Vec<&Episode> {
        match &self.screen {
            Screen::EpisodeList { series: Some(id) } => {
                self.episodes.iter().filter(|e| &e.series_id == id).collect()
            }
            _ => self.episodes.iter().collect(),
        }
    }

    /// Episode shown on the detail screen.
    pub fn detail_episode(&self) -> Option<&Episode> {
        match &self.screen {
            Screen::EpisodeDetail { episode } => self.episodes.iter().find(|e| &e.id == episode),
            _ => None,
        }
    }

    /// Series whose episodes are listed, if the list is filtered.
    pub fn listed_series(&self) -> Option<&Series> {
        match &self.screen {
            Screen::EpisodeList { series: Some(id) } => {
                self.dataset.series.iter().find(|s| &s.id == id)
            }
            _ => None,
        }
    }

    /// Set an error message.
    pub fn set_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    /// Clear error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// Follow a route, unmounting or mounting the carousel as the home
    /// screen is left or entered.
    pub fn open(&mut self, route: Route, now: Instant) {
        debug!("Opening route {:?}", route);
        let screen = match route {
            Route::Home => Screen::Home,
            Route::Episodes => Screen::EpisodeList { series: None },
            Route::Episode(slug) => match self.dataset.episode_by_slug(&slug) {
                Some(episode) => Screen::EpisodeDetail {
                    episode: episode.id.clone(),
                },
                None => {
                    self.set_error(&AppError::NotFound(format!("episode '{}'", slug)).to_string());
                    return;
                }
            },
            Route::Shows => Screen::Shows,
            Route::Show(slug) => match self.dataset.series_by_slug(&slug) {
                Some(series) => Screen::EpisodeList {
                    series: Some(series.id.clone()),
                },
                None => {
                    self.set_error(&AppError::NotFound(format!("show '{}'", slug)).to_string());
                    return;
                }
            },
            Route::About => Screen::About,
            Route::Contact => Screen::Contact,
            Route::External(target) => {
                self.set_status(&format!("External link: {}", target));
                return;
            }
        };
        self.show(screen, now);
    }

    fn show(&mut self, screen: Screen, now: Instant) {
        if screen == self.screen {
            return;
        }
        let was_home = self.screen == Screen::Home;
        let is_home = screen == Screen::Home;
        if was_home {
            self.unmount_home();
        }
        info!("Showing {:?}", screen);
        self.screen = screen;
        self.list_state.select(Some(0));
        self.detail_scroll = 0;
        self.status_message = None;
        if is_home {
            self.mount_home(now);
        }
    }

    /// Advance timers and pick up slide changes.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.poll_timers(now);
        }
        self.sync_transition(now);
    }

    fn sync_transition(&mut self, now: Instant) {
        if let Some(changes) = self.changes.as_mut() {
            if changes.has_changed().unwrap_or(false) {
                let change = *changes.borrow_and_update();
                self.transition = Some(Transition::begin(change, now, self.transition_duration));
                if self.focus == Focus::Main {
                    self.sidebar_state.select(Some(change.to));
                }
            }
        }
        if self.transition.is_some_and(|t| t.is_finished(now)) {
            self.transition = None;
        }
    }

    /// How long the event loop may sleep before something needs doing.
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        let mut wait = if self.transition.is_some() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        if let Some(deadline) = self.carousel.as_ref().and_then(|c| c.next_deadline()) {
            wait = wait.min(deadline.saturating_duration_since(now));
        }
        wait
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent, now: Instant) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        // Handle help modal
        if self.show_help {
            if self.keybindings.matches(&self.keybindings.help, &key)
                || self.keybindings.matches(&self.keybindings.back, &key)
                || self.keybindings.matches(&self.keybindings.quit, &key)
            {
                self.show_help = false;
            }
            return Action::None;
        }

        // Any key dismisses the error popup
        if self.error_message.is_some() {
            self.clear_error();
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.help, &key) {
            self.show_help = true;
            return Action::None;
        }

        if self.keybindings.matches(&self.keybindings.quit, &key) {
            self.should_quit = true;
            return Action::Quit;
        }

        if self.keybindings.matches(&self.keybindings.episodes, &key) {
            return Action::Open(Route::Episodes);
        }
        if self.keybindings.matches(&self.keybindings.shows, &key) {
            return Action::Open(Route::Shows);
        }
        if self.keybindings.matches(&self.keybindings.about, &key) {
            return Action::Open(Route::About);
        }
        if self.keybindings.matches(&self.keybindings.contact, &key) {
            return Action::Open(Route::Contact);
        }

        let action = match self.screen {
            Screen::Home => self.handle_home_input(key, now),
            Screen::EpisodeList { .. } => self.handle_episode_list_input(key),
            Screen::EpisodeDetail { .. } => self.handle_detail_input(key),
            Screen::Shows => self.handle_shows_input(key),
            Screen::About | Screen::Contact => {
                if self.keybindings.matches(&self.keybindings.back, &key) {
                    Action::Open(Route::Home)
                } else {
                    Action::None
                }
            }
        };
        self.sync_transition(now);
        action
    }

    fn handle_home_input(&mut self, key: KeyEvent, now: Instant) -> Action {
        if self
            .keybindings
            .matches(&self.keybindings.toggle_focus, &key)
        {
            self.focus = match self.focus {
                Focus::Sidebar => Focus::Main,
                Focus::Main => Focus::Sidebar,
            };
            if let Some(carousel) = &self.carousel {
                self.sidebar_state.select(Some(carousel.current_index()));
            }
            return Action::None;
        }

        if self.focus == Focus::Sidebar {
            return self.handle_sidebar_input(key, now);
        }

        if self.keybindings.matches(&self.keybindings.select, &key) {
            return self.activate_cta(now);
        }

        let Some(carousel) = self.carousel.as_mut() else {
            return Action::None;
        };

        // Digits jump straight to a sidebar marker
        if let KeyCode::Char(c @ '1'..='9') = key.code {
            let index = (c as usize) - ('1' as usize);
            if index < carousel.len() {
                carousel.activate(Control::Marker(index), now);
            }
            return Action::None;
        }

        carousel.handle_key(&self.keybindings, &key, now);
        Action::None
    }

    fn handle_sidebar_input(&mut self, key: KeyEvent, now: Instant) -> Action {
        let len = self.catalog.len();
        let selected = self.sidebar_state.selected().unwrap_or(0);
        if self.keybindings.matches(&self.keybindings.backward, &key) {
            self.sidebar_state.select(Some(selected.saturating_sub(1)));
        } else if self.keybindings.matches(&self.keybindings.forward, &key) {
            self.sidebar_state
                .select(Some((selected + 1).min(len.saturating_sub(1))));
        } else if self.keybindings.matches(&self.keybindings.select, &key) {
            self.focus = Focus::Main;
            if let Some(carousel) = self.carousel.as_mut() {
                carousel.activate(Control::Marker(selected), now);
            }
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            self.focus = Focus::Main;
        }
        Action::None
    }

    /// Follow the current slide's call to action.
    fn activate_cta(&mut self, now: Instant) -> Action {
        let Some(carousel) = self.carousel.as_mut() else {
            return Action::None;
        };
        carousel.activate(Control::CallToAction, now);
        match carousel.current_slide().cta_target() {
            Some(target) => Action::Open(Route::parse(target)),
            None => Action::None,
        }
    }

    fn move_list_selection(&mut self, key: &KeyEvent, len: usize) -> bool {
        let selected = self.list_state.selected().unwrap_or(0);
        if self.keybindings.matches(&self.keybindings.backward, key) {
            self.list_state.select(Some(selected.saturating_sub(1)));
            true
        } else if self.keybindings.matches(&self.keybindings.forward, key) {
            self.list_state
                .select(Some((selected + 1).min(len.saturating_sub(1))));
            true
        } else {
            false
        }
    }

    fn handle_episode_list_input(&mut self, key: KeyEvent) -> Action {
        let slugs: Vec<String> = self
            .listed_episodes()
            .iter()
            .map(|e| e.slug.clone())
            .collect();
        if self.move_list_selection(&key, slugs.len()) {
            return Action::None;
        }
        if self.keybindings.matches(&self.keybindings.select, &key) {
            let selected = self.list_state.selected().unwrap_or(0);
            if let Some(slug) = slugs.get(selected) {
                return Action::Open(Route::Episode(slug.clone()));
            }
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            return match self.screen {
                Screen::EpisodeList { series: Some(_) } => Action::Open(Route::Shows),
                _ => Action::Open(Route::Home),
            };
        }
        Action::None
    }

    fn handle_detail_input(&mut self, key: KeyEvent) -> Action {
        if self.keybindings.matches(&self.keybindings.forward, &key) {
            self.detail_scroll = self.detail_scroll.saturating_add(1);
        } else if self.keybindings.matches(&self.keybindings.backward, &key) {
            self.detail_scroll = self.detail_scroll.saturating_sub(1);
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            return Action::Open(Route::Episodes);
        }
        Action::None
    }

    fn handle_shows_input(&mut self, key: KeyEvent) -> Action {
        let len = self.dataset.series.len();
        if self.move_list_selection(&key, len) {
            return Action::None;
        }
        if self.keybindings.matches(&self.keybindings.select, &key) {
            let selected = self.list_state.selected().unwrap_or(0);
            if let Some(series) = self.dataset.series.get(selected) {
                return Action::Open(Route::Show(series.slug.clone()));
            }
        } else if self.keybindings.matches(&self.keybindings.back, &key) {
            return Action::Open(Route::Home);
        }
        Action::None
    }

    /// Handle a mouse event on the home controls.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> Action {
        if self.screen != Screen::Home || self.show_help {
            return Action::None;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        let (column, row) = (mouse.column, mouse.row);
        let areas = self.hit_areas;

        let action = if contains(areas.cta, column, row) {
            self.activate_cta(now)
        } else if let Some(carousel) = self.carousel.as_mut() {
            if contains(areas.previous, column, row) {
                carousel.activate(Control::PreviousButton, now);
            } else if contains(areas.next, column, row) {
                carousel.activate(Control::NextButton, now);
            } else if contains(areas.sidebar, column, row) {
                // One border row above the first marker
                let row_in_list = row.saturating_sub(areas.sidebar.y + 1) as usize;
                if row > areas.sidebar.y {
                    let index = row_in_list + self.sidebar_state.offset();
                    if index < carousel.len() {
                        carousel.activate(Control::Marker(index), now);
                    }
                }
            }
            Action::None
        } else {
            Action::None
        };
        self.sync_transition(now);
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::AutoplayState;
    use crate::data;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(now: Instant) -> App {
        App::new(data::sample().unwrap(), &Config::new(), now).unwrap()
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_new_app_mounts_home() {
        let now = Instant::now();
        let app = app(now);
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.catalog().len(), 8);
        let carousel = app.carousel.as_ref().unwrap();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.autoplay_state(), AutoplayState::Running);
    }

    #[test]
    fn test_navigation_key_starts_transition() {
        let now = Instant::now();
        let mut app = app(now);
        assert_eq!(app.handle_input(key(KeyCode::Right), now), Action::None);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 1);
        let transition = app.transition.unwrap();
        assert_eq!((transition.from, transition.to), (0, 1));
        assert_eq!(app.sidebar_state.selected(), Some(1));
    }

    #[test]
    fn test_tick_advances_and_animates() {
        let now = Instant::now();
        let mut app = app(now);
        app.on_tick(now + Duration::from_secs(4));
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 1);
        assert!(app.transition.is_some());
        app.on_tick(now + Duration::from_secs(5));
        assert!(app.transition.is_none());
    }

    #[test]
    fn test_digit_jumps_to_marker() {
        let now = Instant::now();
        let mut app = app(now);
        app.handle_input(key(KeyCode::Char('7')), now);
        let carousel = app.carousel.as_ref().unwrap();
        assert_eq!(carousel.current_index(), 6);
        assert_eq!(carousel.current_label(), "About");
        assert_eq!(carousel.autoplay_state(), AutoplayState::Paused);
    }

    #[test]
    fn test_enter_follows_episode_link() {
        let now = Instant::now();
        let mut app = app(now);
        let action = app.handle_input(key(KeyCode::Enter), now);
        assert_eq!(
            action,
            Action::Open(Route::Episode("building-an-empire-azrieli".to_string()))
        );

        if let Action::Open(route) = action {
            app.open(route, now);
        }
        assert_eq!(
            app.screen,
            Screen::EpisodeDetail {
                episode: "1".to_string()
            }
        );
        assert!(app.carousel.is_none());
        assert_eq!(app.detail_episode().map(|e| e.episode_number), Some(1));
    }

    #[test]
    fn test_returning_home_mounts_fresh_carousel() {
        let now = Instant::now();
        let mut app = app(now);
        app.handle_input(key(KeyCode::Right), now);
        app.open(Route::Shows, now);
        assert!(app.carousel.is_none());
        app.open(Route::Home, now);
        let carousel = app.carousel.as_ref().unwrap();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.autoplay_state(), AutoplayState::Running);
    }

    #[test]
    fn test_show_route_filters_episodes() {
        let now = Instant::now();
        let mut app = app(now);
        app.open(Route::Show("season-1-israel".to_string()), now);
        assert_eq!(app.listed_episodes().len(), 4);
        assert_eq!(app.listed_series().map(|s| s.id.as_str()), Some("1"));
        assert_eq!(app.handle_input(key(KeyCode::Esc), now), Action::Open(Route::Shows));
    }

    #[test]
    fn test_unknown_episode_sets_error() {
        let now = Instant::now();
        let mut app = app(now);
        app.open(Route::Episode("missing".to_string()), now);
        assert_eq!(app.screen, Screen::Home);
        assert!(app.error_message.as_deref().unwrap().contains("missing"));

        // First key only dismisses the popup
        app.handle_input(key(KeyCode::Right), now);
        assert!(app.error_message.is_none());
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 0);
    }

    #[test]
    fn test_external_route_sets_status() {
        let now = Instant::now();
        let mut app = app(now);
        app.open(Route::External("https://spotify.com".to_string()), now);
        assert_eq!(app.screen, Screen::Home);
        assert!(app.status_message.as_deref().unwrap().contains("spotify"));
    }

    #[test]
    fn test_sidebar_focus_moves_highlight_only() {
        let now = Instant::now();
        let mut app = app(now);
        app.handle_input(key(KeyCode::Tab), now);
        assert_eq!(app.focus, Focus::Sidebar);

        app.handle_input(key(KeyCode::Down), now);
        app.handle_input(key(KeyCode::Down), now);
        assert_eq!(app.sidebar_state.selected(), Some(2));
        let carousel = app.carousel.as_ref().unwrap();
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.autoplay_state(), AutoplayState::Running);

        app.handle_input(key(KeyCode::Enter), now);
        assert_eq!(app.focus, Focus::Main);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 2);
    }

    #[test]
    fn test_mouse_controls() {
        let now = Instant::now();
        let mut app = app(now);
        app.hit_areas = HitAreas {
            sidebar: Rect::new(0, 3, 30, 12),
            previous: Rect::new(40, 20, 3, 1),
            next: Rect::new(52, 20, 3, 1),
            cta: Rect::new(35, 15, 40, 1),
        };

        app.handle_mouse(click(53, 20), now);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 1);
        app.handle_mouse(click(41, 20), now);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 0);

        // Third marker row, below the border
        app.handle_mouse(click(5, 6), now);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 2);

        // Clicking the border row does nothing
        app.handle_mouse(click(5, 3), now);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 2);

        let action = app.handle_mouse(click(36, 15), now);
        assert!(matches!(action, Action::Open(Route::Episode(_))));
    }

    #[test]
    fn test_next_wakeup_respects_autoplay_deadline() {
        let now = Instant::now();
        let app = app(now);
        assert_eq!(app.next_wakeup(now + Duration::from_millis(3900)), Duration::from_millis(100));
        assert_eq!(app.next_wakeup(now), IDLE_INTERVAL);
    }

    #[test]
    fn test_help_and_quit() {
        let now = Instant::now();
        let mut app = app(now);
        app.handle_input(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT), now);
        assert!(app.show_help);
        // Navigation is swallowed while help is open
        app.handle_input(key(KeyCode::Right), now);
        assert_eq!(app.carousel.as_ref().unwrap().current_index(), 0);
        app.handle_input(key(KeyCode::Esc), now);
        assert!(!app.show_help);

        assert_eq!(app.handle_input(key(KeyCode::Char('q')), now), Action::Quit);
        assert!(app.should_quit);
    }
}
