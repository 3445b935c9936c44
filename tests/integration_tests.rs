//! Integration tests for podcast-carousel.
//!
//! These tests drive the public library API with the bundled sample
//! dataset. Time is simulated with explicit instants.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use podcast_carousel::carousel::{
    AutoplayState, AutoplayTiming, Carousel, Catalog, Control, Direction, LabelStyle, NavCommand,
    Origin, Slide,
};
use podcast_carousel::config::{Config, Keybindings, Variant};
use podcast_carousel::data;
use podcast_carousel::error::AppError;
use podcast_carousel::tui::{Action, App, Route, Screen};
use podcast_carousel::types::SlideKind;
use std::time::{Duration, Instant};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn sample_carousel(t0: Instant) -> Carousel {
    let dataset = data::sample().unwrap();
    let catalog = Catalog::from_dataset(&dataset, LabelStyle::Numbered).unwrap();
    let timing = AutoplayTiming::new(ms(4000), ms(20_000)).unwrap();
    Carousel::mount(catalog, timing, t0)
}

/// The sample dataset yields six episodes then about and contact.
#[test]
fn test_sample_catalog_order() {
    let dataset = data::sample().unwrap();
    let catalog = Catalog::from_dataset(&dataset, LabelStyle::Numbered).unwrap();

    assert_eq!(catalog.len(), 8);
    assert_eq!(catalog.episode_count(), 6);

    let numbers: Vec<i64> = catalog
        .slides()
        .iter()
        .filter_map(|s| match s {
            Slide::Episode(e) => Some(e.episode_number),
            _ => None,
        })
        .collect();
    assert_eq!(numbers, vec![1, 1, 1, 2, 3, 4]);

    // Equal numbers keep dataset order
    assert_eq!(catalog.get(0).unwrap().id(), "episode-1");
    assert_eq!(catalog.get(1).unwrap().id(), "episode-5");
    assert_eq!(catalog.get(2).unwrap().id(), "episode-6");

    assert!(matches!(catalog.get(6), Some(Slide::About(_))));
    assert!(matches!(catalog.get(7), Some(Slide::Contact(_))));
    assert_eq!(catalog.position_of("9"), Some(7));
}

/// Hero slides never enter the catalog.
#[test]
fn test_hero_descriptor_is_ignored() {
    let dataset = data::sample().unwrap();
    assert!(dataset.find_slide(SlideKind::Hero).is_some());
    let catalog = Catalog::from_dataset(&dataset, LabelStyle::Numbered).unwrap();
    assert_eq!(catalog.position_of("1"), None);
}

#[test]
fn test_label_styles() {
    let dataset = data::sample().unwrap();

    let numbered = Catalog::from_dataset(&dataset, LabelStyle::Numbered).unwrap();
    assert_eq!(numbered.label(0), Some("Episode 1"));
    assert_eq!(numbered.label(3), Some("Episode 2"));
    assert_eq!(numbered.label(6), Some("About"));
    assert_eq!(numbered.label(7), Some("Contact"));

    let category = Catalog::from_dataset(&dataset, LabelStyle::Category).unwrap();
    assert_eq!(
        category.label(0),
        Some("Building an Empire: The Azrieli Story")
    );
    assert_eq!(category.label(6), Some("ABOUT"));
    assert_eq!(category.label(7), Some("CONNECT"));
}

/// A dataset without a contact slide cannot be shown.
#[test]
fn test_missing_contact_slide_is_rejected() {
    let mut dataset = data::sample().unwrap();
    dataset.slides.retain(|s| s.kind != SlideKind::Contact);

    let err = Catalog::from_dataset(&dataset, LabelStyle::Numbered).unwrap_err();
    assert!(matches!(err, AppError::MalformedCatalog(_)));
    assert!(App::new(dataset, &Config::new(), Instant::now()).is_err());
}

/// Full traversal wraps in both directions.
#[test]
fn test_traversal_wraps() {
    let t0 = Instant::now();
    let mut carousel = sample_carousel(t0);

    for expected in (1..8).chain(std::iter::once(0)) {
        let change = carousel.navigate(NavCommand::Next, Origin::User, t0).unwrap();
        assert_eq!(change.to, expected);
    }

    let change = carousel
        .navigate(NavCommand::Previous, Origin::User, t0)
        .unwrap();
    assert_eq!(change.to, 7);
    assert_eq!(carousel.direction(), Direction::Backward);
    assert_eq!(carousel.position_label(), "08 / 08");
}

/// Autoplay walks the whole catalog on the dwell interval and wraps.
#[test]
fn test_autoplay_cycles_catalog() {
    let t0 = Instant::now();
    let mut carousel = sample_carousel(t0);

    for step in 1..=8u64 {
        let change = carousel.poll_timers(t0 + ms(4000 * step)).unwrap();
        assert_eq!(change.origin, Origin::Autoplay);
        assert_eq!(change.direction, Direction::Forward);
    }
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.autoplay_state(), AutoplayState::Running);
}

/// Interactions inside the cooldown keep extending the pause.
#[test]
fn test_repeated_interactions_extend_pause() {
    let t0 = Instant::now();
    let mut carousel = sample_carousel(t0);

    carousel.activate(Control::NextButton, t0 + ms(1000));
    carousel.activate(Control::Marker(4), t0 + ms(15_000));
    assert_eq!(carousel.current_index(), 4);

    // First cooldown would have ended at 21s
    assert!(carousel.poll_timers(t0 + ms(21_000)).is_none());
    assert_eq!(carousel.autoplay_state(), AutoplayState::Paused);

    // Resumes at 35s, ticks at 39s
    assert!(carousel.poll_timers(t0 + ms(35_000)).is_none());
    assert_eq!(carousel.autoplay_state(), AutoplayState::Running);
    assert!(carousel.poll_timers(t0 + ms(38_999)).is_none());
    assert!(carousel.poll_timers(t0 + ms(39_000)).is_some());
    assert_eq!(carousel.current_index(), 5);
}

/// Subscribers see every move, whatever its origin.
#[test]
fn test_subscribers_observe_moves() {
    let t0 = Instant::now();
    let mut carousel = sample_carousel(t0);
    let mut rx = carousel.subscribe();

    carousel.poll_timers(t0 + ms(4000));
    assert!(rx.has_changed().unwrap());
    let change = *rx.borrow_and_update();
    assert_eq!((change.from, change.to), (0, 1));
    assert_eq!(change.origin, Origin::Autoplay);

    let bindings = Keybindings::default();
    carousel.handle_key(&bindings, &key(KeyCode::Left), t0 + ms(4500));
    let change = *rx.borrow_and_update();
    assert_eq!((change.from, change.to), (1, 0));
    assert_eq!(change.origin, Origin::User);

    carousel.unmount();
    assert!(rx.has_changed().is_err());
}

#[test]
fn test_config_defaults() {
    let config = Config::new();
    assert_eq!(config.variant, Variant::Horizontal);
    assert_eq!(config.transition_ms, 450);

    let timing = config.timing().unwrap();
    assert_eq!(timing.dwell(), ms(4000));
    assert_eq!(timing.cooldown(), ms(20_000));
}

#[test]
fn test_vertical_preset() {
    let config = Config {
        variant: Variant::Vertical,
        ..Config::new()
    };
    let timing = config.timing().unwrap();
    assert_eq!(timing.dwell(), ms(8000));
    assert_eq!(timing.cooldown(), ms(30_000));

    let t0 = Instant::now();
    let app = App::new(data::sample().unwrap(), &config, t0).unwrap();
    let carousel = app.carousel.as_ref().unwrap();
    assert_eq!(carousel.current_label(), "Building an Empire: The Azrieli Story");
    assert_eq!(carousel.next_deadline(), Some(t0 + ms(8000)));
}

#[test]
fn test_invalid_timing_is_rejected() {
    let config = Config {
        dwell_ms: Some(5000),
        cooldown_ms: Some(5000),
        ..Config::new()
    };
    assert!(matches!(config.timing(), Err(AppError::Config(_))));
}

#[test]
fn test_route_parsing() {
    assert_eq!(Route::parse("/"), Route::Home);
    assert_eq!(Route::parse("/about"), Route::About);
    assert_eq!(Route::parse("/contact"), Route::Contact);
    assert_eq!(
        Route::parse("/episodes/designing-future-bjarke"),
        Route::Episode("designing-future-bjarke".to_string())
    );
    assert_eq!(
        Route::parse("mailto:hello@example.com"),
        Route::External("mailto:hello@example.com".to_string())
    );
}

/// Every slide link in the sample resolves to a page.
#[test]
fn test_every_slide_link_opens_a_page() {
    let t0 = Instant::now();
    let mut app = App::new(data::sample().unwrap(), &Config::new(), t0).unwrap();
    let targets: Vec<String> = app
        .catalog()
        .slides()
        .iter()
        .filter_map(|s| s.cta_target().map(str::to_string))
        .collect();
    assert_eq!(targets.len(), 8);

    for target in targets {
        app.open(Route::Home, t0);
        app.open(Route::parse(&target), t0);
        assert_ne!(app.screen, Screen::Home, "{} did not open a page", target);
        assert!(app.error_message.is_none());
    }
}

/// Browsing away and back always starts a fresh carousel.
#[test]
fn test_app_session() {
    let t0 = Instant::now();
    let mut app = App::new(data::sample().unwrap(), &Config::new(), t0).unwrap();

    app.handle_input(key(KeyCode::Right), t0);
    app.handle_input(key(KeyCode::Right), t0 + ms(500));
    assert_eq!(app.carousel.as_ref().unwrap().current_index(), 2);

    let action = app.handle_input(key(KeyCode::Char('e')), t0 + ms(1000));
    assert_eq!(action, Action::Open(Route::Episodes));
    app.open(Route::Episodes, t0 + ms(1000));
    assert!(app.carousel.is_none());
    assert_eq!(app.listed_episodes().len(), 6);

    app.handle_input(key(KeyCode::Down), t0 + ms(1500));
    let action = app.handle_input(key(KeyCode::Enter), t0 + ms(2000));
    assert_eq!(
        action,
        Action::Open(Route::Episode("global-vision-zisser".to_string()))
    );
    if let Action::Open(route) = action {
        app.open(route, t0 + ms(2000));
    }
    assert_eq!(
        app.detail_episode().map(|e| e.title.as_str()),
        Some("Global Vision, Israeli Roots")
    );

    let action = app.handle_input(key(KeyCode::Esc), t0 + ms(2500));
    assert_eq!(action, Action::Open(Route::Episodes));

    app.open(Route::Home, t0 + ms(3000));
    let carousel = app.carousel.as_ref().unwrap();
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(carousel.autoplay_state(), AutoplayState::Running);
    assert_eq!(carousel.next_deadline(), Some(t0 + ms(7000)));
}
