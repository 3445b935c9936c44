//! UI rendering functions for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use super::state::App;
use super::types::{Focus, Screen};
use crate::carousel::{AutoplayState, Axis, Slide};
use crate::types::SlideKind;

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let size = frame.area();

    // Create main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(size);

    draw_header(frame, app, chunks[0]);

    // Draw main content based on screen
    match app.screen {
        Screen::Home => draw_home(frame, app, chunks[1], now),
        Screen::EpisodeList { .. } => draw_episode_list(frame, app, chunks[1]),
        Screen::EpisodeDetail { .. } => draw_episode_detail(frame, app, chunks[1]),
        Screen::Shows => draw_shows(frame, app, chunks[1]),
        Screen::About => draw_about(frame, app, chunks[1]),
        Screen::Contact => draw_contact(frame, app, chunks[1]),
    }

    draw_footer(frame, app, chunks[2]);

    // Draw error popup if there's an error
    if let Some(error) = &app.error_message {
        draw_error_popup(frame, error);
    }

    // Draw help modal if shown
    if app.show_help {
        draw_help_modal(frame, app);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let autoplay = match app.carousel.as_ref().map(|c| c.autoplay_state()) {
        Some(AutoplayState::Running) => Span::styled("[autoplay]", Style::default().fg(Color::Green)),
        Some(AutoplayState::Paused) => Span::styled("[paused]", Style::default().fg(Color::Yellow)),
        Some(AutoplayState::Stopped) | None => Span::raw(""),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "podcast-carousel",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", app.variant.as_str()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        autoplay,
        Span::raw("  "),
        Span::styled(screen_title(app), Style::default().fg(Color::White)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn screen_title(app: &App) -> String {
    match &app.screen {
        Screen::Home => "Home".to_string(),
        Screen::EpisodeList { .. } => match app.listed_series() {
            Some(series) => series.name.clone(),
            None => "Episodes".to_string(),
        },
        Screen::EpisodeDetail { .. } => app
            .detail_episode()
            .map(|e| e.title.clone())
            .unwrap_or_default(),
        Screen::Shows => "Shows".to_string(),
        Screen::About => "About".to_string(),
        Screen::Contact => "Contact".to_string(),
    }
}

fn selectable_list<'a>(items: Vec<ListItem<'a>>, block: Block<'a>) -> List<'a> {
    List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

fn draw_home(frame: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    // Split content area into sidebar and main
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30), // Sidebar (fixed width)
            Constraint::Min(0),     // Slides
        ])
        .split(area);

    draw_sidebar(frame, app, content_chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(content_chunks[1]);

    draw_slides(frame, app, main_chunks[0], now);
    draw_controls(frame, app, main_chunks[1]);
}

fn draw_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let current = app.carousel.as_ref().map(|c| c.current_index());
    let items: Vec<ListItem> = app
        .catalog()
        .labels()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            // Truncate label if too long (use chars to avoid UTF-8 panics)
            let label = if label.chars().count() > 20 {
                format!("{}...", label.chars().take(17).collect::<String>())
            } else {
                label.clone()
            };
            let (marker, style) = if Some(i) == current {
                ("●", Style::default().fg(Color::Magenta))
            } else {
                ("○", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), style),
                Span::raw(format!("{:02} {}", i + 1, label)),
            ]))
        })
        .collect();

    let list = selectable_list(
        items,
        Block::default()
            .borders(Borders::ALL)
            .title("Slides")
            .border_style(border_style),
    );

    frame.render_stateful_widget(list, area, &mut app.sidebar_state);
    app.hit_areas.sidebar = area;
}

/// Body lines of a slide and its call-to-action label.
fn slide_lines(slide: &Slide) -> (Vec<Line<'static>>, Option<String>) {
    let category_style = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let title_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = Vec::new();
    let cta = match slide {
        Slide::Episode(s) => {
            lines.push(Line::from(Span::styled(
                format!("EPISODE {}", s.episode_number),
                category_style,
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(s.title.clone(), title_style)));
            if !s.guest_names.is_empty() {
                lines.push(Line::from(format!("with {}", s.guest_names.join(", "))));
            }
            lines.push(Line::from(""));
            let anchor = s.artwork_anchor.as_deref().unwrap_or("center");
            lines.push(Line::from(Span::styled(
                format!("Artwork: {} ({})", s.artwork, anchor),
                dim,
            )));
            Some("Listen Now".to_string())
        }
        Slide::About(s) => {
            if let Some(category) = &s.category {
                lines.push(Line::from(Span::styled(category.clone(), category_style)));
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(s.title.clone(), title_style)));
            if let Some(subtitle) = &s.subtitle {
                lines.push(Line::from(subtitle.clone()));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("Background: {}", s.background), dim)));
            if let Some(secondary) = &s.secondary_background {
                lines.push(Line::from(Span::styled(format!("Secondary: {}", secondary), dim)));
            }
            s.cta.as_ref().map(|c| c.label.clone())
        }
        Slide::Contact(s) => {
            if let Some(category) = &s.category {
                lines.push(Line::from(Span::styled(category.clone(), category_style)));
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(s.title.clone(), title_style)));
            if let Some(subtitle) = &s.subtitle {
                lines.push(Line::from(subtitle.clone()));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("Background: {}", s.background), dim)));
            s.cta.as_ref().map(|c| c.label.clone())
        }
    };

    (lines, cta)
}

/// Split a slide area into the wrapped body and the call-to-action row
/// pinned to its bottom.
fn slide_rows(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (rows[0], rows[1])
}

/// Region a slide occupies when displaced `offset` cells along `axis`,
/// clipped to `area`. `None` once fully outside.
fn displaced(area: Rect, axis: Axis, offset: i32) -> Option<Rect> {
    let (start, extent) = match axis {
        Axis::Horizontal => (area.x, area.width),
        Axis::Vertical => (area.y, area.height),
    };
    let extent = i32::from(extent);
    if offset.abs() >= extent {
        return None;
    }
    let visible = (extent - offset.abs()) as u16;
    let begin = if offset > 0 { start + offset as u16 } else { start };
    Some(match axis {
        Axis::Horizontal => Rect {
            x: begin,
            width: visible,
            ..area
        },
        Axis::Vertical => Rect {
            y: begin,
            height: visible,
            ..area
        },
    })
}

fn render_slide(frame: &mut Frame, slide: &Slide, area: Rect) {
    let (lines, cta) = slide_lines(slide);
    let (body_area, cta_area) = slide_rows(area);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body_area);

    if let Some(label) = cta {
        let button = Span::styled(
            format!(" {} → ", label),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(Paragraph::new(Line::from(button)), cta_area);
    }
}

fn draw_slides(frame: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    let Some(carousel) = app.carousel.as_ref() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", carousel.current_label()))
        .border_style(if app.focus == Focus::Main {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let axis = app.variant.axis();
    let current = carousel.current_slide();

    match app.transition {
        Some(transition) => {
            let extent = match axis {
                Axis::Horizontal => inner.width,
                Axis::Vertical => inner.height,
            };
            let (incoming, outgoing) = transition.offsets(now, extent);
            if let (Some(slide), Some(rect)) = (
                app.catalog().get(transition.from),
                displaced(inner, axis, outgoing),
            ) {
                render_slide(frame, slide, rect);
            }
            if let (Some(slide), Some(rect)) = (
                app.catalog().get(transition.to),
                displaced(inner, axis, incoming),
            ) {
                render_slide(frame, slide, rect);
            }
        }
        None => render_slide(frame, current, inner),
    }

    // The call to action sits where the settled slide puts it
    let cta = match current.cta_target() {
        Some(_) => slide_rows(inner).1,
        None => Rect::default(),
    };
    app.hit_areas.cta = cta;
}

fn draw_controls(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(carousel) = app.carousel.as_ref() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3), // Previous
            Constraint::Length(9), // Position
            Constraint::Length(3), // Next
            Constraint::Length(2),
            Constraint::Min(0), // Progress
        ])
        .split(inner);

    let button = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new("◀").style(button).alignment(Alignment::Center),
        cols[0],
    );
    frame.render_widget(
        Paragraph::new(carousel.position_label()).alignment(Alignment::Center),
        cols[1],
    );
    frame.render_widget(
        Paragraph::new("▶").style(button).alignment(Alignment::Center),
        cols[2],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(carousel.progress().clamp(0.0, 1.0))
        .label(carousel.current_label().to_string());
    frame.render_widget(gauge, cols[4]);

    app.hit_areas.previous = cols[0];
    app.hit_areas.next = cols[2];
}

fn draw_episode_list(frame: &mut Frame, app: &mut App, area: Rect) {
    // Split into list and details
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let episodes = app.listed_episodes();
    let items: Vec<ListItem> = episodes
        .iter()
        .map(|e| ListItem::new(e.to_display()))
        .collect();

    // Episode details
    let details = app
        .list_state
        .selected()
        .and_then(|i| episodes.get(i))
        .map(|episode| {
            let guests = episode.guest_names().join(", ");
            format!(
                "{}\n{}  {}\nGuests: {}\n\n{}\n\nPress Enter for details",
                episode.title,
                episode.duration_display(),
                episode.published_display(),
                if guests.is_empty() { "-" } else { guests.as_str() },
                episode.description
            )
        })
        .unwrap_or_default();

    let title = match app.listed_series() {
        Some(series) => series.name.clone(),
        None => "Episodes".to_string(),
    };

    let list = selectable_list(items, Block::default().borders(Borders::ALL).title(title));
    frame.render_stateful_widget(list, chunks[0], &mut app.list_state);

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Info"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, chunks[1]);
}

fn draw_episode_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(episode) = app.detail_episode() else {
        return;
    };

    let heading = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(
            episode.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("Episode {}", episode.episode_number), heading),
            Span::raw(match episode.season {
                Some(season) => format!("  Season {}", season),
                None => String::new(),
            }),
            Span::raw(match app.dataset.series_for(episode) {
                Some(series) => format!("  {}", series.name),
                None => String::new(),
            }),
        ]),
        Line::from(Span::styled(
            format!(
                "{}  {}",
                episode.duration_display(),
                episode.published_display()
            ),
            dim,
        )),
        Line::from(""),
        Line::from(episode.description.clone()),
    ];

    if !episode.guests.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Guests", heading)));
        for guest in &episode.guests {
            lines.push(Line::from(format!("  {}  {}", guest.name, guest.bio)));
        }
    }

    if !episode.topics.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Topics  ", heading),
            Span::raw(episode.topics.join(", ")),
        ]));
    }

    if !episode.chapters.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Chapters", heading)));
        for chapter in &episode.chapters {
            lines.push(Line::from(format!(
                "  {:>6}  {}",
                chapter.start_display(),
                chapter.title
            )));
        }
    }

    if !episode.show_notes.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Show Notes", heading)));
        lines.extend(episode.show_notes.lines().map(|l| Line::from(l.to_string())));
    }

    if !episode.audio_url.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Listen: {}", episode.audio_url),
            dim,
        )));
    }

    let detail = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Episode"))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(detail, area);
}

fn draw_shows(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items: Vec<ListItem> = app
        .dataset
        .series
        .iter()
        .map(|s| ListItem::new(s.to_display()))
        .collect();

    let details = app
        .list_state
        .selected()
        .and_then(|i| app.dataset.series.get(i))
        .map(|series| {
            format!(
                "{}\n{}\n\n{}\n\nPress Enter to view episodes",
                series.name,
                series.category.as_str(),
                series.description
            )
        })
        .unwrap_or_default();

    let list = selectable_list(items, Block::default().borders(Borders::ALL).title("Shows"));
    frame.render_stateful_widget(list, chunks[0], &mut app.list_state);

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, chunks[1]);
}

fn draw_about(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(slide) = app.dataset.find_slide(SlideKind::About) {
        lines.push(Line::from(Span::styled(
            slide.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if let Some(subtitle) = &slide.subtitle {
            lines.push(Line::from(subtitle.clone()));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Hosts",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )));
    for host in &app.dataset.hosts {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<10}", host.name)),
            Span::styled(
                host.link.clone().unwrap_or_default(),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }

    let about = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("About"))
        .wrap(Wrap { trim: false });

    frame.render_widget(about, area);
}

fn draw_contact(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(slide) = app.dataset.find_slide(SlideKind::Contact) {
        lines.push(Line::from(Span::styled(
            slide.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if let Some(subtitle) = &slide.subtitle {
            lines.push(Line::from(subtitle.clone()));
        }
        lines.push(Line::from(""));
    }

    for link in &app.dataset.social_links {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<16}", link.platform)),
            Span::styled(link.url.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }

    let contact = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Contact"))
        .wrap(Wrap { trim: false });

    frame.render_widget(contact, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = match &app.status_message {
        Some(status) => Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow)),
        None => {
            let help_text = match app.screen {
                Screen::Home => match app.focus {
                    Focus::Main => "[←→] slide  [1-9] jump  [Enter] open  [Tab] slides  [e/s/a/c] pages  [?] help  [q] quit",
                    Focus::Sidebar => "[↑↓] highlight  [Enter] show slide  [Tab] back  [?] help  [q] quit",
                },
                Screen::EpisodeList { .. } | Screen::Shows => {
                    "[↑↓] navigate  [Enter] select  [Esc] back  [?] help  [q] quit"
                }
                Screen::EpisodeDetail { .. } => "[↑↓] scroll  [Esc] back  [?] help  [q] quit",
                Screen::About | Screen::Contact => "[e/s/a/c] pages  [Esc] home  [?] help  [q] quit",
            };
            Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray))
        }
    };

    frame.render_widget(footer.block(Block::default().borders(Borders::ALL)), area);
}

fn draw_error_popup(frame: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(popup, area);
}

fn draw_help_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    // Get context-sensitive help content
    let (title, content) = get_help_content(app);

    let help_text = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help - {}", title))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_text, area);
}

fn get_help_content(app: &App) -> (&'static str, String) {
    let global_keys = "\
Global Commands
───────────────
  ?           Show/hide this help
  Ctrl+C      Force quit
  Ctrl+Q      Force quit
  e           Episodes
  s           Shows
  a           About
  c           Contact
  q           Quit

";

    let carousel_keys = "\
Carousel
────────
  → / ↓       Next slide
  ← / ↑       Previous slide
  1-9         Jump to slide
  Enter       Open the slide's link
  Tab         Focus the slide list
  Mouse       Click ◀ ▶, a slide marker or the link

Autoplay pauses after any of these and resumes
once the carousel has been left alone.

";

    let sidebar_keys = "\
Slide List
──────────
  j / ↓       Move down
  k / ↑       Move up
  Enter       Show highlighted slide
  Tab / Esc   Back to the carousel

";

    let navigation_keys = "\
Navigation
──────────
  j / ↓       Move down
  k / ↑       Move up
  Enter       Select item
  Esc         Go back

";

    let detail_keys = "\
Episode
───────
  j / ↓       Scroll down
  k / ↑       Scroll up
  Esc         Back to episodes

";

    match app.screen {
        Screen::Home => {
            let content = match app.focus {
                Focus::Main => format!("{}{}Press ? to close", global_keys, carousel_keys),
                Focus::Sidebar => format!("{}{}Press ? to close", global_keys, sidebar_keys),
            };
            ("Home", content)
        }
        Screen::EpisodeList { .. } => {
            let content = format!("{}{}Press ? to close", global_keys, navigation_keys);
            ("Episodes", content)
        }
        Screen::EpisodeDetail { .. } => {
            let content = format!("{}{}Press ? to close", global_keys, detail_keys);
            ("Episode", content)
        }
        Screen::Shows => {
            let content = format!("{}{}Press ? to close", global_keys, navigation_keys);
            ("Shows", content)
        }
        Screen::About | Screen::Contact => {
            let content = format!("{}Esc         Home\n\nPress ? to close", global_keys);
            ("Pages", content)
        }
    }
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
