//! Type definitions for the podcast-carousel application.
//!
//! This module contains the dataset records the carousel and the terminal
//! pages are built from: series, episodes, guests, chapters and the slide
//! descriptors for the home carousel.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Show format of a series.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeriesCategory {
    Interviews,
    Solo,
    Special,
    Archive,
}

impl SeriesCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesCategory::Interviews => "Interviews",
            SeriesCategory::Solo => "Solo",
            SeriesCategory::Special => "Special",
            SeriesCategory::Archive => "Archive",
        }
    }
}

/// A series (season or show format) grouping episodes.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Unique identifier for the series.
    pub id: String,

    /// Display name of the series.
    pub name: String,

    /// URL slug, used in `/shows/<slug>` routes.
    pub slug: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub artwork: String,

    #[serde(default)]
    pub hero_image: String,

    pub category: SeriesCategory,

    /// Number of planned episodes in the series.
    #[serde(default)]
    pub episode_count: u32,
}

impl Series {
    /// Format the series for display in selection menus.
    ///
    /// # Examples
    ///
    /// ```
    /// use podcast_carousel::types::{Series, SeriesCategory};
    ///
    /// let series = Series {
    ///     id: "1".to_string(),
    ///     name: "Season 1: Israel".to_string(),
    ///     slug: "season-1-israel".to_string(),
    ///     description: String::new(),
    ///     artwork: String::new(),
    ///     hero_image: String::new(),
    ///     category: SeriesCategory::Interviews,
    ///     episode_count: 12,
    /// };
    /// assert_eq!(series.to_display(), "Season 1: Israel (12 eps)");
    /// ```
    pub fn to_display(&self) -> String {
        format!("{} ({} eps)", self.name, self.episode_count)
    }
}

/// A link to an external profile or platform.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// A guest appearing on an episode.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// A chapter marker inside an episode.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub title: String,
    /// Start offset in seconds.
    pub start_time: u32,
    #[serde(default)]
    pub end_time: Option<u32>,
}

impl Chapter {
    /// Format the chapter start as `m:ss`.
    ///
    /// # Examples
    ///
    /// ```
    /// use podcast_carousel::types::Chapter;
    ///
    /// let chapter = Chapter { title: "Roots".to_string(), start_time: 720, end_time: None };
    /// assert_eq!(chapter.start_display(), "12:00");
    /// ```
    pub fn start_display(&self) -> String {
        format!("{}:{:02}", self.start_time / 60, self.start_time % 60)
    }
}

/// An episode of the podcast.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Unique identifier for the episode.
    pub id: String,

    pub title: String,

    /// URL slug, used in `/episodes/<slug>` routes.
    pub slug: String,

    /// Episode number within its season.
    pub episode_number: i64,

    #[serde(default)]
    pub season: Option<u32>,

    /// Identifier of the series this episode belongs to.
    pub series_id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub show_notes: String,

    #[serde(default)]
    pub transcript: Option<String>,

    #[serde(default)]
    pub audio_url: String,

    /// Length in seconds.
    #[serde(default)]
    pub duration: u32,

    /// Publication date as `YYYY-MM-DD`.
    #[serde(default)]
    pub published_at: String,

    /// Artwork reference (path or URL).
    pub artwork: String,

    /// Horizontal crop anchor for the artwork (e.g. "right").
    #[serde(default)]
    pub artwork_position: Option<String>,

    #[serde(default)]
    pub guests: Vec<Guest>,

    #[serde(default)]
    pub topics: Vec<String>,

    #[serde(default)]
    pub chapters: Vec<Chapter>,

    #[serde(default)]
    pub featured: bool,
}

impl Episode {
    /// Format the episode for display in selection menus.
    ///
    /// # Examples
    ///
    /// ```
    /// use podcast_carousel::types::Episode;
    ///
    /// let ep = Episode {
    ///     id: "1".to_string(),
    ///     title: "From Vision to Reality".to_string(),
    ///     slug: "from-vision-to-reality".to_string(),
    ///     episode_number: 2,
    ///     season: Some(1),
    ///     series_id: "1".to_string(),
    ///     description: String::new(),
    ///     show_notes: String::new(),
    ///     transcript: None,
    ///     audio_url: String::new(),
    ///     duration: 2700,
    ///     published_at: "2025-03-08".to_string(),
    ///     artwork: "fattal.png".to_string(),
    ///     artwork_position: None,
    ///     guests: Vec::new(),
    ///     topics: Vec::new(),
    ///     chapters: Vec::new(),
    ///     featured: false,
    /// };
    /// assert_eq!(ep.to_display(), "Ep 2 - From Vision to Reality");
    /// assert_eq!(ep.duration_display(), "45 min");
    /// assert_eq!(ep.published_display(), "March 8, 2025");
    /// ```
    pub fn to_display(&self) -> String {
        format!("Ep {} - {}", self.episode_number, self.title)
    }

    /// Names of all guests, in listing order.
    pub fn guest_names(&self) -> Vec<String> {
        self.guests.iter().map(|g| g.name.clone()).collect()
    }

    /// Route of the episode detail page.
    pub fn route(&self) -> String {
        format!("/episodes/{}", self.slug)
    }

    /// Duration rounded down to whole minutes.
    pub fn duration_display(&self) -> String {
        format!("{} min", self.duration / 60)
    }

    /// Publication date in long form. Falls back to the raw value when it
    /// is not a valid date.
    pub fn published_display(&self) -> String {
        format_date(&self.published_at).unwrap_or_else(|| self.published_at.clone())
    }
}

/// Format a `YYYY-MM-DD` date or an RFC 3339 timestamp as `March 1, 2025`.
fn format_date(date: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))?;
    Some(day.format("%B %-d, %Y").to_string())
}

/// Kind of a carousel slide descriptor.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Hero,
    Episode,
    Show,
    About,
    Contact,
}

/// A slide descriptor as authored in the dataset.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlideDescriptor {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: SlideKind,

    #[serde(default)]
    pub category: Option<String>,

    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    pub background_image: String,

    #[serde(default)]
    pub secondary_image: Option<String>,

    #[serde(default)]
    pub cta_text: Option<String>,

    #[serde(default)]
    pub cta_link: Option<String>,
}

/// A podcast host shown on the about page.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Host {
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// The complete in-memory dataset.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default)]
    pub slides: Vec<SlideDescriptor>,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl Dataset {
    /// First slide descriptor of the given kind.
    pub fn find_slide(&self, kind: SlideKind) -> Option<&SlideDescriptor> {
        self.slides.iter().find(|s| s.kind == kind)
    }

    /// Episodes sorted by episode number, ties in dataset order.
    pub fn sorted_episodes(&self) -> Vec<Episode> {
        let mut episodes = self.episodes.clone();
        episodes.sort_by_key(|e| e.episode_number);
        episodes
    }

    pub fn episode_by_slug(&self, slug: &str) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.slug == slug)
    }

    pub fn series_by_slug(&self, slug: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.slug == slug)
    }

    /// Series an episode belongs to.
    pub fn series_for(&self, episode: &Episode) -> Option<&Series> {
        self.series.iter().find(|s| s.id == episode.series_id)
    }
}
