//! Slide catalog construction.
//!
//! A catalog is the ordered, fixed-length sequence shown by one carousel
//! mount: every episode sorted by episode number, then the about slide, then
//! the contact slide.

use crate::error::{AppError, Result};
use crate::types::{Dataset, Episode, SlideDescriptor, SlideKind};
use log::debug;
use std::collections::HashSet;

/// A labelled link target attached to a slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallToAction {
    pub label: String,
    pub target: String,
}

impl CallToAction {
    /// Both label and target must be present.
    fn from_parts(label: Option<&String>, target: Option<&String>) -> Option<Self> {
        match (label, target) {
            (Some(label), Some(target)) => Some(Self {
                label: label.clone(),
                target: target.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeSlide {
    pub id: String,
    pub episode_id: String,
    pub episode_number: i64,
    pub title: String,
    pub guest_names: Vec<String>,
    pub artwork: String,
    /// Horizontal crop anchor of the artwork, centered when absent.
    pub artwork_anchor: Option<String>,
    pub cta_target: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AboutSlide {
    pub id: String,
    pub category: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub background: String,
    pub secondary_background: Option<String>,
    pub cta: Option<CallToAction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactSlide {
    pub id: String,
    pub category: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub background: String,
    pub cta: Option<CallToAction>,
}

/// One unit of the sequenced presentation.
#[derive(Clone, Debug, PartialEq)]
pub enum Slide {
    Episode(EpisodeSlide),
    About(AboutSlide),
    Contact(ContactSlide),
}

impl Slide {
    pub fn id(&self) -> &str {
        match self {
            Slide::Episode(s) => &s.id,
            Slide::About(s) => &s.id,
            Slide::Contact(s) => &s.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Slide::Episode(s) => &s.title,
            Slide::About(s) => &s.title,
            Slide::Contact(s) => &s.title,
        }
    }

    /// Target activated from the slide, if any.
    pub fn cta_target(&self) -> Option<&str> {
        match self {
            Slide::Episode(s) => Some(&s.cta_target),
            Slide::About(s) => s.cta.as_ref().map(|c| c.target.as_str()),
            Slide::Contact(s) => s.cta.as_ref().map(|c| c.target.as_str()),
        }
    }

    fn label(&self, style: LabelStyle) -> String {
        match (self, style) {
            (Slide::Episode(s), LabelStyle::Numbered) => format!("Episode {}", s.episode_number),
            (Slide::Episode(s), LabelStyle::Category) => s.title.clone(),
            (Slide::About(_), LabelStyle::Numbered) => "About".to_string(),
            (Slide::Contact(_), LabelStyle::Numbered) => "Contact".to_string(),
            (Slide::About(s), LabelStyle::Category) => {
                s.category.clone().unwrap_or_else(|| s.title.clone())
            }
            (Slide::Contact(s), LabelStyle::Category) => {
                s.category.clone().unwrap_or_else(|| s.title.clone())
            }
        }
    }
}

/// How sidebar labels are derived from slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelStyle {
    /// `Episode <n>`, `About`, `Contact`
    Numbered,
    /// Descriptor category, falling back to the title
    Category,
}

/// The ordered slide sequence for one carousel mount.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    slides: Vec<Slide>,
    labels: Vec<String>,
}

impl Catalog {
    /// Build the sequence `[episodes by number..., about, contact]`.
    ///
    /// Fails without producing a partial catalog when the about or contact
    /// anchor is missing or of the wrong kind, or when two slides share an id.
    pub fn build(
        episodes: &[Episode],
        about: Option<&SlideDescriptor>,
        contact: Option<&SlideDescriptor>,
        style: LabelStyle,
    ) -> Result<Self> {
        let about = require(about, SlideKind::About, "about")?;
        let contact = require(contact, SlideKind::Contact, "contact")?;

        let mut sorted: Vec<&Episode> = episodes.iter().collect();
        sorted.sort_by_key(|e| e.episode_number);

        let mut slides: Vec<Slide> = Vec::with_capacity(sorted.len() + 2);
        slides.extend(sorted.into_iter().map(|e| {
            Slide::Episode(EpisodeSlide {
                id: format!("episode-{}", e.id),
                episode_id: e.id.clone(),
                episode_number: e.episode_number,
                title: e.title.clone(),
                guest_names: e.guest_names(),
                artwork: e.artwork.clone(),
                artwork_anchor: e.artwork_position.clone(),
                cta_target: e.route(),
            })
        }));
        slides.push(Slide::About(AboutSlide {
            id: about.id.clone(),
            category: about.category.clone(),
            title: about.title.clone(),
            subtitle: about.subtitle.clone(),
            background: about.background_image.clone(),
            secondary_background: about.secondary_image.clone(),
            cta: CallToAction::from_parts(about.cta_text.as_ref(), about.cta_link.as_ref()),
        }));
        slides.push(Slide::Contact(ContactSlide {
            id: contact.id.clone(),
            category: contact.category.clone(),
            title: contact.title.clone(),
            subtitle: contact.subtitle.clone(),
            background: contact.background_image.clone(),
            cta: CallToAction::from_parts(contact.cta_text.as_ref(), contact.cta_link.as_ref()),
        }));

        let mut seen = HashSet::new();
        for slide in &slides {
            if !seen.insert(slide.id()) {
                return Err(AppError::MalformedCatalog(format!(
                    "duplicate slide id '{}'",
                    slide.id()
                )));
            }
        }

        let labels = slides.iter().map(|s| s.label(style)).collect();
        debug!("Built catalog with {} slides", slides.len());
        Ok(Self { slides, labels })
    }

    /// Build from the first about and contact descriptors of a dataset.
    pub fn from_dataset(dataset: &Dataset, style: LabelStyle) -> Result<Self> {
        Self::build(
            &dataset.episodes,
            dataset.find_slide(SlideKind::About),
            dataset.find_slide(SlideKind::Contact),
            style,
        )
    }

    /// Number of slides, never below two.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of episode slides.
    pub fn episode_count(&self) -> usize {
        self.slides.len() - 2
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id() == id)
    }
}

fn require<'a>(
    descriptor: Option<&'a SlideDescriptor>,
    kind: SlideKind,
    name: &str,
) -> Result<&'a SlideDescriptor> {
    match descriptor {
        None => Err(AppError::MalformedCatalog(format!("missing {} slide", name))),
        Some(d) if d.kind != kind => Err(AppError::MalformedCatalog(format!(
            "{} slide '{}' has kind {:?}",
            name, d.id, d.kind
        ))),
        Some(d) => Ok(d),
    }
}
