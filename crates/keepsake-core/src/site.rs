//! Page templates.
//!
//! Builds the document for each page of the site from [`SiteConfig`]
//! content. The templates only lay out marker elements; which effects run
//! is decided later by [`crate::page::Page::mount`] from what it finds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::dom::{Document, NodeId, Tag};
use crate::error::KeepsakeError;

/// The pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    Moments,
    Songs,
    Pop,
    Surprise,
    Reasons,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        PageKind::Home,
        PageKind::Moments,
        PageKind::Songs,
        PageKind::Pop,
        PageKind::Surprise,
        PageKind::Reasons,
    ];

    /// Lowercase identifier used in routes and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Moments => "moments",
            PageKind::Songs => "songs",
            PageKind::Pop => "pop",
            PageKind::Surprise => "surprise",
            PageKind::Reasons => "reasons",
        }
    }

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            PageKind::Home => "Home",
            PageKind::Moments => "Moments",
            PageKind::Songs => "Our Songs",
            PageKind::Pop => "Pop",
            PageKind::Surprise => "Surprise",
            PageKind::Reasons => "Reasons",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PageKind {
    type Err = KeepsakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PageKind::ALL
            .into_iter()
            .find(|k| k.slug() == wanted)
            .ok_or_else(|| KeepsakeError::UnknownPage(s.to_string()))
    }
}

fn text_el(doc: &mut Document, parent: NodeId, tag: Tag, classes: &[&str], text: &str) -> NodeId {
    let id = doc.append_element(parent, tag, classes);
    doc.set_text(id, text);
    id
}

/// Build the document for one page
pub fn build(kind: PageKind, config: &SiteConfig) -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let bg = doc.append_element(root, Tag::Div, &[]);
    doc.set_element_id(bg, "bg-particles");

    let page_class = format!("page--{}", kind.slug());
    let main = doc.append_element(root, Tag::Main, &["page", page_class.as_str()]);
    match kind {
        PageKind::Home => build_home(&mut doc, main, config),
        PageKind::Moments => build_moments(&mut doc, main, config),
        PageKind::Songs => build_songs(&mut doc, main, config),
        PageKind::Pop => build_pop(&mut doc, main),
        PageKind::Surprise => build_surprise(&mut doc, main, config),
        PageKind::Reasons => build_reasons(&mut doc, main, config),
    }
    doc
}

fn build_home(doc: &mut Document, main: NodeId, config: &SiteConfig) {
    let hero = doc.append_element(main, Tag::Section, &["hero", "hidden"]);
    text_el(doc, hero, Tag::Heading, &["hero-title"], &config.title);
    text_el(doc, hero, Tag::Paragraph, &["hero-tagline"], &config.tagline);

    let teasers = [
        (PageKind::Moments, "Every second since the day it started."),
        (PageKind::Songs, "The soundtrack of us."),
        (PageKind::Reasons, "A few of the endless reasons."),
        (PageKind::Surprise, "One more thing..."),
    ];
    for (kind, blurb) in teasers {
        let section = doc.append_element(main, Tag::Section, &["teaser", "hidden"]);
        doc.set_data(section, "page", kind.slug());
        text_el(doc, section, Tag::Heading, &["teaser-title"], kind.label());
        text_el(doc, section, Tag::Paragraph, &["teaser-blurb"], blurb);
    }
}

fn build_moments(doc: &mut Document, main: NodeId, config: &SiteConfig) {
    let countdown = doc.append_element(main, Tag::Section, &["countdown", "hidden"]);
    text_el(doc, countdown, Tag::Heading, &["countdown-title"], "Together for");
    let grid = doc.append_element(countdown, Tag::Div, &["countdown-grid"]);
    for (id, label, initial) in [
        ("days", "days", "0"),
        ("hours", "hours", "00"),
        ("minutes", "minutes", "00"),
        ("seconds", "seconds", "00"),
    ] {
        let unit = doc.append_element(grid, Tag::Div, &["countdown-unit"]);
        let value = text_el(doc, unit, Tag::Span, &["countdown-value"], initial);
        doc.set_element_id(value, id);
        text_el(doc, unit, Tag::Span, &["countdown-label"], label);
    }

    let moments = doc.append_element(main, Tag::Section, &["moments", "hidden"]);
    let button = text_el(doc, moments, Tag::Button, &["shuffle-btn"], "Shuffle");
    doc.set_element_id(button, "shuffle-btn");
    let gallery = doc.append_element(moments, Tag::Div, &["gallery-container"]);
    for moment in &config.moments {
        let card = doc.append_element(gallery, Tag::Div, &["polaroid"]);
        let photo = doc.append_element(card, Tag::Div, &["polaroid-photo"]);
        if let Some(image) = &moment.image {
            doc.set_style(photo, "background-image", format!("url('{}')", image));
        }
        text_el(doc, card, Tag::Paragraph, &["polaroid-caption"], &moment.caption);
    }
}

fn build_songs(doc: &mut Document, main: NodeId, config: &SiteConfig) {
    text_el(doc, main, Tag::Heading, &["page-title"], "Our Songs");
    let grid = doc.append_element(main, Tag::Section, &["song-grid"]);
    for song in &config.songs {
        let card = doc.append_element(grid, Tag::Div, &["song-card", "hidden"]);
        doc.set_data(card, "src", song.src.clone());
        text_el(doc, card, Tag::Span, &["song-icon"], "\u{266B}");
        text_el(doc, card, Tag::Heading, &["song-title"], &song.title);
        if let Some(artist) = &song.artist {
            text_el(doc, card, Tag::Paragraph, &["song-artist"], artist);
        }
    }
}

fn build_pop(doc: &mut Document, main: NodeId) {
    let area = doc.append_element(main, Tag::Section, &["pop-area"]);
    text_el(doc, area, Tag::Heading, &["pop-title"], "Tap anywhere");
    text_el(doc, area, Tag::Paragraph, &["pop-hint"], "Every tap has something to say.");
}

fn build_surprise(doc: &mut Document, main: NodeId, config: &SiteConfig) {
    let stage = doc.append_element(main, Tag::Section, &["surprise"]);
    let heart = text_el(doc, stage, Tag::Div, &["heartbeat"], "\u{2764}");
    doc.set_element_id(heart, "heartbeat");
    text_el(doc, stage, Tag::Paragraph, &["surprise-hint"], "Click the heart");
    let final_msg = doc.append_element(stage, Tag::Div, &["final-msg", "hidden"]);
    doc.set_element_id(final_msg, "final-msg");
    text_el(doc, final_msg, Tag::Heading, &["final-title"], &config.surprise.final_message);
}

fn build_reasons(doc: &mut Document, main: NodeId, config: &SiteConfig) {
    text_el(doc, main, Tag::Heading, &["page-title"], "Reasons");
    let grid = doc.append_element(main, Tag::Section, &["reasons-grid"]);
    for (i, reason) in config.reasons.iter().enumerate() {
        let card = doc.append_element(grid, Tag::Div, &["reason-card"]);
        text_el(doc, card, Tag::Span, &["reason-number"], &format!("{:02}", i + 1));
        text_el(doc, card, Tag::Paragraph, &["reason-text"], reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_kind_parse() {
        assert_eq!("moments".parse::<PageKind>().unwrap(), PageKind::Moments);
        assert_eq!(" Songs ".parse::<PageKind>().unwrap(), PageKind::Songs);
        assert!(matches!(
            "nope".parse::<PageKind>(),
            Err(KeepsakeError::UnknownPage(_))
        ));
        for kind in PageKind::ALL {
            assert_eq!(kind.to_string().parse::<PageKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_every_page_has_particle_container() {
        let config = SiteConfig::default();
        for kind in PageKind::ALL {
            let doc = build(kind, &config);
            assert!(doc.get_by_id("bg-particles").is_some(), "{}", kind);
        }
    }

    #[test]
    fn test_moments_markers() {
        let config = SiteConfig::default();
        let doc = build(PageKind::Moments, &config);
        for id in ["days", "hours", "minutes", "seconds", "shuffle-btn"] {
            assert!(doc.get_by_id(id).is_some(), "missing #{}", id);
        }
        let gallery = doc.query_class("gallery-container")[0];
        assert_eq!(doc.children(gallery).len(), config.moments.len());
    }

    #[test]
    fn test_songs_carry_sources() {
        let config = SiteConfig::default();
        let doc = build(PageKind::Songs, &config);
        let cards = doc.query_class("song-card");
        assert_eq!(cards.len(), config.songs.len());
        for (card, song) in cards.iter().zip(&config.songs) {
            assert_eq!(doc.data(*card, "src"), Some(song.src.as_str()));
        }
    }

    #[test]
    fn test_reasons_numbered() {
        let config = SiteConfig::default();
        let doc = build(PageKind::Reasons, &config);
        let numbers: Vec<_> = doc
            .query_class("reason-number")
            .into_iter()
            .filter_map(|id| doc.text(id).map(str::to_string))
            .collect();
        assert_eq!(numbers.first().map(String::as_str), Some("01"));
        assert_eq!(numbers.len(), config.reasons.len());
    }

    #[test]
    fn test_surprise_markers() {
        let doc = build(PageKind::Surprise, &SiteConfig::default());
        let msg = doc.get_by_id("final-msg").unwrap();
        assert!(doc.has_class(msg, "hidden"));
        assert!(doc.get_by_id("heartbeat").is_some());
    }
}
