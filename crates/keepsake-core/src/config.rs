//! Site configuration.
//!
//! Every tunable of the effects plus the page content lives here. Each
//! section defaults independently, so a JSON file only needs the keys it
//! wants to change:
//!
//! ```json
//! {
//!   "title": "Our Story",
//!   "counter": { "start": "2023-04-04T00:00:00" },
//!   "reveal": { "threshold": 0.1, "root_margin_bottom_px": 0 }
//! }
//! ```

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{KeepsakeError, KeepsakeResult};

/// Ambient particle field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Size range in px
    pub min_size: f64,
    pub max_size: f64,
    /// Animation duration range in seconds
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    /// Delays are drawn from (-max_delay_secs, 0]
    pub max_delay_secs: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            min_size: 1.0,
            max_size: 4.0,
            min_duration_secs: 10.0,
            max_duration_secs: 30.0,
            max_delay_secs: 20.0,
        }
    }
}

/// Scroll reveal observer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Fraction of the element that must be visible, 0.0..=1.0
    pub threshold: f64,
    /// The viewport's bottom edge is pulled up by this many px
    pub root_margin_bottom_px: f64,
    /// Reveals are staggered by a uniform delay in [0, max_stagger_ms)
    pub max_stagger_ms: u64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin_bottom_px: 50.0,
            max_stagger_ms: 200,
        }
    }
}

impl RevealOptions {
    /// CSS `rootMargin` string for a native IntersectionObserver
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.root_margin_bottom_px)
    }
}

/// Card tilt and glare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Rotation at the card edge, in degrees
    pub max_deg: f64,
    pub perspective_px: f64,
    pub hover_scale: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_deg: 10.0,
            perspective_px: 1000.0,
            hover_scale: 1.02,
        }
    }
}

/// Heart burst spawned by clicking a tilt card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub count: usize,
    pub glyph: String,
    /// Total spread per axis in px, centred on the click
    pub spread_px: f64,
    /// Font size range in rem
    pub min_scale_rem: f64,
    pub max_scale_rem: f64,
    /// Animation duration range in seconds
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub lifetime_ms: u64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 6,
            glyph: "\u{2764}".to_string(),
            spread_px: 60.0,
            min_scale_rem: 0.8,
            max_scale_rem: 1.3,
            min_duration_secs: 1.0,
            max_duration_secs: 1.5,
            lifetime_ms: 1500,
        }
    }
}

/// Gallery shuffle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Rotations are drawn from [-max_rotation_deg, max_rotation_deg)
    pub max_rotation_deg: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            max_rotation_deg: 5.0,
        }
    }
}

/// Elapsed-time counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Local wall-clock time the counter counts from
    pub start: NaiveDateTime,
    pub tick_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2023, 4, 4)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Self {
            start,
            tick_ms: 1000,
        }
    }
}

/// Click popups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    pub messages: Vec<String>,
    /// Rotations are drawn from [-max_rotation_deg, max_rotation_deg)
    pub max_rotation_deg: f64,
    pub lifetime_ms: u64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        let messages = [
            "You are my everything",
            "I choose you always",
            "You feel like home",
            "Forever starts with you",
            "My heart belongs to you",
            "Life is better with you",
            "I love your smile",
            "You are my dream come true",
        ];
        Self {
            messages: messages.iter().map(|m| m.to_string()).collect(),
            max_rotation_deg: 10.0,
            lifetime_ms: 2000,
        }
    }
}

/// Heartbeat surprise sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurpriseConfig {
    pub delay_ms: u64,
    pub burst_scale: f64,
    pub transition: String,
    /// Page background once the final message shows
    pub background: String,
    pub final_message: String,
}

impl Default for SurpriseConfig {
    fn default() -> Self {
        Self {
            delay_ms: 800,
            burst_scale: 50.0,
            transition: "all 1s ease".to_string(),
            background: "#200".to_string(),
            final_message: "Every day with you is my favourite day.".to_string(),
        }
    }
}

/// A photo card in the moments gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub caption: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A playable card on the songs page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    /// Audio source path handed to the playback backend
    pub src: String,
}

/// Everything a site needs: effect tunables and page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
    pub particles: ParticleConfig,
    pub reveal: RevealOptions,
    pub tilt: TiltConfig,
    pub burst: BurstConfig,
    pub gallery: GalleryConfig,
    pub counter: CounterConfig,
    pub popups: PopupConfig,
    pub surprise: SurpriseConfig,
    pub moments: Vec<Moment>,
    pub songs: Vec<Song>,
    pub reasons: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let moments = ["First date", "Beach sunset", "Rainy walk", "Birthday", "Road trip"]
            .iter()
            .map(|c| Moment {
                caption: c.to_string(),
                image: None,
            })
            .collect();
        let songs = vec![
            Song {
                title: "Our Song".to_string(),
                artist: None,
                src: "assets/songs/our-song.mp3".to_string(),
            },
            Song {
                title: "First Dance".to_string(),
                artist: None,
                src: "assets/songs/first-dance.mp3".to_string(),
            },
            Song {
                title: "Road Trip".to_string(),
                artist: None,
                src: "assets/songs/road-trip.mp3".to_string(),
            },
        ];
        let reasons = [
            "The way you laugh at your own jokes",
            "How you make ordinary days feel like adventures",
            "Your kindness to everyone you meet",
            "The way you hold my hand",
            "You believe in me",
            "Every little note you leave",
        ]
        .iter()
        .map(|r| r.to_string())
        .collect();

        Self {
            title: "Keepsake".to_string(),
            tagline: "a little place for us".to_string(),
            particles: ParticleConfig::default(),
            reveal: RevealOptions::default(),
            tilt: TiltConfig::default(),
            burst: BurstConfig::default(),
            gallery: GalleryConfig::default(),
            counter: CounterConfig::default(),
            popups: PopupConfig::default(),
            surprise: SurpriseConfig::default(),
            moments,
            songs,
            reasons,
        }
    }
}

impl SiteConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> KeepsakeResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&raw)?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json(raw: &str) -> KeepsakeResult<Self> {
        let config: SiteConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the effects cannot work with
    pub fn validate(&self) -> KeepsakeResult<()> {
        fn range(name: &str, min: f64, max: f64) -> KeepsakeResult<()> {
            if !(min.is_finite() && max.is_finite()) || min > max {
                return Err(KeepsakeError::InvalidConfig(format!(
                    "{} range is invalid: {}..{}",
                    name, min, max
                )));
            }
            Ok(())
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(KeepsakeError::InvalidConfig(format!(
                "reveal.threshold must be within 0..=1, got {}",
                self.reveal.threshold
            )));
        }
        if self.popups.messages.is_empty() {
            return Err(KeepsakeError::InvalidConfig(
                "popups.messages must not be empty".to_string(),
            ));
        }
        if self.counter.tick_ms == 0 {
            return Err(KeepsakeError::InvalidConfig(
                "counter.tick_ms must be positive".to_string(),
            ));
        }
        if self.burst.lifetime_ms == 0 || self.popups.lifetime_ms == 0 {
            return Err(KeepsakeError::InvalidConfig(
                "burst and popup lifetimes must be positive".to_string(),
            ));
        }
        range("particles.size", self.particles.min_size, self.particles.max_size)?;
        range(
            "particles.duration",
            self.particles.min_duration_secs,
            self.particles.max_duration_secs,
        )?;
        range("particles.delay", 0.0, self.particles.max_delay_secs)?;
        range("burst.scale", self.burst.min_scale_rem, self.burst.max_scale_rem)?;
        range(
            "burst.duration",
            self.burst.min_duration_secs,
            self.burst.max_duration_secs,
        )?;
        range("burst.spread", 0.0, self.burst.spread_px)?;
        range("tilt.max_deg", 0.0, self.tilt.max_deg)?;
        range("gallery.rotation", 0.0, self.gallery.max_rotation_deg)?;
        range("popups.rotation", 0.0, self.popups.max_rotation_deg)?;
        for song in &self.songs {
            if song.src.trim().is_empty() {
                return Err(KeepsakeError::InvalidConfig(format!(
                    "song '{}' has an empty src",
                    song.title
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SiteConfig::default();
        config.validate().unwrap();
        assert_eq!(config.particles.count, 50);
        assert_eq!(config.burst.count, 6);
        assert_eq!(config.popups.messages.len(), 8);
        assert_eq!(config.counter.start.to_string(), "2023-04-04 00:00:00");
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{ "reveal": { "threshold": 0.1 } }"#).unwrap();
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.max_stagger_ms, 200);
        assert_eq!(config.particles, ParticleConfig::default());
    }

    #[test]
    fn test_counter_start_parses() {
        let config =
            SiteConfig::from_json(r#"{ "counter": { "start": "2020-02-29T12:30:00" } }"#).unwrap();
        assert_eq!(config.counter.start.to_string(), "2020-02-29 12:30:00");
        assert_eq!(config.counter.tick_ms, 1000);
    }

    #[test]
    fn test_rejects_empty_messages() {
        let err = SiteConfig::from_json(r#"{ "popups": { "messages": [] } }"#).unwrap_err();
        assert!(matches!(err, KeepsakeError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        let err = SiteConfig::from_json(r#"{ "reveal": { "threshold": 1.5 } }"#).unwrap_err();
        assert!(err.to_string().contains("reveal.threshold"));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let json = r#"{ "particles": { "min_size": 5, "max_size": 1 } }"#;
        let err = SiteConfig::from_json(json).unwrap_err();
        assert!(err.to_string().contains("particles.size"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SiteConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, KeepsakeError::Json(_)));
    }

    #[test]
    fn test_root_margin_string() {
        assert_eq!(RevealOptions::default().root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, r#"{ "title": "Us" }"#).unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Us");
    }

    #[test]
    fn test_load_missing_file() {
        let err = SiteConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, KeepsakeError::Io(_)));
    }
}
