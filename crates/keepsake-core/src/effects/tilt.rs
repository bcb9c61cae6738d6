//! Card tilt, glare and heart bursts
//!
//! A tilt card follows the pointer with a 3D rotation and moves a glare
//! highlight via the `--mouse-x` / `--mouse-y` custom properties. Clicking
//! it releases a short burst of floating hearts.

use std::time::Duration;

use rand::Rng;

use super::{css_num, uniform, Deferred};
use crate::config::{BurstConfig, TiltConfig};
use crate::dom::{Document, NodeId, Point, Rect, Tag};
use crate::timer::Scheduler;

pub const GLARE_CLASS: &str = "card-glare";

/// Pointer-driven rotation of one card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Rotation around the horizontal axis, degrees (pointer below centre tilts negative)
    pub rotate_x: f64,
    /// Rotation around the vertical axis, degrees
    pub rotate_y: f64,
    /// Pointer position across the card, percent
    pub mouse_x: f64,
    /// Pointer position down the card, percent
    pub mouse_y: f64,
}

impl Tilt {
    pub const NEUTRAL: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
        mouse_x: 50.0,
        mouse_y: 50.0,
    };

    /// Rotation for a pointer at client position `point` over a card at `rect`
    pub fn from_pointer(rect: Rect, point: Point, cfg: &TiltConfig) -> Self {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Self::NEUTRAL;
        }
        let x = point.x - rect.left;
        let y = point.y - rect.top;
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;
        let max = cfg.max_deg;

        Self {
            rotate_x: ((y - center_y) / center_y * -max).clamp(-max, max),
            rotate_y: ((x - center_x) / center_x * max).clamp(-max, max),
            mouse_x: x / rect.width * 100.0,
            mouse_y: y / rect.height * 100.0,
        }
    }

    pub fn transform(&self, cfg: &TiltConfig) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            css_num(cfg.perspective_px),
            css_num(self.rotate_x),
            css_num(self.rotate_y),
            s = css_num(cfg.hover_scale),
        )
    }
}

/// Transform of a card at rest
pub fn neutral_transform(cfg: &TiltConfig) -> String {
    format!(
        "perspective({}px) rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)",
        css_num(cfg.perspective_px)
    )
}

/// One interactive card and its glare overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltCard {
    card: NodeId,
    glare: NodeId,
}

impl TiltCard {
    /// Wire up a card, adding a glare overlay unless it already has one
    pub fn attach(doc: &mut Document, card: NodeId) -> Self {
        let glare = match doc.query_class_within(card, GLARE_CLASS).first() {
            Some(existing) => *existing,
            None => doc.append_element(card, Tag::Div, &[GLARE_CLASS]),
        };
        Self { card, glare }
    }

    pub fn card(&self) -> NodeId {
        self.card
    }

    pub fn glare(&self) -> NodeId {
        self.glare
    }

    pub fn on_move(&self, doc: &mut Document, rect: Rect, point: Point, cfg: &TiltConfig) -> Tilt {
        let tilt = Tilt::from_pointer(rect, point, cfg);
        doc.set_style(self.card, "transform", tilt.transform(cfg));
        doc.set_style(self.card, "--mouse-x", format!("{}%", css_num(tilt.mouse_x)));
        doc.set_style(self.card, "--mouse-y", format!("{}%", css_num(tilt.mouse_y)));
        tilt
    }

    pub fn on_leave(&self, doc: &mut Document, cfg: &TiltConfig) {
        doc.set_style(self.card, "transform", neutral_transform(cfg));
    }
}

/// Randomized placement of one burst heart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartSpec {
    pub left: f64,
    pub top: f64,
    pub scale_rem: f64,
    pub duration: f64,
}

impl HeartSpec {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, origin: Point, cfg: &BurstConfig) -> Self {
        let half = cfg.spread_px / 2.0;
        Self {
            left: origin.x + uniform(rng, -half, half),
            top: origin.y + uniform(rng, -half, half),
            scale_rem: uniform(rng, cfg.min_scale_rem, cfg.max_scale_rem),
            duration: uniform(rng, cfg.min_duration_secs, cfg.max_duration_secs),
        }
    }
}

/// Short-lived hearts released at a click
pub struct HeartBurst;

impl HeartBurst {
    /// Append `cfg.count` hearts to `layer`, each with its own removal timer
    pub fn spawn<R: Rng + ?Sized>(
        doc: &mut Document,
        layer: NodeId,
        origin: Point,
        rng: &mut R,
        scheduler: &mut Scheduler<Deferred>,
        cfg: &BurstConfig,
    ) -> Vec<NodeId> {
        let lifetime = Duration::from_millis(cfg.lifetime_ms);
        (0..cfg.count)
            .map(|_| {
                let spec = HeartSpec::sample(rng, origin, cfg);
                let heart = doc.append_element(layer, Tag::Div, &["float-heart"]);
                doc.set_text(heart, cfg.glyph.clone());
                doc.set_style(heart, "left", format!("{}px", css_num(spec.left)));
                doc.set_style(heart, "top", format!("{}px", css_num(spec.top)));
                doc.set_style(heart, "font-size", format!("{}rem", css_num(spec.scale_rem)));
                doc.set_style(heart, "animation-duration", format!("{}s", css_num(spec.duration)));
                scheduler.schedule_after(lifetime, Deferred::Remove(heart));
                heart
            })
            .collect()
    }
}
