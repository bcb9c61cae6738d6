//! Scroll-reveal controller
//!
//! Elements start hidden and fade in the first time they scroll into view.
//! Reveals are one-shot: once an element has been acted on it is no longer
//! observed, and later intersection entries for it change nothing.

use std::collections::BTreeSet;
use std::time::Duration;

use rand::Rng;

use super::Deferred;
use crate::config::RevealOptions;
use crate::dom::{Document, NodeId, Rect};
use crate::timer::Scheduler;

/// Marker for elements that get the extra `revealed` class
pub const CARD_CLASS: &str = "reason-card";

/// One observation of an element against the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    /// Visible fraction of the element, 0.0..=1.0
    pub ratio: f64,
}

/// Viewport size, for hosts without a native intersection observer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Compute the entry for an element whose client box is `rect`.
    ///
    /// The viewport's bottom edge is pulled up by the configured root margin,
    /// matching `rootMargin: "0px 0px -Npx 0px"`.
    pub fn entry_for(&self, target: NodeId, rect: Rect, opts: &RevealOptions) -> IntersectionEntry {
        let root = Rect::new(
            0.0,
            0.0,
            self.width,
            (self.height - opts.root_margin_bottom_px).max(0.0),
        );
        let (is_intersecting, ratio) = if rect.area() == 0.0 {
            let inside = rect.left >= root.left
                && rect.left <= root.right()
                && rect.top >= root.top
                && rect.top <= root.bottom();
            (inside, if inside { 1.0 } else { 0.0 })
        } else {
            match rect.intersection(&root) {
                Some(overlap) => (true, (overlap.area() / rect.area()).clamp(0.0, 1.0)),
                None => (false, 0.0),
            }
        };
        IntersectionEntry {
            target,
            is_intersecting,
            ratio,
        }
    }
}

/// Tracks which elements still wait for their reveal
#[derive(Debug, Clone)]
pub struct RevealController {
    options: RevealOptions,
    observed: BTreeSet<NodeId>,
}

impl RevealController {
    pub fn new(options: RevealOptions) -> Self {
        Self {
            options,
            observed: BTreeSet::new(),
        }
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    pub fn observe(&mut self, id: NodeId) {
        self.observed.insert(id);
    }

    pub fn unobserve(&mut self, id: NodeId) -> bool {
        self.observed.remove(&id)
    }

    pub fn is_observed(&self, id: NodeId) -> bool {
        self.observed.contains(&id)
    }

    /// Elements still waiting, in id order
    pub fn observed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.observed.iter().copied()
    }

    /// Handle one intersection entry. Returns true if a reveal was scheduled.
    pub fn on_intersection<R: Rng + ?Sized>(
        &mut self,
        doc: &mut Document,
        entry: IntersectionEntry,
        rng: &mut R,
        scheduler: &mut Scheduler<Deferred>,
    ) -> bool {
        if !entry.is_intersecting || entry.ratio < self.options.threshold {
            return false;
        }
        if !self.unobserve(entry.target) {
            return false;
        }

        let stagger = if self.options.max_stagger_ms == 0 {
            0
        } else {
            rng.random_range(0..self.options.max_stagger_ms)
        };
        scheduler.schedule_after(Duration::from_millis(stagger), Deferred::Reveal(entry.target));

        if doc.has_class(entry.target, CARD_CLASS) {
            doc.add_class(entry.target, "revealed");
        }
        tracing::debug!("Reveal of node {} scheduled in {}ms", entry.target, stagger);
        true
    }

    /// Deferred half of a reveal: swap `hidden` for `visible`
    pub fn reveal(doc: &mut Document, id: NodeId) {
        if !doc.is_connected(id) {
            return;
        }
        doc.add_class(id, "visible");
        doc.remove_class(id, "hidden");
    }
}
