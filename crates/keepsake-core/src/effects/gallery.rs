//! Gallery shuffle
//!
//! Re-deals the photo cards of a gallery in a random order, each at a small
//! random angle, like prints scattered on a table.

use rand::Rng;

use super::{css_num, uniform};
use crate::config::GalleryConfig;
use crate::dom::{Document, NodeId};

/// Unbiased in-place Fisher-Yates shuffle
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// A gallery container and its shuffle trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gallery {
    container: NodeId,
    trigger: NodeId,
}

impl Gallery {
    pub fn new(container: NodeId, trigger: NodeId) -> Self {
        Self { container, trigger }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    /// Permute the container's children and give each a fresh rotation.
    ///
    /// Returns the new child order paired with the rotation in degrees.
    pub fn shuffle<R: Rng + ?Sized>(
        &self,
        doc: &mut Document,
        rng: &mut R,
        cfg: &GalleryConfig,
    ) -> Vec<(NodeId, f64)> {
        let mut cards = doc.children(self.container).to_vec();
        fisher_yates(&mut cards, rng);

        let max = cfg.max_rotation_deg;
        let dealt = cards
            .into_iter()
            .map(|card| {
                let rotation = uniform(rng, -max, max);
                doc.set_style(card, "transform", format!("rotate({}deg)", css_num(rotation)));
                doc.append_child(self.container, card);
                (card, rotation)
            })
            .collect::<Vec<_>>();

        tracing::debug!("Shuffled {} gallery cards", dealt.len());
        dealt
    }
}
