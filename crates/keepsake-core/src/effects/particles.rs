//! Ambient particle field
//!
//! Fills a background container with drifting dots. The CSS animation does
//! the motion; each particle only carries randomized geometry and timing,
//! with a negative delay so the loops start out of phase.

use rand::Rng;

use super::{css_num, uniform};
use crate::config::ParticleConfig;
use crate::dom::{Document, NodeId, Tag};

/// Randomized geometry and timing of one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    /// Width and height in px
    pub size: f64,
    /// Horizontal position in percent
    pub left: f64,
    /// Vertical position in percent
    pub top: f64,
    /// Animation duration in seconds
    pub duration: f64,
    /// Animation delay in seconds, always <= 0
    pub delay: f64,
}

impl ParticleSpec {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, cfg: &ParticleConfig) -> Self {
        Self {
            size: uniform(rng, cfg.min_size, cfg.max_size),
            left: uniform(rng, 0.0, 100.0),
            top: uniform(rng, 0.0, 100.0),
            duration: uniform(rng, cfg.min_duration_secs, cfg.max_duration_secs),
            delay: -uniform(rng, 0.0, cfg.max_delay_secs),
        }
    }

    /// Write the sample onto a node as inline styles
    pub fn apply(&self, doc: &mut Document, node: NodeId) {
        let size = format!("{}px", css_num(self.size));
        doc.set_style(node, "width", size.clone());
        doc.set_style(node, "height", size);
        doc.set_style(node, "left", format!("{}%", css_num(self.left)));
        doc.set_style(node, "top", format!("{}%", css_num(self.top)));
        doc.set_style(node, "animation-duration", format!("{}s", css_num(self.duration)));
        doc.set_style(node, "animation-delay", format!("{}s", css_num(self.delay)));
    }
}

/// The `#bg-particles` container
#[derive(Debug, Clone)]
pub struct ParticleField {
    container: NodeId,
    particles: Vec<NodeId>,
}

impl ParticleField {
    /// Append `cfg.count` particles to `container`
    pub fn populate<R: Rng + ?Sized>(
        doc: &mut Document,
        container: NodeId,
        rng: &mut R,
        cfg: &ParticleConfig,
    ) -> Self {
        let particles = (0..cfg.count)
            .map(|_| {
                let node = doc.append_element(container, Tag::Div, &["particle"]);
                ParticleSpec::sample(rng, cfg).apply(doc, node);
                node
            })
            .collect::<Vec<_>>();

        tracing::debug!("Populated {} particles", particles.len());
        Self {
            container,
            particles,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn particles(&self) -> &[NodeId] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spec_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let cfg = ParticleConfig::default();
        for _ in 0..500 {
            let spec = ParticleSpec::sample(&mut rng, &cfg);
            assert!((1.0..4.0).contains(&spec.size));
            assert!((0.0..100.0).contains(&spec.left));
            assert!((0.0..100.0).contains(&spec.top));
            assert!((10.0..30.0).contains(&spec.duration));
            assert!(spec.delay <= 0.0 && spec.delay > -20.0);
        }
    }

    #[test]
    fn test_populate_fixed_count() {
        let mut doc = Document::new();
        let bg = doc.append_element(doc.root(), Tag::Div, &[]);
        let mut rng = StdRng::seed_from_u64(1);

        let field = ParticleField::populate(&mut doc, bg, &mut rng, &ParticleConfig::default());

        assert_eq!(field.particles().len(), 50);
        assert_eq!(doc.children(bg).len(), 50);
        for p in field.particles() {
            assert!(doc.has_class(*p, "particle"));
            assert_eq!(doc.style(*p, "width"), doc.style(*p, "height"));
            assert!(doc.style(*p, "animation-delay").is_some_and(|d| d.ends_with('s')));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let cfg = ParticleConfig::default();
        let render = |seed| {
            let mut doc = Document::new();
            let bg = doc.append_element(doc.root(), Tag::Div, &[]);
            ParticleField::populate(&mut doc, bg, &mut StdRng::seed_from_u64(seed), &cfg);
            doc.render_tree()
        };
        assert_eq!(render(9), render(9));
        assert_ne!(render(9), render(10));
    }
}
