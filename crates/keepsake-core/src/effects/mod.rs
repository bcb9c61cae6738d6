//! Page effects.
//!
//! Each effect is an independent component wired to explicit node ids.
//! None of them fail: a component whose markers are missing is simply
//! never constructed (see [`crate::page::Page::mount`]).

pub mod audio;
pub mod counter;
pub mod gallery;
pub mod particles;
pub mod popup;
pub mod reveal;
pub mod surprise;
pub mod tilt;

use rand::Rng;

use crate::dom::NodeId;

/// Work an effect defers to the page scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Staggered scroll reveal of one element
    Reveal(NodeId),
    /// End of life for a burst heart or popup message
    Remove(NodeId),
    /// Per-second counter refresh
    CounterTick,
    /// Final message of the heartbeat surprise
    Finale,
}

/// Uniform sample in `[min, max)`; degenerate ranges return `min`
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    min + rng.random::<f64>() * (max - min)
}

/// Format a number for inline CSS without trailing noise
pub(crate) fn css_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = uniform(&mut rng, -5.0, 5.0);
            assert!((-5.0..5.0).contains(&v));
        }
        assert_eq!(uniform(&mut rng, 3.0, 3.0), 3.0);
    }

    #[test]
    fn test_css_num() {
        assert_eq!(css_num(2.0), "2");
        assert_eq!(css_num(1.23456), "1.235");
        assert_eq!(css_num(-0.0001), "0");
    }
}
