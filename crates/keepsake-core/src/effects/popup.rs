//! Click-triggered popup messages

use std::time::Duration;

use rand::Rng;

use super::{css_num, uniform, Deferred};
use crate::config::PopupConfig;
use crate::dom::{Document, NodeId, Point, Tag};
use crate::timer::Scheduler;

/// The `.pop-area` click surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopArea {
    area: NodeId,
}

impl PopArea {
    pub fn new(area: NodeId) -> Self {
        Self { area }
    }

    pub fn area(&self) -> NodeId {
        self.area
    }

    /// Spawn one message at the pointer. Returns `None` if there are no messages.
    pub fn on_click<R: Rng + ?Sized>(
        &self,
        doc: &mut Document,
        point: Point,
        rng: &mut R,
        scheduler: &mut Scheduler<Deferred>,
        cfg: &PopupConfig,
    ) -> Option<NodeId> {
        if cfg.messages.is_empty() {
            return None;
        }
        let text = &cfg.messages[rng.random_range(0..cfg.messages.len())];
        let rotation = uniform(rng, -cfg.max_rotation_deg, cfg.max_rotation_deg);

        let msg = doc.append_element(self.area, Tag::Div, &["pop-msg"]);
        doc.set_text(msg, text.clone());
        doc.set_style(msg, "--rnd-rot", format!("{}deg", css_num(rotation)));
        doc.set_style(msg, "left", format!("{}px", css_num(point.x)));
        doc.set_style(msg, "top", format!("{}px", css_num(point.y)));

        scheduler.schedule_after(Duration::from_millis(cfg.lifetime_ms), Deferred::Remove(msg));
        Some(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_popup_placed_and_expires() {
        let mut doc = Document::new();
        let area_id = doc.append_element(doc.root(), Tag::Div, &["pop-area"]);
        let area = PopArea::new(area_id);
        let mut sched = Scheduler::new();
        let mut rng = StdRng::seed_from_u64(8);
        let cfg = PopupConfig::default();

        let msg = area
            .on_click(&mut doc, Point::new(120.0, 80.0), &mut rng, &mut sched, &cfg)
            .unwrap();

        assert_eq!(doc.parent(msg), Some(area_id));
        assert_eq!(doc.style(msg, "left"), Some("120px"));
        assert_eq!(doc.style(msg, "top"), Some("80px"));
        let text = doc.text(msg).unwrap();
        assert!(cfg.messages.iter().any(|m| m == text));

        let fired = sched.advance_to(Duration::from_millis(2000));
        assert_eq!(fired[0].1, Deferred::Remove(msg));
    }

    #[test]
    fn test_rotation_within_bounds() {
        let mut doc = Document::new();
        let area = PopArea::new(doc.append_element(doc.root(), Tag::Div, &["pop-area"]));
        let mut sched = Scheduler::new();
        let mut rng = StdRng::seed_from_u64(21);
        let cfg = PopupConfig::default();

        for _ in 0..200 {
            let msg = area
                .on_click(&mut doc, Point::default(), &mut rng, &mut sched, &cfg)
                .unwrap();
            let rot = doc.style(msg, "--rnd-rot").unwrap();
            let deg: f64 = rot.trim_end_matches("deg").parse().unwrap();
            assert!((-10.0..=10.0).contains(&deg));
        }
    }

    #[test]
    fn test_no_messages_no_popup() {
        let mut doc = Document::new();
        let area = PopArea::new(doc.append_element(doc.root(), Tag::Div, &["pop-area"]));
        let mut sched = Scheduler::new();
        let mut rng = StdRng::seed_from_u64(1);
        let cfg = PopupConfig {
            messages: vec![],
            ..PopupConfig::default()
        };

        assert!(area
            .on_click(&mut doc, Point::default(), &mut rng, &mut sched, &cfg)
            .is_none());
        assert!(!sched.has_pending());
    }
}
