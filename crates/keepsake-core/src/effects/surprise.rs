//! Heartbeat surprise
//!
//! A pulsing heart that, when clicked once, bursts outward and fades, then
//! shows the final message and warms the page background.

use std::time::Duration;

use super::{css_num, Deferred};
use crate::config::SurpriseConfig;
use crate::dom::{Document, NodeId};
use crate::timer::Scheduler;

/// Progress of the one-shot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurpriseStage {
    Waiting,
    Bursting,
    Revealed,
}

#[derive(Debug, Clone)]
pub struct HeartbeatReveal {
    heart: NodeId,
    final_msg: NodeId,
    backdrop: NodeId,
    stage: SurpriseStage,
}

impl HeartbeatReveal {
    /// `backdrop` receives the background tint (the page root)
    pub fn new(heart: NodeId, final_msg: NodeId, backdrop: NodeId) -> Self {
        Self {
            heart,
            final_msg,
            backdrop,
            stage: SurpriseStage::Waiting,
        }
    }

    pub fn heart(&self) -> NodeId {
        self.heart
    }

    pub fn stage(&self) -> SurpriseStage {
        self.stage
    }

    /// Start the burst. Only the first click does anything.
    pub fn on_click(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler<Deferred>,
        cfg: &SurpriseConfig,
    ) -> bool {
        if self.stage != SurpriseStage::Waiting {
            return false;
        }
        doc.set_style(self.heart, "animation", "none");
        doc.set_style(self.heart, "transform", format!("scale({})", css_num(cfg.burst_scale)));
        doc.set_style(self.heart, "opacity", "0");
        doc.set_style(self.heart, "transition", cfg.transition.clone());
        scheduler.schedule_after(Duration::from_millis(cfg.delay_ms), Deferred::Finale);
        self.stage = SurpriseStage::Bursting;
        tracing::debug!("Heartbeat burst started");
        true
    }

    /// Deferred half: show the final message and tint the page
    pub fn finale(&mut self, doc: &mut Document, cfg: &SurpriseConfig) {
        if self.stage != SurpriseStage::Bursting {
            return;
        }
        doc.remove_class(self.final_msg, "hidden");
        doc.add_class(self.final_msg, "visible");
        doc.set_style(self.backdrop, "background", cfg.background.clone());
        self.stage = SurpriseStage::Revealed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tag;

    fn setup() -> (Document, HeartbeatReveal, NodeId) {
        let mut doc = Document::new();
        let heart = doc.append_element(doc.root(), Tag::Div, &["heart"]);
        let msg = doc.append_element(doc.root(), Tag::Div, &["hidden"]);
        let root = doc.root();
        (doc, HeartbeatReveal::new(heart, msg, root), msg)
    }

    #[test]
    fn test_full_sequence() {
        let (mut doc, mut reveal, msg) = setup();
        let mut sched = Scheduler::new();
        let cfg = SurpriseConfig::default();

        assert!(reveal.on_click(&mut doc, &mut sched, &cfg));
        assert_eq!(doc.style(reveal.heart(), "transform"), Some("scale(50)"));
        assert_eq!(doc.style(reveal.heart(), "opacity"), Some("0"));
        assert_eq!(doc.style(reveal.heart(), "animation"), Some("none"));
        assert!(doc.has_class(msg, "hidden"));

        assert!(sched.advance_to(Duration::from_millis(799)).is_empty());
        assert_eq!(sched.advance_to(Duration::from_millis(800))[0].1, Deferred::Finale);

        reveal.finale(&mut doc, &cfg);
        assert!(doc.has_class(msg, "visible"));
        assert!(!doc.has_class(msg, "hidden"));
        assert_eq!(doc.style(doc.root(), "background"), Some("#200"));
        assert_eq!(reveal.stage(), SurpriseStage::Revealed);
    }

    #[test]
    fn test_second_click_ignored() {
        let (mut doc, mut reveal, _msg) = setup();
        let mut sched = Scheduler::new();
        let cfg = SurpriseConfig::default();

        assert!(reveal.on_click(&mut doc, &mut sched, &cfg));
        assert!(!reveal.on_click(&mut doc, &mut sched, &cfg));
        assert_eq!(sched.pending(), 1);

        sched.advance_to(Duration::from_secs(1));
        reveal.finale(&mut doc, &cfg);
        assert!(!reveal.on_click(&mut doc, &mut sched, &cfg));
        assert!(!sched.has_pending());
    }

    #[test]
    fn test_finale_without_click_does_nothing() {
        let (mut doc, mut reveal, msg) = setup();
        reveal.finale(&mut doc, &SurpriseConfig::default());
        assert!(doc.has_class(msg, "hidden"));
        assert_eq!(reveal.stage(), SurpriseStage::Waiting);
    }
}
