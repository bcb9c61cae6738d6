//! A mounted page: document, effects, randomness and virtual time.
//!
//! [`Page`] is the single owner of everything the effects touch. Hosts
//! build a document (usually with [`crate::site::build`]), mount it, then
//! forward events with [`Page::dispatch`] and move time with
//! [`Page::advance`].
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use keepsake_core::{site, Page, PageKind, SiteConfig};
//!
//! let config = SiteConfig::default();
//! let doc = site::build(PageKind::Pop, &config);
//! let mut page = Page::builder(doc, config).seed(7).mount();
//!
//! page.advance(Duration::from_secs(1));
//! assert_eq!(page.document().query_class("particle").len(), 50);
//! ```

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SiteConfig;
use crate::dom::{Document, NodeId, Point};
use crate::effects::audio::{AudioBackend, AudioHandle, AudioToggler, SilentBackend};
use crate::effects::counter::{Counter, CounterDisplay, Elapsed};
use crate::effects::gallery::Gallery;
use crate::effects::particles::ParticleField;
use crate::effects::popup::PopArea;
use crate::effects::reveal::{IntersectionEntry, RevealController, CARD_CLASS};
use crate::effects::surprise::HeartbeatReveal;
use crate::effects::tilt::{HeartBurst, TiltCard};
use crate::effects::Deferred;
use crate::timer::{Scheduler, TimerId};

/// Input from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// Click at client coordinates; bubbles from `target` to the root
    Click { target: NodeId, point: Point },
    /// Pointer moved over `target` (or one of its children)
    PointerMove { target: NodeId, point: Point },
    /// Pointer left `target` itself; does not bubble
    PointerLeave { target: NodeId },
    /// Viewport intersection report for an observed element
    Intersection(IntersectionEntry),
    /// A track started by the audio backend finished on its own
    AudioEnded(AudioHandle),
}

/// Effects a page can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Particles,
    Reveal,
    Tilt,
    Gallery,
    Counter,
    Audio,
    Popups,
    Surprise,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Particles => "particles",
            Feature::Reveal => "reveal",
            Feature::Tilt => "tilt",
            Feature::Gallery => "gallery",
            Feature::Counter => "counter",
            Feature::Audio => "audio",
            Feature::Popups => "popups",
            Feature::Surprise => "surprise",
        }
    }
}

/// Mount options for a [`Page`]
pub struct PageBuilder {
    doc: Document,
    config: SiteConfig,
    rng: Option<StdRng>,
    wall_epoch: Option<NaiveDateTime>,
    audio: Option<Box<dyn AudioBackend>>,
}

impl PageBuilder {
    /// Deterministic randomness
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Wall-clock time at virtual time zero (defaults to now, local time)
    pub fn wall_epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.wall_epoch = Some(epoch);
        self
    }

    /// Playback backend for song cards (defaults to [`SilentBackend`])
    pub fn audio(mut self, backend: Box<dyn AudioBackend>) -> Self {
        self.audio = Some(backend);
        self
    }

    /// Look for markers and start every effect whose markers are present
    pub fn mount(self) -> Page {
        let rng = self.rng.unwrap_or_else(StdRng::from_os_rng);
        let wall_epoch = self.wall_epoch.unwrap_or_else(|| Local::now().naive_local());
        let audio = self
            .audio
            .unwrap_or_else(|| Box::new(SilentBackend::default()));
        Page::mount(self.doc, self.config, rng, wall_epoch, audio)
    }
}

/// A document with its effects wired up
#[derive(Debug)]
pub struct Page {
    doc: Document,
    config: SiteConfig,
    rng: StdRng,
    scheduler: Scheduler<Deferred>,
    wall_epoch: NaiveDateTime,
    particles: Option<ParticleField>,
    reveal: Option<RevealController>,
    tilt_cards: Vec<TiltCard>,
    gallery: Option<Gallery>,
    counter: Option<(Counter, TimerId)>,
    audio: Option<AudioToggler>,
    pop_area: Option<PopArea>,
    surprise: Option<HeartbeatReveal>,
}

impl Page {
    pub fn builder(doc: Document, config: SiteConfig) -> PageBuilder {
        PageBuilder {
            doc,
            config,
            rng: None,
            wall_epoch: None,
            audio: None,
        }
    }

    fn mount(
        doc: Document,
        config: SiteConfig,
        rng: StdRng,
        wall_epoch: NaiveDateTime,
        audio: Box<dyn AudioBackend>,
    ) -> Self {
        let mut page = Self {
            doc,
            config,
            rng,
            scheduler: Scheduler::new(),
            wall_epoch,
            particles: None,
            reveal: None,
            tilt_cards: Vec::new(),
            gallery: None,
            counter: None,
            audio: None,
            pop_area: None,
            surprise: None,
        };

        page.mount_particles();
        page.mount_reveal();
        if !page.doc.query_class("countdown").is_empty() {
            page.mount_counter();
            page.mount_gallery();
        }
        if !page.doc.query_class("song-grid").is_empty() {
            page.mount_audio(audio);
        }
        page.mount_popups();
        page.mount_surprise();
        page.mount_tilt();

        let features: Vec<&str> = page.features().iter().map(Feature::name).collect();
        tracing::info!("Page mounted with features: {}", features.join(", "));
        page
    }

    fn mount_particles(&mut self) {
        let Some(container) = self.doc.get_by_id("bg-particles") else {
            tracing::debug!("No #bg-particles, particle field inactive");
            return;
        };
        self.particles = Some(ParticleField::populate(
            &mut self.doc,
            container,
            &mut self.rng,
            &self.config.particles,
        ));
    }

    fn mount_reveal(&mut self) {
        let final_msg = self.doc.get_by_id("final-msg");
        let mut targets = self.doc.query_class("hidden");
        for card in self.doc.query_class(CARD_CLASS) {
            if !targets.contains(&card) {
                targets.push(card);
            }
        }
        // The surprise owns its final message's visibility
        targets.retain(|id| Some(*id) != final_msg);
        if targets.is_empty() {
            return;
        }
        let mut controller = RevealController::new(self.config.reveal.clone());
        for id in targets {
            controller.observe(id);
        }
        self.reveal = Some(controller);
    }

    fn mount_counter(&mut self) {
        let Some(display) = CounterDisplay::find(&self.doc) else {
            tracing::debug!("Countdown without all four fields, counter inactive");
            return;
        };
        let counter = Counter::new(self.config.counter.start, display);
        let now = self.wall_now();
        counter.render(&mut self.doc, now);
        let tick = self.scheduler.schedule_every(
            Duration::from_millis(self.config.counter.tick_ms),
            Deferred::CounterTick,
        );
        self.counter = Some((counter, tick));
    }

    fn mount_gallery(&mut self) {
        let trigger = self.doc.get_by_id("shuffle-btn");
        let container = self.doc.query_class("gallery-container").first().copied();
        match (container, trigger) {
            (Some(container), Some(trigger)) => {
                self.gallery = Some(Gallery::new(container, trigger));
            }
            _ => tracing::debug!("Gallery markers incomplete, shuffle inactive"),
        }
    }

    fn mount_audio(&mut self, backend: Box<dyn AudioBackend>) {
        let cards = self.doc.query_class("song-card");
        if cards.is_empty() {
            return;
        }
        self.audio = Some(AudioToggler::new(cards, backend));
    }

    fn mount_popups(&mut self) {
        if let Some(area) = self.doc.query_class("pop-area").first() {
            self.pop_area = Some(PopArea::new(*area));
        }
    }

    fn mount_surprise(&mut self) {
        let heart = self.doc.get_by_id("heartbeat");
        let final_msg = self.doc.get_by_id("final-msg");
        if let (Some(heart), Some(final_msg)) = (heart, final_msg) {
            let root = self.doc.root();
            self.surprise = Some(HeartbeatReveal::new(heart, final_msg, root));
        }
    }

    fn mount_tilt(&mut self) {
        for card in self.doc.query_class(CARD_CLASS) {
            let tilt = TiltCard::attach(&mut self.doc, card);
            self.tilt_cards.push(tilt);
        }
    }

    /// Active effects, in a stable order
    pub fn features(&self) -> Vec<Feature> {
        let mut out = Vec::new();
        if self.particles.is_some() {
            out.push(Feature::Particles);
        }
        if self.reveal.is_some() {
            out.push(Feature::Reveal);
        }
        if !self.tilt_cards.is_empty() {
            out.push(Feature::Tilt);
        }
        if self.gallery.is_some() {
            out.push(Feature::Gallery);
        }
        if self.counter.is_some() {
            out.push(Feature::Counter);
        }
        if self.audio.is_some() {
            out.push(Feature::Audio);
        }
        if self.pop_area.is_some() {
            out.push(Feature::Popups);
        }
        if self.surprise.is_some() {
            out.push(Feature::Surprise);
        }
        out
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features().contains(&feature)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable document access for hosts reporting layout (`set_rect`)
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn reveal(&self) -> Option<&RevealController> {
        self.reveal.as_ref()
    }

    pub fn audio(&self) -> Option<&AudioToggler> {
        self.audio.as_ref()
    }

    pub fn tilt_cards(&self) -> &[TiltCard] {
        &self.tilt_cards
    }

    pub fn is_tilt_card(&self, id: NodeId) -> bool {
        self.tilt_cards.iter().any(|c| c.card() == id)
    }

    /// Virtual time since mount
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Wall-clock time corresponding to the current virtual time
    pub fn wall_now(&self) -> NaiveDateTime {
        chrono::Duration::from_std(self.scheduler.now())
            .ok()
            .and_then(|offset| self.wall_epoch.checked_add_signed(offset))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Current counter reading, if the page has a counter
    pub fn elapsed(&self) -> Option<Elapsed> {
        self.counter
            .as_ref()
            .map(|(counter, _)| Elapsed::between(counter.start(), self.wall_now()))
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Virtual time until the next deferred effect, for hosts that sleep
    pub fn time_until_next(&self) -> Option<Duration> {
        self.scheduler.time_until_next()
    }

    /// Stop the counter's repeating tick. Returns false if there is none.
    pub fn stop_counter(&mut self) -> bool {
        match &self.counter {
            Some((_, tick)) => self.scheduler.cancel(*tick),
            None => false,
        }
    }

    /// Move virtual time forward and apply every deferred effect now due
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.scheduler.now().saturating_add(by);
        let fired = self.scheduler.advance_to(target);
        let count = fired.len();
        for (_, deferred) in fired {
            self.apply(deferred);
        }
        count
    }

    fn apply(&mut self, deferred: Deferred) {
        tracing::trace!("Applying {:?}", deferred);
        match deferred {
            Deferred::Reveal(id) => RevealController::reveal(&mut self.doc, id),
            Deferred::Remove(id) => {
                self.doc.remove(id);
            }
            Deferred::CounterTick => {
                let now = self.wall_now();
                if let Some((counter, _)) = &self.counter {
                    counter.render(&mut self.doc, now);
                }
            }
            Deferred::Finale => {
                if let Some(surprise) = self.surprise.as_mut() {
                    surprise.finale(&mut self.doc, &self.config.surprise);
                }
            }
        }
    }

    /// Shuffle the gallery as if its trigger was clicked
    pub fn shuffle_gallery(&mut self) -> Option<Vec<(NodeId, f64)>> {
        let gallery = self.gallery?;
        Some(gallery.shuffle(&mut self.doc, &mut self.rng, &self.config.gallery))
    }

    /// Route one host event. Returns true if any effect reacted.
    pub fn dispatch(&mut self, event: PageEvent) -> bool {
        match event {
            PageEvent::Click { target, point } => self.on_click(target, point),
            PageEvent::PointerMove { target, point } => self.on_pointer_move(target, point),
            PageEvent::PointerLeave { target } => self.on_pointer_leave(target),
            PageEvent::Intersection(entry) => match self.reveal.as_mut() {
                Some(reveal) => {
                    reveal.on_intersection(&mut self.doc, entry, &mut self.rng, &mut self.scheduler)
                }
                None => false,
            },
            PageEvent::AudioEnded(handle) => match self.audio.as_mut() {
                Some(audio) => audio.on_ended(&mut self.doc, handle),
                None => false,
            },
        }
    }

    fn on_click(&mut self, target: NodeId, point: Point) -> bool {
        if !self.doc.is_connected(target) {
            return false;
        }
        let path: Vec<NodeId> = self.doc.ancestors(target).collect();
        let mut handled = false;

        for node in path {
            if self.is_tilt_card(node) {
                let layer = self.doc.root();
                HeartBurst::spawn(
                    &mut self.doc,
                    layer,
                    point,
                    &mut self.rng,
                    &mut self.scheduler,
                    &self.config.burst,
                );
                handled = true;
            }
            if self.gallery.is_some_and(|g| g.trigger() == node) {
                handled |= self.shuffle_gallery().is_some();
            }
            if let Some(audio) = self.audio.as_mut() {
                if audio.is_card(node) {
                    audio.on_card_click(&mut self.doc, node);
                    handled = true;
                }
            }
            if let Some(area) = self.pop_area {
                if area.area() == node {
                    handled |= area
                        .on_click(
                            &mut self.doc,
                            point,
                            &mut self.rng,
                            &mut self.scheduler,
                            &self.config.popups,
                        )
                        .is_some();
                }
            }
            if let Some(surprise) = self.surprise.as_mut() {
                if surprise.heart() == node {
                    let cfg = &self.config.surprise;
                    handled |= surprise.on_click(&mut self.doc, &mut self.scheduler, cfg);
                }
            }
        }
        handled
    }

    fn on_pointer_move(&mut self, target: NodeId, point: Point) -> bool {
        let Some(card) = self
            .doc
            .ancestors(target)
            .find_map(|id| self.tilt_cards.iter().find(|c| c.card() == id).copied())
        else {
            return false;
        };
        let Some(rect) = self.doc.rect(card.card()) else {
            tracing::trace!("No layout for tilt card {}, ignoring move", card.card());
            return false;
        };
        card.on_move(&mut self.doc, rect, point, &self.config.tilt);
        true
    }

    fn on_pointer_leave(&mut self, target: NodeId) -> bool {
        match self.tilt_cards.iter().find(|c| c.card() == target) {
            Some(card) => {
                card.on_leave(&mut self.doc, &self.config.tilt);
                true
            }
            None => false,
        }
    }
}
