//! Single-track audio toggler
//!
//! Song cards play their track on click. Only one track plays at a time:
//! clicking another card switches tracks, clicking the playing card stops
//! it. The toggler owns the "currently playing" slot; nothing else can see
//! or change it except through its methods.

use crate::dom::{Document, NodeId};

pub const ACTIVE_CLASS: &str = "active";

/// Opaque handle a backend hands out for a started track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AudioHandle(pub u64);

/// Playback commands issued by the toggler.
///
/// The host decides what playing means (a webview `Audio` element, a test
/// recorder). It reports natural ends back via
/// [`AudioToggler::on_ended`].
pub trait AudioBackend {
    /// Start playing `src` from the beginning
    fn play(&mut self, src: &str) -> AudioHandle;

    /// Pause a track started by [`AudioBackend::play`]
    fn pause(&mut self, handle: AudioHandle);
}

/// The track currently playing and the card that started it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playing {
    pub handle: AudioHandle,
    pub src: String,
    pub card: NodeId,
}

/// What a card click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Nothing was playing; the card started
    Started(AudioHandle),
    /// Another track was stopped and the card started
    Switched {
        stopped: AudioHandle,
        started: AudioHandle,
    },
    /// The playing card was clicked again
    Stopped(AudioHandle),
    /// The card has no `data-src`
    Ignored,
}

/// Owns the song cards and the single playing slot
pub struct AudioToggler {
    cards: Vec<NodeId>,
    backend: Box<dyn AudioBackend>,
    current: Option<Playing>,
}

impl std::fmt::Debug for AudioToggler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioToggler")
            .field("cards", &self.cards)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl AudioToggler {
    pub fn new(cards: Vec<NodeId>, backend: Box<dyn AudioBackend>) -> Self {
        Self {
            cards,
            backend,
            current: None,
        }
    }

    pub fn cards(&self) -> &[NodeId] {
        &self.cards
    }

    pub fn is_card(&self, id: NodeId) -> bool {
        self.cards.contains(&id)
    }

    pub fn current(&self) -> Option<&Playing> {
        self.current.as_ref()
    }

    /// Handle a click on one of the song cards
    pub fn on_card_click(&mut self, doc: &mut Document, card: NodeId) -> ToggleOutcome {
        let Some(src) = doc.data(card, "src").map(str::to_string) else {
            tracing::warn!("Song card {} has no data-src, ignoring click", card);
            return ToggleOutcome::Ignored;
        };

        let mut stopped = None;
        if let Some(playing) = self.current.take() {
            self.backend.pause(playing.handle);
            for c in &self.cards {
                doc.remove_class(*c, ACTIVE_CLASS);
            }
            if playing.src == src {
                tracing::debug!("Stopped {}", src);
                return ToggleOutcome::Stopped(playing.handle);
            }
            stopped = Some(playing.handle);
        }

        let handle = self.backend.play(&src);
        doc.add_class(card, ACTIVE_CLASS);
        tracing::debug!("Playing {} from card {}", src, card);
        self.current = Some(Playing { handle, src, card });

        match stopped {
            Some(stopped) => ToggleOutcome::Switched {
                stopped,
                started: handle,
            },
            None => ToggleOutcome::Started(handle),
        }
    }

    /// A track reached its natural end. Stale handles are ignored.
    pub fn on_ended(&mut self, doc: &mut Document, handle: AudioHandle) -> bool {
        match &self.current {
            Some(playing) if playing.handle == handle => {
                doc.remove_class(playing.card, ACTIVE_CLASS);
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

/// Backend that plays nothing; handles are still unique
#[derive(Debug, Default)]
pub struct SilentBackend {
    next: u64,
}

impl AudioBackend for SilentBackend {
    fn play(&mut self, src: &str) -> AudioHandle {
        self.next += 1;
        tracing::trace!("Silent playback of {}", src);
        AudioHandle(self.next)
    }

    fn pause(&mut self, _handle: AudioHandle) {}
}
