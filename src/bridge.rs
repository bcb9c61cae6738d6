//! Webview bridge
//!
//! The pieces of a page that need the real browser engine: an
//! IntersectionObserver feeding scroll visibility back to the page, and
//! `<audio>` playback behind the core [`AudioBackend`] trait.

use dioxus::prelude::*;
use keepsake_core::{AudioBackend, AudioHandle, IntersectionEntry, Page, PageEvent, RevealOptions};
use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::context::FrameClock;

/// One observer callback entry as posted by the webview
#[derive(Debug, Clone, Copy, Deserialize)]
struct ObservedEntry {
    node: usize,
    ratio: f64,
    intersecting: bool,
}

/// How a track's playback script finished
#[derive(Debug, Clone, Copy, Deserialize)]
struct TrackFinished {
    id: u64,
    /// False when the track was paused rather than played to the end
    ended: bool,
}

/// Watch every `.hidden` and `.reason-card` element and forward entries
/// to the page until the script is torn down with the component.
///
/// Elements added later (re-renders, route changes) are picked up by a
/// MutationObserver.
pub async fn observe_intersections(
    mut page: Signal<Page>,
    clock: FrameClock,
    options: RevealOptions,
) {
    let script = format!(
        r#"
        const io = new IntersectionObserver((entries) => {{
            for (const e of entries) {{
                dioxus.send({{
                    node: Number(e.target.dataset.node),
                    ratio: e.intersectionRatio,
                    intersecting: e.isIntersecting,
                }});
            }}
        }}, {{ threshold: {threshold}, rootMargin: "{margin}" }});
        const seen = new WeakSet();
        const scan = () => {{
            document.querySelectorAll(".hidden[data-node], .reason-card[data-node]").forEach((el) => {{
                if (!seen.has(el)) {{
                    seen.add(el);
                    io.observe(el);
                }}
            }});
        }};
        scan();
        new MutationObserver(scan).observe(document.body, {{ childList: true, subtree: true }});
        await new Promise(() => {{}});
        "#,
        threshold = options.threshold,
        margin = options.root_margin(),
    );

    let mut eval = document::eval(&script);
    loop {
        let entry = match eval.recv::<ObservedEntry>().await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Intersection bridge closed: {:?}", e);
                break;
            }
        };
        let Some(target) = page.peek().document().node_at(entry.node) else {
            continue;
        };
        // Entries for revealed elements keep coming; skip them without a re-render
        if !page.peek().reveal().is_some_and(|r| r.is_observed(target)) {
            continue;
        }
        let mut guard = page.write();
        clock.catch_up(&mut guard);
        guard.dispatch(PageEvent::Intersection(IntersectionEntry {
            target,
            is_intersecting: entry.intersecting,
            ratio: entry.ratio,
        }));
    }
}

/// Plays song sources through webview `<audio>` elements.
///
/// Playback is keyed by handle in `window.__keepsakeAudio`. A track that
/// finishes on its own reports back through `ended`; pausing settles the
/// track's script without a report.
pub struct WebviewAudio {
    next: u64,
    ended: UnboundedSender<AudioHandle>,
}

impl WebviewAudio {
    pub fn new(ended: UnboundedSender<AudioHandle>) -> Self {
        Self { next: 0, ended }
    }
}

impl AudioBackend for WebviewAudio {
    fn play(&mut self, src: &str) -> AudioHandle {
        self.next += 1;
        let handle = AudioHandle(self.next);
        let src_json = serde_json::to_string(src).unwrap_or_else(|_| "\"\"".to_string());

        let script = format!(
            r#"
            window.__keepsakeAudio = window.__keepsakeAudio || new Map();
            const audio = new Audio({src_json});
            const done = new Promise((resolve) => {{
                window.__keepsakeAudio.set({id}, {{ audio, finish: resolve }});
                audio.addEventListener("ended", () => resolve(true));
            }});
            audio.play().catch((err) => console.warn("keepsake: playback failed", err));
            const ended = await done;
            window.__keepsakeAudio.delete({id});
            dioxus.send({{ id: {id}, ended }});
            "#,
            id = handle.0,
        );

        let ended = self.ended.clone();
        spawn(async move {
            let mut eval = document::eval(&script);
            match eval.recv::<TrackFinished>().await {
                Ok(TrackFinished { id, ended: true }) => {
                    let _ = ended.send(AudioHandle(id));
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("Playback script closed: {:?}", e),
            }
        });

        tracing::debug!("Playing {} as handle {}", src, handle.0);
        handle
    }

    fn pause(&mut self, handle: AudioHandle) {
        let script = format!(
            r#"
            const track = window.__keepsakeAudio && window.__keepsakeAudio.get({id});
            if (track) {{
                track.audio.pause();
                track.audio.removeAttribute("src");
                track.audio.load();
                track.finish(false);
            }}
            "#,
            id = handle.0,
        );
        let _ = document::eval(&script);
        tracing::debug!("Paused handle {}", handle.0);
    }
}
