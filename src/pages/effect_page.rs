//! Effect page - one mounted keepsake page in the webview.
//!
//! Builds the page document from the site config, mounts its effects, and
//! keeps it alive: a frame loop drives virtual time, the intersection
//! bridge feeds scroll reveals, and finished tracks report back through a
//! channel.

use dioxus::prelude::*;
use keepsake_core::{site, Page, PageEvent, PageKind};
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::Duration;

use crate::bridge::{observe_intersections, WebviewAudio};
use crate::components::NodeView;
use crate::context::{use_launch, FrameClock};

/// How often deferred effects are applied
const FRAME: Duration = Duration::from_millis(50);

/// Whether a frame that is `lag` behind the wall clock has work to apply
fn is_due(next: Option<Duration>, lag: Duration) -> bool {
    next.is_some_and(|wait| wait <= lag)
}

/// A fully mounted page of the given kind
#[component]
pub fn EffectPage(kind: PageKind) -> Element {
    let launch = use_launch();
    let clock = use_context_provider(FrameClock::new);

    let page: Signal<Page> = use_hook(|| {
        let (ended_tx, mut ended_rx) = unbounded_channel();
        let doc = site::build(kind, &launch.site);
        let mut builder =
            Page::builder(doc, launch.site.clone()).audio(Box::new(WebviewAudio::new(ended_tx)));
        if let Some(seed) = launch.seed {
            builder = builder.seed(seed);
        }
        let mut page = Signal::new(builder.mount());

        // Tracks that ended on their own
        spawn(async move {
            while let Some(handle) = ended_rx.recv().await {
                page.write().dispatch(PageEvent::AudioEnded(handle));
            }
        });
        page
    });

    // Frame loop: virtual time follows the wall clock, handed to the page
    // only once something is due so idle frames do not re-render
    use_hook(move || {
        let mut page = page;
        spawn(async move {
            loop {
                tokio::time::sleep(FRAME).await;
                if !is_due(page.peek().time_until_next(), clock.lag()) {
                    continue;
                }
                let fired = clock.catch_up(&mut page.write());
                tracing::trace!("{} deferred effects applied on {}", fired, kind);
            }
        })
    });

    let reveal = launch.site.reveal.clone();
    use_effect(move || {
        if page.peek().reveal().is_some() {
            spawn(observe_intersections(page, clock, reveal.clone()));
        }
    });

    let root = page.peek().document().root();

    rsx! {
        NodeView { page, id: root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_frames_are_not_due() {
        assert!(!is_due(None, Duration::from_secs(60)));
        assert!(!is_due(Some(Duration::from_millis(900)), FRAME));
    }

    #[test]
    fn test_due_once_lag_reaches_deadline() {
        let wait = Duration::from_millis(1000);
        assert!(!is_due(Some(wait), Duration::from_millis(999)));
        assert!(is_due(Some(wait), wait));
        assert!(is_due(Some(Duration::ZERO), Duration::ZERO));
    }
}
