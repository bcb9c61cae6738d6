//! Property-based tests for the page effects
//!
//! Uses proptest to check the invariants that must hold for any seed and
//! any sequence of user input.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use keepsake_core::effects::gallery::{fisher_yates, Gallery};
use keepsake_core::effects::particles::ParticleSpec;
use keepsake_core::config::{GalleryConfig, ParticleConfig};
use keepsake_core::{
    site, Document, Elapsed, IntersectionEntry, NodeId, Page, PageEvent, PageKind, Point,
    SiteConfig, Tag,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Strategy Generators
// ============================================================================

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 4, 4)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// User actions on the songs page
#[derive(Debug, Clone)]
enum SongOp {
    Click(usize),
    EndCurrent,
    EndStale(u64),
}

fn song_ops_strategy() -> impl Strategy<Value = Vec<SongOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0..3usize).prop_map(SongOp::Click),
            1 => Just(SongOp::EndCurrent),
            1 => (0..50u64).prop_map(SongOp::EndStale),
        ],
        0..40,
    )
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Shuffling yields a permutation of the same elements
    #[test]
    fn shuffle_is_permutation(len in 0..64usize, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut items: Vec<usize> = (0..len).collect();
        fisher_yates(&mut items, &mut rng);
        items.sort_unstable();
        prop_assert_eq!(items, (0..len).collect::<Vec<_>>());
    }

    /// Gallery shuffle keeps the same children and bounds every rotation
    #[test]
    fn gallery_shuffle_bounds(len in 0..24usize, seed in any::<u64>(), rounds in 1..4usize) {
        let mut doc = Document::new();
        let root = doc.root();
        let container = doc.append_element(root, Tag::Div, &["gallery-container"]);
        let trigger = doc.append_element(root, Tag::Button, &[]);
        let cards: Vec<NodeId> = (0..len)
            .map(|_| doc.append_element(container, Tag::Div, &[]))
            .collect();
        let gallery = Gallery::new(container, trigger);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..rounds {
            let dealt = gallery.shuffle(&mut doc, &mut rng, &GalleryConfig::default());
            for (_, rotation) in &dealt {
                prop_assert!((-5.0..=5.0).contains(rotation));
            }
        }
        let mut after = doc.children(container).to_vec();
        after.sort();
        prop_assert_eq!(after, cards);
    }

    /// Particles always land inside their declared ranges
    #[test]
    fn particle_specs_in_range(seed in any::<u64>()) {
        let cfg = ParticleConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..50 {
            let p = ParticleSpec::sample(&mut rng, &cfg);
            prop_assert!(p.size >= 1.0 && p.size < 4.0);
            prop_assert!(p.left >= 0.0 && p.left < 100.0);
            prop_assert!(p.top >= 0.0 && p.top < 100.0);
            prop_assert!(p.duration >= 10.0 && p.duration < 30.0);
            prop_assert!(p.delay <= 0.0 && p.delay > -20.0);
        }
    }

    /// Counter readings never go backwards and padded fields are two characters
    #[test]
    fn counter_monotonic_and_padded(mut offsets in prop::collection::vec(0..400_000_000i64, 1..30)) {
        offsets.sort_unstable();
        let mut last = -1i64;
        for secs in offsets {
            let e = Elapsed::between(base(), base() + chrono::Duration::seconds(secs));
            prop_assert!(e.total_seconds() >= last);
            prop_assert_eq!(e.total_seconds(), secs);
            last = e.total_seconds();

            let [_, h, m, s] = e.fields();
            prop_assert_eq!(h.len(), 2);
            prop_assert_eq!(m.len(), 2);
            prop_assert_eq!(s.len(), 2);
        }
    }

    /// At most one song card is active, and it is the one playing
    #[test]
    fn audio_single_active(ops in song_ops_strategy(), seed in any::<u64>()) {
        let config = SiteConfig::default();
        let doc = site::build(PageKind::Songs, &config);
        let mut page = Page::builder(doc, config).seed(seed).mount();
        let cards = page.document().query_class("song-card");

        for op in ops {
            match op {
                SongOp::Click(i) => {
                    page.dispatch(PageEvent::Click { target: cards[i], point: Point::default() });
                }
                SongOp::EndCurrent => {
                    if let Some(handle) = page.audio().and_then(|a| a.current()).map(|p| p.handle) {
                        page.dispatch(PageEvent::AudioEnded(handle));
                    }
                }
                SongOp::EndStale(h) => {
                    let current = page.audio().and_then(|a| a.current()).map(|p| p.handle.0);
                    if current != Some(h) {
                        page.dispatch(PageEvent::AudioEnded(keepsake_core::AudioHandle(h)));
                    }
                }
            }

            let active: Vec<NodeId> = cards
                .iter()
                .copied()
                .filter(|c| page.document().has_class(*c, "active"))
                .collect();
            prop_assert!(active.len() <= 1);
            let current = page.audio().and_then(|a| a.current()).cloned();
            match current {
                Some(playing) => {
                    prop_assert_eq!(active, vec![playing.card]);
                    prop_assert_eq!(page.document().data(playing.card, "src"), Some(playing.src.as_str()));
                }
                None => prop_assert!(active.is_empty()),
            }
        }
    }

    /// Once revealed, further intersections change nothing
    #[test]
    fn reveal_is_idempotent(picks in prop::collection::vec((0..6usize, 0.0..=1.0f64), 1..40), seed in any::<u64>()) {
        let config = SiteConfig::default();
        let doc = site::build(PageKind::Reasons, &config);
        let mut page = Page::builder(doc, config).seed(seed).mount();
        let cards = page.document().query_class("reason-card");
        let mut revealed = std::collections::HashSet::new();

        for (i, ratio) in picks {
            let target = cards[i];
            let before = page.document().render_tree();
            let acted = page.dispatch(PageEvent::Intersection(IntersectionEntry {
                target,
                is_intersecting: true,
                ratio,
            }));
            if revealed.contains(&target) {
                prop_assert!(!acted);
                prop_assert_eq!(page.document().render_tree(), before);
            } else if acted {
                revealed.insert(target);
            }
            page.advance(Duration::from_millis(200));
            if revealed.contains(&target) {
                prop_assert!(page.document().has_class(target, "visible"));
            }
        }
    }

    /// N clicks make N popups that each vanish 2s after their own click
    #[test]
    fn popups_expire_independently(gaps in prop::collection::vec(0..1500u64, 1..12), seed in any::<u64>()) {
        let config = SiteConfig::default();
        let messages = config.popups.messages.clone();
        let doc = site::build(PageKind::Pop, &config);
        let mut page = Page::builder(doc, config).seed(seed).mount();
        let area = page.document().query_class("pop-area")[0];

        let mut spawned_at = Vec::new();
        for gap in &gaps {
            page.advance(Duration::from_millis(*gap));
            page.dispatch(PageEvent::Click { target: area, point: Point::new(1.0, 2.0) });
            spawned_at.push(page.now());
            for msg in page.document().query_class("pop-msg") {
                let text = page.document().text(msg).unwrap_or_default();
                prop_assert!(messages.iter().any(|m| m == text));
            }
        }

        let live = |now: Duration| spawned_at.iter().filter(|t| now < **t + Duration::from_millis(2000)).count();
        prop_assert_eq!(page.document().query_class("pop-msg").len(), live(page.now()));

        for _ in 0..8 {
            page.advance(Duration::from_millis(500));
            prop_assert_eq!(page.document().query_class("pop-msg").len(), live(page.now()));
        }
        prop_assert!(page.document().query_class("pop-msg").is_empty());
    }
}
