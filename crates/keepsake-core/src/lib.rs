//! Keepsake Core Library
//!
//! Presentation effects for a small themed personal site: an ambient
//! particle field, scroll reveals, tilting cards with heart bursts, a
//! shuffle gallery, an elapsed-time counter, a one-track audio toggler,
//! click popups and a one-shot heartbeat surprise.
//!
//! ## Overview
//!
//! Effects operate on an in-memory [`Document`] rather than a browser DOM.
//! Randomness is a seedable [`rand::rngs::StdRng`] and every delay is an
//! entry in a virtual-time [`Scheduler`], so a whole page can be driven
//! deterministically:
//!
//! ```
//! use std::time::Duration;
//! use keepsake_core::{site, Page, PageEvent, PageKind, Point, SiteConfig};
//!
//! let config = SiteConfig::default();
//! let doc = site::build(PageKind::Pop, &config);
//! let mut page = Page::builder(doc, config).seed(42).mount();
//!
//! let area = page.document().query_class("pop-area")[0];
//! page.dispatch(PageEvent::Click { target: area, point: Point::new(40.0, 60.0) });
//! assert_eq!(page.document().query_class("pop-msg").len(), 1);
//!
//! page.advance(Duration::from_secs(2));
//! assert!(page.document().query_class("pop-msg").is_empty());
//! ```
//!
//! Hosts (the desktop webview, the CLI) render the document and translate
//! their own events into [`PageEvent`]s.

pub mod config;
pub mod dom;
pub mod effects;
pub mod error;
pub mod page;
pub mod site;
pub mod timer;

// Re-exports
pub use config::{RevealOptions, SiteConfig};
pub use dom::{Document, Node, NodeId, Point, Rect, Tag};
pub use effects::audio::{AudioBackend, AudioHandle, SilentBackend};
pub use effects::counter::Elapsed;
pub use effects::reveal::{IntersectionEntry, Viewport};
pub use effects::Deferred;
pub use error::{KeepsakeError, KeepsakeResult};
pub use page::{Feature, Page, PageBuilder, PageEvent};
pub use site::PageKind;
pub use timer::{Scheduler, TimerId};
