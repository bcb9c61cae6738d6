//! Site context for Keepsake.
//!
//! Provides the loaded site config and launch options to all components
//! via use_context.
//!
//! ## Usage
//!
//! ```ignore
//! // In App component
//! use_context_provider(|| launch_settings());
//!
//! // In child components
//! let launch = use_launch();
//! ```

use dioxus::prelude::*;
use keepsake_core::{Page, SiteConfig};
use tokio::time::Instant;

/// What the desktop app was started with
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Launch {
    pub site: SiteConfig,
    /// Fixed RNG seed, or `None` for OS entropy
    pub seed: Option<u64>,
}

/// Settings the app was launched with.
pub fn launch_settings() -> Launch {
    crate::launch_settings()
}

/// Hook to access the launch settings from context.
pub fn use_launch() -> Launch {
    use_context::<Launch>()
}

/// Hook to access just the site config.
pub fn use_site_config() -> SiteConfig {
    use_launch().site
}

/// Wall-clock instant a mounted page's virtual time was last synced to.
///
/// The frame loop only advances the page when a deferred effect is due;
/// anything that schedules new effects catches the page up first so
/// delays start from the real current time.
#[derive(Clone, Copy)]
pub struct FrameClock {
    synced: Signal<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            synced: Signal::new(Instant::now()),
        }
    }

    /// Wall time not yet handed to the page
    pub fn lag(&self) -> std::time::Duration {
        self.synced.peek().elapsed()
    }

    /// Advance the page to the current wall time. Returns the number of
    /// deferred effects applied.
    pub fn catch_up(mut self, page: &mut Page) -> usize {
        let now = Instant::now();
        let by = now.saturating_duration_since(*self.synced.peek());
        self.synced.set(now);
        page.advance(by)
    }
}

/// Hook to access the frame clock of the enclosing page.
pub fn use_frame_clock() -> FrameClock {
    use_context::<FrameClock>()
}
