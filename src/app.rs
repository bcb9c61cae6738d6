use dioxus::prelude::*;
use keepsake_core::PageKind;

use crate::components::SiteLayout;
use crate::context::launch_settings;
use crate::pages::{Home, Moments, Pop, Reasons, Songs, Surprise};
use crate::theme::GLOBAL_STYLES;

/// Application routes, one per page of the site.
///
/// - `/` - Hero and teasers
/// - `/moments` - Elapsed counter and shuffle gallery
/// - `/songs` - Song cards with playback
/// - `/pop` - Click anywhere for messages
/// - `/surprise` - The heartbeat
/// - `/reasons` - Tilting reason cards
#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(SiteLayout)]
        #[route("/")]
        Home {},
        #[route("/moments")]
        Moments {},
        #[route("/songs")]
        Songs {},
        #[route("/pop")]
        Pop {},
        #[route("/surprise")]
        Surprise {},
        #[route("/reasons")]
        Reasons {},
}

impl Route {
    /// Route that shows the given page
    pub fn for_kind(kind: PageKind) -> Self {
        match kind {
            PageKind::Home => Route::Home {},
            PageKind::Moments => Route::Moments {},
            PageKind::Songs => Route::Songs {},
            PageKind::Pop => Route::Pop {},
            PageKind::Surprise => Route::Surprise {},
            PageKind::Reasons => Route::Reasons {},
        }
    }

    pub fn kind(&self) -> PageKind {
        match self {
            Route::Home {} => PageKind::Home,
            Route::Moments {} => PageKind::Moments,
            Route::Songs {} => PageKind::Songs,
            Route::Pop {} => PageKind::Pop,
            Route::Surprise {} => PageKind::Surprise,
            Route::Reasons {} => PageKind::Reasons,
        }
    }
}

/// Root application component.
///
/// Provides global styles, the launch context, and routing.
#[component]
pub fn App() -> Element {
    use_context_provider(launch_settings);

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
    }
}
