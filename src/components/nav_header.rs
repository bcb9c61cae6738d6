//! Navigation Header Component
//!
//! Site title on the left, one link per page on the right. The layout
//! wraps every route so the header stays put while pages swap below it.

use dioxus::prelude::*;
use keepsake_core::PageKind;

use crate::app::Route;
use crate::context::use_site_config;

/// Navigation header with the site title and page links
#[component]
pub fn NavHeader() -> Element {
    let config = use_site_config();
    let current = use_route::<Route>().kind();

    rsx! {
        header { class: "nav-header",
            div { class: "nav-header-inner",
                div { class: "nav-title",
                    h1 { class: "app-title", "{config.title}" }
                }

                nav { class: "nav-links",
                    for kind in PageKind::ALL {
                        Link {
                            key: "{kind}",
                            to: Route::for_kind(kind),
                            class: if kind == current { "nav-link active" } else { "nav-link" },
                            "{kind.label()}"
                        }
                    }
                }
            }
        }
    }
}

/// Layout shared by all routes
#[component]
pub fn SiteLayout() -> Element {
    rsx! {
        NavHeader {}
        Outlet::<Route> {}
    }
}
