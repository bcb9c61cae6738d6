//! Page components for Keepsake.
//!
//! Every route is the same [`EffectPage`] with a different page kind.

mod effect_page;

use dioxus::prelude::*;
use keepsake_core::PageKind;

use effect_page::EffectPage;

#[component]
pub fn Home() -> Element {
    rsx! { EffectPage { kind: PageKind::Home } }
}

#[component]
pub fn Moments() -> Element {
    rsx! { EffectPage { kind: PageKind::Moments } }
}

#[component]
pub fn Songs() -> Element {
    rsx! { EffectPage { kind: PageKind::Songs } }
}

#[component]
pub fn Pop() -> Element {
    rsx! { EffectPage { kind: PageKind::Pop } }
}

#[component]
pub fn Surprise() -> Element {
    rsx! { EffectPage { kind: PageKind::Surprise } }
}

#[component]
pub fn Reasons() -> Element {
    rsx! { EffectPage { kind: PageKind::Reasons } }
}
