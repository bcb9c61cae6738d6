//! Node View Component
//!
//! Renders one node of a mounted page's document, then its children.
//! Pointer events are stopped at the innermost element and handed to the
//! page, which does its own bubbling through the document tree. Nodes
//! inside an element carrying `data-page` also navigate to that page.

use std::rc::Rc;

use dioxus::prelude::*;
use keepsake_core::{NodeId, Page, PageEvent, PageKind, Point, Rect, Tag};

use crate::app::Route;
use crate::context::use_frame_clock;

/// One document node and its subtree
#[component]
pub fn NodeView(mut page: Signal<Page>, id: NodeId) -> Element {
    let navigator = use_navigator();
    let clock = use_frame_clock();
    let mut mounted: Signal<Option<Rc<MountedData>>> = use_signal(|| None);

    let guard = page.read();
    let doc = guard.document();
    let Some(node) = doc.node(id) else {
        return rsx! {};
    };

    let tag = node.tag;
    let class = match tag {
        Tag::Body => format!("page-root {}", node.class_attr()),
        _ => node.class_attr(),
    };
    let style = node.style_attr();
    let element_id = node.element_id.clone();
    let text = node.text.clone();
    let children = node.children.clone();
    let index = id.index();
    let tilt_card = guard.is_tilt_card(id);
    let in_tilt_card = doc.ancestors(id).any(|a| guard.is_tilt_card(a));
    let link = doc
        .ancestors(id)
        .find_map(|a| doc.data(a, "page"))
        .and_then(|slug| slug.parse::<PageKind>().ok());
    drop(guard);

    let onclick = move |evt: MouseEvent| {
        evt.stop_propagation();
        let at = evt.client_coordinates();
        let mut guard = page.write();
        clock.catch_up(&mut guard);
        guard.dispatch(PageEvent::Click {
            target: id,
            point: Point::new(at.x, at.y),
        });
        drop(guard);
        if let Some(kind) = link {
            navigator.push(Route::for_kind(kind));
        }
    };

    let onmousemove = move |evt: MouseEvent| {
        if !in_tilt_card {
            return;
        }
        evt.stop_propagation();
        let at = evt.client_coordinates();
        page.write().dispatch(PageEvent::PointerMove {
            target: id,
            point: Point::new(at.x, at.y),
        });
    };

    // Layout is measured on entry so scrolling never leaves a stale rect
    let onmouseenter = move |_evt: MouseEvent| {
        if !tilt_card {
            return;
        }
        spawn(async move {
            let Some(handle) = mounted() else {
                return;
            };
            match handle.get_client_rect().await {
                Ok(r) => page.write().document_mut().set_rect(
                    id,
                    Rect::new(r.origin.x, r.origin.y, r.size.width, r.size.height),
                ),
                Err(e) => tracing::debug!("Could not measure node {}: {:?}", id, e),
            }
        });
    };

    let onmouseleave = move |_evt: MouseEvent| {
        if tilt_card {
            page.write().dispatch(PageEvent::PointerLeave { target: id });
        }
    };

    let onmounted = move |evt: MountedEvent| mounted.set(Some(evt.data()));

    let body = rsx! {
        if let Some(text) = text {
            "{text}"
        }
        for child in children {
            NodeView { key: "{child}", page, id: child }
        }
    };

    match tag {
        Tag::Body | Tag::Div => rsx! {
            div {
                id: element_id,
                class: class,
                style: style,
                "data-node": "{index}",
                onclick: onclick,
                onmousemove: onmousemove,
                onmouseenter: onmouseenter,
                onmouseleave: onmouseleave,
                onmounted: onmounted,
                {body}
            }
        },
        Tag::Main => rsx! {
            main {
                id: element_id,
                class: class,
                style: style,
                "data-node": "{index}",
                onclick: onclick,
                onmousemove: onmousemove,
                onmouseenter: onmouseenter,
                onmouseleave: onmouseleave,
                onmounted: onmounted,
                {body}
            }
        },
        Tag::Section => rsx! {
            section {
                id: element_id,
                class: class,
                style: style,
                "data-node": "{index}",
                onclick: onclick,
                onmousemove: onmousemove,
                onmouseenter: onmouseenter,
                onmouseleave: onmouseleave,
                onmounted: onmounted,
                {body}
            }
        },
        Tag::Span => rsx! {
            span {
                id: element_id,
                class: class,
                style: style,
                "data-node": "{index}",
                onclick: onclick,
                onmousemove: onmousemove,
                onmouseenter: onmouseenter,
                onmouseleave: onmouseleave,
                onmounted: onmounted,
                {body}
            }
        },
        Tag::Button => rsx! {
            button {
                r#type: "button",
                id: element_id,
                class: class,
                style: style,
                "data-node": "{index}",
                onclick: onclick,
                onmousemove: onmousemove,
                onmouseenter: onmouseenter,
                onmouseleave: onmouseleave,
                onmounted: onmounted,
                {body}
            }
        },
        Tag::Heading => rsx! {
            h2 {
                id: element_id,
                class: class,
                style: style,
                "data-node": "{index}",
                onclick: onclick,
                onmousemove: onmousemove,
                onmouseenter: onmouseenter,
                onmouseleave: onmouseleave,
                onmounted: onmounted,
                {body}
            }
        },
        Tag::Paragraph => rsx! {
            p {
                id: element_id,
                class: class,
                style: style,
                "data-node": "{index}",
                onclick: onclick,
                onmousemove: onmousemove,
                onmouseenter: onmouseenter,
                onmouseleave: onmouseleave,
                onmounted: onmounted,
                {body}
            }
        },
    }
}
