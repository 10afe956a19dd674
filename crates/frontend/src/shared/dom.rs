//! Thin helpers over `web-sys` for the server-rendered admin page.
//!
//! Every lookup returns `Option`/`Vec`: a missing element is an empty match,
//! never an error, so callers simply do nothing.

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = document() else {
        return Vec::new();
    };
    match document.query_selector_all(selector) {
        Ok(nodes) => (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(_) => {
            log::warn!("invalid selector `{}`", selector);
            Vec::new()
        }
    }
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(nodes) => (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn exists(selector: &str) -> bool {
    query(selector).is_some()
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

/// Shows or hides an element as a whole through its inline `display`.
pub fn set_visible(el: &Element, visible: bool) {
    let Some(html) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    if visible {
        let _ = style.remove_property("display");
    } else {
        let _ = style.set_property("display", "none");
    }
}

/// Fades an element to transparent, then takes it out of the layout.
pub fn fade_out(el: &Element, duration_ms: u32) {
    let Some(html) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    let _ = style.set_property("transition", &format!("opacity {}ms", duration_ms));
    let _ = style.set_property("opacity", "0");

    let el = el.clone();
    Timeout::new(duration_ms, move || set_visible(&el, false)).forget();
}

pub fn location_hash() -> Option<String> {
    web_sys::window()?
        .location()
        .hash()
        .ok()
        .filter(|hash| !hash.is_empty())
}

/// Records a new history entry for `fragment` without reloading the page.
pub fn push_fragment(fragment: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Ok(history) = window.history() {
        if let Err(err) =
            history.push_state_with_url(&JsValue::from_str(fragment), "", Some(fragment))
        {
            log::warn!("pushState failed: {:?}", err);
        }
    }
}

/// Broadcasts a bubbling `CustomEvent` on the document.
pub fn dispatch_custom(name: &str, detail: &JsValue) {
    let Some(document) = document() else {
        return;
    };
    let init = web_sys::CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(detail);
    match web_sys::CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            let _ = document.dispatch_event(&event);
        }
        Err(err) => log::warn!("cannot create `{}` event: {:?}", name, err),
    }
}

/// Binds a listener for the whole page lifetime.
pub fn listen<F>(target: &web_sys::EventTarget, event: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    let _ = target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref::<js_sys::Function>());
    // Controllers live as long as the page; keep the closure alive.
    closure.forget();
}

pub fn listen_window<F>(event: &str, handler: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    if let Some(window) = web_sys::window() {
        listen(&window, event, handler);
    }
}

/// Runs `f` once the DOM is parsed, immediately if it already is.
pub fn on_dom_ready<F>(f: F)
where
    F: FnOnce() + 'static,
{
    let Some(document) = document() else {
        return;
    };
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let mut f = Some(f);
    listen(&document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    });
}

/// Runs `f` once the page and its resources are loaded, immediately if they are.
pub fn on_load<F>(f: F)
where
    F: FnOnce() + 'static,
{
    let Some(document) = document() else {
        return;
    };
    if document.ready_state() == "complete" {
        f();
        return;
    }
    let mut f = Some(f);
    listen_window("load", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    });
}
