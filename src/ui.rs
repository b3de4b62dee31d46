//! Simple page wiring outside the two engines: reveal-on-scroll, gallery
//! carousel, celebration burst. Each feature silently disables itself when
//! its DOM pieces are missing.

use rand::Rng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};

/// Attach a click handler to an element by id
pub fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
    if let Some(el) = document.get_element_by_id(id) {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Remove an element after a delay (once its exit animation is over)
pub fn remove_after(el: &Element, ms: i32) {
    let el = el.clone();
    let closure = Closure::<dyn FnMut()>::new(move || el.remove());
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
    }
    closure.forget();
}

fn mark_all_visible(els: &[Element]) {
    for el in els {
        let _ = el.class_list().add_1("is-visible");
    }
}

/// Fade sections in as they scroll into view. Reduced motion or a missing
/// observer API degrades to "always visible".
pub fn init_reveal(document: &Document, reduced_motion: bool) {
    let Ok(list) = document.query_selector_all(".reveal") else {
        return;
    };
    let els: Vec<Element> = (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    if els.is_empty() {
        return;
    }
    if reduced_motion {
        mark_all_visible(&els);
        return;
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1("is-visible");
                    observer.unobserve(&target);
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.12));
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for el in &els {
                observer.observe(el);
            }
            callback.forget();
        }
        // No observer support: show everything up front
        Err(_) => mark_all_visible(&els),
    }
}

/// Gallery arrows scroll the track by one item width
pub fn init_carousel(document: &Document) {
    let Some(track) = document.get_element_by_id("carousel-track") else {
        return;
    };

    fn scroll_by_item(track: &Element, dir: f64) {
        let step = track
            .query_selector(".carousel__item")
            .ok()
            .flatten()
            .map(|item| item.get_bounding_client_rect().width() + 12.0)
            .unwrap_or(280.0);
        let options = ScrollToOptions::new();
        options.set_left(dir * step);
        options.set_behavior(ScrollBehavior::Smooth);
        track.scroll_by_with_scroll_to_options(&options);
    }

    {
        let track = track.clone();
        on_click(document, "prev-btn", move || scroll_by_item(&track, -1.0));
    }
    on_click(document, "next-btn", move || scroll_by_item(&track, 1.0));
}

/// Celebration palette (matches the particle palette, opaque)
const BURST_PALETTE: [&str; 4] = ["#f2b3c6", "#c85a7a", "#d8b08c", "#fff3ea"];

fn heart_svg_data(fill: &str) -> String {
    let svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 24 24\" fill=\"{fill}\"><path d=\"M12 21s-7.2-4.7-10-9.3C-0.4 7.5 2.2 3 6.8 3c2.2 0 3.8 1.1 5.2 2.6C13.4 4.1 15 3 17.2 3c4.6 0 7.2 4.5 4.8 8.7C19.2 16.3 12 21 12 21z\"/></svg>"
    );
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        String::from(js_sys::encode_uri_component(&svg))
    )
}

/// Scatter a burst of floating hearts from a point. Reduced motion keeps
/// the burst but halves it.
pub fn burst_at(
    document: &Document,
    stage: &Element,
    x: f64,
    y: f64,
    rng: &mut Pcg32,
    reduced_motion: bool,
) {
    let count = if reduced_motion { 12 } else { 26 };
    for _ in 0..count {
        let Ok(el) = document.create_element("img") else {
            continue;
        };
        el.set_class_name("burst-heart");
        let fill = BURST_PALETTE[rng.random_range(0..BURST_PALETTE.len())];
        let _ = el.set_attribute("src", &heart_svg_data(fill));
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            continue;
        };

        let style = el.style();
        let _ = style.set_property("left", &format!("{x:.0}px"));
        let _ = style.set_property("top", &format!("{y:.0}px"));
        let _ = style.set_property("--dx", &format!("{:.0}px", rng.random_range(-220.0..220.0)));
        let _ = style.set_property("--dy", &format!("{:.0}px", rng.random_range(-260.0..-40.0)));
        let _ = style.set_property("--rot", &format!("{:.0}deg", rng.random_range(-40.0..40.0)));
        let _ = style.set_property(
            "animation-delay",
            &format!("{:.0}ms", rng.random_range(0.0..140.0)),
        );
        let size = rng.random_range(14.0..22.0_f64);
        let _ = style.set_property("width", &format!("{size:.0}px"));
        let _ = style.set_property("height", &format!("{size:.0}px"));

        let _ = stage.append_child(&el);
        remove_after(&el, 1250);
    }
}
