//! Petalfall entry point
//!
//! Wasm builds boot the page and wire every feature independently; the
//! native binary runs a short headless demo of the deterministic core.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, HtmlButtonElement, HtmlCanvasElement,
        HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
        TouchEvent, Window,
    };

    use petalfall::audio::Music;
    use petalfall::renderer::CanvasSurface;
    use petalfall::sim::{EvadeState, FieldState, Layout, Rect};
    use petalfall::{consts, normalized_dt, platform, ui};

    /// Page instance holding all state
    struct App {
        seed: u64,
        field: Option<FieldState>,
        surface: Option<CanvasSurface>,
        evade: EvadeState,
        /// RNG for decorative draws outside the core (celebration burst)
        rng: Pcg32,
        last_time: f64,
        reduced_motion: bool,
    }

    impl App {
        fn new(seed: u64, reduced_motion: bool) -> Self {
            Self {
                seed,
                field: None,
                surface: None,
                evade: EvadeState::new(seed),
                rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
                last_time: 0.0,
                reduced_motion,
            }
        }
    }

    fn dom_rect(el: &Element) -> Rect {
        let r = el.get_bounding_client_rect();
        Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        )
    }

    fn viewport_size(window: &Window) -> Vec2 {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Vec2::new(w as f32, h as f32)
    }

    fn layout_snapshot(window: &Window, control: &Element, anchor: &Element) -> Layout {
        Layout {
            control: dom_rect(control),
            anchor: dom_rect(anchor),
            viewport: viewport_size(window),
        }
    }

    /// Pin the control to a fixed viewport position, anchored by its center
    fn apply_override(control: &HtmlElement, center: Vec2) {
        let style = control.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("left", &format!("{:.1}px", center.x));
        let _ = style.set_property("top", &format!("{:.1}px", center.y));
        let _ = style.set_property("transform", "translate(-50%, -50%)");
        let _ = style.set_property("z-index", "30");
    }

    /// Return the control to its natural document-flow position
    fn clear_override(control: &HtmlElement) {
        let style = control.style();
        for prop in ["position", "left", "top", "transform", "z-index"] {
            let _ = style.remove_property(prop);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Petalfall starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let reduced_motion = platform::prefers_reduced_motion();
        if reduced_motion {
            log::info!("Reduced motion requested; the particle field stays off");
        }

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, reduced_motion)));

        ui::init_reveal(&document, reduced_motion);
        ui::init_carousel(&document);
        let music = Music::init(&document);

        setup_particles(&window, &document, app.clone());
        setup_evasion(&window, &document, app.clone());
        setup_resize(&window, &document, app.clone());
        setup_celebration(&window, &document, app, music);

        log::info!("Petalfall running (seed {seed})");
    }

    /// Boot the particle field. Reduced motion or a missing 2D context means
    /// no particles are allocated and no frame is ever scheduled.
    fn setup_particles(window: &Window, document: &Document, app: Rc<RefCell<App>>) {
        let surface = document
            .get_element_by_id("petals")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(CanvasSurface::new);

        let reduced_motion = app.borrow().reduced_motion;
        if !platform::should_animate(reduced_motion, surface.is_some()) {
            log::info!("Particle field disabled");
            return;
        }
        let Some(mut surface) = surface else {
            return;
        };

        let size = viewport_size(window);
        surface.resize(size.x as f64, size.y as f64, window.device_pixel_ratio());
        {
            let mut a = app.borrow_mut();
            let field = FieldState::new(size.x, size.y, a.seed);
            log::info!("Seeded {} particles", field.particles().len());
            a.field = Some(field);
            a.surface = Some(surface);
        }

        request_frame(app);
    }

    fn request_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| frame(app, time));
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let frame_ms = if a.last_time > 0.0 {
                time - a.last_time
            } else {
                consts::TICK_MS
            };
            a.last_time = time;
            let dt = normalized_dt(frame_ms);

            let App { field, surface, .. } = &mut *a;
            if let (Some(field), Some(surface)) = (field.as_mut(), surface.as_ref()) {
                field.advance(dt);
                surface.render(field);
            }
        }
        request_frame(app);
    }

    /// Wire the runaway decline control
    fn setup_evasion(window: &Window, document: &Document, app: Rc<RefCell<App>>) {
        let Some(control) = document
            .get_element_by_id("no-btn")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let Some(anchor) = document.get_element_by_id("cta-row") else {
            return;
        };

        // Arm on first entry into the question panel, so the control doesn't
        // vanish while the visitor is still reading
        if let Some(panel) = document.query_selector(".question-panel").ok().flatten() {
            for event in ["pointerenter", "touchstart"] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
                    let mut a = app.borrow_mut();
                    if !a.evade.is_armed() {
                        log::info!("Decline control armed");
                        a.evade.arm();
                    }
                });
                let options = AddEventListenerOptions::new();
                options.set_once(true);
                options.set_passive(true);
                let _ = panel.add_event_listener_with_callback_and_add_event_listener_options(
                    event,
                    closure.as_ref().unchecked_ref(),
                    &options,
                );
                closure.forget();
            }
        }

        // Mouse proximity
        {
            let app = app.clone();
            let window_c = window.clone();
            let control_c = control.clone();
            let anchor_c = anchor.clone();
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                let layout = layout_snapshot(&window_c, &control_c, &anchor_c);
                let point = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let dodged = app
                    .borrow_mut()
                    .evade
                    .pointer_move(point, &layout, platform::now_ms());
                if let Some(center) = dodged {
                    apply_override(&control_c, center);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch proximity (finger approach)
        {
            let app = app.clone();
            let window_c = window.clone();
            let control_c = control.clone();
            let anchor_c = anchor.clone();
            let closure = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let layout = layout_snapshot(&window_c, &control_c, &anchor_c);
                let point = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                let dodged = app
                    .borrow_mut()
                    .evade
                    .pointer_move(point, &layout, platform::now_ms());
                if let Some(center) = dodged {
                    apply_override(&control_c, center);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicking the control dodges from its own center; clicking can
        // never succeed once armed
        {
            let app = app.clone();
            let window_c = window.clone();
            let control_c = control.clone();
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                event.prevent_default();
                let layout = layout_snapshot(&window_c, &control_c, &anchor);
                let dodged = app.borrow_mut().evade.dodge_from(
                    layout.control.center(),
                    &layout,
                    platform::now_ms(),
                );
                if let Some(center) = dodged {
                    apply_override(&control_c, center);
                }
            });
            let _ =
                control.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Viewport changes: retransform the canvas, move the wrap bounds, and
    /// drop any positional override (rotation would leave it stranded)
    fn setup_resize(window: &Window, document: &Document, app: Rc<RefCell<App>>) {
        let control = document
            .get_element_by_id("no-btn")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let window_c = window.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            let size = viewport_size(&window_c);
            let dpr = window_c.device_pixel_ratio();

            let mut a = app.borrow_mut();
            a.evade.on_resize();
            if let Some(control) = &control {
                clear_override(control);
            }
            let App { field, surface, .. } = &mut *a;
            if let Some(surface) = surface.as_mut() {
                surface.resize(size.x as f64, size.y as f64, dpr);
            }
            if let Some(field) = field.as_mut() {
                field.resize(size.x, size.y);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Accept: heart bursts, final message, frozen decline control, music
    fn setup_celebration(
        window: &Window,
        document: &Document,
        app: Rc<RefCell<App>>,
        music: Option<Music>,
    ) {
        let Some(accept) = document.get_element_by_id("yes-btn") else {
            return;
        };
        let Some(final_note) = document
            .get_element_by_id("final")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let Some(stage) = document.get_element_by_id("celebrate") else {
            return;
        };
        let control = document
            .get_element_by_id("no-btn")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let window_c = window.clone();
        let document_c = document.clone();
        let accept_c = accept.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
            let size = viewport_size(&window_c);
            let rect = accept_c.get_bounding_client_rect();

            {
                let mut a = app.borrow_mut();
                let reduced = a.reduced_motion;
                let App { rng, .. } = &mut *a;
                ui::burst_at(
                    &document_c,
                    &stage,
                    rect.left() + rect.width() / 2.0,
                    rect.top() + rect.height() / 2.0,
                    rng,
                    reduced,
                );
                ui::burst_at(
                    &document_c,
                    &stage,
                    (size.x * 0.22) as f64,
                    (size.y * 0.30) as f64,
                    rng,
                    reduced,
                );
                ui::burst_at(
                    &document_c,
                    &stage,
                    (size.x * 0.78) as f64,
                    (size.y * 0.32) as f64,
                    rng,
                    reduced,
                );
            }

            // Show the final message and bring it into view
            final_note.set_hidden(false);
            let scroll = ScrollIntoViewOptions::new();
            scroll.set_behavior(if app.borrow().reduced_motion {
                ScrollBehavior::Auto
            } else {
                ScrollBehavior::Smooth
            });
            scroll.set_block(ScrollLogicalPosition::Start);
            final_note.scroll_into_view_with_scroll_into_view_options(&scroll);
            let _ = final_note.class_list().add_1("is-visible");

            // Freeze the decline control in natural flow
            if let Some(control) = &control {
                app.borrow_mut().evade.disarm();
                clear_override(control);
                if let Some(button) = control.dyn_ref::<HtmlButtonElement>() {
                    button.set_disabled(true);
                }
                let _ = control.style().set_property("opacity", "0.5");
                let _ = control.style().set_property("cursor", "not-allowed");
            }

            // The click is a user gesture, so playback is allowed now
            if let Some(music) = &music {
                music.ensure_playing();
            }
            log::info!("Accepted!");
        });
        let _ = accept.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use petalfall::sim::{EvadeState, FieldState, Layout, Rect};

    env_logger::init();
    log::info!("Petalfall (native) starting...");
    log::info!("Native mode is a headless demo - run with `trunk serve` for the web page");

    let seed = petalfall::platform::now_ms() as u64;
    let mut field = FieldState::new(1280.0, 800.0, seed);
    for _ in 0..600 {
        field.advance(1.0);
    }
    log::info!(
        "Field advanced 600 ticks with {} particles",
        field.particles().len()
    );

    let layout = Layout {
        control: Rect::new(600.0, 400.0, 120.0, 48.0),
        anchor: Rect::new(500.0, 380.0, 320.0, 90.0),
        viewport: Vec2::new(1280.0, 800.0),
    };
    let mut evade = EvadeState::new(seed);
    evade.arm();
    match evade.pointer_move(Vec2::new(560.0, 420.0), &layout, 0.0) {
        Some(center) => log::info!("Demo dodge landed at ({:.0}, {:.0})", center.x, center.y),
        None => log::info!("Demo pointer never came close enough to dodge"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
