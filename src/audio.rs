//! Background music control
//!
//! Drives the page's audio element from the toggle button and the intro
//! overlay. Browsers may refuse playback outside a user gesture; rejected
//! play promises are swallowed and the label stays on "play".

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAudioElement};

use crate::ui::remove_after;

const VOLUME: f64 = 0.4;

/// Handle to the page's background music
#[derive(Clone)]
pub struct Music {
    audio: HtmlAudioElement,
    toggle: Option<Element>,
}

impl Music {
    /// Look up the audio element and wire its controls. `None` disables
    /// music entirely.
    pub fn init(document: &Document) -> Option<Self> {
        let audio: HtmlAudioElement = document.get_element_by_id("bgm")?.dyn_into().ok()?;
        audio.set_volume(VOLUME);
        let toggle = document.get_element_by_id("music-toggle");

        let music = Self { audio, toggle };
        music.wire_toggle();
        music.wire_intro_overlay(document);
        Some(music)
    }

    fn wire_toggle(&self) {
        let Some(toggle) = &self.toggle else {
            return;
        };
        let music = self.clone();
        let closure = Closure::<dyn FnMut()>::new(move || music.toggle_playback());
        let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Intro overlay: one tap starts the music, then the overlay fades away
    fn wire_intro_overlay(&self, document: &Document) {
        let (Some(overlay), Some(play)) = (
            document.get_element_by_id("intro-overlay"),
            document.get_element_by_id("intro-play"),
        ) else {
            return;
        };
        for event in ["click", "touchstart"] {
            let music = self.clone();
            let overlay = overlay.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                music.ensure_playing();
                let _ = overlay.class_list().add_1("intro-overlay--hide");
                remove_after(&overlay, 450);
            });
            let _ = play.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn toggle_playback(&self) {
        if self.audio.paused() {
            self.play();
        } else {
            let _ = self.audio.pause();
            self.sync_label();
        }
    }

    /// Start playback unless already playing (celebration path)
    pub fn ensure_playing(&self) {
        if !self.audio.paused() {
            return;
        }
        self.play();
    }

    fn play(&self) {
        if let Ok(promise) = self.audio.play() {
            // Sync the label once playback actually starts
            let synced = self.clone();
            let on_ok = Closure::<dyn FnMut(JsValue)>::new(move |_| synced.sync_label());
            let on_err = Closure::<dyn FnMut(JsValue)>::new(|_| {});
            let _ = promise.then(&on_ok).catch(&on_err);
            on_ok.forget();
            on_err.forget();
        }
    }

    /// Mirror playback state onto the toggle button
    fn sync_label(&self) {
        let Some(toggle) = &self.toggle else {
            return;
        };
        let playing = !self.audio.paused();
        let _ = toggle.set_attribute("aria-pressed", if playing { "true" } else { "false" });
        if let Ok(Some(label)) = toggle.query_selector(".music-toggle__text") {
            label.set_text_content(Some(if playing {
                "Pause our song"
            } else {
                "Play our song"
            }));
        }
    }
}
