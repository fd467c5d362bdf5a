use std::rc::Rc;

use log::debug;
use wasm_bindgen::{closure::Closure, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlMediaElement, Url};

use crate::element::{PlaybackElement, Readiness};

/// `PlaybackElement` backed by an `<audio>` or `<video>` element.
#[derive(Clone)]
pub struct WebMedia {
    el: HtmlMediaElement,
    user_provided: bool,
    // Shared rejection handler for `play()` promises.
    swallow: Rc<Closure<dyn FnMut(JsValue)>>,
}

impl WebMedia {
    pub fn new(el: HtmlMediaElement) -> Self {
        let swallow = Closure::wrap(Box::new(|err: JsValue| {
            debug!("play() rejected: {err:?}");
        }) as Box<dyn FnMut(JsValue)>);
        Self {
            el,
            user_provided: false,
            swallow: Rc::new(swallow),
        }
    }

    pub fn element(&self) -> &HtmlMediaElement {
        &self.el
    }
}

impl PlaybackElement for WebMedia {
    fn position(&self) -> f64 {
        self.el.current_time()
    }

    fn seek(&mut self, secs: f64) {
        self.el.set_current_time(secs);
    }

    fn is_paused(&self) -> bool {
        self.el.paused()
    }

    fn play(&mut self) {
        match self.el.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.swallow);
            }
            Err(err) => debug!("play() threw: {err:?}"),
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.el.pause() {
            debug!("pause() threw: {err:?}");
        }
    }

    fn is_muted(&self) -> bool {
        self.el.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.el.set_muted(muted);
    }

    fn volume(&self) -> f64 {
        self.el.volume()
    }

    fn set_volume(&mut self, volume: f64) {
        self.el.set_volume(volume.clamp(0.0, 1.0));
    }

    fn set_native_loop(&mut self, looping: bool) {
        self.el.set_loop(looping);
    }

    fn readiness(&self) -> Readiness {
        Readiness::from_ready_state(self.el.ready_state())
    }

    fn set_source(&mut self, src: &str) {
        self.el.set_src(src);
    }

    fn reload(&mut self) {
        self.el.load();
    }

    fn is_user_provided(&self) -> bool {
        self.user_provided
    }

    fn set_user_provided(&mut self, user_provided: bool) {
        self.user_provided = user_provided;
    }
}

/// Wrap encoded WAV bytes in a `Blob` and return an object URL usable as a
/// media `src`.
pub fn wav_object_url(bytes: &[u8]) -> Result<String, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let opts = BlobPropertyBag::new();
    opts.set_type("audio/wav");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    Url::create_object_url_with_blob(&blob)
}
