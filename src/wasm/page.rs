use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, HtmlMediaElement, KeyboardEvent, Url, Window};

use super::media::{wav_object_url, WebMedia};
use crate::config::ShowcaseConfig;
use crate::element::{MediaEvent, PlaybackElement, Side};
use crate::mixer::{DualChannelMixer, Preset};
use crate::tone::{self, ToneVariant};
use crate::video_sync::VideoPairSync;
use crate::visibility::{visible_fraction, Arming, FrameThrottle, LevelController, RegionRect};
use crate::wav::encode_wav;

type SharedMixer = Rc<RefCell<DualChannelMixer<WebMedia>>>;

const CONFIG_ID: &str = "showcase-config";

/// Inline `<script type="application/toml" id="showcase-config">`, if any.
pub fn load_config(document: &Document) -> ShowcaseConfig {
    let Some(txt) = document
        .get_element_by_id(CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return ShowcaseConfig::default();
    };
    ShowcaseConfig::from_toml_str(&txt).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        ShowcaseConfig::default()
    })
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn listen<F>(target: &EventTarget, name: &str, f: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn media_pair(document: &Document, a: &str, b: &str) -> Option<(HtmlMediaElement, HtmlMediaElement)> {
    match (by_id(document, a), by_id(document, b)) {
        (Some(a), Some(b)) => Some((a, b)),
        _ => {
            debug!("#{a} / #{b} not on page, skipping");
            None
        }
    }
}

pub fn wire_video_pair(document: &Document, config: &ShowcaseConfig) -> Result<(), JsValue> {
    let ids = &config.ids;
    let Some((primary, secondary)) = media_pair(document, &ids.video_primary, &ids.video_secondary) else {
        return Ok(());
    };
    let sync = Rc::new(RefCell::new(VideoPairSync::new(
        WebMedia::new(primary.clone()),
        WebMedia::new(secondary.clone()),
    )));

    for (side, el) in [(Side::A, &primary), (Side::B, &secondary)] {
        for event in [MediaEvent::CanPlayThrough, MediaEvent::Ended, MediaEvent::Seeked] {
            let sync = sync.clone();
            listen(el, event.dom_name(), move |_| sync.borrow_mut().handle(side, event))?;
        }
    }
    sync.borrow_mut().start();

    for (side, input_id) in [(Side::A, &ids.video_primary_input), (Side::B, &ids.video_secondary_input)] {
        let Some(input) = by_id::<HtmlInputElement>(document, input_id) else {
            continue;
        };
        let sync = sync.clone();
        let target = input.clone();
        listen(&input, "change", move |_| {
            let Some(file) = target.files().and_then(|files| files.get(0)) else {
                return;
            };
            match Url::create_object_url_with_blob(&file) {
                Ok(src) => sync.borrow_mut().replace_source(side, &src, true),
                Err(e) => warn!("could not open {}: {e:?}", file.name()),
            }
        })?;
    }
    info!("video pair wired");
    Ok(())
}

pub fn wire_audio_pair(window: &Window, document: &Document, config: &ShowcaseConfig) -> Result<(), JsValue> {
    let ids = &config.ids;
    let Some((before, after)) = media_pair(document, &ids.audio_before, &ids.audio_after) else {
        return Ok(());
    };

    // Rendering is synchronous, so the sources exist before the mixer touches them.
    let mut before_media = WebMedia::new(before);
    let mut after_media = WebMedia::new(after);
    for (media, variant) in [(&mut before_media, ToneVariant::Before), (&mut after_media, ToneVariant::After)] {
        let bytes = encode_wav(&tone::render(variant)?)?;
        media.set_source(&wav_object_url(&bytes)?);
    }

    let mixer = wire_mixer(before_media, after_media, config)?;
    wire_fader(document, &ids.audio_fader, &mixer)?;
    for (id, preset) in [
        (&ids.snap_before, Preset::SnapBefore),
        (&ids.snap_after, Preset::SnapAfter),
        (&ids.reset, Preset::Reset),
    ] {
        let Some(button) = document.get_element_by_id(id) else {
            continue;
        };
        let mixer = mixer.clone();
        let fader = by_id::<HtmlInputElement>(document, &ids.audio_fader);
        listen(&button, "click", move |_| {
            let mut m = mixer.borrow_mut();
            m.apply(preset);
            sync_fader(fader.as_ref(), m.mix_ratio());
        })?;
    }
    wire_space_toggle(window, document, &ids.audio_fader, &mixer)?;

    if let Some(region) = document.get_element_by_id(&ids.audio_region) {
        let controller = Rc::new(RefCell::new(LevelController::new(Arming::Scroll, config.audible_floor)));
        wire_visibility(window, region, mixer, controller)?;
    }
    info!("audio pair wired");
    Ok(())
}

pub fn wire_meter_pair(window: &Window, document: &Document, config: &ShowcaseConfig) -> Result<(), JsValue> {
    let ids = &config.ids;
    let Some((before, after)) = media_pair(document, &ids.meter_before, &ids.meter_after) else {
        return Ok(());
    };
    let mixer = wire_mixer(WebMedia::new(before), WebMedia::new(after), config)?;
    wire_fader(document, &ids.meter_fader, &mixer)?;

    let controller = Rc::new(RefCell::new(LevelController::new(Arming::UserGesture, config.audible_floor)));
    if let Some(button) = document.get_element_by_id(&ids.meter_unlock) {
        let mixer = mixer.clone();
        let controller = controller.clone();
        listen(&button, "click", move |_| {
            controller.borrow().unlock(&mut mixer.borrow_mut());
        })?;
    }
    if let Some(region) = document.get_element_by_id(&ids.meter_region) {
        wire_visibility(window, region, mixer, controller)?;
    }
    info!("meter pair wired");
    Ok(())
}

fn wire_mixer(before: WebMedia, after: WebMedia, config: &ShowcaseConfig) -> Result<SharedMixer, JsValue> {
    let targets = [(Side::A, before.element().clone()), (Side::B, after.element().clone())];
    let mixer = Rc::new(RefCell::new(DualChannelMixer::new(before, after, config)));
    for (side, el) in &targets {
        for event in [MediaEvent::Play, MediaEvent::Pause, MediaEvent::TimeUpdate] {
            let mixer = mixer.clone();
            let side = *side;
            listen(el, event.dom_name(), move |_| mixer.borrow_mut().handle(side, event))?;
        }
    }
    mixer.borrow_mut().start();
    Ok(mixer)
}

fn sync_fader(fader: Option<&HtmlInputElement>, ratio: f64) {
    if let Some(fader) = fader {
        fader.set_value_as_number(ratio * 100.0);
    }
}

fn wire_fader(document: &Document, id: &str, mixer: &SharedMixer) -> Result<(), JsValue> {
    let Some(fader) = by_id::<HtmlInputElement>(document, id) else {
        return Ok(());
    };
    sync_fader(Some(&fader), mixer.borrow().mix_ratio());
    let mixer = mixer.clone();
    let input = fader.clone();
    listen(&fader, "input", move |_| {
        let value = input.value_as_number();
        if value.is_finite() {
            mixer.borrow_mut().set_fader(value);
        }
    })
}

fn wire_space_toggle(window: &Window, document: &Document, fader_id: &str, mixer: &SharedMixer) -> Result<(), JsValue> {
    let mixer = mixer.clone();
    let fader = by_id::<HtmlInputElement>(document, fader_id);
    listen(window, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if key.code() != "Space" {
            return;
        }
        key.prevent_default();
        let mut m = mixer.borrow_mut();
        m.toggle_extreme();
        sync_fader(fader.as_ref(), m.mix_ratio());
    })
}

fn sample_region(window: &Window, region: &Element) -> f64 {
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let rect = region.get_bounding_client_rect();
    visible_fraction(
        RegionRect {
            top: rect.top(),
            bottom: rect.bottom(),
        },
        viewport_height,
    )
}

/// Recompute the level on scroll and resize, at most once per animation
/// frame, and once right now.
fn wire_visibility(
    window: &Window,
    region: Element,
    mixer: SharedMixer,
    controller: Rc<RefCell<LevelController>>,
) -> Result<(), JsValue> {
    let throttle = Rc::new(RefCell::new(FrameThrottle::new()));

    let on_frame = {
        let window = window.clone();
        let region = region.clone();
        let throttle = throttle.clone();
        let mixer = mixer.clone();
        let controller = controller.clone();
        Rc::new(Closure::wrap(Box::new(move || {
            throttle.borrow_mut().frame();
            let fraction = sample_region(&window, &region);
            controller.borrow_mut().update(fraction, &mut mixer.borrow_mut());
        }) as Box<dyn FnMut()>))
    };

    for name in ["scroll", "resize"] {
        let window_cb = window.clone();
        let throttle = throttle.clone();
        let on_frame = on_frame.clone();
        listen(window, name, move |_| {
            if !throttle.borrow_mut().request() {
                return;
            }
            if let Err(e) = window_cb.request_animation_frame((*on_frame).as_ref().unchecked_ref()) {
                throttle.borrow_mut().frame();
                warn!("requestAnimationFrame failed: {e:?}");
            }
        })?;
    }

    let fraction = sample_region(window, &region);
    controller.borrow_mut().update(fraction, &mut mixer.borrow_mut());
    Ok(())
}
