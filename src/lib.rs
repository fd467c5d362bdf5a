#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod config;
pub mod element;
pub mod error;
pub mod mixer;
pub mod tone;
pub mod video_sync;
pub mod visibility;
pub mod wav;

pub use config::ShowcaseConfig;
pub use element::{MediaEvent, PlaybackElement, Readiness, Side};
pub use error::{Result, ShowcaseError};
pub use mixer::{DualChannelMixer, Preset};
pub use video_sync::{SyncState, VideoPairSync};
pub use visibility::{visible_fraction, Arming, FrameThrottle, LevelController, RegionRect};

// Browser wiring only compiles when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod media;
    mod page;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let config = page::load_config(&document);

        // Sections are optional and independent; one failing leaves the rest wired.
        let sections = [
            ("video pair", page::wire_video_pair(&document, &config)),
            ("audio pair", page::wire_audio_pair(&window, &document, &config)),
            ("meter pair", page::wire_meter_pair(&window, &document, &config)),
        ];
        for (name, result) in sections {
            if let Err(e) = result {
                log::error!("{name} wiring failed: {e:?}");
            }
        }
        Ok(())
    }
}

