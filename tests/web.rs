#![cfg(target_arch = "wasm32")]

use abpair_wasm::tone::StereoBuffer;
use abpair_wasm::wasm::media::wav_object_url;
use abpair_wasm::wav::encode_wav;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn wav_bytes_become_blob_url() {
    let buffer = StereoBuffer {
        sample_rate: 44_100,
        channels: vec![vec![0.0; 16], vec![0.0; 16]],
    };
    let bytes = encode_wav(&buffer).unwrap();
    let url = wav_object_url(&bytes).unwrap();
    assert!(url.starts_with("blob:"));
    web_sys::Url::revoke_object_url(&url).unwrap();
}

#[wasm_bindgen_test]
fn media_element_reports_readiness() {
    use abpair_wasm::wasm::media::WebMedia;
    use abpair_wasm::{PlaybackElement, Readiness};
    use wasm_bindgen::JsCast;

    let document = web_sys::window().unwrap().document().unwrap();
    let el = document
        .create_element("audio")
        .unwrap()
        .dyn_into::<web_sys::HtmlMediaElement>()
        .unwrap();
    let mut media = WebMedia::new(el);
    assert_eq!(media.readiness(), Readiness::Nothing);
    media.set_volume(0.25);
    assert_eq!(media.volume(), 0.25);
    media.set_muted(true);
    assert!(media.is_muted());
}
