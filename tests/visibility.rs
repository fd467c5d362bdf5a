mod common;

use abpair_wasm::{visible_fraction, Arming, DualChannelMixer, FrameThrottle, LevelController, RegionRect, ShowcaseConfig, Side};
use common::{approx, FakeMedia};

fn rect(top: f64, bottom: f64) -> RegionRect {
    RegionRect { top, bottom }
}

#[test]
fn fraction_of_region_in_view() {
    // Fully inside an 800px viewport.
    assert_eq!(visible_fraction(rect(100.0, 500.0), 800.0), 1.0);
    // Half scrolled off the top.
    assert!(approx(visible_fraction(rect(-200.0, 200.0), 800.0), 0.5));
    // Below the fold.
    assert_eq!(visible_fraction(rect(900.0, 1300.0), 800.0), 0.0);
    // Above the viewport.
    assert_eq!(visible_fraction(rect(-600.0, -100.0), 800.0), 0.0);
}

#[test]
fn tall_region_is_measured_against_viewport() {
    // 2000px region filling the whole 800px viewport counts as fully visible.
    assert_eq!(visible_fraction(rect(-500.0, 1500.0), 800.0), 1.0);
    assert!(approx(visible_fraction(rect(400.0, 2400.0), 800.0), 0.5));
}

#[test]
fn degenerate_geometry_is_invisible() {
    assert_eq!(visible_fraction(rect(100.0, 100.0), 800.0), 0.0);
    assert_eq!(visible_fraction(rect(100.0, 500.0), 0.0), 0.0);
}

#[test]
fn throttle_coalesces_until_frame() {
    let mut throttle = FrameThrottle::new();
    assert!(throttle.request());
    assert!(!throttle.request());
    assert!(!throttle.request());
    assert!(throttle.is_pending());
    throttle.frame();
    assert!(!throttle.is_pending());
    assert!(throttle.request());
}

fn mixer() -> DualChannelMixer<FakeMedia> {
    let mut m = DualChannelMixer::new(FakeMedia::new(), FakeMedia::new(), &ShowcaseConfig::default());
    m.start();
    m
}

#[test]
fn scroll_armed_controller_drives_level_directly() {
    let mut m = mixer();
    let mut controller = LevelController::new(Arming::Scroll, 0.6);
    controller.update(0.4, &mut m);
    assert!(approx(m.master_level(), 0.4));
    assert!(!m.element(Side::A).muted);

    controller.update(0.0, &mut m);
    assert_eq!(m.master_level(), 0.0);
    assert!(m.element(Side::B).muted);
}

#[test]
fn gesture_armed_controller_holds_samples_until_unlock() {
    let mut m = mixer();
    let mut controller = LevelController::new(Arming::UserGesture, 0.6);
    controller.update(0.75, &mut m);
    assert_eq!(m.master_level(), 0.0);
    assert!(m.element(Side::A).muted);

    controller.unlock(&mut m);
    assert!(approx(m.master_level(), 0.75));
    assert!(!m.element(Side::A).muted);

    controller.update(0.25, &mut m);
    assert!(approx(m.master_level(), 0.25));
}

#[test]
fn unlock_out_of_view_uses_audible_floor() {
    let mut m = mixer();
    m.element_mut(Side::A).position = 3.0;
    m.element_mut(Side::B).position = 3.0;
    let mut controller = LevelController::new(Arming::UserGesture, 0.6);
    controller.update(0.0, &mut m);
    controller.unlock(&mut m);

    assert!(approx(m.master_level(), 0.6));
    for side in [Side::A, Side::B] {
        let el = m.element(side);
        assert_eq!(el.position, 0.0);
        assert!(!el.muted);
        assert!(!el.paused);
    }
}

#[test]
fn second_unlock_is_a_no_op() {
    let mut m = mixer();
    let controller = LevelController::new(Arming::UserGesture, 0.6);
    controller.unlock(&mut m);
    m.element_mut(Side::A).position = 2.0;
    controller.unlock(&mut m);
    assert_eq!(m.element(Side::A).position, 2.0);
}

#[test]
fn mixer_unlocked_elsewhere_arms_controller() {
    let mut m = mixer();
    m.unlock_audio(0.6);
    let mut controller = LevelController::new(Arming::UserGesture, 0.6);
    controller.update(0.3, &mut m);
    assert!(approx(m.master_level(), 0.3));

    m.element_mut(Side::A).position = 1.5;
    controller.unlock(&mut m);
    assert_eq!(m.element(Side::A).position, 1.5);
    assert!(approx(m.master_level(), 0.3));
}
