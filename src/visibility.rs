//! Maps how much of a page region is on screen to a mixer master level.

use log::debug;

use crate::element::PlaybackElement;
use crate::mixer::DualChannelMixer;

/// Vertical extent of a region in viewport coordinates, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRect {
    pub top: f64,
    pub bottom: f64,
}

impl RegionRect {
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}

/// Fraction of `rect` inside a viewport of height `viewport_height`,
/// relative to whichever of the two is shorter.
pub fn visible_fraction(rect: RegionRect, viewport_height: f64) -> f64 {
    let intersection = (rect.bottom.min(viewport_height) - rect.top.max(0.0)).max(0.0);
    let denom = viewport_height.min(rect.height());
    if denom <= 0.0 {
        return 0.0;
    }
    (intersection / denom).clamp(0.0, 1.0)
}

/// Coalesces bursts of scroll/resize events into a single pending frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the caller must schedule a new animation frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called from the animation frame callback.
    pub fn frame(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// What allows the controller's level to reach the mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arming {
    /// Scrolling alone drives the level.
    Scroll,
    /// Samples are held until the visitor explicitly enables audio.
    UserGesture,
}

pub struct LevelController {
    arming: Arming,
    audible_floor: f64,
    last_fraction: f64,
}

impl LevelController {
    pub fn new(arming: Arming, audible_floor: f64) -> Self {
        Self {
            arming,
            audible_floor,
            last_fraction: 0.0,
        }
    }

    pub fn last_fraction(&self) -> f64 {
        self.last_fraction
    }

    pub fn update<P: PlaybackElement>(&mut self, fraction: f64, mixer: &mut DualChannelMixer<P>) {
        self.last_fraction = fraction.clamp(0.0, 1.0);
        if self.arming == Arming::Scroll || mixer.is_unlocked() {
            mixer.set_master_level(self.last_fraction);
        }
    }

    /// Enable-audio action. Only the first call on a mixer has an effect.
    pub fn unlock<P: PlaybackElement>(&self, mixer: &mut DualChannelMixer<P>) {
        if mixer.is_unlocked() {
            return;
        }
        if self.arming == Arming::UserGesture {
            // The held sample becomes the level before the floor check.
            mixer.set_master_level(self.last_fraction);
        }
        if mixer.unlock_audio(self.audible_floor) {
            debug!("level controller: unlocked, level {:.2}", mixer.master_level());
        }
    }
}
