//! Two audio elements presented as one crossfaded source.
//!
//! Volumes always follow `before = (1 - ratio) * level` and
//! `after = ratio * level`; both elements are muted exactly when the level
//! is zero. Playing or pausing either element drives the other, and every
//! position report pulls the partner back when it has drifted past the
//! configured threshold.

use log::{debug, trace};

use crate::config::ShowcaseConfig;
use crate::element::{MediaEvent, PlaybackElement, Side};

/// Discrete preset actions exposed by the page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    SnapBefore,
    SnapAfter,
    Reset,
}

pub struct DualChannelMixer<P> {
    elements: [P; 2],
    mix_ratio: f64,
    master_level: f64,
    default_mix_ratio: f64,
    drift_threshold: f64,
    unlocked: bool,
}

impl<P: PlaybackElement> DualChannelMixer<P> {
    pub fn new(before: P, after: P, config: &ShowcaseConfig) -> Self {
        let default_mix_ratio = config.default_mix_ratio.clamp(0.0, 1.0);
        Self {
            elements: [before, after],
            mix_ratio: default_mix_ratio,
            master_level: 0.0,
            default_mix_ratio,
            drift_threshold: config.drift_threshold_secs,
            unlocked: false,
        }
    }

    pub fn mix_ratio(&self) -> f64 {
        self.mix_ratio
    }

    pub fn master_level(&self) -> f64 {
        self.master_level
    }

    pub fn element(&self, side: Side) -> &P {
        &self.elements[side.index()]
    }

    pub fn element_mut(&mut self, side: Side) -> &mut P {
        &mut self.elements[side.index()]
    }

    /// Silent autoplay: both tracks start muted so platforms that block
    /// audible autoplay still let them run.
    pub fn start(&mut self) {
        self.apply_levels();
        for el in &mut self.elements {
            el.play();
        }
    }

    pub fn set_mix_ratio(&mut self, ratio: f64) {
        self.mix_ratio = ratio.clamp(0.0, 1.0);
        self.apply_levels();
    }

    /// Fader input in percent.
    pub fn set_fader(&mut self, percent: f64) {
        self.set_mix_ratio(percent / 100.0);
    }

    pub fn set_master_level(&mut self, level: f64) {
        self.master_level = level.clamp(0.0, 1.0);
        self.apply_levels();
        if self.master_level > 0.0 {
            self.play_both();
        }
    }

    pub fn snap_before(&mut self) {
        self.set_mix_ratio(0.0);
        self.play_both();
    }

    pub fn snap_after(&mut self) {
        self.set_mix_ratio(1.0);
        self.play_both();
    }

    /// Pause and rewind both tracks, restore the default mix, reapply the level.
    pub fn reset(&mut self) {
        for el in &mut self.elements {
            el.pause();
            el.seek(0.0);
        }
        self.mix_ratio = self.default_mix_ratio;
        self.apply_levels();
    }

    pub fn apply(&mut self, preset: Preset) {
        match preset {
            Preset::SnapBefore => self.snap_before(),
            Preset::SnapAfter => self.snap_after(),
            Preset::Reset => self.reset(),
        }
    }

    /// Jump to the opposite extreme of whichever half the ratio is in.
    pub fn toggle_extreme(&mut self) {
        let target = if self.mix_ratio >= 0.5 { 0.0 } else { 1.0 };
        self.set_mix_ratio(target);
    }

    /// First user-gesture unlock: rewind, unmute and make sure the level is
    /// audible. Later calls do nothing. Returns whether this call unlocked.
    pub fn unlock_audio(&mut self, floor: f64) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        for el in &mut self.elements {
            el.seek(0.0);
            el.set_muted(false);
        }
        let level = if self.master_level == 0.0 {
            floor
        } else {
            self.master_level
        };
        debug!("mixer: audio unlocked at level {level:.2}");
        self.set_master_level(level);
        true
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn handle(&mut self, side: Side, event: MediaEvent) {
        match event {
            MediaEvent::Play => {
                self.align_later_to_earlier();
                let other = &mut self.elements[side.other().index()];
                if other.is_paused() {
                    other.play();
                }
            }
            MediaEvent::Pause => {
                let other = &mut self.elements[side.other().index()];
                if !other.is_paused() {
                    other.pause();
                }
            }
            MediaEvent::TimeUpdate => self.correct_drift(side),
            _ => {}
        }
    }

    fn correct_drift(&mut self, leader: Side) {
        let lead_pos = self.elements[leader.index()].position();
        let follower = &mut self.elements[leader.other().index()];
        let drift = (follower.position() - lead_pos).abs();
        if drift > self.drift_threshold {
            trace!("mixer: drift {drift:.3}s, snapping {:?}", leader.other());
            follower.seek(lead_pos);
        }
    }

    fn align_later_to_earlier(&mut self) {
        let [a, b] = &mut self.elements;
        let (pa, pb) = (a.position(), b.position());
        if (pa - pb).abs() <= self.drift_threshold {
            return;
        }
        if pa > pb {
            a.seek(pb);
        } else {
            b.seek(pa);
        }
    }

    fn play_both(&mut self) {
        for el in &mut self.elements {
            if el.is_paused() {
                el.play();
            }
        }
    }

    fn apply_levels(&mut self) {
        let muted = self.master_level == 0.0;
        let [before, after] = &mut self.elements;
        before.set_volume((1.0 - self.mix_ratio) * self.master_level);
        after.set_volume(self.mix_ratio * self.master_level);
        before.set_muted(muted);
        after.set_muted(muted);
    }
}
