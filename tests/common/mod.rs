#![allow(dead_code)]

use abpair_wasm::{PlaybackElement, Readiness};

/// In-memory element that applies every command immediately and counts
/// the ones tests care about.
#[derive(Debug, Clone)]
pub struct FakeMedia {
    pub position: f64,
    pub paused: bool,
    pub muted: bool,
    pub volume: f64,
    pub native_loop: bool,
    pub readiness: Readiness,
    pub src: String,
    pub user_provided: bool,
    /// Simulates a platform that refuses `play()` without a user gesture.
    pub blocked: bool,
    pub plays: usize,
    pub pauses: usize,
    pub seeks: Vec<f64>,
    pub reloads: usize,
}

impl FakeMedia {
    pub fn new() -> Self {
        Self {
            position: 0.0,
            paused: true,
            muted: false,
            volume: 1.0,
            native_loop: true,
            readiness: Readiness::Nothing,
            src: String::new(),
            user_provided: false,
            blocked: false,
            plays: 0,
            pauses: 0,
            seeks: Vec::new(),
            reloads: 0,
        }
    }

    pub fn at(position: f64) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    pub fn ready() -> Self {
        Self {
            readiness: Readiness::EnoughData,
            ..Self::new()
        }
    }
}

impl PlaybackElement for FakeMedia {
    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, secs: f64) {
        self.position = secs;
        self.seeks.push(secs);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        self.plays += 1;
        if !self.blocked {
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        self.pauses += 1;
        self.paused = true;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_native_loop(&mut self, looping: bool) {
        self.native_loop = looping;
    }

    fn readiness(&self) -> Readiness {
        self.readiness
    }

    fn set_source(&mut self, src: &str) {
        self.src = src.to_string();
    }

    fn reload(&mut self) {
        self.reloads += 1;
        self.readiness = Readiness::Nothing;
        self.paused = true;
        self.position = 0.0;
    }

    fn is_user_provided(&self) -> bool {
        self.user_provided
    }

    fn set_user_provided(&mut self, user_provided: bool) {
        self.user_provided = user_provided;
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
