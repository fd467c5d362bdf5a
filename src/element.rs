//! The playback element abstraction shared by the video synchronizer and the
//! audio mixer. The browser implementation lives in `wasm::media`; tests use
//! an in-memory fake.

/// How much of the asset is buffered, mirroring the HTML media `readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Readiness {
    Nothing,
    Metadata,
    CurrentData,
    FutureData,
    EnoughData,
}

impl Readiness {
    pub fn from_ready_state(state: u16) -> Self {
        match state {
            0 => Readiness::Nothing,
            1 => Readiness::Metadata,
            2 => Readiness::CurrentData,
            3 => Readiness::FutureData,
            _ => Readiness::EnoughData,
        }
    }

    /// Enough is buffered to play to the end without stalling.
    pub fn can_play_through(self) -> bool {
        self == Readiness::EnoughData
    }
}

/// One member of a pair. `A` is the primary/before element, `B` the
/// secondary/after element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Lifecycle signals emitted by a playback element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// `canplaythrough`
    CanPlayThrough,
    /// `ended`, observable only while the native loop is off.
    Ended,
    /// `seeked`: the last position assignment has taken effect.
    Seeked,
    /// `timeupdate`: periodic position report during playback.
    TimeUpdate,
    Play,
    Pause,
}

impl MediaEvent {
    pub fn dom_name(self) -> &'static str {
        match self {
            MediaEvent::CanPlayThrough => "canplaythrough",
            MediaEvent::Ended => "ended",
            MediaEvent::Seeked => "seeked",
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
        }
    }
}

/// A single audio or video playback element.
///
/// Position assignment is asynchronous on real platforms: `seek` only
/// requests the change and completion is reported by [`MediaEvent::Seeked`].
/// `play` may be refused by the platform (no user gesture yet); implementors
/// swallow that refusal rather than reporting it.
pub trait PlaybackElement {
    /// Current playback position in seconds.
    fn position(&self) -> f64;
    fn seek(&mut self, secs: f64);

    fn is_paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);

    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);

    /// Toggle the element's own end-of-media loop.
    fn set_native_loop(&mut self, looping: bool);
    fn readiness(&self) -> Readiness;

    fn set_source(&mut self, src: &str);
    /// Restart resource selection after a source change.
    fn reload(&mut self);

    /// True once the visitor has supplied a real file for this element.
    fn is_user_provided(&self) -> bool;
    fn set_user_provided(&mut self, user_provided: bool);
}
