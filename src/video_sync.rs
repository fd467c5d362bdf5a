//! Loop/restart protocol for two video elements sharing a nominal duration.
//!
//! Native looping is switched off so each element reports `ended`. The first
//! `ended` opens a restart session: both elements pause and seek to zero, and
//! playback resumes only after both have reported `seeked`. Any further
//! `ended` while the session is open is ignored. If a confirmation never
//! arrives the session stays open and the pair stops looping.

use log::{debug, trace};

use crate::element::{MediaEvent, PlaybackElement, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Not started yet.
    Idle,
    /// Waiting for both elements to be able to play through.
    Starting,
    Playing,
    /// A restart is in flight; `confirmed[i]` is set once side `i` reports
    /// it has reached position zero.
    Restarting { confirmed: [bool; 2] },
}

impl SyncState {
    /// Number of confirmations received by an open restart session.
    pub fn confirmations(&self) -> usize {
        match self {
            SyncState::Restarting { confirmed } => confirmed.iter().filter(|c| **c).count(),
            _ => 0,
        }
    }
}

pub struct VideoPairSync<P> {
    elements: [P; 2],
    state: SyncState,
}

impl<P: PlaybackElement> VideoPairSync<P> {
    pub fn new(primary: P, secondary: P) -> Self {
        Self {
            elements: [primary, secondary],
            state: SyncState::Idle,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn element(&self, side: Side) -> &P {
        &self.elements[side.index()]
    }

    pub fn element_mut(&mut self, side: Side) -> &mut P {
        &mut self.elements[side.index()]
    }

    /// Disable native looping and begin waiting for both elements. If both
    /// are already buffered, playback starts immediately.
    pub fn start(&mut self) {
        for el in &mut self.elements {
            el.set_native_loop(false);
        }
        self.state = SyncState::Starting;
        debug!("video pair: waiting for both elements");
        self.try_begin();
    }

    pub fn handle(&mut self, side: Side, event: MediaEvent) {
        match (self.state, event) {
            (SyncState::Starting, MediaEvent::CanPlayThrough) => self.try_begin(),
            (SyncState::Playing, MediaEvent::Ended) => self.open_restart(side),
            (SyncState::Restarting { .. }, MediaEvent::Ended) => {
                trace!("video pair: {side:?} ended during restart, ignored");
            }
            (SyncState::Restarting { mut confirmed }, MediaEvent::Seeked) => {
                confirmed[side.index()] = true;
                if confirmed.iter().all(|c| *c) {
                    for el in &mut self.elements {
                        el.play();
                    }
                    self.state = SyncState::Playing;
                    debug!("video pair: restart complete");
                } else {
                    self.state = SyncState::Restarting { confirmed };
                }
            }
            _ => {}
        }
    }

    /// Assign the smaller of the two positions to both elements.
    pub fn align_now(&mut self) {
        let target = self.elements[0].position().min(self.elements[1].position());
        for el in &mut self.elements {
            el.seek(target);
        }
        debug!("video pair: aligned at {target:.3}s");
    }

    /// Swap one element's source. Reloading rewinds and pauses the element
    /// and drops any pending seek, so an open restart session is discarded
    /// and the pair goes back through the startup protocol. The partner is
    /// realigned when both sides now hold visitor-supplied media.
    pub fn replace_source(&mut self, side: Side, src: &str, user_provided: bool) {
        let el = &mut self.elements[side.index()];
        el.set_source(src);
        el.set_user_provided(user_provided);
        el.reload();
        if user_provided && self.elements[side.other().index()].is_user_provided() {
            self.align_now();
        }
        if self.state == SyncState::Idle {
            return;
        }
        self.elements[side.other().index()].pause();
        self.state = SyncState::Starting;
        debug!("video pair: {side:?} source replaced, waiting for both elements");
        self.try_begin();
    }

    fn try_begin(&mut self) {
        if !self.elements.iter().all(|el| el.readiness().can_play_through()) {
            return;
        }
        for el in &mut self.elements {
            el.seek(0.0);
            el.play();
        }
        self.state = SyncState::Playing;
        debug!("video pair: started");
    }

    fn open_restart(&mut self, side: Side) {
        debug!("video pair: {side:?} ended, restarting both");
        for el in &mut self.elements {
            el.pause();
            el.seek(0.0);
        }
        self.state = SyncState::Restarting {
            confirmed: [false, false],
        };
    }
}
