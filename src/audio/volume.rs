//! Volume bookkeeping for the engine thread.
//!
//! Muting keeps the chosen level so unmuting restores it; volume steps made
//! while muted still move the remembered level.

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Volume {
    level: f32,
    step: f32,
    muted: bool,
}

impl Volume {
    pub(crate) fn new(level: f32, step: f32) -> Self {
        Self {
            level: level.clamp(0.0, 1.0),
            step,
            muted: false,
        }
    }

    pub(crate) fn level(&self) -> f32 {
        self.level
    }

    pub(crate) fn muted(&self) -> bool {
        self.muted
    }

    /// The gain actually applied to the sink.
    pub(crate) fn effective(&self) -> f32 {
        if self.muted { 0.0 } else { self.level }
    }

    pub(crate) fn up(&mut self) {
        self.level = (self.level + self.step).min(1.0);
    }

    pub(crate) fn down(&mut self) {
        self.level = (self.level - self.step).max(0.0);
    }

    pub(crate) fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }
}
