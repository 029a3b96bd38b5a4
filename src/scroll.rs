//! Scroll-forced hide.
//!
//! The guard is armed when a show commits with an effective `scroll_hide`
//! of true, and disarmed on every transition out of visibility. While armed,
//! a scroll event requests a hide through the normal path, so a configured
//! hide delay still applies.

#[derive(Debug, Default)]
pub struct ScrollGuard {
    armed: bool,
}

impl ScrollGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Whether a scroll event should force a hide right now.
    pub fn on_scroll(&self) -> bool {
        self.armed
    }
}
