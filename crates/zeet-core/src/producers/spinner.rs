//! Spinner - cycles a fixed glyph sequence until cancelled

use std::thread;
use std::time::Duration;

use super::BLANK_GLYPH;
use crate::cancellation::CancellationSignal;
use crate::state::PresentationState;

#[derive(Debug, Clone)]
pub struct Spinner {
    glyphs: Vec<char>,
    interval: Duration,
}

impl Spinner {
    /// `glyphs` must be non-empty; `AnimationConfig::validate` enforces it
    pub fn new(glyphs: Vec<char>, interval: Duration) -> Self {
        Self { glyphs, interval }
    }

    /// Spin until a stop is requested, then leave a blank glyph behind
    pub fn run(&self, state: &PresentationState, cancel: &CancellationSignal) {
        scopeguard::defer! {
            state.set_spinner_glyph(BLANK_GLYPH);
        }

        for &glyph in self.glyphs.iter().cycle() {
            if cancel.is_requested() {
                break;
            }
            state.set_spinner_glyph(glyph);
            thread::sleep(self.interval);
        }
    }
}
