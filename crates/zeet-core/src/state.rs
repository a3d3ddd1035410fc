//! Shared presentation state
//!
//! Written by the typewriter and spinner, read by the frame renderer.
//! Every access goes through one lock and only ever copies or writes a
//! single field, so the lock is never held across I/O or sleeps.

use parking_lot::Mutex;

use crate::producers::BLANK_GLYPH;

#[derive(Debug)]
struct Inner {
    revealed: String,
    spinner_glyph: char,
    typing_done: bool,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            revealed: String::new(),
            spinner_glyph: BLANK_GLYPH,
            typing_done: false,
        }
    }
}

/// Lock-guarded record of what the splash currently shows
#[derive(Debug, Default)]
pub struct PresentationState {
    inner: Mutex<Inner>,
}

/// Owned copy of the state, taken in one lock acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationSnapshot {
    pub revealed: String,
    pub spinner_glyph: char,
    pub typing_done: bool,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one revealed character.
    ///
    /// Returns false (and changes nothing) once typing is marked done.
    pub fn push_char(&self, ch: char) -> bool {
        let mut inner = self.inner.lock();
        if inner.typing_done {
            return false;
        }
        inner.revealed.push(ch);
        true
    }

    /// Freeze the revealed text
    pub fn mark_typing_done(&self) {
        self.inner.lock().typing_done = true;
    }

    pub fn set_spinner_glyph(&self, glyph: char) {
        self.inner.lock().spinner_glyph = glyph;
    }

    /// Copy every field under a single lock acquisition
    pub fn snapshot(&self) -> PresentationSnapshot {
        let inner = self.inner.lock();
        PresentationSnapshot {
            revealed: inner.revealed.clone(),
            spinner_glyph: inner.spinner_glyph,
            typing_done: inner.typing_done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_blank() {
        let state = PresentationState::new();
        let snap = state.snapshot();
        assert_eq!(snap.revealed, "");
        assert_eq!(snap.spinner_glyph, BLANK_GLYPH);
        assert!(!snap.typing_done);
    }

    #[test]
    fn test_revealed_frozen_after_done() {
        let state = PresentationState::new();
        assert!(state.push_char('H'));
        state.mark_typing_done();
        assert!(!state.push_char('I'));
        let snap = state.snapshot();
        assert_eq!(snap.revealed, "H");
        assert!(snap.typing_done);
    }
}
