//! Typewriter - reveals the target text one character at a time

use std::thread;
use std::time::Duration;

use crate::cancellation::CancellationSignal;
use crate::state::PresentationState;

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    interval: Duration,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval: Duration) -> Self {
        Self {
            text: text.into(),
            interval,
        }
    }

    /// Reveal characters until the text is exhausted or a stop is requested.
    ///
    /// `typing_done` is set on every exit path, including cancellation
    /// and panics, so the renderer never waits on a half-finished line.
    pub fn run(&self, state: &PresentationState, cancel: &CancellationSignal) {
        scopeguard::defer! {
            state.mark_typing_done();
        }

        let mut chars = self.text.chars().peekable();
        while let Some(ch) = chars.next() {
            if cancel.is_requested() {
                tracing::debug!("Typewriter cancelled before finishing");
                return;
            }
            state.push_char(ch);
            // No pause after the final character
            if chars.peek().is_some() && !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_types_hi() {
        let state = Arc::new(PresentationState::new());
        let cancel = CancellationSignal::new();
        let typewriter = Typewriter::new("HI", Duration::from_millis(10));

        let handle = {
            let state = Arc::clone(&state);
            let cancel = cancel.clone();
            thread::spawn(move || typewriter.run(&state, &cancel))
        };

        // One interval between the two characters, none after the last
        thread::sleep(Duration::from_millis(25));
        let snap = state.snapshot();
        assert_eq!(snap.revealed, "HI");
        assert!(snap.typing_done);
        handle.join().unwrap();
    }

    #[test]
    fn test_revealed_grows_monotonically() {
        let target = "monotonic typing";
        let state = Arc::new(PresentationState::new());
        let cancel = CancellationSignal::new();
        let typewriter = Typewriter::new(target, Duration::from_millis(2));

        let handle = {
            let state = Arc::clone(&state);
            let cancel = cancel.clone();
            thread::spawn(move || typewriter.run(&state, &cancel))
        };

        let mut last_len = 0;
        loop {
            let snap = state.snapshot();
            assert!(target.starts_with(&snap.revealed));
            assert!(snap.revealed.len() >= last_len);
            last_len = snap.revealed.len();
            if snap.typing_done {
                break;
            }
            thread::yield_now();
        }
        handle.join().unwrap();
        assert_eq!(state.snapshot().revealed, target);
    }

    #[test]
    fn test_empty_text_completes_immediately() {
        let state = PresentationState::new();
        Typewriter::new("", Duration::from_secs(10)).run(&state, &CancellationSignal::new());
        let snap = state.snapshot();
        assert!(snap.typing_done);
        assert!(snap.revealed.is_empty());
    }

    #[test]
    fn test_cancel_still_marks_done() {
        let state = PresentationState::new();
        let cancel = CancellationSignal::new();
        cancel.request();
        Typewriter::new("never typed", Duration::from_millis(10)).run(&state, &cancel);
        let snap = state.snapshot();
        assert!(snap.typing_done);
        assert_eq!(snap.revealed, "");
    }
}
