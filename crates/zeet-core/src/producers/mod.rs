//! Producers - workers that each own one field of the presentation state
//!
//! The typewriter owns the revealed text and its completion flag, the
//! spinner owns the glyph. Both sleep between writes and poll the
//! cancellation signal once per iteration.

mod spinner;
mod typewriter;

pub use spinner::Spinner;
pub use typewriter::Typewriter;

/// Glyph shown when no spinner is running
pub const BLANK_GLYPH: char = ' ';
