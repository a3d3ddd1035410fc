//! Error types for the animation engine

use thiserror::Error;

/// Errors surfaced to callers of the animation engine.
///
/// Only configuration problems and sink I/O reach the caller. Worker
/// faults and terminal size failures are handled inside the engine.
#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("spinner glyph set is empty")]
    EmptyGlyphSet,

    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },

    #[error("wave speed must be a finite, non-negative number (got {0})")]
    InvalidWaveSpeed(f64),

    #[error("wave amplitude must not be negative (got {0})")]
    NegativeAmplitude(i32),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnimationError>;
