//! Splash animation configuration
//!
//! Supplied once when the splash starts and never mutated while it runs.

use std::time::Duration;

use crate::error::{AnimationError, Result};
use crate::logo::logo_lines;

/// Braille dots, cycled by the spinner
pub const DEFAULT_SPINNER_GLYPHS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub const DEFAULT_TARGET_TEXT: &str = ".ZEET//Efficient Exam Terminal";
pub const DEFAULT_PROMPT: &str = "[ENTER] to start";

/// Configuration for one splash run
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    /// Peak horizontal displacement of a banner line, in columns
    pub wave_amplitude: i32,
    /// Angular speed of the wave, in radians per second
    pub wave_speed: f64,
    /// Delay between rendered frames
    pub frame_interval: Duration,
    /// Delay between typed characters
    pub type_interval: Duration,
    /// Delay between spinner glyph changes
    pub spinner_interval: Duration,
    /// Text revealed by the typewriter
    pub target_text: String,
    /// Static banner lines that ride the wave
    pub wave_lines: Vec<String>,
    /// Glyphs cycled by the spinner, in order
    pub spinner_glyphs: Vec<char>,
    /// Line shown below the typewriter
    pub prompt: String,
    /// How long shutdown waits for each worker before abandoning it
    pub join_timeout: Duration,
    /// Render a frames-per-second line under the prompt
    pub show_fps: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            wave_amplitude: 3,
            wave_speed: 3.0,
            frame_interval: Duration::from_millis(50),
            type_interval: Duration::from_millis(40),
            spinner_interval: Duration::from_millis(80),
            target_text: DEFAULT_TARGET_TEXT.to_string(),
            wave_lines: logo_lines(),
            spinner_glyphs: DEFAULT_SPINNER_GLYPHS.to_vec(),
            prompt: DEFAULT_PROMPT.to_string(),
            join_timeout: Duration::from_millis(500),
            show_fps: false,
        }
    }
}

impl AnimationConfig {
    /// Config with default timings and the given typewriter text
    pub fn with_text(target_text: impl Into<String>) -> Self {
        Self {
            target_text: target_text.into(),
            ..Self::default()
        }
    }

    /// Reject configurations that would make a worker misbehave.
    ///
    /// A zero `type_interval` is allowed: the typewriter then reveals the
    /// whole text in one burst.
    pub fn validate(&self) -> Result<()> {
        if self.spinner_glyphs.is_empty() {
            return Err(AnimationError::EmptyGlyphSet);
        }
        if self.frame_interval.is_zero() {
            return Err(AnimationError::ZeroInterval {
                name: "frame_interval",
            });
        }
        if self.spinner_interval.is_zero() {
            return Err(AnimationError::ZeroInterval {
                name: "spinner_interval",
            });
        }
        if !self.wave_speed.is_finite() || self.wave_speed < 0.0 {
            return Err(AnimationError::InvalidWaveSpeed(self.wave_speed));
        }
        if self.wave_amplitude < 0 {
            return Err(AnimationError::NegativeAmplitude(self.wave_amplitude));
        }
        Ok(())
    }
}
