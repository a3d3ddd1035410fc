//! Wave offsets for the banner lines
//!
//! Offsets are derived fresh every frame from elapsed time; nothing is stored.

use unicode_width::UnicodeWidthStr;

/// Phase step between consecutive banner lines, in radians
const LINE_PHASE_STEP: f64 = 0.6;

/// Horizontal offset of banner line `index` at `elapsed_secs`.
///
/// `round(sin(speed * t + index * 0.6) * amplitude + amplitude)`, clamped to
/// `[0, columns - line_width - 1]`. When the line does not fit, the offset is 0.
pub fn wave_offset(
    amplitude: i32,
    speed: f64,
    index: usize,
    elapsed_secs: f64,
    line_width: usize,
    columns: u16,
) -> usize {
    let amplitude = f64::from(amplitude);
    let phase = speed * elapsed_secs + index as f64 * LINE_PHASE_STEP;
    let raw = (phase.sin() * amplitude + amplitude).round() as i64;

    let max_offset = i64::from(columns) - line_width as i64 - 1;
    if max_offset <= 0 {
        return 0;
    }
    raw.clamp(0, max_offset) as usize
}

/// A static banner line and its position in the banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveLine {
    pub text: String,
    pub index: usize,
    width: usize,
}

impl WaveLine {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        let text = text.into();
        let width = UnicodeWidthStr::width(text.as_str());
        Self { text, index, width }
    }

    /// Build one line per entry, indexed from the top
    pub fn from_lines(lines: &[String]) -> Vec<Self> {
        lines
            .iter()
            .enumerate()
            .map(|(index, text)| Self::new(text.clone(), index))
            .collect()
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn offset(&self, amplitude: i32, speed: f64, elapsed_secs: f64, columns: u16) -> usize {
        wave_offset(amplitude, speed, self.index, elapsed_secs, self.width, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_at_time_zero() {
        // sin(0) = 0 so the first line sits at the baseline
        assert_eq!(wave_offset(3, 3.0, 0, 0.0, 10, 80), 3);
        // sin(0.6) * 3 + 3 = 4.69 -> 5
        assert_eq!(wave_offset(3, 3.0, 1, 0.0, 10, 80), 5);
    }

    #[test]
    fn test_offset_reproducible() {
        for index in 0..7 {
            for step in 0..50 {
                let t = step as f64 * 0.037;
                assert_eq!(
                    wave_offset(4, 2.5, index, t, 20, 60),
                    wave_offset(4, 2.5, index, t, 20, 60)
                );
            }
        }
    }

    #[test]
    fn test_offset_within_bounds() {
        let columns = 30u16;
        let line_width = 25usize;
        let max = columns as usize - line_width - 1;
        for index in 0..10 {
            for step in 0..200 {
                let offset = wave_offset(10, 3.0, index, step as f64 * 0.01, line_width, columns);
                assert!(offset <= max, "offset {offset} exceeds {max}");
            }
        }
    }

    #[test]
    fn test_offset_zero_when_line_does_not_fit() {
        assert_eq!(wave_offset(3, 3.0, 1, 0.3, 80, 80), 0);
        assert_eq!(wave_offset(3, 3.0, 1, 0.3, 200, 80), 0);
        assert_eq!(wave_offset(3, 3.0, 1, 0.3, 79, 80), 0);
    }

    #[test]
    fn test_zero_amplitude_is_flat() {
        for step in 0..20 {
            assert_eq!(wave_offset(0, 3.0, 2, step as f64 * 0.1, 10, 80), 0);
        }
    }

    #[test]
    fn test_wave_line_uses_display_width() {
        let line = WaveLine::new("⠋⠙⠹", 0);
        assert_eq!(line.width(), 3);
        let wide = WaveLine::new("ＺＥ", 1);
        assert_eq!(wide.width(), 4);
    }

    #[test]
    fn test_from_lines_indexes_in_order() {
        let lines = vec!["a".to_string(), "bb".to_string()];
        let wave = WaveLine::from_lines(&lines);
        assert_eq!(wave[0].index, 0);
        assert_eq!(wave[1].index, 1);
        assert_eq!(wave[1].text, "bb");
    }
}
