//! Frame renderer - the consumer side of the splash
//!
//! Each tick computes the banner offsets from elapsed time, copies the
//! presentation state once, composes the whole frame into a buffer and
//! writes it to the sink in a single call. The state lock is released
//! before any output happens.

pub mod terminal;
pub mod wave;

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use parking_lot::Mutex;
use unicode_width::UnicodeWidthStr;

use crate::cancellation::CancellationSignal;
use crate::config::AnimationConfig;
use crate::state::{PresentationSnapshot, PresentationState};

pub use terminal::{
    clear_screen, columns_or_default, CrosstermTerminal, FixedWidth, TerminalWidth,
    DEFAULT_COLUMNS,
};
pub use wave::{wave_offset, WaveLine};

/// Banner color
pub const WAVE_COLOR: Color = Color::Cyan;
/// Typewriter text color
pub const TYPED_COLOR: Color = Color::AnsiValue(208);
/// Spinner color
pub const SPINNER_COLOR: Color = Color::Cyan;

const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Rolling frames-per-second readout, refreshed every half second
#[derive(Debug)]
struct FpsMeter {
    window_start: Instant,
    frames: u32,
    label: String,
}

impl FpsMeter {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
            label: String::from("FPS: --"),
        }
    }

    fn tick(&mut self, now: Instant) -> &str {
        self.frames += 1;
        let span = now.saturating_duration_since(self.window_start);
        if span >= FPS_WINDOW {
            self.label = format!("FPS: {:.1}", f64::from(self.frames) / span.as_secs_f64());
            self.window_start = now;
            self.frames = 0;
        }
        &self.label
    }
}

/// Composes and emits splash frames
pub struct FrameRenderer {
    lines: Vec<WaveLine>,
    wave_amplitude: i32,
    wave_speed: f64,
    frame_interval: Duration,
    prompt: String,
    fps: Option<FpsMeter>,
    width: Box<dyn TerminalWidth + Send>,
}

impl FrameRenderer {
    pub fn new(config: &AnimationConfig, width: Box<dyn TerminalWidth + Send>) -> Self {
        Self {
            lines: WaveLine::from_lines(&config.wave_lines),
            wave_amplitude: config.wave_amplitude,
            wave_speed: config.wave_speed,
            frame_interval: config.frame_interval,
            prompt: config.prompt.clone(),
            fps: config.show_fps.then(FpsMeter::new),
            width,
        }
    }

    /// Current terminal width, or the default when the query fails
    pub fn columns(&self) -> u16 {
        columns_or_default(self.width.as_ref())
    }

    /// Build one complete frame for the given time and state copy
    pub fn compose(
        &mut self,
        elapsed: Duration,
        snapshot: &PresentationSnapshot,
        columns: u16,
    ) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(1024);
        let t = elapsed.as_secs_f64();

        queue!(buf, MoveTo(0, 0))?;

        for line in &self.lines {
            let offset = line.offset(self.wave_amplitude, self.wave_speed, t, columns);
            queue!(
                buf,
                SetForegroundColor(WAVE_COLOR),
                Print(" ".repeat(offset)),
                Print(&line.text),
                ResetColor,
                Clear(ClearType::UntilNewLine),
                Print("\n"),
            )?;
        }

        // Spacer
        queue!(buf, Clear(ClearType::UntilNewLine), Print("\n"))?;

        let typed_width = UnicodeWidthStr::width(snapshot.revealed.as_str());
        let padding = usize::from(columns).saturating_sub(typed_width + 3);
        queue!(
            buf,
            SetForegroundColor(TYPED_COLOR),
            Print(&snapshot.revealed),
            ResetColor,
            Print(" "),
            SetForegroundColor(SPINNER_COLOR),
            Print(snapshot.spinner_glyph),
            ResetColor,
            Print(" ".repeat(padding)),
            Clear(ClearType::UntilNewLine),
            Print("\n"),
        )?;

        queue!(
            buf,
            Clear(ClearType::UntilNewLine),
            Print("\n"),
            Print(&self.prompt),
            Clear(ClearType::UntilNewLine),
            Print("\n"),
        )?;

        if let Some(fps) = self.fps.as_mut() {
            let label = fps.tick(Instant::now());
            queue!(buf, Print(label), Clear(ClearType::UntilNewLine), Print("\n"))?;
        }

        Ok(buf)
    }

    /// Render a single frame: query width, copy state, write to the sink
    pub fn render_frame<S: Write>(
        &mut self,
        elapsed: Duration,
        state: &PresentationState,
        sink: &Mutex<S>,
    ) -> io::Result<()> {
        let columns = self.columns();
        let snapshot = state.snapshot();
        let frame = self.compose(elapsed, &snapshot, columns)?;

        let mut out = sink.lock();
        out.write_all(&frame)?;
        out.flush()
    }

    /// Render until a stop is requested. Returns the number of frames written.
    ///
    /// The signal is checked once per tick, so shutdown lags by at most
    /// one frame interval.
    pub fn run<S: Write>(
        &mut self,
        state: &PresentationState,
        sink: &Mutex<S>,
        cancel: &CancellationSignal,
    ) -> io::Result<u64> {
        clear_screen(&mut *sink.lock())?;

        let start = Instant::now();
        let mut frames = 0u64;
        while !cancel.is_requested() {
            self.render_frame(start.elapsed(), state, sink)?;
            frames += 1;
            thread::sleep(self.frame_interval);
        }

        tracing::debug!(frames, "Frame renderer stopped");
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct BrokenTerminal;

    impl TerminalWidth for BrokenTerminal {
        fn columns(&self) -> io::Result<u16> {
            Err(io::Error::other("size query failed"))
        }
    }

    fn test_config() -> AnimationConfig {
        AnimationConfig {
            wave_lines: vec!["~~wave~~".to_string(), "__line__".to_string()],
            prompt: "press enter".to_string(),
            frame_interval: Duration::from_millis(5),
            ..AnimationConfig::with_text("HI")
        }
    }

    fn snapshot(revealed: &str, glyph: char) -> PresentationSnapshot {
        PresentationSnapshot {
            revealed: revealed.to_string(),
            spinner_glyph: glyph,
            typing_done: false,
        }
    }

    #[test]
    fn test_compose_contains_all_parts() {
        let mut renderer = FrameRenderer::new(&test_config(), Box::new(FixedWidth(80)));
        let frame = renderer
            .compose(Duration::ZERO, &snapshot("HI", '*'), 80)
            .unwrap();
        let text = String::from_utf8(frame).unwrap();

        assert!(text.starts_with("\x1b[1;1H"));
        // Line 0 at t=0 sits at the baseline offset (amplitude 3)
        assert!(text.contains("   ~~wave~~"));
        assert!(text.contains("HI"));
        assert!(text.contains('*'));
        assert!(text.contains("press enter"));
        assert!(!text.contains("FPS"));

        let wave_pos = text.find("~~wave~~").unwrap();
        let typed_pos = text.find("HI").unwrap();
        let prompt_pos = text.find("press enter").unwrap();
        assert!(wave_pos < typed_pos && typed_pos < prompt_pos);
    }

    #[test]
    fn test_typed_line_fills_row() {
        let mut renderer = FrameRenderer::new(&test_config(), Box::new(FixedWidth(40)));
        let frame = renderer
            .compose(Duration::ZERO, &snapshot("HI", '*'), 40)
            .unwrap();
        let text = String::from_utf8(frame).unwrap();
        let expected = format!("*\x1b[0m{}\x1b[K\n", " ".repeat(40 - 2 - 3));
        assert!(text.contains(&expected));
    }

    #[test]
    fn test_width_failure_falls_back() {
        let mut renderer = FrameRenderer::new(&test_config(), Box::new(BrokenTerminal));
        assert_eq!(renderer.columns(), DEFAULT_COLUMNS);

        let state = PresentationState::new();
        state.push_char('H');
        state.push_char('I');
        state.set_spinner_glyph('*');
        let sink = Mutex::new(Vec::new());
        renderer
            .render_frame(Duration::from_millis(120), &state, &sink)
            .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let expected = format!("*\x1b[0m{}\x1b[K\n", " ".repeat(80 - 2 - 3));
        assert!(text.contains(&expected));
    }

    #[test]
    fn test_fps_line_when_enabled() {
        let config = AnimationConfig {
            show_fps: true,
            ..test_config()
        };
        let mut renderer = FrameRenderer::new(&config, Box::new(FixedWidth(80)));
        let frame = renderer
            .compose(Duration::ZERO, &snapshot("", ' '), 80)
            .unwrap();
        assert!(String::from_utf8(frame).unwrap().contains("FPS: "));
    }

    #[test]
    fn test_run_stops_on_cancel() {
        let state = Arc::new(PresentationState::new());
        let sink = Arc::new(Mutex::new(Vec::new()));
        let cancel = CancellationSignal::new();

        let handle = {
            let (state, sink, cancel) = (Arc::clone(&state), Arc::clone(&sink), cancel.clone());
            thread::spawn(move || {
                let mut renderer = FrameRenderer::new(&test_config(), Box::new(FixedWidth(80)));
                renderer.run(&state, &sink, &cancel)
            })
        };

        thread::sleep(Duration::from_millis(40));
        cancel.request();
        let frames = handle.join().unwrap().unwrap();
        assert!(frames >= 1);

        let text = String::from_utf8(sink.lock().clone()).unwrap();
        assert!(text.starts_with("\x1b[2J"));
        assert_eq!(text.matches("press enter").count() as u64, frames);
    }
}
