//! Boot progress bar shown before the splash
//!
//! Runs on the caller's thread. Advances a percentage at a fixed step and
//! delay until it reaches 100% or the time ceiling is hit, whichever
//! comes first, then prints a completion message.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::render::clear_screen;

const DEFAULT_STEP: u8 = 6;
const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(60);
const DEFAULT_LINGER: Duration = Duration::from_secs(1);
const BAR_WIDTH: usize = 40;
const TITLE: &str = "BOOTING ZEET";

/// Result of one progress run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOutcome {
    /// Percentage displayed when the bar finished (always 100)
    pub percent: u8,
    /// Time spent advancing the bar, excluding the linger pause
    pub elapsed: Duration,
    /// The time ceiling was reached before the bar filled on its own
    pub timed_out: bool,
}

/// Time-boxed boot progress indicator
#[derive(Debug, Clone)]
pub struct BootProgress {
    label: String,
    duration: Duration,
    step: u8,
    step_delay: Duration,
    completion_message: String,
    linger: Duration,
}

impl BootProgress {
    pub fn new(label: impl Into<String>, duration: Duration) -> Self {
        Self {
            label: label.into(),
            duration,
            step: DEFAULT_STEP,
            step_delay: DEFAULT_STEP_DELAY,
            completion_message: String::from("Boot complete."),
            linger: DEFAULT_LINGER,
        }
    }

    /// Percentage added per step, and the pause after each step
    pub fn with_step(mut self, step: u8, delay: Duration) -> Self {
        self.step = step;
        self.step_delay = delay;
        self
    }

    pub fn with_completion_message(mut self, message: impl Into<String>) -> Self {
        self.completion_message = message.into();
        self
    }

    /// How long the completion message stays up before the screen is cleared
    pub fn with_linger(mut self, linger: Duration) -> Self {
        self.linger = linger;
        self
    }

    /// Draw the bar until done, show the completion message, then clear.
    ///
    /// The bar never runs past the ceiling: the last pause is shortened
    /// to whatever time remains.
    pub fn run<W: Write>(&self, out: &mut W) -> io::Result<ProgressOutcome> {
        clear_screen(out)?;
        self.draw_header(out)?;

        let start = Instant::now();
        let mut percent = 0u8;
        let mut timed_out = false;
        self.draw_bar(out, percent, start.elapsed())?;

        while percent < 100 {
            percent = percent.saturating_add(self.step).min(100);
            let remaining = self.duration.saturating_sub(start.elapsed());
            thread::sleep(self.step_delay.min(remaining));

            if percent < 100 && start.elapsed() >= self.duration {
                percent = 100;
                timed_out = true;
            }
            self.draw_bar(out, percent, start.elapsed())?;
        }
        let elapsed = start.elapsed();

        tracing::debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            timed_out,
            "Boot progress finished"
        );

        queue!(
            out,
            Print("\n"),
            SetForegroundColor(Color::Green),
            SetAttribute(Attribute::Bold),
            Print(&self.completion_message),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n"),
        )?;
        out.flush()?;

        if !self.linger.is_zero() {
            thread::sleep(self.linger);
        }
        clear_screen(out)?;

        Ok(ProgressOutcome {
            percent,
            elapsed,
            timed_out,
        })
    }

    fn draw_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let title = format!(" {TITLE} ");
        let side = BAR_WIDTH.saturating_sub(title.chars().count()) / 2;
        queue!(
            out,
            SetForegroundColor(Color::Cyan),
            SetAttribute(Attribute::Bold),
            Print("─".repeat(side)),
            Print(&title),
            Print("─".repeat(side)),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n"),
        )
    }

    fn draw_bar<W: Write>(&self, out: &mut W, percent: u8, elapsed: Duration) -> io::Result<()> {
        let filled = BAR_WIDTH * usize::from(percent) / 100;
        queue!(
            out,
            MoveToColumn(0),
            SetForegroundColor(Color::Green),
            Print(&self.label),
            ResetColor,
            Print(" "),
            SetForegroundColor(Color::Magenta),
            Print("━".repeat(filled)),
            SetForegroundColor(Color::DarkGrey),
            Print("━".repeat(BAR_WIDTH - filled)),
            ResetColor,
            Print(format!(" {:>3}% {:.1}s", percent, elapsed.as_secs_f64())),
            Clear(ClearType::UntilNewLine),
        )?;
        out.flush()
    }
}
