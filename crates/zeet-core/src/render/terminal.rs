//! Terminal collaborators: width query and screen clearing

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

/// Width used whenever the terminal cannot be queried
pub const DEFAULT_COLUMNS: u16 = 80;

/// Source of the current terminal width in columns
pub trait TerminalWidth {
    fn columns(&self) -> io::Result<u16>;
}

/// Queries the controlling terminal through crossterm
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermTerminal;

impl TerminalWidth for CrosstermTerminal {
    fn columns(&self) -> io::Result<u16> {
        crossterm::terminal::size().map(|(cols, _rows)| cols)
    }
}

/// Always reports the same width (pipes, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedWidth(pub u16);

impl TerminalWidth for FixedWidth {
    fn columns(&self) -> io::Result<u16> {
        Ok(self.0)
    }
}

/// Query the width, falling back to [`DEFAULT_COLUMNS`] on failure or a zero reading
pub fn columns_or_default(source: &dyn TerminalWidth) -> u16 {
    match source.columns() {
        Ok(0) => DEFAULT_COLUMNS,
        Ok(cols) => cols,
        Err(e) => {
            tracing::trace!(error = %e, "Terminal width unavailable, using default");
            DEFAULT_COLUMNS
        }
    }
}

/// Clear the whole screen and home the cursor
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenTerminal;

    impl TerminalWidth for BrokenTerminal {
        fn columns(&self) -> io::Result<u16> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "not a tty"))
        }
    }

    #[test]
    fn test_fallback_on_error() {
        assert_eq!(columns_or_default(&BrokenTerminal), DEFAULT_COLUMNS);
    }

    #[test]
    fn test_fallback_on_zero() {
        assert_eq!(columns_or_default(&FixedWidth(0)), DEFAULT_COLUMNS);
        assert_eq!(columns_or_default(&FixedWidth(132)), 132);
    }

    #[test]
    fn test_clear_screen_sequence() {
        let mut out = Vec::new();
        clear_screen(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[2J"));
        assert!(text.ends_with("\x1b[1;1H"));
    }
}
