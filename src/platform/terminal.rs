//! Terminal lifecycle and the end-of-session report

use std::io::{self, Write};

use crossterm::{ExecutableCommand, cursor, terminal};

use crate::session::TerminationSink;
use crate::sim::Outcome;

/// Raw mode + alternate screen for as long as it lives.
/// Dropping it restores the terminal on every exit path.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// The guard exists as soon as raw mode is on, so a failure in the
    /// remaining setup still restores the terminal.
    pub fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Remembers the outcome so it can be reported once the screen is restored
#[derive(Debug, Default)]
pub struct ConsoleSink {
    result: Option<(Outcome, u32)>,
}

impl ConsoleSink {
    /// Final message for the player
    pub fn message(&self) -> Option<String> {
        self.result.map(|(outcome, score)| match outcome {
            Outcome::Victory => format!("You Won! Final Score: {score}"),
            Outcome::Defeat => format!("Game Over! Final Score: {score}"),
            Outcome::Aborted => format!("Game aborted. Score: {score}"),
        })
    }
}

impl TerminationSink for ConsoleSink {
    fn finish(&mut self, outcome: Outcome, final_score: u32) {
        self.result = Some((outcome, final_score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let mut sink = ConsoleSink::default();
        assert_eq!(sink.message(), None);

        sink.finish(Outcome::Victory, 90);
        assert_eq!(sink.message().as_deref(), Some("You Won! Final Score: 90"));

        sink.finish(Outcome::Defeat, 30);
        assert_eq!(sink.message().as_deref(), Some("Game Over! Final Score: 30"));

        sink.finish(Outcome::Aborted, 0);
        assert_eq!(sink.message().as_deref(), Some("Game aborted. Score: 0"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_failed_setup_leaves_cooked_mode() {
        // Without a tty raw mode itself fails; with one, the screen switch fails
        assert!(TerminalGuard::enter(&mut BrokenPipe).is_err());
        assert!(!terminal::is_raw_mode_enabled().unwrap_or(false));
    }
}
