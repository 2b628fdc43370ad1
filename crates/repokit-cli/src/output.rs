//! Output formatting utilities for the CLI

use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::io::{self, IsTerminal, Write};

/// Forces stdout to be treated as a terminal
pub const FORCE_TTY_ENV: &str = "REPOKIT_FORCE_TTY";

/// Context for output formatting.
///
/// Owns the stdout/stderr writers so commands never print directly, and
/// records whether stdout is attached to a terminal.
pub struct OutputContext {
    out: RefCell<Box<dyn Write>>,
    err: RefCell<Box<dyn Write>>,
    stdout_tty: bool,
    pub no_color: bool,
    pub quiet: bool,
}

impl std::fmt::Debug for OutputContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputContext")
            .field("stdout_tty", &self.stdout_tty)
            .field("no_color", &self.no_color)
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}

impl OutputContext {
    pub fn new(no_color: bool, quiet: bool) -> Self {
        // Disable colors if NO_COLOR is set or --no-color flag is used
        let no_color = no_color || std::env::var("NO_COLOR").is_ok();

        let stdout_tty = match std::env::var(FORCE_TTY_ENV) {
            Ok(v) if !v.is_empty() && v != "0" && v != "false" => true,
            _ => io::stdout().is_terminal(),
        };

        Self {
            out: RefCell::new(Box::new(io::stdout())),
            err: RefCell::new(Box::new(io::stderr())),
            stdout_tty,
            no_color,
            quiet,
        }
    }

    /// In-memory context for tests: not a terminal, no color.
    #[cfg(test)]
    pub fn test() -> (Self, TestBuffer, TestBuffer) {
        let out = TestBuffer::default();
        let err = TestBuffer::default();
        let ctx = Self {
            out: RefCell::new(Box::new(out.clone())),
            err: RefCell::new(Box::new(err.clone())),
            stdout_tty: false,
            no_color: true,
            quiet: false,
        };
        (ctx, out, err)
    }

    #[cfg(test)]
    pub fn set_stdout_tty(&mut self, tty: bool) {
        self.stdout_tty = tty;
    }

    /// Whether stdout is attached to an interactive terminal
    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_tty
    }

    fn color_enabled(&self) -> bool {
        self.stdout_tty && !self.no_color
    }

    /// Print a success message
    pub fn success(&self, msg: &str) {
        if self.quiet {
            return;
        }

        let mut out = self.out.borrow_mut();
        let _ = if self.color_enabled() {
            writeln!(out, "{} {}", "✓".green(), msg)
        } else {
            writeln!(out, "✓ {}", msg)
        };
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        let mut err = self.err.borrow_mut();
        let _ = if self.no_color {
            writeln!(err, "✗ {}", msg)
        } else {
            writeln!(err, "{} {}", "✗".red(), msg)
        };
    }

    /// Print a plain line to stdout
    pub fn println(&self, msg: &str) {
        let _ = writeln!(self.out.borrow_mut(), "{}", msg);
    }

    /// Print an indented detail line
    pub fn info(&self, msg: &str) {
        if self.quiet {
            return;
        }

        self.println(&format!("  {}", msg));
    }
}

/// Shared in-memory writer used to capture command output in tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct TestBuffer(std::rc::Rc<RefCell<Vec<u8>>>);

#[cfg(test)]
impl TestBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

#[cfg(test)]
impl Write for TestBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
