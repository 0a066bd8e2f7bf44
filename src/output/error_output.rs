//! Colored error and warning blocks on stderr.
//!
//! Format: `✖ Type: message`, then optional `  × detail` and `  help: hint`.

use std::io::Write;

use crate::error::CodelError;

use super::ColorMode;
use super::ansi;

/// Error output formatter with color support.
pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.for_stderr(),
        }
    }

    /// Formatter that auto-detects color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    #[cfg(test)]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Print a [`CodelError`] with its detail and suggestion.
    pub fn print(&self, error: &CodelError) {
        let mut stderr = std::io::stderr().lock();
        self.write(&mut stderr, error);
    }

    pub fn print_warning(&self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        self.write_warning(&mut stderr, message, None);
    }

    pub fn write<W: Write>(&self, w: &mut W, error: &CodelError) {
        self.write_error(
            w,
            error.error_type(),
            &error.to_string(),
            error.detail().as_deref(),
            error.suggestion(),
        );
    }

    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        // Write failures on stderr are ignored; there is nowhere left to report them.
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}✖ {error_type}:{} {message}",
                ansi::BOLD,
                ansi::RED,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "✖ {error_type}: {message}");
        }
        self.write_detail(w, detail);

        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }

    pub fn write_warning<W: Write>(&self, w: &mut W, message: &str, detail: Option<&str>) {
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}⚠ Warning:{} {message}",
                ansi::BOLD,
                ansi::YELLOW,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "⚠ Warning: {message}");
        }
        self.write_detail(w, detail);
    }

    fn write_detail<W: Write>(&self, w: &mut W, detail: Option<&str>) {
        let Some(d) = detail else {
            return;
        };
        if self.use_colors {
            let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
        } else {
            let _ = writeln!(w, "  × {d}");
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
