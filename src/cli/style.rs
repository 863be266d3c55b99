//! Console styling helpers

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;

/// Success marker
pub const CHECK: &str = "✓";
/// Failure marker
pub const CROSS: &str = "✗";

/// Semantic styles for console output
///
/// Styles are always emitted; the `anstream` print macros strip them per
/// stream when that stream does not support color.
pub trait Stylize: Display + Sized {
    /// Bold
    fn emphasis(&self) -> String {
        styled(self, Style::new().bold())
    }

    /// Repository names, counts, ids
    fn accent(&self) -> String {
        styled(self, Style::new().cyan())
    }

    /// Secondary information
    fn muted(&self) -> String {
        styled(self, Style::new().dimmed())
    }

    /// Success messages
    fn success(&self) -> String {
        styled(self, Style::new().green())
    }

    /// Warnings
    fn warn(&self) -> String {
        styled(self, Style::new().yellow())
    }

    /// Errors
    fn error(&self) -> String {
        styled(self, Style::new().red().bold())
    }
}

impl<T: Display> Stylize for T {}

fn styled(value: &impl Display, style: Style) -> String {
    value.style(style).to_string()
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.error()
}
