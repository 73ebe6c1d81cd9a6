//! Terminal styling helpers for CLI output
//!
//! Pairs with `anstream` printing so styles degrade cleanly when stdout
//! is not a terminal.

use owo_colors::OwoColorize;

/// Checkmark used in success lines.
pub fn check() -> &'static str {
    "✓"
}

/// Styling shorthand for CLI strings
pub trait Stylize {
    /// De-emphasized secondary text
    fn muted(&self) -> String;
    /// Highlighted value (branch names, PR numbers)
    fn accent(&self) -> String;
    /// Emphasized lead-in text
    fn emphasis(&self) -> String;
    /// Success text
    fn success(&self) -> String;
    /// Warning text
    fn warn(&self) -> String;
}

impl<T: std::fmt::Display> Stylize for T {
    fn muted(&self) -> String {
        format!("{}", self.dimmed())
    }

    fn accent(&self) -> String {
        format!("{}", self.cyan())
    }

    fn emphasis(&self) -> String {
        format!("{}", self.bold())
    }

    fn success(&self) -> String {
        format!("{}", self.green())
    }

    fn warn(&self) -> String {
        format!("{}", self.yellow())
    }
}
