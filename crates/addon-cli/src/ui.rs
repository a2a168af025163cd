//! Terminal output for commands.
//!
//! Status lines go to stdout, warnings and errors to stderr. A quiet handle
//! keeps stdout clean for output meant to be piped.

use crossterm::style::Stylize;

/// A cheap handle for printing styled status lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    quiet: bool,
}

impl Output {
    /// Create a new output handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output handle that only prints warnings and errors.
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    /// Prints a section header for an operation phase.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", title.bold());
        }
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "›".cyan());
        }
    }

    /// Log a success message.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "✓".green());
        }
    }

    /// Log a warning message.
    pub fn warning(&self, msg: &str) {
        eprintln!("{} {msg}", "!".yellow());
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "✗".red());
    }
}
