//! Terminal output formatting with colors
//!
//! Every helper writes to the given writer so the menu can run against any
//! output. Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Error line (red bold "ERROR:" prefix)
pub fn error<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{} {}", "ERROR:".red().bold(), msg)
}

/// Success line (green checkmark)
pub fn success<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{} {}", "✓".green(), msg)
}

/// Labelled result (green label)
pub fn action<W: Write>(out: &mut W, label: &str, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", label.green(), msg)
}

/// Section header (cyan bold)
pub fn header<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan().bold())
}

/// Plain output (no color, for data lines)
pub fn info<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Prompt line (cyan), flushed so it shows before input is read
pub fn prompt<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan())?;
    out.flush()
}
