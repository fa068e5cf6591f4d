//! Reporter that prints to the terminal.

use std::io::{self, Write};

use gid_common::Reporter;

/// Prints progress to stdout and problems to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Prints a section banner.
    pub fn banner(&self, title: &str) {
        let rule = "=".repeat(70);
        write_line(io::stdout().lock(), &format!("\n{rule}\n{title}\n{rule}"));
    }
}

fn write_line(mut out: impl Write, text: &str) {
    // A closed pipe must not abort the run.
    let _ = writeln!(out, "{text}");
}

impl Reporter for ConsoleReporter {
    fn note(&self, message: &str) {
        write_line(io::stdout().lock(), message);
    }

    fn warn(&self, message: &str) {
        write_line(io::stderr().lock(), &format!("warning: {message}"));
    }

    fn fail(&self, message: &str) {
        write_line(io::stderr().lock(), &format!("error: {message}"));
    }

    fn preview(&self, title: &str, rendered: &str) {
        write_line(io::stdout().lock(), &format!("\n{title}\n{rendered}"));
    }
}
