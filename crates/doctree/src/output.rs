//! Terminal output for the CLI.

use console::{Style, Term};

/// Writes results to stdout and everything else to stderr.
///
/// Keeping diagnostics off stdout lets `doctree tree --json` be piped.
pub(crate) struct Output {
    stdout: Term,
    stderr: Term,
    ok: Style,
    warn: Style,
    fail: Style,
    muted: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            stdout: Term::stdout(),
            stderr: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
            muted: Style::new().dim(),
        }
    }

    /// Command result, to stdout.
    pub(crate) fn print(&self, line: &str) {
        let _ = self.stdout.write_line(line);
    }

    /// Plain diagnostic, to stderr.
    pub(crate) fn note(&self, line: &str) {
        let _ = self.stderr.write_line(line);
    }

    pub(crate) fn ok(&self, line: &str) {
        self.styled(&self.ok, line);
    }

    pub(crate) fn warn(&self, line: &str) {
        self.styled(&self.warn, line);
    }

    pub(crate) fn fail(&self, line: &str) {
        self.styled(&self.fail, line);
    }

    /// `text` styled for secondary information, for embedding in a line.
    pub(crate) fn muted(&self, text: &str) -> String {
        self.muted.apply_to(text).to_string()
    }

    fn styled(&self, style: &Style, line: &str) {
        let _ = self.stderr.write_line(&style.apply_to(line).to_string());
    }
}
