//! Styled messages on stderr.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Everything goes to stderr so that `confmark convert` can stream markup on
/// stdout.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        self.line(&style.apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.green, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.yellow, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.styled(&self.cyan_bold, msg);
    }

    /// Secondary text, such as generated markup in a dry run.
    pub(crate) fn hint(&self, msg: &str) {
        self.styled(&self.dim, msg);
    }

    /// Error code in yellow followed by how to fix it.
    pub(crate) fn remediation(&self, code: &str, hint: &str) {
        self.line(&format!(
            "{} {}",
            self.yellow.apply_to(format!("[{code}]")),
            self.dim.apply_to(hint)
        ));
    }

    pub(crate) fn separator(&self) {
        self.line(&"=".repeat(70));
    }
}
