use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    #[default]
    Ignore,
    Warn,
    Error,
}

impl Severity {
    /// Reads a configured level. Unknown levels disable the check.
    pub fn from_level(level: &str) -> Self {
        if level.eq_ignore_ascii_case("error") {
            Self::Error
        } else if level.eq_ignore_ascii_case("warn") {
            Self::Warn
        } else {
            Self::Ignore
        }
    }

    fn level(self) -> Level {
        match self {
            Self::Error => Level::Error,
            Self::Warn => Level::Warning,
            Self::Ignore => Level::Note,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    name: &'static str,
    message: String,
    severity: Severity,
    range: TextRange,
}

impl Diagnostic {
    pub fn new(
        name: &'static str,
        message: impl Into<String>,
        severity: Severity,
        range: TextRange,
    ) -> Self {
        Self { name, message: message.into(), severity, range }
    }

    pub fn error(name: &'static str, message: impl Into<String>, range: TextRange) -> Self {
        Self::new(name, message, Severity::Error, range)
    }

    pub fn warning(name: &'static str, message: impl Into<String>, range: TextRange) -> Self {
        Self::new(name, message, Severity::Warn, range)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.severity.level();
        let message = level.title(&self.message).id(self.name).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

/// Append-only diagnostic sink.
///
/// A diagnostic whose name and severity match the previous one and whose
/// range starts where the previous one ends extends that entry instead of
/// adding a new one, so runs of scanner errors surface once.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match self.entries.last_mut() {
            Some(last)
                if last.name == diagnostic.name
                    && last.severity == diagnostic.severity
                    && last.range.end() == diagnostic.range.start() =>
            {
                last.range = last.range.cover(diagnostic.range);
            }
            _ => self.entries.push(diagnostic),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}
