use text_size::{TextRange, TextSize};
use weft_db::Document;
use weft_errors::Severity;

use crate::FileRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDiagnostic {
    pub range: TextRange,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostHover {
    pub range: Option<TextRange>,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCompletion {
    pub label: String,
    pub detail: Option<String>,
    /// Replacement range and text.
    pub edit: Option<(TextRange, String)>,
}

/// Language engine answering questions about generated documents. Offsets
/// and ranges are in the generated document's coordinates.
pub trait AnalysisHost {
    fn diagnostics(&self, _document: &Document) -> Vec<HostDiagnostic> {
        Vec::new()
    }

    fn hover(&self, _document: &Document, _offset: TextSize) -> Option<HostHover> {
        None
    }

    fn definition(&self, _document: &Document, _offset: TextSize) -> Vec<FileRange> {
        Vec::new()
    }

    fn completions(&self, _document: &Document, _offset: TextSize) -> Vec<HostCompletion> {
        Vec::new()
    }
}

/// Host with no language knowledge. Only parse and lint results surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHost;

impl AnalysisHost for NoHost {}
