//! Editor queries over hybrid documents, answered by a language engine
//! that only ever sees generated code.

mod host;
#[cfg(test)]
mod tests;

use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};
use line_index::LineIndex;
use text_size::{TextRange, TextSize};
use weft_db::{Document, SourceFile, Workspace};
use weft_errors::Severity;

pub use host::{AnalysisHost, HostCompletion, HostDiagnostic, HostHover, NoHost};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePosition {
    pub path: Utf8PathBuf,
    pub offset: TextSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRange {
    pub path: Utf8PathBuf,
    pub range: TextRange,
}

pub struct Analysis<H> {
    workspace: Workspace,
    host: H,
}

impl<H: AnalysisHost> Analysis<H> {
    pub fn new(workspace: Workspace, host: H) -> Self {
        Self { workspace, host }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    /// Resolves an editor position, clamping the column to the line.
    pub fn file_position(
        &self,
        path: Utf8PathBuf,
        position: lsp_types::Position,
    ) -> Option<FilePosition> {
        let document = self.workspace.document(&path)?;
        let line_range = document.line_index().line(position.line)?;
        let col = TextSize::from(position.character);
        let offset = line_range.start() + col.min(line_range.len());
        Some(FilePosition { path, offset })
    }

    pub fn to_range(&self, file_range: &FileRange) -> Option<lsp_types::Range> {
        let document = self.workspace.document(&file_range.path)?;
        Some(to_range(document.line_index(), file_range.range))
    }

    /// Parse and lint results, then host diagnostics mapped back to the
    /// source. Host diagnostics on generated-only text are dropped.
    pub fn diagnostics(&self, path: &Utf8Path) -> Vec<lsp_types::Diagnostic> {
        let Some(file) = self.workspace.source_file(path) else {
            return Vec::new();
        };
        let Some(document) = self.workspace.document(path) else {
            return Vec::new();
        };
        let line_index = document.line_index();

        let mut diagnostics = file
            .errors()
            .iter()
            .map(|error| {
                diagnostic(
                    line_index,
                    error.range(),
                    error.severity(),
                    Some(error.name()),
                    error.message().to_owned(),
                )
            })
            .collect::<Vec<_>>();

        for code in file.virtual_codes() {
            for host in self.host.diagnostics(code.document()) {
                let Some(range) = code.source_map().source_range(host.range) else {
                    log::trace!("dropping unmapped diagnostic in {}", code.path());
                    continue;
                };
                diagnostics.push(diagnostic(line_index, range, host.severity, None, host.message));
            }
        }

        diagnostics
    }

    pub fn hover(&self, position: &FilePosition) -> Option<lsp_types::Hover> {
        let (file, document) = self.source(position)?;
        let (code, offset) = file.virtual_code_at(position.offset)?;
        let hover = self.host.hover(code.document(), offset)?;

        let range = hover
            .range
            .and_then(|range| code.source_map().source_range(range))
            .map(|range| to_range(document.line_index(), range));
        Some(lsp_types::Hover {
            contents: lsp_types::HoverContents::Markup(lsp_types::MarkupContent {
                kind: lsp_types::MarkupKind::Markdown,
                value: hover.contents,
            }),
            range,
        })
    }

    /// Targets inside generated documents are reported at their source.
    /// Generated-only targets are dropped and foreign ones pass through.
    pub fn goto_definition(&self, position: &FilePosition) -> Vec<FileRange> {
        let Some((file, _)) = self.source(position) else {
            return Vec::new();
        };
        let Some((code, offset)) = file.virtual_code_at(position.offset) else {
            return Vec::new();
        };

        self.host
            .definition(code.document(), offset)
            .into_iter()
            .filter_map(|target| match self.workspace.source_for_virtual(&target.path) {
                Some((owner, code)) => {
                    let range = code.source_map().source_range(target.range)?;
                    Some(FileRange { path: owner.path().to_path_buf(), range })
                }
                None => Some(target),
            })
            .collect()
    }

    /// Host completions. An edit whose range cannot be mapped back is
    /// removed from its item.
    pub fn completions(&self, position: &FilePosition) -> Vec<lsp_types::CompletionItem> {
        let Some((file, document)) = self.source(position) else {
            return Vec::new();
        };
        let Some((code, offset)) = file.virtual_code_at(position.offset) else {
            return Vec::new();
        };

        self.host
            .completions(code.document(), offset)
            .into_iter()
            .map(|completion| {
                let text_edit = completion.edit.and_then(|(range, new_text)| {
                    let range = code.source_map().source_range(range)?;
                    Some(lsp_types::CompletionTextEdit::Edit(lsp_types::TextEdit::new(
                        to_range(document.line_index(), range),
                        new_text,
                    )))
                });
                lsp_types::CompletionItem {
                    label: completion.label,
                    detail: completion.detail,
                    text_edit,
                    ..lsp_types::CompletionItem::default()
                }
            })
            .collect()
    }

    fn source(&self, position: &FilePosition) -> Option<(&SourceFile, Rc<Document>)> {
        let file = self.workspace.source_file(&position.path)?;
        let document = self.workspace.document(&position.path)?;
        Some((file, document))
    }
}

fn to_range(line_index: &LineIndex, range: TextRange) -> lsp_types::Range {
    let start = line_index.line_col(range.start());
    let end = line_index.line_col(range.end());

    lsp_types::Range {
        start: lsp_types::Position::new(start.line, start.col),
        end: lsp_types::Position::new(end.line, end.col),
    }
}

fn diagnostic(
    line_index: &LineIndex,
    range: TextRange,
    severity: Severity,
    code: Option<&str>,
    message: String,
) -> lsp_types::Diagnostic {
    let severity = match severity {
        Severity::Error => lsp_types::DiagnosticSeverity::ERROR,
        Severity::Warn => lsp_types::DiagnosticSeverity::WARNING,
        Severity::Ignore => lsp_types::DiagnosticSeverity::HINT,
    };
    lsp_types::Diagnostic::new(
        to_range(line_index, range),
        Some(severity),
        code.map(|code| lsp_types::NumberOrString::String(code.to_owned())),
        Some("weft".to_owned()),
        message,
        None,
        None,
    )
}
