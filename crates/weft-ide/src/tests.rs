use camino::{Utf8Path, Utf8PathBuf};
use lsp_types::{CompletionTextEdit, DiagnosticSeverity, HoverContents, NumberOrString, Position};
use text_size::{TextRange, TextSize};
use weft_config::WeftConfig;
use weft_db::{Document, Workspace};
use weft_errors::Severity;

use crate::{
    Analysis, AnalysisHost, FilePosition, FileRange, HostCompletion, HostDiagnostic, HostHover,
};

const PAGE: &str = "/docs/a.mdx";

/// Answers from plain text: identifiers are words, a definition is the
/// first occurrence of the word, and every `bad` or `React` is an error.
struct WordHost;

fn word_at(text: &str, offset: TextSize) -> Option<TextRange> {
    let at = usize::from(offset);
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let start = text[..at].rfind(|c| !is_word(c)).map_or(0, |i| i + 1);
    let end = text[at..].find(|c| !is_word(c)).map_or(text.len(), |i| at + i);
    (start < end).then(|| TextRange::new((start as u32).into(), (end as u32).into()))
}

fn occurrences(text: &str, word: &str) -> Vec<TextRange> {
    text.match_indices(word)
        .map(|(start, _)| TextRange::at((start as u32).into(), TextSize::of(word)))
        .collect()
}

impl AnalysisHost for WordHost {
    fn diagnostics(&self, document: &Document) -> Vec<HostDiagnostic> {
        ["bad", "React"]
            .into_iter()
            .flat_map(|word| occurrences(document.text(), word))
            .map(|range| HostDiagnostic {
                range,
                severity: Severity::Error,
                message: format!("unknown `{}`", &document.text()[range]),
            })
            .collect()
    }

    fn hover(&self, document: &Document, offset: TextSize) -> Option<HostHover> {
        let range = word_at(document.text(), offset)?;
        Some(HostHover { range: Some(range), contents: format!("`{}`", &document.text()[range]) })
    }

    fn definition(&self, document: &Document, offset: TextSize) -> Vec<FileRange> {
        let Some(range) = word_at(document.text(), offset) else {
            return Vec::new();
        };
        let word = &document.text()[range];
        let mut targets = occurrences(document.text(), word)
            .into_iter()
            .take(1)
            .map(|range| FileRange { path: document.path().to_path_buf(), range })
            .collect::<Vec<_>>();
        targets.push(FileRange {
            path: Utf8PathBuf::from(format!("/lib/{word}.d.ts")),
            range: TextRange::at(0.into(), TextSize::of(word)),
        });
        targets
    }

    fn completions(&self, document: &Document, offset: TextSize) -> Vec<HostCompletion> {
        let Some(range) = word_at(document.text(), offset) else {
            return Vec::new();
        };
        vec![
            HostCompletion {
                label: "zebra".to_owned(),
                detail: Some("const zebra: number".to_owned()),
                edit: Some((range, "zebra".to_owned())),
            },
            HostCompletion {
                label: "React".to_owned(),
                detail: None,
                edit: Some((TextRange::at(7.into(), 5.into()), "React".to_owned())),
            },
        ]
    }
}

fn analysis(text: &str) -> Analysis<WordHost> {
    let mut workspace = Workspace::new(WeftConfig::default());
    workspace.open(Utf8Path::new(PAGE), text.to_owned()).unwrap();
    Analysis::new(workspace, WordHost)
}

fn position(analysis: &Analysis<WordHost>, line: u32, character: u32) -> FilePosition {
    analysis.file_position(PAGE.into(), Position::new(line, character)).unwrap()
}

fn lsp_range(start: (u32, u32), end: (u32, u32)) -> lsp_types::Range {
    lsp_types::Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
}

#[test]
fn columns_clamp_to_the_line() {
    let analysis = analysis("ab\ncd\n");
    assert_eq!(position(&analysis, 1, 1).offset, TextSize::new(4));
    assert!(position(&analysis, 0, 40).offset <= TextSize::new(3));
    assert!(analysis.file_position(PAGE.into(), Position::new(9, 0)).is_none());
}

#[test]
fn diagnostics_map_back_or_drop() {
    let analysis = analysis("{bad}\n\n```js\nlet a");
    let diagnostics = analysis.diagnostics(Utf8Path::new(PAGE));

    let (host, parsed): (Vec<_>, Vec<_>) = diagnostics.iter().partition(|d| d.code.is_none());

    let unclosed = NumberOrString::String("tagUnClosed".to_owned());
    let unclosed = parsed.iter().find(|d| d.code.as_ref() == Some(&unclosed)).unwrap();
    assert_eq!(unclosed.severity, Some(DiagnosticSeverity::ERROR));
    assert_eq!(host.len(), 1);
    assert_eq!(host[0].message, "unknown `bad`");
    assert_eq!(host[0].range, lsp_range((0, 1), (0, 4)));
    assert_eq!(diagnostics.last(), Some(host[0]));
}

#[test]
fn hover_maps_range_back() {
    let analysis = analysis("Hi {zed}\n");
    let hover = analysis.hover(&position(&analysis, 0, 5)).unwrap();

    assert_eq!(hover.range, Some(lsp_range((0, 4), (0, 7))));
    let HoverContents::Markup(contents) = hover.contents else { panic!("markup expected") };
    assert_eq!(contents.value, "`zed`");
}

#[test]
fn hover_outside_generated_code_is_none() {
    let analysis = analysis("{zed}\n\n{zed}\n");
    assert!(analysis.hover(&position(&analysis, 1, 0)).is_none());
}

#[test]
fn definitions_map_to_source() {
    let analysis = analysis("{zed}\n\n{zed}\n");
    let targets = analysis.goto_definition(&position(&analysis, 2, 2));

    assert_eq!(
        targets,
        vec![
            FileRange { path: PAGE.into(), range: TextRange::new(1.into(), 4.into()) },
            FileRange { path: "/lib/zed.d.ts".into(), range: TextRange::new(0.into(), 3.into()) },
        ]
    );
}

#[test]
fn unmapped_completion_edits_are_removed() {
    let analysis = analysis("{zed}\n\n{zed}\n");
    let items = analysis.completions(&position(&analysis, 2, 2));

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].label, "zebra");
    let Some(CompletionTextEdit::Edit(edit)) = &items[0].text_edit else {
        panic!("edit expected")
    };
    assert_eq!(edit.range, lsp_range((2, 1), (2, 4)));
    assert_eq!(items[1].label, "React");
    assert!(items[1].text_edit.is_none());
}

#[test]
fn plain_files_answer_nothing() {
    let mut analysis = analysis("");
    let path = Utf8Path::new("/docs/readme.txt");
    analysis.workspace_mut().open(path, "text".to_owned()).unwrap();

    assert!(analysis.diagnostics(path).is_empty());
    let position = FilePosition { path: path.to_path_buf(), offset: TextSize::new(1) };
    assert!(analysis.hover(&position).is_none());
    assert!(analysis.goto_definition(&position).is_empty());
}
