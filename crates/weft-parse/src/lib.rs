mod grammar;
mod parser;
#[cfg(test)]
mod tests;

use line_index::LineIndex;
use text_size::TextSize;
use weft_errors::Diagnostic;
use weft_lint::LintConfig;
pub use weft_syntax::{Dialect, SyntaxTree};
use weft_tokenizer::{Scanner, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    pub dialect: Dialect,
    /// Whether [`Parse::location`] can resolve offsets to lines and columns.
    pub location: bool,
    pub lint: LintConfig,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { dialect: Dialect::default(), location: true, lint: LintConfig::default() }
    }
}

/// Zero-based line and UTF-8 column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: u32,
    pub col: u32,
    pub offset: TextSize,
}

#[derive(Debug)]
pub struct Parse {
    tree: SyntaxTree,
    errors: Vec<Diagnostic>,
    line_index: Option<LineIndex>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Parse errors in scan order, followed by lint entries.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn line_index(&self) -> Option<&LineIndex> {
        self.line_index.as_ref()
    }

    pub fn location(&self, offset: TextSize) -> Option<Location> {
        let line_index = self.line_index.as_ref()?;
        if offset > TextSize::of(self.tree.text()) {
            return None;
        }
        let line_col = line_index.line_col(offset);
        Some(Location { line: line_col.line, col: line_col.col, offset })
    }

    pub fn into_parts(self) -> (SyntaxTree, Vec<Diagnostic>) {
        (self.tree, self.errors)
    }
}

pub fn parse(text: &str, options: &ParserOptions) -> Parse {
    let mut parser = parser::Parser::new(text, options.dialect);
    let mut scanner = Scanner::new(text, options.dialect);

    loop {
        let token = scanner.scan();
        grammar::token(&mut parser, token);
        if token.kind == TokenKind::EOS {
            break;
        }
    }

    let (tree, errors) = parser.finish();
    let mut errors = errors.into_vec();
    let parse_errors = errors.len();
    errors.extend(weft_lint::lint(&tree, &options.lint));
    log::trace!(
        "parsed {} bytes into {} nodes, {parse_errors} parse errors, {} lint entries",
        text.len(),
        tree.node_count(),
        errors.len() - parse_errors,
    );

    let line_index = options.location.then(|| LineIndex::new(text));
    Parse { tree, errors, line_index }
}
