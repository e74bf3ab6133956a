mod classes;
mod cursor;
mod kind;
mod script;
mod template;

use cursor::Cursor;
pub use kind::{Dialect, LexError, ScannerState, TokenKind};
use kind::TokenKind::*;
use once_cell::sync::Lazy;
use regex::Regex;
pub use text_size::{TextRange, TextSize};

static MDX_TEXT_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\x0C{]|<(?:[A-Za-z>]|!--)").unwrap());

static MARKDOWN_TEXT_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\x0C]|<!--").unwrap());

static FENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\r?\n```").unwrap());

static FENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n```").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub error: Option<LexError>,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range]
    }
}

/// Single-pass state machine turning a hybrid document into tokens.
///
/// Tokens tile the input: every byte belongs to exactly one token, and the
/// stream ends with one empty [`TokenKind::EOS`]. Malformed input never
/// stops the scanner; it yields tokens carrying a [`LexError`] instead.
pub struct Scanner<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    dialect: Dialect,
    state: ScannerState,
    /// State restored when a comment or mustache closes.
    return_state: ScannerState,
    last_kind: Option<TokenKind>,
    last_tag: &'a str,
    in_directive: bool,
    value_mark: Option<char>,
    space_after_tag: bool,
    /// Whether the last mustache content was whitespace only.
    blank_mustache: bool,
    error: Option<LexError>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, dialect: Dialect) -> Self {
        Self {
            text,
            cursor: Cursor::new(text),
            dialect,
            state: ScannerState::WithinContent,
            return_state: ScannerState::WithinContent,
            last_kind: None,
            last_tag: "",
            in_directive: false,
            value_mark: None,
            space_after_tag: false,
            blank_mustache: false,
            error: None,
        }
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn scan(&mut self) -> Token {
        let (kind, start) = loop {
            let start = self.cursor.offset();
            if let Some(kind) = self.step() {
                break (kind, start);
            }
            debug_assert_eq!(start, self.cursor.offset(), "state change must not consume");
        };

        self.last_kind = Some(kind);
        Token { kind, range: TextRange::new(start, self.cursor.offset()), error: self.error.take() }
    }

    /// Produces the kind of the next token, or `None` after a pure state
    /// change that consumed nothing.
    fn step(&mut self) -> Option<TokenKind> {
        if self.cursor.is_eof() {
            return Some(EOS);
        }

        match self.state {
            ScannerState::WithinContent => self.content(),
            ScannerState::WithinInlineContent => self.inline_content(),
            ScannerState::WithinComment => self.comment(),
            ScannerState::WithinCodeBlockAttr => self.code_block_attr(),
            ScannerState::WithinCodeBlock => self.code_block(),
            ScannerState::AfterOpeningStartTag => self.after_opening_start_tag(),
            ScannerState::WithinTag => self.within_tag(),
            ScannerState::AfterAttributeName => self.after_attribute_name(),
            ScannerState::BeforeAttributeValue => self.before_attribute_value(),
            ScannerState::WithinAttributeValue => self.within_attribute_value(),
            ScannerState::WithinMustache => self.mustache(),
            ScannerState::AfterOpeningEndTag => self.after_opening_end_tag(),
            ScannerState::WithinEndTag => self.within_end_tag(),
            ScannerState::WithinScriptContent => self.raw_text(false),
            ScannerState::WithinStyleContent => self.raw_text(true),
        }
    }

    fn error(&mut self, kind: TokenKind, error: LexError) -> Option<TokenKind> {
        self.error = Some(error);
        Some(kind)
    }

    fn content(&mut self) -> Option<TokenKind> {
        if self.cursor.skip_whitespace() {
            return Some(WHITESPACE);
        }
        if self.cursor.eat_str("<!--") {
            return Some(self.enter(ScannerState::WithinComment, COMMENT_START));
        }

        match self.dialect {
            Dialect::Template => self.template_content(),
            Dialect::Markdown | Dialect::Mdx => {
                if self.cursor.eat_str("```") {
                    self.state = ScannerState::WithinCodeBlockAttr;
                    return Some(CODE_BLOCK_START);
                }
                if self.dialect == Dialect::Mdx {
                    if script::at_import(&self.cursor) {
                        self.cursor.eat_str("import");
                        if !script::skip_import(&mut self.cursor) {
                            return self.error(IMPORT_STATEMENT, LexError::ImportUnterminated);
                        }
                        return Some(IMPORT_STATEMENT);
                    }
                    if let Some(kind) = self.host_code() {
                        return Some(kind);
                    }
                }
                self.markup_text()
            }
        }
    }

    fn inline_content(&mut self) -> Option<TokenKind> {
        if self.cursor.eat_newline() {
            self.state = ScannerState::WithinContent;
            return Some(PARAGRAPH_END);
        }
        if self.cursor.eat_str("<!--") {
            return Some(self.enter(ScannerState::WithinComment, COMMENT_START));
        }
        if self.dialect == Dialect::Mdx {
            if let Some(kind) = self.host_code() {
                return Some(kind);
            }
        }
        self.markup_text()
    }

    /// Brace expressions and JSX in Mdx content.
    fn host_code(&mut self) -> Option<TokenKind> {
        if self.cursor.eat('{') {
            if !script::skip_braces(&mut self.cursor) {
                return self.error(BLOCK_EXPRESSION, LexError::ExpressionUnterminated);
            }
            return Some(BLOCK_EXPRESSION);
        }

        let second = self.cursor.second();
        if self.cursor.peek() == '<' && (second.is_ascii_alphabetic() || second == '>') {
            self.cursor.advance();
            if !script::skip_jsx(&mut self.cursor) {
                return self.error(JSX_EXPRESSION, LexError::JsxUnterminated);
            }
            return Some(JSX_EXPRESSION);
        }

        None
    }

    fn markup_text(&mut self) -> Option<TokenKind> {
        let start = self.cursor.pos();
        let end = if self.dialect == Dialect::Mdx { &MDX_TEXT_END } else { &MARKDOWN_TEXT_END };
        self.cursor.seek_regex(end);

        if self.cursor.pos() == start {
            self.cursor.advance();
            return self.error(UNKNOWN, LexError::UnexpectedCharacter);
        }

        self.state = ScannerState::WithinInlineContent;
        Some(TEXT)
    }

    fn enter(&mut self, state: ScannerState, kind: TokenKind) -> TokenKind {
        self.return_state = self.state;
        self.state = state;
        kind
    }

    fn comment(&mut self) -> Option<TokenKind> {
        if self.cursor.eat_str("-->") {
            self.state = self.return_state;
            return Some(COMMENT_END);
        }
        self.cursor.seek_str("-->");
        Some(COMMENT_CONTENT)
    }

    fn code_block_attr(&mut self) -> Option<TokenKind> {
        if self.cursor.eat_newline() {
            self.state = ScannerState::WithinCodeBlock;
            return Some(WHITESPACE);
        }
        if self.cursor.skip_line_space() {
            return Some(WHITESPACE);
        }
        self.cursor.advance_while(|c| !classes::is_whitespace(c));
        Some(CODE_BLOCK_ATTRIBUTE)
    }

    fn code_block(&mut self) -> Option<TokenKind> {
        if (self.cursor.at_line_start() && self.cursor.eat_str("```"))
            || self.cursor.eat_regex(&FENCE_END).is_some()
        {
            self.state = ScannerState::WithinContent;
            return Some(CODE_BLOCK_END);
        }
        self.cursor.seek_regex(&FENCE_END_RE);
        Some(CODE_BLOCK_CONTENT)
    }
}

/// Every token up to and including the first `EOS`.
pub fn tokenize(text: &str, dialect: Dialect) -> Vec<Token> {
    let mut scanner = Scanner::new(text, dialect);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        tokens.push(token);
        if token.kind == EOS {
            return tokens;
        }
    }
}
