//! Template dialect states: tags, attributes, directives, mustaches and
//! opaque script/style bodies.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classes::is_directive_name;
use crate::kind::TokenKind::{self, *};
use crate::kind::{LexError, ScannerState};
use crate::{Scanner, script};

static ELEMENT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[_:\w][_:\w\-.\d]*").unwrap());

static ATTRIBUTE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^\s"'></=\x00-\x1F\x7F]+"#).unwrap());

static TEXT_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"<|\{\{").unwrap());

static DOUBLE_QUOTED_END: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\{\{|""#).unwrap());

static SINGLE_QUOTED_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{|'").unwrap());

static UNQUOTED_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s>]|/>").unwrap());

static SCRIPT_STOP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)//|/\*|['"`]|</script"#).unwrap());

static STYLE_STOP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)/\*|['"]|</style"#).unwrap());

impl Scanner<'_> {
    pub(crate) fn template_content(&mut self) -> Option<TokenKind> {
        if self.cursor.eat_str("</") {
            self.state = ScannerState::AfterOpeningEndTag;
            return Some(END_TAG_OPEN);
        }
        if self.cursor.eat('<') {
            self.state = ScannerState::AfterOpeningStartTag;
            return Some(START_TAG_OPEN);
        }
        if self.cursor.eat_str("{{") {
            return Some(self.enter(ScannerState::WithinMustache, MUSTACHE_START));
        }
        self.cursor.seek_regex(&TEXT_END);
        Some(TEXT)
    }

    pub(crate) fn after_opening_start_tag(&mut self) -> Option<TokenKind> {
        if let Some(name) = self.cursor.eat_regex(&ELEMENT_NAME) {
            self.last_tag = name;
            self.space_after_tag = false;
            self.state = ScannerState::WithinTag;
            return Some(START_TAG);
        }
        if self.cursor.skip_whitespace() {
            return self.error(WHITESPACE, LexError::UnexpectedWhitespace);
        }

        self.last_tag = "";
        self.state = ScannerState::WithinTag;
        self.skip_to_bracket(LexError::StartTagNameExpected)
    }

    pub(crate) fn within_tag(&mut self) -> Option<TokenKind> {
        if self.cursor.skip_whitespace() {
            self.space_after_tag = true;
            return Some(WHITESPACE);
        }
        if self.cursor.eat_str("/>") {
            self.state = ScannerState::WithinContent;
            return Some(START_TAG_SELF_CLOSE);
        }
        if self.cursor.eat('>') {
            self.state = if self.last_tag.eq_ignore_ascii_case("script") {
                ScannerState::WithinScriptContent
            } else if self.last_tag.eq_ignore_ascii_case("style") {
                ScannerState::WithinStyleContent
            } else {
                ScannerState::WithinContent
            };
            return Some(START_TAG_CLOSE);
        }
        if self.cursor.peek() == '<' {
            self.state = ScannerState::WithinContent;
            return self.error(START_TAG_CLOSE, LexError::ClosingBracketMissing);
        }

        if self.space_after_tag {
            if let Some(name) = self.cursor.eat_regex(&ATTRIBUTE_NAME_RE) {
                self.in_directive = is_directive_name(name);
                self.space_after_tag = false;
                self.state = ScannerState::AfterAttributeName;
                return Some(if self.in_directive { DIRECTIVE_NAME } else { ATTRIBUTE_NAME });
            }
        }

        self.cursor.advance();
        self.error(UNKNOWN, LexError::UnexpectedCharacterInTag)
    }

    pub(crate) fn after_attribute_name(&mut self) -> Option<TokenKind> {
        if self.cursor.skip_whitespace() {
            self.space_after_tag = true;
            return Some(WHITESPACE);
        }
        if self.cursor.eat('=') {
            self.state = ScannerState::BeforeAttributeValue;
            return Some(ATTRIBUTE_DELIMITER);
        }
        self.state = ScannerState::WithinTag;
        None
    }

    pub(crate) fn before_attribute_value(&mut self) -> Option<TokenKind> {
        if self.cursor.skip_whitespace() {
            return Some(WHITESPACE);
        }
        self.state = ScannerState::WithinAttributeValue;
        match self.cursor.peek() {
            mark @ ('"' | '\'') => {
                self.cursor.advance();
                self.value_mark = Some(mark);
                Some(ATTRIBUTE_MARK)
            }
            _ => {
                self.value_mark = None;
                None
            }
        }
    }

    pub(crate) fn within_attribute_value(&mut self) -> Option<TokenKind> {
        let Some(mark) = self.value_mark else {
            if self.cursor.skip_whitespace() {
                self.space_after_tag = true;
                self.state = ScannerState::WithinTag;
                return Some(WHITESPACE);
            }
            if self.cursor.at(">") || self.cursor.at("/>") {
                self.state = ScannerState::WithinTag;
                return None;
            }
            self.cursor.seek_regex(&UNQUOTED_END);
            return Some(ATTRIBUTE_VALUE);
        };

        if self.cursor.eat(mark) {
            self.space_after_tag = false;
            self.state = ScannerState::WithinTag;
            return Some(ATTRIBUTE_MARK);
        }
        if self.in_directive {
            let mut terminator = [0; 4];
            script::skip_until(&mut self.cursor, mark.encode_utf8(&mut terminator));
            return Some(ATTRIBUTE_VALUE);
        }
        if self.cursor.eat_str("{{") {
            return Some(self.enter(ScannerState::WithinMustache, MUSTACHE_START));
        }

        let end = if mark == '"' { &DOUBLE_QUOTED_END } else { &SINGLE_QUOTED_END };
        self.cursor.seek_regex(end);
        Some(ATTRIBUTE_VALUE)
    }

    pub(crate) fn mustache(&mut self) -> Option<TokenKind> {
        if self.cursor.eat_str("}}") {
            self.state = self.return_state;
            let empty = match self.last_kind {
                Some(MUSTACHE_START) => true,
                Some(MUSTACHE_CONTENT) => self.blank_mustache,
                _ => false,
            };
            if empty {
                return self.error(MUSTACHE_END, LexError::MustacheCannotBeEmpty);
            }
            return Some(MUSTACHE_END);
        }
        let start = self.cursor.pos();
        script::skip_until(&mut self.cursor, "}}");
        self.blank_mustache = self.cursor.slice_from(start).trim().is_empty();
        Some(MUSTACHE_CONTENT)
    }

    pub(crate) fn after_opening_end_tag(&mut self) -> Option<TokenKind> {
        if self.cursor.eat_regex(&ELEMENT_NAME).is_some() {
            self.state = ScannerState::WithinEndTag;
            return Some(END_TAG);
        }
        if self.cursor.skip_whitespace() {
            return self.error(WHITESPACE, LexError::UnexpectedWhitespace);
        }

        self.state = ScannerState::WithinEndTag;
        self.skip_to_bracket(LexError::EndTagNameExpected)
    }

    pub(crate) fn within_end_tag(&mut self) -> Option<TokenKind> {
        if self.cursor.skip_whitespace() {
            return Some(WHITESPACE);
        }
        if self.cursor.eat('>') {
            self.state = ScannerState::WithinContent;
            return Some(END_TAG_CLOSE);
        }
        if self.cursor.peek() == '<' {
            self.state = ScannerState::WithinContent;
            return self.error(END_TAG_CLOSE, LexError::ClosingBracketMissing);
        }
        self.cursor.advance();
        self.error(UNKNOWN, LexError::ClosingBracketExpected)
    }

    /// Opaque `<script>`/`<style>` body up to its closing tag. One regex
    /// search per iteration jumps to the next string, comment or closing tag
    /// candidate.
    pub(crate) fn raw_text(&mut self, style: bool) -> Option<TokenKind> {
        let (stop, closing) =
            if style { (&STYLE_STOP_RE, "</style") } else { (&SCRIPT_STOP_RE, "</script") };
        let start = self.cursor.pos();

        while self.cursor.seek_regex(stop) && !self.cursor.at_ignore_case(closing) {
            if !script::skip_common(&mut self.cursor) {
                self.cursor.advance();
            }
        }

        self.state = ScannerState::WithinContent;
        (self.cursor.pos() > start).then_some(RAW_TEXT)
    }

    /// Recovery inside a tag with no name: everything up to the next bracket
    /// becomes one unknown token.
    fn skip_to_bracket(&mut self, error: LexError) -> Option<TokenKind> {
        let start = self.cursor.pos();
        self.cursor.seek_any(&['>', '<']);
        if self.cursor.pos() > start { self.error(UNKNOWN, error) } else { None }
    }
}
