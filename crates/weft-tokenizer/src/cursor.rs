use regex::Regex;
use text_size::TextSize;

use crate::classes::{is_line_space, is_whitespace};

pub(crate) const EOF_CHAR: char = '\0';

/// Byte-positioned pointer into the source text.
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn offset(&self) -> TextSize {
        TextSize::new(self.pos as u32)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }

    pub(crate) fn peek(&self) -> char {
        self.rest().chars().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn at_line_start(&self) -> bool {
        self.pos == 0 || matches!(self.text.as_bytes()[self.pos - 1], b'\n' | b'\r' | b'\x0C')
    }

    pub(crate) fn at(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    pub(crate) fn at_ignore_case(&self, s: &str) -> bool {
        self.rest().get(..s.len()).is_some_and(|head| head.eq_ignore_ascii_case(s))
    }

    pub(crate) fn advance(&mut self) -> char {
        match self.rest().chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                c
            }
            None => EOF_CHAR,
        }
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool) -> bool {
        let start = self.pos;
        let len = self.rest().find(|c| !f(c)).unwrap_or(self.rest().len());
        self.pos += len;
        self.pos > start
    }

    pub(crate) fn advance_to_end(&mut self) {
        self.pos = self.text.len();
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if self.at(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes a match of `re` starting exactly at the cursor. Patterns
    /// passed here are anchored with `^` so a miss costs nothing.
    pub(crate) fn eat_regex(&mut self, re: &Regex) -> Option<&'a str> {
        let rest = self.rest();
        let m = re.find(rest).filter(|m| m.start() == 0 && !m.is_empty())?;
        self.pos += m.end();
        Some(&rest[..m.end()])
    }

    pub(crate) fn eat_newline(&mut self) -> bool {
        self.eat_str("\r\n") || self.eat('\n') || self.eat('\r') || self.eat('\u{000C}')
    }

    pub(crate) fn skip_whitespace(&mut self) -> bool {
        self.advance_while(is_whitespace)
    }

    pub(crate) fn skip_line_space(&mut self) -> bool {
        self.advance_while(is_line_space)
    }

    /// Moves to the start of the next match of `re`, or to the end of the
    /// text when there is none.
    pub(crate) fn seek_regex(&mut self, re: &Regex) -> bool {
        self.seek(re.find(self.rest()).map(|m| m.start()))
    }

    pub(crate) fn seek_char(&mut self, c: char) -> bool {
        self.seek(self.rest().find(c))
    }

    pub(crate) fn seek_any(&mut self, chars: &[char]) -> bool {
        self.seek(self.rest().find(chars))
    }

    pub(crate) fn seek_str(&mut self, s: &str) -> bool {
        self.seek(self.rest().find(s))
    }

    fn seek(&mut self, found: Option<usize>) -> bool {
        match found {
            Some(len) => {
                self.pos += len;
                true
            }
            None => {
                self.advance_to_end();
                false
            }
        }
    }
}
