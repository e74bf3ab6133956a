//! Skipping of host-language lexical forms.
//!
//! Everything here only needs to find where a construct *ends*: strings,
//! template literals, comments and balanced braces are stepped over without
//! looking at what they mean. All embedded-code contexts (brace expressions,
//! JSX attribute braces, template interpolations, mustaches, directive
//! values) share these routines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classes::is_ident_continue;
use crate::cursor::Cursor;

/// Next position where host-language skipping has work to do.
static HOST_STOP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"//|/\*|['"`{}]"#).unwrap());

static JSX_TAG_STOP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"//|/\*|['"`{>]|/>"#).unwrap());

static IMPORT_STOP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"]|\n[ \t]*(?:\r?\n|\r|$)"#).unwrap());

/// Skips one string, template literal or comment starting at the cursor, or
/// a balanced `{ }` group. Returns `false` without moving when the cursor is
/// not at one of those.
pub(crate) fn skip_common(c: &mut Cursor<'_>) -> bool {
    match (c.peek(), c.second()) {
        ('/', '/') => {
            c.seek_any(&['\n', '\r']);
        }
        ('/', '*') => {
            c.eat_str("/*");
            c.seek_str("*/");
            c.eat_str("*/");
        }
        (quote @ ('\'' | '"'), _) => {
            c.advance();
            skip_string(c, quote);
        }
        ('`', _) => {
            c.advance();
            skip_template(c);
        }
        ('{', _) => {
            c.advance();
            skip_braces(c);
        }
        _ => return false,
    }
    true
}

/// Skips the rest of a quoted string. Strings cannot span lines: an
/// unescaped line break ends them without being consumed.
pub(crate) fn skip_string(c: &mut Cursor<'_>, quote: char) -> bool {
    loop {
        if !c.seek_any(&['\\', quote, '\n', '\r']) {
            return false;
        }
        if c.eat('\\') {
            c.advance();
            continue;
        }
        return c.eat(quote);
    }
}

/// Skips the rest of a template literal, including nested `${ }` groups.
pub(crate) fn skip_template(c: &mut Cursor<'_>) -> bool {
    loop {
        if !c.seek_any(&['\\', '`', '$']) {
            return false;
        }
        if c.eat('\\') {
            c.advance();
        } else if c.eat_str("${") {
            if !skip_braces(c) {
                return false;
            }
        } else if c.eat('`') {
            return true;
        } else {
            c.advance();
        }
    }
}

/// Skips to the `}` closing a group whose `{` was already consumed, and
/// consumes it.
pub(crate) fn skip_braces(c: &mut Cursor<'_>) -> bool {
    skip_until(c, "}") && c.eat('}')
}

/// Skips host code until `terminator` appears outside of any nested form.
/// The terminator is left unconsumed. It must start with a character the
/// scan stops at: a quote or a brace.
pub(crate) fn skip_until(c: &mut Cursor<'_>, terminator: &str) -> bool {
    loop {
        if c.at(terminator) {
            return true;
        }
        if skip_common(c) || c.eat('}') {
            continue;
        }
        if !c.seek_regex(&HOST_STOP_RE) {
            return false;
        }
    }
}

/// Skips a JSX element or fragment whose `<` was already consumed, tracking
/// nesting depth across start tags, end tags and self-closing tags.
pub(crate) fn skip_jsx(c: &mut Cursor<'_>) -> bool {
    enum State {
        InStartTag,
        InContent,
        InEndTag,
    }

    let mut depth = 1u32;
    let mut state = State::InStartTag;

    while !c.is_eof() {
        match state {
            State::InStartTag => {
                if c.eat_str("/>") {
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                    state = State::InContent;
                } else if c.eat('>') {
                    state = State::InContent;
                } else if !skip_common(c) && !c.seek_regex(&JSX_TAG_STOP_RE) {
                    return false;
                }
            }
            State::InContent => {
                if c.eat('{') {
                    if !skip_braces(c) {
                        return false;
                    }
                } else if c.eat('<') {
                    if c.eat('/') {
                        state = State::InEndTag;
                    } else {
                        depth += 1;
                        state = State::InStartTag;
                    }
                } else if !c.seek_any(&['{', '<']) {
                    return false;
                }
            }
            State::InEndTag => {
                if c.eat('>') {
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                    state = State::InContent;
                } else if !c.seek_char('>') {
                    return false;
                }
            }
        }
    }

    false
}

/// Whether the cursor is at an `import` keyword rather than a word that
/// merely starts with it.
pub(crate) fn at_import(c: &Cursor<'_>) -> bool {
    c.at("import") && !c.rest()["import".len()..].starts_with(is_ident_continue)
}

/// Skips an ESM import whose keyword was already consumed, up to and
/// including its module string and an optional `;`. A blank line ends an
/// unterminated import.
pub(crate) fn skip_import(c: &mut Cursor<'_>) -> bool {
    loop {
        if let quote @ ('\'' | '"') = c.peek() {
            c.advance();
            if !skip_string(c, quote) {
                return false;
            }
            c.eat(';');
            return true;
        }
        if !c.seek_regex(&IMPORT_STOP_RE) || !matches!(c.peek(), '\'' | '"') {
            return false;
        }
    }
}
