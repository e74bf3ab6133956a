//! Elements, attributes, directives and mustaches.

use text_size::{TextRange, TextSize};
use weft_syntax::{Attribute, Directive, Element, NodeData, NodeId, NodeKind};
use weft_tokenizer::Token;
use weft_tokenizer::TokenKind::*;

use crate::parser::{ParseError, Parser};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// Whitespace-only runs between tags are dropped.
pub(super) fn text(p: &mut Parser<'_>, token: Token) {
    let text = p.text(token.range);
    if text.trim().is_empty() {
        return;
    }
    p.leaf(NodeData::Text { text: text.to_owned() }, token.range);
}

pub(super) fn token(p: &mut Parser<'_>, token: Token) {
    let text = p.text(token.range);

    match token.kind {
        START_TAG_OPEN => {
            leave_attribute(p);
            let element = Element {
                tag: String::new(),
                self_close: false,
                start_tag_end: None,
                end_tag_start: None,
            };
            p.open(NodeData::Element(element), token.range);
        }
        START_TAG => {
            if let NodeData::Element(element) = p.data_mut(p.current()) {
                element.tag = text.to_owned();
            }
            p.extend(token.range.end());
        }
        ATTRIBUTE_NAME | DIRECTIVE_NAME => attribute(p, token, text),
        ATTRIBUTE_DELIMITER | ATTRIBUTE_MARK => p.extend(token.range.end()),
        ATTRIBUTE_VALUE => attribute_value(p, token.range),
        START_TAG_CLOSE => {
            leave_attribute(p);
            let end = token.range.end();
            let mut void = false;
            if let NodeData::Element(element) = p.data_mut(p.current()) {
                element.start_tag_end = Some(end);
                void = is_void(&element.tag);
            }
            if void {
                p.close(end);
            } else {
                p.extend(end);
            }
        }
        START_TAG_SELF_CLOSE => {
            leave_attribute(p);
            let end = token.range.end();
            if let NodeData::Element(element) = p.data_mut(p.current()) {
                element.self_close = true;
                element.start_tag_end = Some(end);
            }
            if p.current_kind() == NodeKind::Element {
                p.close(end);
            }
        }
        END_TAG_OPEN => {
            leave_attribute(p);
            p.end_tag_start = token.range.start();
            p.end_tag_name = None;
        }
        END_TAG => p.end_tag_name = Some(text),
        END_TAG_CLOSE => end_tag(p, token.range.end()),
        MUSTACHE_START => {
            let data = NodeData::Mustache {
                text: String::new(),
                text_range: TextRange::empty(token.range.end()),
            };
            p.open(data, token.range);
        }
        MUSTACHE_CONTENT => {
            if let NodeData::Mustache { text: content, text_range } = p.data_mut(p.current()) {
                *content = text.to_owned();
                *text_range = token.range;
            }
            p.extend(token.range.end());
        }
        MUSTACHE_END => {
            if p.current_kind() == NodeKind::Mustache {
                let mustache = p.current();
                p.close(token.range.end());
                let range = p.range(mustache);
                attribute_value(p, range);
            }
        }
        RAW_TEXT => {
            p.leaf(NodeData::RawText { text: text.to_owned() }, token.range);
        }
        _ => unreachable!("{:?} is not a template token", token.kind),
    }
}

fn leave_attribute(p: &mut Parser<'_>) {
    if matches!(p.current_kind(), NodeKind::Attribute | NodeKind::Directive) {
        p.ascend();
    }
}

fn attribute(p: &mut Parser<'_>, token: Token, name: &str) {
    leave_attribute(p);

    let data = if token.kind == DIRECTIVE_NAME {
        NodeData::Directive(Directive::parse(name))
    } else {
        NodeData::Attribute(Attribute { name: name.to_owned(), value: None, value_range: None })
    };

    let element = p.current();
    let duplicate = p.children(element).iter().find_map(|&sibling| {
        match (p.data(sibling), &data) {
            (NodeData::Attribute(a), NodeData::Attribute(b)) if a.name == b.name => {
                Some(ParseError::AttributeDuplicate)
            }
            (NodeData::Directive(a), NodeData::Directive(b)) if a.key() == b.key() => {
                Some(ParseError::CommandDuplicate)
            }
            _ => None,
        }
    });

    p.open(data, token.range);
    if let Some(error) = duplicate {
        p.report(error, token.range);
    }
}

/// Grows the open attribute's value to cover `range`. The value is the raw
/// source between the quotes, mustaches included.
fn attribute_value(p: &mut Parser<'_>, range: TextRange) {
    let covered = match p.data(p.current()) {
        NodeData::Attribute(Attribute { value_range, .. })
        | NodeData::Directive(Directive { value_range, .. }) => {
            value_range.map_or(range, |existing| existing.cover(range))
        }
        _ => return,
    };
    let text = p.text(covered);
    if let NodeData::Attribute(Attribute { value, value_range, .. })
    | NodeData::Directive(Directive { value, value_range, .. }) = p.data_mut(p.current())
    {
        *value = Some(text.to_owned());
        *value_range = Some(covered);
    }
    p.extend(range.end());
}

/// Closes the nearest open element named like the end tag, reporting
/// every element skipped on the way as unclosed.
fn end_tag(p: &mut Parser<'_>, end: TextSize) {
    let Some(name) = p.end_tag_name.take() else {
        return;
    };
    let start = p.end_tag_start;

    let target = p.ancestors_and_self().find(|&id| match p.data(id) {
        NodeData::Element(element) => element.tag.eq_ignore_ascii_case(name),
        _ => false,
    });
    let Some(target) = target else {
        p.report(ParseError::ExtraCloseTag, TextRange::new(start, end));
        return;
    };

    while p.current() != target {
        let current = p.current();
        set_end_tag_start(p, current, start);
        p.close_unterminated(start);
    }
    set_end_tag_start(p, target, start);
    p.close(end);
}

fn set_end_tag_start(p: &mut Parser<'_>, id: NodeId, start: TextSize) {
    if let NodeData::Element(element) = p.data_mut(id) {
        element.end_tag_start = Some(start);
    }
}
