//! Prose, fenced blocks and Mdx statements.

use text_size::{TextRange, TextSize};
use weft_syntax::{CodeBlock, NodeData, NodeKind};
use weft_tokenizer::Token;
use weft_tokenizer::TokenKind::*;

use crate::parser::{ParseError, Parser};

pub(super) fn token(p: &mut Parser<'_>, token: Token) {
    let text = p.text(token.range);

    match token.kind {
        TEXT => {
            if p.current_kind() != NodeKind::Paragraph {
                p.open(NodeData::Paragraph, token.range);
            }
            p.leaf(NodeData::Text { text: text.to_owned() }, token.range);
        }
        PARAGRAPH_END => {
            if p.current_kind() == NodeKind::Paragraph {
                p.close(token.range.end());
            }
        }
        CODE_BLOCK_START => {
            let block = CodeBlock {
                lang: None,
                attrs: Vec::new(),
                text: String::new(),
                content_range: TextRange::empty(token.range.end()),
                opener_end: token.range.end(),
            };
            p.open(NodeData::CodeBlock(block), token.range);
        }
        CODE_BLOCK_ATTRIBUTE => code_block_attribute(p, token, text),
        CODE_BLOCK_CONTENT => {
            if let NodeData::CodeBlock(block) = p.data_mut(p.current()) {
                block.text = text.to_owned();
                block.content_range = token.range;
            }
            p.extend(token.range.end());
        }
        CODE_BLOCK_END => {
            if let NodeData::CodeBlock(block) = p.data_mut(p.current()) {
                if block.text.is_empty() {
                    block.content_range = TextRange::empty(token.range.start());
                }
            }
            if p.current_kind() == NodeKind::CodeBlock {
                p.close(token.range.end());
            }
        }
        IMPORT_STATEMENT => {
            p.leaf(NodeData::ImportStatement { text: text.to_owned() }, token.range);
        }
        JSX_EXPRESSION => {
            p.leaf(NodeData::JsxStatement { text: text.to_owned() }, token.range);
        }
        BLOCK_EXPRESSION => {
            let inner_start = token.range.start() + TextSize::of('{');
            let inner_end = if token.error.is_none() {
                token.range.end() - TextSize::of('}')
            } else {
                token.range.end()
            };
            let text_range = TextRange::new(inner_start, inner_end);
            let is_inline = p.current_kind() == NodeKind::Paragraph;
            let text = p.text(text_range).to_owned();
            p.leaf(NodeData::ExpressionStatement { text, text_range, is_inline }, token.range);
        }
        _ => unreachable!("{:?} is not a markup token", token.kind),
    }
}

fn code_block_attribute(p: &mut Parser<'_>, token: Token, text: &str) {
    let NodeData::CodeBlock(block) = p.data_mut(p.current()) else {
        return;
    };
    block.opener_end = token.range.end();

    if block.lang.is_none() && block.attrs.is_empty() {
        block.lang = Some(text.to_owned());
    } else {
        let (key, value) = match text.split_once('=') {
            Some((key, value)) => (key, Some(value.to_owned())),
            None => (text, None),
        };
        let duplicate = block.attrs.iter().any(|(existing, _)| existing == key);
        block.attrs.push((key.to_owned(), value));
        if duplicate {
            p.report(ParseError::AttributeDuplicate, token.range);
        }
    }

    p.extend(token.range.end());
}
