mod markup;
mod template;

use weft_syntax::{Dialect, NodeData, NodeKind};
use weft_tokenizer::Token;
use weft_tokenizer::TokenKind::*;

use crate::parser::Parser;

/// Applies one token to the tree: open, close, append, mutate or report.
pub(crate) fn token(p: &mut Parser<'_>, token: Token) {
    match token.kind {
        WHITESPACE | UNKNOWN | EOS => {}
        COMMENT_START => {
            p.open(NodeData::Comment { text: String::new() }, token.range);
        }
        COMMENT_CONTENT => {
            let content = p.text(token.range);
            if let NodeData::Comment { text } = p.data_mut(p.current()) {
                text.push_str(content);
            }
            p.extend(token.range.end());
        }
        COMMENT_END => {
            if p.current_kind() == NodeKind::Comment {
                p.close(token.range.end());
            }
        }
        TEXT if p.dialect() == Dialect::Template => template::text(p, token),
        TEXT | PARAGRAPH_END | CODE_BLOCK_START | CODE_BLOCK_ATTRIBUTE | CODE_BLOCK_CONTENT
        | CODE_BLOCK_END | IMPORT_STATEMENT | JSX_EXPRESSION | BLOCK_EXPRESSION => {
            markup::token(p, token)
        }
        START_TAG_OPEN | START_TAG | START_TAG_CLOSE | START_TAG_SELF_CLOSE | END_TAG_OPEN
        | END_TAG | END_TAG_CLOSE | ATTRIBUTE_NAME | DIRECTIVE_NAME | ATTRIBUTE_DELIMITER
        | ATTRIBUTE_MARK | ATTRIBUTE_VALUE | MUSTACHE_START | MUSTACHE_CONTENT | MUSTACHE_END
        | RAW_TEXT => template::token(p, token),
    }

    if let Some(error) = token.error {
        p.lex_error(error, token.range);
    }
}
